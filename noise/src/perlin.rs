use orrery_algebra::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seeded 3D gradient noise sampler.
///
/// The permutation table is shuffled once from the seed, so two samplers
/// built with the same seed produce identical output for every input. The
/// table is stored twice back to back, letting the hash chain index without
/// wrapping.
pub struct Perlin {
  perm: Vec<u16>,
  mask: usize,
}

impl Perlin {
  pub fn new(seed: u64) -> Self {
    Self::with_table_size(seed, 512)
  }

  /// `table_size` must be a power of two. Larger tables increase the tiling
  /// period of the noise.
  pub fn with_table_size(seed: u64, table_size: usize) -> Self {
    assert!(
      table_size.is_power_of_two(),
      "perlin permutation table size must be a power of two"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut table: Vec<u16> = (0..table_size as u16).collect();
    table.shuffle(&mut rng);

    let mut perm = Vec::with_capacity(table_size * 2);
    perm.extend_from_slice(&table);
    perm.extend_from_slice(&table);

    Self {
      perm,
      mask: table_size - 1,
    }
  }

  pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
    let xi = (x.floor() as i64 as usize) & self.mask;
    let yi = (y.floor() as i64 as usize) & self.mask;
    let zi = (z.floor() as i64 as usize) & self.mask;

    let xf = x - x.floor();
    let yf = y - y.floor();
    let zf = z - z.floor();

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    let p = &self.perm;
    let a = p[xi] as usize + yi;
    let aa = p[a] as usize + zi;
    let ab = p[a + 1] as usize + zi;
    let b = p[xi + 1] as usize + yi;
    let ba = p[b] as usize + zi;
    let bb = p[b + 1] as usize + zi;

    let x1 = lerp(grad(p[aa], xf, yf, zf), grad(p[ba], xf - 1., yf, zf), u);
    let x2 = lerp(
      grad(p[ab], xf, yf - 1., zf),
      grad(p[bb], xf - 1., yf - 1., zf),
      u,
    );
    let y1 = lerp(x1, x2, v);

    let x1 = lerp(
      grad(p[aa + 1], xf, yf, zf - 1.),
      grad(p[ba + 1], xf - 1., yf, zf - 1.),
      u,
    );
    let x2 = lerp(
      grad(p[ab + 1], xf, yf - 1., zf - 1.),
      grad(p[bb + 1], xf - 1., yf - 1., zf - 1.),
      u,
    );
    let y2 = lerp(x1, x2, v);

    lerp(y1, y2, w)
  }

  pub fn get(&self, point: Vec3<f32>) -> f32 {
    self.sample(point.x, point.y, point.z)
  }

  /// Octave sum of the base noise, each octave doubling the frequency and
  /// scaling the amplitude by `persistence`. Normalized back into the base
  /// noise's value range.
  pub fn noise3(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32) -> f32 {
    let mut total = 0.;
    let mut frequency = 1.;
    let mut amplitude = 1.;
    let mut max_value = 0.;
    for _ in 0..octaves {
      total += self.sample(x * frequency, y * frequency, z * frequency) * amplitude;
      max_value += amplitude;
      amplitude *= persistence;
      frequency *= 2.;
    }
    total / max_value
  }
}

/// Quintic smoothstep, zero first and second derivative at the cell edges.
fn fade(t: f32) -> f32 {
  t * t * t * (t * (t * 6. - 15.) + 10.)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + t * (b - a)
}

/// Projects onto one of 16 gradient directions picked by the hash.
fn grad(hash: u16, x: f32, y: f32, z: f32) -> f32 {
  let h = hash & 15;
  let u = if h < 8 { x } else { y };
  let v = if h < 4 {
    y
  } else if h == 12 || h == 14 {
    x
  } else {
    z
  };
  let u = if h & 1 == 0 { u } else { -u };
  let v = if h & 2 == 0 { v } else { -v };
  u + v
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_seed_same_noise() {
    let a = Perlin::new(42);
    let b = Perlin::new(42);
    for i in 0..32 {
      let t = i as f32 * 0.173;
      assert_eq!(a.sample(t, t * 2., -t), b.sample(t, t * 2., -t));
    }
  }

  #[test]
  fn repeated_calls_are_pure() {
    let p = Perlin::new(7);
    let first = p.sample(1.3, 4.7, -2.1);
    assert_eq!(first, p.sample(1.3, 4.7, -2.1));
  }

  #[test]
  fn different_seeds_differ() {
    let a = Perlin::new(1);
    let b = Perlin::new(2);
    let differs = (0..16).any(|i| {
      let t = 0.37 + i as f32 * 0.51;
      a.sample(t, t, t) != b.sample(t, t, t)
    });
    assert!(differs);
  }

  #[test]
  fn zero_at_lattice_points() {
    let p = Perlin::new(3);
    assert_eq!(p.sample(1., 2., 3.), 0.);
    assert_eq!(p.sample(-4., 0., 17.), 0.);
  }

  #[test]
  fn values_stay_in_range() {
    let p = Perlin::new(99);
    for i in 0..256 {
      let t = i as f32 * 0.0917;
      let v = p.sample(t, -t * 0.4, t * 1.9);
      assert!(v.abs() <= 1.);
    }
  }

  #[test]
  fn vec3_entry_point_matches_scalar() {
    let p = Perlin::new(11);
    assert_eq!(p.get(Vec3::new(0.5, 1.5, 2.5)), p.sample(0.5, 1.5, 2.5));
  }

  #[test]
  fn octave_sum_is_deterministic_and_bounded() {
    let p = Perlin::new(5);
    let a = p.noise3(0.3, 0.6, 0.9, 4, 0.5);
    let b = p.noise3(0.3, 0.6, 0.9, 4, 0.5);
    assert_eq!(a, b);
    assert!(a.abs() <= 1.);
  }
}
