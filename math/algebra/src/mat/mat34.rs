use std::ops::Mul;

use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum TransformKind {
  General,
  Translation,
}

/// Affine transform stored as 3x4 columns with an implicit `[0 0 0 1]`
/// bottom row. Column d is the translation.
///
/// A kind tag tracks whether the rotation/scale block is still identity, so
/// composing pure translations skips the full 3x3 multiply. The tag is
/// maintained by the construction and mutation API and is not directly
/// settable, which keeps it consistent with the cells by construction.
#[rustfmt::skip]
#[derive(Debug, Copy, Clone)]
pub struct Mat34<T> {
  a1: T, a2: T, a3: T,
  b1: T, b2: T, b3: T,
  c1: T, c2: T, c3: T,
  d1: T, d2: T, d3: T,
  kind: TransformKind,
}

impl<T: PartialEq> PartialEq for Mat34<T> {
  fn eq(&self, other: &Self) -> bool {
    // the tag is a cache, cell-identical transforms are equal
    self.a1 == other.a1
      && self.a2 == other.a2
      && self.a3 == other.a3
      && self.b1 == other.b1
      && self.b2 == other.b2
      && self.b3 == other.b3
      && self.c1 == other.c1
      && self.c2 == other.c2
      && self.c3 == other.c3
      && self.d1 == other.d1
      && self.d2 == other.d2
      && self.d3 == other.d3
  }
}

impl<T: Scalar> Default for Mat34<T> {
  fn default() -> Self {
    Self::identity()
  }
}

impl<T: Scalar> Mat34<T> {
  pub fn identity() -> Self {
    Self::from_translation(Vec3::zero())
  }

  #[rustfmt::skip]
  pub fn from_translation(translation: impl Into<Vec3<T>>) -> Self {
    let Vec3 { x, y, z } = translation.into();

    Self {
      a1: T::one(),  a2: T::zero(), a3: T::zero(),
      b1: T::zero(), b2: T::one(),  b3: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::one(),
      d1: x,         d2: y,         d3: z,
      kind: TransformKind::Translation,
    }
  }

  #[rustfmt::skip]
  pub fn from_trs(translation: Vec3<T>, rotation: Quat<T>, scale: Vec3<T>) -> Self {
    let r = Mat3::from(rotation);

    Self {
      a1: r.a1 * scale.x, a2: r.a2 * scale.x, a3: r.a3 * scale.x,
      b1: r.b1 * scale.y, b2: r.b2 * scale.y, b3: r.b3 * scale.y,
      c1: r.c1 * scale.z, c2: r.c2 * scale.z, c3: r.c3 * scale.z,
      d1: translation.x,  d2: translation.y,  d3: translation.z,
      kind: TransformKind::General,
    }
  }

  pub fn is_pure_translation(&self) -> bool {
    self.kind == TransformKind::Translation
  }

  pub fn right(&self) -> Vec3<T> {
    Vec3::new(self.a1, self.a2, self.a3)
  }

  pub fn up(&self) -> Vec3<T> {
    Vec3::new(self.b1, self.b2, self.b3)
  }

  pub fn forward(&self) -> Vec3<T> {
    Vec3::new(self.c1, self.c2, self.c3)
  }

  pub fn position(&self) -> Vec3<T> {
    Vec3::new(self.d1, self.d2, self.d3)
  }

  /// Per-column scale magnitudes. The square root is skipped for columns
  /// that are already axis aligned.
  pub fn get_scale(&self) -> Vec3<T> {
    let sx = if self.a2.about_zero() && self.a3.about_zero() {
      self.a1.abs()
    } else {
      (self.a1 * self.a1 + self.a2 * self.a2 + self.a3 * self.a3).sqrt()
    };
    let sy = if self.b1.about_zero() && self.b3.about_zero() {
      self.b2.abs()
    } else {
      (self.b1 * self.b1 + self.b2 * self.b2 + self.b3 * self.b3).sqrt()
    };
    let sz = if self.c1.about_zero() && self.c2.about_zero() {
      self.c3.abs()
    } else {
      (self.c1 * self.c1 + self.c2 * self.c2 + self.c3 * self.c3).sqrt()
    };
    Vec3::new(sx, sy, sz)
  }

  pub fn get_rotation(&self, normalize_axes: bool) -> Quat<T> {
    Quat::from_basis(normalize_axes, self.right(), self.up(), self.forward())
  }

  pub fn decompose_trs(&self) -> (Vec3<T>, Quat<T>, Vec3<T>) {
    (self.position(), self.get_rotation(true), self.get_scale())
  }

  pub fn det3x3(&self) -> T {
    self.to_mat3().det()
  }

  /// Postmultiply by a translation. The offset goes through the rotation and
  /// scale block, and the kind tag is unaffected.
  pub fn translate(&mut self, offset: impl Into<Vec3<T>>) -> &mut Self {
    let Vec3 { x, y, z } = offset.into();
    self.d1 = self.d1 + self.a1 * x + self.b1 * y + self.c1 * z;
    self.d2 = self.d2 + self.a2 * x + self.b2 * y + self.c2 * z;
    self.d3 = self.d3 + self.a3 * x + self.b3 * y + self.c3 * z;
    self
  }

  /// Postmultiply by a rotation. This downgrades the transform to the
  /// general kind.
  pub fn rotate(&mut self, rotation: Quat<T>) -> &mut Self {
    let r: Mat3<T> = rotation.into();
    let b = self.to_mat3() * r;
    self.a1 = b.a1;
    self.a2 = b.a2;
    self.a3 = b.a3;
    self.b1 = b.b1;
    self.b2 = b.b2;
    self.b3 = b.b3;
    self.c1 = b.c1;
    self.c2 = b.c2;
    self.c3 = b.c3;
    self.kind = TransformKind::General;
    self
  }

  /// Postmultiply by a nonuniform scale. This downgrades the transform to
  /// the general kind.
  pub fn scale(&mut self, scale: impl Into<Vec3<T>>) -> &mut Self {
    let Vec3 { x, y, z } = scale.into();
    self.a1 = self.a1 * x;
    self.a2 = self.a2 * x;
    self.a3 = self.a3 * x;
    self.b1 = self.b1 * y;
    self.b2 = self.b2 * y;
    self.b3 = self.b3 * y;
    self.c1 = self.c1 * z;
    self.c2 = self.c2 * z;
    self.c3 = self.c3 * z;
    self.kind = TransformKind::General;
    self
  }

  /// Elementwise interpolation over the twelve cells. Interpolating between
  /// two pure translations stays pure translation.
  #[must_use]
  pub fn lerp(self, other: Self, t: T) -> Self {
    let a: [T; 12] = self.into();
    let b: [T; 12] = other.into();
    let mut r = a;
    for i in 0..12 {
      r[i] = a[i] + (b[i] - a[i]) * t;
    }
    let kind = if self.kind == TransformKind::Translation && other.kind == TransformKind::Translation
    {
      TransformKind::Translation
    } else {
      TransformKind::General
    };
    let mut out: Self = r.into();
    out.kind = kind;
    out
  }

  #[rustfmt::skip]
  pub fn to_mat3(self) -> Mat3<T> {
    Mat3 {
      a1: self.a1, a2: self.a2, a3: self.a3,
      b1: self.b1, b2: self.b2, b3: self.b3,
      c1: self.c1, c2: self.c2, c3: self.c3,
    }
  }

  #[rustfmt::skip]
  pub fn to_mat4(self) -> Mat4<T> {
    Mat4 {
      a1: self.a1,   a2: self.a2,   a3: self.a3,   a4: T::zero(),
      b1: self.b1,   b2: self.b2,   b3: self.b3,   b4: T::zero(),
      c1: self.c1,   c2: self.c2,   c3: self.c3,   c4: T::zero(),
      d1: self.d1,   d2: self.d2,   d3: self.d3,   d4: T::one(),
    }
  }
}

impl<T: Scalar> Mul for Mat34<T> {
  type Output = Self;

  /// Affine composition. A pure translation on the left degenerates to
  /// adding the translations together, skipping the 3x3 work.
  #[rustfmt::skip]
  fn mul(self, m: Self) -> Self {
    let a = self;

    if a.kind == TransformKind::Translation {
      return Self {
        d1: m.d1 + a.d1,
        d2: m.d2 + a.d2,
        d3: m.d3 + a.d3,
        ..m
      };
    }

    Self {
      a1: a.a1 * m.a1 + a.b1 * m.a2 + a.c1 * m.a3,
      a2: a.a2 * m.a1 + a.b2 * m.a2 + a.c2 * m.a3,
      a3: a.a3 * m.a1 + a.b3 * m.a2 + a.c3 * m.a3,

      b1: a.a1 * m.b1 + a.b1 * m.b2 + a.c1 * m.b3,
      b2: a.a2 * m.b1 + a.b2 * m.b2 + a.c2 * m.b3,
      b3: a.a3 * m.b1 + a.b3 * m.b2 + a.c3 * m.b3,

      c1: a.a1 * m.c1 + a.b1 * m.c2 + a.c1 * m.c3,
      c2: a.a2 * m.c1 + a.b2 * m.c2 + a.c2 * m.c3,
      c3: a.a3 * m.c1 + a.b3 * m.c2 + a.c3 * m.c3,

      d1: a.a1 * m.d1 + a.b1 * m.d2 + a.c1 * m.d3 + a.d1,
      d2: a.a2 * m.d1 + a.b2 * m.d2 + a.c2 * m.d3 + a.d2,
      d3: a.a3 * m.d1 + a.b3 * m.d2 + a.c3 * m.d3 + a.d3,

      kind: TransformKind::General,
    }
  }
}

impl<T: Scalar> Mul<Vec3<T>> for Mat34<T> {
  type Output = Vec3<T>;

  fn mul(self, v: Vec3<T>) -> Vec3<T> {
    Vec3 {
      x: v.x * self.a1 + v.y * self.b1 + v.z * self.c1 + self.d1,
      y: v.x * self.a2 + v.y * self.b2 + v.z * self.c2 + self.d2,
      z: v.x * self.a3 + v.y * self.b3 + v.z * self.c3 + self.d3,
    }
  }
}

impl<T: Scalar> From<Quat<T>> for Mat34<T> {
  fn from(q: Quat<T>) -> Self {
    Self::from_trs(Vec3::zero(), q, Vec3::one())
  }
}

/// Drops the bottom row, which is assumed to be `[0 0 0 1]`.
impl<T: Scalar> From<Mat4<T>> for Mat34<T> {
  #[rustfmt::skip]
  fn from(m: Mat4<T>) -> Self {
    Self {
      a1: m.a1, a2: m.a2, a3: m.a3,
      b1: m.b1, b2: m.b2, b3: m.b3,
      c1: m.c1, c2: m.c2, c3: m.c3,
      d1: m.d1, d2: m.d2, d3: m.d3,
      kind: if m.has_rotation_or_scaling() {
        TransformKind::General
      } else {
        TransformKind::Translation
      },
    }
  }
}

impl<T: Scalar> From<Mat34<T>> for Mat4<T> {
  fn from(m: Mat34<T>) -> Self {
    m.to_mat4()
  }
}

/// Column-major cell order without the implicit bottom row.
impl<T: Scalar> From<[T; 12]> for Mat34<T> {
  #[rustfmt::skip]
  fn from(v: [T; 12]) -> Self {
    let rotation_scale_block_is_identity = v[0] == T::one()
      && v[4] == T::one()
      && v[8] == T::one()
      && v[1] == T::zero()
      && v[2] == T::zero()
      && v[3] == T::zero()
      && v[5] == T::zero()
      && v[6] == T::zero()
      && v[7] == T::zero();
    Self {
      a1: v[0], a2: v[1],  a3: v[2],
      b1: v[3], b2: v[4],  b3: v[5],
      c1: v[6], c2: v[7],  c3: v[8],
      d1: v[9], d2: v[10], d3: v[11],
      kind: if rotation_scale_block_is_identity {
        TransformKind::Translation
      } else {
        TransformKind::General
      },
    }
  }
}

impl<T> From<Mat34<T>> for [T; 12] {
  fn from(m: Mat34<T>) -> Self {
    [
      m.a1, m.a2, m.a3, m.b1, m.b2, m.b3, m.c1, m.c2, m.c3, m.d1, m.d2, m.d3,
    ]
  }
}

/// Serializes as the twelve cells. The kind tag is recomputed on the way back
/// in, so serialized data cannot desync it from the cells.
impl<T: Copy + Serialize> Serialize for Mat34<T> {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let cells: [T; 12] = (*self).into();
    cells.serialize(serializer)
  }
}

impl<'de, T: Scalar + Deserialize<'de>> Deserialize<'de> for Mat34<T> {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(<[T; 12]>::deserialize(deserializer)?.into())
  }
}

#[test]
fn cell_conversion_recomputes_the_kind() {
  // the cell array carries no tag, it comes back from inspecting the 3x3 block
  let t = Mat34::<f32>::from_translation((1., 2., 3.));
  let cells: [f32; 12] = t.into();
  assert!(Mat34::from(cells).is_pure_translation());

  let g = Mat34::from_trs(
    Vec3::new(1., 2., 3.),
    Quat::<f32>::rotation(Vec3::new(0., 1., 0.), 0.4),
    Vec3::one(),
  );
  let cells: [f32; 12] = g.into();
  assert!(!Mat34::from(cells).is_pure_translation());
}

#[test]
fn translation_fast_path_matches_general_composition() {
  let t = Mat34::<f32>::from_translation((1., 2., 3.));
  let g = Mat34::from_trs(
    Vec3::new(-2., 0.5, 4.),
    Quat::rotation(Vec3::new(0., 1., 0.), 0.7),
    Vec3::new(2., 1., 0.5),
  );

  assert!(t.is_pure_translation());
  assert!(!g.is_pure_translation());

  let fast: [f32; 12] = (t * g).into();
  let full: [f32; 12] = Mat34::<f32>::from(t.to_mat4() * g.to_mat4()).into();
  for (a, b) in fast.iter().zip(full.iter()) {
    assert!((a - b).abs() < 1e-5);
  }

  let general: [f32; 12] = (g * t).into();
  let expect: [f32; 12] = Mat34::<f32>::from(g.to_mat4() * t.to_mat4()).into();
  for (a, b) in general.iter().zip(expect.iter()) {
    assert!((a - b).abs() < 1e-5);
  }
}

#[test]
fn composing_translations_stays_on_fast_path() {
  let a = Mat34::<f32>::from_translation((1., 0., 0.));
  let b = Mat34::<f32>::from_translation((0., 2., 0.));
  let c = a * b;
  assert!(c.is_pure_translation());
  assert_eq!(c.position(), Vec3::new(1., 2., 0.));
}

#[test]
fn mutators_downgrade_the_kind() {
  let mut m = Mat34::<f32>::identity();
  m.translate((1., 2., 3.));
  assert!(m.is_pure_translation());
  m.rotate(Quat::rotation(Vec3::new(1., 0., 0.), 0.3));
  assert!(!m.is_pure_translation());

  let mut s = Mat34::<f32>::identity();
  s.scale((2., 2., 2.));
  assert!(!s.is_pure_translation());
}

#[test]
fn point_transform_applies_translation_last() {
  let m = Mat34::from_trs(
    Vec3::new(10., 0., 0.),
    Quat::<f32>::rotation(Vec3::new(0., 0., 1.), std::f32::consts::FRAC_PI_2),
    Vec3::new(1., 1., 1.),
  );
  let p = m * Vec3::new(1., 0., 0.);
  assert!((p - Vec3::new(10., 1., 0.)).length() < 1e-5);
}

#[test]
fn trs_round_trip() {
  let t = Vec3::new(3., -4., 5.);
  let q = Quat::<f32>::rotation(Vec3::new(1., 1., 0.).normalize(), 1.1);
  let s = Vec3::new(0.5, 2., 3.);

  let (t2, q2, s2) = Mat34::from_trs(t, q, s).decompose_trs();
  assert!((t - t2).length() < 1e-5);
  assert!((s - s2).length() < 1e-5);
  let dot = q.x * q2.x + q.y * q2.y + q.z * q2.z + q.w * q2.w;
  assert!((dot.abs() - 1.).abs() < 1e-5);
}
