//! Fast, less accurate scalar math for per-frame f32 code paths.
//!
//! Sine/cosine go through a lookup table built once on first use, floor/ceil/
//! round use a large additive bias instead of a branchy libm call. Generic
//! code should go through [`crate::Scalar`] instead.

use once_cell::sync::Lazy;

pub const PI: f32 = std::f32::consts::PI;
pub const PI2: f32 = PI * 2.0;
pub const HALF_PI: f32 = PI * 0.5;

/// multiply by this to convert from radians to degrees
pub const RAD_DEG: f32 = 180.0 / PI;
/// multiply by this to convert from degrees to radians
pub const DEG_RAD: f32 = PI / 180.0;

pub const FLOAT_ROUNDING_ERROR: f32 = 1e-6;

const SIN_BITS: i32 = 14; // 16KB table
const SIN_MASK: i32 = !(-1 << SIN_BITS);
const SIN_COUNT: usize = (SIN_MASK + 1) as usize;
const RAD_TO_INDEX: f32 = SIN_COUNT as f32 / PI2;

static SIN_TABLE: Lazy<[f32; SIN_COUNT]> = Lazy::new(|| {
  let mut table = [0.0; SIN_COUNT];
  for (i, v) in table.iter_mut().enumerate() {
    *v = ((i as f32 + 0.5) / SIN_COUNT as f32 * PI2).sin();
  }
  // exact values on the quadrant boundaries
  let deg_to_index = SIN_COUNT as f32 / 360.0;
  let mut deg = 0;
  while deg < 360 {
    let i = ((deg as f32 * deg_to_index) as i32 & SIN_MASK) as usize;
    table[i] = (deg as f32 * DEG_RAD).sin();
    deg += 90;
  }
  table
});

/// Sine from the lookup table. For optimal precision, use radians between
/// -PI2 and PI2 (both inclusive). Outside that range the index still wraps
/// through the table mask, so the result is defined but degrades.
#[inline]
pub fn sin(radians: f32) -> f32 {
  // floor, not truncate, so negative angles pick the cell they fall in
  SIN_TABLE[(floor(radians * RAD_TO_INDEX) & SIN_MASK) as usize]
}

/// Cosine from the lookup table, same precision window as [`sin`].
#[inline]
pub fn cos(radians: f32) -> f32 {
  SIN_TABLE[(floor((radians + HALF_PI) * RAD_TO_INDEX) & SIN_MASK) as usize]
}

/// Atan2 approximation. Average error of 0.00231 radians, largest error of
/// 0.00488 radians.
pub fn atan2(y: f32, x: f32) -> f32 {
  if x == 0.0 {
    if y > 0.0 {
      return HALF_PI;
    }
    return if y == 0.0 { 0.0 } else { -HALF_PI };
  }
  let z = y / x;
  if z.abs() < 1.0 {
    let atan = z / (1.0 + 0.28 * z * z);
    if x < 0.0 {
      return atan + if y < 0.0 { -PI } else { PI };
    }
    return atan;
  }
  let atan = HALF_PI - z / (z * z + 0.28);
  if y < 0.0 {
    atan - PI
  } else {
    atan
  }
}

/// Arc cosine approximation, largest error around 7e-5 radians. Input is
/// clamped to [-1, 1].
pub fn acos(value: f32) -> f32 {
  let x = clamp(value, -1.0, 1.0);
  let a = x.abs();
  let r = (1.0 - a).sqrt() * (1.570_728_8 + a * (-0.212_114_4 + a * (0.074_261 - a * 0.018_729_3)));
  if x < 0.0 {
    PI - r
  } else {
    r
  }
}

/// Arc sine approximation built on [`acos`], same precision window.
pub fn asin(value: f32) -> f32 {
  HALF_PI - acos(value)
}

const BIG_ENOUGH_INT: i32 = 16384;
const BIG_ENOUGH_FLOOR: f64 = 16384.0;
const CEIL: f64 = 0.9999999;
const BIG_ENOUGH_ROUND: f64 = 16384.5;

/// Largest integer less than or equal to the value. Only valid for inputs
/// from -(2^14) to (f32::MAX - 2^14).
#[inline]
pub fn floor(value: f32) -> i32 {
  (value as f64 + BIG_ENOUGH_FLOOR) as i32 - BIG_ENOUGH_INT
}

/// Floor for values known to be positive. Simply truncates.
#[inline]
pub fn floor_positive(value: f32) -> i32 {
  value as i32
}

/// Smallest integer greater than or equal to the value. Only valid for inputs
/// from -(2^14) to (f32::MAX - 2^14).
#[inline]
pub fn ceil(value: f32) -> i32 {
  BIG_ENOUGH_INT - (BIG_ENOUGH_FLOOR - value as f64) as i32
}

/// Ceil for values known to be positive.
#[inline]
pub fn ceil_positive(value: f32) -> i32 {
  (value as f64 + CEIL) as i32
}

/// Closest integer to the value. Only valid for inputs from -(2^14) to
/// (f32::MAX - 2^14).
#[inline]
pub fn round(value: f32) -> i32 {
  (value as f64 + BIG_ENOUGH_ROUND) as i32 - BIG_ENOUGH_INT
}

/// Round for values known to be positive.
#[inline]
pub fn round_positive(value: f32) -> i32 {
  (value + 0.5) as i32
}

/// Returns the next power of two, or the value itself if it already is one.
pub fn next_power_of_two(value: u32) -> u32 {
  if value == 0 {
    return 1;
  }
  let mut v = value - 1;
  v |= v >> 1;
  v |= v >> 2;
  v |= v >> 4;
  v |= v >> 8;
  v |= v >> 16;
  v + 1
}

pub fn is_power_of_two(value: u32) -> bool {
  value != 0 && value & (value - 1) == 0
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
  if value < min {
    return min;
  }
  if value > max {
    max
  } else {
    value
  }
}

/// Linearly interpolates from one value to the other on progress position.
#[inline]
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
  from + (to - from) * progress
}

/// Linearly normalizes value from a range, the inverse of [`lerp`]. Values
/// outside of the range are not clamped to 0 and 1.
///
/// The range must not be empty.
#[inline]
pub fn norm(range_start: f32, range_end: f32, value: f32) -> f32 {
  assert!(
    range_end != range_start,
    "norm requires a non-zero-width range"
  );
  (value - range_start) / (range_end - range_start)
}

/// Linearly maps a value from one range to another, chaining [`norm`] on the
/// input range and [`lerp`] on the output range.
///
/// The input range must not be empty.
#[inline]
pub fn map(in_start: f32, in_end: f32, out_start: f32, out_end: f32, value: f32) -> f32 {
  assert!(in_end != in_start, "map requires a non-zero-width input range");
  out_start + (value - in_start) * (out_end - out_start) / (in_end - in_start)
}

/// Linearly interpolates between two angles in radians, always taking the
/// direction with the smallest delta angle across the 2*PI wrap. Result is in
/// `[0, PI2)`.
pub fn lerp_angle(from_radians: f32, to_radians: f32, progress: f32) -> f32 {
  let delta = (to_radians - from_radians + PI2 + PI) % PI2 - PI;
  (from_radians + delta * progress + PI2) % PI2
}

/// Degree flavor of [`lerp_angle`], wrapping at 360. Result is in `[0, 360)`.
pub fn lerp_angle_deg(from_degrees: f32, to_degrees: f32, progress: f32) -> f32 {
  let delta = (to_degrees - from_degrees + 360.0 + 180.0) % 360.0 - 180.0;
  (from_degrees + delta * progress + 360.0) % 360.0
}

/// Wraps an angle into range 0 <= angle < 360.
pub fn norm_angle(degrees: f32) -> f32 {
  if degrees >= 360.0 {
    degrees - floor(degrees / 360.0) as f32 * 360.0
  } else if degrees < 0.0 {
    degrees + ceil(degrees.abs() / 360.0) as f32 * 360.0
  } else {
    degrees
  }
}

/// Wraps an angle into range 0 <= angle < PI2.
pub fn norm_angle_rad(radians: f32) -> f32 {
  if radians >= PI2 {
    radians - floor(radians / PI2) as f32 * PI2
  } else if radians < 0.0 {
    radians + ceil(radians.abs() / PI2) as f32 * PI2
  } else {
    radians
  }
}

/// Returns true if the value is zero within the default tolerance.
#[inline]
pub fn is_zero(value: f32) -> bool {
  value.abs() <= FLOAT_ROUNDING_ERROR
}

/// Returns true if the value is zero within the given tolerance.
#[inline]
pub fn is_zero_tolerance(value: f32, tolerance: f32) -> bool {
  value.abs() <= tolerance
}

/// Returns true if a is nearly equal to b within the default tolerance.
#[inline]
pub fn is_equal(a: f32, b: f32) -> bool {
  (a - b).abs() <= FLOAT_ROUNDING_ERROR
}

/// Returns true if a is nearly equal to b within the given tolerance.
#[inline]
pub fn is_equal_tolerance(a: f32, b: f32, tolerance: f32) -> bool {
  (a - b).abs() <= tolerance
}

#[test]
fn table_sin_matches_std() {
  let mut r = -PI2;
  while r <= PI2 {
    assert!((sin(r) - r.sin()).abs() < 2e-4, "sin({r})");
    assert!((cos(r) - r.cos()).abs() < 2e-4, "cos({r})");
    r += 0.0137;
  }
  // patched exact values
  assert_eq!(sin(0.0), 0.0);
  assert_eq!(sin(HALF_PI), 1.0);
  // a negative angle just shy of -PI2 lands in the last table cell
  let r = -6.2694855f32;
  assert!((sin(r) - r.sin()).abs() < 2e-4, "sin({r})");
}

#[test]
fn inverse_trig_matches_std() {
  let mut x = -1.0f32;
  while x <= 1.0 {
    assert!((acos(x) - x.acos()).abs() < 1e-4, "acos({x})");
    assert!((asin(x) - x.asin()).abs() < 1e-4, "asin({x})");
    x += 0.013;
  }
  // clamped out-of-domain inputs
  assert!((acos(1.5) - 0.0).abs() < 1e-4);
  assert!((acos(-1.5) - PI).abs() < 1e-4);

  let mut y = -3.0f32;
  while y <= 3.0 {
    let mut x = -3.0f32;
    while x <= 3.0 {
      if x != 0.0 || y != 0.0 {
        assert!((atan2(y, x) - y.atan2(x)).abs() < 5e-3, "atan2({y}, {x})");
      }
      x += 0.37;
    }
    y += 0.37;
  }
}

#[test]
fn fast_rounding() {
  assert_eq!(floor(1.9), 1);
  assert_eq!(floor(-1.1), -2);
  assert_eq!(floor(-16000.5), -16001);
  assert_eq!(ceil(1.1), 2);
  assert_eq!(ceil(-1.9), -1);
  assert_eq!(round(1.49), 1);
  assert_eq!(round(1.5), 2);
  assert_eq!(round(-1.51), -2);
}

#[test]
fn angle_lerp_wraps_shortest_path() {
  let v = lerp_angle_deg(350.0, 10.0, 0.5);
  assert!(is_zero_tolerance(v, 1e-4) || is_equal_tolerance(v, 360.0, 1e-4));
  assert!((lerp_angle(0.1, PI2 - 0.1, 0.5) - 0.0).abs() < 1e-4);
  assert_eq!(lerp_angle_deg(10.0, 30.0, 0.5), 20.0);
}

#[test]
fn power_of_two() {
  assert_eq!(next_power_of_two(0), 1);
  assert_eq!(next_power_of_two(1), 1);
  assert_eq!(next_power_of_two(3), 4);
  assert_eq!(next_power_of_two(256), 256);
  assert_eq!(next_power_of_two(257), 512);
  assert!(is_power_of_two(1024));
  assert!(!is_power_of_two(0));
  assert!(!is_power_of_two(12));
}

#[test]
fn range_remap() {
  assert_eq!(norm(0.0, 10.0, 5.0), 0.5);
  assert_eq!(map(0.0, 10.0, 100.0, 200.0, 5.0), 150.0);
  assert_eq!(norm_angle(-90.0), 270.0);
  assert_eq!(norm_angle(370.0), 10.0);
}
