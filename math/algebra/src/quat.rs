use crate::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::{fmt, ops::*};

/// A rotation quaternion, x/y/z the imaginary part and w the real part.
///
/// Layout-identical to [`Vec4`] and convertible both ways for free, so a
/// 4-float buffer can be read under either interpretation. Rotation-assuming
/// operations (swing/twist, axis extraction, vector rotation) expect a unit
/// quaternion; renormalize after accumulating floating error.
#[repr(C)]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Quat<T> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

pub fn quat<T>(x: T, y: T, z: T, w: T) -> Quat<T> {
  Quat::new(x, y, z, w)
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Quat<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Quat<T> {}

impl<T> Quat<T> {
  pub const fn new(x: T, y: T, z: T, w: T) -> Self {
    Self { x, y, z, w }
  }
}

impl<T: Scalar> Default for Quat<T> {
  fn default() -> Self {
    Self::identity()
  }
}

impl<T: Copy> From<Vec4<T>> for Quat<T> {
  fn from(v: Vec4<T>) -> Self {
    Self::new(v.x, v.y, v.z, v.w)
  }
}

impl<T: Copy> From<Quat<T>> for Vec4<T> {
  fn from(q: Quat<T>) -> Self {
    Self::new(q.x, q.y, q.z, q.w)
  }
}

impl<T: Scalar> Quat<T> {
  #[inline]
  pub fn identity() -> Self {
    Self::new(T::zero(), T::zero(), T::zero(), T::one())
  }

  /// Negates the imaginary part. For a unit quaternion this is the inverse
  /// rotation.
  #[inline]
  #[must_use]
  pub fn conjugate(&self) -> Self {
    Self::new(-self.x, -self.y, -self.z, self.w)
  }

  #[inline]
  pub fn dot(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y + self.z * b.z + self.w * b.w
  }

  #[inline]
  pub fn length2(&self) -> T {
    self.dot(*self)
  }

  #[inline]
  pub fn length(&self) -> T {
    self.length2().sqrt()
  }

  #[inline]
  #[must_use]
  pub fn normalize(&self) -> Self {
    let l2 = self.length2();
    if l2 > T::zero() && l2 != T::one() {
      let inv = T::one() / l2.sqrt();
      return Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv);
    }
    *self
  }

  /// Rotation by the given angle in radians around the axis, which does not
  /// need to be normalized. A zero axis yields the identity.
  pub fn rotation(axis: Vec3<T>, radians: T) -> Self {
    let d2 = axis.length2();
    if d2 == T::zero() {
      return Self::identity();
    }
    let d = T::one() / d2.sqrt();
    let ang = if radians < T::zero() {
      T::two_pi() - (-radians) % T::two_pi()
    } else {
      radians % T::two_pi()
    };
    let sin = (ang * T::half()).sin();
    let cos = (ang * T::half()).cos();
    Self::new(d * axis.x * sin, d * axis.y * sin, d * axis.z * sin, cos).normalize()
  }

  /// Rotation carrying the first vector onto the second. Both should be
  /// normalized.
  pub fn rotation_between(from: Vec3<T>, to: Vec3<T>) -> Self {
    let dot = from.dot(to).min(T::one()).max(-T::one());
    Self::rotation(from.cross(to), dot.acos())
  }

  /// Intrinsic yaw (y axis), pitch (x axis), roll (z axis), all in radians.
  pub fn from_euler_angles(yaw: T, pitch: T, roll: T) -> Self {
    let hr = roll * T::half();
    let shr = hr.sin();
    let chr = hr.cos();
    let hp = pitch * T::half();
    let shp = hp.sin();
    let chp = hp.cos();
    let hy = yaw * T::half();
    let shy = hy.sin();
    let chy = hy.cos();
    let chy_shp = chy * shp;
    let shy_chp = shy * chp;
    let chy_chp = chy * chp;
    let shy_shp = shy * shp;
    Self::new(
      chy_shp * chr + shy_chp * shr,
      shy_chp * chr - chy_shp * shr,
      chy_chp * shr - shy_shp * chr,
      chy_chp * chr + shy_shp * shr,
    )
  }

  /// Extract the quaternion from an orthonormal basis given as the three
  /// column axes. Branches on the largest of (trace, xx, yy, zz) to avoid
  /// cancellation; all four branches keep the divisor >= 1.
  pub fn from_orthonormal_axes(x_axis: Vec3<T>, y_axis: Vec3<T>, z_axis: Vec3<T>) -> Self {
    Self::from_basis(false, x_axis, y_axis, z_axis)
  }

  /// Like [`Self::from_orthonormal_axes`] but optionally normalizing the
  /// axes first, which is necessary when they carry scaling.
  pub fn from_basis(normalize_axes: bool, x_axis: Vec3<T>, y_axis: Vec3<T>, z_axis: Vec3<T>) -> Self {
    let (xa, ya, za) = if normalize_axes {
      (x_axis.normalize(), y_axis.normalize(), z_axis.normalize())
    } else {
      (x_axis, y_axis, z_axis)
    };
    // cell (row, col) of the basis matrix
    let (m00, m10, m20) = (xa.x, xa.y, xa.z);
    let (m01, m11, m21) = (ya.x, ya.y, ya.z);
    let (m02, m12, m22) = (za.x, za.y, za.z);

    let half = T::half();
    let t = m00 + m11 + m22;
    if t >= T::zero() {
      let mut s = (t + T::one()).sqrt();
      let w = half * s;
      s = half / s;
      Self::new((m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s, w)
    } else if m00 > m11 && m00 > m22 {
      let mut s = (T::one() + m00 - m11 - m22).sqrt();
      let x = half * s;
      s = half / s;
      Self::new(x, (m10 + m01) * s, (m02 + m20) * s, (m21 - m12) * s)
    } else if m11 > m22 {
      let mut s = (T::one() + m11 - m00 - m22).sqrt();
      let y = half * s;
      s = half / s;
      Self::new((m10 + m01) * s, y, (m21 + m12) * s, (m02 - m20) * s)
    } else {
      let mut s = (T::one() + m22 - m00 - m11).sqrt();
      let z = half * s;
      s = half / s;
      Self::new((m02 + m20) * s, (m21 + m12) * s, z, (m10 - m01) * s)
    }
  }

  /// Positive (+1) for north pole, negative (-1) for south pole, zero when
  /// no gimbal lock.
  pub fn gimbal_pole(&self) -> i32 {
    let t = self.y * self.x + self.z * self.w;
    if t > T::by(0.499) {
      1
    } else if t < T::by(-0.499) {
      -1
    } else {
      0
    }
  }

  /// Rotation around the y axis in radians, in (-PI, PI). Requires a unit
  /// quaternion.
  pub fn yaw(&self) -> T {
    if self.gimbal_pole() == 0 {
      let two = T::two();
      (two * (self.y * self.w + self.x * self.z))
        .atan2(T::one() - two * (self.y * self.y + self.x * self.x))
    } else {
      T::zero()
    }
  }

  /// Rotation around the x axis in radians, in (-PI/2, PI/2). Requires a
  /// unit quaternion.
  pub fn pitch(&self) -> T {
    let pole = self.gimbal_pole();
    if pole == 0 {
      let v = T::two() * (self.w * self.x - self.z * self.y);
      v.min(T::one()).max(-T::one()).asin()
    } else {
      T::by(pole as f32) * T::half_pi()
    }
  }

  /// Rotation around the z axis in radians, in (-PI, PI). Requires a unit
  /// quaternion.
  pub fn roll(&self) -> T {
    let pole = self.gimbal_pole();
    let two = T::two();
    if pole == 0 {
      (two * (self.w * self.z + self.y * self.x))
        .atan2(T::one() - two * (self.x * self.x + self.z * self.z))
    } else {
      T::by(pole as f32) * two * self.y.atan2(self.w)
    }
  }

  /// Angle in radians of the rotation this quaternion represents.
  pub fn angle(&self) -> T {
    let w = if self.w > T::one() {
      self.w / self.length()
    } else {
      self.w
    };
    T::two() * w.acos()
  }

  /// Rotates the vector by this quaternion, which must be unit length.
  pub fn rotate_vec3(&self, v: Vec3<T>) -> Vec3<T> {
    // (v, 0) * conjugate(this), then this * that
    let nx = v.x * self.w - v.y * self.z + v.z * self.y;
    let ny = v.y * self.w - v.z * self.x + v.x * self.z;
    let nz = v.z * self.w - v.x * self.y + v.y * self.x;
    let nw = v.x * self.x + v.y * self.y + v.z * self.z;
    Vec3::new(
      self.w * nx + self.x * nw + self.y * nz - self.z * ny,
      self.w * ny + self.y * nw + self.z * nx - self.x * nz,
      self.w * nz + self.z * nw + self.x * ny - self.y * nx,
    )
  }

  /// (this quaternion)^alpha, the quaternion power used when blending more
  /// than two rotations by weighted product.
  #[must_use]
  pub fn pow(&self, alpha: T) -> Self {
    let norm = self.length();
    let norm_exp = norm.powf(alpha);
    let theta = (self.w / norm).acos();
    let coeff = if theta.abs() < T::by(0.001) {
      // limit of sin(alpha*theta) / sin(theta)
      norm_exp * alpha / norm
    } else {
      norm_exp * (alpha * theta).sin() / (norm * theta.sin())
    };
    Self::new(
      self.x * coeff,
      self.y * coeff,
      self.z * coeff,
      norm_exp * (alpha * theta).cos(),
    )
    .normalize()
  }

  /// Axis-angle form of this rotation, angle in radians. When the rotation
  /// is near identity the sine term vanishes and the raw imaginary part is
  /// returned as the axis, which may be near zero length.
  pub fn axis_angle(&self) -> (Vec3<T>, T) {
    // w > 1 means accumulated error, acos/sqrt would produce NaN
    let q = if self.w > T::one() {
      self.normalize()
    } else {
      *self
    };
    let angle = T::two() * q.w.acos();
    let s = (T::one() - q.w * q.w).sqrt();
    if s < T::by(1e-6) {
      (Vec3::new(q.x, q.y, q.z), angle)
    } else {
      (Vec3::new(q.x / s, q.y / s, q.z / s), angle)
    }
  }

  /// Decompose into rotation around the given normalized axis (twist) and
  /// rotation of the axis itself (swing), such that `self = swing * twist`.
  pub fn swing_twist(&self, axis: Vec3<T>) -> (Self, Self) {
    let d = Vec3::new(self.x, self.y, self.z).dot(axis);
    let mut twist = Self::new(axis.x * d, axis.y * d, axis.z * d, self.w).normalize();
    if d < T::zero() {
      twist = Self::new(-twist.x, -twist.y, -twist.z, -twist.w);
    }
    let swing = *self * twist.conjugate();
    (swing, twist)
  }

  /// Angle in radians of the rotation around the given normalized axis.
  pub fn angle_around(&self, axis: Vec3<T>) -> T {
    let d = Vec3::new(self.x, self.y, self.z).dot(axis);
    let l2 = Quat::new(axis.x * d, axis.y * d, axis.z * d, self.w).length2();
    if l2.about_zero() {
      T::zero()
    } else {
      let w = if d < T::zero() { -self.w } else { self.w };
      T::two() * (w / l2.sqrt()).min(T::one()).max(-T::one()).acos()
    }
  }

  /// Rotate this quaternion around the given normalized axis so the total
  /// rotation around that axis becomes the current angle plus `radians`.
  #[must_use]
  pub fn rotate_around(&self, axis: Vec3<T>, radians: T) -> Self {
    if radians == T::zero() {
      return *self;
    }
    let total = self.angle_around(axis) + radians;
    let ang = if total < T::zero() {
      T::two_pi() - (-total) % T::two_pi()
    } else {
      total % T::two_pi()
    };
    let sin = (ang * T::half()).sin();
    let cos = (ang * T::half()).cos();
    Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
  }
}

/// Hamilton product. Quaternion multiplication is non-commutative: `a * b`
/// applies `b`'s rotation first, then `a`'s.
impl<T: Scalar> Mul for Quat<T> {
  type Output = Self;
  fn mul(self, other: Self) -> Self {
    Self::new(
      self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
      self.w * other.y + self.y * other.w + self.z * other.x - self.x * other.z,
      self.w * other.z + self.z * other.w + self.x * other.y - self.y * other.x,
      self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
    )
  }
}

impl<T: Scalar> Slerp<T> for Quat<T> {
  /// Shortest-path spherical interpolation. Flips the second endpoint's
  /// weight sign when the dot is negative to take the short arc, and falls
  /// back to plain scaling when the endpoints are close.
  fn slerp(self, end: Self, alpha: T) -> Self {
    let d = self.dot(end);
    let abs_dot = d.abs();

    let mut scale0 = T::one() - alpha;
    let mut scale1 = alpha;

    if T::one() - abs_dot > T::by(0.1) {
      let angle = abs_dot.acos();
      let inv_sin_theta = T::one() / angle.sin();
      scale0 = ((T::one() - alpha) * angle).sin() * inv_sin_theta;
      scale1 = (alpha * angle).sin() * inv_sin_theta;
    }
    if d < T::zero() {
      scale1 = -scale1;
    }
    Self::new(
      scale0 * self.x + scale1 * end.x,
      scale0 * self.y + scale1 * end.y,
      scale0 * self.z + scale1 * end.z,
      scale0 * self.w + scale1 * end.w,
    )
  }
}

impl<T> fmt::Display for Quat<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "({:?}, {:?}, {:?}, {:?})",
      self.x, self.y, self.z, self.w
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn approx(a: Quat<f32>, b: Quat<f32>, tol: f32) -> bool {
    (a.x - b.x).abs() < tol
      && (a.y - b.y).abs() < tol
      && (a.z - b.z).abs() < tol
      && (a.w - b.w).abs() < tol
  }

  #[test]
  fn mul_against_cgmath() {
    let a = Quat::rotation(vec3(1.0f32, 2., 3.), 0.7);
    let b = Quat::rotation(vec3(-2.0f32, 1., 0.5), 1.3);
    let c = a * b;

    let ca = cgmath::Quaternion::new(a.w, a.x, a.y, a.z);
    let cb = cgmath::Quaternion::new(b.w, b.x, b.y, b.z);
    let cc = ca * cb;
    assert!(approx(c, Quat::new(cc.v.x, cc.v.y, cc.v.z, cc.s), 1e-5));
  }

  #[test]
  fn conjugate_inverts_unit_rotation() {
    let q = Quat::rotation(vec3(0.3f32, -1.0, 0.2), 1.1);
    assert!(approx(q * q.conjugate(), Quat::identity(), 1e-5));
  }

  #[test]
  fn axis_angle_round_trip() {
    let axis = vec3(0.0f32, 1.0, 0.0);
    let q = Quat::rotation(axis, 0.8);
    let (a, ang) = q.axis_angle();
    assert!((ang - 0.8).abs() < 1e-4);
    assert!((a.x - axis.x).abs() < 1e-4 && (a.y - axis.y).abs() < 1e-4);

    // near-identity hits the degenerate branch without NaN
    let (_, ang) = Quat::<f32>::identity().axis_angle();
    assert!(ang.abs() < 1e-6);
  }

  #[test]
  fn euler_round_trip() {
    let q = Quat::from_euler_angles(0.5f32, 0.3, -0.4);
    assert!((q.yaw() - 0.5).abs() < 1e-4);
    assert!((q.pitch() - 0.3).abs() < 1e-4);
    assert!((q.roll() + 0.4).abs() < 1e-4);
  }

  #[test]
  fn slerp_endpoints_and_short_arc() {
    let a = Quat::rotation(vec3(0.0f32, 1., 0.), 0.2);
    let b = Quat::rotation(vec3(0.0f32, 1., 0.), 1.8);
    assert!(approx(a.slerp(b, 0.0), a, 1e-5));
    assert!(approx(a.slerp(b, 1.0), b, 1e-5));
    let mid = a.slerp(b, 0.5);
    assert!((mid.angle_around(vec3(0., 1., 0.)) - 1.0).abs() < 1e-3);

    // negated endpoint represents the same rotation, slerp takes short arc
    let nb = Quat::new(-b.x, -b.y, -b.z, -b.w);
    let mid2 = a.slerp(nb, 0.5);
    assert!((mid2.angle_around(vec3(0., 1., 0.)) - 1.0).abs() < 1e-3);
  }

  #[test]
  fn swing_twist_recomposes() {
    let q = Quat::rotation(vec3(0.4f32, 0.8, -0.2), 1.2);
    let (swing, twist) = q.swing_twist(vec3(0., 1., 0.));
    assert!(approx(swing * twist, q, 1e-5));
    // twist is purely around the axis
    assert!(twist.x.abs() < 1e-5 && twist.z.abs() < 1e-5);
  }

  #[test]
  fn basis_extraction_round_trip() {
    let q = Quat::rotation(vec3(1.0f32, 0.3, -0.5), 2.1);
    let m: Mat3<f32> = q.into();
    let q2 = Quat::from_orthonormal_axes(
      vec3(m.a1, m.a2, m.a3),
      vec3(m.b1, m.b2, m.b3),
      vec3(m.c1, m.c2, m.c3),
    );
    // q and -q encode the same rotation
    let same = approx(q2, q, 1e-4) || approx(Quat::new(-q2.x, -q2.y, -q2.z, -q2.w), q, 1e-4);
    assert!(same);
  }

  #[test]
  fn rotate_vec3_matches_matrix() {
    let q = Quat::rotation(vec3(0.2f32, 1.0, 0.4), 0.9);
    let v = vec3(1.0f32, -2.0, 0.5);
    let by_quat = q.rotate_vec3(v);
    let by_mat = Mat3::from(q) * v;
    assert!((by_quat - by_mat).length() < 1e-5);
  }

  #[test]
  fn pow_blends_rotation() {
    let q = Quat::rotation(vec3(0.0f32, 0., 1.), 1.0);
    let h = q.pow(0.5);
    assert!((h.angle_around(vec3(0., 0., 1.)) - 0.5).abs() < 1e-3);
  }
}
