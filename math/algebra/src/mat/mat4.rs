use std::ops::{Add, Mul};

use crate::*;
use serde::{Deserialize, Serialize};

/// Column-major 4x4 matrix. Fields a*/b*/c*/d* are the four columns, so the
/// translation of an affine transform lives in d1/d2/d3.
#[repr(C)]
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Mat4<T> {
  pub a1: T, pub a2: T, pub a3: T, pub a4: T,
  pub b1: T, pub b2: T, pub b3: T, pub b4: T,
  pub c1: T, pub c2: T, pub c3: T, pub c4: T,
  pub d1: T, pub d2: T, pub d3: T, pub d4: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Mat4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Mat4<T> {}

impl<T: Scalar> SquareMatrixDimension<3> for Mat4<T> {}
impl<T: Scalar> SquareMatrix<T> for Mat4<T> {
  fn identity() -> Self {
    Self::one()
  }

  #[rustfmt::skip]
  fn transpose(&self) -> Self {
    Mat4::new(
      self.a1, self.b1, self.c1, self.d1,
      self.a2, self.b2, self.c2, self.d2,
      self.a3, self.b3, self.c3, self.d3,
      self.a4, self.b4, self.c4, self.d4,
    )
  }

  #[rustfmt::skip]
  fn det(&self) -> T {
    let Self { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 } = *self;

      a4 * b3 * c2 * d1 - a3 * b4 * c2 * d1
    - a4 * b2 * c3 * d1 + a2 * b4 * c3 * d1
    + a3 * b2 * c4 * d1 - a2 * b3 * c4 * d1
    - a4 * b3 * c1 * d2 + a3 * b4 * c1 * d2
    + a4 * b1 * c3 * d2 - a1 * b4 * c3 * d2
    - a3 * b1 * c4 * d2 + a1 * b3 * c4 * d2
    + a4 * b2 * c1 * d3 - a2 * b4 * c1 * d3
    - a4 * b1 * c2 * d3 + a1 * b4 * c2 * d3
    + a2 * b1 * c4 * d3 - a1 * b2 * c4 * d3
    - a3 * b2 * c1 * d4 + a2 * b3 * c1 * d4
    + a3 * b1 * c2 * d4 - a1 * b3 * c2 * d4
    - a2 * b1 * c3 * d4 + a1 * b2 * c3 * d4
  }

  #[rustfmt::skip]
  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }

    let Self { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 } = *self;
    let inv_det = T::one() / det;

    Self {
      a1: (c2*d3*b4 - d2*c3*b4 + d2*b3*c4 - b2*d3*c4 - c2*b3*d4 + b2*c3*d4) * inv_det,
      a2: (d2*c3*a4 - c2*d3*a4 - d2*a3*c4 + a2*d3*c4 + c2*a3*d4 - a2*c3*d4) * inv_det,
      a3: (b2*d3*a4 - d2*b3*a4 + d2*a3*b4 - a2*d3*b4 - b2*a3*d4 + a2*b3*d4) * inv_det,
      a4: (c2*b3*a4 - b2*c3*a4 - c2*a3*b4 + a2*c3*b4 + b2*a3*c4 - a2*b3*c4) * inv_det,
      b1: (d1*c3*b4 - c1*d3*b4 - d1*b3*c4 + b1*d3*c4 + c1*b3*d4 - b1*c3*d4) * inv_det,
      b2: (c1*d3*a4 - d1*c3*a4 + d1*a3*c4 - a1*d3*c4 - c1*a3*d4 + a1*c3*d4) * inv_det,
      b3: (d1*b3*a4 - b1*d3*a4 - d1*a3*b4 + a1*d3*b4 + b1*a3*d4 - a1*b3*d4) * inv_det,
      b4: (b1*c3*a4 - c1*b3*a4 + c1*a3*b4 - a1*c3*b4 - b1*a3*c4 + a1*b3*c4) * inv_det,
      c1: (c1*d2*b4 - d1*c2*b4 + d1*b2*c4 - b1*d2*c4 - c1*b2*d4 + b1*c2*d4) * inv_det,
      c2: (d1*c2*a4 - c1*d2*a4 - d1*a2*c4 + a1*d2*c4 + c1*a2*d4 - a1*c2*d4) * inv_det,
      c3: (b1*d2*a4 - d1*b2*a4 + d1*a2*b4 - a1*d2*b4 - b1*a2*d4 + a1*b2*d4) * inv_det,
      c4: (c1*b2*a4 - b1*c2*a4 - c1*a2*b4 + a1*c2*b4 + b1*a2*c4 - a1*b2*c4) * inv_det,
      d1: (d1*c2*b3 - c1*d2*b3 - d1*b2*c3 + b1*d2*c3 + c1*b2*d3 - b1*c2*d3) * inv_det,
      d2: (c1*d2*a3 - d1*c2*a3 + d1*a2*c3 - a1*d2*c3 - c1*a2*d3 + a1*c2*d3) * inv_det,
      d3: (d1*b2*a3 - b1*d2*a3 - d1*a2*b3 + a1*d2*b3 + b1*a2*d3 - a1*b2*d3) * inv_det,
      d4: (b1*c2*a3 - c1*b2*a3 + c1*a2*b3 - a1*c2*b3 - b1*a2*c3 + a1*b2*c3) * inv_det,
    }
    .into()
  }
}

impl<T> Mul<Vec4<T>> for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec4<T>;

  fn mul(self, v: Vec4<T>) -> Vec4<T> {
    Vec4 {
      x: v.x * self.a1 + v.y * self.b1 + v.z * self.c1 + v.w * self.d1,
      y: v.x * self.a2 + v.y * self.b2 + v.z * self.c2 + v.w * self.d2,
      z: v.x * self.a3 + v.y * self.b3 + v.z * self.c3 + v.w * self.d3,
      w: v.x * self.a4 + v.y * self.b4 + v.z * self.c4 + v.w * self.d4,
    }
  }
}

/// Transform a point, dividing by the resulting w.
impl<T: Scalar> Mul<Vec3<T>> for Mat4<T> {
  type Output = Vec3<T>;

  fn mul(self, v: Vec3<T>) -> Vec3<T> {
    v.apply_mat4(self)
  }
}

impl<T: Add<T, Output = T>> Add for Mat4<T> {
  type Output = Self;

  fn add(self, m: Self) -> Self {
    Self {
      a1: self.a1 + m.a1,
      a2: self.a2 + m.a2,
      a3: self.a3 + m.a3,
      a4: self.a4 + m.a4,
      b1: self.b1 + m.b1,
      b2: self.b2 + m.b2,
      b3: self.b3 + m.b3,
      b4: self.b4 + m.b4,
      c1: self.c1 + m.c1,
      c2: self.c2 + m.c2,
      c3: self.c3 + m.c3,
      c4: self.c4 + m.c4,
      d1: self.d1 + m.d1,
      d2: self.d2 + m.d2,
      d3: self.d3 + m.d3,
      d4: self.d4 + m.d4,
    }
  }
}

impl<T> Mul for Mat4<T>
where
  T: Copy + Mul<Output = T> + Add<Output = T>,
{
  type Output = Self;

  fn mul(self, m: Self) -> Self {
    let a = self;

    Self {
      a1: a.a1 * m.a1 + a.b1 * m.a2 + a.c1 * m.a3 + a.d1 * m.a4,
      a2: a.a2 * m.a1 + a.b2 * m.a2 + a.c2 * m.a3 + a.d2 * m.a4,
      a3: a.a3 * m.a1 + a.b3 * m.a2 + a.c3 * m.a3 + a.d3 * m.a4,
      a4: a.a4 * m.a1 + a.b4 * m.a2 + a.c4 * m.a3 + a.d4 * m.a4,

      b1: a.a1 * m.b1 + a.b1 * m.b2 + a.c1 * m.b3 + a.d1 * m.b4,
      b2: a.a2 * m.b1 + a.b2 * m.b2 + a.c2 * m.b3 + a.d2 * m.b4,
      b3: a.a3 * m.b1 + a.b3 * m.b2 + a.c3 * m.b3 + a.d3 * m.b4,
      b4: a.a4 * m.b1 + a.b4 * m.b2 + a.c4 * m.b3 + a.d4 * m.b4,

      c1: a.a1 * m.c1 + a.b1 * m.c2 + a.c1 * m.c3 + a.d1 * m.c4,
      c2: a.a2 * m.c1 + a.b2 * m.c2 + a.c2 * m.c3 + a.d2 * m.c4,
      c3: a.a3 * m.c1 + a.b3 * m.c2 + a.c3 * m.c3 + a.d3 * m.c4,
      c4: a.a4 * m.c1 + a.b4 * m.c2 + a.c4 * m.c3 + a.d4 * m.c4,

      d1: a.a1 * m.d1 + a.b1 * m.d2 + a.c1 * m.d3 + a.d1 * m.d4,
      d2: a.a2 * m.d1 + a.b2 * m.d2 + a.c2 * m.d3 + a.d2 * m.d4,
      d3: a.a3 * m.d1 + a.b3 * m.d2 + a.c3 * m.d3 + a.d3 * m.d4,
      d4: a.a4 * m.d1 + a.b4 * m.d2 + a.c4 * m.d3 + a.d4 * m.d4,
    }
  }
}

#[rustfmt::skip]
impl<T: Sized> Mat4<T> {
  /// Row-major argument order, stored column-major.
  pub const fn new(
    m11: T, m12: T, m13: T, m14: T,
    m21: T, m22: T, m23: T, m24: T,
    m31: T, m32: T, m33: T, m34: T,
    m41: T, m42: T, m43: T, m44: T,
  ) -> Self {
    Self {
      a1: m11, a2: m21, a3: m31, a4: m41,
      b1: m12, b2: m22, b3: m32, b4: m42,
      c1: m13, c2: m23, c3: m33, c4: m43,
      d1: m14, d2: m24, d3: m34, d4: m44,
    }
  }
}

impl<T: Copy> Mat4<T> {
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
}

impl<T> Mat4<T>
where
  T: Scalar,
{
  #[rustfmt::skip]
  pub fn translate(translate: impl Into<Vec3<T>>) -> Self {
    let Vec3 { x, y, z } = translate.into();

    Mat4::new(
      T::one(),  T::zero(), T::zero(), x,
      T::zero(), T::one(),  T::zero(), y,
      T::zero(), T::zero(), T::one(),  z,
      T::zero(), T::zero(), T::zero(), T::one(),
    )
  }

  #[rustfmt::skip]
  pub fn scale(scale: impl Into<Vec3<T>>) -> Self {
    let Vec3 { x, y, z } = scale.into();

    Mat4::new(
      x,         T::zero(), T::zero(), T::zero(),
      T::zero(), y,         T::zero(), T::zero(),
      T::zero(), T::zero(), z,         T::zero(),
      T::zero(), T::zero(), T::zero(), T::one(),
    )
  }

  pub fn rotate_x(theta: T) -> Self {
    Mat3::rotate_x(theta).into()
  }

  pub fn rotate_y(theta: T) -> Self {
    Mat3::rotate_y(theta).into()
  }

  pub fn rotate_z(theta: T) -> Self {
    Mat3::rotate_z(theta).into()
  }

  pub fn rotate(axis: Vec3<T>, theta: T) -> Self {
    Mat3::rotate(axis, theta).into()
  }

  /// Rotation part of a camera view matrix looking along `direction`. The
  /// direction and up vectors need not be unit length but must not be zero
  /// or parallel to each other.
  #[rustfmt::skip]
  pub fn look_at(direction: Vec3<T>, up: Vec3<T>) -> Self {
    let dir = direction.normalize();
    let right = dir.cross(up).normalize();
    let new_up = right.cross(dir).normalize();

    Mat4::new(
      right.x,   right.y,   right.z,   T::zero(),
      new_up.x,  new_up.y,  new_up.z,  T::zero(),
      -dir.x,    -dir.y,    -dir.z,    T::zero(),
      T::zero(), T::zero(), T::zero(), T::one(),
    )
  }

  /// Full camera view matrix for an eye at `position` looking along
  /// `direction`.
  pub fn look_at_from(position: Vec3<T>, direction: Vec3<T>, up: Vec3<T>) -> Self {
    Self::look_at(direction, up) * Self::translate(position.reverse())
  }

  /// World matrix whose basis is built from a forward and up hint, with the
  /// translation set to `position`. This is the inverse construction of
  /// [`Mat4::look_at_from`].
  #[rustfmt::skip]
  pub fn from_orth_basis_and_position(position: Vec3<T>, forward: Vec3<T>, up: Vec3<T>) -> Self {
    let fwd = forward.normalize();
    let right = fwd.cross(up).normalize();
    let new_up = right.cross(fwd).normalize();

    Mat4::new(
      right.x,   new_up.x,  -fwd.x,    position.x,
      right.y,   new_up.y,  -fwd.y,    position.y,
      right.z,   new_up.z,  -fwd.z,    position.z,
      T::zero(), T::zero(), T::zero(), T::one(),
    )
  }

  /// Compose translation, rotation and scale into one affine transform.
  #[rustfmt::skip]
  pub fn from_trs(translation: Vec3<T>, rotation: Quat<T>, scale: Vec3<T>) -> Self {
    let r = Mat3::from(rotation);

    Self {
      a1: r.a1 * scale.x, a2: r.a2 * scale.x, a3: r.a3 * scale.x, a4: T::zero(),
      b1: r.b1 * scale.y, b2: r.b2 * scale.y, b3: r.b3 * scale.y, b4: T::zero(),
      c1: r.c1 * scale.z, c2: r.c2 * scale.z, c3: r.c3 * scale.z, c4: T::zero(),
      d1: translation.x,  d2: translation.y,  d3: translation.z,  d4: T::one(),
    }
  }

  /// Per-column scale magnitudes of the affine part. The square root is
  /// skipped for columns that are already axis aligned.
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

  /// Rotation of the affine part. Pass `normalize_axes` to divide scale out
  /// of the basis columns first.
  pub fn get_rotation(&self, normalize_axes: bool) -> Quat<T> {
    Quat::from_basis(normalize_axes, self.right(), self.up(), self.forward())
  }

  /// Split an affine TRS transform back into its parts.
  pub fn decompose_trs(&self) -> (Vec3<T>, Quat<T>, Vec3<T>) {
    (self.position(), self.get_rotation(true), self.get_scale())
  }

  /// True unless the upper 3x3 is the identity within tolerance.
  pub fn has_rotation_or_scaling(&self) -> bool {
    !(self.a1.about_equal(T::one())
      && self.b2.about_equal(T::one())
      && self.c3.about_equal(T::one())
      && self.b1.about_zero()
      && self.c1.about_zero()
      && self.a2.about_zero()
      && self.c2.about_zero()
      && self.a3.about_zero()
      && self.b3.about_zero())
  }

  /// Transform the point in place, dividing by the resulting w.
  pub fn project(&self, v: &mut Vec3<T>) {
    *v = v.apply_mat4(*self);
  }

  #[rustfmt::skip]
  pub fn to_mat3(self) -> Mat3<T> {
    Mat3 {
      a1: self.a1, a2: self.a2, a3: self.a3,
      b1: self.b1, b2: self.b2, b3: self.b3,
      c1: self.c1, c2: self.c2, c3: self.c3,
    }
  }

  pub fn to_normal_matrix(self) -> Mat3<T> {
    self.to_mat3().inverse_or_identity().transpose()
  }
}

impl<T: Scalar> Mat4<T> {
  /// Elementwise interpolation over all sixteen cells.
  #[must_use]
  pub fn lerp(self, other: Self, t: T) -> Self {
    let a: [T; 16] = self.into();
    let b: [T; 16] = other.into();
    let mut r = a;
    for i in 0..16 {
      r[i] = a[i] + (b[i] - a[i]) * t;
    }
    r.into()
  }
}

impl<T> num_traits::Zero for Mat4<T>
where
  T: num_traits::Zero + Copy + PartialEq,
{
  #[inline(always)]
  #[rustfmt::skip]
  fn zero() -> Self {
    Self {
      a1: T::zero(), a2: T::zero(), a3: T::zero(), a4: T::zero(),
      b1: T::zero(), b2: T::zero(), b3: T::zero(), b4: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::zero(), c4: T::zero(),
      d1: T::zero(), d2: T::zero(), d3: T::zero(), d4: T::zero(),
    }
  }
  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> num_traits::One for Mat4<T>
where
  T: num_traits::One + num_traits::Zero + Copy,
{
  #[inline(always)]
  #[rustfmt::skip]
  fn one() -> Self {
    Self {
      a1: T::one(),  a2: T::zero(), a3: T::zero(), a4: T::zero(),
      b1: T::zero(), b2: T::one(),  b3: T::zero(), b4: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::one(),  c4: T::zero(),
      d1: T::zero(), d2: T::zero(), d3: T::zero(), d4: T::one(),
    }
  }
}

impl<T: Scalar> From<Quat<T>> for Mat4<T> {
  fn from(q: Quat<T>) -> Self {
    Mat3::from(q).into()
  }
}

impl<T: Scalar> From<Mat3<T>> for Mat4<T> {
  #[rustfmt::skip]
  fn from(m: Mat3<T>) -> Self {
    Self {
      a1: m.a1,      a2: m.a2,      a3: m.a3,      a4: T::zero(),
      b1: m.b1,      b2: m.b2,      b3: m.b3,      b4: T::zero(),
      c1: m.c1,      c2: m.c2,      c3: m.c3,      c4: T::zero(),
      d1: T::zero(), d2: T::zero(), d3: T::zero(), d4: T::one(),
    }
  }
}

impl<T: Copy> From<[T; 16]> for Mat4<T> {
  // column-major cell order
  #[rustfmt::skip]
  fn from(v: [T; 16]) -> Self {
    Self {
      a1: v[0],  a2: v[1],  a3: v[2],  a4: v[3],
      b1: v[4],  b2: v[5],  b3: v[6],  b4: v[7],
      c1: v[8],  c2: v[9],  c3: v[10], c4: v[11],
      d1: v[12], d2: v[13], d3: v[14], d4: v[15],
    }
  }
}

impl<T> From<Mat4<T>> for [T; 16] {
  fn from(m: Mat4<T>) -> Self {
    [
      m.a1, m.a2, m.a3, m.a4, m.b1, m.b2, m.b3, m.b4, m.c1, m.c2, m.c3, m.c4, m.d1, m.d2, m.d3,
      m.d4,
    ]
  }
}

impl<T> AsRef<Mat4<T>> for Mat4<T> {
  fn as_ref(&self) -> &Mat4<T> {
    self
  }
}

impl<T> AsMut<Mat4<T>> for Mat4<T> {
  fn as_mut(&mut self) -> &mut Mat4<T> {
    self
  }
}

#[test]
fn mul() {
  let cgmath_mat1 = cgmath::Matrix4::<f32>::from_translation(cgmath::vec3(1., 2., 3.));
  let cgmath_mat2 = cgmath::Matrix4::<f32>::from_nonuniform_scale(3., -2., 0.5);
  let cgmath_r = cgmath_mat1 * cgmath_mat2;
  let cgmath_r: &[f32; 16] = cgmath_r.as_ref();
  let cgmath_r: [f32; 16] = *cgmath_r;

  let math_mat1 = Mat4::<f32>::translate((1., 2., 3.));
  let math_mat2 = Mat4::<f32>::scale((3., -2., 0.5));
  let math_r: [f32; 16] = (math_mat1 * math_mat2).into();

  assert_eq!(cgmath_r, math_r)
}

#[test]
fn inverse_restores_identity() {
  use num_traits::One;
  let m = Mat4::<f32>::translate((3., -1., 2.))
    * Mat4::rotate(Vec3::new(1., 2., -1.).normalize(), 0.7)
    * Mat4::scale((2., 0.5, 3.));
  let inv = m.inverse().unwrap();
  let id: [f32; 16] = (m * inv).into();
  let expect: [f32; 16] = Mat4::<f32>::one().into();
  for (a, b) in id.iter().zip(expect.iter()) {
    assert!((a - b).abs() < 1e-4);
  }
}

#[test]
fn singular_matrix_has_no_inverse() {
  let m = Mat4::<f32>::scale((0., 1., 1.));
  assert!(m.inverse().is_none());
}

#[test]
fn trs_round_trip() {
  let t = Vec3::new(1., -2., 3.);
  let q = Quat::<f32>::rotation(Vec3::new(0., 1., 0.), 0.8);
  let s = Vec3::new(2., 3., 0.5);

  let m = Mat4::from_trs(t, q, s);
  let (t2, q2, s2) = m.decompose_trs();

  assert!((t - t2).length() < 1e-5);
  assert!((s - s2).length() < 1e-5);
  let dot = q.x * q2.x + q.y * q2.y + q.z * q2.z + q.w * q2.w;
  assert!((dot.abs() - 1.).abs() < 1e-5);
}

#[test]
fn look_at_faces_target() {
  let view = Mat4::<f32>::look_at_from(
    Vec3::new(0., 0., 5.),
    Vec3::new(0., 0., -1.),
    Vec3::new(0., 1., 0.),
  );
  let p = Vec3::new(0., 0., 0.).apply_mat4(view);
  assert!((p - Vec3::new(0., 0., -5.)).length() < 1e-5);
}

#[test]
fn translation_only_has_no_rotation_or_scaling() {
  assert!(!Mat4::<f32>::translate((4., 5., 6.)).has_rotation_or_scaling());
  assert!(Mat4::<f32>::rotate_y(0.2).has_rotation_or_scaling());
  assert!(Mat4::<f32>::scale((2., 1., 1.)).has_rotation_or_scaling());
}
