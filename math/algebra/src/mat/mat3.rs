use std::ops::{Add, Mul};

use crate::*;
use serde::{Deserialize, Serialize};

/// Column-major 3x3 matrix. Used both for 2D homogeneous transforms and as a
/// 3D rotation basis. Fields a*/b*/c* are the first/second/third column.
#[repr(C)]
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Mat3<T> {
  pub a1: T, pub a2: T, pub a3: T,
  pub b1: T, pub b2: T, pub b3: T,
  pub c1: T, pub c2: T, pub c3: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Mat3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Mat3<T> {}

impl<T: Scalar> SquareMatrixDimension<2> for Mat3<T> {}
impl<T: Scalar> SquareMatrix<T> for Mat3<T> {
  fn identity() -> Self {
    Self::one()
  }

  #[rustfmt::skip]
  fn transpose(&self) -> Self {
    Mat3::new(
      self.a1, self.b1, self.c1,
      self.a2, self.b2, self.c2,
      self.a3, self.b3, self.c3,
    )
  }

  fn det(&self) -> T {
    let t11 = self.c3 * self.b2 - self.b3 * self.c2;
    let t12 = self.b3 * self.c1 - self.c3 * self.b1;
    let t13 = self.c2 * self.b1 - self.b2 * self.c1;
    self.a1 * t11 + self.a2 * t12 + self.a3 * t13
  }

  fn inverse(&self) -> Option<Self> {
    let det = self.det();
    if det == T::zero() {
      return None;
    }

    let inv_det = T::one() / det;

    Self {
      a1: (self.c3 * self.b2 - self.b3 * self.c2) * inv_det,
      a2: (self.a3 * self.c2 - self.c3 * self.a2) * inv_det,
      a3: (self.b3 * self.a2 - self.a3 * self.b2) * inv_det,
      b1: (self.b3 * self.c1 - self.c3 * self.b1) * inv_det,
      b2: (self.c3 * self.a1 - self.a3 * self.c1) * inv_det,
      b3: (self.a3 * self.b1 - self.b3 * self.a1) * inv_det,
      c1: (self.c2 * self.b1 - self.b2 * self.c1) * inv_det,
      c2: (self.a2 * self.c1 - self.c2 * self.a1) * inv_det,
      c3: (self.b2 * self.a1 - self.a2 * self.b1) * inv_det,
    }
    .into()
  }
}

/// Transform a 2D point through the homogeneous 2D transform, dividing by
/// the resulting third component.
impl<T: Scalar> Mul<Vec2<T>> for Mat3<T> {
  type Output = Vec2<T>;

  fn mul(self, v: Vec2<T>) -> Vec2<T> {
    let v = Vec3::new(v.x, v.y, T::one());
    let v = self * v;
    Vec2::new(v.x, v.y) / v.z
  }
}

impl<T> Mul<Vec3<T>> for Mat3<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec3<T>;

  fn mul(self, v: Vec3<T>) -> Vec3<T> {
    Vec3 {
      x: v.x * self.a1 + v.y * self.b1 + v.z * self.c1,
      y: v.x * self.a2 + v.y * self.b2 + v.z * self.c2,
      z: v.x * self.a3 + v.y * self.b3 + v.z * self.c3,
    }
  }
}

impl<T: Add<T, Output = T>> Add for Mat3<T> {
  type Output = Self;

  fn add(self, m: Self) -> Self {
    Self {
      a1: self.a1 + m.a1,
      a2: self.a2 + m.a2,
      a3: self.a3 + m.a3,
      b1: self.b1 + m.b1,
      b2: self.b2 + m.b2,
      b3: self.b3 + m.b3,
      c1: self.c1 + m.c1,
      c2: self.c2 + m.c2,
      c3: self.c3 + m.c3,
    }
  }
}

impl<T> Mul for Mat3<T>
where
  T: Copy + Mul<Output = T> + Add<Output = T>,
{
  type Output = Self;

  fn mul(self, m: Self) -> Self {
    let a = self;

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
    }
  }
}

impl<T> Mat3<T>
where
  T: Copy,
{
  /// Column-major argument order: the first three arguments fill the first
  /// column. Note [`Mat4::new`] takes its arguments row-major instead.
  #[rustfmt::skip]
  pub fn new(a1: T, a2: T, a3: T, b1: T, b2: T, b3: T, c1: T, c2: T, c3: T) -> Self {
    Self {
      a1, a2, a3,
      b1, b2, b3,
      c1, c2, c3,
    }
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
}

impl<T> Mat3<T>
where
  T: Scalar,
{
  #[rustfmt::skip]
  pub fn rotate_x(theta: T) -> Self {
    let (s, c) = theta.sin_cos();

    Mat3::new(
      T::one(),  T::zero(), T::zero(),
      T::zero(), c,         s,
      T::zero(), -s,        c,
    )
  }

  #[rustfmt::skip]
  pub fn rotate_y(theta: T) -> Self {
    let (s, c) = theta.sin_cos();

    Mat3::new(
      c,         T::zero(), -s,
      T::zero(), T::one(),  T::zero(),
      s,         T::zero(), c,
    )
  }

  #[rustfmt::skip]
  pub fn rotate_z(theta: T) -> Self {
    let (s, c) = theta.sin_cos();

    Mat3::new(
      c,         s,         T::zero(),
      -s,        c,         T::zero(),
      T::zero(), T::zero(), T::one(),
    )
  }

  /// Rotation around an arbitrary normalized axis.
  #[rustfmt::skip]
  pub fn rotate(axis: Vec3<T>, theta: T) -> Self {
    let (s, c) = theta.sin_cos();

    let x = axis.x;
    let y = axis.y;
    let z = axis.z;

    let t = T::one() - c;
    let tx = t * x;
    let ty = t * y;
    let tz = t * z;

    let a1 = tx * x + c;
    let a2 = tx * y + s * z;
    let a3 = tx * z - s * y;

    let b1 = tx * y - s * z;
    let b2 = ty * y + c;
    let b3 = ty * z + s * x;

    let c1 = tx * z + s * y;
    let c2 = ty * z - s * x;
    let c3 = tz * z + c;

    Mat3::new(
      a1, a2, a3,
      b1, b2, b3,
      c1, c2, c3
    )
  }

  /// 2D nonuniform scale.
  #[rustfmt::skip]
  pub fn scale(scale: impl Into<Vec2<T>>) -> Self {
    let Vec2 { x, y } = scale.into();

    Mat3::new(
      x,         T::zero(), T::zero(),
      T::zero(), y,         T::zero(),
      T::zero(), T::zero(), T::one(),
    )
  }

  /// 2D translation, stored in the third column.
  #[rustfmt::skip]
  pub fn translate(translate: impl Into<Vec2<T>>) -> Self {
    let Vec2 { x, y } = translate.into();

    Mat3::new(
      T::one(),  T::zero(), T::zero(),
      T::zero(), T::one(),  T::zero(),
      x,         y,         T::one(),
    )
  }
}

impl<T> num_traits::Zero for Mat3<T>
where
  T: num_traits::Zero + Copy + PartialEq,
{
  #[inline(always)]
  #[rustfmt::skip]
  fn zero() -> Self {
    Self {
      a1: T::zero(), a2: T::zero(), a3: T::zero(),
      b1: T::zero(), b2: T::zero(), b3: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::zero(),
    }
  }
  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> num_traits::One for Mat3<T>
where
  T: num_traits::One + num_traits::Zero + Copy,
{
  #[inline(always)]
  #[rustfmt::skip]
  fn one() -> Self {
    Self {
      a1: T::one(),  a2: T::zero(), a3: T::zero(),
      b1: T::zero(), b2: T::one(),  b3: T::zero(),
      c1: T::zero(), c2: T::zero(), c3: T::one(),
    }
  }
}

impl<T: Scalar> From<Quat<T>> for Mat3<T> {
  #[rustfmt::skip]
  fn from(q: Quat<T>) -> Self {
    let (xs, ys, zs) = (q.x * T::two(), q.y * T::two(), q.z * T::two());

    let (xx, xy, xz) = (q.x * xs, q.x * ys, q.x * zs);
    let (yy, yz, zz) = (q.y * ys, q.y * zs, q.z * zs);
    let (wx, wy, wz) = (q.w * xs, q.w * ys, q.w * zs);

    Self {
      a1: T::one() - (yy + zz), a2: xy + wz,              a3: xz - wy,
      b1: xy - wz,              b2: T::one() - (xx + zz), b3: yz + wx,
      c1: xz + wy,              c2: yz - wx,              c3: T::one() - (xx + yy),
    }
  }
}

impl<T: Copy> From<[T; 9]> for Mat3<T> {
  // column-major cell order
  #[rustfmt::skip]
  fn from(v: [T; 9]) -> Self {
    Self {
      a1: v[0], a2: v[1], a3: v[2],
      b1: v[3], b2: v[4], b3: v[5],
      c1: v[6], c2: v[7], c3: v[8],
    }
  }
}

impl<T> From<Mat3<T>> for [T; 9] {
  fn from(m: Mat3<T>) -> Self {
    [m.a1, m.a2, m.a3, m.b1, m.b2, m.b3, m.c1, m.c2, m.c3]
  }
}

impl<T> AsRef<Mat3<T>> for Mat3<T> {
  fn as_ref(&self) -> &Mat3<T> {
    self
  }
}

impl<T> AsMut<Mat3<T>> for Mat3<T> {
  fn as_mut(&mut self) -> &mut Mat3<T> {
    self
  }
}

#[test]
fn mul() {
  let cgmath_mat1 = cgmath::Matrix3::<f32>::from_translation(cgmath::vec2(1., 2.));
  let cgmath_mat2 = cgmath::Matrix3::<f32>::from_nonuniform_scale(3., -2.);
  let cgmath_point = cgmath::vec3(1., 2., 3.);
  let cgmath_r = cgmath_mat1 * cgmath_mat2 * cgmath_point;
  let cgmath_r: [f32; 3] = *cgmath_r.as_ref();

  let math_mat1 = Mat3::<f32>::translate((1., 2.));
  let math_mat2 = Mat3::<f32>::scale((3., -2.));
  let math_point = Vec3::new(1., 2., 3.);
  let math_r = math_mat1 * math_mat2 * math_point;
  let math_r: [f32; 3] = math_r.into();

  assert_eq!(cgmath_r, math_r)
}

#[test]
fn new_consumes_columns() {
  let m = Mat3::<f32>::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
  assert_eq!(m.right(), Vec3::new(1., 2., 3.));
  assert_eq!(m.up(), Vec3::new(4., 5., 6.));
  assert_eq!(m.forward(), Vec3::new(7., 8., 9.));
}

#[test]
fn zero_is_the_additive_identity() {
  use num_traits::Zero;
  let m = Mat3::<f32>::translate((1., 2.)) * Mat3::rotate_z(0.3);
  let r: [f32; 9] = (m + Mat3::zero()).into();
  let expect: [f32; 9] = m.into();
  assert_eq!(r, expect);
}

#[test]
fn inverse_restores_identity() {
  use num_traits::One;
  let m = Mat3::<f32>::translate((3., -1.)) * Mat3::rotate_z(0.6) * Mat3::scale((2., 0.5));
  let inv = m.inverse().unwrap();
  let id: [f32; 9] = (m * inv).into();
  let expect: [f32; 9] = Mat3::<f32>::one().into();
  for (a, b) in id.iter().zip(expect.iter()) {
    assert!((a - b).abs() < 1e-4);
  }
}

#[test]
fn singular_matrix_has_no_inverse() {
  let m = Mat3::<f32>::scale((0., 1.));
  assert!(m.inverse().is_none());
}
