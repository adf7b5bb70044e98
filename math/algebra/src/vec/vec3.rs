use crate::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::{fmt, ops::*};

#[repr(C)]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec3<T> {
  pub x: T,
  pub y: T,
  pub z: T,
}

pub fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
  Vec3::new(x, y, z)
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec3<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec3<T> {}

impl<T> Vec3<T> {
  pub const fn new(x: T, y: T, z: T) -> Self {
    Self { x, y, z }
  }
}

impl<T: Scalar> VectorDimension<3> for Vec3<T> {}
impl<T: Scalar> VectorImpl for Vec3<T> {}
impl<T: Scalar> RealVector<T> for Vec3<T> {}
impl<T> VectorSpace<T> for Vec3<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec3<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y + self.z * b.z
  }
}
impl<T: One + Zero + Copy> Vector<T> for Vec3<T> {
  #[inline]
  fn create<F>(f: F) -> Self
  where
    F: Fn() -> T,
  {
    Self {
      x: f(),
      y: f(),
      z: f(),
    }
  }

  #[inline]
  fn map<F>(self, f: F) -> Self
  where
    F: Fn(T) -> T,
  {
    Self {
      x: f(self.x),
      y: f(self.y),
      z: f(self.z),
    }
  }

  #[inline]
  fn zip<F>(self, v2: Self, f: F) -> Self
  where
    F: Fn(T, T) -> T,
  {
    Self {
      x: f(self.x, v2.x),
      y: f(self.y, v2.y),
      z: f(self.z, v2.z),
    }
  }
}

impl<T: Scalar> Vec3<T> {
  #[inline]
  pub fn unit_x() -> Self {
    Self::new(T::one(), T::zero(), T::zero())
  }
  #[inline]
  pub fn unit_y() -> Self {
    Self::new(T::zero(), T::one(), T::zero())
  }
  #[inline]
  pub fn unit_z() -> Self {
    Self::new(T::zero(), T::zero(), T::one())
  }

  /// Right-handed cross product.
  #[inline]
  #[must_use]
  pub fn cross(&self, b: Self) -> Self {
    Self::new(
      self.y * b.z - self.z * b.y,
      self.z * b.x - self.x * b.z,
      self.x * b.y - self.y * b.x,
    )
  }

  /// Transform as a homogeneous point through the full 4x4 matrix, dividing
  /// by the resulting w.
  #[inline]
  #[must_use]
  pub fn apply_mat4(&self, mat: Mat4<T>) -> Self {
    let w = mat.a4 * self.x + mat.b4 * self.y + mat.c4 * self.z + mat.d4;
    Self::new(
      (mat.a1 * self.x + mat.b1 * self.y + mat.c1 * self.z + mat.d1) / w,
      (mat.a2 * self.x + mat.b2 * self.y + mat.c2 * self.z + mat.d2) / w,
      (mat.a3 * self.x + mat.b3 * self.y + mat.c3 * self.z + mat.d3) / w,
    )
  }

  /// Transform as a point, assuming the matrix is affine (bottom row 0 0 0 1).
  #[inline]
  #[must_use]
  pub fn apply_mat4_affine(&self, mat: Mat4<T>) -> Self {
    Self::new(
      mat.a1 * self.x + mat.b1 * self.y + mat.c1 * self.z + mat.d1,
      mat.a2 * self.x + mat.b2 * self.y + mat.c2 * self.z + mat.d2,
      mat.a3 * self.x + mat.b3 * self.y + mat.c3 * self.z + mat.d3,
    )
  }

  /// Transform as a direction, ignoring any translation.
  #[inline]
  #[must_use]
  pub fn apply_mat4_direction(&self, mat: Mat4<T>) -> Self {
    Self::new(
      mat.a1 * self.x + mat.b1 * self.y + mat.c1 * self.z,
      mat.a2 * self.x + mat.b2 * self.y + mat.c2 * self.z,
      mat.a3 * self.x + mat.b3 * self.y + mat.c3 * self.z,
    )
  }

  #[inline]
  #[must_use]
  pub fn apply_mat3(&self, mat: Mat3<T>) -> Self {
    mat * *self
  }

  /// Rotate by a unit quaternion.
  #[inline]
  #[must_use]
  pub fn rotate_by(&self, q: Quat<T>) -> Self {
    q.rotate_vec3(*self)
  }
}

impl<T: Scalar> Slerp<T> for Vec3<T> {
  /// Spherical interpolation between unit direction vectors. Falls back to
  /// normalized lerp when the endpoints are nearly parallel (|dot| > 0.9995),
  /// where the spherical form loses precision.
  fn slerp(self, target: Self, alpha: T) -> Self {
    let dot = self.dot(target);
    if dot.abs() > T::by(0.9995) {
      return self.lerp(target, alpha).normalize();
    }
    let theta = dot.acos() * alpha;
    let relative = (target - self * dot).normalize();
    (self * theta.cos() + relative * theta.sin()).normalize()
  }
}

impl<T: Neg<Output = T>> Neg for Vec3<T> {
  type Output = Self;
  #[inline]
  fn neg(self) -> Self {
    Self::new(-self.x, -self.y, -self.z)
  }
}

impl<T: Add<T, Output = T>> Add for Vec3<T> {
  type Output = Self;
  #[inline]
  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl<T: Sub<T, Output = T>> Sub for Vec3<T> {
  type Output = Self;
  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl<T: Mul<T, Output = T> + Copy> Mul<T> for Vec3<T> {
  type Output = Self;
  #[inline]
  fn mul(self, s: T) -> Self {
    Self::new(self.x * s, self.y * s, self.z * s)
  }
}

impl<T: Mul<T, Output = T>> Mul for Vec3<T> {
  type Output = Self;
  #[inline]
  fn mul(self, rhs: Self) -> Self {
    Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
  }
}

impl<T: Div<T, Output = T> + Copy> Div<T> for Vec3<T> {
  type Output = Self;
  #[inline]
  fn div(self, s: T) -> Self {
    Self::new(self.x / s, self.y / s, self.z / s)
  }
}

impl<T: AddAssign<T>> AddAssign for Vec3<T> {
  #[inline]
  fn add_assign(&mut self, rhs: Self) {
    self.x += rhs.x;
    self.y += rhs.y;
    self.z += rhs.z;
  }
}

impl<T: SubAssign<T>> SubAssign for Vec3<T> {
  #[inline]
  fn sub_assign(&mut self, rhs: Self) {
    self.x -= rhs.x;
    self.y -= rhs.y;
    self.z -= rhs.z;
  }
}

impl<T: MulAssign<T> + Copy> MulAssign<T> for Vec3<T> {
  #[inline]
  fn mul_assign(&mut self, s: T) {
    self.x *= s;
    self.y *= s;
    self.z *= s;
  }
}

impl<T> Index<usize> for Vec3<T> {
  type Output = T;
  fn index(&self, i: usize) -> &T {
    match i {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T> IndexMut<usize> for Vec3<T> {
  fn index_mut(&mut self, i: usize) -> &mut T {
    match i {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T: Copy> From<[T; 3]> for Vec3<T> {
  fn from(v: [T; 3]) -> Self {
    Self::new(v[0], v[1], v[2])
  }
}

impl<T> From<Vec3<T>> for [T; 3] {
  fn from(v: Vec3<T>) -> Self {
    [v.x, v.y, v.z]
  }
}

impl<T> From<(T, T, T)> for Vec3<T> {
  fn from(v: (T, T, T)) -> Self {
    Self::new(v.0, v.1, v.2)
  }
}

impl<T: Copy> From<Vec4<T>> for Vec3<T> {
  fn from(v: Vec4<T>) -> Self {
    Self::new(v.x, v.y, v.z)
  }
}

impl<T> fmt::Display for Vec3<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:?}, {:?}, {:?})", self.x, self.y, self.z)
  }
}

#[test]
fn normalize_keeps_zero_vector() {
  let v: Vec3<f32> = Vec3::zero();
  assert_eq!(v.normalize(), v);
  let v = vec3(3.0f32, 4.0, 0.0);
  assert!((v.normalize().length() - 1.0).abs() < 1e-5);
}

#[test]
fn index_mut_updates_component() {
  let mut v = vec3(1.0f32, 2.0, 3.0);
  v[0] = -1.0;
  v[2] = 7.0;
  assert_eq!(v, vec3(-1.0, 2.0, 7.0));
}

#[test]
fn cross_is_right_handed() {
  let v = Vec3::<f32>::unit_x().cross(Vec3::unit_y());
  assert_eq!(v, Vec3::unit_z());
}

#[test]
fn slerp_endpoints_and_fallback() {
  let a = vec3(1.0f32, 0., 0.);
  let b = vec3(0.0f32, 1., 0.);
  let mid = a.slerp(b, 0.5);
  assert!((mid.length() - 1.0).abs() < 1e-5);
  assert!((mid.x - mid.y).abs() < 1e-5);

  // nearly parallel pair goes through the lerp fallback
  let c = vec3(1.0f32, 1e-4, 0.).normalize();
  let d = a.slerp(c, 0.5);
  assert!((d.length() - 1.0).abs() < 1e-5);
}
