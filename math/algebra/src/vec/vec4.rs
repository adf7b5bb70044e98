use crate::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::{fmt, ops::*};

#[repr(C)]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec4<T> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

pub fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
  Vec4::new(x, y, z, w)
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec4<T> {}

impl<T> Vec4<T> {
  pub const fn new(x: T, y: T, z: T, w: T) -> Self {
    Self { x, y, z, w }
  }
}

impl<T: Scalar> VectorDimension<4> for Vec4<T> {}
impl<T: Scalar> VectorImpl for Vec4<T> {}
impl<T: Scalar> RealVector<T> for Vec4<T> {}
impl<T> VectorSpace<T> for Vec4<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec4<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y + self.z * b.z + self.w * b.w
  }
}
impl<T: One + Zero + Copy> Vector<T> for Vec4<T> {
  #[inline]
  fn create<F>(f: F) -> Self
  where
    F: Fn() -> T,
  {
    Self {
      x: f(),
      y: f(),
      z: f(),
      w: f(),
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
      w: f(self.w),
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
      w: f(self.w, v2.w),
    }
  }
}

impl<T: Copy> Vec4<T> {
  #[inline]
  pub fn xyz(&self) -> Vec3<T> {
    Vec3::new(self.x, self.y, self.z)
  }
}

impl<T: Scalar> Vec4<T> {
  #[inline]
  pub fn from_point(v: Vec3<T>) -> Self {
    Self::new(v.x, v.y, v.z, T::one())
  }

  #[inline]
  pub fn from_direction(v: Vec3<T>) -> Self {
    Self::new(v.x, v.y, v.z, T::zero())
  }
}

impl<T: Neg<Output = T>> Neg for Vec4<T> {
  type Output = Self;
  #[inline]
  fn neg(self) -> Self {
    Self::new(-self.x, -self.y, -self.z, -self.w)
  }
}

impl<T: Add<T, Output = T>> Add for Vec4<T> {
  type Output = Self;
  #[inline]
  fn add(self, rhs: Self) -> Self {
    Self::new(
      self.x + rhs.x,
      self.y + rhs.y,
      self.z + rhs.z,
      self.w + rhs.w,
    )
  }
}

impl<T: Sub<T, Output = T>> Sub for Vec4<T> {
  type Output = Self;
  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Self::new(
      self.x - rhs.x,
      self.y - rhs.y,
      self.z - rhs.z,
      self.w - rhs.w,
    )
  }
}

impl<T: Mul<T, Output = T> + Copy> Mul<T> for Vec4<T> {
  type Output = Self;
  #[inline]
  fn mul(self, s: T) -> Self {
    Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
  }
}

impl<T: Mul<T, Output = T>> Mul for Vec4<T> {
  type Output = Self;
  #[inline]
  fn mul(self, rhs: Self) -> Self {
    Self::new(
      self.x * rhs.x,
      self.y * rhs.y,
      self.z * rhs.z,
      self.w * rhs.w,
    )
  }
}

impl<T: Div<T, Output = T> + Copy> Div<T> for Vec4<T> {
  type Output = Self;
  #[inline]
  fn div(self, s: T) -> Self {
    Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
  }
}

impl<T: AddAssign<T>> AddAssign for Vec4<T> {
  #[inline]
  fn add_assign(&mut self, rhs: Self) {
    self.x += rhs.x;
    self.y += rhs.y;
    self.z += rhs.z;
    self.w += rhs.w;
  }
}

impl<T: SubAssign<T>> SubAssign for Vec4<T> {
  #[inline]
  fn sub_assign(&mut self, rhs: Self) {
    self.x -= rhs.x;
    self.y -= rhs.y;
    self.z -= rhs.z;
    self.w -= rhs.w;
  }
}

impl<T: MulAssign<T> + Copy> MulAssign<T> for Vec4<T> {
  #[inline]
  fn mul_assign(&mut self, s: T) {
    self.x *= s;
    self.y *= s;
    self.z *= s;
    self.w *= s;
  }
}

impl<T> Index<usize> for Vec4<T> {
  type Output = T;
  fn index(&self, i: usize) -> &T {
    match i {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      3 => &self.w,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T> IndexMut<usize> for Vec4<T> {
  fn index_mut(&mut self, i: usize) -> &mut T {
    match i {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      3 => &mut self.w,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T: Copy> From<[T; 4]> for Vec4<T> {
  fn from(v: [T; 4]) -> Self {
    Self::new(v[0], v[1], v[2], v[3])
  }
}

impl<T> From<Vec4<T>> for [T; 4] {
  fn from(v: Vec4<T>) -> Self {
    [v.x, v.y, v.z, v.w]
  }
}

impl<T> From<(T, T, T, T)> for Vec4<T> {
  fn from(v: (T, T, T, T)) -> Self {
    Self::new(v.0, v.1, v.2, v.3)
  }
}

impl<T> fmt::Display for Vec4<T>
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

#[test]
fn index_mut_updates_component() {
  let mut v = vec4(1.0f32, 2.0, 3.0, 4.0);
  v[3] = 0.0;
  assert_eq!(v, vec4(1.0, 2.0, 3.0, 0.0));
}
