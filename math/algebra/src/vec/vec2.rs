use crate::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::{fmt, ops::*};

#[repr(C)]
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vec2<T> {
  pub x: T,
  pub y: T,
}

pub fn vec2<T>(x: T, y: T) -> Vec2<T> {
  Vec2::new(x, y)
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec2<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec2<T> {}

impl<T> Vec2<T> {
  pub const fn new(x: T, y: T) -> Self {
    Self { x, y }
  }
}

impl<T: Scalar> VectorDimension<2> for Vec2<T> {}
impl<T: Scalar> VectorImpl for Vec2<T> {}
impl<T: Scalar> RealVector<T> for Vec2<T> {}
impl<T> VectorSpace<T> for Vec2<T> where
  T: Add<T, Output = T> + Sub<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Copy
{
}
impl<T: Scalar> InnerProductSpace<T> for Vec2<T> {
  #[inline]
  fn dot_impl(&self, b: Self) -> T {
    self.x * b.x + self.y * b.y
  }
}
impl<T: One + Zero + Copy> Vector<T> for Vec2<T> {
  #[inline]
  fn create<F>(f: F) -> Self
  where
    F: Fn() -> T,
  {
    Self { x: f(), y: f() }
  }

  #[inline]
  fn map<F>(self, f: F) -> Self
  where
    F: Fn(T) -> T,
  {
    Self {
      x: f(self.x),
      y: f(self.y),
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
    }
  }
}

impl<T: Scalar> Vec2<T> {
  /// Rotate around the anchor point by the given angle in radians.
  #[inline]
  #[must_use]
  pub fn rotate(&self, anchor: Self, radians: T) -> Self {
    let v = *self - anchor;
    let x = v.x;
    let y = v.y;
    let c = radians.cos();
    let s = radians.sin();
    Self {
      x: x * c - y * s,
      y: x * s + y * c,
    } + anchor
  }

  /// Counterclockwise angle to the positive x axis, in radians.
  #[inline]
  pub fn angle(&self) -> T {
    self.y.atan2(self.x)
  }
}

impl<T: Neg<Output = T>> Neg for Vec2<T> {
  type Output = Self;
  #[inline]
  fn neg(self) -> Self {
    Self::new(-self.x, -self.y)
  }
}

impl<T: Add<T, Output = T>> Add for Vec2<T> {
  type Output = Self;
  #[inline]
  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y)
  }
}

impl<T: Sub<T, Output = T>> Sub for Vec2<T> {
  type Output = Self;
  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y)
  }
}

impl<T: Mul<T, Output = T> + Copy> Mul<T> for Vec2<T> {
  type Output = Self;
  #[inline]
  fn mul(self, s: T) -> Self {
    Self::new(self.x * s, self.y * s)
  }
}

impl<T: Mul<T, Output = T>> Mul for Vec2<T> {
  type Output = Self;
  #[inline]
  fn mul(self, rhs: Self) -> Self {
    Self::new(self.x * rhs.x, self.y * rhs.y)
  }
}

impl<T: Div<T, Output = T> + Copy> Div<T> for Vec2<T> {
  type Output = Self;
  #[inline]
  fn div(self, s: T) -> Self {
    Self::new(self.x / s, self.y / s)
  }
}

impl<T: AddAssign<T>> AddAssign for Vec2<T> {
  #[inline]
  fn add_assign(&mut self, rhs: Self) {
    self.x += rhs.x;
    self.y += rhs.y;
  }
}

impl<T: SubAssign<T>> SubAssign for Vec2<T> {
  #[inline]
  fn sub_assign(&mut self, rhs: Self) {
    self.x -= rhs.x;
    self.y -= rhs.y;
  }
}

impl<T: MulAssign<T> + Copy> MulAssign<T> for Vec2<T> {
  #[inline]
  fn mul_assign(&mut self, s: T) {
    self.x *= s;
    self.y *= s;
  }
}

impl<T> Index<usize> for Vec2<T> {
  type Output = T;
  fn index(&self, i: usize) -> &T {
    match i {
      0 => &self.x,
      1 => &self.y,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T> IndexMut<usize> for Vec2<T> {
  fn index_mut(&mut self, i: usize) -> &mut T {
    match i {
      0 => &mut self.x,
      1 => &mut self.y,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T: Copy> From<[T; 2]> for Vec2<T> {
  fn from(v: [T; 2]) -> Self {
    Self::new(v[0], v[1])
  }
}

impl<T> From<Vec2<T>> for [T; 2] {
  fn from(v: Vec2<T>) -> Self {
    [v.x, v.y]
  }
}

impl<T> From<(T, T)> for Vec2<T> {
  fn from(v: (T, T)) -> Self {
    Self::new(v.0, v.1)
  }
}

impl<T> fmt::Display for Vec2<T>
where
  T: Debug,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "({:?}, {:?})", self.x, self.y)
  }
}

#[test]
fn rotate_around_anchor() {
  let p = vec2(2.0f32, 1.0);
  let r = p.rotate(vec2(1.0, 1.0), std::f32::consts::FRAC_PI_2);
  assert!((r - vec2(1.0, 2.0)).length() < 1e-6);

  // rotation around the origin is the plain 2D rotation
  let r = vec2(1.0f32, 0.0).rotate(Vec2::zero(), std::f32::consts::PI);
  assert!((r - vec2(-1.0, 0.0)).length() < 1e-6);
}

#[test]
fn index_mut_updates_component() {
  let mut v = vec2(1.0f32, 2.0);
  v[1] = 5.0;
  assert_eq!(v, vec2(1.0, 5.0));
}
