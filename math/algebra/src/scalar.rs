use std::fmt::Debug;
use std::ops::Add;

pub use num_traits::{One, ToPrimitive, Zero};
use num_traits::{real::Real, NumAssign, NumCast};

pub trait Two {
  fn two() -> Self;
}

impl<T: One + Add<T, Output = T>> Two for T {
  #[inline(always)]
  fn two() -> Self {
    T::one() + T::one()
  }
}

/// The scalar number type every algebra type is generic over. In practice this
/// is f32, f64 exists for the rare offline computation.
pub trait Scalar:
  Real + NumAssign + NumCast + Two + Default + Debug + Send + Sync + 'static
{
  fn half() -> Self {
    Self::one() / Self::two()
  }

  fn pi() -> Self;
  fn two_pi() -> Self;
  fn half_pi() -> Self;

  /// multiply by this to convert from degree to rad
  fn pi_by_c180() -> Self;
  /// multiply by this to convert from rad to degree
  fn c180_by_pi() -> Self;

  /// inject an f32 literal into the scalar type, for algorithm constants
  fn by(value: f32) -> Self;

  /// default absolute tolerance for equality of accumulated float results
  fn tolerance() -> Self {
    Self::by(1e-6)
  }

  #[inline]
  fn about_zero(self) -> bool {
    self.abs() <= Self::tolerance()
  }

  #[inline]
  fn about_equal(self, other: Self) -> bool {
    (self - other).abs() <= Self::tolerance()
  }
}

impl Scalar for f32 {
  #[inline(always)]
  fn pi() -> Self {
    std::f32::consts::PI
  }
  #[inline(always)]
  fn two_pi() -> Self {
    std::f32::consts::TAU
  }
  #[inline(always)]
  fn half_pi() -> Self {
    std::f32::consts::FRAC_PI_2
  }
  #[inline(always)]
  fn pi_by_c180() -> Self {
    std::f32::consts::PI / 180.
  }
  #[inline(always)]
  fn c180_by_pi() -> Self {
    180. / std::f32::consts::PI
  }
  #[inline(always)]
  fn by(value: f32) -> Self {
    value
  }
}

impl Scalar for f64 {
  #[inline(always)]
  fn pi() -> Self {
    std::f64::consts::PI
  }
  #[inline(always)]
  fn two_pi() -> Self {
    std::f64::consts::TAU
  }
  #[inline(always)]
  fn half_pi() -> Self {
    std::f64::consts::FRAC_PI_2
  }
  #[inline(always)]
  fn pi_by_c180() -> Self {
    std::f64::consts::PI / 180.
  }
  #[inline(always)]
  fn c180_by_pi() -> Self {
    180. / std::f64::consts::PI
  }
  #[inline(always)]
  fn by(value: f32) -> Self {
    value as f64
  }
}
