use crate::Scalar;
use serde::{Deserialize, Serialize};

/// Value wrapper marking the inner angle as degrees, so it cannot be passed
/// where radians are expected by accident.
///
/// No math is implemented on it. Trigonometric functions are only meaningful
/// in radians, and plain scalar angles throughout the crate are radians.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Deg<T> {
  pub value: T,
}

impl<T: Scalar> Deg<T> {
  pub fn by(value: T) -> Self {
    Deg { value }
  }
  pub fn to_rad(&self) -> T {
    self.value * T::pi_by_c180()
  }
  pub fn from_rad(rad: T) -> Self {
    Self::by(rad * T::c180_by_pi())
  }
}
