//! Spatial transform math kernel: vectors, quaternions, column-major
//! matrices, projection constructors and scalar fast-math utilities.

pub mod angle;
pub use angle::*;
pub mod fastmath;
pub use fastmath::*;
pub mod mat;
pub use mat::*;
pub mod projection;
pub mod quat;
pub use quat::*;
pub mod scalar;
pub use scalar::*;
pub mod vec;
pub use vec::*;
