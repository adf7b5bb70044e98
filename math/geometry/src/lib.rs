//! Geometric primitives built on the algebra crate: planes, rays, the view
//! frustum and Catmull-Rom splines.

pub use orrery_algebra::*;

pub mod frustum;
pub use frustum::*;
pub mod plane;
pub use plane::*;
pub mod ray;
pub use ray::*;
pub mod spline;
pub use spline::*;
