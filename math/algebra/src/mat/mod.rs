pub mod dimension;
pub use dimension::*;
pub mod mat3;
pub use mat3::*;
pub mod mat34;
pub use mat34::*;
pub mod mat4;
pub use mat4::*;
