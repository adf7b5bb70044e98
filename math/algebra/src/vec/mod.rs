pub mod dimension;
pub use dimension::*;
pub mod normalized;
pub use normalized::*;
pub mod vec2;
pub use vec2::*;
pub mod vec3;
pub use vec3::*;
pub mod vec4;
pub use vec4::*;
