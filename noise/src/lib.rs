//! Procedural noise sampling, independent of the rest of the math stack
//! apart from the vector types.

pub mod perlin;
pub use perlin::*;
