//! Linear algebra primitives used throughout the pipeline.
//!
//! # Conventions
//!
//! Right-handed coordinate system with a column-vector convention:
//! vertices multiply on the right (`Mat4 * Vec4`), transforms chain
//! right-to-left, and the view space looks down -Z.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
