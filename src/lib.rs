//! A CPU-only software 3D rasterizer.
//!
//! This crate renders expanded triangle meshes into a 32-bit framebuffer
//! with depth testing, near-plane clipping in view space, perspective-
//! correct attribute interpolation, flat/Gouraud/Phong shading, and a
//! single grayscale texture with clamp and repeat wrap modes. SDL2 is used
//! only by the binary to present the framebuffer and gather input.
//!
//! # Quick Start
//!
//! ```ignore
//! use solrast::prelude::*;
//!
//! let mut rasterizer = Rasterizer::new(960, 540, 0.1);
//! rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);
//! rasterizer.draw_triangle_mesh(&Mesh::cube_centered(2.0), &Uniforms::default());
//! ```

pub mod camera;
pub mod colors;
pub mod math;
pub mod mesh;
pub mod raster;
pub mod scene;
pub mod texture;
pub mod uniforms;
pub mod window;

// Bundled static mesh data, used by the mesh builders only.
pub(crate) mod bunny;

// Re-export the types most callers need at the crate root.
pub use mesh::{Mesh, Vertex};
pub use raster::Rasterizer;
pub use scene::Scene;
pub use uniforms::{ShadingMode, TexCoordWrap, Uniforms};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::OrbitCamera;
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::raster::{Rasterizer, CLEAR_COLOR, CLEAR_DEPTH};
    pub use crate::scene::Scene;
    pub use crate::texture::Texture;
    pub use crate::uniforms::{ShadingMode, TexCoordWrap, Uniforms};
    pub use crate::window::{FpsCounter, Key, Window, WindowEvent};
}
