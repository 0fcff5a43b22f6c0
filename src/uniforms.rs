//! Per-draw shader state.
//!
//! The scene fills a [`Uniforms`] record before every draw call and the
//! rasterizer reads it during vertex and fragment shading. The pipeline is
//! strictly single-threaded, so the bag is rebuilt per draw instead of being
//! shared state.

use std::fmt;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// The lighting model evaluated by the shading stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    /// One color per triangle, taken from its first vertex.
    Flat,
    /// Per-vertex lighting, interpolated across the triangle.
    Gouraud,
    /// Per-fragment lighting from interpolated world position and normal.
    Phong,
}

impl ShadingMode {
    /// Advances Flat -> Gouraud -> Phong -> Flat.
    pub fn cycle(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Gouraud,
            ShadingMode::Gouraud => ShadingMode::Phong,
            ShadingMode::Phong => ShadingMode::Flat,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

/// How texture coordinates outside `[0, 1]` are brought back into range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TexCoordWrap {
    Clamp,
    Repeat,
}

impl TexCoordWrap {
    pub fn toggle(self) -> Self {
        match self {
            TexCoordWrap::Clamp => TexCoordWrap::Repeat,
            TexCoordWrap::Repeat => TexCoordWrap::Clamp,
        }
    }
}

impl fmt::Display for TexCoordWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TexCoordWrap::Clamp => write!(f, "Clamp"),
            TexCoordWrap::Repeat => write!(f, "Repeat"),
        }
    }
}

/// Everything a single draw call needs from the scene.
#[derive(Clone, Copy, Debug)]
pub struct Uniforms {
    pub model_matrix: Mat4,
    pub view_matrix: Mat4,
    pub mvp_matrix: Mat4,
    pub world_camera_position: Vec3,
    pub world_light_direction: Vec3,
    pub world_light_position: Vec3,
    pub directional_light_on: bool,
    /// The mesh being drawn is the emissive sun.
    pub sun_mesh: bool,
    pub shading: ShadingMode,
    pub texturing_on: bool,
    pub shininess: i32,
    pub tex_coord_wrap: TexCoordWrap,
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            model_matrix: Mat4::identity(),
            view_matrix: Mat4::identity(),
            mvp_matrix: Mat4::identity(),
            world_camera_position: Vec3::ZERO,
            world_light_direction: Vec3::new(0.0, 0.0, -1.0),
            world_light_position: Vec3::ZERO,
            directional_light_on: true,
            sun_mesh: false,
            shading: ShadingMode::Flat,
            texturing_on: true,
            shininess: 16,
            tex_coord_wrap: TexCoordWrap::Repeat,
        }
    }
}
