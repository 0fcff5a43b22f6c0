//! Vertex and fragment shading.
//!
//! Flat and Gouraud evaluate the Phong reflection model once per vertex and
//! carry the result through `shaded_color`; the Phong mode instead forwards
//! world-space position and normal so the same reflection model runs per
//! fragment. Texture sampling (Phong only) replaces the albedo on texturable
//! meshes.

use crate::colors::pack_rgba;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Vertex;
use crate::texture::Texture;
use crate::uniforms::{ShadingMode, TexCoordWrap, Uniforms};

/// Runs the vertex stage in place, leaving `position` in clip space.
pub(crate) fn vertex_shader(vertex: &mut Vertex, uniforms: &Uniforms) {
    // Normals go through the plain model matrix; there is no non-uniform
    // scaling anywhere in the scene, so the inverse transpose is not needed.
    match uniforms.shading {
        ShadingMode::Flat | ShadingMode::Gouraud => {
            let world_position = (uniforms.model_matrix * vertex.position).to_vec3();
            let world_normal =
                (uniforms.model_matrix * Vec4::from_vec3(vertex.normal, 0.0)).to_vec3();
            vertex.shaded_color =
                phong_reflect(vertex.shaded_color, world_position, world_normal, uniforms);
        }
        ShadingMode::Phong => {
            vertex.world_position = (uniforms.model_matrix * vertex.position).to_vec3();
            vertex.world_normal =
                (uniforms.model_matrix * Vec4::from_vec3(vertex.normal, 0.0)).to_vec3();
        }
    }

    vertex.position = uniforms.mvp_matrix * vertex.position;
}

/// Interpolated values handed to the fragment stage for one pixel.
pub(crate) struct FragmentInput {
    /// Color of the triangle's first vertex, used by flat shading.
    pub flat_color: Vec3,
    pub shaded_color: Vec3,
    pub world_position: Vec3,
    pub world_normal: Vec3,
    pub texture_coords: Vec2,
}

/// Produces the packed pixel color for one covered sample.
pub(crate) fn fragment_shader(
    input: &FragmentInput,
    is_texturable: bool,
    texture: &Texture,
    uniforms: &Uniforms,
) -> u32 {
    match uniforms.shading {
        ShadingMode::Flat => pack_rgba(input.flat_color),
        ShadingMode::Gouraud => pack_rgba(input.shaded_color),
        ShadingMode::Phong => {
            let albedo = if uniforms.texturing_on && is_texturable {
                sample_texture(texture, input.texture_coords, uniforms.tex_coord_wrap)
            } else {
                input.shaded_color
            };
            pack_rgba(phong_reflect(
                albedo,
                input.world_position,
                input.world_normal,
                uniforms,
            ))
        }
    }
}

/// The Phong reflection model in world space, shared by the per-vertex and
/// per-fragment paths.
///
/// The directional light carries a white specular term. The solar point
/// light has none, and the sun itself is lit head-on from the camera with a
/// raised ambient floor.
pub(crate) fn phong_reflect(
    albedo: Vec3,
    world_position: Vec3,
    world_normal: Vec3,
    uniforms: &Uniforms,
) -> Vec3 {
    let n = world_normal.normalize();
    let v = (uniforms.world_camera_position - world_position).normalize();

    let mut spec_color = Vec3::ONE;
    let mut ambient = 0.2;

    let l = if uniforms.directional_light_on {
        uniforms.world_light_direction
    } else {
        let mut l = (world_position - uniforms.world_light_position).normalize();
        if uniforms.sun_mesh {
            l = -v;
            ambient += 0.4;
        }
        spec_color = Vec3::ZERO;
        l
    };

    let diffuse = (-l).dot(n).max(0.0);

    let r = l.reflect(n).normalize();
    let specular = diffuse * r.dot(v).max(0.0).powi(uniforms.shininess);

    (albedo * (ambient + diffuse) + spec_color * specular).clamp(0.0, 1.0)
}

fn wrap(t: f32, mode: TexCoordWrap) -> f32 {
    match mode {
        TexCoordWrap::Clamp => t.clamp(0.0, 1.0),
        TexCoordWrap::Repeat => t - t.floor(),
    }
}

/// Samples the grayscale texture at wrapped normalized coordinates.
pub(crate) fn sample_texture(
    texture: &Texture,
    texture_coords: Vec2,
    mode: TexCoordWrap,
) -> Vec3 {
    let u = wrap(texture_coords.x, mode);
    let v = wrap(texture_coords.y, mode);

    let x = (u * (texture.width() - 1) as f32) as u32;
    let y = (v * (texture.height() - 1) as f32) as u32;

    let value = texture.texel(x, y) as f32 / 255.0;
    Vec3::new(value, value, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn directional_uniforms() -> Uniforms {
        Uniforms {
            world_camera_position: Vec3::new(0.0, 0.0, 5.0),
            world_light_direction: Vec3::new(0.0, 0.0, -1.0),
            ..Uniforms::default()
        }
    }

    #[test]
    fn surface_facing_light_gets_full_diffuse() {
        // Light shines toward -z, surface normal faces +z.
        let color = phong_reflect(
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            &directional_uniforms(),
        );
        // ambient 0.2 + diffuse 1.0, plus white specular straight back.
        assert!(color.x > 0.5);
        assert_relative_eq!(color.x, color.y);
    }

    #[test]
    fn surface_facing_away_keeps_only_ambient() {
        let color = phong_reflect(
            Vec3::ONE,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            &directional_uniforms(),
        );
        assert_relative_eq!(color.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(color.y, 0.2, epsilon = 1e-6);
        assert_relative_eq!(color.z, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn point_light_has_no_specular() {
        // Grazing-lit white surface; any specular would tint the result
        // above the diffuse+ambient level.
        let uniforms = Uniforms {
            directional_light_on: false,
            world_light_position: Vec3::ZERO,
            world_camera_position: Vec3::new(0.0, 0.0, 5.0),
            shininess: 2,
            ..Uniforms::default()
        };
        let color = phong_reflect(
            Vec3::ONE,
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 1.0),
            &uniforms,
        );
        // L points from light to surface (+z), -L . N = -1 -> diffuse 0.
        assert_relative_eq!(color.x, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn sun_mesh_is_self_lit_with_raised_ambient() {
        let uniforms = Uniforms {
            directional_light_on: false,
            sun_mesh: true,
            world_camera_position: Vec3::new(0.0, 0.0, 5.0),
            ..Uniforms::default()
        };
        let color = phong_reflect(
            Vec3::ONE,
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            &uniforms,
        );
        // L = -V makes diffuse 1; ambient 0.6; specular suppressed.
        assert_relative_eq!(color.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(color.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn flat_fragment_uses_first_vertex_color() {
        let input = FragmentInput {
            flat_color: Vec3::new(1.0, 0.0, 0.0),
            shaded_color: Vec3::new(0.0, 1.0, 0.0),
            world_position: Vec3::ZERO,
            world_normal: Vec3::ZERO,
            texture_coords: Vec2::ZERO,
        };
        let texture = Texture::new(vec![0xff], 1, 1);
        let packed = fragment_shader(&input, false, &texture, &Uniforms::default());
        assert_eq!(packed, pack_rgba(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn gouraud_fragment_uses_interpolated_color() {
        let input = FragmentInput {
            flat_color: Vec3::new(1.0, 0.0, 0.0),
            shaded_color: Vec3::new(0.0, 1.0, 0.0),
            world_position: Vec3::ZERO,
            world_normal: Vec3::ZERO,
            texture_coords: Vec2::ZERO,
        };
        let texture = Texture::new(vec![0xff], 1, 1);
        let uniforms = Uniforms {
            shading: ShadingMode::Gouraud,
            ..Uniforms::default()
        };
        let packed = fragment_shader(&input, false, &texture, &uniforms);
        assert_eq!(packed, pack_rgba(Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn vertex_shader_writes_world_interpolants_for_phong() {
        let uniforms = Uniforms {
            shading: ShadingMode::Phong,
            model_matrix: crate::math::mat4::Mat4::translation(1.0, 2.0, 3.0),
            ..Uniforms::default()
        };
        let mut vertex = Vertex {
            position: Vec4::point(0.0, 0.0, 0.0),
            normal: Vec3::new(0.0, 1.0, 0.0),
            ..Vertex::default()
        };
        vertex_shader(&mut vertex, &uniforms);

        assert_eq!(vertex.world_position, Vec3::new(1.0, 2.0, 3.0));
        // Directions (w = 0) ignore the translation.
        assert_eq!(vertex.world_normal, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn repeat_wrap_keeps_fraction() {
        assert_relative_eq!(wrap(1.25, TexCoordWrap::Repeat), 0.25);
        assert_relative_eq!(wrap(-0.25, TexCoordWrap::Repeat), 0.75);
        assert_relative_eq!(wrap(1.25, TexCoordWrap::Clamp), 1.0);
    }

    #[test]
    fn sample_reads_row_major_top_left() {
        let texture = Texture::new(vec![10, 20, 30, 40], 2, 2);
        let sampled = sample_texture(&texture, Vec2::new(1.0, 1.0), TexCoordWrap::Clamp);
        assert_relative_eq!(sampled.x, 40.0 / 255.0);
        let sampled = sample_texture(&texture, Vec2::ZERO, TexCoordWrap::Clamp);
        assert_relative_eq!(sampled.x, 10.0 / 255.0);
    }
}
