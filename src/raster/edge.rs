//! Edge-function triangle traversal.
//!
//! Walks the clamped bounding box of each raster-space triangle with
//! incremental edge equations: stepping one pixel right subtracts the edge's
//! y-difference, stepping one pixel down adds its x-difference. A pixel is
//! covered when all three edge values share a sign (only the positive side
//! is accepted while back-face culling is on). Attributes are interpolated
//! perspective-correctly from the vertices' clip-space w.

use super::shade::{self, FragmentInput};
use super::Rasterizer;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::uniforms::Uniforms;

/// Signed parallelogram area of edge `(v0, v1)` against point `p`.
///
/// Positive when `p` lies to the left of the edge; with the viewport's y
/// flip this makes the value positive inside CCW triangles.
#[inline]
pub(crate) fn edge_function(v0: Vec4, v1: Vec4, px: f32, py: f32) -> f32 {
    (v0.x - v1.x) * (py - v0.y) - (v0.y - v1.y) * (px - v0.x)
}

impl Rasterizer {
    /// Rasterizes a mesh whose positions are already in raster space
    /// (post viewport transform, w still holding the clip-space w).
    pub(crate) fn rasterize_triangles(&mut self, mesh: &Mesh, uniforms: &Uniforms) {
        let width = self.width as i32;
        let height = self.height as i32;

        for triangle in mesh.vertices.chunks_exact(3) {
            let v0 = triangle[0].position;
            let v1 = triangle[1].position;
            let v2 = triangle[2].position;

            let area = edge_function(v0, v1, v2.x, v2.y);
            if self.back_face_culling && area < 0.0 {
                continue;
            }

            let min_x = v0.x.min(v1.x).min(v2.x).clamp(0.0, (width - 1) as f32) as i32;
            let max_x = v0.x.max(v1.x).max(v2.x).clamp(0.0, (width - 1) as f32) as i32;
            let min_y = v0.y.min(v1.y).min(v2.y).clamp(0.0, (height - 1) as f32) as i32;
            let max_y = v0.y.max(v1.y).max(v2.y).clamp(0.0, (height - 1) as f32) as i32;

            // Per-edge differences; constant across the triangle, so each
            // edge value can be stepped instead of re-evaluated.
            let e0_diff_x = v0.x - v1.x;
            let e1_diff_x = v1.x - v2.x;
            let e2_diff_x = v2.x - v0.x;

            let e0_diff_y = v0.y - v1.y;
            let e1_diff_y = v1.y - v2.y;
            let e2_diff_y = v2.y - v0.y;

            let mut e0_row = e0_diff_x * (min_y as f32 - v0.y) - e0_diff_y * (min_x as f32 - v0.x);
            let mut e1_row = e1_diff_x * (min_y as f32 - v1.y) - e1_diff_y * (min_x as f32 - v1.x);
            let mut e2_row = e2_diff_x * (min_y as f32 - v2.y) - e2_diff_y * (min_x as f32 - v2.x);

            let v0_rec_w = 1.0 / v0.w;
            let v1_rec_w = 1.0 / v1.w;
            let v2_rec_w = 1.0 / v2.w;

            for y in min_y..=max_y {
                let mut e0 = e0_row;
                let mut e1 = e1_row;
                let mut e2 = e2_row;

                for x in min_x..=max_x {
                    let inside_ccw = e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0;
                    let inside_cw =
                        !self.back_face_culling && e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0;

                    if inside_ccw || inside_cw {
                        // Each weight belongs to the vertex opposite its edge.
                        let w0 = e1 / area;
                        let w1 = e2 / area;
                        let w2 = e0 / area;

                        // Depth interpolates linearly in screen space.
                        let depth = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                        let index = (y * width + x) as usize;

                        if depth < 1.0 && depth < self.depth_buffer[index] {
                            self.depth_buffer[index] = depth;

                            let rec_denominator =
                                1.0 / (w0 * v0_rec_w + w1 * v1_rec_w + w2 * v2_rec_w);
                            let lerp3 = |a0: Vec3, a1: Vec3, a2: Vec3| {
                                (a0 * (w0 * v0_rec_w)
                                    + a1 * (w1 * v1_rec_w)
                                    + a2 * (w2 * v2_rec_w))
                                    * rec_denominator
                            };
                            let lerp2 = |a0: Vec2, a1: Vec2, a2: Vec2| {
                                (a0 * (w0 * v0_rec_w)
                                    + a1 * (w1 * v1_rec_w)
                                    + a2 * (w2 * v2_rec_w))
                                    * rec_denominator
                            };

                            let fragment = FragmentInput {
                                flat_color: triangle[0].shaded_color,
                                shaded_color: lerp3(
                                    triangle[0].shaded_color,
                                    triangle[1].shaded_color,
                                    triangle[2].shaded_color,
                                ),
                                world_position: lerp3(
                                    triangle[0].world_position,
                                    triangle[1].world_position,
                                    triangle[2].world_position,
                                ),
                                world_normal: lerp3(
                                    triangle[0].world_normal,
                                    triangle[1].world_normal,
                                    triangle[2].world_normal,
                                ),
                                texture_coords: lerp2(
                                    triangle[0].texture_coords,
                                    triangle[1].texture_coords,
                                    triangle[2].texture_coords,
                                ),
                            };

                            self.frame_buffer[index] = shade::fragment_shader(
                                &fragment,
                                mesh.is_texturable,
                                &self.texture,
                                uniforms,
                            );
                        }
                    }

                    e0 -= e0_diff_y;
                    e1 -= e1_diff_y;
                    e2 -= e2_diff_y;
                }

                e0_row += e0_diff_x;
                e1_row += e1_diff_x;
                e2_row += e2_diff_x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::pack_rgba;
    use crate::mesh::Vertex;
    use crate::raster::{CLEAR_COLOR, CLEAR_DEPTH};
    use crate::texture::Texture;
    use crate::uniforms::{ShadingMode, TexCoordWrap};

    const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    fn raster_vertex(x: f32, y: f32, z: f32, color: Vec3) -> Vertex {
        Vertex {
            position: Vec4::new(x, y, z, 1.0),
            shaded_color: color,
            ..Vertex::default()
        }
    }

    fn raster_mesh(vertices: Vec<Vertex>) -> Mesh {
        Mesh {
            vertices,
            is_texturable: false,
        }
    }

    /// Two raster-space triangles covering the whole target at depth `z`.
    fn full_screen_quad(size: f32, z: f32, color: Vec3) -> Mesh {
        raster_mesh(vec![
            raster_vertex(0.0, 0.0, z, color),
            raster_vertex(size, size, z, color),
            raster_vertex(0.0, size, z, color),
            raster_vertex(0.0, 0.0, z, color),
            raster_vertex(size, 0.0, z, color),
            raster_vertex(size, size, z, color),
        ])
    }

    #[test]
    fn single_pixel_triangle_covers_one_sample() {
        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.back_face_culling = false;
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        let mesh = raster_mesh(vec![
            raster_vertex(7.5, 7.5, 0.5, RED),
            raster_vertex(8.5, 7.5, 0.5, RED),
            raster_vertex(8.0, 8.5, 0.5, RED),
        ]);
        rasterizer.rasterize_triangles(&mesh, &Uniforms::default());

        let clear = pack_rgba(Vec3::ZERO);
        for y in 0..16usize {
            for x in 0..16usize {
                let expected = if (x, y) == (8, 8) { pack_rgba(RED) } else { clear };
                assert_eq!(rasterizer.frame_buffer()[y * 16 + x], expected, "({x},{y})");
            }
        }
    }

    #[test]
    fn nearer_quad_occludes() {
        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.back_face_culling = false;
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        rasterizer.rasterize_triangles(&full_screen_quad(16.0, 0.5, RED), &Uniforms::default());
        rasterizer.rasterize_triangles(&full_screen_quad(16.0, 0.3, BLUE), &Uniforms::default());

        let blue = pack_rgba(BLUE);
        assert!(rasterizer.frame_buffer().iter().all(|&p| p == blue));
        assert!(rasterizer.depth_buffer().iter().all(|&d| d < 1.0));
    }

    #[test]
    fn farther_quad_is_rejected_by_depth_test() {
        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.back_face_culling = false;
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        rasterizer.rasterize_triangles(&full_screen_quad(16.0, 0.5, RED), &Uniforms::default());
        rasterizer.rasterize_triangles(&full_screen_quad(16.0, 0.7, BLUE), &Uniforms::default());

        let red = pack_rgba(RED);
        assert!(rasterizer.frame_buffer().iter().all(|&p| p == red));
    }

    #[test]
    fn clockwise_triangle_is_culled_only_when_enabled() {
        let clockwise = raster_mesh(vec![
            raster_vertex(2.0, 2.0, 0.5, RED),
            raster_vertex(12.0, 2.0, 0.5, RED),
            raster_vertex(7.0, 12.0, 0.5, RED),
        ]);

        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);
        rasterizer.rasterize_triangles(&clockwise, &Uniforms::default());
        let clear = pack_rgba(Vec3::ZERO);
        assert!(rasterizer.frame_buffer().iter().all(|&p| p == clear));

        rasterizer.back_face_culling = false;
        rasterizer.rasterize_triangles(&clockwise, &Uniforms::default());
        assert_eq!(rasterizer.frame_buffer()[7 * 16 + 7], pack_rgba(RED));
    }

    /// A textured full-screen quad whose u runs 0 to 1.5 left to right,
    /// shaded with lighting arranged so the output is 0.2 * albedo.
    fn textured_quad_setup() -> (Rasterizer, Mesh, Uniforms) {
        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.back_face_culling = false;
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);
        rasterizer.set_texture(Texture::new(vec![0, 85, 170, 255], 4, 1));

        let vertex = |x: f32, y: f32, u: f32| Vertex {
            position: Vec4::new(x, y, 0.5, 1.0),
            texture_coords: Vec2::new(u, 0.0),
            world_normal: Vec3::new(0.0, 0.0, 1.0),
            shaded_color: Vec3::ONE,
            ..Vertex::default()
        };
        let mesh = Mesh {
            vertices: vec![
                vertex(0.0, 0.0, 0.0),
                vertex(16.0, 16.0, 1.5),
                vertex(0.0, 16.0, 0.0),
                vertex(0.0, 0.0, 0.0),
                vertex(16.0, 0.0, 1.5),
                vertex(16.0, 16.0, 1.5),
            ],
            is_texturable: true,
        };

        // Light shining along the surface normal from behind: diffuse and
        // specular both vanish, leaving 0.2 * albedo.
        let uniforms = Uniforms {
            shading: ShadingMode::Phong,
            world_camera_position: Vec3::new(0.0, 0.0, 5.0),
            world_light_direction: Vec3::new(0.0, 0.0, 1.0),
            ..Uniforms::default()
        };
        (rasterizer, mesh, uniforms)
    }

    fn ambient_gray(texel: u8) -> u32 {
        pack_rgba(Vec3::ONE * (0.2 * texel as f32 / 255.0))
    }

    #[test]
    fn clamp_saturates_texture_coords() {
        let (mut rasterizer, mesh, mut uniforms) = textured_quad_setup();
        uniforms.tex_coord_wrap = TexCoordWrap::Clamp;
        rasterizer.rasterize_triangles(&mesh, &uniforms);

        // u = 1.5 * x / 16; past u = 1 the last column is sampled.
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 15], ambient_gray(255));
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 12], ambient_gray(255));
        // Inside [0, 1] clamping changes nothing.
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 8], ambient_gray(170));
    }

    #[test]
    fn repeat_wraps_texture_coords() {
        let (mut rasterizer, mesh, mut uniforms) = textured_quad_setup();
        uniforms.tex_coord_wrap = TexCoordWrap::Repeat;
        rasterizer.rasterize_triangles(&mesh, &uniforms);

        // x = 15 -> u = 1.40625 -> wraps to 0.40625 -> texel 1.
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 15], ambient_gray(85));
        // x = 12 -> u = 1.125 -> wraps to 0.125 -> texel 0.
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 12], ambient_gray(0));
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 8], ambient_gray(170));
    }

    #[test]
    fn written_depth_matches_last_accepted_fragment() {
        let mut rasterizer = Rasterizer::new(8, 8, 0.1);
        rasterizer.back_face_culling = false;
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        rasterizer.rasterize_triangles(&full_screen_quad(8.0, 0.6, RED), &Uniforms::default());
        rasterizer.rasterize_triangles(&full_screen_quad(8.0, 0.25, BLUE), &Uniforms::default());

        for &depth in rasterizer.depth_buffer() {
            approx::assert_relative_eq!(depth, 0.25, epsilon = 1e-5);
        }
    }
}
