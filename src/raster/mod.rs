//! The software rasterizer.
//!
//! Owns the framebuffer, depth buffer, and the currently bound texture, and
//! drives the per-mesh pipeline: clip -> vertex shade -> perspective divide
//! -> viewport transform -> triangle traversal -> fragment shade -> pixel
//! write. Line meshes take a simpler path without clipping or depth testing.

pub(crate) mod clip;
pub(crate) mod edge;
pub(crate) mod shade;

use crate::colors::pack_rgba;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::texture::Texture;
use crate::uniforms::Uniforms;

/// Clear the framebuffer to the packed clear color.
pub const CLEAR_COLOR: u32 = 1;
/// Clear the depth buffer to infinity.
pub const CLEAR_DEPTH: u32 = 2;

pub struct Rasterizer {
    frame_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
    texture: Texture,
    pub clear_color: Vec3,
    pub back_face_culling: bool,
    /// View-space z of the near plane; negative in a right-handed view space.
    z_near: f32,
}

impl Rasterizer {
    /// Creates a rasterizer with `width * height` buffers.
    ///
    /// `z_near` is the (positive) near plane distance; it is stored negated
    /// as the view-space z of the plane. A 1x1 white texture is bound until
    /// [`set_texture`](Self::set_texture) replaces it.
    pub fn new(width: u32, height: u32, z_near: f32) -> Self {
        let size = (width * height) as usize;
        Self {
            frame_buffer: vec![0; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
            texture: Texture::new(vec![0xff], 1, 1),
            clear_color: Vec3::ZERO,
            back_face_culling: true,
            z_near: -z_near,
        }
    }

    /// Reallocates both buffers; previous contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.frame_buffer = vec![0; size];
        self.depth_buffer = vec![f32::INFINITY; size];
        self.width = width;
        self.height = height;
    }

    /// Binds a texture, taking ownership of it.
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    /// Clears the buffers selected by `flags` ([`CLEAR_COLOR`] | [`CLEAR_DEPTH`]).
    pub fn clear(&mut self, flags: u32) {
        if flags & CLEAR_COLOR != 0 {
            self.frame_buffer.fill(pack_rgba(self.clear_color));
        }
        if flags & CLEAR_DEPTH != 0 {
            self.depth_buffer.fill(f32::INFINITY);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// View-space z of the near plane (negative).
    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn frame_buffer(&self) -> &[u32] {
        &self.frame_buffer
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The framebuffer as raw bytes, little-endian `R, G, B, A` per pixel.
    pub fn frame_buffer_bytes(&self) -> &[u8] {
        // SAFETY: a u32 slice is always valid to reinterpret as 4x as many bytes.
        unsafe {
            std::slice::from_raw_parts(
                self.frame_buffer.as_ptr() as *const u8,
                self.frame_buffer.len() * 4,
            )
        }
    }

    /// Draws an expanded triangle mesh.
    ///
    /// The caller's mesh is copied; clipping and shading work on the copy.
    ///
    /// # Panics
    /// Panics when the vertex count is not a multiple of three.
    pub fn draw_triangle_mesh(&mut self, mesh: &Mesh, uniforms: &Uniforms) {
        assert_eq!(
            mesh.vertices.len() % 3,
            0,
            "triangle mesh vertex count must be a multiple of 3"
        );

        let mut mesh = mesh.clone();
        clip::clip_to_near(&mut mesh, self.z_near, uniforms);

        for vertex in &mut mesh.vertices {
            shade::vertex_shader(vertex, uniforms);

            let position = &mut vertex.position;

            // Perspective division to normalized device coordinates; w is
            // kept for perspective-correct interpolation.
            position.x /= position.w;
            position.y /= position.w;
            position.z /= position.w;

            // Viewport transform; raster y grows downward.
            position.x = (position.x * 0.5 + 0.5) * self.width as f32;
            position.y = (position.y * -0.5 + 0.5) * self.height as f32;
        }

        self.rasterize_triangles(&mesh, uniforms);
    }

    /// Draws an expanded line mesh.
    ///
    /// Lines are not clipped against the near plane; they are expected to
    /// stay in front of the camera by construction.
    ///
    /// # Panics
    /// Panics when the vertex count is not a multiple of two.
    pub fn draw_line_mesh(&mut self, mesh: &Mesh, uniforms: &Uniforms) {
        assert_eq!(
            mesh.vertices.len() % 2,
            0,
            "line mesh vertex count must be a multiple of 2"
        );

        let mut mesh = mesh.clone();
        for vertex in &mut mesh.vertices {
            let position = &mut vertex.position;
            *position = uniforms.mvp_matrix * *position;

            position.x /= position.w;
            position.y /= position.w;
            position.z /= position.w;

            position.x = (position.x * 0.5 + 0.5) * self.width as f32;
            position.y = (position.y * -0.5 + 0.5) * self.height as f32;
        }

        self.rasterize_lines(&mesh);
    }

    /// Scanline traversal along x, debug quality: no depth test, steep lines
    /// alias, fully off-screen lines are dropped.
    fn rasterize_lines(&mut self, mesh: &Mesh) {
        let width = self.width;
        let height = self.height;

        for pair in mesh.vertices.chunks_exact(2) {
            let line_color = pack_rgba(pair[1].shaded_color);

            let mut v0 = pair[0].position;
            let mut v1 = pair[1].position;
            if v0.x > v1.x {
                std::mem::swap(&mut v0, &mut v1);
            }

            if v1.x < 0.0 || v0.x > (width - 1) as f32 {
                continue;
            }

            let slope = (v1.y - v0.y) / (v1.x - v0.x);
            let offset = v0.y - slope * v0.x;

            let min_x = v0.x.max(0.0) as u32;
            let max_x = v1.x.min((width - 1) as f32) as u32;

            let mut y = slope * min_x as f32 + offset;
            for x in min_x..max_x {
                if y >= 0.0 && y < height as f32 {
                    self.frame_buffer[(y as u32 * width + x) as usize] = line_color;
                }
                y += slope;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use crate::mesh::Vertex;

    #[test]
    fn clear_fills_color_and_depth() {
        let mut rasterizer = Rasterizer::new(8, 8, 0.1);
        rasterizer.clear_color = Vec3::new(0.2, 0.4, 0.6);
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        let expected = pack_rgba(Vec3::new(0.2, 0.4, 0.6));
        assert!(rasterizer.frame_buffer().iter().all(|&p| p == expected));
        assert!(rasterizer
            .depth_buffer()
            .iter()
            .all(|&d| d == f32::INFINITY));
    }

    #[test]
    fn clear_flags_select_buffers() {
        let mut rasterizer = Rasterizer::new(4, 4, 0.1);
        rasterizer.clear_color = Vec3::ONE;
        rasterizer.depth_buffer.fill(0.5);

        rasterizer.clear(CLEAR_COLOR);
        assert!(rasterizer.depth_buffer().iter().all(|&d| d == 0.5));
        assert!(rasterizer
            .frame_buffer()
            .iter()
            .all(|&p| p == pack_rgba(Vec3::ONE)));
    }

    #[test]
    fn resize_reallocates_buffers() {
        let mut rasterizer = Rasterizer::new(4, 4, 0.1);
        rasterizer.resize(10, 6);
        assert_eq!(rasterizer.width(), 10);
        assert_eq!(rasterizer.height(), 6);
        assert_eq!(rasterizer.frame_buffer().len(), 60);
        assert_eq!(rasterizer.depth_buffer().len(), 60);
    }

    #[test]
    fn stores_near_plane_negated() {
        let rasterizer = Rasterizer::new(4, 4, 0.1);
        assert_eq!(rasterizer.z_near(), -0.1);
    }

    #[test]
    #[should_panic]
    fn rejects_partial_triangles() {
        let mut rasterizer = Rasterizer::new(4, 4, 0.1);
        let mesh = Mesh {
            vertices: vec![Vertex::default(); 4],
            is_texturable: false,
        };
        rasterizer.draw_triangle_mesh(&mesh, &Uniforms::default());
    }

    #[test]
    fn full_pipeline_draws_front_facing_triangle() {
        use crate::math::mat4::Mat4;

        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        rasterizer.clear(CLEAR_COLOR | CLEAR_DEPTH);

        // CCW triangle facing the camera, two units down the view axis.
        let red = Vec3::new(1.0, 0.0, 0.0);
        let vertex = |x: f32, y: f32| Vertex {
            position: Vec4::point(x, y, -2.0),
            normal: Vec3::new(0.0, 0.0, 1.0),
            shaded_color: red,
            ..Vertex::default()
        };
        let mesh = Mesh {
            vertices: vec![vertex(-1.0, -1.0), vertex(1.0, -1.0), vertex(0.0, 1.0)],
            is_texturable: false,
        };
        let uniforms = Uniforms {
            mvp_matrix: Mat4::perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0),
            ..Uniforms::default()
        };

        rasterizer.draw_triangle_mesh(&mesh, &uniforms);

        // Flat shading takes the first vertex's lit color.
        let expected = pack_rgba(shade::phong_reflect(
            red,
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(0.0, 0.0, 1.0),
            &uniforms,
        ));
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 8], expected);

        // Survives back-face culling (it is on by default) and writes a
        // depth below 1.
        let depth = rasterizer.depth_buffer()[8 * 16 + 8];
        assert!(depth < 1.0);
    }

    #[test]
    fn horizontal_line_writes_second_vertex_color() {
        let mut rasterizer = Rasterizer::new(16, 16, 0.1);
        let red = Vec3::new(1.0, 0.0, 0.0);

        // Raster-space positions survive an identity MVP with w=1 after the
        // viewport transform maps NDC; build NDC coordinates for y=8, x 2..14.
        let ndc = |x: f32, y: f32| {
            Vec4::point(
                x / 16.0 * 2.0 - 1.0,
                -(y / 16.0 * 2.0 - 1.0),
                -0.5,
            )
        };
        let mesh = Mesh {
            vertices: vec![
                Vertex {
                    position: ndc(2.0, 8.0),
                    shaded_color: Vec3::new(0.0, 1.0, 0.0),
                    ..Vertex::default()
                },
                Vertex {
                    position: ndc(14.0, 8.0),
                    shaded_color: red,
                    ..Vertex::default()
                },
            ],
            is_texturable: false,
        };
        rasterizer.draw_line_mesh(&mesh, &Uniforms::default());

        let expected = pack_rgba(red);
        for x in 2..14 {
            assert_eq!(rasterizer.frame_buffer()[8 * 16 + x], expected);
        }
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 1], 0);
        assert_eq!(rasterizer.frame_buffer()[8 * 16 + 14], 0);
    }
}
