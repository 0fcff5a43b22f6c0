//! Expanded vertex meshes and the builders that produce them.
//!
//! Meshes carry no index buffer: three consecutive vertices form one triangle
//! (for triangle meshes), two consecutive vertices form one line (for line
//! meshes). Each mesh owns its vertex storage; `Clone` produces an
//! independent copy.

use crate::bunny::{BUNNY_INDICES, BUNNY_VERTICES};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A single mesh vertex.
///
/// The first three fields are geometry defined by the builders. The last
/// three are vertex-shader outputs carried on the vertex so the rasterizer
/// can interpolate them; builders preset `shaded_color` for meshes that are
/// never lit per-vertex (lines, plane, axes).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub texture_coords: Vec2,
    pub normal: Vec3,
    pub shaded_color: Vec3,
    pub world_position: Vec3,
    pub world_normal: Vec3,
}

/// An expanded triangle or line mesh with owning vertex storage.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub is_texturable: bool,
}

impl Mesh {
    pub(crate) fn with_capacity(capacity: usize, is_texturable: bool) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            is_texturable,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub(crate) fn push_triangle(&mut self, v0: Vertex, v1: Vertex, v2: Vertex) {
        self.vertices.push(v0);
        self.vertices.push(v1);
        self.vertices.push(v2);
    }

    fn push_line(&mut self, v0: Vertex, v1: Vertex) {
        self.vertices.push(v0);
        self.vertices.push(v1);
    }

    /// Builds a cube of the given edge length centered on the origin.
    ///
    /// 36 vertices with per-face normals. Texture coordinates span
    /// `[0, 1.5]` on each face so wrap and clamp modes are visible.
    pub fn cube_centered(edge: f32) -> Self {
        let h = edge / 2.0;
        let v = |x: f32, y: f32, z: f32, u: f32, t: f32, normal: Vec3, color: Vec3| Vertex {
            position: Vec4::point(x, y, z),
            texture_coords: Vec2::new(u, t),
            normal,
            shaded_color: color,
            ..Vertex::default()
        };
        let red = Vec3::new(0.5, 0.0, 0.0);
        let green = Vec3::new(0.0, 0.5, 0.0);
        let blue = Vec3::new(0.0, 0.0, 0.5);

        let front = Vec3::new(0.0, 0.0, 1.0);
        let top = Vec3::new(0.0, 1.0, 0.0);
        let back = Vec3::new(0.0, 0.0, -1.0);
        let bottom = Vec3::new(0.0, -1.0, 0.0);
        let right = Vec3::new(1.0, 0.0, 0.0);
        let left = Vec3::new(-1.0, 0.0, 0.0);

        let vertices = vec![
            // Front
            v(-h, -h, h, 1.5, 0.0, front, red),
            v(h, -h, h, 0.0, 0.0, front, green),
            v(h, h, h, 0.0, 1.5, front, blue),
            v(h, h, h, 0.0, 1.5, front, blue),
            v(-h, h, h, 1.5, 1.5, front, green),
            v(-h, -h, h, 1.5, 0.0, front, red),
            // Top
            v(-h, h, h, 0.0, 0.0, top, red),
            v(h, h, h, 1.5, 0.0, top, green),
            v(h, h, -h, 1.5, 1.5, top, blue),
            v(h, h, -h, 1.5, 1.5, top, red),
            v(-h, h, -h, 0.0, 1.5, top, green),
            v(-h, h, h, 0.0, 0.0, top, blue),
            // Back
            v(h, -h, -h, 1.5, 0.0, back, blue),
            v(-h, -h, -h, 0.0, 0.0, back, green),
            v(-h, h, -h, 0.0, 1.5, back, blue),
            v(-h, h, -h, 0.0, 1.5, back, blue),
            v(h, h, -h, 1.5, 1.5, back, green),
            v(h, -h, -h, 1.5, 0.0, back, blue),
            // Bottom
            v(-h, -h, -h, 0.0, 1.5, bottom, red),
            v(h, -h, -h, 1.5, 1.5, bottom, green),
            v(h, -h, h, 1.5, 0.0, bottom, blue),
            v(h, -h, h, 1.5, 0.0, bottom, red),
            v(-h, -h, h, 0.0, 0.0, bottom, green),
            v(-h, -h, -h, 0.0, 1.5, bottom, blue),
            // Right
            v(h, -h, h, 0.0, 0.0, right, red),
            v(h, -h, -h, 1.5, 0.0, right, green),
            v(h, h, -h, 1.5, 1.5, right, blue),
            v(h, h, -h, 1.5, 1.5, right, red),
            v(h, h, h, 0.0, 1.5, right, green),
            v(h, -h, h, 0.0, 0.0, right, blue),
            // Left
            v(-h, -h, -h, 0.0, 0.0, left, red),
            v(-h, -h, h, 1.5, 0.0, left, green),
            v(-h, h, h, 1.5, 1.5, left, blue),
            v(-h, h, h, 1.5, 1.5, left, red),
            v(-h, h, -h, 0.0, 1.5, left, green),
            v(-h, -h, -h, 0.0, 0.0, left, blue),
        ];

        Self {
            vertices,
            is_texturable: true,
        }
    }

    /// Builds a unit UV sphere centered on the origin.
    ///
    /// Stacks and slices both equal `subdivisions`; the pole stacks emit one
    /// triangle per slice, middle stacks two, for `2n^2 - 2n` triangles
    /// total. Normals point away from the center.
    pub fn uv_sphere(subdivisions: u32, color: Vec3) -> Self {
        let stacks = subdivisions;
        let slices = subdivisions;
        let r = 1.0;
        let center = Vec3::ZERO;

        let triangles = slices * 2 + (stacks - 2) * slices * 2;
        let mut mesh = Self::with_capacity(3 * triangles as usize, false);

        let vertex_at = |phi: f32, theta: f32| {
            let position = spherical_to_cartesian(r, phi, theta);
            Vertex {
                position,
                normal: (position.to_vec3() - center).normalize(),
                shaded_color: color,
                ..Vertex::default()
            }
        };

        for p in 0..stacks {
            let phi1 = p as f32 / stacks as f32 * std::f32::consts::PI;
            let phi2 = (p + 1) as f32 / stacks as f32 * std::f32::consts::PI;

            for t in 0..slices {
                let theta1 = t as f32 / slices as f32 * std::f32::consts::TAU;
                let theta2 = (t + 1) as f32 / slices as f32 * std::f32::consts::TAU;

                let v1 = vertex_at(phi1, theta1);
                let v2 = vertex_at(phi2, theta1);
                let v3 = vertex_at(phi2, theta2);
                let v4 = vertex_at(phi1, theta2);

                if p == 0 {
                    mesh.push_triangle(v1, v2, v3);
                } else if p + 1 == stacks {
                    mesh.push_triangle(v2, v4, v1);
                } else {
                    mesh.push_triangle(v1, v2, v3);
                    mesh.push_triangle(v3, v4, v1);
                }
            }
        }

        mesh
    }

    /// Builds a z = 0 plane visualized as 60 blue line segments along x.
    pub fn plane() -> Self {
        let number_of_lines = 60u32;
        let span = 5.0f32;

        let mut mesh = Self::with_capacity(number_of_lines as usize * 2, false);
        let blue = Vec3::new(0.0, 0.0, 1.0);

        for i in 0..number_of_lines {
            let y = -(span / 2.0) + i as f32 * (span / number_of_lines as f32);

            let start = Vertex {
                position: Vec4::point(span / 2.0, y, 0.0),
                shaded_color: blue,
                ..Vertex::default()
            };
            let end = Vertex {
                position: Vec4::point(-span / 2.0, y, 0.0),
                shaded_color: blue,
                ..Vertex::default()
            };
            mesh.push_line(start, end);
        }

        mesh
    }

    /// Builds a single counter-clockwise test triangle.
    pub fn triangle() -> Self {
        let at = |x: f32, y: f32, z: f32| Vertex {
            position: Vec4::point(x, y, z),
            ..Vertex::default()
        };
        Self {
            vertices: vec![at(-1.0, 0.0, 1.0), at(0.0, 0.0, 1.0), at(0.0, 0.0, -1.0)],
            is_texturable: false,
        }
    }

    /// Builds three colored line segments from the origin along the basis
    /// axes (length 3).
    pub fn world_axes() -> Self {
        let axis_length = 3.0;
        let center = Vertex {
            position: Vec4::point(0.0, 0.0, 0.0),
            ..Vertex::default()
        };
        let x = Vertex {
            position: Vec4::point(axis_length, 0.0, 0.0),
            shaded_color: Vec3::new(1.0, 0.0, 0.0),
            ..Vertex::default()
        };
        let y = Vertex {
            position: Vec4::point(0.0, axis_length, 0.0),
            shaded_color: Vec3::new(0.0, 1.0, 0.0),
            ..Vertex::default()
        };
        let z = Vertex {
            position: Vec4::point(0.0, 0.0, axis_length),
            shaded_color: Vec3::new(0.0, 1.0, 0.0),
            ..Vertex::default()
        };

        let mut mesh = Self::with_capacity(6, false);
        mesh.push_line(center, x);
        mesh.push_line(center, y);
        mesh.push_line(center, z);
        mesh
    }

    /// Builds a line mesh visualizing the normals of `source`: line `i` runs
    /// from vertex `i` along its normalized normal.
    pub fn normal_lines(source: &Mesh, length: f32) -> Self {
        let mut mesh = Self::with_capacity(2 * source.vertices.len(), false);
        let yellow = Vec3::new(1.0, 1.0, 0.0);

        for vertex in &source.vertices {
            let start = Vertex {
                position: vertex.position,
                shaded_color: yellow,
                ..Vertex::default()
            };
            let direction = vertex.normal.normalize() * length;
            let end = Vertex {
                position: start.position + Vec4::from_vec3(direction, 0.0),
                shaded_color: yellow,
                ..Vertex::default()
            };
            mesh.push_line(start, end);
        }

        mesh
    }

    /// Expands the bundled bunny table into a red triangle mesh.
    pub fn bunny() -> Self {
        let mut mesh = Self::with_capacity(BUNNY_INDICES.len() * 3, false);
        let red = Vec3::new(1.0, 0.0, 0.0);

        for indices in &BUNNY_INDICES {
            for &index in indices {
                let (position, normal) = BUNNY_VERTICES[index as usize];
                mesh.vertices.push(Vertex {
                    position: Vec4::point(position[0], position[1], position[2]),
                    normal: Vec3::new(normal[0], normal[1], normal[2]),
                    shaded_color: red,
                    ..Vertex::default()
                });
            }
        }

        mesh
    }
}

// Phi is latitude, theta longitude.
fn spherical_to_cartesian(r: f32, phi: f32, theta: f32) -> Vec4 {
    Vec4::point(
        r * theta.sin() * phi.sin(),
        r * phi.cos(),
        r * theta.cos() * phi.sin(),
    )
}
