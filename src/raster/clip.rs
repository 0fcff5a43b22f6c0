//! Near-plane clipping in view space.
//!
//! Triangles are clipped against the single plane `z = z_near` (a negative
//! view-space z) before projection. A vertex is outside when its view-space
//! z is greater than `z_near`, i.e. between the plane and the camera or
//! behind it. Clipping yields zero, one, or two triangles per input
//! triangle, preserving counter-clockwise winding, then transforms the
//! result back to object space so the rest of the pipeline can apply the
//! full MVP uniformly.

use crate::mesh::{Mesh, Vertex};
use crate::uniforms::Uniforms;

const INSIDE: u32 = 0;
const OUTSIDE: u32 = 1;

fn out_code(z: f32, z_near: f32) -> u32 {
    if z > z_near {
        OUTSIDE
    } else {
        INSIDE
    }
}

/// Interpolates every vertex attribute; the position's w is reset to 1.
fn lerp_vertices(v0: &Vertex, v1: &Vertex, t: f32) -> Vertex {
    let mut position = v0.position + (v1.position - v0.position) * t;
    position.w = 1.0;

    Vertex {
        position,
        texture_coords: v0.texture_coords + (v1.texture_coords - v0.texture_coords) * t,
        normal: v0.normal + (v1.normal - v0.normal) * t,
        shaded_color: v0.shaded_color + (v1.shaded_color - v0.shaded_color) * t,
        world_position: v0.world_position + (v1.world_position - v0.world_position) * t,
        world_normal: v0.world_normal + (v1.world_normal - v0.world_normal) * t,
    }
}

/// Two vertices outside: shrink them onto the plane, emit one triangle.
fn clip_two_outside(codes: [u32; 3], triangle: &[Vertex], out: &mut Mesh, z_near: f32) {
    let mut not_clipped = &triangle[0];
    let mut clipped_a = &triangle[1];
    let mut clipped_b = &triangle[2];

    // The two outside vertices share the OUTSIDE bit; the pairwise AND that
    // is set identifies the inside vertex. Assignments keep the original
    // CCW order.
    if codes[1] & codes[2] != 0 {
        not_clipped = &triangle[0];
        clipped_a = &triangle[1];
        clipped_b = &triangle[2];
    }
    if codes[0] & codes[2] != 0 {
        not_clipped = &triangle[1];
        clipped_a = &triangle[2];
        clipped_b = &triangle[0];
    }
    if codes[0] & codes[1] != 0 {
        not_clipped = &triangle[2];
        clipped_a = &triangle[0];
        clipped_b = &triangle[1];
    }

    let nc_z = not_clipped.position.z;
    let t_a = (clipped_a.position.z - z_near) / (clipped_a.position.z - nc_z);
    let t_b = (clipped_b.position.z - z_near) / (clipped_b.position.z - nc_z);

    let a_to_not_clipped = lerp_vertices(clipped_a, not_clipped, t_a);
    let b_to_not_clipped = lerp_vertices(clipped_b, not_clipped, t_b);

    out.push_triangle(*not_clipped, a_to_not_clipped, b_to_not_clipped);
}

/// One vertex outside: replace the quad that remains with two triangles.
fn clip_one_outside(codes: [u32; 3], triangle: &[Vertex], out: &mut Mesh, z_near: f32) {
    // Cyclic order around the triangle is always (a, clipped, b).
    let mut not_clipped_a = &triangle[2];
    let mut clipped = &triangle[0];
    let mut not_clipped_b = &triangle[1];

    if codes[0] != 0 {
        not_clipped_a = &triangle[2];
        clipped = &triangle[0];
        not_clipped_b = &triangle[1];
    }
    if codes[1] != 0 {
        not_clipped_a = &triangle[0];
        clipped = &triangle[1];
        not_clipped_b = &triangle[2];
    }
    if codes[2] != 0 {
        not_clipped_a = &triangle[1];
        clipped = &triangle[2];
        not_clipped_b = &triangle[0];
    }

    let clipped_z = clipped.position.z;
    let t_a = (clipped_z - z_near) / (clipped_z - not_clipped_a.position.z);
    let t_b = (clipped_z - z_near) / (clipped_z - not_clipped_b.position.z);

    let clipped_a = lerp_vertices(clipped, not_clipped_a, t_a);
    let clipped_b = lerp_vertices(clipped, not_clipped_b, t_b);

    out.push_triangle(*not_clipped_a, clipped_a, *not_clipped_b);
    out.push_triangle(*not_clipped_b, clipped_a, clipped_b);
}

fn clip_triangle(triangle: &[Vertex], out: &mut Mesh, z_near: f32) {
    let codes = [
        out_code(triangle[0].position.z, z_near),
        out_code(triangle[1].position.z, z_near),
        out_code(triangle[2].position.z, z_near),
    ];

    // Trivial accept
    if codes[0] | codes[1] | codes[2] == 0 {
        out.push_triangle(triangle[0], triangle[1], triangle[2]);
        return;
    }

    // Trivial reject
    if codes[0] & codes[1] & codes[2] != 0 {
        return;
    }

    if codes[0] & codes[1] != 0 || codes[0] & codes[2] != 0 || codes[1] & codes[2] != 0 {
        clip_two_outside(codes, triangle, out, z_near);
    } else {
        clip_one_outside(codes, triangle, out, z_near);
    }
}

/// Clips `mesh` against the near plane, replacing it with the clipped mesh.
///
/// Vertices are moved to view space for the plane test, and the surviving
/// geometry is moved back to object space through the affine inverse of the
/// model-view matrix. The replacement may hold up to twice as many vertices.
pub(crate) fn clip_to_near(mesh: &mut Mesh, z_near: f32, uniforms: &Uniforms) {
    let model_view = uniforms.view_matrix * uniforms.model_matrix;
    let inverse_model_view = model_view.inverse_affine();

    for vertex in &mut mesh.vertices {
        vertex.position = model_view * vertex.position;
    }

    let mut clipped = Mesh::with_capacity(2 * mesh.vertices.len(), mesh.is_texturable);
    for triangle in mesh.vertices.chunks_exact(3) {
        clip_triangle(triangle, &mut clipped, z_near);
    }

    for vertex in &mut clipped.vertices {
        vertex.position = inverse_model_view * vertex.position;
    }

    *mesh = clipped;
}
