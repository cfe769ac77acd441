//! C3: Border Classifier.
//!
//! Marks every mesh vertex with whether it sits on an open edge of the
//! surface. Grounded in `original_source/src/distcalc.cpp`'s
//! `isInBorder`/`CheckNeighborVertices`/`CheckNeighborVtxTriangles`: a
//! vertex belonging to only one triangle is trivially a border vertex;
//! otherwise, for each triangle incident to it, if some other vertex of
//! that triangle shares the original vertex with only one of *its own*
//! incident triangles, the edge between them has a single incident
//! triangle and both endpoints are marked border.
//!
//! This is an approximation of "every half-edge has an opposite" — not a
//! full half-edge check — and is the rule the original system commits to
//! (spec §4.3). It is run once, after mesh load, and never invalidated.

use crate::mesh::Mesh;

/// Does `haystack_vertex`'s incidence list contain exactly one triangle
/// that also names `needle_vertex`?
fn vertex_shares_exactly_one_triangle(mesh: &Mesh, haystack_vertex: u32, needle_vertex: u32) -> bool {
    let mut count = 0;
    for &ti in &mesh.vertices[haystack_vertex as usize].triangles {
        let tri = &mesh.triangles[ti as usize];
        if tri.v.contains(&needle_vertex) {
            count += 1;
        }
    }
    count == 1
}

fn is_on_border(mesh: &Mesh, vertex: u32) -> bool {
    let incident = &mesh.vertices[vertex as usize].triangles;
    if incident.len() == 1 {
        return true;
    }

    for &ti in incident {
        let tri = &mesh.triangles[ti as usize];
        for &other in &tri.v {
            if other == vertex {
                continue;
            }
            if vertex_shares_exactly_one_triangle(mesh, other, vertex) {
                return true;
            }
        }
    }
    false
}

/// Classify every vertex of `mesh` as border or interior, writing the
/// result into [`crate::mesh::Vertex::border`] (property slot 0).
pub fn classify_borders(mesh: &mut Mesh) {
    let flags: Vec<bool> = (0..mesh.vertices.len() as u32)
        .map(|v| is_on_border(mesh, v))
        .collect();
    for (vertex, flag) in mesh.vertices.iter_mut().zip(flags) {
        vertex.border = flag;
    }
}
