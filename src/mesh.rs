//! Triangle mesh storage: the `M` data model from the distance-field pipeline.
//!
//! Vertices and triangles live in flat arenas keyed by `u32` index, and each
//! vertex carries a `Vec<u32>` back-reference to the triangles that name it.
//! This replaces the original C++ implementation's raw pointer cycle between
//! `CsiTSurfVertex` and `CsiTriangle` with plain index bookkeeping.

use glam::DVec3;

/// A triangle naming three vertex indices into the owning [`Mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub v: [u32; 3],
}

/// A mesh vertex: position, the border-classifier flag (property slot 0 in
/// the original source), and the list of triangles incident to it.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: DVec3,
    /// Property slot 0: set by [`crate::border::classify_borders`].
    pub border: bool,
    pub triangles: Vec<u32>,
}

impl Vertex {
    fn new(pos: DVec3) -> Self {
        Self {
            pos,
            border: false,
            triangles: Vec::new(),
        }
    }
}

/// A triangulated surface: vertices with positions and incidence lists, plus
/// the triangle list. Immutable once built except for the border flag,
/// which [`crate::border::classify_borders`] fills in after construction.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh from vertex positions and triangle index triples,
    /// populating each vertex's triangle-incidence list.
    ///
    /// Every triangle index must be in range, and every vertex index inside
    /// a triangle must be in range; both are required invariants of the
    /// mesh model (spec §3) and are asserted here since the caller controls
    /// both arrays and a malformed mesh would be a programming error, not a
    /// recoverable runtime condition.
    pub fn new(positions: Vec<DVec3>, indices: Vec<[u32; 3]>) -> Self {
        let mut vertices: Vec<Vertex> = positions.into_iter().map(Vertex::new).collect();
        let mut triangles = Vec::with_capacity(indices.len());
        for (ti, v) in indices.into_iter().enumerate() {
            for &vi in &v {
                let vertex = &mut vertices[vi as usize];
                vertex.triangles.push(ti as u32);
            }
            triangles.push(Triangle { v });
        }
        Self {
            vertices,
            triangles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Positions of a triangle's three vertices, in winding order.
    pub fn triangle_positions(&self, tri: &Triangle) -> (DVec3, DVec3, DVec3) {
        (
            self.vertices[tri.v[0] as usize].pos,
            self.vertices[tri.v[1] as usize].pos,
            self.vertices[tri.v[2] as usize].pos,
        )
    }

    /// Per-vertex border flags of a triangle's three vertices.
    pub fn triangle_borders(&self, tri: &Triangle) -> (bool, bool, bool) {
        (
            self.vertices[tri.v[0] as usize].border,
            self.vertices[tri.v[1] as usize].border,
            self.vertices[tri.v[2] as usize].border,
        )
    }

    /// Axis-aligned bounding box `(min, max)` over all vertices.
    ///
    /// Panics if the mesh has no vertices; callers are required to supply a
    /// non-empty mesh (spec §4.2: "the mesh must have at least one
    /// triangle").
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut min = self.vertices[0].pos;
        let mut max = self.vertices[0].pos;
        for vtx in &self.vertices[1..] {
            min = min.min(vtx.pos);
            max = max.max(vtx.pos);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incidence_lists_are_populated() {
        let mesh = Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        );
        assert_eq!(mesh.vertices[0].triangles, vec![0]);
        assert_eq!(mesh.vertices[1].triangles, vec![0, 1]);
        assert_eq!(mesh.vertices[2].triangles, vec![0, 1]);
        assert_eq!(mesh.vertices[3].triangles, vec![1]);
    }

    #[test]
    fn bounding_box_covers_all_vertices() {
        let mesh = Mesh::new(
            vec![
                DVec3::new(-1.0, 2.0, 0.0),
                DVec3::new(3.0, -2.0, 5.0),
                DVec3::new(0.0, 0.0, -4.0),
            ],
            vec![[0, 1, 2]],
        );
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -4.0));
        assert_eq!(max, DVec3::new(3.0, 2.0, 5.0));
    }
}
