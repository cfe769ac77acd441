//! C2: Point-to-Mesh minimum distance, with sign and closest-triangle
//! bookkeeping.
//!
//! Ground truth: `original_source/src/distcalc.cpp`'s
//! `Point2MeshDistance`. Evaluates C1 against every triangle and keeps the
//! smallest unsigned distance; ties are broken by encounter order (the
//! caller must not depend on which triangle wins under parallel
//! re-ordering, per spec §4.2).

use crate::closest_point::closest_point_on_triangle;
use crate::mesh::Mesh;
use glam::DVec3;

/// Result of a point-to-mesh closest query: the signed distance, the
/// parametric footprint on the closest triangle, which triangle that was,
/// and whether the footprint lies on the mesh border.
#[derive(Debug, Clone, Copy)]
pub struct PointToMesh {
    pub signed_distance: f64,
    pub s: f64,
    pub t: f64,
    pub closest_triangle: u32,
    pub on_border: bool,
}

/// Evaluate the signed distance from `p` to `mesh`. Panics if `mesh` has no
/// triangles; the caller is required to guarantee a non-empty mesh (spec
/// §4.2).
pub fn point_to_mesh_distance(p: DVec3, mesh: &Mesh) -> PointToMesh {
    assert!(!mesh.triangles.is_empty(), "mesh has no triangles");

    let mut min_distance_squared = f64::MAX;
    let mut best_s = 0.0;
    let mut best_t = 0.0;
    let mut best_on_border = false;
    let mut best_triangle = 0u32;

    for (ti, tri) in mesh.triangles.iter().enumerate() {
        let (v1, v2, v3) = mesh.triangle_positions(tri);
        let e0 = v2 - v1;
        let e1 = v3 - v1;
        let borders = mesh.triangle_borders(tri);
        let r = closest_point_on_triangle(p, v1, e0, e1, borders);
        if r.distance_squared < min_distance_squared {
            min_distance_squared = r.distance_squared;
            best_s = r.s;
            best_t = r.t;
            best_on_border = r.on_border;
            best_triangle = ti as u32;
        }
    }

    // Sign from the un-normalized, deliberately inconsistently-oriented
    // normal N = (V1-V2) x (V1-V3), reproduced exactly per spec §4.2/§9.
    let tri = &mesh.triangles[best_triangle as usize];
    let (v1, v2, v3) = mesh.triangle_positions(tri);
    let normal = (v1 - v2).cross(v1 - v3);
    let r = p - v1;
    let orientation = r.dot(normal);

    let unsigned = min_distance_squared.max(0.0).sqrt();
    let signed_distance = if orientation < 0.0 { -unsigned } else { unsigned };

    PointToMesh {
        signed_distance,
        s: best_s,
        t: best_t,
        closest_triangle: best_triangle,
        on_border: best_on_border,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle_mesh() -> Mesh {
        Mesh::new(
            vec![
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(3.0, 1.0, 0.0),
                DVec3::new(2.0, 3.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn s6_sign_flips_across_the_plane() {
        let mesh = single_triangle_mesh();
        let above = point_to_mesh_distance(DVec3::new(2.0, 2.0, 2.0), &mesh);
        let below = point_to_mesh_distance(DVec3::new(2.0, 2.0, -2.0), &mesh);
        assert!(above.signed_distance > 0.0);
        assert!(below.signed_distance < 0.0);
    }

    #[test]
    fn on_plane_interior_point_has_zero_distance() {
        let mesh = single_triangle_mesh();
        let r = point_to_mesh_distance(DVec3::new(2.0, 1.5, 0.0), &mesh);
        approx::assert_abs_diff_eq!(r.signed_distance, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn closer_triangle_wins() {
        let mesh = Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(10.0, 10.0, 0.0),
                DVec3::new(11.0, 10.0, 0.0),
                DVec3::new(10.0, 11.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        let r = point_to_mesh_distance(DVec3::new(0.2, 0.2, 1.0), &mesh);
        assert_eq!(r.closest_triangle, 0);
    }
}
