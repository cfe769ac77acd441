//! C1: Point-to-Triangle closest-distance with parametric coordinates.
//!
//! Eberly's seven-region decomposition of the triangle's parametric plane.
//! Ported from `original_source/src/distcalc.cpp`'s
//! `Point2TriangleDistance`, preserving its exact region tests and
//! tie-breaks (ties on `s`/`t` route through the corner case, giving
//! deterministic behavior per spec §4.1).

use glam::DVec3;

/// Output of a point-to-triangle closest-point query.
#[derive(Debug, Clone, Copy)]
pub struct ClosestPoint {
    /// Parametric coordinate along edge `E0 = V2 - V1`.
    pub s: f64,
    /// Parametric coordinate along edge `E1 = V3 - V1`.
    pub t: f64,
    /// Squared distance from the query point to the closest point.
    pub distance_squared: f64,
    /// Whether the closest point lies on the mesh boundary, derived from
    /// the three vertices' border flags (spec §4.1).
    pub on_border: bool,
}

impl ClosestPoint {
    /// Euclidean distance, clamped to zero before the square root to guard
    /// against floating-point cancellation producing a tiny negative
    /// squared distance (spec §7).
    pub fn distance(&self) -> f64 {
        self.distance_squared.max(0.0).sqrt()
    }

    /// The closest point itself: `B + s*E0 + t*E1`.
    pub fn point(&self, b: DVec3, e0: DVec3, e1: DVec3) -> DVec3 {
        b + self.s * e0 + self.t * e1
    }
}

/// Closest point on the closed triangle `(b, b+e0, b+e1)` to `p`, where
/// `e0 = v2 - b` and `e1 = v3 - b`. `border` gives the boundary flags of
/// `(v1, v2, v3)` in that order, used to derive `on_border` per spec
/// §4.1's vertex/edge/interior rules.
pub fn closest_point_on_triangle(
    p: DVec3,
    b: DVec3,
    e0: DVec3,
    e1: DVec3,
    border: (bool, bool, bool),
) -> ClosestPoint {
    let (vtx1_border, vtx2_border, vtx3_border) = border;
    let diff = b - p; // B - P
    let a = e0.dot(e0);
    let bb = e0.dot(e1);
    let c = e1.dot(e1);
    let d = e0.dot(diff);
    let e = e1.dot(diff);
    let f = diff.dot(diff);
    let delta = (a * c - bb * bb).abs();

    let mut s = bb * e - c * d;
    let mut t = bb * d - a * e;
    let sqr_distance;
    let mut on_border = false;

    if s + t <= delta {
        if s < 0.0 {
            if t < 0.0 {
                // region 4
                if d < 0.0 {
                    t = 0.0;
                    if -d >= a {
                        s = 1.0;
                        sqr_distance = a + 2.0 * d + f;
                        on_border = vtx2_border;
                    } else {
                        s = -d / a;
                        sqr_distance = d * s + f;
                        on_border = vtx1_border && vtx2_border;
                    }
                } else {
                    s = 0.0;
                    if e >= 0.0 {
                        t = 0.0;
                        sqr_distance = f;
                        on_border = vtx1_border;
                    } else if -e >= c {
                        t = 1.0;
                        sqr_distance = c + 2.0 * e + f;
                        on_border = vtx3_border;
                    } else {
                        t = -e / c;
                        sqr_distance = e * t + f;
                        on_border = vtx1_border && vtx3_border;
                    }
                }
            } else {
                // region 3 (t edge)
                s = 0.0;
                if e >= 0.0 {
                    t = 0.0;
                    sqr_distance = f;
                    on_border = vtx1_border;
                } else if -e >= c {
                    t = 1.0;
                    sqr_distance = c + 2.0 * e + f;
                    on_border = vtx3_border;
                } else {
                    t = -e / c;
                    sqr_distance = e * t + f;
                    on_border = vtx1_border && vtx3_border;
                }
            }
        } else if t < 0.0 {
            // region 5 (s edge)
            t = 0.0;
            if d >= 0.0 {
                s = 0.0;
                sqr_distance = f;
                on_border = vtx1_border;
            } else if -d >= a {
                s = 1.0;
                sqr_distance = a + 2.0 * d + f;
                on_border = vtx2_border;
            } else {
                s = -d / a;
                sqr_distance = d * s + f;
                on_border = vtx1_border && vtx2_border;
            }
        } else {
            // region 0: interior
            let inv_det = 1.0 / delta;
            s *= inv_det;
            t *= inv_det;
            sqr_distance = s * (a * s + bb * t + 2.0 * d) + t * (bb * s + c * t + 2.0 * e) + f;
        }
    } else if s < 0.0 {
        // region 2
        let tmp0 = bb + d;
        let tmp1 = c + e;
        if tmp1 > tmp0 {
            // minimum on edge s+t=1
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * bb + c;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
                sqr_distance = a + 2.0 * d + f;
                on_border = vtx2_border;
            } else {
                s = numer / denom;
                t = 1.0 - s;
                sqr_distance = s * (a * s + bb * t + 2.0 * d) + t * (bb * s + c * t + 2.0 * e) + f;
                on_border = vtx2_border && vtx3_border;
            }
        } else {
            // minimum on edge s=0
            s = 0.0;
            if tmp1 <= 0.0 {
                t = 1.0;
                sqr_distance = c + 2.0 * e + f;
                on_border = vtx3_border;
            } else if e >= 0.0 {
                t = 0.0;
                sqr_distance = f;
                on_border = vtx1_border;
            } else {
                t = -e / c;
                sqr_distance = e * t + f;
                on_border = vtx1_border && vtx3_border;
            }
        }
    } else if t < 0.0 {
        // region 6
        let tmp0 = bb + e;
        let tmp1 = a + d;
        if tmp1 > tmp0 {
            let numer = tmp1 - tmp0;
            let denom = a - 2.0 * bb + c;
            if numer >= denom {
                t = 1.0;
                s = 0.0;
                sqr_distance = c + 2.0 * e + f;
                on_border = vtx3_border;
            } else {
                t = numer / denom;
                s = 1.0 - t;
                sqr_distance = s * (a * s + bb * t + 2.0 * d) + t * (bb * s + c * t + 2.0 * e) + f;
                on_border = vtx2_border && vtx3_border;
            }
        } else {
            t = 0.0;
            if tmp1 <= 0.0 {
                s = 1.0;
                sqr_distance = a + 2.0 * d + f;
                on_border = vtx2_border;
            } else if d >= 0.0 {
                s = 0.0;
                sqr_distance = f;
                on_border = vtx1_border;
            } else {
                s = -d / a;
                sqr_distance = d * s + f;
                on_border = vtx1_border && vtx2_border;
            }
        }
    } else {
        // region 1
        let numer = c + e - bb - d;
        if numer <= 0.0 {
            s = 0.0;
            t = 1.0;
            sqr_distance = c + 2.0 * e + f;
            on_border = vtx3_border;
        } else {
            let denom = a - 2.0 * bb + c;
            if numer >= denom {
                s = 1.0;
                t = 0.0;
                sqr_distance = a + 2.0 * d + f;
                on_border = vtx2_border;
            } else {
                s = numer / denom;
                t = 1.0 - s;
                sqr_distance = s * (a * s + bb * t + 2.0 * d) + t * (bb * s + c * t + 2.0 * e) + f;
                on_border = vtx2_border && vtx3_border;
            }
        }
    }

    ClosestPoint {
        s,
        t,
        distance_squared: sqr_distance.max(0.0),
        on_border,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (DVec3, DVec3, DVec3) {
        // V1=(1,1,0), V2=(3,1,0), V3=(2,3,0)
        let v1 = DVec3::new(1.0, 1.0, 0.0);
        let v2 = DVec3::new(3.0, 1.0, 0.0);
        let v3 = DVec3::new(2.0, 3.0, 0.0);
        (v1, v2 - v1, v3 - v1)
    }

    fn assert_close(a: f64, b: f64, tol: f64) {
        approx::assert_abs_diff_eq!(a, b, epsilon = tol);
    }

    #[test]
    fn s1_interior_region() {
        let (b, e0, e1) = triangle();
        let p = DVec3::new(2.5, 2.0, 1.0);
        let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 1.0, 1e-9);
        // the projected point lands exactly on the v2-v3 edge (s+t==1),
        // which the region test still classifies as region 0 (interior).
        assert_close(r.s, 0.5, 1e-9);
        assert_close(r.t, 0.5, 1e-9);
    }

    #[test]
    fn s2_interior_region_negative_z() {
        let (b, e0, e1) = triangle();
        let p = DVec3::new(2.5, 2.0, -1.0);
        let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 1.0, 1e-9);
    }

    #[test]
    fn s3_beyond_v1_corner() {
        let (b, e0, e1) = triangle();
        let p = DVec3::new(b.x - 100.0, 1.0, 0.0);
        let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 10000.0, 1e-6);
        assert_close(r.s, 0.0, 1e-12);
        assert_close(r.t, 0.0, 1e-12);
    }

    #[test]
    fn s4_above_v1_along_z() {
        let (b, e0, e1) = triangle();
        let p = DVec3::new(1.0, 1.0, 50.0);
        let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 2500.0, 1e-6);
        assert_close(r.s, 0.0, 1e-12);
        assert_close(r.t, 0.0, 1e-12);
    }

    #[test]
    fn s5_on_s_edge() {
        let (b, e0, e1) = triangle();
        // midpoint of s-edge (V1,V2) offset by 1 along -y: (2, 0, 0)
        let p = DVec3::new(2.0, 0.0, 0.0);
        let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 1.0, 1e-9);
        assert_close(r.s, 0.5, 1e-9);
        assert_close(r.t, 0.0, 1e-12);
    }

    #[test]
    fn vertex_corner_returns_zero_distance_and_canonical_coords() {
        let (b, e0, e1) = triangle();
        let r = closest_point_on_triangle(b, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 0.0, 1e-12);
        assert_close(r.s, 0.0, 1e-12);
        assert_close(r.t, 0.0, 1e-12);

        let v2 = b + e0;
        let r2 = closest_point_on_triangle(v2, b, e0, e1, (false, false, false));
        assert_close(r2.distance_squared, 0.0, 1e-12);
        assert_close(r2.s, 1.0, 1e-9);
        assert_close(r2.t, 0.0, 1e-12);

        let v3 = b + e1;
        let r3 = closest_point_on_triangle(v3, b, e0, e1, (false, false, false));
        assert_close(r3.distance_squared, 0.0, 1e-12);
        assert_close(r3.s, 0.0, 1e-12);
        assert_close(r3.t, 1.0, 1e-9);
    }

    #[test]
    fn point_on_edge_has_zero_distance() {
        let (b, e0, e1) = triangle();
        let mid = b + 0.5 * e0;
        let r = closest_point_on_triangle(mid, b, e0, e1, (false, false, false));
        assert_close(r.distance_squared, 0.0, 1e-12);
        assert_close(r.t, 0.0, 1e-12);
    }

    #[test]
    fn closest_point_always_lies_in_closed_triangle() {
        let (b, e0, e1) = triangle();
        let samples = [
            DVec3::new(10.0, 10.0, 10.0),
            DVec3::new(-5.0, -5.0, 3.0),
            DVec3::new(2.0, 2.0, -4.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(100.0, -50.0, 25.0),
        ];
        for p in samples {
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            assert!(r.s >= -1e-9 && r.t >= -1e-9 && r.s + r.t <= 1.0 + 1e-9);
            let q = r.point(b, e0, e1);
            let tol = 1e-6 * (1.0 + p.length_squared() + b.length_squared());
            assert_close((p - q).length_squared(), r.distance_squared, tol.max(1e-6));
        }
    }

    // Vertex-sweep tests grounded in original_source/app/testunit.cpp's
    // vertexTest: distance from a moving point back to a fixed vertex grows
    // quadratically along an axis and along a diagonal.
    #[test]
    fn vertex_sweep_along_axis_grows_quadratically() {
        let (b, e0, e1) = triangle();
        for step in 0..50 {
            let i = b.x - step as f64;
            let p = DVec3::new(i, b.y, b.z);
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            assert_close(r.distance_squared, (i - b.x) * (i - b.x), 1e-6);
        }
    }

    #[test]
    fn vertex_sweep_along_diagonal_grows_quadratically() {
        let (b, e0, e1) = triangle();
        let sqrt2 = 2.0_f64.sqrt();
        for step in 0..50 {
            let i = b.x - step as f64;
            let j = b.y - step as f64;
            let p = DVec3::new(i, j, 0.0);
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            let res = ((i - b.x) * sqrt2) * ((i - b.x) * sqrt2);
            assert_close(r.distance_squared, res, 1e-3);
        }
    }

    // Edge-sweep tests grounded in original_source/app/testunit.cpp's
    // edgeTest: distance from a point swept perpendicularly away from an
    // edge midpoint grows quadratically in the sweep's arc-length.
    #[test]
    fn edge_sweep_along_s_edge_grows_quadratically() {
        let (b, e0, e1) = triangle();
        let mid_x = b.x + e0.x / 2.0;
        let mid_y = b.y + e0.y / 2.0;
        let mid_z = b.z + e0.z / 2.0;
        let mut j = mid_y;
        for _ in 0..50 {
            let p = DVec3::new(mid_x, j, mid_z);
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            assert_close(r.distance_squared, (j - 1.0) * (j - 1.0), 1e-6);
            j -= 1.0;
        }
    }

    #[test]
    fn edge_sweep_along_t_edge_grows_quadratically() {
        let (b, e0, e1) = triangle();
        let sqrt5 = 5.0_f64.sqrt();
        let mut i = b.x + e1.x / 2.0;
        let mut j = b.y + e1.y / 2.0;
        for k in 0..50 {
            let p = DVec3::new(i, j, 0.0);
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            let res = ((k as f64 / 2.0) * sqrt5) * ((k as f64 / 2.0) * sqrt5);
            assert_close(r.distance_squared, res, 1e-3);
            i -= 1.0;
            j += 0.5;
        }
    }

    #[test]
    fn edge_sweep_along_one_minus_s_edge_grows_quadratically() {
        // testunit.cpp's edgeTest sweeps away from the v2-v3 edge midpoint
        // along (1,1,0), expecting res = ((j-2)*sqrt2)^2 — a coefficient
        // that only equals the step length squared when the sweep is
        // exactly perpendicular to that edge. This fixture's v2-v3 is not,
        // so the expected growth coefficient is derived from the step
        // direction's actual perpendicular component instead of the
        // original's literal constant, staying within the edge's span
        // (where the nearest feature remains the edge, not a vertex).
        let (b, e0, e1) = triangle();
        let v2 = b + e0;
        let v3 = b + e1;
        let edge = v3 - v2;
        let dir = DVec3::new(1.0, 1.0, 0.0);
        let perp_coeff = dir.length_squared() - dir.dot(edge).powi(2) / edge.length_squared();
        let mid = (v2 + v3) / 2.0;
        for k in 0..3 {
            let p = mid + dir * k as f64;
            let r = closest_point_on_triangle(p, b, e0, e1, (false, false, false));
            let res = perp_coeff * (k as f64) * (k as f64);
            assert_close(r.distance_squared, res, 1e-6);
        }
    }

    #[test]
    fn on_border_true_when_all_vertices_border() {
        let (b, e0, e1) = triangle();
        // a point beyond v1 along -e0 resolves to the v1 feature region
        // (region 3, t-edge with t clamped to 0), unlike p == b exactly,
        // which degenerates into region 0 (interior) since diff is zero.
        let p = b - e0 * 10.0;
        let r = closest_point_on_triangle(p, b, e0, e1, (true, true, true));
        assert!(r.on_border);
    }

    #[test]
    fn on_border_false_when_feature_vertices_not_border() {
        let (b, e0, e1) = triangle();
        let p = b - e0 * 10.0;
        let r = closest_point_on_triangle(p, b, e0, e1, (false, true, true));
        assert!(!r.on_border);
    }
}
