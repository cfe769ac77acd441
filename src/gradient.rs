//! C5: alternate gradient source using central finite differences of
//! `|phi|`, used when a field has been reloaded from a `.df` file and the
//! closed-form C4 gradients are unavailable.
//!
//! Grounded in `original_source/src/distcalc.cpp`'s `CalculateGradients`.
//! Interior nodes use a central difference; faces fall back to one-sided
//! forward/backward differences with step `h` (spec §4.5).

use glam::DVec3;

use crate::grid::Grid;

/// Compute finite-difference gradients of `|phi|` over every node of
/// `grid`. No-ops (returns an empty vector) if `phi` is empty (spec §7).
pub fn finite_difference_gradients(grid: &Grid, phi: &[f64]) -> Vec<DVec3> {
    if phi.is_empty() {
        return Vec::new();
    }

    let h = grid.h;
    let mut grad = vec![DVec3::ZERO; phi.len()];

    for k in 0..=grid.nz {
        for j in 0..=grid.ny {
            for i in 0..=grid.nx {
                let idx = grid.node_index(i, j, k);

                let dx = if i == 0 {
                    (phi[grid.node_index(1, j, k)].abs() - phi[idx].abs()) / h
                } else if i == grid.nx {
                    (phi[idx].abs() - phi[grid.node_index(i - 1, j, k)].abs()) / h
                } else {
                    (phi[grid.node_index(i + 1, j, k)].abs() - phi[grid.node_index(i - 1, j, k)].abs())
                        / (2.0 * h)
                };

                let dy = if j == 0 {
                    (phi[grid.node_index(i, 1, k)].abs() - phi[idx].abs()) / h
                } else if j == grid.ny {
                    (phi[idx].abs() - phi[grid.node_index(i, j - 1, k)].abs()) / h
                } else {
                    (phi[grid.node_index(i, j + 1, k)].abs() - phi[grid.node_index(i, j - 1, k)].abs())
                        / (2.0 * h)
                };

                let dz = if k == 0 {
                    (phi[grid.node_index(i, j, 1)].abs() - phi[idx].abs()) / h
                } else if k == grid.nz {
                    (phi[idx].abs() - phi[grid.node_index(i, j, k - 1)].abs()) / h
                } else {
                    (phi[grid.node_index(i, j, k + 1)].abs() - phi[grid.node_index(i, j, k - 1)].abs())
                        / (2.0 * h)
                };

                grad[idx] = DVec3::new(dx, dy, dz);
            }
        }
    }

    grad
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn empty_phi_yields_empty_gradients() {
        let grid = Grid {
            min: DVec3::ZERO,
            h: 1.0,
            nx: 2,
            ny: 2,
            nz: 2,
        };
        assert!(finite_difference_gradients(&grid, &[]).is_empty());
    }

    #[test]
    fn gradient_of_linear_field_is_constant() {
        let mesh = Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let _ = mesh; // bounding-box helper unused; grid built directly below
        let grid = Grid {
            min: DVec3::ZERO,
            h: 1.0,
            nx: 3,
            ny: 3,
            nz: 3,
        };
        let mut phi = vec![0.0; grid.node_count()];
        for k in 0..=grid.nz {
            for j in 0..=grid.ny {
                for i in 0..=grid.nx {
                    phi[grid.node_index(i, j, k)] = i as f64; // phi = x, always >= 0
                }
            }
        }
        let grad = finite_difference_gradients(&grid, &phi);
        for k in 0..=grid.nz {
            for j in 0..=grid.ny {
                for i in 0..=grid.nx {
                    let g = grad[grid.node_index(i, j, k)];
                    approx::assert_abs_diff_eq!(g.x, 1.0, epsilon = 1e-9);
                    approx::assert_abs_diff_eq!(g.y, 0.0, epsilon = 1e-9);
                    approx::assert_abs_diff_eq!(g.z, 0.0, epsilon = 1e-9);
                }
            }
        }
    }
}
