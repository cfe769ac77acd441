//! C8: Relaxation. Attracts each Surface Nets anchor toward the isosurface
//! along the stored gradient field.
//!
//! Grounded in `original_source/src/distcalc.cpp`'s `InterpolatePoint` /
//! `RelaxSurfVertices`: for each of a cell's eight corner grid nodes whose
//! border flag is set, translate the corner by `-|phi|*grad` and average
//! the results; if no corner is a border node, fall back to averaging all
//! eight translated corners (spec §4.8).

use crate::cells::Cell;
use crate::grid::{Field, Grid};
use crate::surface_nets::ReconstructedMesh;
use glam::DVec3;

fn cell_corners(i: usize, j: usize, k: usize) -> [(usize, usize, usize); 8] {
    [
        (i, j, k),
        (i + 1, j, k),
        (i, j + 1, k),
        (i + 1, j + 1, k),
        (i, j, k + 1),
        (i + 1, j, k + 1),
        (i, j + 1, k + 1),
        (i + 1, j + 1, k + 1),
    ]
}

/// C8: relax every anchored cell's dual vertex toward the isosurface.
pub fn relax(grid: &Grid, field: &Field, cells: &[Cell], recon: &mut ReconstructedMesh) {
    if field.phi.is_empty() {
        return;
    }

    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                let Some(anchor) = cells[grid.cell_index(i, j, k)].anchor else {
                    continue;
                };

                let mut translated = [DVec3::ZERO; 8];
                let mut is_border = [false; 8];
                for (slot, (ci, cj, ck)) in cell_corners(i, j, k).into_iter().enumerate() {
                    let node_idx = grid.node_index(ci, cj, ck);
                    let pos = grid.node_position(ci, cj, ck);
                    let offset = field.phi[node_idx].abs() * field.grad[node_idx];
                    translated[slot] = pos - offset;
                    is_border[slot] = field.border[node_idx];
                }

                let border_count = is_border.iter().filter(|&&b| b).count();
                let mean = if border_count > 0 {
                    let sum: DVec3 = translated
                        .iter()
                        .zip(is_border.iter())
                        .filter(|(_, &b)| b)
                        .map(|(&p, _)| p)
                        .sum();
                    sum / border_count as f64
                } else {
                    let sum: DVec3 = translated.iter().copied().sum();
                    sum / 8.0
                };

                recon.positions[anchor as usize] = mean;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::assign_cells;
    use crate::grid::evaluate_grid;
    use crate::mesh::Mesh;
    use crate::point_to_mesh::point_to_mesh_distance;
    use crate::surface_nets::surface_nets;

    fn tetrahedron() -> Mesh {
        let p = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        Mesh::new(p, vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]])
    }

    #[test]
    fn relaxation_does_not_increase_distance_to_surface() {
        let mesh = tetrahedron();
        let grid = Grid::from_mesh(&mesh, 0.2);
        let field = evaluate_grid(&mesh, &grid);
        let mut cells = assign_cells(&grid, field.phi.is_empty());
        let mut recon = surface_nets(&grid, &field, &mut cells);
        let before: Vec<f64> = recon
            .positions
            .iter()
            .map(|&p| point_to_mesh_distance(p, &mesh).signed_distance.abs())
            .collect();

        relax(&grid, &field, &cells, &mut recon);

        let after: Vec<f64> = recon
            .positions
            .iter()
            .map(|&p| point_to_mesh_distance(p, &mesh).signed_distance.abs())
            .collect();

        let tol = 1e-6;
        let improved_or_stable = before
            .iter()
            .zip(after.iter())
            .filter(|(b, a)| **a <= **b + tol)
            .count();
        // Best-effort property (spec §8 item 7): most anchors should not move
        // farther from the surface than their un-relaxed cell center.
        assert!(improved_or_stable * 2 >= before.len());
    }
}
