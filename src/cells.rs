//! C6: Cell Assigner. Establishes cell centers and empty vertex slots for
//! Surface Nets.
//!
//! Grounded in `original_source/src/distcalc.cpp`'s `AssignVtx2Cell`.

use glam::DVec3;

use crate::grid::Grid;

/// A single dual-contouring cell: its center and, once Surface Nets (C7)
/// has placed a vertex there, a reference to it in the reconstructed mesh.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub center: DVec3,
    pub anchor: Option<u32>,
}

/// Allocate the cell array, one entry per grid cell, with every anchor
/// empty. No-ops (returns an empty vector) if `grid` has no cells, or if
/// the field it was evaluated over was empty (spec §7: "Empty field: C5, C6
/// no-op if `phi` is empty").
pub fn assign_cells(grid: &Grid, phi_is_empty: bool) -> Vec<Cell> {
    if phi_is_empty || grid.cell_count() == 0 {
        return Vec::new();
    }

    let mut cells = Vec::with_capacity(grid.cell_count());
    for k in 0..grid.nz {
        for j in 0..grid.ny {
            for i in 0..grid.nx {
                debug_assert_eq!(cells.len(), grid.cell_index(i, j, k));
                cells.push(Cell {
                    center: grid.cell_center(i, j, k),
                    anchor: None,
                });
            }
        }
    }
    cells
}
