//! `.df` distance-field persistence (spec §6), a UTF-8 text format.
//!
//! Grounded in `original_source/src/distio.cpp`'s
//! `SaveDistField`/`LoadDistField`. The wire format is owned by external
//! callers but must be preserved bit-exactly: `size = <h>` on line one,
//! then `# BEGIN VOXELS`, one `phi` value per line in linear node-index
//! order, `# END VOXELS`, and any other `#`-prefixed line ignored as a
//! comment. A malformed voxel line parses as `0.0` rather than failing the
//! whole load (spec §7).
//!
//! The original format never persists the border flag array, so after a
//! load the border flags default to `false` everywhere — exactly what the
//! original's `d_borders` member held post-load, since `LoadDistField`
//! never repopulates it. Gradients are recomputed by C5
//! ([`crate::gradient::finite_difference_gradients`]) and cells by C6
//! ([`crate::cells::assign_cells`]), per spec §6's "gradient availability
//! after load" contract.

use std::io::{self, BufRead, Write};

use crate::cells::{assign_cells, Cell};
use crate::gradient::finite_difference_gradients;
use crate::grid::{Field, Grid};
use crate::mesh::Mesh;

fn first_double_token(line: &str) -> f64 {
    line.split_whitespace()
        .next()
        .and_then(|tok| tok.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Write `phi` to `writer` in the `.df` format, using cell size `h`.
pub fn save<W: Write>(mut writer: W, h: f64, phi: &[f64]) -> io::Result<()> {
    writeln!(writer, "size = {h}")?;
    writeln!(writer, "# BEGIN VOXELS")?;
    for value in phi {
        writeln!(writer, "{value}")?;
    }
    writeln!(writer, "# END VOXELS")?;
    Ok(())
}

/// Load a `.df` file from `reader` against `mesh`'s current bounding box,
/// reconstructing `(nx, ny, nz)` from the persisted `size` (spec §6). Runs
/// C5 (gradients) and C6 (cell assignment) so the result is immediately
/// usable by Surface Nets (C7); the border flags default to `false` since
/// the format never persisted them.
pub fn load<R: BufRead>(reader: R, mesh: &Mesh) -> io::Result<(Grid, Field, Vec<Cell>)> {
    let mut grid: Option<Grid> = None;
    let mut phi: Vec<f64> = Vec::new();
    let mut next_index = 0usize;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("size = ") {
            let h = first_double_token(rest);
            let g = Grid::with_resolution(mesh, h);
            phi = vec![0.0; g.node_count()];
            grid = Some(g);
            next_index = 0;
            continue;
        }

        if trimmed.starts_with('#') {
            continue;
        }

        if let Some(slot) = phi.get_mut(next_index) {
            *slot = first_double_token(trimmed);
            next_index += 1;
        }
    }

    let grid = grid.unwrap_or_else(|| Grid::with_resolution(mesh, 1.0));
    let grad = finite_difference_gradients(&grid, &phi);
    let border = vec![false; phi.len()];
    let phi_is_empty = phi.is_empty();
    let field = Field { phi, grad, border };
    let cells = assign_cells(&grid, phi_is_empty);

    Ok((grid, field, cells))
}
