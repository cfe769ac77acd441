//! [`Engine`]: a single owned value carrying the mesh, grid, field, cells,
//! and reconstructed mesh, replacing the original source's global mutable
//! pointers to "the mesh", "the reconstructed mesh", and "the distance
//! engine" (spec §9's redesign note).

use std::io::{BufRead, Write};

use crate::border::classify_borders;
use crate::cells::{assign_cells, Cell};
use crate::error::DistFieldError;
use crate::grid::{evaluate_grid, Field, Grid};
use crate::mesh::Mesh;
use crate::persist;
use crate::relax::relax;
use crate::surface_nets::{surface_nets, ReconstructedMesh};

/// The hard-coded cell size the original source substitutes for the
/// mesh's own resolution estimate (spec §6, §9: "implementers should
/// expose `h` as a constructor parameter and document the override as a
/// compatibility bug"). Kept as the default here, but callers should
/// prefer [`Engine::with_resolution`] with a value derived from their own
/// data.
pub const DEFAULT_RESOLUTION: f64 = 800.0;

/// Owns the whole distance-field pipeline for one mesh: border
/// classification (C3), the grid and field (C4), the cell array (C6), and
/// the reconstructed mesh (C7/C8) once [`Engine::reconstruct`] has run.
pub struct Engine {
    pub mesh: Mesh,
    pub grid: Grid,
    pub field: Field,
    pub cells: Vec<Cell>,
    pub reconstructed: Option<ReconstructedMesh>,
}

impl Engine {
    /// Build the engine and immediately run C3 (border classification) and
    /// C4 (grid evaluation) with a caller-supplied cell size.
    pub fn with_resolution(mut mesh: Mesh, h: f64) -> Result<Self, DistFieldError> {
        if mesh.is_empty() {
            return Err(DistFieldError::EmptyMesh);
        }
        classify_borders(&mut mesh);
        let grid = Grid::from_mesh(&mesh, h);
        let field = evaluate_grid(&mesh, &grid);
        Ok(Self {
            mesh,
            grid,
            field,
            cells: Vec::new(),
            reconstructed: None,
        })
    }

    /// Build the engine using the hard-coded [`DEFAULT_RESOLUTION`]
    /// override (the compatibility bug named in spec §9).
    pub fn new(mesh: Mesh) -> Result<Self, DistFieldError> {
        Self::with_resolution(mesh, DEFAULT_RESOLUTION)
    }

    /// C6 + C7 + C8: assign cells, run Surface Nets, then relax the
    /// emitted anchors toward the isosurface. Returns a reference to the
    /// reconstructed mesh.
    pub fn reconstruct(&mut self) -> &ReconstructedMesh {
        let mut cells = assign_cells(&self.grid, self.field.phi.is_empty());
        let mut recon = surface_nets(&self.grid, &self.field, &mut cells);
        relax(&self.grid, &self.field, &cells, &mut recon);
        self.cells = cells;
        self.reconstructed = Some(recon);
        self.reconstructed.as_ref().unwrap()
    }

    /// Persist the current field to the `.df` text format (spec §6).
    pub fn save_df<W: Write>(&self, writer: W) -> Result<(), DistFieldError> {
        persist::save(writer, self.grid.h, &self.field.phi).map_err(DistFieldError::from)
    }

    /// Load a `.df` file against `mesh`, running C3, C5, and C6 so the
    /// result is immediately usable by [`Engine::reconstruct`] (spec §6's
    /// "gradient availability after load" contract).
    pub fn load_df<R: BufRead>(reader: R, mut mesh: Mesh) -> Result<Self, DistFieldError> {
        if mesh.is_empty() {
            return Err(DistFieldError::EmptyMesh);
        }
        classify_borders(&mut mesh);
        let (grid, field, cells) = persist::load(reader, &mesh)?;
        Ok(Self {
            mesh,
            grid,
            field,
            cells,
            reconstructed: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

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
    fn empty_mesh_is_rejected() {
        let mesh = Mesh::default();
        assert!(matches!(
            Engine::with_resolution(mesh, 0.3),
            Err(DistFieldError::EmptyMesh)
        ));
    }

    #[test]
    fn full_pipeline_produces_a_mesh() {
        let mut engine = Engine::with_resolution(tetrahedron(), 0.2).unwrap();
        let recon = engine.reconstruct();
        assert!(!recon.triangles.is_empty());
    }

    #[test]
    fn df_round_trip_through_engine() {
        let engine = Engine::with_resolution(tetrahedron(), 0.2).unwrap();
        let mut buf = Vec::new();
        engine.save_df(&mut buf).unwrap();

        let reloaded = Engine::load_df(buf.as_slice(), tetrahedron()).unwrap();
        assert_eq!(reloaded.grid.nx, engine.grid.nx);
        assert_eq!(reloaded.field.phi.len(), engine.field.phi.len());
    }
}
