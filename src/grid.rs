//! C4: the uniform voxel grid `G` and the parallel grid evaluator.
//!
//! Grounded in `original_source/src/distcalc.cpp`'s `Grid2Mesh` (the
//! `#ifndef USE_PTHREADS` / OpenMP branch — the pthreads fallback is dead
//! code in the source, never compiled by default, and is not ported). The
//! outer-index parallel-for is reimplemented with `rayon` rather than
//! OpenMP, matching the teacher crate's own reliance on `rayon` in its
//! example/bench harness and the downstream consumer that depends on both
//! `fast-surface-nets` and `rayon` together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use glam::DVec3;
use rayon::prelude::*;

use crate::mesh::Mesh;
use crate::point_to_mesh::point_to_mesh_distance;

/// The axis-aligned lattice described in spec §3: origin `min`, uniform
/// spacing `h`, and `(nx, ny, nz)` *cells* along each axis (so there are
/// `nx+1` grid nodes along x, etc).
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub min: DVec3,
    pub h: f64,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

fn cell_count_along_axis(lo: f64, hi: f64, h: f64) -> usize {
    // also rejects NaN, which `h <= 0.0` would not.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    if !(h > 0.0) {
        return 0;
    }
    let raw = (hi - lo) / h + 1.0;
    if !raw.is_finite() || raw < 1.0 {
        0
    } else {
        raw.floor() as usize
    }
}

impl Grid {
    /// Build the grid by expanding `mesh`'s bounding box outward by one
    /// cell of size `h` on every face, then deriving `(nx, ny, nz)` from
    /// the expanded box (spec §3's invariant).
    pub fn from_mesh(mesh: &Mesh, h: f64) -> Self {
        let (bb_min, bb_max) = mesh.bounding_box();
        let expand = DVec3::splat(h);
        let min = bb_min - expand;
        let max = bb_max + expand;
        Self {
            min,
            h,
            nx: cell_count_along_axis(min.x, max.x, h),
            ny: cell_count_along_axis(min.y, max.y, h),
            nz: cell_count_along_axis(min.z, max.z, h),
        }
    }

    /// Rebuild `(nx, ny, nz)` for a new cell size `h` against `mesh`'s
    /// current bounding box, without moving `min`. Used by [`crate::persist::load`]
    /// to restore a persisted field's dimensions against the live mesh.
    pub fn with_resolution(mesh: &Mesh, h: f64) -> Self {
        Self::from_mesh(mesh, h)
    }

    pub fn is_degenerate(&self) -> bool {
        self.nx < 1 || self.ny < 1 || self.nz < 1
    }

    pub fn node_count(&self) -> usize {
        (self.nx + 1) * (self.ny + 1) * (self.nz + 1)
    }

    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    #[inline]
    pub fn node_index(&self, i: usize, j: usize, k: usize) -> usize {
        (self.nx + 1) * (self.ny + 1) * k + (self.nx + 1) * j + i
    }

    #[inline]
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        self.nx * self.ny * k + self.nx * j + i
    }

    /// Inverse of [`Self::node_index`].
    #[inline]
    fn delinearize_node(&self, idx: usize) -> (usize, usize, usize) {
        let stride_x = self.nx + 1;
        let stride_xy = stride_x * (self.ny + 1);
        let k = idx / stride_xy;
        let rem = idx % stride_xy;
        let j = rem / stride_x;
        let i = rem % stride_x;
        (i, j, k)
    }

    #[inline]
    pub fn node_position(&self, i: usize, j: usize, k: usize) -> DVec3 {
        self.min + DVec3::new(i as f64, j as f64, k as f64) * self.h
    }

    #[inline]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        self.min + (DVec3::new(i as f64, j as f64, k as f64) + DVec3::splat(0.5)) * self.h
    }
}

/// The per-node field arrays produced by the grid evaluator: signed
/// distance, analytic gradient direction, and the border flag of the
/// closest surface point.
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub phi: Vec<f64>,
    pub grad: Vec<DVec3>,
    pub border: Vec<bool>,
}

impl Field {
    fn empty() -> Self {
        Self {
            phi: Vec::new(),
            grad: Vec::new(),
            border: Vec::new(),
        }
    }
}

/// C4: evaluate the signed distance field over every node of `grid`
/// against `mesh`, in parallel. Returns empty arrays without touching
/// anything if the grid is degenerate (spec §7).
pub fn evaluate_grid(mesh: &Mesh, grid: &Grid) -> Field {
    if grid.is_degenerate() {
        return Field::empty();
    }

    let node_count = grid.node_count();
    let mut phi = vec![0.0f64; node_count];
    let mut grad = vec![DVec3::ZERO; node_count];
    let mut border = vec![false; node_count];

    log::info!(
        "grid evaluation starting: {} triangles, {} vertices, h={}, nodes={}",
        mesh.triangles.len(),
        mesh.vertices.len(),
        grid.h,
        node_count,
    );
    let started = Instant::now();

    // Best-effort progress: rate-limited to roughly 101 updates, with no
    // synchronization beyond a single atomic counter (spec §5). Below
    // 1000 nodes the original source skips progress reporting entirely.
    let progress = AtomicUsize::new(0);
    let report_every = (node_count / 100).max(1);

    phi.par_iter_mut()
        .zip(grad.par_iter_mut())
        .zip(border.par_iter_mut())
        .enumerate()
        .for_each(|(idx, ((phi_out, grad_out), border_out))| {
            let (i, j, k) = grid.delinearize_node(idx);
            let p = grid.node_position(i, j, k);
            let result = point_to_mesh_distance(p, mesh);

            *phi_out = result.signed_distance;

            let tri = &mesh.triangles[result.closest_triangle as usize];
            let (v1, v2, v3) = mesh.triangle_positions(tri);
            let e0 = v2 - v1;
            let e1 = v3 - v1;
            let footprint = v1 + result.s * e0 + result.t * e1;
            let direction = p - footprint;
            *grad_out = if direction != DVec3::ZERO {
                direction.normalize()
            } else {
                DVec3::ZERO
            };

            *border_out = result.on_border;

            if node_count >= 1000 {
                let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
                if done.is_multiple_of(report_every) || done == node_count {
                    log::debug!("grid evaluation progress: {done}/{node_count}");
                }
            }
        });

    log::info!(
        "grid evaluation finished in {:.3}s",
        started.elapsed().as_secs_f64()
    );

    Field { phi, grad, border }
}
