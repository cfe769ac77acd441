//! Minimal end-to-end demo: builds a small procedural mesh, runs the
//! distance-field and Surface Nets pipeline, and writes the resulting `.df`
//! file. Takes one optional argument, the output path (defaults to
//! `icosahedron.df`).

use std::fs::File;
use std::io::BufWriter;

use glam::DVec3;
use sdf_surface_nets::{mesh::Mesh, Engine};

/// A regular icosahedron, radius 1, centered at the origin.
fn icosahedron() -> Mesh {
    let phi = (1.0 + 5.0f64.sqrt()) / 2.0;
    let raw = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ];
    let positions: Vec<DVec3> = raw
        .iter()
        .map(|&(x, y, z)| DVec3::new(x, y, z).normalize())
        .collect();

    let indices: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    Mesh::new(positions, indices)
}

fn main() {
    env_logger::init();

    let out_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "icosahedron.df".to_string());

    let mesh = icosahedron();
    let mut engine = Engine::with_resolution(mesh, 0.15).expect("mesh has triangles");
    let recon = engine.reconstruct();
    log::info!(
        "reconstructed {} vertices, {} triangles",
        recon.positions.len(),
        recon.triangles.len()
    );

    let file = File::create(&out_path).expect("failed to create output file");
    engine
        .save_df(BufWriter::new(file))
        .expect("failed to write .df file");
    log::info!("wrote distance field to {out_path}");
}
