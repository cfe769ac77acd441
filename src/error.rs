//! Ambient error type for the one genuinely fallible boundary this crate
//! owns: `.df` distance-field file I/O (see [`crate::persist`]).
//!
//! Every other failure mode named in the component design (degenerate
//! grids, empty fields, malformed `.df` lines, negative squared distances)
//! is local and self-correcting per spec §7, and never surfaces as an
//! `Err`.

#[derive(Debug, thiserror::Error)]
pub enum DistFieldError {
    #[error("I/O error reading/writing distance field: {0}")]
    Io(#[from] std::io::Error),

    #[error("mesh has no triangles")]
    EmptyMesh,
}
