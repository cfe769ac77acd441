//! Signed distance field computation on a uniform voxel grid, from a
//! triangulated input mesh, with Surface Nets reconstruction of the
//! resulting isosurface.
//!
//! The pipeline, in order, is:
//!
//! 1. [`border`] — classify mesh vertices as border (boundary-edge) or
//!    interior.
//! 2. [`grid`] — build the voxel lattice and evaluate the signed distance
//!    field at every node, in parallel, using [`closest_point`] and
//!    [`point_to_mesh`].
//! 3. [`gradient`] — estimate the gradient of `|phi|` by finite differences.
//! 4. [`cells`] — allocate one dual-contouring cell per grid cell.
//! 5. [`surface_nets`] — reconstruct a mesh from sign changes in the
//!    gradient field.
//! 6. [`relax`] — pull each reconstructed vertex toward the isosurface.
//!
//! [`engine::Engine`] drives the whole pipeline as a single owned value, and
//! [`persist`] reads and writes the `.df` distance-field file format.

pub mod border;
pub mod cells;
pub mod closest_point;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod grid;
pub mod mesh;
pub mod persist;
pub mod point_to_mesh;
pub mod relax;
pub mod surface_nets;

pub use engine::Engine;
pub use error::DistFieldError;
pub use mesh::{Mesh, Triangle, Vertex};
pub use surface_nets::ReconstructedMesh;
