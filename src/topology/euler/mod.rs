//! Euler operators: the only sanctioned way to edit a [`MeshGraph`].
//!
//! Each operator checks its input before the first write and leaves every
//! disk, radial and loop cycle closed when it returns. Operators are
//! implemented as inherent methods on [`MeshGraph`], grouped by family:
//!
//! - [`create`]: `create_vertex`, `create_edge`, `create_face`,
//!   `create_face_from_positions`
//! - [`split`]: `split_edge_and_create_vertex`
//! - [`delete`]: `delete_face`, `delete_edge`, `delete_vertex`
//!
//! [`MeshGraph`]: crate::topology::store::MeshGraph

pub mod create;
pub mod delete;
pub mod split;
