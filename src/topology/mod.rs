//! Top-level module for the editable surface topology.
//!
//! This module provides the arena store and the cycle machinery that Euler
//! operators build on. It includes:
//! - Typed handles and plain records for vertices, edges, loops and faces
//! - [`MeshGraph`], the tombstoning arena store
//! - Disk cycles (edges around a vertex), radial cycles (loops along an edge)
//!   and face loop cycles (loops around a face)
//! - Euler operators for creating, splitting and deleting elements
//! - Read-only validation of every structural invariant
//!
//! Most users will build a [`MeshGraph`] through the Euler operators and walk
//! it with the traversal helpers (`face_vertices`, `disk_edges`, `edge_loops`).

pub mod cycle;
pub mod disk;
pub mod euler;
pub mod handle;
pub mod radial;
pub mod records;
pub mod store;
pub mod validation;

pub use cycle::CycleKind;
pub use handle::{EdgeId, ElementKind, FaceId, Handle, LoopId, VertexId};
pub use records::{Edge, Face, Loop, Point3, Vertex};
pub use store::{LiveCounts, MeshGraph};

#[cfg(test)]
mod tests;
