#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-euler
//!
//! mesh-euler is an in-memory, editable polygon-surface topology engine. A
//! [`MeshGraph`](topology::MeshGraph) stores vertices, edges, loops and faces in
//! per-kind arenas and links them through three families of circular lists:
//! disk cycles (edges around a vertex), radial cycles (face boundary segments
//! along an edge) and face loop cycles (boundary segments around a face).
//!
//! ## Features
//! - Typed `u32` handles and tombstoning arenas; nothing is reference counted
//! - Euler operators that keep every cycle intact: create vertex/edge/face,
//!   split an edge at a new vertex, and cascading delete of faces, edges and vertices
//! - Grid-quantized weld of several graphs into one ([`algs::weld`])
//! - A read-only validator for every structural invariant, wired into the
//!   [`DebugInvariants`] trait
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-euler = "0.3"
//! # Optional features:
//! # features = ["rayon", "strict-invariants"]
//! ```
//!
//! ```
//! use mesh_euler::prelude::*;
//!
//! let mut g = MeshGraph::new();
//! let f = g
//!     .create_face_from_positions(&[
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!     ])
//!     .unwrap();
//! let e = g.face_edges(f).unwrap()[0];
//! g.split_edge_and_create_vertex(e, Point3::new(0.0, 0.5, 0.0)).unwrap();
//! assert_eq!(g.get_face(f).element_count, 5);
//! assert!(g.is_valid());
//! ```
//!
//! ## Errors
//!
//! Operators check their input before writing anything and report a
//! [`MeshError::Precondition`](mesh_error::MeshError::Precondition) tagged with
//! the operator. A cycle that never returns to its start is reported as
//! [`MeshError::CycleLimitExceeded`](mesh_error::MeshError::CycleLimitExceeded)
//! and aborts the operation.
//!
//! ## Threading
//!
//! A graph has no internal locking: share it between readers, or give one
//! writer exclusive access. With the `rayon` feature, the weld quantizes
//! positions in parallel; all cycle linking stays sequential.

pub mod algs;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::weld::{WeldOptions, combine, combine_with};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::{EulerOp, MeshError, PreconditionViolation};
    pub use crate::topology::validation::{NonManifoldHandling, ValidationIssue, ValidationOptions};
    pub use crate::topology::{
        CycleKind, Edge, EdgeId, ElementKind, Face, FaceId, Handle, LiveCounts, Loop, LoopId,
        MeshGraph, Point3, Vertex, VertexId,
    };
}
