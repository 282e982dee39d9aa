//! MeshError: unified error type for mesh-euler public APIs
//!
//! Precondition violations are reported before any mutation happens, tagged
//! with the Euler operator that rejected them. Malformed cycles discovered
//! while walking the graph abort the running operation.

use std::fmt;

use thiserror::Error;

use crate::topology::cycle::CycleKind;
use crate::topology::handle::ElementKind;
use crate::topology::validation::ValidationIssue;

/// The operator that rejected its input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EulerOp {
    CreateVertex,
    CreateEdge,
    CreateFace,
    SplitEdge,
    DeleteFace,
    DeleteEdge,
    DeleteVertex,
}

impl fmt::Display for EulerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EulerOp::CreateVertex => "create_vertex",
            EulerOp::CreateEdge => "create_edge",
            EulerOp::CreateFace => "create_face",
            EulerOp::SplitEdge => "split_edge_and_create_vertex",
            EulerOp::DeleteFace => "delete_face",
            EulerOp::DeleteEdge => "delete_edge",
            EulerOp::DeleteVertex => "delete_vertex",
        };
        f.write_str(name)
    }
}

/// What was wrong with an operator's input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreconditionViolation {
    /// A face needs at least three boundary vertices.
    #[error("a face needs at least 3 vertices, got {found}")]
    TooFewVertices { found: usize },
    /// The handle addresses a slot past the end of its arena.
    #[error("{kind} {index} is out of range (arena holds {len})")]
    OutOfRange {
        kind: ElementKind,
        index: usize,
        len: usize,
    },
    /// The handle addresses a tombstoned record.
    #[error("{kind} {index} has been deleted")]
    Deleted { kind: ElementKind, index: usize },
    /// Both endpoints of an edge are the same vertex.
    #[error("edge endpoints must differ, got vertex {vertex} twice")]
    DegenerateEdge { vertex: usize },
    /// A face boundary visits the same vertex more than once.
    #[error("vertex {vertex} appears more than once on the face boundary")]
    RepeatedVertex { vertex: usize },
    /// Positions must not contain NaN or infinity.
    #[error("position ({x}, {y}, {z}) is not finite")]
    NonFinitePosition { x: f64, y: f64, z: f64 },
}

/// Unified error type for mesh-euler operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Malformed input; the graph was not modified.
    #[error("{op}: {violation}")]
    Precondition {
        op: EulerOp,
        violation: PreconditionViolation,
    },
    /// A cycle did not return to its start; the graph is corrupt.
    #[error("{cycle} cycle starting at {start} did not close within {limit} steps")]
    CycleLimitExceeded {
        cycle: CycleKind,
        start: usize,
        limit: usize,
    },
    /// Weld grid size must be finite and strictly positive.
    #[error("weld grid size must be finite and positive, got {0}")]
    InvalidGridSize(f64),
    /// A position is too far from the origin to fit an `i64` grid cell.
    #[error("position ({x}, {y}, {z}) does not fit a weld grid of size {grid_size}")]
    PositionOutOfGrid { x: f64, y: f64, z: f64, grid_size: f64 },
    /// An invariant check failed.
    #[error("invariant violated: {0}")]
    Invariant(#[from] ValidationIssue),
}

impl MeshError {
    #[inline]
    pub(crate) fn precondition(op: EulerOp, violation: PreconditionViolation) -> Self {
        MeshError::Precondition { op, violation }
    }

    /// `true` for errors raised before any mutation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, MeshError::Precondition { .. })
    }
}
