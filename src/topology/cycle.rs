//! Bounded walking of circular linked lists.
//!
//! Disk, radial and face-loop cycles are all threaded through arena records.
//! [`walk_cycle`] follows one of them from a known member and refuses to spin
//! forever: a cycle that has not returned to its start after `limit` steps is
//! corrupt and yields [`MeshError::CycleLimitExceeded`].

use std::fmt;
use std::ops::ControlFlow;

use super::handle::Handle;
use crate::mesh_error::MeshError;

/// The three cycle kinds maintained by the graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CycleKind {
    /// Edges around a vertex.
    Disk,
    /// Loops along an edge.
    Radial,
    /// Loops bounding a face.
    FaceLoop,
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleKind::Disk => "disk",
            CycleKind::Radial => "radial",
            CycleKind::FaceLoop => "face loop",
        };
        f.write_str(name)
    }
}

/// Walk a cycle starting at `start`.
///
/// `visit` is called on each member in order; returning
/// [`ControlFlow::Break`] stops the walk and yields `Ok(Some(member))`.
/// Returning to `start` yields `Ok(None)`. `limit` is the maximum number of
/// members a well-formed cycle can have (callers pass the arena length).
pub(crate) fn walk_cycle<H, S, V>(
    kind: CycleKind,
    start: H,
    limit: usize,
    mut step: S,
    mut visit: V,
) -> Result<Option<H>, MeshError>
where
    H: Handle,
    S: FnMut(H) -> H,
    V: FnMut(H) -> ControlFlow<()>,
{
    let limit = limit.max(1);
    let mut current = start;
    for _ in 0..limit {
        if visit(current).is_break() {
            return Ok(Some(current));
        }
        current = step(current);
        if current == start {
            return Ok(None);
        }
    }
    Err(MeshError::CycleLimitExceeded {
        cycle: kind,
        start: start.index(),
        limit,
    })
}

/// Collect every member of a cycle in traversal order.
pub(crate) fn collect_cycle<H, S>(
    kind: CycleKind,
    start: H,
    limit: usize,
    step: S,
) -> Result<Vec<H>, MeshError>
where
    H: Handle,
    S: FnMut(H) -> H,
{
    let mut members = Vec::new();
    walk_cycle(kind, start, limit, step, |h| {
        members.push(h);
        ControlFlow::Continue(())
    })?;
    Ok(members)
}
