//! Plain topology records stored by value in the [`MeshGraph`] arenas.
//!
//! Records reference each other only through typed handles. A record is
//! *live* when its own `id` equals its arena slot; invalidation clears `id`
//! and leaves the slot allocated (a tombstone).
//!
//! [`MeshGraph`]: crate::topology::store::MeshGraph

use super::handle::{EdgeId, FaceId, LoopId, VertexId};

/// A point in 3D space.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    /// `true` when no coordinate is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3::new(
            0.5 * (self.x + other.x),
            0.5 * (self.y + other.y),
            0.5 * (self.z + other.z),
        )
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3::new(x, y, z)
    }
}

impl From<Point3> for [f64; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// A mesh vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Own handle; `None` once invalidated.
    pub id: Option<VertexId>,
    pub position: Point3,
    /// Any edge of this vertex's disk cycle, `None` for an isolated vertex.
    pub base_edge: Option<EdgeId>,
}

impl Vertex {
    /// An isolated vertex at `position`.
    pub fn new(position: Point3) -> Self {
        Vertex {
            id: None,
            position,
            base_edge: None,
        }
    }
}

/// An undirected edge between vertices `a` and `o`.
///
/// The edge threads two disk cycles: `a_prev`/`a_next` link it into the
/// cycle around `a`, `o_prev`/`o_next` into the cycle around `o`.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// Own handle; `None` once invalidated.
    pub id: Option<EdgeId>,
    pub a: VertexId,
    pub o: VertexId,
    /// Any loop of this edge's radial cycle, `None` for a wire edge.
    pub base_loop: Option<LoopId>,
    pub a_prev: EdgeId,
    pub a_next: EdgeId,
    pub o_prev: EdgeId,
    pub o_next: EdgeId,
}

impl Edge {
    /// An edge `id` between `a` and `o` whose disk links all point at itself.
    pub fn isolated(id: EdgeId, a: VertexId, o: VertexId) -> Self {
        Edge {
            id: Some(id),
            a,
            o,
            base_loop: None,
            a_prev: id,
            a_next: id,
            o_prev: id,
            o_next: id,
        }
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.a == v || self.o == v
    }

    #[inline]
    pub fn connects(&self, v: VertexId, w: VertexId) -> bool {
        (self.a == v && self.o == w) || (self.a == w && self.o == v)
    }

    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    #[inline]
    pub fn other(&self, v: VertexId) -> Option<VertexId> {
        if self.a == v {
            Some(self.o)
        } else if self.o == v {
            Some(self.a)
        } else {
            None
        }
    }

    /// Successor of this edge in the disk cycle of `v`.
    #[inline]
    pub fn disk_next(&self, v: VertexId) -> EdgeId {
        debug_assert!(self.contains(v), "vertex {v} is not an endpoint");
        if self.a == v { self.a_next } else { self.o_next }
    }

    /// Predecessor of this edge in the disk cycle of `v`.
    #[inline]
    pub fn disk_prev(&self, v: VertexId) -> EdgeId {
        debug_assert!(self.contains(v), "vertex {v} is not an endpoint");
        if self.a == v { self.a_prev } else { self.o_prev }
    }

    #[inline]
    pub(crate) fn set_disk_next(&mut self, v: VertexId, next: EdgeId) {
        debug_assert!(self.contains(v));
        if self.a == v {
            self.a_next = next;
        } else {
            self.o_next = next;
        }
    }

    #[inline]
    pub(crate) fn set_disk_prev(&mut self, v: VertexId, prev: EdgeId) {
        debug_assert!(self.contains(v));
        if self.a == v {
            self.a_prev = prev;
        } else {
            self.o_prev = prev;
        }
    }

    #[inline]
    pub(crate) fn set_disk_links(&mut self, v: VertexId, prev: EdgeId, next: EdgeId) {
        self.set_disk_prev(v, prev);
        self.set_disk_next(v, next);
    }
}

/// One boundary segment of a face: starts at `start_vertex` and runs along `edge`.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    /// Own handle; `None` once invalidated.
    pub id: Option<LoopId>,
    /// Owning face. Cleared while the face is being torn down.
    pub face: Option<FaceId>,
    pub edge: EdgeId,
    pub start_vertex: VertexId,
    pub prev_loop: LoopId,
    pub next_loop: LoopId,
    pub prev_radial: LoopId,
    pub next_radial: LoopId,
}

impl Loop {
    /// A loop `id` of `face` whose face and radial links point at itself.
    pub fn detached(id: LoopId, face: FaceId, edge: EdgeId, start_vertex: VertexId) -> Self {
        Loop {
            id: Some(id),
            face: Some(face),
            edge,
            start_vertex,
            prev_loop: id,
            next_loop: id,
            prev_radial: id,
            next_radial: id,
        }
    }
}

/// A polygonal face bounded by a cycle of loops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
    /// Own handle; `None` once invalidated.
    pub id: Option<FaceId>,
    pub first_loop: Option<LoopId>,
    /// Number of loops (equivalently vertices or edges) on the boundary.
    pub element_count: usize,
}

impl Face {
    /// A face with an empty boundary, to be filled by loop insertion.
    pub fn new() -> Self {
        Face::default()
    }
}
