//! Disk cycles: the circular list of edges around each vertex.
//!
//! The list is threaded through the edge records themselves. Each edge owns
//! one `prev`/`next` pair per endpoint, so the same edge sits in two disk
//! cycles at once. A vertex points into its cycle through `base_edge`.
//!
//! Traversals take handles the caller got from this graph: an out-of-range
//! handle panics like slice indexing, while a corrupt cycle is returned as
//! [`MeshError::CycleLimitExceeded`].

use std::ops::ControlFlow;

use hashbrown::HashSet;

use super::cycle::{CycleKind, collect_cycle, walk_cycle};
use super::handle::{EdgeId, ElementKind, FaceId, VertexId};
use super::records::Edge;
use super::store::MeshGraph;
use crate::mesh_error::MeshError;

impl MeshGraph {
    /// Splice `edge` into the disk cycle of `v`, right after `v`'s base edge.
    ///
    /// An isolated vertex gets `edge` as a one-element cycle and as its base.
    /// `edge` must already have `v` as an endpoint.
    pub(crate) fn disk_insert_edge(&mut self, v: VertexId, edge: EdgeId) {
        debug_assert!(self.get_edge(edge).contains(v));
        match self.get_vertex(v).base_edge {
            None => {
                self.edge_mut(edge).set_disk_links(v, edge, edge);
                self.vertex_mut(v).base_edge = Some(edge);
            }
            Some(base) => {
                // When `base` is alone in the cycle it is both the predecessor
                // and the successor of `edge`. Each write goes straight to the
                // arena so the second one sees the first.
                let next = self.get_edge(base).disk_next(v);
                self.edge_mut(base).set_disk_next(v, edge);
                self.edge_mut(next).set_disk_prev(v, edge);
                self.edge_mut(edge).set_disk_links(v, base, next);
            }
        }
        log::trace!("disk insert: edge {edge} at vertex {v}");
    }

    /// Splice `edge` out of the disk cycle of `v`.
    ///
    /// The vertex becomes isolated when `edge` was its last edge; a base edge
    /// that is removed is replaced by its successor. `edge` is left
    /// self-linked at `v`.
    pub(crate) fn disk_remove_edge(&mut self, v: VertexId, edge: EdgeId) {
        let (prev, next) = {
            let e = self.get_edge(edge);
            (e.disk_prev(v), e.disk_next(v))
        };
        if next == edge {
            self.vertex_mut(v).base_edge = None;
        } else {
            self.edge_mut(prev).set_disk_next(v, next);
            self.edge_mut(next).set_disk_prev(v, prev);
            if self.get_vertex(v).base_edge == Some(edge) {
                self.vertex_mut(v).base_edge = Some(next);
            }
        }
        self.edge_mut(edge).set_disk_links(v, edge, edge);
        log::trace!("disk remove: edge {edge} at vertex {v}");
    }

    /// Visit the disk cycle of `v` from its base edge until `pred` matches.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range, like [`get_vertex`](Self::get_vertex).
    /// A cycle that does not close is reported as an error instead.
    pub fn find_disk_edge<P>(&self, v: VertexId, mut pred: P) -> Result<Option<EdgeId>, MeshError>
    where
        P: FnMut(EdgeId, &Edge) -> bool,
    {
        let Some(base) = self.get_vertex(v).base_edge else {
            return Ok(None);
        };
        walk_cycle(
            CycleKind::Disk,
            base,
            self.slots(ElementKind::Edge),
            |e| self.get_edge(e).disk_next(v),
            |e| {
                if pred(e, self.get_edge(e)) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        )
    }

    /// Call `f` on every edge around `v`, starting at its base edge.
    pub fn for_each_disk_edge<F>(&self, v: VertexId, mut f: F) -> Result<(), MeshError>
    where
        F: FnMut(EdgeId, &Edge),
    {
        self.find_disk_edge(v, |e, rec| {
            f(e, rec);
            false
        })
        .map(|_| ())
    }

    /// Edges around `v` in disk order, starting at its base edge.
    ///
    /// # Panics
    ///
    /// Panics if `v` is out of range, like [`get_vertex`](Self::get_vertex).
    /// A cycle that does not close is reported as an error instead.
    pub fn disk_edges(&self, v: VertexId) -> Result<Vec<EdgeId>, MeshError> {
        match self.get_vertex(v).base_edge {
            None => Ok(Vec::new()),
            Some(base) => collect_cycle(CycleKind::Disk, base, self.slots(ElementKind::Edge), |e| {
                self.get_edge(e).disk_next(v)
            }),
        }
    }

    /// Number of edges incident to `v`.
    pub fn degree(&self, v: VertexId) -> Result<usize, MeshError> {
        let mut n = 0;
        self.for_each_disk_edge(v, |_, _| n += 1)?;
        Ok(n)
    }

    /// The edge joining `a` and `o`, if one exists.
    ///
    /// # Panics
    ///
    /// Panics if `a` is out of range, like [`get_vertex`](Self::get_vertex).
    /// A cycle that does not close is reported as an error instead.
    pub fn edge_between(&self, a: VertexId, o: VertexId) -> Result<Option<EdgeId>, MeshError> {
        self.find_disk_edge(a, |_, e| e.connects(a, o))
    }

    /// Faces that have `v` on their boundary, each listed once, in disk order.
    pub fn vertex_faces(&self, v: VertexId) -> Result<Vec<FaceId>, MeshError> {
        let mut seen = HashSet::new();
        let mut faces = Vec::new();
        for e in self.disk_edges(v)? {
            for l in self.edge_loops(e)? {
                if let Some(f) = self.get_loop(l).face {
                    if seen.insert(f) {
                        faces.push(f);
                    }
                }
            }
        }
        Ok(faces)
    }
}
