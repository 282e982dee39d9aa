//! Radial cycles (loops along an edge) and face loop cycles (loops around a face).
//!
//! Every loop sits in exactly two cycles: its face's boundary, linked through
//! `prev_loop`/`next_loop` in winding order, and its edge's radial cycle,
//! linked through `prev_radial`/`next_radial`. A border edge has a radial
//! cycle of length one.
//!
//! Traversals take handles the caller got from this graph: an out-of-range
//! handle panics like slice indexing, while a corrupt cycle is returned as
//! [`MeshError::CycleLimitExceeded`].

use std::ops::ControlFlow;

use super::cycle::{CycleKind, collect_cycle, walk_cycle};
use super::handle::{EdgeId, ElementKind, FaceId, LoopId, VertexId};
use super::records::Loop;
use super::store::MeshGraph;
use crate::mesh_error::MeshError;

impl MeshGraph {
    /// Create a loop of `face` running along `edge` from `start`, appended
    /// at the end of the face's boundary (just before `first_loop`).
    pub(crate) fn insert_loop(&mut self, face: FaceId, edge: EdgeId, start: VertexId) -> LoopId {
        let last = self
            .get_face(face)
            .first_loop
            .map(|first| self.get_loop(first).prev_loop);
        self.insert_loop_after(face, last, edge, start)
    }

    /// Create a loop of `face` running along `edge` from `start`, placed
    /// right after `after` in the face's boundary (`None` for an empty face).
    ///
    /// The loop also joins the radial cycle of `edge` and the face's
    /// element count grows by one.
    pub(crate) fn insert_loop_after(
        &mut self,
        face: FaceId,
        after: Option<LoopId>,
        edge: EdgeId,
        start: VertexId,
    ) -> LoopId {
        debug_assert!(self.get_edge(edge).contains(start));
        let id = self.next_loop_id();
        let l = self.add_loop(Loop::detached(id, face, edge, start));
        match after {
            None => self.face_mut(face).first_loop = Some(l),
            Some(prev) => {
                let next = self.get_loop(prev).next_loop;
                self.loop_mut(prev).next_loop = l;
                self.loop_mut(next).prev_loop = l;
                let rec = self.loop_mut(l);
                rec.prev_loop = prev;
                rec.next_loop = next;
            }
        }
        self.radial_append(edge, l);
        self.face_mut(face).element_count += 1;
        l
    }

    /// Add loop `l` to the radial cycle of `edge` (after its base loop) and
    /// point `l` at `edge`.
    pub(crate) fn radial_append(&mut self, edge: EdgeId, l: LoopId) {
        self.loop_mut(l).edge = edge;
        match self.get_edge(edge).base_loop {
            None => {
                let rec = self.loop_mut(l);
                rec.prev_radial = l;
                rec.next_radial = l;
                self.edge_mut(edge).base_loop = Some(l);
            }
            Some(base) => {
                let next = self.get_loop(base).next_radial;
                self.loop_mut(base).next_radial = l;
                self.loop_mut(next).prev_radial = l;
                let rec = self.loop_mut(l);
                rec.prev_radial = base;
                rec.next_radial = next;
            }
        }
    }

    /// Take loop `l` out of its edge's radial cycle, leaving it self-linked.
    ///
    /// The edge's base loop moves to the successor, or is cleared when `l`
    /// was the last loop on the edge.
    pub(crate) fn radial_remove(&mut self, l: LoopId) {
        let (edge, prev, next) = {
            let rec = self.get_loop(l);
            (rec.edge, rec.prev_radial, rec.next_radial)
        };
        if next == l {
            self.edge_mut(edge).base_loop = None;
        } else {
            self.loop_mut(prev).next_radial = next;
            self.loop_mut(next).prev_radial = prev;
            if self.get_edge(edge).base_loop == Some(l) {
                self.edge_mut(edge).base_loop = Some(next);
            }
        }
        let rec = self.loop_mut(l);
        rec.prev_radial = l;
        rec.next_radial = l;
    }

    // --- Face loop traversal ---

    /// Visit the boundary of `face` from its first loop until `pred` matches.
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of range, like [`get_face`](Self::get_face).
    /// A cycle that does not close is reported as an error instead.
    pub fn find_face_loop<P>(&self, face: FaceId, mut pred: P) -> Result<Option<LoopId>, MeshError>
    where
        P: FnMut(LoopId, &Loop) -> bool,
    {
        let Some(first) = self.get_face(face).first_loop else {
            return Ok(None);
        };
        walk_cycle(
            CycleKind::FaceLoop,
            first,
            self.slots(ElementKind::Loop),
            |l| self.get_loop(l).next_loop,
            |l| {
                if pred(l, self.get_loop(l)) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        )
    }

    /// Call `f` on every loop of `face` in winding order.
    pub fn for_each_face_loop<F>(&self, face: FaceId, mut f: F) -> Result<(), MeshError>
    where
        F: FnMut(LoopId, &Loop),
    {
        self.find_face_loop(face, |l, rec| {
            f(l, rec);
            false
        })
        .map(|_| ())
    }

    /// Loops of `face` in winding order, starting at `first_loop`.
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of range, like [`get_face`](Self::get_face).
    /// A cycle that does not close is reported as an error instead.
    pub fn face_loops(&self, face: FaceId) -> Result<Vec<LoopId>, MeshError> {
        match self.get_face(face).first_loop {
            None => Ok(Vec::new()),
            Some(first) => collect_cycle(CycleKind::FaceLoop, first, self.slots(ElementKind::Loop), |l| {
                self.get_loop(l).next_loop
            }),
        }
    }

    /// Boundary vertices of `face` in winding order.
    pub fn face_vertices(&self, face: FaceId) -> Result<Vec<VertexId>, MeshError> {
        let mut out = Vec::with_capacity(self.get_face(face).element_count);
        self.for_each_face_loop(face, |_, l| out.push(l.start_vertex))?;
        Ok(out)
    }

    /// Boundary edges of `face` in winding order.
    pub fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>, MeshError> {
        let mut out = Vec::with_capacity(self.get_face(face).element_count);
        self.for_each_face_loop(face, |_, l| out.push(l.edge))?;
        Ok(out)
    }

    // --- Radial traversal ---

    /// Visit the radial cycle of `edge` from its base loop until `pred` matches.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of range, like [`get_edge`](Self::get_edge).
    /// A cycle that does not close is reported as an error instead.
    pub fn find_radial_loop<P>(&self, edge: EdgeId, mut pred: P) -> Result<Option<LoopId>, MeshError>
    where
        P: FnMut(LoopId, &Loop) -> bool,
    {
        let Some(base) = self.get_edge(edge).base_loop else {
            return Ok(None);
        };
        walk_cycle(
            CycleKind::Radial,
            base,
            self.slots(ElementKind::Loop),
            |l| self.get_loop(l).next_radial,
            |l| {
                if pred(l, self.get_loop(l)) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        )
    }

    /// Loops running along `edge`, starting at its base loop.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of range, like [`get_edge`](Self::get_edge).
    /// A cycle that does not close is reported as an error instead.
    pub fn edge_loops(&self, edge: EdgeId) -> Result<Vec<LoopId>, MeshError> {
        match self.get_edge(edge).base_loop {
            None => Ok(Vec::new()),
            Some(base) => collect_cycle(CycleKind::Radial, base, self.slots(ElementKind::Loop), |l| {
                self.get_loop(l).next_radial
            }),
        }
    }

    /// Number of loops (faces) using `edge`.
    pub fn radial_len(&self, edge: EdgeId) -> Result<usize, MeshError> {
        let mut n = 0;
        self.find_radial_loop(edge, |_, _| {
            n += 1;
            false
        })?;
        Ok(n)
    }

    /// `true` when exactly one face uses `edge`.
    pub fn is_boundary_edge(&self, edge: EdgeId) -> Result<bool, MeshError> {
        Ok(self.radial_len(edge)? == 1)
    }
}
