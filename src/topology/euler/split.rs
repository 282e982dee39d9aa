//! Split an edge in two by inserting a vertex on it.
//!
//! For edge `e = (keep, other)` and a new vertex `v`, the result is the
//! original edge `e = (keep, v)` plus an inserted edge `(v, other)`. The
//! inserted edge takes over `e`'s slot in `other`'s disk cycle, so no other
//! vertex's disk order or base edge changes except where `other` pointed at
//! `e`. Every face that ran along `e` gains one loop starting at `v`.

use super::create::check_position;
use crate::mesh_error::{EulerOp, MeshError};
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::records::{Edge, Point3, Vertex};
use crate::topology::store::MeshGraph;

impl MeshGraph {
    /// Insert a new vertex at `position` on `edge`.
    ///
    /// Returns the inserted edge; the new vertex is its `a` endpoint and the
    /// original edge keeps the endpoint whose `base_edge` pointed at it.
    /// Assumes at most two faces share `edge`.
    pub fn split_edge_and_create_vertex(
        &mut self,
        edge: EdgeId,
        position: Point3,
    ) -> Result<EdgeId, MeshError> {
        let op = EulerOp::SplitEdge;
        check_position(op, position)?;
        let (a, o) = {
            let e = self.require_edge(op, edge)?;
            (e.a, e.o)
        };
        let (keep, other) = if self.get_vertex(a).base_edge == Some(edge) {
            (a, o)
        } else if self.get_vertex(o).base_edge == Some(edge) {
            (o, a)
        } else {
            (a, o)
        };
        // Read everything that walks the graph before the first write.
        let radial = self.edge_loops(edge)?;
        let (other_prev, other_next) = {
            let e = self.get_edge(edge);
            (e.disk_prev(other), e.disk_next(other))
        };

        let v = self.add_vertex(Vertex::new(position));
        let id = self.next_edge_id();
        let inserted = self.add_edge(Edge::isolated(id, v, other));

        // `inserted` takes over `edge`'s place around `other`.
        if other_next != edge {
            self.edge_mut(inserted)
                .set_disk_links(other, other_prev, other_next);
            self.edge_mut(other_prev).set_disk_next(other, inserted);
            self.edge_mut(other_next).set_disk_prev(other, inserted);
        }
        if self.get_vertex(other).base_edge == Some(edge) {
            self.vertex_mut(other).base_edge = Some(inserted);
        }

        // Re-point the original edge from `other` to `v`; around `v` the two
        // edges are each other's only neighbours.
        {
            let e = self.edge_mut(edge);
            if e.a == other {
                e.a = v;
            } else {
                e.o = v;
            }
            e.set_disk_links(v, inserted, inserted);
        }
        self.edge_mut(inserted).set_disk_links(v, edge, edge);
        self.vertex_mut(v).base_edge = Some(edge);

        for l in radial {
            self.split_loop(l, keep, other, edge, inserted, v);
        }

        log::debug!("split edge {edge} at new vertex {v}; inserted edge {inserted}");
        Ok(inserted)
    }

    /// Give the face owning `l` one extra loop starting at `v`.
    ///
    /// A loop running `keep -> other` stays on `edge` and is followed by a
    /// new loop `v -> other` on `inserted`. A loop running `other -> keep`
    /// moves onto `inserted` and is followed by a new loop `v -> keep` on
    /// `edge`. Either way the face keeps its winding order.
    fn split_loop(
        &mut self,
        l: LoopId,
        keep: VertexId,
        other: VertexId,
        edge: EdgeId,
        inserted: EdgeId,
        v: VertexId,
    ) {
        let (face, start): (Option<FaceId>, VertexId) = {
            let rec = self.get_loop(l);
            (rec.face, rec.start_vertex)
        };
        let Some(face) = face else {
            return;
        };
        if start == keep {
            self.insert_loop_after(face, Some(l), inserted, v);
        } else {
            debug_assert_eq!(start, other);
            self.radial_remove(l);
            self.radial_append(inserted, l);
            self.insert_loop_after(face, Some(l), edge, v);
        }
    }
}
