//! Deletion operators and their cascades.
//!
//! Deleting is soft: records are tombstoned in place. The cascade runs
//! `delete_edge -> loop -> face -> loop -> edge` as plain mutual calls, and
//! every step re-reads the store after a call that may have changed it.
//!
//! Two orphan policies exist. [`MeshGraph::delete_face`] never removes
//! vertices, so it can leave holes and isolated vertices behind. Edge and
//! vertex deletion remove every vertex whose last edge disappears during the
//! cascade, which is why deleting one vertex of a lone face empties the graph.

use crate::mesh_error::{EulerOp, MeshError};
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::store::MeshGraph;

/// What to do with a vertex whose last edge was removed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Orphans {
    Keep,
    Delete,
}

impl MeshGraph {
    /// Delete `face` and its loops.
    ///
    /// Edges that no longer bound any face are removed too; edges still used
    /// by a neighbouring face stay. Vertices are never deleted here.
    pub fn delete_face(&mut self, face: FaceId) -> Result<(), MeshError> {
        self.require_face(EulerOp::DeleteFace, face)?;
        self.remove_face(face, Orphans::Keep)
    }

    /// Delete `edge`, every face running along it, and every vertex left
    /// without edges by the cascade.
    pub fn delete_edge(&mut self, edge: EdgeId) -> Result<(), MeshError> {
        self.require_edge(EulerOp::DeleteEdge, edge)?;
        self.remove_edge(edge, Orphans::Delete)
    }

    /// Delete `vertex` and everything that depends on it.
    pub fn delete_vertex(&mut self, vertex: VertexId) -> Result<(), MeshError> {
        self.require_vertex(EulerOp::DeleteVertex, vertex)?;
        while self.is_live_vertex(vertex) {
            match self.get_vertex(vertex).base_edge {
                Some(e) => self.remove_edge(e, Orphans::Delete)?,
                None => break,
            }
        }
        self.invalidate_vertex(vertex);
        log::debug!("deleted vertex {vertex}");
        Ok(())
    }

    fn remove_face(&mut self, face: FaceId, orphans: Orphans) -> Result<(), MeshError> {
        let loops = self.face_loops(face)?;
        for l in loops {
            // detached loops do not cascade back into this face
            self.loop_mut(l).face = None;
            self.delete_loop(l, orphans)?;
        }
        self.invalidate_face(face);
        log::debug!("deleted face {face}");
        Ok(())
    }

    fn delete_loop(&mut self, l: LoopId, orphans: Orphans) -> Result<(), MeshError> {
        if let Some(face) = self.get_loop(l).face {
            // a face cannot lose one boundary segment and stay a face
            return self.remove_face(face, orphans);
        }
        let edge = self.get_loop(l).edge;
        self.radial_remove(l);
        self.invalidate_loop(l);
        if self.get_edge(edge).base_loop.is_none() {
            self.remove_edge(edge, orphans)?;
        }
        Ok(())
    }

    fn remove_edge(&mut self, edge: EdgeId, orphans: Orphans) -> Result<(), MeshError> {
        while let Some(l) = self.get_edge(edge).base_loop {
            self.delete_loop(l, orphans)?;
            // the face cascade removes `edge` itself once its last loop is gone
            if !self.is_live_edge(edge) {
                return Ok(());
            }
        }
        if !self.is_live_edge(edge) {
            return Ok(());
        }
        let (a, o) = {
            let e = self.get_edge(edge);
            (e.a, e.o)
        };
        self.disk_remove_edge(a, edge);
        self.disk_remove_edge(o, edge);
        self.invalidate_edge(edge);
        log::trace!("deleted edge {edge} ({a}, {o})");

        if orphans == Orphans::Delete {
            for v in [a, o] {
                if self.is_live_vertex(v) && self.get_vertex(v).base_edge.is_none() {
                    self.invalidate_vertex(v);
                    log::trace!("deleted orphaned vertex {v}");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::records::Point3;

    fn square_at(g: &mut MeshGraph, x0: f64) -> (Vec<VertexId>, FaceId) {
        let v: Vec<_> = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            .iter()
            .map(|&(x, y)| g.create_vertex(Point3::new(x0 + x, y, 0.0)).unwrap())
            .collect();
        let f = g.create_face(&v).unwrap();
        (v, f)
    }

    #[test]
    fn delete_face_restores_isolated_vertices() {
        let mut g = MeshGraph::new();
        let (v, f) = square_at(&mut g, 0.0);
        g.delete_face(f).unwrap();
        assert_eq!(g.face_count(), 0);
        assert_eq!(g.loop_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex_count(), 4);
        for x in v {
            assert_eq!(g.get_vertex(x).base_edge, None);
        }
    }

    #[test]
    fn delete_face_twice_is_rejected() {
        let mut g = MeshGraph::new();
        let (_, f) = square_at(&mut g, 0.0);
        g.delete_face(f).unwrap();
        let err = g.delete_face(f).unwrap_err();
        assert!(matches!(err, MeshError::Precondition { op: EulerOp::DeleteFace, .. }));
    }

    #[test]
    fn delete_vertex_clears_a_single_face_graph() {
        let mut g = MeshGraph::new();
        let (v, _) = square_at(&mut g, 0.0);
        let bystander = g.create_vertex(Point3::new(9.0, 9.0, 9.0)).unwrap();
        g.delete_vertex(v[2]).unwrap();
        assert_eq!(g.face_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.loop_count(), 0);
        assert_eq!(g.live_vertices().collect::<Vec<_>>(), vec![bystander]);
    }

    #[test]
    fn delete_wire_edge_orphans_endpoints() {
        let mut g = MeshGraph::new();
        let a = g.create_vertex(Point3::ORIGIN).unwrap();
        let b = g.create_vertex(Point3::new(1.0, 0.0, 0.0)).unwrap();
        let c = g.create_vertex(Point3::new(2.0, 0.0, 0.0)).unwrap();
        let ab = g.create_edge(a, b).unwrap();
        let bc = g.create_edge(b, c).unwrap();
        g.delete_edge(ab).unwrap();
        assert!(!g.is_live_vertex(a));
        assert!(g.is_live_vertex(b));
        assert_eq!(g.get_vertex(b).base_edge, Some(bc));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn isolated_vertex_delete() {
        let mut g = MeshGraph::new();
        let a = g.create_vertex(Point3::ORIGIN).unwrap();
        g.delete_vertex(a).unwrap();
        assert!(g.is_empty());
        assert!(g.delete_vertex(a).unwrap_err().is_precondition());
    }
}
