//! Creation operators: vertices, edges and faces.

use hashbrown::HashSet;
use itertools::Itertools;

use crate::mesh_error::{EulerOp, MeshError, PreconditionViolation};
use crate::topology::handle::{EdgeId, FaceId, VertexId};
use crate::topology::records::{Edge, Face, Point3, Vertex};
use crate::topology::store::MeshGraph;

pub(crate) fn check_position(op: EulerOp, p: Point3) -> Result<(), MeshError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(MeshError::precondition(
            op,
            PreconditionViolation::NonFinitePosition {
                x: p.x,
                y: p.y,
                z: p.z,
            },
        ))
    }
}

impl MeshGraph {
    /// Add an isolated vertex at `position`.
    pub fn create_vertex(&mut self, position: Point3) -> Result<VertexId, MeshError> {
        check_position(EulerOp::CreateVertex, position)?;
        Ok(self.add_vertex(Vertex::new(position)))
    }

    /// Connect `a` and `o` with an edge.
    ///
    /// The graph never holds two edges between the same pair of vertices: if
    /// `a` and `o` are already connected, the existing edge is returned.
    pub fn create_edge(&mut self, a: VertexId, o: VertexId) -> Result<EdgeId, MeshError> {
        let op = EulerOp::CreateEdge;
        self.require_vertex(op, a)?;
        self.require_vertex(op, o)?;
        if a == o {
            return Err(MeshError::precondition(
                op,
                PreconditionViolation::DegenerateEdge { vertex: a.index() },
            ));
        }
        self.link_edge(a, o)
    }

    /// Build a face bounded by `vertices` in winding order.
    ///
    /// One edge is created (or reused) per consecutive pair, closing back to
    /// the first vertex, then one loop per vertex. Input is checked in full
    /// before anything is written, so a precondition error leaves the graph
    /// untouched. A [`MeshError::CycleLimitExceeded`] from an already corrupt
    /// disk cycle aborts mid-way and keeps the edges linked so far.
    pub fn create_face(&mut self, vertices: &[VertexId]) -> Result<FaceId, MeshError> {
        let op = EulerOp::CreateFace;
        if vertices.len() < 3 {
            return Err(MeshError::precondition(
                op,
                PreconditionViolation::TooFewVertices {
                    found: vertices.len(),
                },
            ));
        }
        let mut seen = HashSet::with_capacity(vertices.len());
        for &v in vertices {
            self.require_vertex(op, v)?;
            if !seen.insert(v) {
                return Err(MeshError::precondition(
                    op,
                    PreconditionViolation::RepeatedVertex { vertex: v.index() },
                ));
            }
        }

        let edges: Vec<EdgeId> = vertices
            .iter()
            .circular_tuple_windows::<(_, _)>()
            .map(|(&a, &o)| self.link_edge(a, o))
            .collect::<Result<_, _>>()?;

        let face = self.add_face(Face::new());
        for (&v, &e) in vertices.iter().zip(&edges) {
            self.insert_loop(face, e, v);
        }
        log::debug!("created face {face} with {} vertices", vertices.len());
        Ok(face)
    }

    /// Create one fresh vertex per position, then a face through them.
    pub fn create_face_from_positions(&mut self, positions: &[Point3]) -> Result<FaceId, MeshError> {
        let op = EulerOp::CreateFace;
        if positions.len() < 3 {
            return Err(MeshError::precondition(
                op,
                PreconditionViolation::TooFewVertices {
                    found: positions.len(),
                },
            ));
        }
        for &p in positions {
            check_position(op, p)?;
        }
        let vertices: Vec<VertexId> = positions
            .iter()
            .map(|&p| self.add_vertex(Vertex::new(p)))
            .collect();
        self.create_face(&vertices)
    }

    /// Return the edge between `a` and `o`, creating and disk-linking it if
    /// needed. Endpoints are assumed live and distinct.
    pub(crate) fn link_edge(&mut self, a: VertexId, o: VertexId) -> Result<EdgeId, MeshError> {
        if let Some(existing) = self.edge_between(a, o)? {
            log::trace!("reusing edge {existing} between {a} and {o}");
            return Ok(existing);
        }
        let id = self.next_edge_id();
        let e = self.add_edge(Edge::isolated(id, a, o));
        self.disk_insert_edge(a, e);
        self.disk_insert_edge(o, e);
        Ok(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::handle::ElementKind;

    fn square(g: &mut MeshGraph) -> Vec<VertexId> {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            .iter()
            .map(|&(x, y)| g.create_vertex(Point3::new(x, y, 0.0)).unwrap())
            .collect()
    }

    #[test]
    fn create_edge_reuses_existing_pair() {
        let mut g = MeshGraph::new();
        let v = square(&mut g);
        let e = g.create_edge(v[0], v[1]).unwrap();
        assert_eq!(g.create_edge(v[1], v[0]).unwrap(), e);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn create_edge_rejects_degenerate_and_dead_endpoints() {
        let mut g = MeshGraph::new();
        let v = square(&mut g);
        let err = g.create_edge(v[2], v[2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::precondition(
                EulerOp::CreateEdge,
                PreconditionViolation::DegenerateEdge { vertex: 2 }
            )
        );
        let err = g.create_edge(v[0], VertexId::new(9)).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Precondition {
                op: EulerOp::CreateEdge,
                violation: PreconditionViolation::OutOfRange {
                    kind: ElementKind::Vertex,
                    index: 9,
                    len: 4
                }
            }
        ));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn create_face_counts() {
        let mut g = MeshGraph::new();
        let v = square(&mut g);
        let f = g.create_face(&v).unwrap();
        assert_eq!(g.face_count(), 1);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.loop_count(), 4);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.get_face(f).element_count, 4);
        assert_eq!(g.face_vertices(f).unwrap(), v);
    }

    #[test]
    fn create_face_is_all_or_nothing() {
        let mut g = MeshGraph::new();
        let v = square(&mut g);
        let err = g.create_face(&v[..2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::precondition(
                EulerOp::CreateFace,
                PreconditionViolation::TooFewVertices { found: 2 }
            )
        );
        let err = g.create_face(&[v[0], v[1], v[2], v[1]]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Precondition {
                violation: PreconditionViolation::RepeatedVertex { vertex: 1 },
                ..
            }
        ));
        let err = g.create_face(&[v[0], v[1], VertexId::new(40)]).unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.face_count(), 0);
        assert_eq!(g.loop_count(), 0);
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut g = MeshGraph::new();
        let err = g
            .create_vertex(Point3::new(0.0, f64::INFINITY, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            MeshError::Precondition {
                op: EulerOp::CreateVertex,
                violation: PreconditionViolation::NonFinitePosition { .. }
            }
        ));
        let err = g
            .create_face_from_positions(&[
                Point3::ORIGIN,
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(f64::NAN, 1.0, 0.0),
            ])
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(g.is_empty());
    }

    #[test]
    fn face_from_positions_creates_fresh_vertices() {
        let mut g = MeshGraph::new();
        let f = g
            .create_face_from_positions(&[
                Point3::ORIGIN,
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ])
            .unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.get_face(f).element_count, 3);
    }

    #[test]
    fn corrupt_disk_cycle_aborts_face_creation() {
        let mut g = MeshGraph::new();
        let hub = g.create_vertex(Point3::ORIGIN).unwrap();
        for i in 1..=3 {
            let s = g.create_vertex(Point3::new(i as f64, 1.0, 0.0)).unwrap();
            g.create_edge(hub, s).unwrap();
        }
        // the hub's disk cycle now spins between its last two edges
        let around = g.disk_edges(hub).unwrap();
        g.edge_mut(around[2]).set_disk_next(hub, around[1]);

        let w = g.create_vertex(Point3::new(0.0, -1.0, 0.0)).unwrap();
        let u = g.create_vertex(Point3::new(1.0, -1.0, 0.0)).unwrap();
        let before = g.edge_count();
        let err = g.create_face(&[w, hub, u]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::CycleLimitExceeded {
                cycle: crate::topology::cycle::CycleKind::Disk,
                ..
            }
        ));
        assert!(!err.is_precondition());
        // the w-hub edge was linked before the walk around the hub failed
        assert_eq!(g.edge_count(), before + 1);
        assert_eq!(g.face_count(), 0);
        assert_eq!(g.loop_count(), 0);
    }
}
