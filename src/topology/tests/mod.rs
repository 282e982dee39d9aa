
use crate::topology::handle::{FaceId, VertexId};
use crate::topology::records::Point3;
use crate::topology::store::MeshGraph;

/// Two unit squares sharing the edge `v2 - v3`:
///
/// ```text
/// v1 -- v2 -- v5
/// |  f0  |  f1  |
/// v0 -- v3 -- v4
/// ```
fn strip() -> (MeshGraph, Vec<VertexId>, [FaceId; 2]) {
    let mut g = MeshGraph::new();
    let v: Vec<_> = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]
        .iter()
        .map(|&(x, y)| g.create_vertex(Point3::new(x, y, 0.0)).unwrap())
        .collect();
    let f0 = g.create_face(&[v[0], v[1], v[2], v[3]]).unwrap();
    let f1 = g.create_face(&[v[3], v[2], v[5], v[4]]).unwrap();
    (g, v, [f0, f1])
}
