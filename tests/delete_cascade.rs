mod util;

use mesh_euler::prelude::*;
use util::{assert_valid, cube, p, plane, unit_square};

#[test]
fn delete_vertex_clears_a_single_face_graph() {
    for corner in 0..4 {
        let mut g = MeshGraph::new();
        let bystanders = [
            g.create_vertex(p(-5.0, 0.0, 0.0)).unwrap(),
            g.create_vertex(p(-6.0, 0.0, 0.0)).unwrap(),
        ];
        let (v, _) = unit_square(&mut g, 0.0);
        g.delete_vertex(v[corner]).unwrap();
        assert_eq!(g.face_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.loop_count(), 0);
        assert_eq!(g.live_vertices().collect::<Vec<_>>(), bystanders.to_vec());
        for b in bystanders {
            assert_eq!(g.get_vertex(b).base_edge, None);
        }
        assert_valid(&g);
    }
}

#[test]
fn create_then_delete_face_restores_counts() {
    let mut g = plane([5.0, 5.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 2);
    let loose: Vec<_> = (0..5)
        .map(|i| g.create_vertex(p(i as f64, -3.0 - (i % 2) as f64, 0.0)).unwrap())
        .collect();
    let before = g.counts();
    let f = g.create_face(&loose).unwrap();
    g.delete_face(f).unwrap();
    assert_eq!(g.counts(), before);
    for v in loose {
        assert_eq!(g.get_vertex(v).base_edge, None);
    }
    assert_valid(&g);
}

#[test]
fn delete_face_keeps_edges_used_elsewhere() {
    let mut g = plane([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 2);
    // quad (0,0) touches vertices 0, 1, 4, 3
    let f = g.live_faces().next().unwrap();
    g.delete_face(f).unwrap();
    assert_eq!(g.face_count(), 3);
    // its two border edges go, the two it shared stay
    assert_eq!(g.edge_count(), 10);
    assert_eq!(g.vertex_count(), 9);
    assert_eq!(g.get_vertex(VertexId::new(0)).base_edge, None);
    assert_eq!(g.degree(VertexId::new(4)).unwrap(), 4);
    assert_valid(&g);
}

#[test]
fn deleting_a_shared_edge_takes_both_faces() {
    let mut g = MeshGraph::new();
    let (v, _) = unit_square(&mut g, 0.0);
    let a = g.create_vertex(p(2.0, 0.0, 0.0)).unwrap();
    let b = g.create_vertex(p(2.0, 1.0, 0.0)).unwrap();
    g.create_face(&[v[3], v[2], b, a]).unwrap();
    let shared = g.edge_between(v[2], v[3]).unwrap().unwrap();
    g.delete_edge(shared).unwrap();
    assert!(g.is_empty());
    assert!(!g.is_live_edge(shared));
}

#[test]
fn deleting_a_border_edge_of_a_grid() {
    let mut g = plane([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 2);
    let border = g.edge_between(VertexId::new(0), VertexId::new(1)).unwrap().unwrap();
    g.delete_edge(border).unwrap();
    assert_eq!(g.face_count(), 3);
    assert!(!g.is_live_vertex(VertexId::new(0)));
    assert!(g.is_live_vertex(VertexId::new(1)));
    assert_eq!(g.vertex_count(), 8);
    assert_valid(&g);
}

#[test]
fn deleting_a_cube_corner_leaves_an_open_patch() {
    let mut g = cube(1);
    let corner = g
        .live_vertices()
        .find(|&v| g.position(v) == p(0.0, 0.0, 0.0))
        .unwrap();
    g.delete_vertex(corner).unwrap();
    assert_eq!(g.face_count(), 3);
    assert_eq!(g.vertex_count(), 7);
    assert_eq!(g.edge_count(), 9);
    assert_eq!(g.euler_characteristic(), 1);
    assert_valid(&g);
}

#[test]
fn deleted_handles_are_rejected() {
    let mut g = MeshGraph::new();
    let (v, f) = unit_square(&mut g, 0.0);
    let e = g.edge_between(v[0], v[1]).unwrap().unwrap();
    g.delete_face(f).unwrap();
    for err in [
        g.delete_face(f).unwrap_err(),
        g.delete_edge(e).unwrap_err(),
        g.split_edge_and_create_vertex(e, p(0.0, 0.5, 0.0)).unwrap_err(),
    ] {
        assert!(
            matches!(
                err,
                MeshError::Precondition {
                    violation: PreconditionViolation::Deleted { .. },
                    ..
                }
            ),
            "{err}"
        );
    }
    // vertices survive a face deletion and can be removed on their own
    g.delete_vertex(v[0]).unwrap();
    assert_eq!(g.vertex_count(), 3);
}
