#![allow(dead_code)]
use mesh_euler::prelude::*;

pub fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Unit square `v0(0,0) v1(0,1) v2(1,1) v3(1,0)` in the z = 0 plane,
/// shifted by `dx` along x.
pub fn unit_square(g: &mut MeshGraph, dx: f64) -> (Vec<VertexId>, FaceId) {
    let v: Vec<_> = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
        .iter()
        .map(|&(x, y)| g.create_vertex(p(dx + x, y, 0.0)).unwrap())
        .collect();
    let f = g.create_face(&v).unwrap();
    (v, f)
}

/// An `n x n` grid of quads spanning `origin + s*u + t*v` for `s, t` in `[0, 1]`.
///
/// Quads wind `(i,j) (i+1,j) (i+1,j+1) (i,j+1)`, so their normal is `u x v`.
/// Vertices are numbered row by row: `index(i, j) = j * (n + 1) + i`.
pub fn plane(origin: [f64; 3], u: [f64; 3], v: [f64; 3], n: usize) -> MeshGraph {
    let mut g = MeshGraph::new();
    let step = 1.0 / n as f64;
    let mut ids = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let (s, t) = (i as f64 * step, j as f64 * step);
            let at = |k: usize| origin[k] + s * u[k] + t * v[k];
            ids.push(g.create_vertex(p(at(0), at(1), at(2))).unwrap());
        }
    }
    let idx = |i: usize, j: usize| ids[j * (n + 1) + i];
    for j in 0..n {
        for i in 0..n {
            g.create_face(&[idx(i, j), idx(i + 1, j), idx(i + 1, j + 1), idx(i, j + 1)])
                .unwrap();
        }
    }
    g
}

/// The six outward-facing sides of the unit cube, each an `n x n` plane.
pub fn cube_sides(n: usize) -> Vec<MeshGraph> {
    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];
    vec![
        plane([0.0, 0.0, 0.0], Y, X, n), // z = 0
        plane([0.0, 0.0, 1.0], X, Y, n), // z = 1
        plane([0.0, 0.0, 0.0], X, Z, n), // y = 0
        plane([0.0, 1.0, 0.0], Z, X, n), // y = 1
        plane([0.0, 0.0, 0.0], Z, Y, n), // x = 0
        plane([1.0, 0.0, 0.0], Y, Z, n), // x = 1
    ]
}

/// A closed unit cube welded from [`cube_sides`].
pub fn cube(n: usize) -> MeshGraph {
    let sides = cube_sides(n);
    combine(&sides).unwrap()
}

/// Incident edges of `v` counted straight from the edge arena.
pub fn incident_edges(g: &MeshGraph, v: VertexId) -> usize {
    g.live_edges()
        .filter(|&e| g.get_edge(e).contains(v))
        .count()
}

/// Assert `got` equals `want` up to rotation.
pub fn assert_rotation<T: PartialEq + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    assert_eq!(got.len(), want.len(), "length differs\n got={got:?}\nwant={want:?}");
    let matches = (0..want.len().max(1)).any(|r| {
        want.iter()
            .cycle()
            .skip(r)
            .take(want.len())
            .zip(got)
            .all(|(a, b)| a == b)
    });
    assert!(matches, "not a rotation\n got={got:?}\nwant={want:?}");
}

/// Validate with every check enabled, panicking with the issue.
pub fn assert_valid(g: &MeshGraph) {
    if let Err(issue) = mesh_euler::topology::validation::validate_graph(g, &ValidationOptions::all()) {
        panic!("graph failed validation: {issue}");
    }
}
