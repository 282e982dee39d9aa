use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_euler::algs::weld::combine;
use mesh_euler::topology::{MeshGraph, Point3, VertexId};

/// `n x n` quads over `origin + s*u + t*v`, `s, t` in `[0, 1]`.
fn plane(origin: [f64; 3], u: [f64; 3], v: [f64; 3], n: usize) -> MeshGraph {
    let mut g = MeshGraph::with_capacity((n + 1) * (n + 1), 2 * n * (n + 1), 4 * n * n, n * n);
    let step = 1.0 / n as f64;
    let mut ids: Vec<VertexId> = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let (s, t) = (i as f64 * step, j as f64 * step);
            let at = |k: usize| origin[k] + s * u[k] + t * v[k];
            ids.push(g.create_vertex(Point3::new(at(0), at(1), at(2))).unwrap());
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

fn cube_sides(n: usize) -> Vec<MeshGraph> {
    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];
    vec![
        plane([0.0, 0.0, 0.0], Y, X, n),
        plane([0.0, 0.0, 1.0], X, Y, n),
        plane([0.0, 0.0, 0.0], X, Z, n),
        plane([0.0, 1.0, 0.0], Z, X, n),
        plane([0.0, 0.0, 0.0], Z, Y, n),
        plane([1.0, 0.0, 0.0], Y, Z, n),
    ]
}

fn bench_euler_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("euler_ops");

    for &n in &[16usize, 64] {
        group.bench_with_input(BenchmarkId::new("create_grid", n), &n, |b, &n| {
            b.iter(|| black_box(plane([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], n)));
        });

        let grid = plane([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], n);
        group.bench_with_input(BenchmarkId::new("split_every_edge", n), &n, |b, _| {
            b.iter(|| {
                let mut g = grid.clone();
                let edges: Vec<_> = g.live_edges().collect();
                for e in edges {
                    let mid = {
                        let rec = g.get_edge(e);
                        g.position(rec.a).midpoint(&g.position(rec.o))
                    };
                    g.split_edge_and_create_vertex(e, mid).unwrap();
                }
                black_box(g.vertex_count())
            });
        });

        group.bench_with_input(BenchmarkId::new("delete_every_vertex", n), &n, |b, _| {
            b.iter(|| {
                let mut g = grid.clone();
                let vertices: Vec<_> = g.live_vertices().collect();
                for v in vertices {
                    if g.is_live_vertex(v) {
                        g.delete_vertex(v).unwrap();
                    }
                }
                black_box(g.is_empty())
            });
        });
    }
    group.finish();
}

fn bench_weld(c: &mut Criterion) {
    let mut group = c.benchmark_group("weld");
    for &n in &[8usize, 32] {
        let sides = cube_sides(n);
        group.bench_with_input(BenchmarkId::new("cube", n), &n, |b, _| {
            b.iter(|| black_box(combine(&sides).unwrap().vertex_count()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_euler_ops, bench_weld);
criterion_main!(benches);
