//! Merge several graphs into one, welding coincident vertices.
//!
//! Every boundary vertex of every live face is snapped to an integer grid
//! cell. The first vertex seen in a cell becomes the output vertex at its
//! original (unsnapped) position; later vertices in the same cell reuse it.
//! Faces are then rebuilt through [`MeshGraph::create_face`], so edges shared
//! by welded faces are shared in the output too.
//!
//! Isolated vertices and wire edges of the inputs are not carried over.

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;

use crate::mesh_error::MeshError;
use crate::topology::handle::VertexId;
use crate::topology::records::{Point3, Vertex};
use crate::topology::store::MeshGraph;

/// Default weld tolerance: one millimetre in metre units.
pub const DEFAULT_GRID_SIZE: f64 = 0.001;

/// Integer grid coordinates of a quantized position.
pub type GridCell = [i64; 3];

/// Options for [`combine_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldOptions {
    /// Edge length of one grid cell. Must be finite and positive.
    pub grid_size: f64,
}

impl Default for WeldOptions {
    fn default() -> Self {
        WeldOptions {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl WeldOptions {
    pub fn with_grid_size(grid_size: f64) -> Self {
        WeldOptions { grid_size }
    }

    fn check(&self) -> Result<(), MeshError> {
        if self.grid_size.is_finite() && self.grid_size > 0.0 {
            Ok(())
        } else {
            Err(MeshError::InvalidGridSize(self.grid_size))
        }
    }
}

/// Snap `p` to the grid: `round(coord / grid_size)` per axis.
///
/// Cells outside the `i64` range saturate at `i64::MIN`/`i64::MAX`; use
/// [`try_quantize`] to detect that case.
#[inline]
pub fn quantize(p: Point3, grid_size: f64) -> GridCell {
    [
        (p.x / grid_size).round() as i64,
        (p.y / grid_size).round() as i64,
        (p.z / grid_size).round() as i64,
    ]
}

/// Like [`quantize`], but `None` when a cell coordinate is not finite or
/// does not fit an `i64`.
pub fn try_quantize(p: Point3, grid_size: f64) -> Option<GridCell> {
    // 2^63 is exactly representable; anything at or past it saturates
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let snap = |c: f64| {
        let q = (c / grid_size).round();
        (q.is_finite() && q > -LIMIT && q < LIMIT).then_some(q as i64)
    };
    Some([snap(p.x)?, snap(p.y)?, snap(p.z)?])
}

/// [`combine_with`] using [`WeldOptions::default`].
pub fn combine<'a, I>(graphs: I) -> Result<MeshGraph, MeshError>
where
    I: IntoIterator<Item = &'a MeshGraph>,
{
    combine_with(graphs, &WeldOptions::default())
}

/// Build a fresh graph holding every live face of `graphs`, with vertices
/// that fall into the same grid cell merged.
///
/// Consecutive boundary vertices of one face that weld together collapse
/// into one. A face left with fewer than three distinct cells, or that
/// visits a cell twice, is skipped with a warning and contributes no
/// vertices. A position whose cell does not fit an `i64` is rejected with
/// [`MeshError::PositionOutOfGrid`] before anything is built.
pub fn combine_with<'a, I>(graphs: I, options: &WeldOptions) -> Result<MeshGraph, MeshError>
where
    I: IntoIterator<Item = &'a MeshGraph>,
{
    options.check()?;
    let mut polygons: Vec<Vec<Point3>> = Vec::new();
    for g in graphs {
        for f in g.live_faces() {
            let ring = g.face_vertices(f)?;
            polygons.push(ring.into_iter().map(|v| g.position(v)).collect());
        }
    }
    let cells = quantize_polygons(&polygons, options.grid_size)?;

    // Collapse welded neighbours, then drop faces that no longer bound area.
    let mut rings: Vec<Vec<(GridCell, Point3)>> = Vec::with_capacity(polygons.len());
    for (i, (points, cells)) in polygons.iter().zip(&cells).enumerate() {
        let mut ring: Vec<(GridCell, Point3)> = cells
            .iter()
            .copied()
            .zip(points.iter().copied())
            .dedup_by(|x, y| x.0 == y.0)
            .collect();
        while ring.len() > 1 && ring.first().map(|c| c.0) == ring.last().map(|c| c.0) {
            ring.pop();
        }
        let distinct: HashSet<GridCell> = ring.iter().map(|c| c.0).collect();
        if ring.len() < 3 || distinct.len() != ring.len() {
            log::warn!(
                "weld: skipping input face {i}, {} of {} boundary vertices remain distinct",
                distinct.len(),
                points.len()
            );
            continue;
        }
        rings.push(ring);
    }

    let mut out = MeshGraph::new();
    let mut welded: HashMap<GridCell, VertexId> = HashMap::new();
    for &(cell, p) in rings.iter().flatten() {
        welded.entry(cell).or_insert_with(|| out.add_vertex(Vertex::new(p)));
    }
    for ring in &rings {
        let vertices: Vec<VertexId> = ring.iter().map(|(cell, _)| welded[cell]).collect();
        out.create_face(&vertices)?;
    }
    log::debug!(
        "weld: {} faces in, {} faces and {} vertices out",
        polygons.len(),
        out.face_count(),
        out.vertex_count()
    );
    Ok(out)
}

fn quantize_ring(ring: &[Point3], grid_size: f64) -> Result<Vec<GridCell>, MeshError> {
    ring.iter()
        .map(|&p| {
            try_quantize(p, grid_size).ok_or(MeshError::PositionOutOfGrid {
                x: p.x,
                y: p.y,
                z: p.z,
                grid_size,
            })
        })
        .collect()
}

#[cfg(feature = "rayon")]
fn quantize_polygons(polygons: &[Vec<Point3>], grid_size: f64) -> Result<Vec<Vec<GridCell>>, MeshError> {
    use rayon::prelude::*;
    polygons
        .par_iter()
        .map(|ring| quantize_ring(ring, grid_size))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn quantize_polygons(polygons: &[Vec<Point3>], grid_size: f64) -> Result<Vec<Vec<GridCell>>, MeshError> {
    polygons
        .iter()
        .map(|ring| quantize_ring(ring, grid_size))
        .collect()
}
