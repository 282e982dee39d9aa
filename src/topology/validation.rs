//! Topology validation helpers.
//!
//! Read-only checks for every structural invariant of a [`MeshGraph`]:
//! index bounds, liveness of every reference, closure and symmetry of the
//! disk, radial and face loop cycles, and face/loop consistency. Each check
//! returns the first [`ValidationIssue`] it finds instead of panicking.

use hashbrown::HashMap;
use thiserror::Error;

use super::cycle::CycleKind;
use super::handle::{EdgeId, ElementKind, FaceId, Handle, LoopId, VertexId};
use super::store::MeshGraph;

/// A violated invariant, described by its `Display` output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("{kind} {index} is out of range (arena holds {len})")]
    OutOfRange {
        kind: ElementKind,
        index: usize,
        len: usize,
    },
    #[error("{kind} {index} has been deleted")]
    NotLive { kind: ElementKind, index: usize },
    #[error("{kind} {index} references {target_kind} {target}, which is out of range or deleted")]
    DanglingReference {
        kind: ElementKind,
        index: usize,
        target_kind: ElementKind,
        target: usize,
    },
    #[error("edge {edge} has vertex {vertex} at both ends")]
    DegenerateEdge { edge: usize, vertex: usize },
    #[error("vertex {vertex}: base edge {edge} does not touch it")]
    BaseEdgeNotIncident { vertex: usize, edge: usize },
    #[error("{cycle} cycle of {kind} {index} contains foreign member {member}")]
    ForeignMember {
        cycle: CycleKind,
        kind: ElementKind,
        index: usize,
        member: usize,
    },
    #[error("{cycle} cycle of {kind} {index} did not close within {limit} steps")]
    OpenCycle {
        cycle: CycleKind,
        kind: ElementKind,
        index: usize,
        limit: usize,
    },
    #[error("{cycle} cycle of {kind} {index}: links of member {member} are not mirrored by its neighbours")]
    AsymmetricLink {
        cycle: CycleKind,
        kind: ElementKind,
        index: usize,
        member: usize,
    },
    #[error("{cycle} cycle of {kind} {index}: base {base} is referenced {found} times by its neighbours, expected 2")]
    BaseNotEnclosed {
        cycle: CycleKind,
        kind: ElementKind,
        index: usize,
        base: usize,
        found: usize,
    },
    #[error("vertex {vertex}: disk cycle holds {found} edges but {expected} live edges touch it")]
    DegreeMismatch {
        vertex: usize,
        expected: usize,
        found: usize,
    },
    #[error("face {face}: element count is {expected} but its loop cycle holds {found} loops")]
    ElementCountMismatch {
        face: usize,
        expected: usize,
        found: usize,
    },
    #[error("face {face} has {found} boundary elements, at least 3 required")]
    FaceTooSmall { face: usize, found: usize },
    #[error("loop {lp} has no owning face")]
    DetachedLoop { lp: usize },
    #[error("loop {lp}: edge {edge} does not contain its start vertex {vertex}")]
    StartNotOnEdge { lp: usize, edge: usize, vertex: usize },
    #[error("loop {lp}: next loop {next} starts at vertex {found}, expected {expected}")]
    BrokenChain {
        lp: usize,
        next: usize,
        expected: usize,
        found: usize,
    },
    #[error("edge {edge}: radial cycle holds {found} loops (non-manifold)")]
    NonManifoldEdge { edge: usize, found: usize },
    #[error("edge {edge}: radial cycle holds {found} loops but {expected} live loops run along it")]
    RadialCountMismatch {
        edge: usize,
        expected: usize,
        found: usize,
    },
    #[error("loop {lp} is not reachable from the radial cycle of edge {edge}")]
    LoopNotInRadialCycle { lp: usize, edge: usize },
    #[error("{kind} live count is {recorded} but {found} live records exist")]
    LiveCountMismatch {
        kind: ElementKind,
        recorded: usize,
        found: usize,
    },
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    Warn,
    /// Report non-manifold edges as an issue.
    Error,
}

/// Optional toggles for [`validate_graph`].
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// How to treat edges shared by more than two faces.
    pub non_manifold: NonManifoldHandling,
    /// Compare each disk cycle against an independent count of incident edges.
    pub check_degree: bool,
}

impl ValidationOptions {
    /// Enable every check and treat non-manifold edges as errors.
    pub fn all() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Error,
            check_degree: true,
        }
    }

    /// Structural checks only; non-manifold edges are accepted silently.
    pub fn structural() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Ignore,
            check_degree: false,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Validate every live record of `graph`, vertices first, then edges,
/// loops and faces.
pub fn validate_graph(graph: &MeshGraph, options: &ValidationOptions) -> Result<(), ValidationIssue> {
    let counts = graph.counts();
    check_live_count(ElementKind::Vertex, counts.vertices, graph.live_vertices().count())?;
    check_live_count(ElementKind::Edge, counts.edges, graph.live_edges().count())?;
    check_live_count(ElementKind::Loop, counts.loops, graph.live_loops().count())?;
    check_live_count(ElementKind::Face, counts.faces, graph.live_faces().count())?;

    let incident = if options.check_degree {
        let mut degrees: HashMap<VertexId, usize> = HashMap::new();
        for e in graph.live_edges() {
            let rec = graph.get_edge(e);
            *degrees.entry(rec.a).or_default() += 1;
            *degrees.entry(rec.o).or_default() += 1;
        }
        Some(degrees)
    } else {
        None
    };

    for v in graph.live_vertices() {
        let found = check_vertex(graph, v)?;
        if let Some(degrees) = &incident {
            let expected = degrees.get(&v).copied().unwrap_or(0);
            if expected != found {
                return Err(ValidationIssue::DegreeMismatch {
                    vertex: v.index(),
                    expected,
                    found,
                });
            }
        }
    }

    let mut along: HashMap<EdgeId, usize> = HashMap::new();
    for l in graph.live_loops() {
        *along.entry(graph.get_loop(l).edge).or_default() += 1;
    }

    for e in graph.live_edges() {
        let radial = check_edge(graph, e)?;
        let expected = along.get(&e).copied().unwrap_or(0);
        if expected != radial {
            return Err(ValidationIssue::RadialCountMismatch {
                edge: e.index(),
                expected,
                found: radial,
            });
        }
        if radial > 2 {
            match options.non_manifold {
                NonManifoldHandling::Ignore => {}
                NonManifoldHandling::Warn => {
                    log::warn!("Non-manifold edge detected: edge={e} loops={radial}");
                }
                NonManifoldHandling::Error => {
                    return Err(ValidationIssue::NonManifoldEdge {
                        edge: e.index(),
                        found: radial,
                    });
                }
            }
        }
    }

    for l in graph.live_loops() {
        validate_loop(graph, l)?;
    }
    for f in graph.live_faces() {
        validate_face(graph, f)?;
    }
    Ok(())
}

/// Check a vertex and its whole disk cycle.
pub fn validate_vertex(graph: &MeshGraph, vertex: VertexId) -> Result<(), ValidationIssue> {
    check_vertex(graph, vertex).map(|_| ())
}

/// Check an edge: endpoints, its disk links at both ends, and its whole
/// radial cycle.
pub fn validate_edge(graph: &MeshGraph, edge: EdgeId) -> Result<(), ValidationIssue> {
    check_edge(graph, edge).map(|_| ())
}

/// Check a loop: owning face, start vertex, chaining to the next loop, and
/// mirrored face and radial links.
pub fn validate_loop(graph: &MeshGraph, lp: LoopId) -> Result<(), ValidationIssue> {
    check_bounds_and_liveness(graph, lp, |g, l| g.is_live_loop(l))?;
    let rec = graph.get_loop(lp);
    let Some(face) = rec.face else {
        return Err(ValidationIssue::DetachedLoop { lp: lp.index() });
    };
    require_target(graph.is_live_face(face), lp, face)?;
    require_target(graph.is_live_edge(rec.edge), lp, rec.edge)?;
    require_target(graph.is_live_vertex(rec.start_vertex), lp, rec.start_vertex)?;
    let edge = graph.get_edge(rec.edge);
    let Some(end) = edge.other(rec.start_vertex) else {
        return Err(ValidationIssue::StartNotOnEdge {
            lp: lp.index(),
            edge: rec.edge.index(),
            vertex: rec.start_vertex.index(),
        });
    };

    for n in [rec.prev_loop, rec.next_loop, rec.prev_radial, rec.next_radial] {
        require_target(graph.is_live_loop(n), lp, n)?;
    }
    let next = graph.get_loop(rec.next_loop);
    let prev = graph.get_loop(rec.prev_loop);
    if next.prev_loop != lp || prev.next_loop != lp {
        return Err(ValidationIssue::AsymmetricLink {
            cycle: CycleKind::FaceLoop,
            kind: ElementKind::Face,
            index: face.index(),
            member: lp.index(),
        });
    }
    if next.face != Some(face) || prev.face != Some(face) {
        return Err(ValidationIssue::ForeignMember {
            cycle: CycleKind::FaceLoop,
            kind: ElementKind::Face,
            index: face.index(),
            member: if next.face != Some(face) { rec.next_loop.index() } else { rec.prev_loop.index() },
        });
    }
    if next.start_vertex != end {
        return Err(ValidationIssue::BrokenChain {
            lp: lp.index(),
            next: rec.next_loop.index(),
            expected: end.index(),
            found: next.start_vertex.index(),
        });
    }

    let next_r = graph.get_loop(rec.next_radial);
    let prev_r = graph.get_loop(rec.prev_radial);
    if next_r.prev_radial != lp || prev_r.next_radial != lp {
        return Err(ValidationIssue::AsymmetricLink {
            cycle: CycleKind::Radial,
            kind: ElementKind::Edge,
            index: rec.edge.index(),
            member: lp.index(),
        });
    }
    if next_r.edge != rec.edge || prev_r.edge != rec.edge {
        return Err(ValidationIssue::ForeignMember {
            cycle: CycleKind::Radial,
            kind: ElementKind::Edge,
            index: rec.edge.index(),
            member: if next_r.edge != rec.edge { rec.next_radial.index() } else { rec.prev_radial.index() },
        });
    }

    // a self-linked loop passes the neighbour checks above even when it has
    // dropped out of its edge's radial cycle
    let Some(base) = edge.base_loop else {
        return Err(ValidationIssue::LoopNotInRadialCycle {
            lp: lp.index(),
            edge: rec.edge.index(),
        });
    };
    let limit = graph.slots(ElementKind::Loop).max(1);
    let mut current = base;
    for _ in 0..limit {
        if current == lp {
            return Ok(());
        }
        require_target(graph.is_live_loop(current), rec.edge, current)?;
        current = graph.get_loop(current).next_radial;
        if current == base {
            break;
        }
    }
    Err(ValidationIssue::LoopNotInRadialCycle {
        lp: lp.index(),
        edge: rec.edge.index(),
    })
}

/// Check a face and its whole loop cycle.
pub fn validate_face(graph: &MeshGraph, face: FaceId) -> Result<(), ValidationIssue> {
    check_bounds_and_liveness(graph, face, |g, f| g.is_live_face(f))?;
    let rec = graph.get_face(face);
    let Some(first) = rec.first_loop else {
        return Err(ValidationIssue::FaceTooSmall {
            face: face.index(),
            found: 0,
        });
    };
    require_target(graph.is_live_loop(first), face, first)?;
    let found = check_cycle(
        CycleKind::FaceLoop,
        ElementKind::Face,
        face.index(),
        first,
        graph.slots(ElementKind::Loop),
        |l| {
            require_target(graph.is_live_loop(l), face, l)?;
            let lr = graph.get_loop(l);
            if lr.face != Some(face) {
                return Err(foreign(CycleKind::FaceLoop, ElementKind::Face, face.index(), l));
            }
            Ok((lr.prev_loop, lr.next_loop))
        },
    )?;
    if found != rec.element_count {
        return Err(ValidationIssue::ElementCountMismatch {
            face: face.index(),
            expected: rec.element_count,
            found,
        });
    }
    if found < 3 {
        return Err(ValidationIssue::FaceTooSmall {
            face: face.index(),
            found,
        });
    }
    Ok(())
}

/// Vertex checks; returns the disk cycle length.
fn check_vertex(graph: &MeshGraph, vertex: VertexId) -> Result<usize, ValidationIssue> {
    check_bounds_and_liveness(graph, vertex, |g, v| g.is_live_vertex(v))?;
    let Some(base) = graph.get_vertex(vertex).base_edge else {
        return Ok(0);
    };
    require_target(graph.is_live_edge(base), vertex, base)?;
    if !graph.get_edge(base).contains(vertex) {
        return Err(ValidationIssue::BaseEdgeNotIncident {
            vertex: vertex.index(),
            edge: base.index(),
        });
    }
    check_cycle(
        CycleKind::Disk,
        ElementKind::Vertex,
        vertex.index(),
        base,
        graph.slots(ElementKind::Edge),
        |e| {
            require_target(graph.is_live_edge(e), vertex, e)?;
            let er = graph.get_edge(e);
            if !er.contains(vertex) {
                return Err(foreign(CycleKind::Disk, ElementKind::Vertex, vertex.index(), e));
            }
            Ok((er.disk_prev(vertex), er.disk_next(vertex)))
        },
    )
}

/// Edge checks; returns the radial cycle length.
fn check_edge(graph: &MeshGraph, edge: EdgeId) -> Result<usize, ValidationIssue> {
    check_bounds_and_liveness(graph, edge, |g, e| g.is_live_edge(e))?;
    let rec = graph.get_edge(edge);
    require_target(graph.is_live_vertex(rec.a), edge, rec.a)?;
    require_target(graph.is_live_vertex(rec.o), edge, rec.o)?;
    if rec.a == rec.o {
        return Err(ValidationIssue::DegenerateEdge {
            edge: edge.index(),
            vertex: rec.a.index(),
        });
    }

    for v in [rec.a, rec.o] {
        let (prev, next) = (rec.disk_prev(v), rec.disk_next(v));
        for n in [prev, next] {
            require_target(graph.is_live_edge(n), edge, n)?;
            if !graph.get_edge(n).contains(v) {
                return Err(foreign(CycleKind::Disk, ElementKind::Vertex, v.index(), n));
            }
        }
        if graph.get_edge(next).disk_prev(v) != edge || graph.get_edge(prev).disk_next(v) != edge {
            return Err(ValidationIssue::AsymmetricLink {
                cycle: CycleKind::Disk,
                kind: ElementKind::Vertex,
                index: v.index(),
                member: edge.index(),
            });
        }
    }

    let Some(base) = rec.base_loop else {
        return Ok(0);
    };
    require_target(graph.is_live_loop(base), edge, base)?;
    check_cycle(
        CycleKind::Radial,
        ElementKind::Edge,
        edge.index(),
        base,
        graph.slots(ElementKind::Loop),
        |l| {
            require_target(graph.is_live_loop(l), edge, l)?;
            let lr = graph.get_loop(l);
            if lr.edge != edge {
                return Err(foreign(CycleKind::Radial, ElementKind::Edge, edge.index(), l));
            }
            Ok((lr.prev_radial, lr.next_radial))
        },
    )
}

/// Walk a cycle from `base`, checking closure, mirrored links, and that
/// `base` is referenced exactly twice by its neighbours. `links` validates
/// one member and returns its `(prev, next)`. Returns the member count.
fn check_cycle<H, L>(
    cycle: CycleKind,
    kind: ElementKind,
    index: usize,
    base: H,
    limit: usize,
    mut links: L,
) -> Result<usize, ValidationIssue>
where
    H: Handle,
    L: FnMut(H) -> Result<(H, H), ValidationIssue>,
{
    let limit = limit.max(1);
    let mut current = base;
    let mut count = 0;
    let mut base_refs = 0;
    loop {
        if count == limit {
            return Err(ValidationIssue::OpenCycle {
                cycle,
                kind,
                index,
                limit,
            });
        }
        let (prev, next) = links(current)?;
        let (next_prev, _) = links(next)?;
        let (_, prev_next) = links(prev)?;
        if next_prev != current || prev_next != current {
            return Err(ValidationIssue::AsymmetricLink {
                cycle,
                kind,
                index,
                member: current.index(),
            });
        }
        base_refs += usize::from(prev == base) + usize::from(next == base);
        count += 1;
        current = next;
        if current == base {
            break;
        }
    }
    if base_refs != 2 {
        return Err(ValidationIssue::BaseNotEnclosed {
            cycle,
            kind,
            index,
            base: base.index(),
            found: base_refs,
        });
    }
    Ok(count)
}

fn check_bounds_and_liveness<H: Handle>(
    graph: &MeshGraph,
    id: H,
    is_live: impl Fn(&MeshGraph, H) -> bool,
) -> Result<(), ValidationIssue> {
    let len = graph.slots(H::KIND);
    if id.index() >= len {
        return Err(ValidationIssue::OutOfRange {
            kind: H::KIND,
            index: id.index(),
            len,
        });
    }
    if !is_live(graph, id) {
        return Err(ValidationIssue::NotLive {
            kind: H::KIND,
            index: id.index(),
        });
    }
    Ok(())
}

fn require_target<O: Handle, T: Handle>(live: bool, owner: O, target: T) -> Result<(), ValidationIssue> {
    if live {
        Ok(())
    } else {
        Err(ValidationIssue::DanglingReference {
            kind: O::KIND,
            index: owner.index(),
            target_kind: T::KIND,
            target: target.index(),
        })
    }
}

fn foreign<H: Handle>(cycle: CycleKind, kind: ElementKind, index: usize, member: H) -> ValidationIssue {
    ValidationIssue::ForeignMember {
        cycle,
        kind,
        index,
        member: member.index(),
    }
}

fn check_live_count(kind: ElementKind, recorded: usize, found: usize) -> Result<(), ValidationIssue> {
    if recorded == found {
        Ok(())
    } else {
        Err(ValidationIssue::LiveCountMismatch {
            kind,
            recorded,
            found,
        })
    }
}
