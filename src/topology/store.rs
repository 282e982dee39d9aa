//! Arena-backed topology store.
//!
//! [`MeshGraph`] owns one dense `Vec` per entity kind. A record's position in
//! its arena is its identity; cross references are typed handles, so the
//! inherently cyclic graph needs no `Rc`/`Arc`. Deleted records stay in place
//! as tombstones, and live counts are tracked separately from arena lengths.

use super::handle::{EdgeId, ElementKind, FaceId, Handle, LoopId, VertexId};
use super::records::{Edge, Face, Loop, Point3, Vertex};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::{EulerOp, MeshError, PreconditionViolation};
use crate::topology::validation::{ValidationOptions, validate_graph};

/// Number of live records per entity kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LiveCounts {
    pub vertices: usize,
    pub edges: usize,
    pub loops: usize,
    pub faces: usize,
}

/// Editable polygon-surface topology.
#[derive(Clone, Debug, Default)]
pub struct MeshGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    loops: Vec<Loop>,
    faces: Vec<Face>,
    live: LiveCounts,
}

impl MeshGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph with room for the given number of records per kind.
    pub fn with_capacity(vertices: usize, edges: usize, loops: usize, faces: usize) -> Self {
        MeshGraph {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            loops: Vec::with_capacity(loops),
            faces: Vec::with_capacity(faces),
            live: LiveCounts::default(),
        }
    }

    // --- Counts ---

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.live.vertices
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.live.edges
    }

    #[inline]
    pub fn loop_count(&self) -> usize {
        self.live.loops
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.live.faces
    }

    #[inline]
    pub fn counts(&self) -> LiveCounts {
        self.live
    }

    /// `true` when the graph holds no live record of any kind.
    pub fn is_empty(&self) -> bool {
        self.live == LiveCounts::default()
    }

    /// Arena length (live and tombstoned slots) for `kind`.
    pub fn slots(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Vertex => self.vertices.len(),
            ElementKind::Edge => self.edges.len(),
            ElementKind::Loop => self.loops.len(),
            ElementKind::Face => self.faces.len(),
        }
    }

    /// `V - E + F` over live records.
    pub fn euler_characteristic(&self) -> i64 {
        self.live.vertices as i64 - self.live.edges as i64 + self.live.faces as i64
    }

    // --- Get ---
    //
    // Out-of-range handles are a caller bug and panic, like slice indexing.
    // Tombstoned records are still readable.

    #[inline]
    pub fn get_vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[inline]
    pub fn get_edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn get_loop(&self, id: LoopId) -> &Loop {
        &self.loops[id.index()]
    }

    #[inline]
    pub fn get_face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    #[inline]
    pub fn position(&self, id: VertexId) -> Point3 {
        self.get_vertex(id).position
    }

    // --- Set ---

    /// Overwrite the record at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or `record.id` is not `Some(id)`.
    pub fn set_vertex(&mut self, id: VertexId, record: Vertex) {
        assert_eq!(record.id, Some(id), "vertex record must carry its own id");
        self.vertices[id.index()] = record;
    }

    /// Overwrite the record at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or `record.id` is not `Some(id)`.
    pub fn set_edge(&mut self, id: EdgeId, record: Edge) {
        assert_eq!(record.id, Some(id), "edge record must carry its own id");
        self.edges[id.index()] = record;
    }

    /// Overwrite the record at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or `record.id` is not `Some(id)`.
    pub fn set_loop(&mut self, id: LoopId, record: Loop) {
        assert_eq!(record.id, Some(id), "loop record must carry its own id");
        self.loops[id.index()] = record;
    }

    /// Overwrite the record at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range or `record.id` is not `Some(id)`.
    pub fn set_face(&mut self, id: FaceId, record: Face) {
        assert_eq!(record.id, Some(id), "face record must carry its own id");
        self.faces[id.index()] = record;
    }

    // --- Add ---

    /// Handle the next [`add_vertex`](Self::add_vertex) will return.
    #[inline]
    pub fn next_vertex_id(&self) -> VertexId {
        VertexId::new(self.vertices.len())
    }

    #[inline]
    pub fn next_edge_id(&self) -> EdgeId {
        EdgeId::new(self.edges.len())
    }

    #[inline]
    pub fn next_loop_id(&self) -> LoopId {
        LoopId::new(self.loops.len())
    }

    #[inline]
    pub fn next_face_id(&self) -> FaceId {
        FaceId::new(self.faces.len())
    }

    /// Append `record` in the next slot, stamping it with its new id.
    pub fn add_vertex(&mut self, mut record: Vertex) -> VertexId {
        let id = self.next_vertex_id();
        record.id = Some(id);
        self.vertices.push(record);
        self.live.vertices += 1;
        id
    }

    pub fn add_edge(&mut self, mut record: Edge) -> EdgeId {
        let id = self.next_edge_id();
        record.id = Some(id);
        self.edges.push(record);
        self.live.edges += 1;
        id
    }

    pub fn add_loop(&mut self, mut record: Loop) -> LoopId {
        let id = self.next_loop_id();
        record.id = Some(id);
        self.loops.push(record);
        self.live.loops += 1;
        id
    }

    pub fn add_face(&mut self, mut record: Face) -> FaceId {
        let id = self.next_face_id();
        record.id = Some(id);
        self.faces.push(record);
        self.live.faces += 1;
        id
    }

    // --- Liveness ---

    #[inline]
    pub fn is_live_vertex(&self, id: VertexId) -> bool {
        self.vertices.get(id.index()).is_some_and(|v| v.id == Some(id))
    }

    #[inline]
    pub fn is_live_edge(&self, id: EdgeId) -> bool {
        self.edges.get(id.index()).is_some_and(|e| e.id == Some(id))
    }

    #[inline]
    pub fn is_live_loop(&self, id: LoopId) -> bool {
        self.loops.get(id.index()).is_some_and(|l| l.id == Some(id))
    }

    #[inline]
    pub fn is_live_face(&self, id: FaceId) -> bool {
        self.faces.get(id.index()).is_some_and(|f| f.id == Some(id))
    }

    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        live_ids(&self.vertices, |v| v.id)
    }

    pub fn live_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        live_ids(&self.edges, |e| e.id)
    }

    pub fn live_loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        live_ids(&self.loops, |l| l.id)
    }

    pub fn live_faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        live_ids(&self.faces, |f| f.id)
    }

    // --- Precondition checks ---

    pub(crate) fn require_vertex(&self, op: EulerOp, id: VertexId) -> Result<&Vertex, MeshError> {
        require(op, id, &self.vertices, |v| v.id)
    }

    pub(crate) fn require_edge(&self, op: EulerOp, id: EdgeId) -> Result<&Edge, MeshError> {
        require(op, id, &self.edges, |e| e.id)
    }

    pub(crate) fn require_face(&self, op: EulerOp, id: FaceId) -> Result<&Face, MeshError> {
        require(op, id, &self.faces, |f| f.id)
    }

    // --- In-place mutation (crate internal) ---

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    #[inline]
    pub(crate) fn loop_mut(&mut self, id: LoopId) -> &mut Loop {
        &mut self.loops[id.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.index()]
    }

    // --- Invalidation (crate internal) ---

    pub(crate) fn invalidate_vertex(&mut self, id: VertexId) {
        let v = self.vertex_mut(id);
        if v.id.take().is_some() {
            v.base_edge = None;
            self.live.vertices -= 1;
        }
    }

    pub(crate) fn invalidate_edge(&mut self, id: EdgeId) {
        let e = self.edge_mut(id);
        if e.id.take().is_some() {
            e.base_loop = None;
            self.live.edges -= 1;
        }
    }

    pub(crate) fn invalidate_loop(&mut self, id: LoopId) {
        let l = self.loop_mut(id);
        if l.id.take().is_some() {
            l.face = None;
            self.live.loops -= 1;
        }
    }

    pub(crate) fn invalidate_face(&mut self, id: FaceId) {
        let f = self.face_mut(id);
        if f.id.take().is_some() {
            f.first_loop = None;
            f.element_count = 0;
            self.live.faces -= 1;
        }
    }
}

fn live_ids<'a, R, H: Handle + 'a>(
    arena: &'a [R],
    id_of: impl Fn(&R) -> Option<H> + 'a,
) -> impl Iterator<Item = H> + 'a {
    arena
        .iter()
        .enumerate()
        .filter_map(move |(slot, r)| id_of(r).filter(|id| id.index() == slot))
}

fn require<'a, R, H: Handle>(
    op: EulerOp,
    id: H,
    arena: &'a [R],
    id_of: impl Fn(&R) -> Option<H>,
) -> Result<&'a R, MeshError> {
    let record = arena.get(id.index()).ok_or_else(|| {
        MeshError::precondition(
            op,
            PreconditionViolation::OutOfRange {
                kind: H::KIND,
                index: id.index(),
                len: arena.len(),
            },
        )
    })?;
    if id_of(record) != Some(id) {
        return Err(MeshError::precondition(
            op,
            PreconditionViolation::Deleted {
                kind: H::KIND,
                index: id.index(),
            },
        ));
    }
    Ok(record)
}

impl DebugInvariants for MeshGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MeshGraph");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_graph(self, &ValidationOptions::default()).map_err(MeshError::from)
    }
}
