//! Typed arena handles for vertices, edges, loops and faces.
//!
//! Every topology record lives in a dense arena inside
//! [`MeshGraph`](crate::topology::store::MeshGraph) and is addressed by its
//! slot position. The handles in this module wrap that position in a
//! `#[repr(transparent)]` `u32` newtype so the four kinds cannot be mixed up
//! at compile time.
//!
//! A missing reference ("unset") is spelled `Option<Handle>` rather than a
//! magic `-1`; see the record types in [`records`](super::records).

use std::fmt;

/// The four entity kinds stored by a [`MeshGraph`](crate::topology::store::MeshGraph).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementKind {
    Vertex,
    Edge,
    Loop,
    Face,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Loop => "loop",
            ElementKind::Face => "face",
        };
        f.write_str(name)
    }
}

/// Common interface of the typed handles, used by code that is generic over
/// the entity kind (cycle walking, validation).
pub trait Handle: Copy + Eq + std::hash::Hash + fmt::Debug {
    /// Entity kind addressed by this handle.
    const KIND: ElementKind;

    /// Builds a handle for arena slot `index`.
    fn from_index(index: usize) -> Self;

    /// Arena slot addressed by this handle.
    fn index(self) -> usize;
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle for arena slot `index`.
            ///
            /// # Panics
            ///
            /// Panics if `index` does not fit in a `u32`; arenas are capped at
            /// `u32::MAX` slots.
            #[inline]
            pub fn new(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => $name(raw),
                    Err(_) => panic!(concat!(stringify!($name), " index {} exceeds u32"), index),
                }
            }

            /// Arena slot of this handle.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Handle for $name {
            const KIND: ElementKind = $kind;

            #[inline]
            fn from_index(index: usize) -> Self {
                $name::new(index)
            }

            #[inline]
            fn index(self) -> usize {
                $name::index(self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw slot index.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_handle!(
    /// Handle of a [`Vertex`](super::records::Vertex) record.
    VertexId,
    ElementKind::Vertex
);
define_handle!(
    /// Handle of an [`Edge`](super::records::Edge) record.
    EdgeId,
    ElementKind::Edge
);
define_handle!(
    /// Handle of a [`Loop`](super::records::Loop) record.
    LoopId,
    ElementKind::Loop
);
define_handle!(
    /// Handle of a [`Face`](super::records::Face) record.
    FaceId,
    ElementKind::Face
);
