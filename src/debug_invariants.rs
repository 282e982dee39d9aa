//! Opt-in invariant checking for topology stores.
//!
//! Euler operators never validate the graph themselves. Tests and calling
//! code use this trait (or the [`debug_invariants!`](crate::debug_invariants)
//! macro) to prove the disk, radial and loop cycles are intact after a
//! sequence of edits.

use crate::mesh_error::MeshError;

/// Structures that can check their own structural invariants.
pub trait DebugInvariants {
    /// Panic on the first violated invariant when checking is enabled
    /// (debug builds, or the `strict-invariants` / `check-invariants` features).
    fn debug_assert_invariants(&self);

    /// Check every invariant and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// `true` when [`validate_invariants`](Self::validate_invariants) passes.
    fn is_valid(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Run a fallible check and panic with context when invariant checking is enabled.
///
/// The context accepts `format!`-style arguments:
///
/// ```ignore
/// debug_invariants!(graph.validate_invariants(), "after splitting edge {}", e);
/// ```
#[macro_export]
macro_rules! debug_invariants {
    ($check:expr, $($ctx:tt)+) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $check {
            panic!("[invariants] {}: {}", format_args!($($ctx)+), e);
        }
    };
}
