//! Graph-level algorithms built on the Euler operators.

pub mod weld;

pub use weld::{DEFAULT_GRID_SIZE, GridCell, WeldOptions, combine, combine_with, quantize, try_quantize};
