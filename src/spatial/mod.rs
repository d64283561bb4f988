//! Spatial conventions for the output lattice
//!
//! This module contains the pieces the engine uses to talk about space:
//! - The four-direction neighborhood and its inverses
//! - Flat row-major indexing over a rectangular cell grid

/// Direction tags, offsets, and inverses
pub mod direction;
/// Row-major lattice topology with flat indexing
pub mod grid;

pub use direction::Direction;
pub use grid::GridTopology;
