//! Mathematical utilities for the engine

/// Incrementally maintained Shannon entropy over weighted sets
pub mod entropy;
