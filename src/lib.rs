//! Wave function collapse texture synthesis from small raster samples
//!
//! The encoder extracts the alphabet of k×k windows from a sample image,
//! counts their frequencies, and computes which windows may sit next to each
//! other by overlap matching. The collapse engine then fills an output grid
//! with window ids via entropy-minimizing observation and counter-based
//! arc-consistency propagation, so the result is locally indistinguishable
//! from the sample at the chosen window size.

#![forbid(unsafe_code)]

/// Collapse engine: cells, support counters, and the observation loop
pub mod algorithm;
/// Pattern encoding: window extraction, deduplication, and adjacency fitting
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for entropy bookkeeping
pub mod math;
/// Direction conventions and lattice topology
pub mod spatial;

pub use algorithm::solver::{Wave, collapse};
pub use analysis::encoder::{FitOptions, WindowEncoder};
pub use analysis::pattern::Pattern;
pub use io::error::{Result, SynthesisError};
