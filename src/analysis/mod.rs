//! Pattern encoding: from sample rasters to tile alphabets and back

/// Window extraction, deduplication, and adjacency fitting
pub mod encoder;
/// Immutable tile alphabet with probabilities and adjacency lists
pub mod pattern;

pub use encoder::WindowEncoder;
pub use pattern::Pattern;
