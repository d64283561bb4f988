//! Immutable tile alphabet produced by fitting a sample

use crate::spatial::direction::Direction;

/// Tile alphabet with occurrence probabilities and four-directional adjacency
///
/// `compatible(i, dir)` lists the distinct tile ids that may sit one step in
/// `dir` from tile `i` with consistent overlap. The relation is symmetric:
/// `j` is compatible with `i` in `dir` exactly when `i` is compatible with
/// `j` in `dir.inverse()`. A `Pattern` is immutable once built and may be
/// shared read-only by any number of collapse attempts.
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    probs: Vec<f64>,
    edges: Vec<[Vec<usize>; 4]>,
}

impl Pattern {
    /// Build a pattern from per-tile probabilities and adjacency lists
    ///
    /// Elements of each adjacency list must be distinct, in-range tile ids.
    ///
    /// # Panics
    ///
    /// Panics if `probs` and `edges` disagree on the tile count.
    pub fn from_parts(probs: Vec<f64>, edges: Vec<[Vec<usize>; 4]>) -> Self {
        assert_eq!(
            probs.len(),
            edges.len(),
            "probability and adjacency tables must cover the same tiles"
        );
        debug_assert!(edges
            .iter()
            .flatten()
            .flatten()
            .all(|&id| id < probs.len()));

        Self { probs, edges }
    }

    /// Number of tile ids in the alphabet
    pub fn tile_count(&self) -> usize {
        self.probs.len()
    }

    /// Occurrence probability of a tile
    pub fn probability(&self, tile: usize) -> f64 {
        self.probs[tile]
    }

    /// All tile probabilities, indexed by id
    pub fn probabilities(&self) -> &[f64] {
        &self.probs
    }

    /// Tile ids that may sit one step in `dir` from `tile`
    pub fn compatible(&self, tile: usize, dir: Direction) -> &[usize] {
        &self.edges[tile][dir.index()]
    }

    /// Whether some tile has no compatible neighbor in at least one direction
    ///
    /// Such a tile can never acquire a neighbor on that side, so any output
    /// larger than a single cell risks contradictions. The driver surfaces
    /// this as an advisory when the sample was fit without full wrap.
    pub fn has_isolated_tile(&self) -> bool {
        self.edges
            .iter()
            .any(|dirs| dirs.iter().any(|list| list.is_empty()))
    }
}
