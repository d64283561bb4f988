//! Per-position solver state
//!
//! A cell tracks which tiles remain possible, how much support each tile
//! still has from each side, and the entropy of the weighted possibility
//! set. Cells only lose possibilities over the lifetime of an attempt; the
//! solver owns the cross-cell bookkeeping.

use crate::algorithm::possibility::PossibilitySet;
use crate::analysis::pattern::Pattern;
use crate::math::entropy::EntropyTracker;
use crate::spatial::direction::Direction;

/// Solver state for one output position
///
/// `support[dir][tile]` counts the tiles still possible in the neighbor on
/// side `dir.inverse()` that are compatible with `tile` here. The counters
/// are signed: once a cell is observed its counters are zeroed, and further
/// decrements must drift negative rather than land on zero again.
pub struct Cell {
    possible: PossibilitySet,
    n_possible: u32,
    support: [Vec<i32>; 4],
    entropy: EntropyTracker,
    observed: bool,
}

impl Cell {
    /// Create a cell with every tile possible and full support counts
    pub fn new(pattern: &Pattern) -> Self {
        let tile_count = pattern.tile_count();
        let support = Direction::ALL.map(|dir| {
            (0..tile_count)
                .map(|id| pattern.compatible(id, dir.inverse()).len() as i32)
                .collect()
        });

        Self {
            possible: PossibilitySet::all(tile_count),
            n_possible: tile_count as u32,
            support,
            entropy: EntropyTracker::from_weights(pattern.probabilities()),
            observed: false,
        }
    }

    /// Current entropy of the possibility set
    pub fn entropy_value(&self) -> f64 {
        self.entropy.value()
    }

    /// Whether a single tile has been selected for this cell
    pub const fn is_observed(&self) -> bool {
        self.observed
    }

    /// Number of tiles still possible
    pub const fn possible_count(&self) -> u32 {
        self.n_possible
    }

    /// Whether `tile` is still possible
    pub fn is_possible(&self, tile: usize) -> bool {
        self.possible.contains(tile)
    }

    /// Still-possible ids in ascending order
    pub fn possible_ids(&self) -> Vec<usize> {
        self.possible.iter_ids().collect()
    }

    /// Remaining support for `tile` on side `dir`
    pub fn support_count(&self, dir: Direction, tile: usize) -> i32 {
        self.support[dir.index()][tile]
    }

    /// Frequency-biased choice among the still-possible tiles
    ///
    /// `draw` is uniform in [0, 1); it is scaled by the maintained weight sum
    /// and the first possible id whose cumulative probability reaches the
    /// scaled draw is selected, scanning ids in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if no tile is possible.
    pub fn sample_tile(&self, pattern: &Pattern, draw: f64) -> usize {
        assert!(self.n_possible >= 1, "sampling from an empty cell");

        let mut remaining = draw * self.entropy.weight_sum();
        let mut chosen = None;
        for id in self.possible.iter_ids() {
            if chosen.is_some() && remaining <= 0.0 {
                break;
            }
            chosen = Some(id);
            remaining -= pattern.probability(id);
        }

        // n_possible >= 1 guarantees the scan visited at least one id
        chosen.unwrap_or(0)
    }

    /// Fix this cell to `tile`, returning the ids eliminated by the choice
    ///
    /// Zeroes every support counter so decrements arriving from neighbor
    /// updates can no longer re-trigger eliminations here. The caller is
    /// responsible for propagating each eliminated id.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already observed.
    pub fn begin_observation(&mut self, pattern: &Pattern, tile: usize) -> Vec<usize> {
        assert!(!self.observed, "cell observed twice");
        debug_assert!(self.possible.contains(tile));
        self.observed = true;

        for counters in &mut self.support {
            counters.fill(0);
        }

        let eliminated: Vec<usize> = self
            .possible
            .iter_ids()
            .filter(|&id| id != tile)
            .collect();
        self.possible.retain_only(tile);
        self.n_possible = 1;
        self.entropy.collapse_to(pattern.probability(tile));

        eliminated
    }

    /// Drop one unit of support for `tile` on side `dir`
    ///
    /// Returns true when the counter reaches exactly zero while the tile is
    /// still possible, i.e. the tile just lost its last supporter and must
    /// be removed.
    pub fn decrement_support(&mut self, dir: Direction, tile: usize) -> bool {
        let counter = &mut self.support[dir.index()][tile];
        *counter -= 1;
        *counter == 0 && self.possible.contains(tile)
    }

    /// Remove `tile` from the possibility set, updating entropy in O(1)
    ///
    /// Returns false when the last possibility disappears — a contradiction
    /// that aborts the attempt. With exactly one possibility left the entropy
    /// value is clamped to zero and the partial sums left as they are.
    #[must_use]
    pub fn remove_tile(&mut self, pattern: &Pattern, tile: usize) -> bool {
        debug_assert!(self.possible.contains(tile));
        self.possible.remove(tile);
        self.n_possible -= 1;

        if self.n_possible == 0 {
            return false;
        }

        if self.n_possible == 1 {
            self.entropy.mark_resolved();
        } else {
            self.entropy.remove(pattern.probability(tile));
        }
        true
    }

    /// Still-possible ids with no remaining support on side `dir`
    pub fn unsupported_tiles(&self, dir: Direction) -> Vec<usize> {
        let counters = &self.support[dir.index()];
        self.possible
            .iter_ids()
            .filter(|&id| counters[id] <= 0)
            .collect()
    }
}
