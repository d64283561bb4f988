//! Entropy-guided collapse with counter-based arc consistency
//!
//! A single attempt: initialize every cell to the full alphabet, repeatedly
//! observe the unobserved cell of minimum entropy, and propagate support
//! losses until quiescence. Contradictions abort the attempt; the caller
//! retries with a fresh seed. Propagation uses an explicit FIFO queue of
//! `(cell, removed tile)` entries instead of recursing through the cyclic
//! neighbor graph, so large grids cannot overflow the call stack.

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

use crate::algorithm::cell::Cell;
use crate::analysis::pattern::Pattern;
use crate::spatial::direction::Direction;
use crate::spatial::grid::GridTopology;

/// Scale of the uniform noise added when comparing entropies
///
/// Part of the engine contract: small enough that genuinely different
/// entropies are never reordered in double precision, large enough to spread
/// exact ties roughly uniformly.
pub const TIE_BREAK_NOISE: f64 = 1e-12;

/// Grid of tile ids produced by a successful collapse
pub type Wave = Array2<usize>;

/// Run one collapse attempt over a `rows` × `cols` output grid
///
/// Returns `None` on contradiction. The attempt is deterministic for a fixed
/// seed: the selection scan visits cells in row-major order preferring later
/// cells among ties, and sampling scans tile ids in ascending order.
///
/// # Panics
///
/// Panics if either dimension is zero or the pattern is empty.
pub fn collapse(pattern: &Pattern, rows: usize, cols: usize, seed: u64) -> Option<Wave> {
    Solver::new(pattern, rows, cols).run(StdRng::seed_from_u64(seed))
}

/// One collapse attempt over a borrowed pattern
///
/// Owns the cell grid for the duration of the attempt; nothing is shared
/// with other attempts except the immutable pattern.
pub struct Solver<'a> {
    pattern: &'a Pattern,
    topology: GridTopology,
    cells: Vec<Cell>,
    removals: VecDeque<(usize, usize)>,
}

impl<'a> Solver<'a> {
    /// Allocate the cell grid with every tile possible everywhere
    pub fn new(pattern: &'a Pattern, rows: usize, cols: usize) -> Self {
        assert!(
            pattern.tile_count() > 0,
            "pattern must contain at least one tile"
        );
        let topology = GridTopology::new(rows, cols);
        let cells = (0..topology.len()).map(|_| Cell::new(pattern)).collect();

        Self {
            pattern,
            topology,
            cells,
            removals: VecDeque::new(),
        }
    }

    /// Drive the attempt to completion or contradiction
    pub fn run(mut self, mut rng: StdRng) -> Option<Wave> {
        if !self.prune_unsupported() {
            return None;
        }

        let mut wave = Wave::zeros((self.topology.rows(), self.topology.cols()));
        for _ in 0..self.topology.len() {
            let target = self.lowest_entropy_cell(&mut rng)?;
            let draw = rng.random::<f64>();
            let tile = self.cells[target].sample_tile(self.pattern, draw);
            wave[self.topology.position_of(target)] = tile;
            if !self.observe(target, tile) {
                return None;
            }
        }

        Some(wave)
    }

    /// Remove tiles that start out with no support from an existing neighbor
    ///
    /// Support on side `dir` is supplied by the neighbor in `dir.inverse()`;
    /// when that neighbor is missing (grid boundary) the side imposes no
    /// constraint, so a 1×1 grid is left untouched. Returns false on
    /// contradiction.
    fn prune_unsupported(&mut self) -> bool {
        for index in 0..self.cells.len() {
            for dir in Direction::ALL {
                if self.topology.neighbor(index, dir.inverse()).is_none() {
                    continue;
                }
                for tile in self.cells[index].unsupported_tiles(dir) {
                    if !self.cells[index].is_possible(tile) {
                        continue;
                    }
                    if !self.cells[index].remove_tile(self.pattern, tile) {
                        return false;
                    }
                    self.removals.push_back((index, tile));
                }
                if !self.drain_removals() {
                    return false;
                }
            }
        }
        true
    }

    /// Row-major scan for the unobserved cell of minimum entropy
    ///
    /// Comparison is `<=` with an infinitesimal uniform perturbation drawn
    /// only when a candidate is accepted, so exact ties resolve roughly
    /// uniformly while preferring later cells.
    fn lowest_entropy_cell(&self, rng: &mut StdRng) -> Option<usize> {
        let mut min_entropy = f64::MAX;
        let mut target = None;

        for (index, cell) in self.cells.iter().enumerate() {
            if cell.is_observed() || cell.entropy_value() > min_entropy {
                continue;
            }
            let noise = TIE_BREAK_NOISE * rng.random::<f64>();
            min_entropy = cell.entropy_value() + noise;
            target = Some(index);
        }

        target
    }

    /// Fix a cell to `tile` and propagate every elimination it implies
    fn observe(&mut self, index: usize, tile: usize) -> bool {
        let eliminated = self.cells[index].begin_observation(self.pattern, tile);
        for id in eliminated {
            self.removals.push_back((index, id));
        }
        self.drain_removals()
    }

    /// Process queued removals until quiescence
    ///
    /// Each entry withdraws the removed tile's support from all four
    /// neighbors; a tile whose counter reaches zero while still possible is
    /// removed in turn and re-enqueued. Terminates because the total number
    /// of possibilities strictly decreases. Returns false on contradiction.
    fn drain_removals(&mut self) -> bool {
        let pattern = self.pattern;
        while let Some((index, removed)) = self.removals.pop_front() {
            for dir in Direction::ALL {
                let Some(neighbor) = self.topology.neighbor(index, dir) else {
                    continue;
                };
                for &tile in pattern.compatible(removed, dir) {
                    if self.cells[neighbor].decrement_support(dir, tile) {
                        if !self.cells[neighbor].remove_tile(pattern, tile) {
                            return false;
                        }
                        self.removals.push_back((neighbor, tile));
                    }
                }
            }
        }
        true
    }
}
