use bitvec::prelude::*;
use std::fmt;

/// Set of tile ids still allowed for a cell
///
/// Backed by a fixed-width bit vector over the dense ids assigned by the
/// encoder. Cells only ever shrink their sets, so the API is removal-only;
/// `retain_only` implements observation.
#[derive(Clone, Debug)]
pub struct PossibilitySet {
    bits: BitVec,
}

impl PossibilitySet {
    /// Create a set containing every id below `tile_count`
    pub fn all(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
        }
    }

    /// Test id membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Remove an id from the set
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Drop every id except `tile`
    pub fn retain_only(&mut self, tile: usize) {
        self.bits.fill(false);
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Iterate the member ids in ascending order
    pub fn iter_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Count members
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Capacity of the underlying id space
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PossibilitySet({} of {})",
            self.count(),
            self.capacity()
        )
    }
}
