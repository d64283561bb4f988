//! Window extraction, deduplication, and adjacency fitting
//!
//! `fit` slides a k×k window across the sample, optionally wrapping around
//! either axis and augmenting with quarter-turn rotations, assigns dense ids
//! to the distinct windows in first-sighting order, and derives the
//! four-directional compatibility relation by overlap matching. `decode`
//! inverts the process, rebuilding a raster from a grid of window ids.

use ndarray::Array2;
use std::collections::HashMap;
use std::hash::Hash;

use crate::analysis::pattern::Pattern;
use crate::spatial::direction::Direction;

/// Options controlling window extraction
#[derive(Clone, Copy, Debug, Default)]
pub struct FitOptions {
    /// Treat the sample as periodic across its columns
    pub horizontal_wrap: bool,
    /// Treat the sample as periodic across its rows
    pub vertical_wrap: bool,
    /// Augment the alphabet with the three quarter-turn rotations
    pub rotate: bool,
}

/// Extracts the k×k window alphabet from a sample and rebuilds rasters
///
/// Retains the id → window mapping between `fit` and `decode`; the collapse
/// engine only ever sees the dense ids.
#[derive(Clone, Debug, Default)]
pub struct WindowEncoder<T> {
    windows: Vec<Vec<T>>,
    window_size: usize,
}

impl<T: Clone + Eq + Hash> WindowEncoder<T> {
    /// Create an encoder with no fitted alphabet
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            window_size: 0,
        }
    }

    /// Extract the window alphabet and adjacency relation from a sample
    ///
    /// Windows are flattened row-major. Without wrap, corners range over
    /// `rows - k + 1` (respectively `cols - k + 1`) positions; with wrap the
    /// corner range covers the full axis and indexing is modular. Rotations
    /// are produced directly from the source grid so orientation stays
    /// consistent across wrap boundaries.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero or the sample is smaller than `k` in either
    /// dimension.
    pub fn fit(&mut self, sample: &Array2<T>, k: usize, options: FitOptions) -> Pattern {
        let (rows, cols) = sample.dim();
        assert!(k >= 1, "window size must be at least 1");
        assert!(
            rows >= k && cols >= k,
            "sample must be at least {k}x{k}"
        );

        self.windows.clear();
        self.window_size = k;

        let upper_i = if options.vertical_wrap { rows } else { rows - k + 1 };
        let upper_j = if options.horizontal_wrap { cols } else { cols - k + 1 };

        let mut ids: HashMap<Vec<T>, usize> = HashMap::new();
        let mut occurrences: Vec<u64> = Vec::new();

        for i in 0..upper_i {
            for j in 0..upper_j {
                let rotations = if options.rotate { 4 } else { 1 };
                for rot in 0..rotations {
                    let flat = flatten_window(sample, i, j, k, rot);
                    let next_id = self.windows.len();
                    let id = *ids.entry(flat.clone()).or_insert(next_id);
                    if id == next_id {
                        self.windows.push(flat);
                        occurrences.push(1);
                    } else {
                        occurrences[id] += 1;
                    }
                }
            }
        }

        let rotation_factor = if options.rotate { 4 } else { 1 };
        let scale = (upper_i * upper_j * rotation_factor) as f64;
        let probs: Vec<f64> = occurrences.iter().map(|&count| count as f64 / scale).collect();

        let tile_count = self.windows.len();
        let mut edges: Vec<[Vec<usize>; 4]> = Vec::with_capacity(tile_count);
        for first in 0..tile_count {
            let mut lists: [Vec<usize>; 4] = Default::default();
            for dir in Direction::ALL {
                for second in 0..tile_count {
                    if overlap_matches(&self.windows[first], &self.windows[second], k, dir) {
                        lists[dir.index()].push(second);
                    }
                }
            }
            edges.push(lists);
        }

        Pattern::from_parts(probs, edges)
    }

    /// Rebuild a raster from a grid of window ids
    ///
    /// For a wave of shape `(H, W)` the output has shape
    /// `(H + k - 1, W + k - 1)`: interior pixels come from each window's
    /// top-left element, and the right and bottom margins are filled from the
    /// last column's, last row's, and corner window's remaining elements.
    ///
    /// # Panics
    ///
    /// Panics if `fit` has not been called or the wave is empty.
    pub fn decode(&self, wave: &Array2<usize>) -> Array2<T> {
        assert!(self.window_size != 0, "decode requires a fitted encoder");
        let (wave_rows, wave_cols) = wave.dim();
        assert!(wave_rows > 0 && wave_cols > 0, "wave must be nonempty");

        let k = self.window_size;
        Array2::from_shape_fn((wave_rows + k - 1, wave_cols + k - 1), |(i, j)| {
            let row = i.min(wave_rows - 1);
            let col = j.min(wave_cols - 1);
            let window = &self.windows[wave[(row, col)]];
            window[(i - row) * k + (j - col)].clone()
        })
    }

    /// Side length of the fitted windows, zero before `fit`
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of distinct windows in the fitted alphabet
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// The flattened window assigned to `id`, if in range
    pub fn window(&self, id: usize) -> Option<&[T]> {
        self.windows.get(id).map(Vec::as_slice)
    }
}

/// Flatten the k×k window with top-left corner `(i, j)` under `rot`
/// quarter-turn clockwise rotations, indexing modulo the sample dimensions
fn flatten_window<T: Clone>(
    sample: &Array2<T>,
    i: usize,
    j: usize,
    k: usize,
    rot: usize,
) -> Vec<T> {
    let (rows, cols) = sample.dim();
    let mut flat = Vec::with_capacity(k * k);
    let mut push = |di: usize, dj: usize| {
        flat.push(sample[((i + di) % rows, (j + dj) % cols)].clone());
    };

    match rot {
        0 => {
            for di in 0..k {
                for dj in 0..k {
                    push(di, dj);
                }
            }
        }
        1 => {
            for dj in 0..k {
                for di in (0..k).rev() {
                    push(di, dj);
                }
            }
        }
        2 => {
            for di in (0..k).rev() {
                for dj in (0..k).rev() {
                    push(di, dj);
                }
            }
        }
        _ => {
            for dj in (0..k).rev() {
                for di in 0..k {
                    push(di, dj);
                }
            }
        }
    }

    flat
}

/// Whether `second` placed one step in `dir` from `first` overlaps
/// consistently
///
/// Coordinates of `first` outside the shifted copy of `second` impose no
/// constraint; every in-range pair must match exactly.
fn overlap_matches<T: Eq>(first: &[T], second: &[T], k: usize, dir: Direction) -> bool {
    let (dn, dm) = dir.offset();
    for a in 0..k {
        let Some(a2) = checked_local(a, dn, k) else {
            continue;
        };
        for b in 0..k {
            let Some(b2) = checked_local(b, dm, k) else {
                continue;
            };
            if first[a * k + b] != second[a2 * k + b2] {
                return false;
            }
        }
    }
    true
}

/// Local coordinate shifted against the direction offset, `None` out of range
fn checked_local(coord: usize, delta: isize, k: usize) -> Option<usize> {
    let shifted = coord.checked_add_signed(-delta)?;
    (shifted < k).then_some(shifted)
}
