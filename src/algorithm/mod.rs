/// Per-position solver state: possibilities, support counters, entropy
pub mod cell;
/// Bitvec-backed set of still-allowed tile ids
pub mod possibility;
/// Entropy-guided observation loop and work-queue propagation
pub mod solver;
