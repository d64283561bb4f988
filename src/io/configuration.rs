//! Constants and runtime configuration defaults

/// Side length of extracted windows
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of collapse attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Factor applied to the sample dimensions when no output size is given
pub const DEFAULT_OUTPUT_SCALE: usize = 2;

/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
