//! Command-line interface for synthesizing textures from PNG samples

use crate::algorithm::solver::collapse;
use crate::analysis::encoder::{FitOptions, WindowEncoder};
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_SCALE, DEFAULT_SEED, DEFAULT_WINDOW_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::io::image::{read_png, write_png};
use crate::io::progress::AttemptProgress;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate textures locally indistinguishable from a sample image"
)]
/// Command-line arguments for the texture synthesizer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG sample
    #[arg(value_name = "SAMPLE")]
    pub input: PathBuf,

    /// Output PNG path (defaults to the input name with a result suffix)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Side length of the extracted windows
    #[arg(short = 'k', long = "window", default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window: usize,

    /// Output image width in pixels (defaults to twice the sample width)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output image height in pixels (defaults to twice the sample height)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Treat the sample as periodic across its columns
    #[arg(long)]
    pub hwrap: bool,

    /// Treat the sample as periodic across its rows
    #[arg(long)]
    pub vwrap: bool,

    /// Augment the window alphabet with 90° rotations
    #[arg(short = 'r', long)]
    pub rotate: bool,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum collapse attempts before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Suppress progress output and advisories
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates one synthesis run: fit, retry collapse, decode, export
pub struct SampleProcessor {
    cli: Cli,
}

impl SampleProcessor {
    /// Create a processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the synthesis pipeline
    ///
    /// # Errors
    ///
    /// Returns an error if parameter validation, image I/O, or every collapse
    /// attempt fails.
    // Allow print for advisory user feedback
    #[allow(clippy::print_stderr)]
    pub fn process(&mut self) -> Result<()> {
        let k = self.cli.window;
        if k == 0 {
            return Err(invalid_parameter("window", &k, &"must be at least 1"));
        }
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }

        let sample = read_png(&self.cli.input)?;
        let (rows, cols) = sample.dim();
        if rows < k || cols < k {
            return Err(SynthesisError::InvalidSourceData {
                reason: format!("sample is {rows}x{cols}, smaller than the {k}x{k} window"),
            });
        }

        let out_height = self.cli.height.unwrap_or(rows * DEFAULT_OUTPUT_SCALE);
        let out_width = self.cli.width.unwrap_or(cols * DEFAULT_OUTPUT_SCALE);
        if out_height < k {
            return Err(invalid_parameter(
                "height",
                &out_height,
                &format!("output must be at least {k} pixels tall"),
            ));
        }
        if out_width < k {
            return Err(invalid_parameter(
                "width",
                &out_width,
                &format!("output must be at least {k} pixels wide"),
            ));
        }

        let options = FitOptions {
            horizontal_wrap: self.cli.hwrap,
            vertical_wrap: self.cli.vwrap,
            rotate: self.cli.rotate,
        };
        let mut encoder = WindowEncoder::new();
        let pattern = encoder.fit(&sample, k, options);

        if !(self.cli.hwrap && self.cli.vwrap) && pattern.has_isolated_tile() && !self.cli.quiet {
            eprintln!(
                "warning: some window has no compatible neighbor in at least one direction; \
                 attempts may fail (consider --hwrap/--vwrap)"
            );
        }

        let wave_rows = out_height - k + 1;
        let wave_cols = out_width - k + 1;

        let progress = self
            .cli
            .should_show_progress()
            .then(|| AttemptProgress::new(self.cli.attempts));

        let mut result = None;
        for attempt in 0..self.cli.attempts {
            let seed = self.cli.seed.wrapping_add(attempt as u64);
            let outcome = collapse(&pattern, wave_rows, wave_cols, seed);

            if let Some(ref bar) = progress {
                bar.record_attempt();
            }
            if outcome.is_some() {
                if let Some(ref bar) = progress {
                    bar.finish_success(attempt + 1);
                }
                result = outcome;
                break;
            }
        }

        let Some(wave) = result else {
            if let Some(ref bar) = progress {
                bar.finish_failure();
            }
            return Err(SynthesisError::ContradictionLimit {
                attempts: self.cli.attempts,
            });
        };

        let decoded = encoder.decode(&wave);
        write_png(&decoded, self.output_path())?;
        Ok(())
    }

    fn output_path(&self) -> PathBuf {
        self.cli
            .output
            .clone()
            .unwrap_or_else(|| Self::derive_output_path(&self.cli.input))
    }

    fn derive_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
