//! Command-line interface for batch tile-budget reduction of PNG files

use crate::io::configuration::{DEFAULT_SACRIFICE_RATIO, DEFAULT_TILE_TARGET, OUTPUT_SUFFIX};
use crate::io::error::Result;
use crate::io::image::{export_array_as_png, load_image_as_array};
use crate::io::progress::ProgressManager;
use crate::reduction::{MergeMethod, ReductionConfig, ReductionOutcome, reduce_image};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilepress")]
#[command(
    author,
    version,
    about = "Reduce the unique 8x8 tile count of an image to fit a tile budget"
)]
/// Command-line arguments for the tile reduction tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Target unique-tile count
    #[arg(short, long, default_value_t = DEFAULT_TILE_TARGET)]
    pub tiles: usize,

    /// Reduction method: substitution or merging
    #[arg(short, long, default_value = "substitution")]
    pub method: String,

    /// Disable sacrificial flattening of the top image region
    #[arg(long)]
    pub no_sacrifice: bool,

    /// Top fraction of the image treated as sacrificial
    #[arg(short = 'r', long, default_value_t = DEFAULT_SACRIFICE_RATIO)]
    pub sacrifice_ratio: f64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the engine configuration from the parsed arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the method string is unrecognized or any
    /// parameter fails validation.
    pub fn reduction_config(&self) -> Result<ReductionConfig> {
        let config = ReductionConfig {
            target_tiles: self.tiles,
            sacrifice_enabled: !self.no_sacrifice,
            sacrifice_ratio: self.sacrifice_ratio,
            method: self.method.parse::<MergeMethod>()?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation, target collection, or
    /// file processing fails
    pub fn process(&mut self) -> Result<()> {
        // Validate once, before touching any file
        let config = self.cli.reduction_config()?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error(
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback on per-file outcomes
    #[allow(clippy::print_stderr)]
    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: &ReductionConfig,
    ) -> Result<()> {
        let output_path = Self::get_output_path(input_path);

        let mut pm = self.progress_manager.as_mut();
        if let Some(p) = pm.as_deref_mut() {
            p.start_file(index, input_path);
        }

        let data = load_image_as_array(input_path)?;

        let (output, outcome) = reduce_image(&data, config, |completed, total| {
            if let Some(p) = pm.as_deref_mut() {
                p.update_iteration(index, completed, total);
            }
        })?;

        match outcome {
            ReductionOutcome::AlreadyWithinBudget { unique_count } => {
                // Success, not an error: nothing to reduce for this file
                if !self.cli.quiet {
                    eprintln!(
                        "{}: {unique_count} unique tiles already within budget, skipping",
                        input_path.display()
                    );
                }
            }
            ReductionOutcome::Reduced { .. } => {
                export_array_as_png(&output, &output_path)?;
            }
        }

        if let Some(p) = pm.as_deref_mut() {
            p.complete_file(index);
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
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
