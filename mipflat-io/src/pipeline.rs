use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info, warn};
use mipflat_core::{plan_steps, reshape};
use rayon::prelude::*;

use crate::codec::{DecodedImage, ImageCodec};
use crate::error::{IoError, Result};

/// Settings for one directory run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Leave every image one reshape step short of its final shape
    pub stop_before_last_step: bool,
    /// Create missing input/output directories instead of failing
    pub create_missing_dirs: bool,
    /// Worker threads; `None` lets rayon decide
    pub jobs: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("In"),
            output_dir: PathBuf::from("Out"),
            stop_before_last_step: false,
            create_missing_dirs: false,
            jobs: None,
        }
    }
}

/// Result of one successfully processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// (width, height) before the reshape
    pub original_size: (usize, usize),
    /// (width, height) after the reshape
    pub reshaped_size: (usize, usize),
    pub raw_bytes: usize,
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: IoError,
}

/// Per-file results of a run, in input order
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub processed: Vec<FileOutcome>,
    pub failed: Vec<FileFailure>,
}

impl PipelineReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reads every file in the input directory, flattens it and writes the result
/// under the same name in the output directory.
pub struct Pipeline<C> {
    config: PipelineConfig,
    codec: C,
}

impl<C: ImageCodec> Pipeline<C> {
    pub fn new(config: PipelineConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process the whole input directory.
    ///
    /// Directory problems abort the run. Problems with a single file are
    /// recorded in the report and the remaining files are still processed.
    pub fn run(&self) -> Result<PipelineReport> {
        ensure_dir(&self.config.input_dir, self.config.create_missing_dirs)?;

        let files = list_input_files(&self.config.input_dir)?;
        if files.is_empty() {
            info!("No files found in {}", self.config.input_dir.display());
            return Ok(PipelineReport::default());
        }
        ensure_dir(&self.config.output_dir, self.config.create_missing_dirs)?;

        let results = match self.config.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| IoError::ThreadPool(e.to_string()))?
                .install(|| self.process_all(&files)),
            None => self.process_all(&files),
        };

        let mut report = PipelineReport::default();
        for (path, result) in files.into_iter().zip(results) {
            match result {
                Ok(outcome) => report.processed.push(outcome),
                Err(error) => {
                    warn!("Skipping {}: {error}", path.display());
                    report.failed.push(FileFailure { path, error });
                }
            }
        }

        info!(
            "Processed {} file(s), {} failed",
            report.processed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn process_all(&self, files: &[PathBuf]) -> Vec<Result<FileOutcome>> {
        files.par_iter().map(|path| self.process_file(path)).collect()
    }

    /// Decode, reshape and re-encode a single file into the output directory
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let destination = self.destination_for(path)?;
        let bytes = fs::read(path).map_err(|source| IoError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (pixels, color) = self.codec.decode(&bytes)?.into_parts();
        let original_size = pixels.size();
        info!(
            "{}: {}x{}, raw {} bytes",
            path.display(),
            original_size.0,
            original_size.1,
            pixels.data().len()
        );
        debug!(
            "{}: {} reshape step(s) planned",
            path.display(),
            plan_steps(original_size.0, original_size.1, self.config.stop_before_last_step)
        );

        let pixels = reshape(pixels, self.config.stop_before_last_step)?;
        let reshaped_size = pixels.size();
        let raw_bytes = pixels.data().len();
        info!(
            "{}: reshaped to {}x{}, raw {} bytes",
            path.display(),
            reshaped_size.0,
            reshaped_size.1,
            raw_bytes
        );

        let encoded = self.codec.encode(&DecodedImage::new(pixels, color)?)?;

        fs::write(&destination, encoded).map_err(|source| IoError::Write {
            path: destination.clone(),
            source,
        })?;

        Ok(FileOutcome {
            source: path.to_path_buf(),
            destination,
            original_size,
            reshaped_size,
            raw_bytes,
        })
    }

    /// Output path for `path`: same file name, with the extension swapped
    /// when it does not already name the codec's output format.
    fn destination_for(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| IoError::NoFileName(path.to_path_buf()))?;
        let mut destination = self.config.output_dir.join(file_name);

        let format = self.codec.output_format();
        if ImageFormat::from_path(path).ok() != Some(format) {
            if let Some(extension) = format.extensions_str().first() {
                destination.set_extension(extension);
            }
        }
        Ok(destination)
    }
}

fn ensure_dir(path: &Path, create: bool) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if !create {
        return Err(IoError::MissingDirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|source| IoError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Created directory {}", path.display());
    Ok(())
}

/// Non-directory entries of `dir`, sorted by path
fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_err = |source| IoError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if path.is_dir() {
            debug!("Skipping subdirectory {}", path.display());
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
