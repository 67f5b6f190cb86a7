use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use image::ImageFormat;
use log::{error, info};
use mipflat_io::{ImageRsCodec, Pipeline, PipelineConfig};

/// Flatten vertically stacked mip strips into near-square images
#[derive(Parser, Debug)]
#[command(name = "mipflat", version)]
struct Cli {
    /// Directory containing the mip strips
    #[arg(default_value = "In", value_parser = parse_dir_arg)]
    in_dir: PathBuf,

    /// Directory the flattened images are written to
    #[arg(default_value = "Out", value_parser = parse_dir_arg)]
    out_dir: PathBuf,

    /// Stop one step before the final near-square shape
    #[arg(short = 'n', long)]
    no_last_slice: bool,

    /// Create missing input/output directories
    #[arg(short = 'y', long)]
    create_dirs: bool,

    /// Number of worker threads (default: one per core)
    #[arg(short, long)]
    jobs: Option<NonZeroUsize>,

    /// Encoding of the written images
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Png,
    Bmp,
    Tga,
    Tiff,
    Qoi,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tga => ImageFormat::Tga,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Qoi => ImageFormat::Qoi,
        }
    }
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input_dir: self.in_dir.clone(),
            output_dir: self.out_dir.clone(),
            stop_before_last_step: self.no_last_slice,
            create_missing_dirs: self.create_dirs,
            jobs: self.jobs.map(NonZeroUsize::get),
        }
    }
}

/// Drop quote characters some shells leave in paths that end in a separator
fn parse_dir_arg(arg: &str) -> Result<PathBuf, String> {
    let cleaned: String = arg.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    if cleaned.is_empty() {
        return Err("directory path is empty".to_string());
    }
    Ok(PathBuf::from(cleaned))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp_millis()
        .init();

    let config = cli.pipeline_config();
    let pipeline = Pipeline::new(config, ImageRsCodec::new(cli.format.into()));
    let config = pipeline.config();
    info!(
        "Flattening {} -> {} (stop before last step: {})",
        config.input_dir.display(),
        config.output_dir.display(),
        config.stop_before_last_step
    );

    let report = pipeline.run().context("Directory run failed")?;

    if !report.is_success() {
        for failure in &report.failed {
            error!("{}: {}", failure.path.display(), failure.error);
        }
        bail!(
            "{} of {} file(s) failed",
            report.failed.len(),
            report.failed.len() + report.processed.len()
        );
    }

    Ok(())
}
