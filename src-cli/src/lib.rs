pub mod cli;
pub mod config;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod source;

use std::collections::HashMap;
use std::process::ExitCode;

use anyhow::Context;
use image_processor::TargetDimensions;
use tracing_subscriber::EnvFilter;

use cli::{BatchArgs, Cli, Command, ConvertArgs};
use layout::{OutputLayout, Role};
use pipeline::{Pipeline, PipelineOptions};
use source::CardSource;

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<ExitCode, anyhow::Error> {
    config::load_dotenv(cli.env_file.as_deref())?;

    match cli.command {
        Some(Command::Convert(args)) => run_convert(&args),
        Some(Command::Batch(args)) => run_batch(&args.overrides()).await,
        None => run_batch(&BatchArgs::default().overrides()).await,
    }
}

async fn run_batch(overrides: &HashMap<&'static str, String>) -> Result<ExitCode, anyhow::Error> {
    let config = config::load_config(overrides)?;
    tracing::debug!(?config, "Loaded configuration");

    let source = CardSource::from_config(&config)?;
    let layout = OutputLayout::new(&config.output_dir);
    let report_path = layout.report_path();

    let pipeline = Pipeline::new(source, layout, PipelineOptions::from(&config));
    pipeline.prepare()?;

    let report = pipeline.run(config.indices()).await;
    report
        .write_json(&report_path)
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    tracing::info!(path = %report_path.display(), "Wrote batch report");

    if report.succeeded() == 0 {
        tracing::error!("No card was converted");
        return Ok(ExitCode::FAILURE);
    }
    if report.failed() > 0 {
        tracing::warn!(indices = ?report.failed_indices(), "Some cards were skipped");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_convert(args: &ConvertArgs) -> Result<ExitCode, anyhow::Error> {
    for (key, value) in [
        ("TAROT_TARGET_WIDTH", args.width),
        ("TAROT_TARGET_HEIGHT", args.height),
    ] {
        config::validation::validate_setting(key, &value.to_string())
            .map_err(|e| anyhow::anyhow!("invalid target size {value} for {key}: {e}"))?;
    }
    let target = TargetDimensions::new(args.width, args.height);
    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .context("cannot derive an array name from the input path, pass --name")?
            .to_string(),
    };

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let converted = pipeline::convert(&bytes, target)?;

    let layout = OutputLayout::flat(&args.output);
    layout.ensure_dirs(&[Role::Binary, Role::CArray])?;
    let source = args.input.display().to_string();
    let (bin_path, c_path) = pipeline::export_bitmap(&converted.bitmap, &layout, &name, &source)?;

    tracing::info!(
        bin = %bin_path.display(),
        c = %c_path.display(),
        dark = converted.mask.count_dark(),
        "Converted image"
    );
    Ok(ExitCode::SUCCESS)
}
