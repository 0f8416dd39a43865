//! Per-card conversion pipeline and batch orchestration.
//!
//! retrieve -> decode (grayscale) -> resize -> threshold -> pack -> {.bin, .c}
//!
//! A failing card never stops the batch: retrieval failures are logged as
//! skips, everything else is logged as an error with the failing stage.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bitmap_export::{BitmapFormat, CArray, ExportError, RawBin, write_to_file};
use card_fetch::{FetchError, FetchedImage, ImageSource, card_stem};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use image_processor::decode::sniff_extension;
use image_processor::{
    BinaryMask, PackedBitmap, PixelGrid, ProcessError, TargetDimensions, decode_grayscale, pack,
    preview, resize_nearest, threshold,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::layout::{OutputLayout, Role};
use crate::report::BatchReport;

/// Extension used for originals whose format can't be recognized.
const UNKNOWN_EXTENSION: &str = "img";

/// Pipeline step a card failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Retrieve,
    Decode,
    Resize,
    Pack,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Retrieve => "retrieve",
            Self::Decode => "decode",
            Self::Resize => "resize",
            Self::Pack => "pack",
            Self::Write => "write",
        })
    }
}

/// Why a single card could not be converted.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("retrieval failed: {0}")]
    Retrieve(#[source] FetchError),

    #[error("decode failed: {0}")]
    Decode(#[source] ProcessError),

    #[error("resize failed: {0}")]
    Resize(#[source] ProcessError),

    #[error("packing failed: {0}")]
    Pack(#[source] ProcessError),

    #[error("preview encoding failed: {0}")]
    Preview(#[source] ProcessError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImageError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Retrieve(_) => Stage::Retrieve,
            Self::Decode(_) => Stage::Decode,
            Self::Resize(_) => Stage::Resize,
            Self::Pack(_) => Stage::Pack,
            Self::Preview(_) | Self::Export(_) | Self::Io { .. } => Stage::Write,
        }
    }
}

/// Every intermediate of one conversion.
#[derive(Debug, Clone)]
pub struct Converted {
    pub gray: PixelGrid,
    pub resized: PixelGrid,
    pub mask: BinaryMask,
    pub bitmap: PackedBitmap,
}

/// Run the pure conversion chain on encoded image bytes.
pub fn convert(bytes: &[u8], target: TargetDimensions) -> Result<Converted, ImageError> {
    let gray = decode_grayscale(bytes).map_err(ImageError::Decode)?;
    let resized = resize_nearest(&gray, target).map_err(ImageError::Resize)?;
    let mask = threshold(&resized);
    let bitmap = pack(&mask).map_err(ImageError::Pack)?;
    debug!(
        dark = mask.count_dark(),
        len = bitmap.len(),
        "Converted image to packed bitmap"
    );
    Ok(Converted {
        gray,
        resized,
        mask,
        bitmap,
    })
}

/// Write both serializations of `bitmap`. Returns `(bin_path, c_path)`.
///
/// The `.bin` is written first; a failing `.c` write leaves it in place.
pub fn export_bitmap(
    bitmap: &PackedBitmap,
    layout: &OutputLayout,
    stem: &str,
    source: &str,
) -> Result<(PathBuf, PathBuf), ImageError> {
    let c_array = CArray::new(stem, source)?;

    let bin_path = layout.path(Role::Binary, stem, RawBin.extension());
    write_to_file(&RawBin, bitmap, &bin_path)?;

    let c_path = layout.path(Role::CArray, stem, c_array.extension());
    write_to_file(&c_array, bitmap, &c_path)?;

    Ok((bin_path, c_path))
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), ImageError> {
    std::fs::write(path, data).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Result of a successfully converted card.
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub index: u32,
    pub origin: String,
    pub bin_path: PathBuf,
    pub c_path: PathBuf,
    pub dark_pixels: usize,
}

/// Knobs for a batch run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub target: TargetDimensions,
    pub name_prefix: String,
    pub write_previews: bool,
    pub save_originals: bool,
    pub jobs: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target: TargetDimensions::STANDARD,
            name_prefix: "ar".into(),
            write_previews: true,
            save_originals: true,
            jobs: 1,
        }
    }
}

impl From<&AppConfig> for PipelineOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            target: config.target,
            name_prefix: config.name_prefix.clone(),
            write_previews: config.write_previews,
            save_originals: config.save_originals,
            jobs: config.jobs,
        }
    }
}

/// Converts numbered cards from `source` into `layout`.
pub struct Pipeline<S> {
    source: S,
    layout: OutputLayout,
    options: PipelineOptions,
}

impl<S: ImageSource> Pipeline<S> {
    pub fn new(source: S, layout: OutputLayout, options: PipelineOptions) -> Self {
        Self {
            source,
            layout,
            options,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Output roles this run writes to.
    fn roles(&self) -> Vec<Role> {
        let mut roles = vec![Role::Binary, Role::CArray];
        if self.options.save_originals {
            roles.push(Role::Original);
        }
        if self.options.write_previews {
            roles.extend([Role::Gray, Role::Resized, Role::Mono]);
        }
        roles
    }

    /// Create every output folder up front.
    pub fn prepare(&self) -> Result<(), anyhow::Error> {
        self.layout.ensure_dirs(&self.roles()).with_context(|| {
            format!(
                "failed to create output folders under {}",
                self.layout.root().display()
            )
        })
    }

    /// Retrieve, convert and write a single card.
    pub async fn process_index(&self, index: u32) -> Result<ImageOutcome, ImageError> {
        let stem = card_stem(&self.options.name_prefix, index);

        let FetchedImage { origin, bytes } = self
            .source
            .fetch(index)
            .await
            .map_err(ImageError::Retrieve)?;
        info!(index, origin = %origin, len = bytes.len(), "Retrieved image");

        if self.options.save_originals {
            let ext = sniff_extension(&bytes).unwrap_or(UNKNOWN_EXTENSION);
            write_file(&self.layout.path(Role::Original, &stem, ext), &bytes)?;
        }

        let converted = convert(&bytes, self.options.target)?;

        if self.options.write_previews {
            self.write_previews(&stem, &converted)?;
        }

        let (bin_path, c_path) = export_bitmap(&converted.bitmap, &self.layout, &stem, &origin)?;

        Ok(ImageOutcome {
            index,
            origin,
            bin_path,
            c_path,
            dark_pixels: converted.mask.count_dark(),
        })
    }

    fn write_previews(&self, stem: &str, converted: &Converted) -> Result<(), ImageError> {
        let previews = [
            (Role::Gray, preview::grid_png(&converted.gray)),
            (Role::Resized, preview::grid_png(&converted.resized)),
            (Role::Mono, preview::mask_png(&converted.mask)),
        ];
        for (role, png) in previews {
            let png = png.map_err(ImageError::Preview)?;
            write_file(&self.layout.path(role, stem, "png"), &png)?;
        }
        Ok(())
    }

    /// Process every index in `indices`, up to `jobs` at a time.
    ///
    /// Always attempts every index; failures end up in the report.
    pub async fn run(&self, indices: RangeInclusive<u32>) -> BatchReport {
        let started_at = Utc::now();
        let jobs = self.options.jobs.max(1);
        info!(
            first = indices.start(),
            last = indices.end(),
            jobs,
            "Starting batch"
        );

        let results: Vec<_> = stream::iter(indices)
            .map(|index| async move {
                let result = self.process_index(index).await;
                log_result(index, &result);
                (index, result)
            })
            .buffer_unordered(jobs)
            .collect()
            .await;

        let report = BatchReport::from_results(started_at, results);
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Batch finished"
        );
        report
    }
}

fn log_result(index: u32, result: &Result<ImageOutcome, ImageError>) {
    match result {
        Ok(outcome) => info!(
            index,
            bin = %outcome.bin_path.display(),
            c = %outcome.c_path.display(),
            "Card converted"
        ),
        Err(e @ ImageError::Retrieve(_)) => {
            warn!(index, stage = %e.stage(), error = %e, "Skipping card")
        }
        Err(e) => error!(index, stage = %e.stage(), error = %e, "Card failed"),
    }
}
