//! Command-line interface.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Convert tarot card images into packed 1-bit bitmaps and C arrays
#[derive(Debug, Parser)]
#[command(name = "tarot-bitmap", version)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load settings from this .env file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a numbered range of cards (default)
    Batch(BatchArgs),
    /// Convert a single local image
    Convert(ConvertArgs),
}

#[derive(Debug, Default, Args)]
pub struct BatchArgs {
    /// Output root directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read originals from this directory instead of downloading
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// URL template containing {index}
    #[arg(long)]
    pub base_url: Option<String>,

    /// First card index
    #[arg(long)]
    pub first: Option<u32>,

    /// Last card index (inclusive)
    #[arg(long)]
    pub last: Option<u32>,

    /// Cards processed concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Target width in pixels (multiple of 8)
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// File name prefix, e.g. "ar" for ar00.bin
    #[arg(long)]
    pub prefix: Option<String>,

    /// Skip the grayscale, resized and 1-bit PNG previews
    #[arg(long)]
    pub no_previews: bool,

    /// Don't keep the retrieved originals
    #[arg(long)]
    pub no_originals: bool,
}

impl BatchArgs {
    /// Settings given on the command line, keyed like the environment.
    pub fn overrides(&self) -> HashMap<&'static str, String> {
        let mut map = HashMap::new();
        let mut set = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                map.insert(key, value);
            }
        };
        set(
            "TAROT_OUTPUT_DIR",
            self.output.as_ref().map(|p| p.display().to_string()),
        );
        set(
            "TAROT_SOURCE_DIR",
            self.source_dir.as_ref().map(|p| p.display().to_string()),
        );
        set("TAROT_BASE_URL", self.base_url.clone());
        set("TAROT_FIRST_INDEX", self.first.map(|v| v.to_string()));
        set("TAROT_LAST_INDEX", self.last.map(|v| v.to_string()));
        set("TAROT_JOBS", self.jobs.map(|v| v.to_string()));
        set("TAROT_TARGET_WIDTH", self.width.map(|v| v.to_string()));
        set("TAROT_TARGET_HEIGHT", self.height.map(|v| v.to_string()));
        set("TAROT_NAME_PREFIX", self.prefix.clone());
        set(
            "TAROT_WRITE_PREVIEWS",
            self.no_previews.then(|| "false".to_string()),
        );
        set(
            "TAROT_SAVE_ORIGINALS",
            self.no_originals.then(|| "false".to_string()),
        );
        map
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Image file to convert
    #[arg(short, long)]
    pub input: PathBuf,

    /// C array name and output file stem (defaults to the input file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Target width in pixels (multiple of 8)
    #[arg(long, default_value_t = 128)]
    pub width: u32,

    /// Target height in pixels
    #[arg(long, default_value_t = 218)]
    pub height: u32,
}
