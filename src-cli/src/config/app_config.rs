//! Runtime application configuration: defaults, then environment, then CLI overrides.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use image_processor::TargetDimensions;

use super::defaults::{DEFAULT_SETTINGS, keys};
use super::validation::validate_setting;

/// Fully validated runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub source_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub first_index: u32,
    pub last_index: u32,
    pub target: TargetDimensions,
    pub name_prefix: String,
    pub jobs: usize,
    pub write_previews: bool,
    pub save_originals: bool,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.sacred-texts.com/tarot/pkt/img/ar{index}.jpg".into(),
            source_dir: None,
            output_dir: PathBuf::from("output"),
            first_index: 0,
            last_index: 21,
            target: TargetDimensions::STANDARD,
            name_prefix: "ar".into(),
            jobs: 1,
            write_previews: true,
            save_originals: true,
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Load configuration, asking `lookup` for each key and falling back to
    /// the built-in default. Every value is validated.
    pub fn load<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = HashMap::new();
        for key in keys() {
            let value = lookup(key)
                .or_else(|| DEFAULT_SETTINGS.get(key).map(|d| d.default.to_string()))
                .unwrap_or_default();
            validate_setting(key, &value)
                .map_err(|e| anyhow::anyhow!("validation error for {key}={value:?}: {e}"))?;
            values.insert(key, value);
        }
        let g = |key: &str| lookup_value(&values, key);

        let first_index = parse_num(g("TAROT_FIRST_INDEX"), "TAROT_FIRST_INDEX")?;
        let last_index = parse_num(g("TAROT_LAST_INDEX"), "TAROT_LAST_INDEX")?;
        if first_index > last_index {
            bail!("TAROT_FIRST_INDEX ({first_index}) must not exceed TAROT_LAST_INDEX ({last_index})");
        }

        let source_dir = match g("TAROT_SOURCE_DIR") {
            "" => None,
            dir => Some(PathBuf::from(dir)),
        };

        Ok(Self {
            base_url: g("TAROT_BASE_URL").to_string(),
            source_dir,
            output_dir: PathBuf::from(g("TAROT_OUTPUT_DIR")),
            first_index,
            last_index,
            target: TargetDimensions::new(
                parse_num(g("TAROT_TARGET_WIDTH"), "TAROT_TARGET_WIDTH")?,
                parse_num(g("TAROT_TARGET_HEIGHT"), "TAROT_TARGET_HEIGHT")?,
            ),
            name_prefix: g("TAROT_NAME_PREFIX").to_string(),
            jobs: parse_num(g("TAROT_JOBS"), "TAROT_JOBS")?,
            write_previews: g("TAROT_WRITE_PREVIEWS") == "true",
            save_originals: g("TAROT_SAVE_ORIGINALS") == "true",
            http_timeout: Duration::from_secs(parse_num(
                g("TAROT_HTTP_TIMEOUT_SECS"),
                "TAROT_HTTP_TIMEOUT_SECS",
            )?),
        })
    }

    /// Card indices to process.
    pub fn indices(&self) -> RangeInclusive<u32> {
        self.first_index..=self.last_index
    }
}

fn lookup_value<'a>(values: &'a HashMap<&str, String>, key: &str) -> &'a str {
    values.get(key).map_or("", String::as_str)
}

fn parse_num<T: std::str::FromStr>(s: &str, key: &str) -> Result<T, anyhow::Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    s.parse().with_context(|| format!("{key} is not a valid number: {s:?}"))
}
