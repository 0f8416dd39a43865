//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "TAROT_BASE_URL",
        "https://www.sacred-texts.com/tarot/pkt/img/ar{index}.jpg",
        "HTTP URL template, {index} becomes the 2-digit card index",
    ),
    (
        "TAROT_SOURCE_DIR",
        "",
        "Read originals from this directory instead of downloading",
    ),
    ("TAROT_OUTPUT_DIR", "output", "Root directory for all outputs"),
    ("TAROT_FIRST_INDEX", "0", "First card index (inclusive)"),
    ("TAROT_LAST_INDEX", "21", "Last card index (inclusive)"),
    ("TAROT_TARGET_WIDTH", "128", "Bitmap width in pixels, multiple of 8"),
    ("TAROT_TARGET_HEIGHT", "218", "Bitmap height in pixels"),
    (
        "TAROT_NAME_PREFIX",
        "ar",
        "File stem and C array name prefix",
    ),
    ("TAROT_JOBS", "1", "Number of cards processed concurrently"),
    (
        "TAROT_WRITE_PREVIEWS",
        "true",
        "Write gray, resized and 1-bit PNG previews",
    ),
    (
        "TAROT_SAVE_ORIGINALS",
        "true",
        "Keep a copy of every retrieved original",
    ),
    (
        "TAROT_HTTP_TIMEOUT_SECS",
        "30",
        "Per-request HTTP timeout in seconds",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting keys in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, _, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn test_defaults_are_valid() {
        for def in DEFAULT_SETTINGS.values() {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
        }
    }

    #[test]
    fn test_keys_are_unique() {
        assert_eq!(keys().count(), DEFAULT_SETTINGS.len());
    }

    #[test]
    fn test_standard_target_defaults() {
        assert_eq!(get_default("TAROT_TARGET_WIDTH"), Some("128"));
        assert_eq!(get_default("TAROT_TARGET_HEIGHT"), Some("218"));
        assert_eq!(get_default("NOT_A_SETTING"), None);
    }
}
