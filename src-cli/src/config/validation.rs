//! Setting value validation.

use bitmap_export::format::c_array::is_c_identifier;
use regex::Regex;
use std::sync::LazyLock;

static RE_HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/]+\S*$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "TAROT_BASE_URL" => {
            if !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
            if !value.contains("{index}") {
                return Err("must contain the {index} placeholder".into());
            }
        }
        "TAROT_OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "TAROT_FIRST_INDEX" | "TAROT_LAST_INDEX" => validate_int_range(value, 0, 99)?,
        "TAROT_TARGET_WIDTH" => {
            validate_int_range(value, 8, 4096)?;
            let v: u32 = value.parse().map_err(|_| "must be an integer")?;
            if v % 8 != 0 {
                return Err("must be a multiple of 8".into());
            }
        }
        "TAROT_TARGET_HEIGHT" => validate_int_range(value, 1, 4096)?,
        "TAROT_NAME_PREFIX" => {
            if !is_c_identifier(value) {
                return Err("must start a valid C identifier (letters, digits, '_')".into());
            }
        }
        "TAROT_JOBS" => validate_int_range(value, 1, 16)?,
        "TAROT_HTTP_TIMEOUT_SECS" => validate_int_range(value, 1, 300)?,
        // Boolean settings
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u32, max: u32) -> Result<(), String> {
    let v: u32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "TAROT_WRITE_PREVIEWS" | "TAROT_SAVE_ORIGINALS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boolean() {
        assert!(validate_setting("TAROT_WRITE_PREVIEWS", "true").is_ok());
        assert!(validate_setting("TAROT_WRITE_PREVIEWS", "false").is_ok());
        assert!(validate_setting("TAROT_WRITE_PREVIEWS", "yes").is_err());
    }

    #[test]
    fn test_valid_base_url() {
        assert!(validate_setting("TAROT_BASE_URL", "https://example.com/ar{index}.jpg").is_ok());
        assert!(validate_setting("TAROT_BASE_URL", "http://localhost:8000/{index}.png").is_ok());
        assert!(validate_setting("TAROT_BASE_URL", "https://example.com/ar.jpg").is_err());
        assert!(validate_setting("TAROT_BASE_URL", "ftp://example.com/{index}").is_err());
        assert!(validate_setting("TAROT_BASE_URL", "").is_err());
    }

    #[test]
    fn test_valid_target_width() {
        assert!(validate_setting("TAROT_TARGET_WIDTH", "128").is_ok());
        assert!(validate_setting("TAROT_TARGET_WIDTH", "8").is_ok());
        assert!(validate_setting("TAROT_TARGET_WIDTH", "130").is_err());
        assert!(validate_setting("TAROT_TARGET_WIDTH", "0").is_err());
        assert!(validate_setting("TAROT_TARGET_WIDTH", "wide").is_err());
    }

    #[test]
    fn test_valid_name_prefix() {
        assert!(validate_setting("TAROT_NAME_PREFIX", "ar").is_ok());
        assert!(validate_setting("TAROT_NAME_PREFIX", "card_").is_ok());
        assert!(validate_setting("TAROT_NAME_PREFIX", "9ar").is_err());
        assert!(validate_setting("TAROT_NAME_PREFIX", "").is_err());
    }

    #[test]
    fn test_valid_jobs() {
        assert!(validate_setting("TAROT_JOBS", "1").is_ok());
        assert!(validate_setting("TAROT_JOBS", "16").is_ok());
        assert!(validate_setting("TAROT_JOBS", "0").is_err());
        assert!(validate_setting("TAROT_JOBS", "17").is_err());
    }

    #[test]
    fn test_unknown_key_passes() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
