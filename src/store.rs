//! Settings file loading.
//!
//! The settings file is optional JSON in the working directory:
//!
//! ```json
//! {
//!   "input_file": "docs/README.md",
//!   "theme": "Dark",
//!   "css_mode": "Embed",
//!   "output_file": "site/readme.html"
//! }
//! ```
//!
//! Every key is optional and unknown keys are ignored. `theme` and
//! `css_mode` are matched case-insensitively; a value outside the known set
//! is treated as if the key were missing, so the resolver falls back to its
//! normal default/prompt path instead of failing. The file is only ever read.

use crate::settings::{CssMode, Theme};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error reading or parsing {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },
}

/// The subset of settings that can live on disk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    #[serde(deserialize_with = "non_blank")]
    pub input_file: Option<PathBuf>,
    #[serde(deserialize_with = "lenient_enum")]
    pub theme: Option<Theme>,
    #[serde(deserialize_with = "lenient_enum")]
    pub css_mode: Option<CssMode>,
    #[serde(deserialize_with = "non_blank")]
    pub output_file: Option<PathBuf>,
}

/// Strings that are empty or whitespace count as absent.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
}

/// Accept any JSON value; keep it only if it names a known variant.
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// Parse settings from JSON text. The top level must be an object.
pub fn parse(content: &str) -> Result<PersistedSettings, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom(
            "expected a JSON object at the top level",
        ));
    }
    serde_json::from_value(value)
}

/// Load the settings file at `path`.
///
/// Returns `Ok(None)` if the file does not exist. A file that exists but
/// cannot be read or parsed yields [`StoreError::Corrupt`]; callers are
/// expected to warn and carry on with empty settings.
pub fn load(path: &Path) -> Result<Option<PersistedSettings>, StoreError> {
    let corrupt = |message: String| StoreError::Corrupt {
        path: path.to_path_buf(),
        message,
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no settings file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(corrupt(e.to_string())),
    };

    let settings = parse(&content).map_err(|e| corrupt(e.to_string()))?;
    log::debug!("loaded settings from {}: {:?}", path.display(), settings);
    Ok(Some(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let loaded = load(&tmp.path().join(DEFAULT_SETTINGS_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_reads_all_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(
            &path,
            r#"{
                "input_file": "README.md",
                "theme": "Dark",
                "css_mode": "Embed",
                "output_file": "out/readme.html"
            }"#,
        )
        .unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.input_file, Some(PathBuf::from("README.md")));
        assert_eq!(loaded.theme, Some(Theme::Dark));
        assert_eq!(loaded.css_mode, Some(CssMode::Embed));
        assert_eq!(loaded.output_file, Some(PathBuf::from("out/readme.html")));
    }

    #[test]
    fn enums_are_case_insensitive() {
        let loaded = parse(r#"{"theme": "dark", "css_mode": "cdn"}"#).unwrap();
        assert_eq!(loaded.theme, Some(Theme::Dark));
        assert_eq!(loaded.css_mode, Some(CssMode::Cdn));
    }

    #[test]
    fn unknown_enum_values_are_absent() {
        let loaded = parse(r#"{"theme": "Solarized", "css_mode": 3}"#).unwrap();
        assert_eq!(loaded.theme, None);
        assert_eq!(loaded.css_mode, None);
    }

    #[test]
    fn null_and_blank_values_are_absent() {
        let loaded = parse(r#"{"input_file": "  ", "output_file": null, "theme": null}"#).unwrap();
        assert_eq!(loaded, PersistedSettings::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let loaded = parse(r#"{"input_file": "a.md", "author": "me"}"#).unwrap();
        assert_eq!(loaded.input_file, Some(PathBuf::from("a.md")));
    }

    #[test]
    fn empty_object_is_all_defaults() {
        assert_eq!(parse("{}").unwrap(), PersistedSettings::default());
    }

    #[test]
    fn corrupt_file_reports_path_and_message() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = load(&path).unwrap_err();
        let StoreError::Corrupt { path: reported, message } = &err;
        assert_eq!(reported, &path);
        assert!(!message.is_empty());
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, r#"["input_file"]"#).unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn positional_array_is_not_settings() {
        let err = parse(r#"["notes.md", "Dark", "Embed", "out.html"]"#).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn scalar_top_level_is_corrupt() {
        assert!(parse("42").is_err());
        assert!(parse(r#""notes.md""#).is_err());
        assert!(parse("null").is_err());
    }
}
