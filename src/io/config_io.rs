use std::fs;
use std::path::{Path, PathBuf};

use crate::model::settings::Settings;

/// Error type for settings I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not parse settings file: {0}")]
    Edit(#[from] toml_edit::TomlError),
    #[error("unknown setting '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load settings from a TOML file. A missing file yields the defaults;
/// fields absent from the file fall back to their per-field defaults.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

const BOOL_KEYS: &[&str] = &[
    "auto_append_duration",
    "register_hotkey",
    "enable_live_preview",
    "enable_reading_mode",
    "show_status_label",
    "enable_strikethrough",
];

/// Set one setting in the TOML file, preserving the file's formatting and
/// comments. Creates the file when absent.
pub fn set_value(path: &Path, key: &str, value: &str) -> Result<(), ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;

    if BOOL_KEYS.contains(&key) {
        let parsed: bool = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        })?;
        doc[key] = toml_edit::value(parsed);
    } else if key == "duration_position" {
        if value != "end" && value != "after_status" {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: "expected end or after_status".to_string(),
            });
        }
        doc[key] = toml_edit::value(value);
    } else {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    fs::write(path, doc.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::DurationPosition;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join("stint.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        fs::write(&path, "enable_strikethrough = true\n").unwrap();
        let settings = load_settings(&path).unwrap();
        assert!(settings.enable_strikethrough);
        assert!(settings.auto_append_duration);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        fs::write(&path, "auto_append_duration = maybe\n").unwrap();
        assert!(matches!(load_settings(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn set_value_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        set_value(&path, "auto_append_duration", "false").unwrap();
        let settings = load_settings(&path).unwrap();
        assert!(!settings.auto_append_duration);
    }

    #[test]
    fn set_value_preserves_formatting_and_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        fs::write(
            &path,
            "# my settings\nauto_append_duration = true\n\nshow_status_label = true\n",
        )
        .unwrap();
        set_value(&path, "show_status_label", "false").unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# my settings\n"));
        assert!(written.contains("auto_append_duration = true"));
        assert!(written.contains("show_status_label = false"));
    }

    #[test]
    fn set_duration_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        set_value(&path, "duration_position", "after_status").unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.duration_position, DurationPosition::AfterStatus);

        let err = set_value(&path, "duration_position", "middle").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        let err = set_value(&path, "font_size", "12").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(k) if k == "font_size"));
    }

    #[test]
    fn bad_bool_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stint.toml");
        let err = set_value(&path, "register_hotkey", "yes").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
