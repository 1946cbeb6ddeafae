use serde::{Deserialize, Serialize};

/// Configuration from stint.toml. Every field has a default so a missing or
/// partial file still yields a usable record. The settings are threaded
/// explicitly into every toggle/render call; nothing reads them ambiently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Append the elapsed duration when completing a task
    #[serde(default = "default_true")]
    pub auto_append_duration: bool,
    /// Where the duration lands on DONE lines
    #[serde(default)]
    pub duration_position: DurationPosition,
    /// Host hint: bind the toggle hotkey on startup
    #[serde(default = "default_true")]
    pub register_hotkey: bool,
    /// Host hint: decorate lines in the live/editable view
    #[serde(default = "default_true")]
    pub enable_live_preview: bool,
    /// Host hint: decorate lines in the read-only view
    #[serde(default)]
    pub enable_reading_mode: bool,
    /// Show a status badge for DOING/LATER/NOW when rendering
    #[serde(default = "default_true")]
    pub show_status_label: bool,
    /// Strike through completed content when rendering
    #[serde(default)]
    pub enable_strikethrough: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPosition {
    /// `- DONE buy milk 5分钟`
    #[default]
    End,
    /// `- DONE 5分钟 buy milk`
    AfterStatus,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            auto_append_duration: true,
            duration_position: DurationPosition::End,
            register_hotkey: true,
            enable_live_preview: true,
            enable_reading_mode: false,
            show_status_label: true,
            enable_strikethrough: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            "auto_append_duration = false\nduration_position = \"after_status\"\n",
        )
        .unwrap();
        assert!(!settings.auto_append_duration);
        assert_eq!(settings.duration_position, DurationPosition::AfterStatus);
        assert!(settings.register_hotkey);
        assert!(!settings.enable_strikethrough);
    }

    #[test]
    fn duration_position_serde_names() {
        assert_eq!(
            serde_json::to_string(&DurationPosition::AfterStatus).unwrap(),
            "\"after_status\""
        );
        assert_eq!(serde_json::to_string(&DurationPosition::End).unwrap(), "\"end\"");
    }
}
