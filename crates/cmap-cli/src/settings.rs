//! User settings loaded from a TOML file.
//!
//! Every field has a default, so a partial file (or none at all) is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use cmap_ingest::{DEFAULT_EXTENSIONS, Delimiter, MAX_UPLOAD_SIZE, UploadOptions};
use cmap_map::{ConflictPolicy, DEFAULT_MIN_CONFIDENCE, Matcher};

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default captions used when none are given on the command line.
    pub captions: Vec<String>,

    /// How uploads are read and parsed.
    pub input: InputSettings,

    /// Matcher threshold and conflict policy.
    pub matching: MatchingSettings,

    /// Chat loop behavior.
    pub chat: ChatSettings,
}

impl Settings {
    /// Loads settings from `explicit`, else the platform config file.
    ///
    /// A missing file yields defaults. A malformed file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::config_path() {
                Some(path) => Self::load_from(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("read settings {}", path.display()));
            }
        };
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("parse settings {}", path.display()))?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Default config file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "CaptionMap", "cmap")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.matching.min_confidence;
        if !(0.0..=1.0).contains(&threshold) {
            bail!("matching.min_confidence must be between 0 and 1, got {threshold}");
        }
        if self.input.accepted_extensions.is_empty() {
            bail!("input.accepted_extensions must not be empty");
        }
        Ok(())
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub delimiter: Delimiter,
    /// Treat the first row as column names.
    pub has_header: bool,
    /// Extensions without the dot.
    pub accepted_extensions: Vec<String>,
    /// Size limit in bytes.
    pub max_file_size: u64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            has_header: true,
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            max_file_size: MAX_UPLOAD_SIZE,
        }
    }
}

impl InputSettings {
    pub fn upload_options(&self) -> UploadOptions {
        UploadOptions::default()
            .with_extensions(self.accepted_extensions.iter().cloned())
            .with_max_size(self.max_file_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub min_confidence: f32,
    pub policy: ConflictPolicy,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            policy: ConflictPolicy::default(),
        }
    }
}

impl MatchingSettings {
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.min_confidence)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Pause before each assistant reply, in milliseconds.
    pub typing_delay_ms: u64,
}

impl ChatSettings {
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_settings(
            r#"
captions = ["Forename", "Surname"]

[input]
delimiter = "tab"

[matching]
policy = "first-claim"
"#,
        );
        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.captions, ["Forename", "Surname"]);
        assert_eq!(settings.input.delimiter, Delimiter::Tab);
        assert!(settings.input.has_header);
        assert_eq!(settings.input.max_file_size, MAX_UPLOAD_SIZE);
        assert_eq!(settings.matching.policy, ConflictPolicy::FirstClaim);
        assert_eq!(settings.matching.min_confidence, 0.5);
        assert_eq!(settings.chat.typing_delay(), Duration::ZERO);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = write_settings("[matching]\nmin_confidence = \"high\"\n");
        assert!(Settings::load_from(file.path()).is_err());

        let file = write_settings("[matching]\nmin_confidence = 1.5\n");
        let error = Settings::load_from(file.path()).unwrap_err();
        assert!(error.to_string().contains("min_confidence"));
    }

    #[test]
    fn test_upload_options_follow_input() {
        let input = InputSettings {
            accepted_extensions: vec!["dat".to_string()],
            max_file_size: 10,
            ..InputSettings::default()
        };
        let options = input.upload_options();
        assert_eq!(options.accepted_extensions, ["dat"]);
        assert_eq!(options.max_size, 10);
    }
}
