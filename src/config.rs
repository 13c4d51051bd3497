use directories::BaseDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str =
    "https://functions.poehali.dev/8555ac94-6715-45d9-8bf4-180be8a77aef";
pub const URL_ENV: &str = "FAMILY_CHAT_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("could not encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// The local user, shown on the profile tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub initials: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "You".into(),
            email: "you@family.com".into(),
            initials: "Y".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub profile: Profile,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            poll_interval_secs: 5,
            request_timeout_secs: 10,
            profile: Profile::default(),
        }
    }
}

impl Settings {
    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("family-chat.toml"))
    }

    /// Loads `<config dir>/family-chat.toml`, falling back to defaults when no
    /// config dir exists. `FAMILY_CHAT_URL` wins over the file.
    pub fn load() -> Self {
        let mut settings = match Self::toml_path() {
            Some(path) => Self::load_or_init(&path),
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(URL_ENV) {
            if !url.trim().is_empty() {
                settings.base_url = url;
            }
        }
        settings.base_url = crate::utils::normalize_url(&settings.base_url);
        settings
    }

    /// Reads `path`. A missing file is created with the defaults so there is
    /// something to edit; an unreadable one is ignored.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            match settings.save_to(path) {
                Ok(()) => info!("wrote default settings to {}", path.display()),
                Err(e) => warn!("could not write {}: {}", path.display(), e),
            }
            return settings;
        }
        Self::load_from(path).unwrap_or_else(|e| {
            warn!("ignoring {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family-chat.toml");
        fs::write(&path, "poll_interval_secs = 2\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.poll_interval(), Duration::from_secs(2));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.profile, Profile::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("family-chat.toml");
        let mut settings = Settings::default();
        settings.base_url = "http://localhost:9000".into();
        settings.profile.name = "Anna".into();

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("family-chat.toml");

        let settings = Settings::load_or_init(&path);
        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family-chat.toml");
        fs::write(&path, "base_url = [").unwrap();

        assert_eq!(Settings::load_or_init(&path), Settings::default());
        // the broken file is left for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "base_url = [");
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family-chat.toml");
        fs::write(&path, "poll_interval_secs = \"soon\"").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Decode(_))));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let settings = Settings { poll_interval_secs: 0, ..Settings::default() };
        assert_eq!(settings.poll_interval(), Duration::from_secs(1));
    }
}
