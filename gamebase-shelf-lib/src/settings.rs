//! Shared settings file (`~/.config/gamebase-shelf/settings.toml`).
//!
//! Values here sit between command-line flags and built-in defaults:
//! a flag always wins, an unset flag falls back to the file, and a missing
//! file falls back to [`OrganizeSettings::default`].

use std::io;
use std::path::{Path, PathBuf};

use gamebase_shelf_core::{DEFAULT_TEMPLATE, PathTemplate, TemplateError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub organize: OrganizeSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeSettings {
    pub template: String,
    pub english_only: bool,
    pub include_no_text: bool,
    pub collapse_publishers: bool,
    pub keep_zipped: bool,
    pub move_files: bool,
}

impl Default for OrganizeSettings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            english_only: false,
            include_no_text: false,
            collapse_publishers: false,
            keep_zipped: false,
            move_files: false,
        }
    }
}

impl OrganizeSettings {
    /// Replace the template after checking every placeholder is known.
    pub fn set_template(&mut self, template: &str) -> Result<(), TemplateError> {
        PathTemplate::parse(template)?;
        self.template = template.to_string();
        Ok(())
    }
}

/// Returns `~/.config/gamebase-shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gamebase-shelf").join("settings.toml")
}

/// Load settings from the shared file, returning defaults if missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> AppSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Save settings to the shared file.
pub fn save_settings(settings: &AppSettings) -> io::Result<()> {
    save_settings_to(settings, &settings_path())
}

/// Save atomically (write to temp, then rename).
pub fn save_settings_to(settings: &AppSettings, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&tmp.path().join("settings.toml"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.organize.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "organize = [not toml").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn partial_table_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[organize]\nenglish_only = true\n").unwrap();
        let settings = load_settings_from(&path);
        assert!(settings.organize.english_only);
        assert!(!settings.organize.keep_zipped);
        assert_eq!(settings.organize.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/settings.toml");
        let mut settings = AppSettings::default();
        settings.organize.set_template("{publisher}/{name}").unwrap();
        settings.organize.move_files = true;

        save_settings_to(&settings, &path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn set_template_rejects_unknown_field() {
        let mut organize = OrganizeSettings::default();
        let err = organize.set_template("{genre}/{name}").unwrap_err();
        assert!(err.to_string().contains("{genre}"));
        assert_eq!(organize.template, DEFAULT_TEMPLATE);
    }
}
