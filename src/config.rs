use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;
use crate::input::Action;
use crate::style::PaletteOverrides;

/// Single-character key bindings for normal mode
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: char,
    pub filter: char,
    pub sort: char,
    pub toggle_column: char,
    pub toggle_theme: char,
    pub left: char,
    pub right: char,
    pub down: char,
    pub up: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: 'q',
            filter: '/',
            sort: 's',
            toggle_column: 'c',
            toggle_theme: 't',
            left: 'h',
            right: 'l',
            down: 'j',
            up: 'k',
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, c: char) -> Option<Action> {
        let table = [
            (self.quit, Action::Quit),
            (self.filter, Action::StartFilter),
            (self.sort, Action::SortColumn),
            (self.toggle_column, Action::ToggleColumn),
            (self.toggle_theme, Action::ToggleTheme),
            (self.left, Action::MoveLeft),
            (self.right, Action::MoveRight),
            (self.down, Action::MoveDown),
            (self.up, Action::MoveUp),
        ];
        table.iter().find(|(k, _)| *k == c).map(|&(_, action)| action)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub delimiter: Option<char>,
    pub has_header: bool,
    pub preferences_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub keys: KeyBindings,
    pub palette: PaletteOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            preferences_path: None,
            log_file: None,
            keys: KeyBindings::default(),
            palette: PaletteOverrides::default(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/tabview`
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tabview"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| Self::config_dir().map(|d| d.join("tabview.log")))
    }

    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(crate::theme::FilePreferenceStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.has_header);
        assert_eq!(config.delimiter, None);
        assert_eq!(config.keys, KeyBindings::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            delimiter = ";"
            has_header = false
            preferences_path = "/tmp/prefs.toml"

            [keys]
            toggle_theme = "T"

            [palette.light]
            cell = { fg = "blue" }
            "#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.delimiter, Some(';'));
        assert!(!config.has_header);
        assert_eq!(config.preferences_path(), Some(PathBuf::from("/tmp/prefs.toml")));
        assert_eq!(config.keys.toggle_theme, 'T');
        assert_eq!(config.keys.sort, 's');
        assert!(config.palette.light.is_some());
        assert!(config.palette.dark.is_none());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "has_header = \"maybe\"").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_action_for_custom_binding() {
        let keys = KeyBindings { toggle_theme: 'T', ..Default::default() };
        assert_eq!(keys.action_for('T'), Some(Action::ToggleTheme));
        assert_eq!(keys.action_for('t'), None);
        assert_eq!(keys.action_for('q'), Some(Action::Quit));
    }
}
