//! Light/dark theme state, its persisted preference and the system fallback

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::error::PreferenceError;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Glyph for the toggle button: the theme you would switch to, not the current one
    pub fn toggle_glyph(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "☀️",
            ThemeMode::Light => "🌙",
        }
    }
}

/// Simple key -> string store for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Preferences kept in memory only; they do not survive a restart
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat TOML table on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config dir>/tabview/preferences.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tabview").join("preferences.toml"))
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // an unreadable file is replaced rather than blocking the write
        let mut values = self.load().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&values)?)?;
        Ok(())
    }
}

/// Read-only "does the environment prefer dark mode" signal
pub trait ColorSchemeProbe {
    fn prefers_dark(&self) -> bool;
}

/// Reads the `COLORFGBG` convention ("fg;bg") exported by many terminals
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvColorScheme;

impl EnvColorScheme {
    pub fn from_colorfgbg(value: &str) -> bool {
        match value.rsplit(';').next().and_then(|bg| bg.trim().parse::<u8>().ok()) {
            Some(bg) => bg <= 6 || bg == 8,
            None => false,
        }
    }
}

impl ColorSchemeProbe for EnvColorScheme {
    fn prefers_dark(&self) -> bool {
        env::var("COLORFGBG")
            .map(|v| Self::from_colorfgbg(&v))
            .unwrap_or(false)
    }
}

impl ColorSchemeProbe for bool {
    fn prefers_dark(&self) -> bool {
        *self
    }
}

/// Current theme plus the glyph shown on the toggle control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeControl {
    mode: ThemeMode,
    glyph: &'static str,
}

impl ThemeControl {
    /// Resolve the startup theme: persisted preference first, then the system signal
    pub fn init_theme(store: &dyn PreferenceStore, probe: &dyn ColorSchemeProbe) -> Self {
        let saved = match store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(ThemeMode::parse),
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                None
            }
        };

        let mode = match saved {
            Some(mode) => mode,
            None if probe.prefers_dark() => ThemeMode::Dark,
            None => ThemeMode::Light,
        };
        info!(theme = mode.as_str(), persisted = saved.is_some(), "theme initialized");

        let mut control = Self { mode: ThemeMode::Light, glyph: "" };
        control.apply(mode);
        control
    }

    /// Flip to the opposite theme and persist it. Persistence failures are logged only.
    pub fn toggle_theme(&mut self, store: &mut dyn PreferenceStore) -> ThemeMode {
        let next = self.mode.toggled();
        if let Err(e) = store.set(THEME_KEY, next.as_str()) {
            warn!(error = %e, "could not persist theme preference");
        }
        self.apply(next);
        next
    }

    fn apply(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.glyph = mode.toggle_glyph();
        debug!(theme = mode.as_str(), "theme applied");
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn glyph(&self) -> &'static str {
        self.glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::tempdir;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    #[test]
    fn test_init_uses_system_preference_when_unset() {
        let store = MemoryPreferenceStore::new();
        let control = ThemeControl::init_theme(&store, &true);
        assert_eq!(control.mode(), ThemeMode::Dark);
        assert_eq!(control.glyph(), "☀️");

        let control = ThemeControl::init_theme(&store, &false);
        assert_eq!(control.mode(), ThemeMode::Light);
        assert_eq!(control.glyph(), "🌙");
    }

    #[test]
    fn test_init_prefers_saved_value() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "light").unwrap();
        let control = ThemeControl::init_theme(&store, &true);
        assert_eq!(control.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_init_ignores_unknown_saved_value() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        let control = ThemeControl::init_theme(&store, &true);
        assert_eq!(control.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggle_persists_and_flips_glyph() {
        let mut store = MemoryPreferenceStore::new();
        let mut control = ThemeControl::init_theme(&store, &false);

        assert_eq!(control.toggle_theme(&mut store), ThemeMode::Dark);
        assert_eq!(control.glyph(), "☀️");
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(control.toggle_theme(&mut store), ThemeMode::Light);
        assert_eq!(control.glyph(), "🌙");
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        // next start picks up the saved value regardless of the system signal
        assert_eq!(ThemeControl::init_theme(&store, &true).mode(), ThemeMode::Light);
    }

    #[test]
    fn test_init_matches_toggled_state() {
        let mut store = MemoryPreferenceStore::new();
        let mut control = ThemeControl::init_theme(&store, &true);
        let initial = control.clone();

        control.toggle_theme(&mut store);
        control.toggle_theme(&mut store);
        assert_eq!(control, initial);
        assert_eq!(ThemeControl::init_theme(&store, &false), initial);
    }

    #[test]
    fn test_broken_store_still_toggles() {
        let mut store = BrokenStore;
        let mut control = ThemeControl::init_theme(&store, &true);
        assert_eq!(control.mode(), ThemeMode::Dark);
        assert_eq!(control.toggle_theme(&mut store), ThemeMode::Light);
        assert_eq!(control.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");
        let mut store = FilePreferenceStore::new(path.clone());

        assert_eq!(store.get(THEME_KEY).unwrap(), None);
        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "value").unwrap();

        let reopened = FilePreferenceStore::new(path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "theme = [not valid").unwrap();
        let mut store = FilePreferenceStore::new(path);

        assert!(store.get(THEME_KEY).is_err());
        let control = ThemeControl::init_theme(&store, &false);
        assert_eq!(control.mode(), ThemeMode::Light);

        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_colorfgbg() {
        assert!(EnvColorScheme::from_colorfgbg("15;0"));
        assert!(EnvColorScheme::from_colorfgbg("15;default;8"));
        assert!(!EnvColorScheme::from_colorfgbg("0;15"));
        assert!(!EnvColorScheme::from_colorfgbg("0;7"));
        assert!(!EnvColorScheme::from_colorfgbg(""));
    }
}
