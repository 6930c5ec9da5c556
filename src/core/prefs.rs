//! Persisted panel preferences
//!
//! A small key -> value store backed by a JSON file in the user's config
//! directory, holding the last chosen glyph, layer id and the
//! "replace selected text" flag. The store's API is infallible by design:
//! storage failures are logged and swallowed, never propagated, so a broken
//! disk can not block the panel.

use bevy::prelude::*;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{anyhow, AppResult, Context};

/// Preference key for the last selected glyph name (string or null)
pub const PREF_GLYPH: &str = "glyph";
/// Preference key for the last selected layer id (string or null)
pub const PREF_LAYER: &str = "layer";
/// Preference key for the "replace selected text" toggle (bool)
pub const PREF_USE_SELECTED: &str = "use_selected";

/// The persisted key -> value store
///
/// Values are written through to disk on every `set_*` call and read back
/// once at startup.
#[derive(Resource, Debug)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::load(default_path())
    }
}

impl Preferences {
    /// Loads the store from `path`. A missing file yields an empty store; a
    /// present-but-unreadable file is reported once to the log and also
    /// yields an empty store.
    pub fn load(path: Option<PathBuf>) -> Self {
        let mut prefs = Self {
            path,
            values: Map::new(),
        };
        match &prefs.path {
            Some(path) => match read_values(path) {
                Ok(values) => prefs.values = values,
                Err(err) => warn!(
                    "Could not load preferences from {}: {:#}",
                    path.display(),
                    err
                ),
            },
            None => {
                warn!("No config directory available; preferences will not persist");
            }
        }
        prefs
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    /// Stores a string value; `None` is stored as JSON null, matching a
    /// cleared selection.
    pub fn set_string(&mut self, key: &str, value: Option<&str>) {
        let value = match value {
            Some(text) => Value::String(text.to_string()),
            None => Value::Null,
        };
        self.set_value(key, value);
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set_value(key, Value::Bool(value));
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.save();
    }

    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(err) = write_values(path, &self.values) {
            warn!(
                "Could not save preferences to {}: {:#}",
                path.display(),
                err
            );
        }
    }
}

fn read_values(path: &Path) -> AppResult<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    match serde_json::from_str(&text)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected a JSON object, found {other}")),
    }
}

fn write_values(path: &Path, values: &Map<String, Value>) -> AppResult<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let text = serde_json::to_string_pretty(&Value::Object(values.clone()))?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// Default preference file location under the user's config directory
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "layerswap", "layerswap")
        .map(|dirs| dirs.config_dir().join("preferences.json"))
}
