//! Persistence of settings in host-provided key/value storage.
//!
//! Settings are split into namespaces, one per storage key: the RGB text
//! generator's fields live under `rgb`, the animated TAB generator's under
//! `animtab`, and the user's saved presets under `presets`. Each value is a
//! JSON object holding only that namespace's fields.
//!
//! The host does the actual storing (cookies, local storage, a file). This
//! module only produces and consumes the values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Preset, PresetError, Settings, apply_query_pairs, into_object};

// ============================================================================
// Namespace
// ============================================================================

/// A storage key and the settings fields stored under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Shared text and color fields.
    Rgb,
    /// Animation-only fields.
    AnimTab,
    /// The saved preset list, see [`SavedPresets`].
    Presets,
}

impl Namespace {
    /// Namespaces holding settings fields, in load order.
    pub const SETTINGS: [Namespace; 2] = [Namespace::Rgb, Namespace::AnimTab];

    /// The storage key.
    pub fn key(self) -> &'static str {
        match self {
            Namespace::Rgb => "rgb",
            Namespace::AnimTab => "animtab",
            Namespace::Presets => "presets",
        }
    }

    /// The JSON field names stored under this namespace.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Namespace::Rgb => &[
                "version",
                "colors",
                "text",
                "format",
                "customFormat",
                "prefixsuffix",
                "trimspaces",
                "bold",
                "italic",
                "underline",
                "strikethrough",
                "colorlength",
            ],
            Namespace::AnimTab => &["version", "name", "type", "speed", "length", "outputFormat"],
            Namespace::Presets => &[],
        }
    }

    /// Encodes this namespace's fields of `settings` as a JSON object string.
    pub fn encode(self, settings: &Settings) -> Result<String, PresetError> {
        let Value::Object(mut map) = serde_json::to_value(settings).map_err(PresetError::Encode)? else {
            return Ok("{}".to_string());
        };
        let fields = self.fields();
        map.retain(|key, _| fields.contains(&key.as_str()));
        serde_json::to_string(&map).map_err(PresetError::Encode)
    }

    /// Applies a stored value on top of `settings`.
    ///
    /// Fields outside this namespace are ignored. Unless custom formats are
    /// enabled, stored `format` and `outputFormat` values are discarded so
    /// that the built-in defaults stay in effect.
    pub fn apply(self, raw: &str, settings: &mut Settings) -> Result<(), PresetError> {
        let value: Value = serde_json::from_str(raw).map_err(PresetError::Json)?;
        let mut map = into_object(value)?;

        let fields = self.fields();
        map.retain(|key, _| fields.contains(&key.as_str()));

        let custom_format = map
            .get("customFormat")
            .and_then(Value::as_bool)
            .unwrap_or(settings.custom_format);
        if !custom_format {
            for key in ["format", "outputFormat"] {
                if map.remove(key).is_some() {
                    tracing::debug!(namespace = self.key(), key, "discarding stored format without customFormat");
                }
            }
        }

        let preset = Preset::from_value(Value::Object(map))?;
        *settings = preset.apply_to(settings.clone());
        Ok(())
    }
}

/// Builds settings from defaults, stored namespaces and query pairs.
///
/// Namespaces load in order, then the query overrides them. A broken stored
/// value or query is logged and skipped; the rest still applies.
pub fn load_settings<F, K, V>(lookup: F, query: &[(K, V)]) -> Settings
where
    F: Fn(&str) -> Option<String>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut settings = Settings::default();
    for namespace in Namespace::SETTINGS {
        let Some(raw) = lookup(namespace.key()) else {
            continue;
        };
        if let Err(error) = namespace.apply(&raw, &mut settings) {
            tracing::warn!(namespace = namespace.key(), %error, "ignoring stored settings");
        }
    }
    if let Err(error) = apply_query_pairs(query, &mut settings) {
        tracing::warn!(%error, "ignoring query parameters");
    }
    settings
}

// ============================================================================
// SavedPresets
// ============================================================================

/// The user's named list of saved presets.
///
/// # JSON Format
///
/// ```json
/// { "savedPresets": [{ "version": 3, "text": "Hi" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPresets {
    #[serde(default)]
    saved_presets: Vec<Preset>,
}

impl SavedPresets {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved presets.
    pub fn len(&self) -> usize {
        self.saved_presets.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.saved_presets.is_empty()
    }

    /// Returns the preset at `index`.
    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.saved_presets.get(index)
    }

    /// Iterates in save order.
    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.saved_presets.iter()
    }

    /// Appends a preset unless an identical one is already saved.
    ///
    /// Returns true if it was added.
    pub fn save(&mut self, preset: Preset) -> bool {
        if self.saved_presets.contains(&preset) {
            tracing::debug!("preset already saved");
            return false;
        }
        self.saved_presets.push(preset);
        true
    }

    /// Overwrites the preset at `index`.
    pub fn replace(&mut self, index: usize, preset: Preset) -> Result<Preset, PresetError> {
        let slot = self
            .saved_presets
            .get_mut(index)
            .ok_or(PresetError::NoSuchPreset(index))?;
        Ok(std::mem::replace(slot, preset))
    }

    /// Removes and returns the preset at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Preset, PresetError> {
        if index >= self.saved_presets.len() {
            return Err(PresetError::NoSuchPreset(index));
        }
        Ok(self.saved_presets.remove(index))
    }

    /// Serializes the list for the `presets` namespace.
    pub fn to_json(&self) -> Result<String, PresetError> {
        serde_json::to_string(self).map_err(PresetError::Encode)
    }

    /// Reads a stored list. Entries go through preset migration.
    pub fn from_json(raw: &str) -> Result<Self, PresetError> {
        let value: Value = serde_json::from_str(raw).map_err(PresetError::Json)?;
        let mut map = into_object(value)?;
        let entries: Vec<Value> = match map.remove("savedPresets") {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value).map_err(PresetError::InvalidField)?,
        };
        let saved_presets = entries
            .into_iter()
            .map(Preset::from_value)
            .collect::<Result<_, _>>()?;
        Ok(Self { saved_presets })
    }
}

impl<'a> IntoIterator for &'a SavedPresets {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
