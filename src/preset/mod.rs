//! Generator settings and the shareable preset format.
//!
//! [`Settings`] is the complete configuration of the generators, with fixed
//! defaults. A [`Preset`] is the minimal diff of a `Settings` against those
//! defaults: every field equal to its default is left out on export, and
//! missing fields take their default again on import.
//!
//! # Example
//!
//! ```
//! use mc_gradient::{Preset, Settings};
//!
//! let settings = Settings { text: "Hi".into(), ..Settings::default() };
//!
//! // Export: only the changed field and the schema version survive
//! let json = Preset::export(&settings).to_json().unwrap();
//! assert_eq!(json, r#"{"version":3,"text":"Hi"}"#);
//!
//! // Import: merged back onto the defaults
//! let restored = Preset::import(&json).unwrap();
//! assert_eq!(restored, settings);
//! ```

pub mod gallery;
pub mod query;
pub mod storage;

pub use gallery::ColorPreset;
pub use query::{apply_query_pairs, to_query_pairs};
pub use storage::{Namespace, SavedPresets, load_settings};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::animation::{AnimationConfig, DEFAULT_OUTPUT_FORMAT, OutputType};
use crate::color::HexColor;
use crate::format::{FormatConfig, PrefixSuffix, RenderOptions, StyleFlags};
use crate::gradient::ColorStops;

/// Current preset schema version.
pub const CURRENT_VERSION: u32 = 3;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced while reading or writing presets.
#[derive(Debug, Error)]
pub enum PresetError {
    /// The input is not parseable JSON.
    #[error("preset is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The input parsed, but is not a JSON object.
    #[error("preset must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A field has the wrong shape.
    #[error("preset has an invalid field: {0}")]
    InvalidField(#[source] serde_json::Error),

    /// A query-string value could not be decoded.
    #[error("invalid value for query parameter {key:?}: {reason}")]
    InvalidQueryValue { key: String, reason: String },

    /// Settings could not be serialized.
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),

    /// No saved preset exists at the given index.
    #[error("no saved preset at index {0}")]
    NoSuchPreset(usize),
}

// ============================================================================
// Settings
// ============================================================================

/// The complete generator configuration.
///
/// Field names in JSON match the shared preset shape (`customFormat`,
/// `prefixsuffix`, `trimspaces`, `outputFormat`, `type`, `colorlength`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Settings {
    pub version: u32,
    pub name: String,
    pub colors: ColorStops,
    pub text: String,
    pub format: FormatConfig,
    #[serde(rename = "customFormat")]
    pub custom_format: bool,
    #[serde(rename = "prefixsuffix")]
    pub prefix_suffix: String,
    #[serde(rename = "trimspaces")]
    pub trim_spaces: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub speed: u32,
    pub length: usize,
    #[serde(rename = "outputFormat")]
    pub output_format: String,
    #[serde(rename = "type")]
    pub output_type: OutputType,
    #[serde(rename = "colorlength")]
    pub color_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            name: "logo".to_string(),
            colors: ColorStops::evenly_spaced([
                HexColor::from_channels(0x00, 0xFF, 0xE0),
                HexColor::from_channels(0xEB, 0x00, 0xFF),
            ]),
            text: "birdflop".to_string(),
            format: FormatConfig::default(),
            custom_format: false,
            prefix_suffix: String::new(),
            trim_spaces: true,
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            speed: 50,
            length: 1,
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            output_type: OutputType::default(),
            color_length: 1,
        }
    }
}

impl Settings {
    /// The enabled styles.
    pub fn styles(&self) -> StyleFlags {
        StyleFlags {
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
        }
    }

    /// The animation timing and order.
    pub fn animation(&self) -> AnimationConfig {
        AnimationConfig {
            speed: self.speed,
            length: self.length,
            output_type: self.output_type,
        }
        .normalized()
    }

    /// Options for the format engine.
    pub fn render_options(&self) -> RenderOptions<'_> {
        RenderOptions {
            format: &self.format,
            styles: self.styles(),
            prefix_suffix: PrefixSuffix::parse(&self.prefix_suffix),
            trim_spaces: self.trim_spaces,
            color_length: self.color_length.max(1),
        }
    }
}

// ============================================================================
// Preset
// ============================================================================

/// A partial snapshot of [`Settings`], holding only non-default fields.
///
/// # JSON Format
///
/// ```json
/// {
///   "version": 3,
///   "colors": [{ "hex": "#FF0000", "pos": 0 }, { "hex": "#0000FF", "pos": 100 }],
///   "text": "Hi",
///   "bold": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Preset {
    /// Schema version. Always written.
    #[serde(default = "current_version")]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorStops>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatConfig>,
    #[serde(rename = "customFormat", default, skip_serializing_if = "Option::is_none")]
    pub custom_format: Option<bool>,
    #[serde(rename = "prefixsuffix", default, skip_serializing_if = "Option::is_none")]
    pub prefix_suffix: Option<String>,
    #[serde(rename = "trimspaces", default, skip_serializing_if = "Option::is_none")]
    pub trim_spaces: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(rename = "outputFormat", default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<OutputType>,
    #[serde(rename = "colorlength", default, skip_serializing_if = "Option::is_none")]
    pub color_length: Option<usize>,
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

impl Default for Preset {
    fn default() -> Self {
        Self::diff(&Settings::default(), &Settings::default())
    }
}

/// Expands to the field-by-field diff and merge between `Settings` and
/// `Preset`. Every optional preset field must be listed.
macro_rules! preset_fields {
    ($($field:ident),* $(,)?) => {
        impl Preset {
            /// Builds the minimal preset holding the fields of `settings`
            /// that differ from `defaults`.
            pub fn diff(settings: &Settings, defaults: &Settings) -> Self {
                Self {
                    version: settings.version,
                    $($field: (settings.$field != defaults.$field).then(|| settings.$field.clone()),)*
                }
            }

            /// Overlays the fields present in this preset onto `base`.
            pub fn apply_to(self, mut base: Settings) -> Settings {
                base.version = CURRENT_VERSION;
                $(if let Some(value) = self.$field {
                    base.$field = value;
                })*
                base
            }

            /// Returns true if no optional field is set.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

preset_fields!(
    name,
    colors,
    text,
    format,
    custom_format,
    prefix_suffix,
    trim_spaces,
    bold,
    italic,
    underline,
    strikethrough,
    speed,
    length,
    output_format,
    output_type,
    color_length,
);

impl Preset {
    /// Exports settings as a minimal preset against the defaults.
    pub fn export(settings: &Settings) -> Self {
        Self::diff(settings, &Settings::default())
    }

    /// Parses a preset and merges it onto the defaults.
    ///
    /// Fails with a distinct error for unparseable JSON, non-object JSON and
    /// fields of the wrong shape. Nothing is applied unless parsing succeeds.
    pub fn import(raw: &str) -> Result<Settings, PresetError> {
        Ok(Self::from_json(raw)?.apply_to(Settings::default()))
    }

    /// Like [`import`](Self::import), for an already parsed JSON value.
    pub fn import_value(value: Value) -> Result<Settings, PresetError> {
        Ok(Self::from_value(value)?.apply_to(Settings::default()))
    }

    /// Parses a preset without merging it.
    pub fn from_json(raw: &str) -> Result<Self, PresetError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            tracing::warn!(error = %e, "rejected preset: not valid JSON");
            PresetError::Json(e)
        })?;
        Self::from_value(value)
    }

    /// Parses a preset from a JSON value, migrating older schema versions.
    pub fn from_value(value: Value) -> Result<Self, PresetError> {
        let mut map = into_object(value).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected preset");
        })?;
        migrate(&mut map);
        serde_json::from_value(Value::Object(map)).map_err(|e| {
            tracing::warn!(error = %e, "rejected preset: invalid field");
            PresetError::InvalidField(e)
        })
    }

    /// Serializes the preset to compact JSON.
    pub fn to_json(&self) -> Result<String, PresetError> {
        serde_json::to_string(self).map_err(PresetError::Encode)
    }

    /// Serializes the preset to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, PresetError> {
        serde_json::to_string_pretty(self).map_err(PresetError::Encode)
    }

    /// JSON Schema describing the preset format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Preset)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Upgrades presets written before schema version 3.
///
/// Older presets list `colors` as bare hex strings; they become evenly
/// spread stops.
fn migrate(map: &mut Map<String, Value>) {
    let version = map.get("version").and_then(Value::as_u64).unwrap_or(u64::from(CURRENT_VERSION));
    if version >= u64::from(CURRENT_VERSION) {
        return;
    }
    let Some(Value::Array(colors)) = map.get("colors") else {
        return;
    };
    if !colors.iter().all(Value::is_string) {
        return;
    }

    let count = colors.len();
    let stops: Vec<Value> = colors
        .iter()
        .enumerate()
        .map(|(i, hex)| {
            let pos = if count > 1 { 100.0 / (count - 1) as f64 * i as f64 } else { 0.0 };
            serde_json::json!({ "hex": hex, "pos": pos })
        })
        .collect();
    tracing::debug!(version, stops = count, "migrated legacy preset colors");
    map.insert("colors".to_string(), Value::Array(stops));
    map.insert("version".to_string(), Value::from(CURRENT_VERSION));
}

/// Unwraps a JSON object, naming the actual kind otherwise.
pub(crate) fn into_object(value: Value) -> Result<Map<String, Value>, PresetError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(PresetError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
