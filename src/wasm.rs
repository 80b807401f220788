//! JavaScript bindings for browser previews.
//!
//! This module provides [`GeneratorHandle`], a wrapper around [`Generator`]
//! for web frontends that drive the preview from an animation-frame loop.
//!
//! # Feature Flag
//!
//! This module is only available with the `wasm` feature enabled:
//!
//! ```toml
//! [dependencies]
//! mc-gradient = { version = "0.1", features = ["wasm"] }
//! ```
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { GeneratorHandle } from 'mc-gradient';
//!
//! await init();
//!
//! const generator = new GeneratorHandle();
//! generator.setText('birdflop');
//! generator.setColors('[{"hex":"#084CFB","pos":0},{"hex":"#ADF3FD","pos":100}]');
//! output.textContent = generator.output();
//!
//! let last = performance.now();
//! function frame(now) {
//!   generator.tick(now - last);
//!   last = now;
//!   preview.textContent = generator.currentFrameOutput() ?? '';
//!   requestAnimationFrame(frame);
//! }
//! requestAnimationFrame(frame);
//! ```

use wasm_bindgen::prelude::*;

use crate::animation::OutputType;
use crate::format::FormatConfig;
use crate::generator::{Configurable, Generator};
use crate::gradient::ColorStops;
use crate::preset::{Namespace, Preset, load_settings};

// ============================================================================
// GeneratorHandle
// ============================================================================

/// A [`Generator`] exposed to JavaScript.
#[wasm_bindgen]
pub struct GeneratorHandle {
    generator: Generator,
}

impl Default for GeneratorHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl GeneratorHandle {
    /// Creates a generator with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> GeneratorHandle {
        Self {
            generator: Generator::default(),
        }
    }

    /// Creates a generator from stored namespace values and query pairs.
    ///
    /// # Arguments
    ///
    /// * `rgb` - The stored `rgb` value, if any
    /// * `animtab` - The stored `animtab` value, if any
    /// * `query_keys` / `query_values` - Decoded query-string pairs
    ///
    /// Broken stored values are skipped rather than reported.
    #[wasm_bindgen(js_name = "fromStorage")]
    pub fn from_storage(
        rgb: Option<String>,
        animtab: Option<String>,
        query_keys: Vec<String>,
        query_values: Vec<String>,
    ) -> GeneratorHandle {
        let query: Vec<_> = query_keys.into_iter().zip(query_values).collect();
        let settings = load_settings(
            |key| match key {
                "rgb" => rgb.clone(),
                "animtab" => animtab.clone(),
                _ => None,
            },
            &query,
        );
        Self {
            generator: Generator::new(settings),
        }
    }

    // ---- Settings ----

    #[wasm_bindgen(js_name = "setText")]
    pub fn set_text(&mut self, text: String) -> bool {
        self.generator.set_text(text)
    }

    #[wasm_bindgen(js_name = "setName")]
    pub fn set_name(&mut self, name: String) -> bool {
        self.generator.set_name(name)
    }

    /// Sets the color stops from their JSON form.
    #[wasm_bindgen(js_name = "setColors")]
    pub fn set_colors(&mut self, json: &str) -> Result<bool, JsError> {
        let colors: ColorStops = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Failed to parse colors: {}", e)))?;
        Ok(self.generator.set_colors(colors))
    }

    /// Sets the output format from its JSON form.
    #[wasm_bindgen(js_name = "setFormat")]
    pub fn set_format(&mut self, json: &str) -> Result<bool, JsError> {
        let format: FormatConfig = serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Failed to parse format: {}", e)))?;
        Ok(self.generator.set_format(format))
    }

    #[wasm_bindgen(js_name = "setCustomFormat")]
    pub fn set_custom_format(&mut self, enabled: bool) -> bool {
        self.generator.set_custom_format(enabled)
    }

    #[wasm_bindgen(js_name = "setPrefixSuffix")]
    pub fn set_prefix_suffix(&mut self, template: String) -> bool {
        self.generator.set_prefix_suffix(template)
    }

    #[wasm_bindgen(js_name = "setTrimSpaces")]
    pub fn set_trim_spaces(&mut self, enabled: bool) -> bool {
        self.generator.set_trim_spaces(enabled)
    }

    #[wasm_bindgen(js_name = "setBold")]
    pub fn set_bold(&mut self, enabled: bool) -> bool {
        self.generator.set_bold(enabled)
    }

    #[wasm_bindgen(js_name = "setItalic")]
    pub fn set_italic(&mut self, enabled: bool) -> bool {
        self.generator.set_italic(enabled)
    }

    #[wasm_bindgen(js_name = "setUnderline")]
    pub fn set_underline(&mut self, enabled: bool) -> bool {
        self.generator.set_underline(enabled)
    }

    #[wasm_bindgen(js_name = "setStrikethrough")]
    pub fn set_strikethrough(&mut self, enabled: bool) -> bool {
        self.generator.set_strikethrough(enabled)
    }

    #[wasm_bindgen(js_name = "setSpeed")]
    pub fn set_speed(&mut self, speed_ms: u32) -> bool {
        self.generator.set_speed(speed_ms)
    }

    #[wasm_bindgen(js_name = "setLength")]
    pub fn set_length(&mut self, length: usize) -> bool {
        self.generator.set_length(length)
    }

    /// Sets the playback order by its preset code (1-4).
    #[wasm_bindgen(js_name = "setOutputType")]
    pub fn set_output_type(&mut self, code: u8) -> Result<bool, JsError> {
        let output_type = OutputType::try_from(code).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.generator.set_output_type(output_type))
    }

    #[wasm_bindgen(js_name = "setOutputFormat")]
    pub fn set_output_format(&mut self, template: String) -> bool {
        self.generator.set_output_format(template)
    }

    #[wasm_bindgen(js_name = "setColorLength")]
    pub fn set_color_length(&mut self, color_length: usize) -> bool {
        self.generator.set_color_length(color_length)
    }

    // ---- Output ----

    /// The rendered text.
    pub fn output(&self) -> String {
        self.generator.output().to_string()
    }

    /// The full animated TAB block.
    #[wasm_bindgen(js_name = "animationOutput")]
    pub fn animation_output(&self) -> String {
        self.generator.animation_output()
    }

    #[wasm_bindgen(js_name = "frameCount")]
    pub fn frame_count(&self) -> usize {
        self.generator.frames().len()
    }

    /// Advances the preview by `delta_ms` and returns the active frame.
    pub fn tick(&mut self, delta_ms: f64) -> usize {
        self.generator.tick(delta_ms)
    }

    /// The active frame rendered as text, or `undefined` without frames.
    #[wasm_bindgen(js_name = "currentFrameOutput")]
    pub fn current_frame_output(&self) -> Option<String> {
        self.generator.current_frame_output()
    }

    /// The change counter, for hosts that persist on change.
    pub fn version(&self) -> u64 {
        self.generator.version()
    }

    // ---- Preset Import/Export ----

    /// Exports the current settings as minimal preset JSON.
    #[wasm_bindgen(js_name = "exportPresetJson")]
    pub fn export_preset_json(&self) -> Result<String, JsError> {
        self.generator
            .export_preset()
            .to_json()
            .map_err(|e| JsError::new(&format!("Failed to serialize preset: {}", e)))
    }

    /// Imports a preset. Invalid input leaves the settings unchanged.
    #[wasm_bindgen(js_name = "importPresetJson")]
    pub fn import_preset_json(&mut self, json: &str) -> Result<(), JsError> {
        let preset = Preset::from_json(json)
            .map_err(|e| JsError::new(&format!("Failed to parse preset: {}", e)))?;
        self.generator.apply_preset(&preset);
        Ok(())
    }

    /// The value to store under a namespace key (`rgb` or `animtab`).
    #[wasm_bindgen(js_name = "storageValue")]
    pub fn storage_value(&self, key: &str) -> Result<String, JsError> {
        let namespace = Namespace::SETTINGS
            .into_iter()
            .find(|ns| ns.key() == key)
            .ok_or_else(|| JsError::new(&format!("Unknown storage key: {}", key)))?;
        namespace
            .encode(self.generator.settings())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Restores the default settings.
    pub fn reset(&mut self) {
        self.generator.apply_preset(&Preset::default());
    }
}
