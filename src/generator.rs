//! Stateful gradient generator with explicit recomputation.

use crate::animation::{Frame, OutputType, Playback, generate_frames, render_animation};
use crate::format::{FormatConfig, render_text, render_with_colors};
use crate::gradient::{ColorStops, StopError};
use crate::preset::{Namespace, Preset, PresetError, Settings};

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`Preset`].
pub trait Configurable {
    /// Replaces the current settings with the preset merged onto defaults.
    fn apply_preset(&mut self, preset: &Preset);

    /// Exports the current settings as a minimal preset.
    fn export_preset(&self) -> Preset;
}

// ============================================================================
// Generator
// ============================================================================

/// Owns [`Settings`] and keeps the rendered output in sync with them.
///
/// Every mutation goes through [`update`](Self::update) or one of the
/// setters built on it. When the settings actually change, the output and
/// animation frames are recomputed and the [`version`](Self::version) is
/// bumped, so a host can persist or redraw only when needed.
///
/// # Example
///
/// ```
/// use mc_gradient::{Generator, Settings};
///
/// let mut generator = Generator::new(Settings::default());
/// assert!(generator.set_text("Hey"));
/// assert!(!generator.set_text("Hey"));
/// assert_eq!(generator.version(), 1);
/// assert!(generator.output().ends_with('y'));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    settings: Settings,
    output: String,
    frames: Vec<Frame>,
    playback: Playback,
    version: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Generator {
    /// Creates a generator and computes its initial output.
    pub fn new(settings: Settings) -> Self {
        let animation = settings.animation();
        let mut generator = Self {
            settings,
            output: String::new(),
            frames: Vec::new(),
            playback: Playback::new(animation.speed, 0),
            version: 0,
        };
        generator.recompute();
        generator
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of effective changes since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The rendered text.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Animation frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The full animated TAB block.
    pub fn animation_output(&self) -> String {
        let settings = &self.settings;
        render_animation(
            &settings.name,
            &settings.text,
            &settings.colors,
            &settings.animation(),
            &settings.render_options(),
            &settings.output_format,
        )
    }

    /// Index of the frame currently shown by the preview.
    pub fn current_frame(&self) -> usize {
        self.playback.frame()
    }

    /// The text rendered with the current frame's colors.
    ///
    /// Returns `None` when there are no frames.
    pub fn current_frame_output(&self) -> Option<String> {
        let frame = self.frames.get(self.playback.frame())?;
        Some(render_with_colors(&self.settings.text, frame, &self.settings.render_options()))
    }

    /// Advances the preview clock by `delta_ms` and returns the frame index.
    pub fn tick(&mut self, delta_ms: f64) -> usize {
        self.playback.tick(delta_ms)
    }

    /// Mutates the settings and recomputes if anything changed.
    ///
    /// Returns true if the settings changed.
    pub fn update(&mut self, edit: impl FnOnce(&mut Settings)) -> bool {
        let mut next = self.settings.clone();
        edit(&mut next);
        self.replace_settings(next)
    }

    /// Runs a fallible edit on the color stops.
    ///
    /// On error nothing is changed.
    pub fn edit_stops<T>(
        &mut self,
        edit: impl FnOnce(&mut ColorStops) -> Result<T, StopError>,
    ) -> Result<T, StopError> {
        let mut stops = self.settings.colors.clone();
        let result = edit(&mut stops)?;
        self.update(|settings| settings.colors = stops);
        Ok(result)
    }

    /// Parses and applies a preset. Invalid input leaves the state untouched.
    pub fn import_preset_json(&mut self, raw: &str) -> Result<bool, PresetError> {
        let settings = Preset::import(raw)?;
        Ok(self.replace_settings(settings))
    }

    /// Storage values for every settings namespace, keyed by storage key.
    pub fn storage_entries(&self) -> Result<Vec<(&'static str, String)>, PresetError> {
        Namespace::SETTINGS
            .into_iter()
            .map(|ns| Ok((ns.key(), ns.encode(&self.settings)?)))
            .collect()
    }

    // ---- Setters ----

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(|s| s.text = text)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update(|s| s.name = name)
    }

    pub fn set_colors(&mut self, colors: ColorStops) -> bool {
        self.update(|s| s.colors = colors)
    }

    pub fn set_format(&mut self, format: FormatConfig) -> bool {
        self.update(|s| s.format = format)
    }

    pub fn set_custom_format(&mut self, enabled: bool) -> bool {
        self.update(|s| s.custom_format = enabled)
    }

    pub fn set_prefix_suffix(&mut self, template: impl Into<String>) -> bool {
        let template = template.into();
        self.update(|s| s.prefix_suffix = template)
    }

    pub fn set_trim_spaces(&mut self, enabled: bool) -> bool {
        self.update(|s| s.trim_spaces = enabled)
    }

    pub fn set_bold(&mut self, enabled: bool) -> bool {
        self.update(|s| s.bold = enabled)
    }

    pub fn set_italic(&mut self, enabled: bool) -> bool {
        self.update(|s| s.italic = enabled)
    }

    pub fn set_underline(&mut self, enabled: bool) -> bool {
        self.update(|s| s.underline = enabled)
    }

    pub fn set_strikethrough(&mut self, enabled: bool) -> bool {
        self.update(|s| s.strikethrough = enabled)
    }

    /// Sets the frame interval. Playback never runs faster than
    /// [`MIN_SPEED_MS`](crate::animation::MIN_SPEED_MS).
    pub fn set_speed(&mut self, speed_ms: u32) -> bool {
        self.update(|s| s.speed = speed_ms)
    }

    pub fn set_length(&mut self, length: usize) -> bool {
        self.update(|s| s.length = length)
    }

    pub fn set_output_type(&mut self, output_type: OutputType) -> bool {
        self.update(|s| s.output_type = output_type)
    }

    pub fn set_output_format(&mut self, template: impl Into<String>) -> bool {
        let template = template.into();
        self.update(|s| s.output_format = template)
    }

    pub fn set_color_length(&mut self, color_length: usize) -> bool {
        self.update(|s| s.color_length = color_length)
    }

    // ---- Internals ----

    fn replace_settings(&mut self, settings: Settings) -> bool {
        if settings == self.settings {
            return false;
        }
        self.settings = settings;
        self.on_change();
        true
    }

    /// Invoked after every effective mutation.
    fn on_change(&mut self) {
        self.version += 1;
        self.recompute();
        tracing::debug!(version = self.version, frames = self.frames.len(), "settings changed");
    }

    fn recompute(&mut self) {
        let settings = &self.settings;
        let animation = settings.animation();
        self.output = render_text(&settings.text, &settings.colors, &settings.render_options());
        self.frames = generate_frames(&settings.text, &settings.colors, &animation, settings.color_length);
        self.playback.clock_mut().set_speed(animation.speed);
        self.playback.set_frame_count(self.frames.len());
    }
}

impl Configurable for Generator {
    /// Replaces the settings with `preset` merged onto the defaults.
    ///
    /// ```
    /// use mc_gradient::{Configurable, Generator, Preset};
    ///
    /// let mut generator = Generator::default();
    /// let preset = Preset::from_json(r#"{"version":3,"text":"Hi","bold":true}"#).unwrap();
    /// generator.apply_preset(&preset);
    /// assert_eq!(generator.output(), "&#00FFE0&lH&#EB00FF&li");
    /// ```
    fn apply_preset(&mut self, preset: &Preset) {
        self.replace_settings(preset.clone().apply_to(Settings::default()));
    }

    fn export_preset(&self) -> Preset {
        Preset::export(&self.settings)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::gradient::ColorStop;

    fn red_blue() -> ColorStops {
        ColorStops::new(vec![
            ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
            ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn initial_output_is_computed() {
        let generator = Generator::default();
        assert!(generator.output().starts_with("&#00FFE0b"));
        assert_eq!(generator.frames().len(), 1);
        assert_eq!(generator.version(), 0);
    }

    #[test]
    fn setters_recompute_on_change_only() {
        let mut generator = Generator::default();
        assert!(generator.set_colors(red_blue()));
        assert!(generator.set_text("AB"));
        assert_eq!(generator.output(), "&#FF0000A&#0000FFB");
        assert_eq!(generator.version(), 2);

        assert!(!generator.set_text("AB"));
        assert_eq!(generator.version(), 2);

        generator.set_bold(true);
        assert_eq!(generator.output(), "&#FF0000&lA&#0000FF&lB");
    }

    #[test]
    fn stop_edits_are_atomic() {
        let mut generator = Generator::default();
        generator.set_colors(red_blue());
        let before = generator.version();

        assert!(generator.edit_stops(|stops| stops.remove(0)).is_err());
        assert_eq!(generator.version(), before);

        let index = generator
            .edit_stops(|stops| stops.insert(ColorStop::new(HexColor::from_channels(0, 255, 0), 50.0)))
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(generator.settings().colors.len(), 3);
        assert_eq!(generator.version(), before + 1);
    }

    #[test]
    fn frames_follow_animation_settings() {
        let mut generator = Generator::default();
        generator.set_text("abcd");
        generator.set_length(3);
        assert_eq!(generator.frames().len(), 3);

        generator.set_output_type(OutputType::PingPong);
        assert_eq!(generator.frames().len(), 6);

        generator.set_color_length(2);
        assert!(generator.frames().iter().all(|f| f.len() == 2));
    }

    #[test]
    fn preview_clock_advances_frames() {
        let mut generator = Generator::default();
        generator.set_text("abc");
        generator.set_length(2);
        generator.set_speed(100);
        assert_eq!(generator.tick(60.0), 0);
        assert_eq!(generator.tick(40.0), 1);
        assert_eq!(generator.tick(100.0), 0);
        assert!(generator.current_frame_output().is_some());

        generator.set_text("");
        assert!(generator.current_frame_output().is_none());
        assert_eq!(generator.tick(1000.0), 0);
    }

    #[test]
    fn preset_roundtrip_through_generator() {
        let mut generator = Generator::default();
        generator.set_text("Hi");
        generator.set_italic(true);
        let preset = generator.export_preset();

        let mut other = Generator::default();
        other.apply_preset(&preset);
        assert_eq!(other.settings(), generator.settings());
        assert_eq!(other.output(), generator.output());
    }

    #[test]
    fn invalid_import_keeps_state() {
        let mut generator = Generator::default();
        generator.set_text("keep");
        assert!(generator.import_preset_json("[]").is_err());
        assert!(generator.import_preset_json("{").is_err());
        assert_eq!(generator.settings().text, "keep");

        assert!(generator.import_preset_json(r#"{"text":"new"}"#).unwrap());
        assert_eq!(generator.settings().text, "new");
    }

    #[test]
    fn oversized_imported_length_is_capped() {
        use crate::animation::MAX_SAMPLES;

        let mut generator = Generator::default();
        generator
            .import_preset_json(r#"{"version":3,"text":"ab","length":18446744073709551615}"#)
            .unwrap();
        assert_eq!(generator.frames().len(), MAX_SAMPLES / 2);

        generator
            .import_preset_json(r#"{"version":3,"text":"ab","length":1000000000}"#)
            .unwrap();
        assert_eq!(generator.frames().len(), MAX_SAMPLES / 2);
        assert!(generator.animation_output().contains("    - \""));
    }

    #[test]
    fn storage_entries_cover_settings_namespaces() {
        let generator = Generator::default();
        let keys: Vec<_> = generator.storage_entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["rgb", "animtab"]);
    }

    #[test]
    fn animation_output_uses_name_and_speed() {
        let mut generator = Generator::default();
        generator.set_name("banner");
        generator.set_speed(250);
        let out = generator.animation_output();
        assert!(out.starts_with("banner:\n  change-interval: 250\n  texts:\n    - \""));
    }
}
