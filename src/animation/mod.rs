//! Animation frames for scrolling gradients.
//!
//! A gradient is stretched over `length × units` samples, where `units` is the
//! number of color units in the text. The flat sample list is cut into
//! `units`-sized windows; each window colors the whole text once and is one
//! [`Frame`]. The [`OutputType`] then decides the playback order.
//!
//! # Example
//!
//! ```
//! use mc_gradient::{AnimationConfig, ColorStops, OutputType, generate_frames};
//!
//! let stops: ColorStops = serde_json::from_str(
//!     r##"[{"hex":"#FF0000","pos":0},{"hex":"#0000FF","pos":100}]"##,
//! ).unwrap();
//! let config = AnimationConfig { length: 3, output_type: OutputType::Forward, ..Default::default() };
//!
//! let frames = generate_frames("abc", &stops, &config, 1);
//! assert_eq!(frames.len(), 3);
//! assert!(frames.iter().all(|f| f.len() == 3));
//! ```

pub mod clock;
pub mod output;

pub use clock::{FrameClock, Playback, should_advance};
pub use output::{DEFAULT_OUTPUT_FORMAT, render_animation};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::format::split_units;
use crate::gradient::{ColorStops, Gradient};

/// One coloring of the text: one color per unit.
pub type Frame = Vec<Rgb>;

/// Smallest allowed delay between frames, in milliseconds.
pub const MIN_SPEED_MS: u32 = 50;

/// Largest number of gradient samples drawn for one animation.
///
/// `length` is lowered until `length × units` fits, but never below 1, so
/// text longer than this still gets a single frame.
pub const MAX_SAMPLES: usize = 10_000;

// ============================================================================
// OutputType
// ============================================================================

/// Playback order of the generated frames.
///
/// Serialized as the integer code used in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(try_from = "u8", into = "u8")]
pub enum OutputType {
    /// Frames reversed, played tail-to-head (code `1`).
    #[default]
    Reverse,
    /// Frames in generation order (code `2`).
    Forward,
    /// Reversed frames followed by the original order (code `3`).
    PingPong,
    /// Reversed frames only (code `4`).
    PingPongReverse,
}

/// Error for an unknown [`OutputType`] code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown animation output type {0}")]
pub struct UnknownOutputType(pub u8);

impl OutputType {
    /// All output types, in code order.
    pub const ALL: [OutputType; 4] = [
        OutputType::Reverse,
        OutputType::Forward,
        OutputType::PingPong,
        OutputType::PingPongReverse,
    ];

    /// The preset code for this output type.
    pub fn code(self) -> u8 {
        match self {
            OutputType::Reverse => 1,
            OutputType::Forward => 2,
            OutputType::PingPong => 3,
            OutputType::PingPongReverse => 4,
        }
    }

    /// Human-readable name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            OutputType::Reverse => "Normal (Left -> Right)",
            OutputType::Forward => "Normal (Right -> Left)",
            OutputType::PingPong => "Bouncing (Left -> Right -> Left)",
            OutputType::PingPongReverse => "Bouncing Reverse",
        }
    }

    /// Reorders generated frames for playback.
    pub fn arrange(self, frames: Vec<Frame>) -> Vec<Frame> {
        match self {
            OutputType::Forward => frames,
            OutputType::Reverse | OutputType::PingPongReverse => frames.into_iter().rev().collect(),
            OutputType::PingPong => {
                let mut arranged: Vec<Frame> = frames.iter().rev().cloned().collect();
                arranged.extend(frames);
                arranged
            }
        }
    }
}

impl TryFrom<u8> for OutputType {
    type Error = UnknownOutputType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OutputType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(UnknownOutputType(code))
    }
}

impl From<OutputType> for u8 {
    fn from(output_type: OutputType) -> Self {
        output_type.code()
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for OutputType {
    fn schema_name() -> String {
        "OutputType".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        u8::json_schema(generator)
    }
}

// ============================================================================
// AnimationConfig
// ============================================================================

/// Timing and shape of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Milliseconds between frame advances (at least [`MIN_SPEED_MS`]).
    pub speed: u32,
    /// Gradient length as a multiple of the text length (1 to [`MAX_SAMPLES`]).
    pub length: usize,
    /// Playback order.
    pub output_type: OutputType,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            speed: MIN_SPEED_MS,
            length: 1,
            output_type: OutputType::default(),
        }
    }
}

impl AnimationConfig {
    /// Returns a copy with speed raised to its minimum and length clamped
    /// to `1..=MAX_SAMPLES`.
    pub fn normalized(self) -> Self {
        Self {
            speed: self.speed.max(MIN_SPEED_MS),
            length: self.length.clamp(1, MAX_SAMPLES),
            output_type: self.output_type,
        }
    }
}

// ============================================================================
// Frame Generation
// ============================================================================

/// Generates frames in playback order.
///
/// Returns no frames for empty text or fewer than two stops.
pub fn generate_frames(
    text: &str,
    stops: &ColorStops,
    config: &AnimationConfig,
    color_length: usize,
) -> Vec<Frame> {
    let config = config.normalized();
    config.output_type.arrange(base_frames(text, stops, config.length, color_length))
}

/// Generates frames in generation order, before [`OutputType::arrange`].
pub fn base_frames(text: &str, stops: &ColorStops, length: usize, color_length: usize) -> Vec<Frame> {
    let units = split_units(text, color_length).len();
    if units == 0 {
        return Vec::new();
    }
    let length = length.clamp(1, (MAX_SAMPLES / units).max(1));
    let Some(gradient) = Gradient::new(stops, units * length) else {
        return Vec::new();
    };
    gradient
        .colors()
        .chunks(units)
        .map(<[Rgb]>::to_vec)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::gradient::ColorStop;
    use proptest::prelude::*;

    fn red_blue() -> ColorStops {
        ColorStops::new(vec![
            ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
            ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
        ])
        .unwrap()
    }

    fn config(length: usize, output_type: OutputType) -> AnimationConfig {
        AnimationConfig {
            speed: 100,
            length,
            output_type,
        }
    }

    #[test]
    fn frames_are_consecutive_windows() {
        let frames = generate_frames("ab", &red_blue(), &config(2, OutputType::Forward), 1);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][0], HexColor::from_channels(255, 0, 0).rgb());
        assert_eq!(frames[1][1], HexColor::from_channels(0, 0, 255).rgb());
    }

    #[test]
    fn reverse_plays_tail_first() {
        let forward = generate_frames("abc", &red_blue(), &config(3, OutputType::Forward), 1);
        let reverse = generate_frames("abc", &red_blue(), &config(3, OutputType::Reverse), 1);
        assert_eq!(forward.len(), reverse.len());
        assert_eq!(reverse[0], forward[2]);

        let ping_reverse = generate_frames("abc", &red_blue(), &config(3, OutputType::PingPongReverse), 1);
        assert_eq!(ping_reverse, reverse);
    }

    #[test]
    fn grouping_reduces_units() {
        let frames = generate_frames("abcd", &red_blue(), &config(1, OutputType::Forward), 2);
        assert_eq!(frames, vec![vec![
            HexColor::from_channels(255, 0, 0).rgb(),
            HexColor::from_channels(0, 0, 255).rgb(),
        ]]);
    }

    #[test]
    fn empty_inputs_produce_no_frames() {
        assert!(generate_frames("", &red_blue(), &AnimationConfig::default(), 1).is_empty());
        assert!(generate_frames("abc", &ColorStops::default(), &AnimationConfig::default(), 1).is_empty());
    }

    #[test]
    fn output_type_codes() {
        assert_eq!(serde_json::to_string(&OutputType::PingPong).unwrap(), "3");
        assert_eq!(serde_json::from_str::<OutputType>("2").unwrap(), OutputType::Forward);
        assert!(serde_json::from_str::<OutputType>("9").is_err());
    }

    #[test]
    fn normalization_enforces_minimums() {
        let normalized = AnimationConfig {
            speed: 10,
            length: 0,
            output_type: OutputType::Forward,
        }
        .normalized();
        assert_eq!(normalized.speed, MIN_SPEED_MS);
        assert_eq!(normalized.length, 1);

        let huge = AnimationConfig {
            length: usize::MAX,
            ..AnimationConfig::default()
        };
        assert_eq!(huge.normalized().length, MAX_SAMPLES);
    }

    #[test]
    fn oversized_length_is_capped() {
        let frames = base_frames("ab", &red_blue(), usize::MAX, 1);
        assert_eq!(frames.len(), MAX_SAMPLES / 2);

        let frames = base_frames("abc", &red_blue(), 1_000_000_000, 1);
        assert_eq!(frames.len(), MAX_SAMPLES / 3);
        assert!(frames.iter().all(|f| f.len() == 3));

        // Text longer than the cap still yields one frame
        let long = "x".repeat(MAX_SAMPLES + 5);
        assert_eq!(base_frames(&long, &red_blue(), 4, 1).len(), 1);
    }

    proptest! {
        #[test]
        fn ping_pong_is_reverse_then_forward(text in "[a-z ]{1,12}", length in 1usize..5) {
            let forward = generate_frames(&text, &red_blue(), &config(length, OutputType::Forward), 1);
            let ping_pong = generate_frames(&text, &red_blue(), &config(length, OutputType::PingPong), 1);
            let mut expected: Vec<Frame> = forward.iter().rev().cloned().collect();
            expected.extend(forward.clone());
            prop_assert_eq!(ping_pong, expected);
        }

        #[test]
        fn forward_and_reverse_have_equal_length(text in "[a-z]{1,12}", length in 1usize..5) {
            let forward = generate_frames(&text, &red_blue(), &config(length, OutputType::Forward), 1);
            let reverse = generate_frames(&text, &red_blue(), &config(length, OutputType::Reverse), 1);
            prop_assert_eq!(forward.len(), reverse.len());
            prop_assert_eq!(forward.len(), length);
        }
    }
}
