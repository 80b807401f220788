//! mc-gradient: gradient text generator for Minecraft chat formats
//!
//! This crate turns a piece of text and a set of color stops into formatted
//! output for Minecraft servers and plugins: hex color codes (`&#RRGGBB`),
//! legacy `&x&R&R&G&G&B&B` sequences, MiniMessage tags, and any custom
//! placeholder template. It also builds scrolling animations for the TAB
//! plugin and shares settings as minimal JSON presets.
//!
//! # Example
//!
//! ```
//! use mc_gradient::{ColorStop, ColorStops, FormatConfig, HexColor, RenderOptions, render_text};
//!
//! let stops = ColorStops::new(vec![
//!     ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
//!     ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
//! ])
//! .unwrap();
//!
//! let format = FormatConfig::default();
//! let mut options = RenderOptions::new(&format);
//! options.styles.bold = true;
//!
//! assert_eq!(render_text("AB", &stops, &options), "&#FF0000&lA&#0000FF&lB");
//! ```
//!
//! # Stateful Generator
//!
//! For interactive hosts, [`Generator`] owns the full [`Settings`] and
//! recomputes its output after every change. Presets move between
//! generators through the [`Configurable`] trait:
//!
//! ```
//! use mc_gradient::{Configurable, Generator, Preset};
//!
//! let mut generator = Generator::default();
//! generator.set_text("Hi");
//!
//! let json = generator.export_preset().to_json().unwrap();
//! assert_eq!(json, r#"{"version":3,"text":"Hi"}"#);
//!
//! let mut restored = Generator::default();
//! restored.apply_preset(&Preset::from_json(&json).unwrap());
//! assert_eq!(restored.output(), generator.output());
//! ```

pub mod animation;
pub mod color;
pub mod format;
pub mod gradient;
pub mod preset;

mod generator;

#[cfg(feature = "wasm")]
mod wasm;

pub use animation::{AnimationConfig, Frame, OutputType, Playback, generate_frames, render_animation};
pub use color::{ColorError, HexColor, Rgb};
pub use format::{FormatConfig, RenderOptions, StyleFlags, render_text};
pub use generator::{Configurable, Generator};
pub use gradient::{ColorStop, ColorStops, Gradient, StopError};
pub use preset::{Preset, PresetError, Settings};

#[cfg(feature = "wasm")]
pub use wasm::GeneratorHandle;
