//! Animated TAB configuration output.
//!
//! Each frame is rendered through the format engine and listed as a quoted
//! YAML entry. The list is then dropped into an output template where
//! `%name%` is the animation name, `%speed%` the change interval in
//! milliseconds and `$t` the frame list.

use super::{AnimationConfig, generate_frames};
use crate::format::{RenderOptions, render_with_colors};
use crate::gradient::ColorStops;

/// Template for the TAB plugin's `animations.yml`.
pub const DEFAULT_OUTPUT_FORMAT: &str = "%name%:\n  change-interval: %speed%\n  texts:\n$t";

/// Renders the full animation block.
///
/// With empty text or fewer than two stops the frame list is empty, so `$t`
/// expands to nothing and only the surrounding template remains.
pub fn render_animation(
    name: &str,
    text: &str,
    stops: &ColorStops,
    animation: &AnimationConfig,
    options: &RenderOptions<'_>,
    output_format: &str,
) -> String {
    let frames = generate_frames(text, stops, animation, options.color_length);
    let lines: Vec<String> = frames
        .iter()
        .map(|frame| format!("    - \"{}\"", escape_yaml(&render_with_colors(text, frame, options))))
        .collect();

    output_format
        .replace("%name%", name)
        .replace("%speed%", &animation.normalized().speed.to_string())
        .replace("$t", &lines.join("\n"))
}

fn escape_yaml(line: &str) -> String {
    line.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::OutputType;
    use crate::color::HexColor;
    use crate::format::FormatConfig;
    use crate::gradient::ColorStop;

    #[test]
    fn renders_tab_block() {
        let stops = ColorStops::new(vec![
            ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
            ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
        ])
        .unwrap();
        let format = FormatConfig::default();
        let animation = AnimationConfig {
            speed: 200,
            length: 1,
            output_type: OutputType::Forward,
        };
        let out = render_animation(
            "logo",
            "AB",
            &stops,
            &animation,
            &RenderOptions::new(&format),
            DEFAULT_OUTPUT_FORMAT,
        );
        assert_eq!(
            out,
            "logo:\n  change-interval: 200\n  texts:\n    - \"&#FF0000A&#0000FFB\""
        );
    }

    #[test]
    fn empty_text_leaves_frame_list_empty() {
        let format = FormatConfig::default();
        let stops = ColorStops::evenly_spaced([
            HexColor::from_channels(255, 0, 0),
            HexColor::from_channels(0, 0, 255),
        ]);
        let out = render_animation(
            "logo",
            "",
            &stops,
            &AnimationConfig::default(),
            &RenderOptions::new(&format),
            DEFAULT_OUTPUT_FORMAT,
        );
        assert_eq!(out, "logo:\n  change-interval: 50\n  texts:\n");
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(escape_yaml(r#"say "hi"\"#), r#"say \"hi\"\\"#);
    }
}
