//! The template engine that turns text plus per-unit colors into output.

use super::{FormatConfig, FormatMode, StyleFlags};
use crate::color::{Rgb, rgb_to_hex};
use crate::gradient::{ColorStops, Gradient};

// ============================================================================
// PrefixSuffix
// ============================================================================

/// Literal text placed around the rendered body.
///
/// Parsed from a single template where `$t` marks the body, e.g.
/// `/nick $t`. A template without `$t` is treated as a pure prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrefixSuffix {
    pub prefix: String,
    pub suffix: String,
}

impl PrefixSuffix {
    /// Splits a `$t` template into prefix and suffix.
    pub fn parse(template: &str) -> Self {
        match template.split_once("$t") {
            Some((prefix, suffix)) => Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            None => Self {
                prefix: template.to_string(),
                suffix: String::new(),
            },
        }
    }

    /// Wraps `body` with the prefix and suffix.
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(body);
        out.push_str(&self.suffix);
        out
    }
}

// ============================================================================
// RenderOptions
// ============================================================================

/// Everything except the text and colors that shapes the output.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub format: &'a FormatConfig,
    pub styles: StyleFlags,
    pub prefix_suffix: PrefixSuffix,
    /// Emit whitespace units without color or style codes.
    pub trim_spaces: bool,
    /// Characters sharing one color (at least 1).
    pub color_length: usize,
}

impl<'a> RenderOptions<'a> {
    /// Options with no styles, no prefix/suffix, trimming on and one color
    /// per character.
    pub fn new(format: &'a FormatConfig) -> Self {
        Self {
            format,
            styles: StyleFlags::default(),
            prefix_suffix: PrefixSuffix::default(),
            trim_spaces: true,
            color_length: 1,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Splits text into color units of `color_length` characters.
///
/// The last unit may be shorter.
pub fn split_units(text: &str, color_length: usize) -> Vec<&str> {
    let size = color_length.max(1);
    let mut units = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % size == 0 {
            units.push(&text[start..idx]);
            start = idx;
        }
    }
    if start < text.len() {
        units.push(&text[start..]);
    }
    units
}

/// Renders text through a gradient.
///
/// One sample is taken per color unit. With fewer than two stops the text
/// is rendered uncolored via [`render_plain`].
///
/// ```
/// use mc_gradient::{ColorStops, FormatConfig, RenderOptions, render_text};
///
/// let stops: ColorStops = serde_json::from_str(
///     r##"[{"hex":"#FF0000","pos":0},{"hex":"#0000FF","pos":100}]"##,
/// ).unwrap();
/// let format = FormatConfig::default();
/// let out = render_text("AB", &stops, &RenderOptions::new(&format));
/// assert_eq!(out, "&#FF0000A&#0000FFB");
/// ```
pub fn render_text(text: &str, stops: &ColorStops, options: &RenderOptions<'_>) -> String {
    let units = split_units(text, options.color_length);
    match Gradient::new(stops, units.len()) {
        Some(gradient) => render_with_colors(text, &gradient.colors(), options),
        None => render_plain(text, options),
    }
}

/// Renders text with one precomputed color per unit.
///
/// Units without their own color reuse the previous unit's color. Whitespace
/// units still consume their color when `trim_spaces` is set, but are
/// written without codes.
pub fn render_with_colors(text: &str, colors: &[Rgb], options: &RenderOptions<'_>) -> String {
    if colors.is_empty() {
        return render_plain(text, options);
    }

    let mut body = String::new();
    let mut last = colors[0];
    for (i, unit) in split_units(text, options.color_length).into_iter().enumerate() {
        let color = colors.get(i).copied().unwrap_or(last);
        last = color;

        if options.trim_spaces && unit.chars().all(char::is_whitespace) {
            body.push_str(unit);
            continue;
        }
        body.push_str(&render_unit(unit, color, options.format, options.styles));
    }

    options.prefix_suffix.wrap(&body)
}

/// Renders text without color, keeping the active styles.
pub fn render_plain(text: &str, options: &RenderOptions<'_>) -> String {
    let body = match options.format.mode() {
        FormatMode::Character(c) => format!("{}{text}", options.styles.codes(c)),
        FormatMode::Structural => wrap_styles(text, options.format, options.styles),
    };
    options.prefix_suffix.wrap(&body)
}

fn render_unit(unit: &str, color: Rgb, format: &FormatConfig, styles: StyleFlags) -> String {
    let hex = rgb_to_hex(color);
    let template = fill_hex_placeholders(&format.color, &hex);

    let (template, content) = match format.mode() {
        FormatMode::Character(c) => {
            let codes = styles.codes(c);
            let template = if template.contains("$f") {
                template.replace("$f", &codes)
            } else {
                format!("{codes}{template}")
            };
            (template, unit.to_string())
        }
        FormatMode::Structural => (template.replace("$f", ""), wrap_styles(unit, format, styles)),
    };

    if template.contains("$c") {
        template.replace("$c", &content)
    } else {
        template + &content
    }
}

fn wrap_styles(content: &str, format: &FormatConfig, styles: StyleFlags) -> String {
    styles
        .active()
        .filter_map(|style| format.template(style))
        .fold(content.to_string(), |inner, template| template.replace("$t", &inner))
}

/// Replaces `$1`-`$6` with the six characters of `digits` in order.
pub(crate) fn fill_hex_placeholders(template: &str, digits: &str) -> String {
    digits
        .chars()
        .take(6)
        .enumerate()
        .fold(template.to_string(), |acc, (i, digit)| {
            acc.replace(&format!("${}", i + 1), &digit.to_string())
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::gradient::ColorStop;
    use palette::Srgb;
    use proptest::prelude::*;

    fn red_blue() -> ColorStops {
        ColorStops::new(vec![
            ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
            ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn splits_units_by_character() {
        assert_eq!(split_units("abcde", 2), vec!["ab", "cd", "e"]);
        assert_eq!(split_units("héllo", 1), vec!["h", "é", "l", "l", "o"]);
        assert_eq!(split_units("abc", 0), vec!["a", "b", "c"]);
        assert!(split_units("", 3).is_empty());
    }

    #[test]
    fn character_mode_with_styles() {
        let format = FormatConfig::default();
        let mut options = RenderOptions::new(&format);
        options.styles.bold = true;
        options.styles.italic = true;
        assert_eq!(render_text("AB", &red_blue(), &options), "&#FF0000&l&oA&#0000FF&l&oB");
    }

    #[test]
    fn hex_digits_fill_in_order() {
        let format = FormatConfig::builtin()[2].clone();
        let options = RenderOptions::new(&format);
        let out = render_with_colors("A", &[Srgb::new(0x12, 0x34, 0x56)], &options);
        assert_eq!(out, "&x&1&2&3&4&5&6A");
    }

    #[test]
    fn style_codes_prepended_without_placeholder() {
        let format = FormatConfig::character("&#$1$2$3$4$5$6", "&");
        let mut options = RenderOptions::new(&format);
        options.styles.underline = true;
        let out = render_with_colors("x", &[Srgb::new(255, 255, 255)], &options);
        assert_eq!(out, "&n&#FFFFFFx");
    }

    #[test]
    fn structural_wraps_inner_to_outer() {
        let format = FormatConfig::builtin()[4].clone();
        let mut options = RenderOptions::new(&format);
        options.styles.bold = true;
        options.styles.underline = true;
        let out = render_with_colors("A", &[Srgb::new(255, 0, 0)], &options);
        assert_eq!(out, "<#FF0000><underlined><bold>A</bold></underlined>");
    }

    #[test]
    fn trimmed_spaces_consume_a_sample() {
        let format = FormatConfig::default();
        let options = RenderOptions::new(&format);
        let stops = ColorStops::new(vec![
            ColorStop::new(HexColor::from_channels(255, 0, 0), 0.0),
            ColorStop::new(HexColor::from_channels(0, 0, 255), 100.0),
        ])
        .unwrap();
        // Three samples: red, purple, blue. The space takes purple.
        assert_eq!(render_text("A B", &stops, &options), "&#FF0000A &#0000FFB");
    }

    #[test]
    fn untrimmed_spaces_are_colored() {
        let format = FormatConfig::default();
        let mut options = RenderOptions::new(&format);
        options.trim_spaces = false;
        assert_eq!(render_text("A B", &red_blue(), &options), "&#FF0000A&#800080 &#0000FFB");
    }

    #[test]
    fn grouped_units_share_colors() {
        let format = FormatConfig::default();
        let mut options = RenderOptions::new(&format);
        options.color_length = 2;
        assert_eq!(render_text("ABCD", &red_blue(), &options), "&#FF0000AB&#0000FFCD");

        // Missing colors fall back to the previous unit
        let out = render_with_colors("ABC", &[Srgb::new(0, 255, 0)], &options);
        assert_eq!(out, "&#00FF00AB&#00FF00C");
    }

    #[test]
    fn prefix_suffix_wraps_body() {
        let format = FormatConfig::default();
        let mut options = RenderOptions::new(&format);
        options.prefix_suffix = PrefixSuffix::parse("/nick $t!");
        assert_eq!(render_text("AB", &red_blue(), &options), "/nick &#FF0000A&#0000FFB!");
        assert_eq!(PrefixSuffix::parse("/say ").wrap("x"), "/say x");
    }

    #[test]
    fn too_few_stops_renders_plain() {
        let format = FormatConfig::default();
        let mut options = RenderOptions::new(&format);
        assert_eq!(render_text("hey", &ColorStops::default(), &options), "hey");

        options.styles.bold = true;
        assert_eq!(render_text("hey", &ColorStops::default(), &options), "&lhey");

        let structural = FormatConfig::builtin()[4].clone();
        let mut options = RenderOptions::new(&structural);
        options.styles.italic = true;
        assert_eq!(
            render_text("hey", &ColorStops::default(), &options),
            "<italic>hey</italic>"
        );
    }

    #[test]
    fn empty_format_char_renders_structurally() {
        let format: FormatConfig =
            serde_json::from_str(r#"{"color":"<#$1$2$3$4$5$6>$c","char":"","bold":"<b>$t</b>"}"#).unwrap();
        let mut options = RenderOptions::new(&format);
        options.styles.bold = true;
        let out = render_with_colors("A", &[Srgb::new(255, 0, 0)], &options);
        assert_eq!(out, "<#FF0000><b>A</b>");
    }

    #[test]
    fn text_placeholders_are_not_expanded() {
        let format = FormatConfig::default();
        let options = RenderOptions::new(&format);
        let out = render_with_colors("$", &[Srgb::new(0, 0, 0)], &options);
        assert_eq!(out, "&#000000$");
        let out = render_with_colors("$1", &[Srgb::new(0, 0, 0)], &RenderOptions {
            color_length: 2,
            ..options
        });
        assert_eq!(out, "&#000000$1");
    }

    #[test]
    fn output_is_stable() {
        let format = FormatConfig::default();
        let options = RenderOptions::new(&format);
        let first = render_text("birdflop", &red_blue(), &options);
        assert_eq!(first, render_text("birdflop", &red_blue(), &options));
    }

    proptest! {
        #[test]
        fn trimmed_spaces_keep_sample_positions(text in "[a-z ]{1,16}") {
            let format = FormatConfig::default();
            let trimmed = RenderOptions::new(&format);
            let colored = RenderOptions { trim_spaces: false, ..trimmed.clone() };

            let colors = Gradient::new(&red_blue(), text.chars().count()).unwrap().colors();
            let mut expected_trimmed = String::new();
            let mut expected_colored = String::new();
            for (ch, color) in text.chars().zip(&colors) {
                let coded = format!("&#{}{ch}", rgb_to_hex(*color));
                if ch == ' ' {
                    expected_trimmed.push(ch);
                } else {
                    expected_trimmed.push_str(&coded);
                }
                expected_colored.push_str(&coded);
            }

            prop_assert_eq!(render_text(&text, &red_blue(), &trimmed), expected_trimmed);
            prop_assert_eq!(render_text(&text, &red_blue(), &colored), expected_colored);
        }
    }
}
