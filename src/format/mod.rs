//! Output formats and style flags.
//!
//! A [`FormatConfig`] describes how one colored text unit is written out. It
//! runs in one of two modes, chosen by whether a format character is set:
//!
//! - **Character-code mode** (`char` present): Minecraft-style escape codes.
//!   Style codes are the format character followed by `l`, `o`, `n` or `m`.
//! - **Structural mode** (`char` absent): markup templates. Each style has its
//!   own template in which `$t` stands for the wrapped content.
//!
//! In both modes the `color` template is filled per unit: `$1`-`$6` become
//! the six hex digits `RRGGBB`, `$f` the active style codes and `$c` the text
//! unit itself.

pub mod render;

pub use render::{PrefixSuffix, RenderOptions, render_plain, render_text, render_with_colors, split_units};

use serde::{Deserialize, Serialize};

// ============================================================================
// StyleFlags
// ============================================================================

/// Independent text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

/// The line decoration a preview should draw.
///
/// Underline and strikethrough combine into their own variant because a
/// single CSS-style decoration cannot express both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
    UnderlineStrikethrough,
}

/// A single style, in the order styles are applied (innermost first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl Style {
    /// All styles, innermost first.
    pub const ALL: [Style; 4] = [Style::Bold, Style::Italic, Style::Underline, Style::Strikethrough];

    /// Minecraft formatting-code letter for this style.
    pub fn code(self) -> char {
        match self {
            Style::Bold => 'l',
            Style::Italic => 'o',
            Style::Underline => 'n',
            Style::Strikethrough => 'm',
        }
    }
}

impl StyleFlags {
    /// Returns true if `style` is enabled.
    pub fn has(&self, style: Style) -> bool {
        match style {
            Style::Bold => self.bold,
            Style::Italic => self.italic,
            Style::Underline => self.underline,
            Style::Strikethrough => self.strikethrough,
        }
    }

    /// Iterates the enabled styles, innermost first.
    pub fn active(&self) -> impl Iterator<Item = Style> + '_ {
        Style::ALL.into_iter().filter(|s| self.has(*s))
    }

    /// Returns true if no style is enabled.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Returns the line decoration for previews.
    pub fn decoration(&self) -> TextDecoration {
        match (self.underline, self.strikethrough) {
            (true, true) => TextDecoration::UnderlineStrikethrough,
            (true, false) => TextDecoration::Underline,
            (false, true) => TextDecoration::Strikethrough,
            (false, false) => TextDecoration::None,
        }
    }

    /// Concatenated style codes (`&l&o...`) for the given format character.
    pub fn codes(&self, format_char: &str) -> String {
        self.active()
            .map(|s| format!("{format_char}{}", s.code()))
            .collect()
    }
}

// ============================================================================
// FormatConfig
// ============================================================================

/// How colored text is written out.
///
/// # JSON Format
///
/// ```json
/// { "color": "&#$1$2$3$4$5$6$f$c", "char": "&" }
/// // or
/// { "color": "<#$1$2$3$4$5$6>$c", "bold": "<bold>$t</bold>" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct FormatConfig {
    /// Per-unit color template.
    pub color: String,

    /// Format character; selects character-code mode when present and
    /// non-empty.
    #[serde(rename = "char", default, skip_serializing_if = "Option::is_none")]
    pub format_char: Option<String>,

    /// Bold wrapper template (structural mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,

    /// Italic wrapper template (structural mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<String>,

    /// Underline wrapper template (structural mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<String>,

    /// Strikethrough wrapper template (structural mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<String>,
}

/// The active mode of a [`FormatConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode<'a> {
    /// Escape codes led by the given format character.
    Character(&'a str),
    /// Markup templates.
    Structural,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::character("&#$1$2$3$4$5$6$f$c", "&")
    }
}

impl FormatConfig {
    /// Creates a character-code format.
    pub fn character(color: impl Into<String>, format_char: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            format_char: Some(format_char.into()),
            bold: None,
            italic: None,
            underline: None,
            strikethrough: None,
        }
    }

    /// Creates a structural format with one wrapper template per style.
    pub fn structural(
        color: impl Into<String>,
        bold: impl Into<String>,
        italic: impl Into<String>,
        underline: impl Into<String>,
        strikethrough: impl Into<String>,
    ) -> Self {
        Self {
            color: color.into(),
            format_char: None,
            bold: Some(bold.into()),
            italic: Some(italic.into()),
            underline: Some(underline.into()),
            strikethrough: Some(strikethrough.into()),
        }
    }

    /// Returns the active mode.
    pub fn mode(&self) -> FormatMode<'_> {
        match &self.format_char {
            Some(c) if !c.is_empty() => FormatMode::Character(c),
            _ => FormatMode::Structural,
        }
    }

    /// Returns the wrapper template for a style, if any.
    pub fn template(&self, style: Style) -> Option<&str> {
        match style {
            Style::Bold => self.bold.as_deref(),
            Style::Italic => self.italic.as_deref(),
            Style::Underline => self.underline.as_deref(),
            Style::Strikethrough => self.strikethrough.as_deref(),
        }
    }

    /// The formats offered out of the box.
    pub fn builtin() -> Vec<FormatConfig> {
        vec![
            Self::character("&#$1$2$3$4$5$6$f$c", "&"),
            Self::character("<#$1$2$3$4$5$6>$f$c", "&"),
            Self::character("&x&$1&$2&$3&$4&$5&$6$f$c", "&"),
            Self::character("§x§$1§$2§$3§$4§$5§$6$f$c", "§"),
            Self::structural(
                "<#$1$2$3$4$5$6>$c",
                "<bold>$t</bold>",
                "<italic>$t</italic>",
                "<underlined>$t</underlined>",
                "<strikethrough>$t</strikethrough>",
            ),
            Self::structural(
                "[COLOR=#$1$2$3$4$5$6]$c[/COLOR]",
                "[BOLD]$t[/BOLD]",
                "[ITALIC]$t[/ITALIC]",
                "[UNDERLINE]$t[/UNDERLINE]",
                "[STRIKE]$t[/STRIKE]",
            ),
        ]
    }

    /// Returns true if this is one of the [`builtin`](Self::builtin) formats.
    pub fn is_builtin(&self) -> bool {
        Self::builtin().contains(self)
    }

    /// Human-readable label for format pickers, e.g. `&#rrggbb&l`.
    pub fn label(&self, styles: StyleFlags) -> String {
        let codes = match self.mode() {
            FormatMode::Character(c) => styles.codes(c),
            FormatMode::Structural => String::new(),
        };
        render::fill_hex_placeholders(&self.color, "rrggbb")
            .replace("$f", &codes)
            .replace("$c", "")
    }

    /// Label for a style toggle: the style code, or the wrapper template
    /// with `$t` removed.
    pub fn style_label(&self, style: Style) -> String {
        match self.mode() {
            FormatMode::Character(c) => format!("{c}{}", style.code()),
            FormatMode::Structural => self.template(style).unwrap_or_default().replace("$t", ""),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
