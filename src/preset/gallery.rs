//! Built-in named gradients.

use super::Preset;
use crate::color::HexColor;
use crate::gradient::ColorStops;

/// A named gradient with evenly spread stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    /// Stop colors as `#RRGGBB`, first to last.
    pub colors: &'static [&'static str],
}

const GALLERY: &[ColorPreset] = &[
    ColorPreset {
        name: "birdflop",
        colors: &["#084CFB", "#ADF3FD"],
    },
    ColorPreset {
        name: "SimplyMC",
        colors: &["#00FFE0", "#EB00FF"],
    },
    ColorPreset {
        name: "Rainbow",
        colors: &[
            "#FF0000",
            "#FF7F00",
            "#FFFF00",
            "#00FF00",
            "#0000FF",
            "#4B0082",
            "#9400D3",
        ],
    },
    ColorPreset {
        name: "Skyline",
        colors: &["#1488CC", "#2B32B2"],
    },
    ColorPreset {
        name: "Mango",
        colors: &["#FFE259", "#FFA751"],
    },
    ColorPreset {
        name: "Vice City",
        colors: &["#3494E6", "#EC6EAD"],
    },
    ColorPreset {
        name: "Dawn",
        colors: &["#F3904F", "#3B4371"],
    },
    ColorPreset {
        name: "Rose",
        colors: &["#F4C4F3", "#FC67FA"],
    },
    ColorPreset {
        name: "Firewatch",
        colors: &["#CB2D3E", "#EF473A"],
    },
];

impl ColorPreset {
    /// Every built-in gradient.
    pub fn all() -> &'static [ColorPreset] {
        GALLERY
    }

    /// Finds a gradient by exact name, ignoring case.
    pub fn find(name: &str) -> Option<&'static ColorPreset> {
        GALLERY.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Gradients whose name contains `term`, ignoring case.
    pub fn search(term: &str) -> impl Iterator<Item = &'static ColorPreset> {
        let term = term.to_lowercase();
        GALLERY
            .iter()
            .filter(move |p| p.name.to_lowercase().contains(&term))
    }

    /// The gallery entry whose stops equal `stops`, if any.
    pub fn matching(stops: &ColorStops) -> Option<&'static ColorPreset> {
        GALLERY.iter().find(|p| &p.stops() == stops)
    }

    /// The entry as a preset carrying its name and stops, ready for
    /// [`to_query_pairs`](super::to_query_pairs) or
    /// [`SavedPresets`](super::SavedPresets).
    pub fn preset(&self) -> Preset {
        Preset {
            name: Some(self.name.to_string()),
            colors: Some(self.stops()),
            ..Preset::default()
        }
    }

    /// Builds the evenly spread stop list.
    ///
    /// Gallery colors are fixed literals; any that fail to parse are skipped.
    pub fn stops(&self) -> ColorStops {
        ColorStops::evenly_spaced(
            self.colors
                .iter()
                .filter_map(|hex| hex.parse::<HexColor>().ok()),
        )
    }
}
