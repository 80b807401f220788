//! Color stops and the sorted collection that defines a gradient.
//!
//! A gradient is an ordered list of [`ColorStop`]s, each pinning a color to a
//! percentage position in `[0, 100]`. [`ColorStops`] keeps the list sorted and
//! refuses two stops at the same position, so the [`Gradient`] interpolator
//! never sees a zero-width segment.
//!
//! # Example
//!
//! ```
//! use mc_gradient::{ColorStop, ColorStops, Gradient};
//!
//! let stops = ColorStops::new(vec![
//!     ColorStop::new("#0000FF".parse().unwrap(), 100.0),
//!     ColorStop::new("#FF0000".parse().unwrap(), 0.0),
//! ])
//! .unwrap();
//!
//! // Sorted on construction
//! assert_eq!(stops[0].pos, 0.0);
//!
//! let colors: Vec<_> = Gradient::new(&stops, 2).unwrap().iter().collect();
//! assert_eq!(colors[0].red, 255);
//! assert_eq!(colors[1].blue, 255);
//! ```

pub mod interpolator;

pub use interpolator::{Gradient, GradientIter};

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::HexColor;

/// Minimum number of stops needed to form a gradient.
pub const MIN_STOPS: usize = 2;

// ============================================================================
// Errors
// ============================================================================

/// Errors produced when editing a stop collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StopError {
    /// Another stop already sits at this position.
    #[error("a color stop already exists at {0}%")]
    DuplicatePosition(f64),

    /// The position is not a finite number.
    #[error("stop position must be a finite number")]
    InvalidPosition,

    /// The edit would leave fewer than two stops.
    #[error("a gradient needs at least {MIN_STOPS} color stops")]
    TooFewStops,

    /// No stop exists at the given index.
    #[error("no color stop at index {index} (have {len})")]
    OutOfBounds { index: usize, len: usize },
}

// ============================================================================
// ColorStop
// ============================================================================

/// A color pinned to a percentage position along the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ColorStop {
    /// The stop color.
    pub hex: HexColor,

    /// Position along the gradient (0-100).
    pub pos: f64,
}

impl ColorStop {
    /// Creates a stop. The position is clamped to 0-100.
    pub fn new(hex: HexColor, pos: f64) -> Self {
        Self {
            hex,
            pos: pos.clamp(0.0, 100.0),
        }
    }
}

// ============================================================================
// ColorStops
// ============================================================================

/// A sorted collection of color stops with unique positions.
///
/// Collections with fewer than two stops are representable (they render as
/// plain text), but the editing operations never shrink a collection below
/// two stops.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "jsonschema", schemars(transparent))]
pub struct ColorStops(Vec<ColorStop>);

impl ColorStops {
    /// Builds a collection, sorting by position.
    ///
    /// Fails if two stops share a position or a position is not finite.
    pub fn new(mut stops: Vec<ColorStop>) -> Result<Self, StopError> {
        if stops.iter().any(|s| !s.pos.is_finite()) {
            return Err(StopError::InvalidPosition);
        }
        for stop in &mut stops {
            stop.pos = stop.pos.clamp(0.0, 100.0);
        }
        stops.sort_by(|a, b| a.pos.total_cmp(&b.pos));
        if let Some(pair) = stops.windows(2).find(|w| w[0].pos == w[1].pos) {
            return Err(StopError::DuplicatePosition(pair[1].pos));
        }
        Ok(Self(stops))
    }

    /// Builds a collection from colors spread evenly across 0-100.
    pub fn evenly_spaced(colors: impl IntoIterator<Item = HexColor>) -> Self {
        let mut stops: Vec<_> = colors
            .into_iter()
            .map(|hex| ColorStop { hex, pos: 0.0 })
            .collect();
        spread(&mut stops);
        Self(stops)
    }

    /// Returns the stops as a slice, sorted by position.
    pub fn as_slice(&self) -> &[ColorStop] {
        &self.0
    }

    /// Returns true if there are enough stops to form a gradient.
    pub fn is_gradient(&self) -> bool {
        self.0.len() >= MIN_STOPS
    }

    /// Returns true if a stop exists at `pos`.
    pub fn contains_position(&self, pos: f64) -> bool {
        self.0.iter().any(|s| s.pos == pos)
    }

    /// Inserts a stop, keeping the collection sorted.
    ///
    /// Returns the index the stop landed at.
    pub fn insert(&mut self, stop: ColorStop) -> Result<usize, StopError> {
        if !stop.pos.is_finite() {
            return Err(StopError::InvalidPosition);
        }
        let stop = ColorStop::new(stop.hex, stop.pos);
        if self.contains_position(stop.pos) {
            return Err(StopError::DuplicatePosition(stop.pos));
        }
        let index = self.0.partition_point(|s| s.pos < stop.pos);
        self.0.insert(index, stop);
        Ok(index)
    }

    /// Removes the stop at `index`. Refuses to leave fewer than two stops.
    pub fn remove(&mut self, index: usize) -> Result<ColorStop, StopError> {
        self.check_index(index)?;
        if self.0.len() <= MIN_STOPS {
            return Err(StopError::TooFewStops);
        }
        Ok(self.0.remove(index))
    }

    /// Moves the stop at `index` to a new position.
    ///
    /// Returns the stop's index after re-sorting.
    pub fn set_position(&mut self, index: usize, pos: f64) -> Result<usize, StopError> {
        self.check_index(index)?;
        if !pos.is_finite() {
            return Err(StopError::InvalidPosition);
        }
        let pos = pos.clamp(0.0, 100.0);
        if self.0[index].pos == pos {
            return Ok(index);
        }
        if self.contains_position(pos) {
            return Err(StopError::DuplicatePosition(pos));
        }
        let mut stop = self.0.remove(index);
        stop.pos = pos;
        let new_index = self.0.partition_point(|s| s.pos < pos);
        self.0.insert(new_index, stop);
        Ok(new_index)
    }

    /// Replaces the color of the stop at `index`.
    pub fn set_color(&mut self, index: usize, hex: HexColor) -> Result<(), StopError> {
        self.check_index(index)?;
        self.0[index].hex = hex;
        Ok(())
    }

    /// Exchanges the positions of two stops, which swaps their colors in
    /// the gradient.
    ///
    /// `new_index` wraps: one below zero selects the last stop, one past the
    /// end selects the first.
    pub fn swap(&mut self, current: usize, new_index: isize) -> Result<(), StopError> {
        self.check_index(current)?;
        let len = self.0.len();
        let target = if new_index < 0 {
            len - 1
        } else if new_index as usize >= len {
            0
        } else {
            new_index as usize
        };
        let (a, b) = (self.0[current].hex, self.0[target].hex);
        self.0[current].hex = b;
        self.0[target].hex = a;
        Ok(())
    }

    /// Reassigns positions so stops are evenly spread across 0-100.
    pub fn spread_evenly(&mut self) {
        spread(&mut self.0);
    }

    /// Returns true if the stops already sit at even intervals.
    pub fn is_evenly_spread(&self) -> bool {
        let mut expected = self.0.clone();
        spread(&mut expected);
        expected.iter().zip(&self.0).all(|(e, s)| (e.pos - s.pos).abs() < 1e-9)
    }

    /// Grows or shrinks the collection to `count` evenly spread stops.
    ///
    /// Each new stop takes the color the current gradient has at its new
    /// position, so the endpoints and the overall look are preserved.
    pub fn resize(&mut self, count: usize) -> Result<(), StopError> {
        if count < MIN_STOPS {
            return Err(StopError::TooFewStops);
        }
        if count == self.0.len() {
            self.spread_evenly();
            return Ok(());
        }
        let fallback = self.0.first().map_or(HexColor::from_channels(0, 0, 0), |s| s.hex);
        let step = 100.0 / (count - 1) as f64;
        let resized = (0..count)
            .map(|i| {
                let pos = step * i as f64;
                let hex = interpolator::sample_at(&self.0, pos).map_or(fallback, HexColor::new);
                ColorStop { hex, pos }
            })
            .collect();
        self.0 = resized;
        Ok(())
    }

    /// Renders the stops as a CSS `linear-gradient` for previews.
    pub fn css_linear_gradient(&self) -> String {
        let parts: Vec<_> = self.0.iter().map(|s| format!("{} {}%", s.hex, s.pos)).collect();
        format!("linear-gradient(to right, {})", parts.join(", "))
    }

    fn check_index(&self, index: usize) -> Result<(), StopError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(StopError::OutOfBounds {
                index,
                len: self.0.len(),
            })
        }
    }
}

/// Rounds a click position (fraction of the bar width) to the nearest
/// character boundary of a `text_len` string, as a percentage.
pub fn snap_position(fraction: f64, text_len: usize) -> f64 {
    if text_len == 0 {
        return (fraction * 100.0).clamp(0.0, 100.0);
    }
    let len = text_len as f64;
    ((fraction * len).round() / len * 100.0).clamp(0.0, 100.0)
}

fn spread(stops: &mut [ColorStop]) {
    match stops.len() {
        0 => {}
        1 => stops[0].pos = 0.0,
        n => {
            let step = 100.0 / (n - 1) as f64;
            for (i, stop) in stops.iter_mut().enumerate() {
                stop.pos = step * i as f64;
            }
        }
    }
}

impl Deref for ColorStops {
    type Target = [ColorStop];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<ColorStop>> for ColorStops {
    type Error = StopError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<ColorStops> for Vec<ColorStop> {
    fn from(stops: ColorStops) -> Self {
        stops.0
    }
}

impl<'a> IntoIterator for &'a ColorStops {
    type Item = &'a ColorStop;
    type IntoIter = std::slice::Iter<'a, ColorStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        s.parse().unwrap()
    }

    fn two_stops() -> ColorStops {
        ColorStops::new(vec![
            ColorStop::new(hex("FF0000"), 0.0),
            ColorStop::new(hex("0000FF"), 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_sorts_and_rejects_duplicates() {
        let stops = ColorStops::new(vec![
            ColorStop::new(hex("0000FF"), 100.0),
            ColorStop::new(hex("00FF00"), 50.0),
            ColorStop::new(hex("FF0000"), 0.0),
        ])
        .unwrap();
        let positions: Vec<_> = stops.iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![0.0, 50.0, 100.0]);

        let dup = ColorStops::new(vec![
            ColorStop::new(hex("0000FF"), 40.0),
            ColorStop::new(hex("00FF00"), 40.0),
        ]);
        assert_eq!(dup, Err(StopError::DuplicatePosition(40.0)));
    }

    #[test]
    fn insert_keeps_order_and_rejects_collisions() {
        let mut stops = two_stops();
        assert_eq!(stops.insert(ColorStop::new(hex("00FF00"), 50.0)), Ok(1));
        assert_eq!(
            stops.insert(ColorStop::new(hex("FFFFFF"), 50.0)),
            Err(StopError::DuplicatePosition(50.0))
        );
        assert_eq!(stops.len(), 3);
    }

    #[test]
    fn remove_keeps_two_stops() {
        let mut stops = two_stops();
        assert_eq!(stops.remove(0), Err(StopError::TooFewStops));
        stops.insert(ColorStop::new(hex("00FF00"), 50.0)).unwrap();
        assert!(stops.remove(1).is_ok());
        assert!(matches!(stops.remove(5), Err(StopError::OutOfBounds { index: 5, len: 2 })));
    }

    #[test]
    fn set_position_resorts() {
        let mut stops = two_stops();
        stops.insert(ColorStop::new(hex("00FF00"), 50.0)).unwrap();
        assert_eq!(stops.set_position(0, 75.0), Ok(1));
        assert_eq!(stops[1].hex, hex("FF0000"));
        assert_eq!(stops.set_position(1, 100.0), Err(StopError::DuplicatePosition(100.0)));
        assert_eq!(stops.set_position(1, f64::NAN), Err(StopError::InvalidPosition));
    }

    #[test]
    fn swap_wraps_around() {
        let mut stops = two_stops();
        stops.insert(ColorStop::new(hex("00FF00"), 50.0)).unwrap();
        stops.swap(0, -1).unwrap();
        assert_eq!(stops[0].hex, hex("0000FF"));
        assert_eq!(stops[2].hex, hex("FF0000"));

        stops.swap(2, 3).unwrap();
        assert_eq!(stops[0].hex, hex("FF0000"));
        assert_eq!(stops[2].hex, hex("0000FF"));
    }

    #[test]
    fn spread_and_resize() {
        let mut stops = ColorStops::new(vec![
            ColorStop::new(hex("FF0000"), 0.0),
            ColorStop::new(hex("00FF00"), 10.0),
            ColorStop::new(hex("0000FF"), 100.0),
        ])
        .unwrap();
        assert!(!stops.is_evenly_spread());
        stops.spread_evenly();
        assert!(stops.is_evenly_spread());
        assert_eq!(stops[1].pos, 50.0);

        let mut two = two_stops();
        two.resize(3).unwrap();
        assert_eq!(two.len(), 3);
        assert_eq!(two[0].hex, hex("FF0000"));
        assert_eq!(two[1].pos, 50.0);
        assert_eq!(two[2].hex, hex("0000FF"));
        assert_eq!(two.resize(1), Err(StopError::TooFewStops));

        stops.resize(2).unwrap();
        assert_eq!(stops[0].hex, hex("FF0000"));
        assert_eq!(stops[1].pos, 100.0);
    }

    #[test]
    fn snap_to_character_boundaries() {
        assert_eq!(snap_position(0.26, 4), 25.0);
        assert_eq!(snap_position(1.4, 4), 100.0);
        assert_eq!(snap_position(0.5, 0), 50.0);
    }

    #[test]
    fn css_preview() {
        assert_eq!(
            two_stops().css_linear_gradient(),
            "linear-gradient(to right, #FF0000 0%, #0000FF 100%)"
        );
    }

    #[test]
    fn deserialize_validates() {
        let json = r##"[{"hex":"#0000FF","pos":100},{"hex":"#FF0000","pos":0}]"##;
        let stops: ColorStops = serde_json::from_str(json).unwrap();
        assert_eq!(stops[0].hex, hex("FF0000"));

        let dup = r##"[{"hex":"#0000FF","pos":0},{"hex":"#FF0000","pos":0}]"##;
        assert!(serde_json::from_str::<ColorStops>(dup).is_err());
    }
}
