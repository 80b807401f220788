//! Positional gradient interpolation.
//!
//! [`Gradient`] maps `N` integer samples onto the 0-100 position range so the
//! first sample lands on position 0 and the last on position 100. Each sample
//! takes the linear per-channel blend of the two stops that bracket its
//! position; positions outside the stops clamp to the nearest endpoint.

use std::iter::FusedIterator;

use palette::Srgb;

use super::{ColorStop, ColorStops, MIN_STOPS};
use crate::color::Rgb;

// ============================================================================
// Gradient
// ============================================================================

/// A gradient sampled at a fixed number of evenly spaced points.
///
/// Construction fails (returns `None`) with fewer than two stops; callers
/// fall back to uncolored output in that case.
///
/// The sequence is restartable: every call to [`iter`](Self::iter) begins at
/// sample 0, and [`color_at`](Self::color_at) gives random access.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<(f64, Rgb)>,
    samples: usize,
}

impl Gradient {
    /// Creates a gradient over `samples` points.
    pub fn new(stops: &ColorStops, samples: usize) -> Option<Self> {
        if !stops.is_gradient() {
            tracing::debug!(stops = stops.len(), "not enough color stops for a gradient");
            return None;
        }
        Some(Self {
            stops: stops.iter().map(|s| (s.pos, s.hex.rgb())).collect(),
            samples,
        })
    }

    /// Returns the number of samples in the sequence.
    pub fn len(&self) -> usize {
        self.samples
    }

    /// Returns true if the sequence has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Maps a sample index to its position on the 0-100 range.
    pub fn position_of(&self, index: usize) -> f64 {
        if self.samples <= 1 {
            0.0
        } else {
            index as f64 / (self.samples - 1) as f64 * 100.0
        }
    }

    /// Returns the color of sample `index`.
    ///
    /// Indices past the end clamp to the last stop's color.
    pub fn color_at(&self, index: usize) -> Rgb {
        interpolate(&self.stops, self.position_of(index))
    }

    /// Returns a cursor over all samples, starting at sample 0.
    pub fn iter(&self) -> GradientIter<'_> {
        GradientIter {
            gradient: self,
            cursor: 0,
        }
    }

    /// Collects every sample into a vector.
    pub fn colors(&self) -> Vec<Rgb> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a Gradient {
    type Item = Rgb;
    type IntoIter = GradientIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// GradientIter
// ============================================================================

/// Cursor over a [`Gradient`]'s samples. Exhausts after `len` calls.
#[derive(Debug, Clone)]
pub struct GradientIter<'a> {
    gradient: &'a Gradient,
    cursor: usize,
}

impl Iterator for GradientIter<'_> {
    type Item = Rgb;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.gradient.samples {
            return None;
        }
        let color = self.gradient.color_at(self.cursor);
        self.cursor += 1;
        Some(color)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.gradient.samples.saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GradientIter<'_> {}

impl FusedIterator for GradientIter<'_> {}

// ============================================================================
// Helper Functions
// ============================================================================

/// Samples a sorted stop list at a position in 0-100.
///
/// Returns `None` with fewer than two stops.
pub fn sample_at(stops: &[ColorStop], pos: f64) -> Option<Rgb> {
    if stops.len() < MIN_STOPS {
        return None;
    }
    let stops: Vec<_> = stops.iter().map(|s| (s.pos, s.hex.rgb())).collect();
    Some(interpolate(&stops, pos))
}

fn interpolate(stops: &[(f64, Rgb)], pos: f64) -> Rgb {
    let (first_pos, first) = stops[0];
    let (last_pos, last) = stops[stops.len() - 1];
    if pos <= first_pos {
        return first;
    }
    if pos >= last_pos {
        return last;
    }

    let segment = stops
        .windows(2)
        .find(|w| w[0].0 <= pos && pos <= w[1].0)
        .unwrap_or(&stops[stops.len() - 2..]);
    let (a_pos, a) = segment[0];
    let (b_pos, b) = segment[1];
    let t = (pos - a_pos) / (b_pos - a_pos);

    Srgb::new(
        lerp_channel(a.red, b.red, t),
        lerp_channel(a.green, b.green, t),
        lerp_channel(a.blue, b.blue, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let value = a as f64 + (b as f64 - a as f64) * t;
    value.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Tests
// ============================================================================
