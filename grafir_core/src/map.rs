// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional mapping between data space and screen space.
//!
//! Every renderer in the widget (elements, grid lines, markers, the axes
//! themselves) goes through these four formulas, so their conventions are
//! normative:
//! - screen X grows rightward and screen Y grows *downward*, so the vertical
//!   map inverts its normalized coordinate;
//! - a descending axis flips the mapping direction;
//! - a log axis maps `log10(|x|)`, with exactly `0.0` passed through as `0.0`
//!   in log space rather than `-inf`.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Rect};

use crate::range::AxisRange;

/// Per-axis inputs to the coordinate mapper.
///
/// `range` is in display space: plain data units for a linear axis, `log10`
/// units for a log axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapSpec {
    /// Displayed bounds in display space.
    pub range: AxisRange,
    /// Whether values go through `log10` before normalization.
    pub log_scale: bool,
    /// Whether the mapping direction is reversed.
    pub descending: bool,
}

impl MapSpec {
    fn to_display(&self, x: f64) -> f64 {
        if self.log_scale {
            if x > 0.0 {
                x.log10()
            } else if x < 0.0 {
                (-x).log10()
            } else {
                0.0
            }
        } else {
            x
        }
    }

    fn from_display(&self, v: f64) -> f64 {
        if self.log_scale { 10.0_f64.powf(v) } else { v }
    }

    /// Normalized `[0, 1]` position of a display-space value, after the
    /// descending flip.
    ///
    /// Tick values are already in display space, so axis geometry goes
    /// through this rather than [`h_map`]/[`v_map`] (which would re-apply the
    /// log transform).
    pub fn fraction(&self, v: f64) -> f64 {
        let t = self.range.normalize(v);
        if self.descending { 1.0 - t } else { t }
    }
}

/// Maps a data value to a horizontal pixel inside `plot`.
pub fn h_map(spec: &MapSpec, plot: Rect, x: f64) -> f64 {
    let mut t = spec.range.normalize(spec.to_display(x));
    if spec.descending {
        t = 1.0 - t;
    }
    t * plot.width() + plot.x0
}

/// Maps a data value to a vertical pixel inside `plot`.
///
/// The normalized coordinate is inverted because data values grow upward
/// while screen Y grows downward.
pub fn v_map(spec: &MapSpec, plot: Rect, y: f64) -> f64 {
    let mut t = spec.range.normalize(spec.to_display(y));
    if spec.descending {
        t = 1.0 - t;
    }
    (1.0 - t) * plot.height() + plot.y0
}

/// Inverse of [`h_map`].
pub fn h_unmap(spec: &MapSpec, plot: Rect, px: f64) -> f64 {
    let w = plot.width();
    let mut t = if w > 0.0 { (px - plot.x0) / w } else { 0.0 };
    if spec.descending {
        t = 1.0 - t;
    }
    spec.from_display(spec.range.min() + t * spec.range.span())
}

/// Inverse of [`v_map`].
pub fn v_unmap(spec: &MapSpec, plot: Rect, py: f64) -> f64 {
    let h = plot.height();
    let mut t = if h > 0.0 { 1.0 - (py - plot.y0) / h } else { 0.0 };
    if spec.descending {
        t = 1.0 - t;
    }
    spec.from_display(spec.range.min() + t * spec.range.span())
}

/// A 2D mapper pairing both axes with the shared plot rectangle.
///
/// When `inverted` is set the X data axis maps to the vertical screen
/// dimension and vice versa (horizontal bar charts and the like).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaneMap {
    /// Mapper inputs for the X data axis.
    pub x: MapSpec,
    /// Mapper inputs for the Y data axis.
    pub y: MapSpec,
    /// The plot rectangle in screen pixels.
    pub plot: Rect,
    /// Swap which data axis drives which screen dimension.
    pub inverted: bool,
}

impl PlaneMap {
    /// Maps a data point to a screen point.
    pub fn map(&self, x: f64, y: f64) -> Point {
        if self.inverted {
            Point::new(h_map(&self.y, self.plot, y), v_map(&self.x, self.plot, x))
        } else {
            Point::new(h_map(&self.x, self.plot, x), v_map(&self.y, self.plot, y))
        }
    }

    /// Maps a screen point back to a `(x, y)` data pair.
    pub fn unmap(&self, p: Point) -> (f64, f64) {
        if self.inverted {
            (
                v_unmap(&self.x, self.plot, p.y),
                h_unmap(&self.y, self.plot, p.x),
            )
        } else {
            (
                h_unmap(&self.x, self.plot, p.x),
                v_unmap(&self.y, self.plot, p.y),
            )
        }
    }
}
