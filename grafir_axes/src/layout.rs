// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin layout.
//!
//! The plot rectangle is what is left of the widget after each of the four
//! margins takes the room its axes need. Margins stack multiple axes, carry
//! the graph title and legend, enforce a minimum size, and honor explicit
//! user overrides; an optional aspect-ratio constraint shrinks the plot's
//! wider dimension and returns the freed pixels to the margins.

use kurbo::Rect;
use smallvec::SmallVec;

use crate::arena::AxisId;

/// Minimum size of any margin, in pixels.
pub const MIN_MARGIN: f64 = 3.0;

/// Gap between a tick end (or the axis line) and its label, in pixels.
pub const TICK_LABEL_GAP: f64 = 2.0;

/// Gap between the label block and the axis title, in pixels.
pub const TITLE_GAP: f64 = 4.0;

/// Minor ticks are drawn at this fraction of the major tick length.
pub const MINOR_TICK_RATIO: f64 = 2.0 / 3.0;

/// One of the four plot-border regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarginSide {
    /// Below the plot.
    Bottom,
    /// Left of the plot.
    Left,
    /// Above the plot.
    Top,
    /// Right of the plot.
    Right,
}

impl MarginSide {
    /// All four sides, in layout order.
    pub const ALL: [Self; 4] = [Self::Bottom, Self::Left, Self::Top, Self::Right];

    /// Whether axes in this margin run horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Bottom => 0,
            Self::Left => 1,
            Self::Top => 2,
            Self::Right => 3,
        }
    }
}

/// One plot-border region and the axes stacked on it.
#[derive(Clone, Debug, Default)]
pub struct Margin {
    /// Axes assigned to this side, in stacking order (innermost first).
    pub axes: SmallVec<[AxisId; 4]>,
    /// Explicit size override; always wins over the computed size.
    pub requested: Option<f64>,
    /// Size computed from the axes' geometry in the last pass.
    pub computed: f64,
    /// Longest axis-title extent among this margin's axes, along the axis.
    ///
    /// When several axes share the margin there is no room for titles along
    /// the shared edge; they spill into the adjoining margin, which must be
    /// at least this wide.
    pub max_title: f64,
}

impl Margin {
    /// The size this margin occupies: the explicit override if set, else the
    /// computed requirement.
    pub fn size(&self) -> f64 {
        self.requested.unwrap_or(self.computed)
    }
}

/// Perpendicular pixel positions for one axis within its margin.
///
/// For top/left margins the offsets run negative (outward from the plot);
/// for bottom/right they run positive. A negative tick length points the
/// ticks into the plot, swapping the roles of the baseline and tick-end
/// coordinates; labels always stay on the outward side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisOffsets {
    /// Where the axis baseline sits.
    pub axis_line: f64,
    /// Where major tick marks end.
    pub major_tick: f64,
    /// Where minor tick marks end.
    pub minor_tick: f64,
    /// Where the tick-label text anchors.
    pub label: f64,
}

/// Computes the four perpendicular coordinates for an axis.
///
/// `stack_offset` is how far this axis is pushed out by axes stacked before
/// it in the same margin.
pub fn axis_offsets(
    side: MarginSide,
    plot: Rect,
    stack_offset: f64,
    tick_length: f64,
) -> AxisOffsets {
    let (base, sign) = match side {
        MarginSide::Bottom => (plot.y1, 1.0),
        MarginSide::Left => (plot.x0, -1.0),
        MarginSide::Top => (plot.y0, -1.0),
        MarginSide::Right => (plot.x1, 1.0),
    };
    let axis_line = base + sign * stack_offset;
    let major_tick = axis_line + sign * tick_length;
    let minor_tick = axis_line + sign * (tick_length * MINOR_TICK_RATIO);
    // With inward ticks the baseline is the outermost of the pair.
    let outer = if sign > 0.0 {
        axis_line.max(major_tick)
    } else {
        axis_line.min(major_tick)
    };
    let label = outer + sign * TICK_LABEL_GAP;
    AxisOffsets {
        axis_line,
        major_tick,
        minor_tick,
        label,
    }
}

/// The result of a margin layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    /// The plot rectangle.
    pub plot: Rect,
    /// Final margin sizes, indexed by [`MarginSide::index`].
    pub sizes: [f64; 4],
}

/// Inputs to [`layout_margins`] beyond the per-margin axis requirements.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutExtras {
    /// Height reserved for the graph title (added to the top margin).
    pub title_height: f64,
    /// Legend size and site, if a legend occupies a margin.
    pub legend: Option<(f64, MarginSide)>,
    /// Desired plot width/height ratio; `0.0` leaves it unconstrained.
    pub aspect: f64,
}

/// Computes the final margin sizes and plot rectangle.
///
/// `margins` carry the per-side computed requirements (see
/// [`crate::geometry`]); this pass adds the title, legend, and title-spill
/// adjustments, applies the aspect constraint, and lets explicit overrides
/// win last.
pub fn layout_margins(
    width: f64,
    height: f64,
    margins: &[Margin; 4],
    extras: &LayoutExtras,
) -> FrameLayout {
    let mut sizes = [0.0_f64; 4];
    for side in MarginSide::ALL {
        sizes[side.index()] = margins[side.index()].computed.max(MIN_MARGIN);
    }

    sizes[MarginSide::Top.index()] += extras.title_height.max(0.0);
    if let Some((extent, site)) = extras.legend {
        sizes[site.index()] += extent.max(0.0);
    }

    // Titles of stacked axes spill past the end of the shared edge: bottom
    // and top margins spill into the right margin, left and right margins
    // spill into the top margin.
    for side in [MarginSide::Bottom, MarginSide::Top] {
        let m = &margins[side.index()];
        if m.axes.len() > 1 {
            let i = MarginSide::Right.index();
            sizes[i] = sizes[i].max(m.max_title);
        }
    }
    for side in [MarginSide::Left, MarginSide::Right] {
        let m = &margins[side.index()];
        if m.axes.len() > 1 {
            let i = MarginSide::Top.index();
            sizes[i] = sizes[i].max(m.max_title);
        }
    }

    for side in MarginSide::ALL {
        if let Some(req) = margins[side.index()].requested {
            sizes[side.index()] = req.max(0.0);
        }
    }

    let mut left = sizes[MarginSide::Left.index()];
    let mut right = sizes[MarginSide::Right.index()];
    let mut top = sizes[MarginSide::Top.index()];
    let mut bottom = sizes[MarginSide::Bottom.index()];

    let plot_w = (width - left - right).max(0.0);
    let plot_h = (height - top - bottom).max(0.0);

    if extras.aspect > 0.0 && plot_w > 0.0 && plot_h > 0.0 {
        let current = plot_w / plot_h;
        if current > extras.aspect {
            // Too wide: shrink the plot and split the slack between the
            // horizontal margins.
            let extra = plot_w - plot_h * extras.aspect;
            left += 0.5 * extra;
            right += 0.5 * extra;
        } else if current < extras.aspect {
            let extra = plot_h - plot_w / extras.aspect;
            top += 0.5 * extra;
            bottom += 0.5 * extra;
        }
    }

    let plot = Rect::new(
        left,
        top,
        (width - right).max(left),
        (height - bottom).max(top),
    );
    FrameLayout {
        plot,
        sizes: [bottom, left, top, right],
    }
}
