// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis pixel geometry.
//!
//! [`axis_geometry`] turns the ticks of the last rescale into labels and a
//! margin-size requirement, measuring every label through the host's
//! [`TextMeasurer`] (rotation-aware). [`map_axis`] then materializes the
//! actual line segments and label anchors for the renderer.
//!
//! Both functions return fresh owned buffers; nothing in here hands out
//! references that could survive the next rescale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use grafir_text::{TextMeasurer, TextStyle};
use kurbo::{Line, Point, Rect};

use crate::axis::{AxisState, ErrorHook, ScaleKind};
use crate::format::{DEFAULT_SIG_DIGITS, format_log_label, format_sig};
use crate::layout::{AxisOffsets, MarginSide, TICK_LABEL_GAP, TITLE_GAP};

/// One tick label: the tick's display-space position and its text.
#[derive(Clone, Debug, PartialEq)]
pub struct TickLabel {
    /// Tick position in display space (log10 units on a log axis).
    pub value: f64,
    /// Formatted label text.
    pub text: String,
}

/// Measured geometry for one axis, rebuilt every layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisGeometry {
    /// Total margin thickness this axis requires.
    pub extent: f64,
    /// Largest label extent perpendicular to the axis.
    pub max_label_extent: f64,
    /// Largest label extent along the axis.
    pub max_label_along: f64,
    /// Margin thickness taken by the title block (including its gap).
    pub title_extent: f64,
    /// Title extent along the axis, for spill into the adjoining margin.
    pub title_along: f64,
    /// Labels for the in-range major ticks.
    pub labels: Vec<TickLabel>,
}

/// Builds labels and measures the margin requirement for one axis.
///
/// Major ticks outside the displayed range (a tight axis keeps its nice grid)
/// produce no labels. Label text comes from the axis formatter when one is
/// installed; a formatter failure keeps the default numeric label and reports
/// through `error_hook`.
pub fn axis_geometry(
    state: &AxisState,
    side: MarginSide,
    measurer: &dyn TextMeasurer,
    error_hook: Option<&ErrorHook>,
) -> AxisGeometry {
    let opts = state.options();
    let horizontal = side.is_horizontal();
    let range = state.axis_range();

    let mut geometry = AxisGeometry::default();
    if opts.show_ticks {
        let theta = opts.label_angle.to_radians();
        let sin_a = theta.sin().abs();
        let cos_a = theta.cos().abs();
        for &value in &state.major_ticks().values {
            if !range.contains(value) {
                continue;
            }
            let text = tick_label_text(state, value, error_hook);
            let metrics = measurer.measure(&text, TextStyle::new(opts.label_font_size));
            let w = metrics.advance_width;
            let h = metrics.line_height();
            let (perpendicular, along) = if horizontal {
                (sin_a * w + cos_a * h, cos_a * w + sin_a * h)
            } else {
                (cos_a * w + sin_a * h, sin_a * w + cos_a * h)
            };
            geometry.max_label_extent = geometry.max_label_extent.max(perpendicular);
            geometry.max_label_along = geometry.max_label_along.max(along);
            geometry.labels.push(TickLabel { value, text });
        }
        geometry.extent = opts.tick_length.max(0.0) + TICK_LABEL_GAP + geometry.max_label_extent;
    }

    if let Some(title) = &opts.title {
        let metrics = measurer.measure(title, TextStyle::new(opts.title_font_size));
        let thickness = if horizontal {
            metrics.line_height()
        } else {
            // Vertical-margin titles are rotated; height maps to thickness.
            opts.title_font_size
        };
        geometry.title_extent = TITLE_GAP + thickness;
        geometry.title_along = if horizontal {
            metrics.advance_width
        } else {
            metrics.line_height()
        };
        geometry.extent += geometry.title_extent;
    }

    geometry
}

fn tick_label_text(state: &AxisState, value: f64, error_hook: Option<&ErrorHook>) -> String {
    let opts = state.options();
    let (data_value, default) = match opts.scale {
        ScaleKind::Log => (10.0_f64.powf(value), format_log_label(value)),
        ScaleKind::Linear => (value, format_sig(value, DEFAULT_SIG_DIGITS)),
    };
    let Some(formatter) = &opts.formatter else {
        return default;
    };
    match formatter(data_value, &default) {
        Some(text) => text,
        None => {
            if let Some(hook) = error_hook {
                hook("tick label formatter failed; keeping default label");
            }
            default
        }
    }
}

/// Renderer-facing axis geometry: owned segment and label lists.
///
/// Rebuilt wholesale by [`map_axis`]; holders must not keep it across a
/// rescale or relayout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisSegments {
    /// The axis baseline, if the axis is drawn.
    pub baseline: Option<Line>,
    /// Major tick marks.
    pub major: Vec<Line>,
    /// Minor tick marks.
    pub minor: Vec<Line>,
    /// Label anchor points with their text.
    pub labels: Vec<(Point, String)>,
    /// Title anchor point and text, if a title is set.
    pub title: Option<(Point, String)>,
}

/// Materializes the segments and label anchors for one mapped axis.
///
/// `title_spills` places the title past the end of the axis line (used when
/// several axes share the margin and the title moves to the adjoining
/// margin); otherwise the title is centered outward of the label block.
pub fn map_axis(
    state: &AxisState,
    side: MarginSide,
    plot: Rect,
    offsets: &AxisOffsets,
    geometry: &AxisGeometry,
    title_spills: bool,
) -> AxisSegments {
    let opts = state.options();
    let spec = state.map_spec();
    let range = state.axis_range();
    let horizontal = side.is_horizontal();
    let sign = match side {
        MarginSide::Bottom | MarginSide::Right => 1.0,
        MarginSide::Top | MarginSide::Left => -1.0,
    };
    let position = |v: f64| -> f64 {
        let t = spec.fraction(v);
        if horizontal {
            plot.x0 + t * plot.width()
        } else {
            plot.y1 - t * plot.height()
        }
    };
    let tick_line = |at: f64, end: f64| -> Line {
        if horizontal {
            Line::new((at, offsets.axis_line), (at, end))
        } else {
            Line::new((offsets.axis_line, at), (end, at))
        }
    };

    let mut out = AxisSegments {
        baseline: Some(if horizontal {
            Line::new((plot.x0, offsets.axis_line), (plot.x1, offsets.axis_line))
        } else {
            Line::new((offsets.axis_line, plot.y0), (offsets.axis_line, plot.y1))
        }),
        ..Default::default()
    };

    if opts.show_ticks {
        let step = state.major_sweep().step();
        for &value in &state.major_ticks().values {
            if range.contains(value) {
                out.major.push(tick_line(position(value), offsets.major_tick));
            }
            // Minor positions are fractions of the major interval, measured
            // from this major tick; out-of-range bases can still contribute
            // in-range minors on a tight axis.
            for &rel in &state.minor_ticks().values {
                let v = value + rel * step;
                if range.contains(v) {
                    out.minor.push(tick_line(position(v), offsets.minor_tick));
                }
            }
        }
        for label in &geometry.labels {
            let at = position(label.value);
            let anchor = if horizontal {
                Point::new(at, offsets.label)
            } else {
                Point::new(offsets.label, at)
            };
            out.labels.push((anchor, label.text.clone()));
        }
    }

    if let Some(title) = &opts.title {
        let point = if title_spills {
            if horizontal {
                Point::new(plot.x1 + TITLE_GAP, offsets.axis_line)
            } else {
                Point::new(offsets.axis_line, plot.y0 - TITLE_GAP)
            }
        } else {
            let perpendicular = offsets.label
                + sign * (geometry.max_label_extent + TITLE_GAP + 0.5 * opts.title_font_size);
            if horizontal {
                Point::new(0.5 * (plot.x0 + plot.x1), perpendicular)
            } else {
                Point::new(perpendicular, 0.5 * (plot.y0 + plot.y1))
            }
        };
        out.title = Some((point, title.clone()));
    }

    out
}
