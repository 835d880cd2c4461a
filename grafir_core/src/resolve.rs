// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale resolution: from observed data extents to displayed bounds and sweeps.
//!
//! Two resolvers ([`linear_scale`], [`log_scale`]) turn a fixed `[min, max]`
//! interval plus user overrides into the axis's displayed range and its
//! major/minor [`TickSweep`]s. Upstream of them, [`fix_axis_range`] resolves
//! raw tracked extents and overrides into that fixed interval; its ordered
//! precedence (observed data, single-side defaults, explicit overrides,
//! consistency repair, windowing) is what makes auto-scaling behave.

extern crate alloc;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::range::AxisRange;
use crate::tick::{TickSweep, nice_num};

/// Default target number of major tick intervals on an auto-scaled axis.
pub const DEFAULT_TICK_TARGET: f64 = 4.0;

/// How a displayed axis bound tracks the data on one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LooseMode {
    /// Snap the bound exactly to the observed data extent.
    #[default]
    Tight,
    /// Use the outer nice tick, unless this bound was explicitly requested.
    Loose,
    /// Always use the outer nice tick, even over an explicit request.
    AlwaysLoose,
}

impl LooseMode {
    /// Whether the displayed bound pins to the data value rather than the
    /// outer nice tick.
    fn pins_to_data(self, requested: Option<f64>) -> bool {
        match self {
            Self::Tight => true,
            Self::Loose => requested.is_some(),
            Self::AlwaysLoose => false,
        }
    }
}

/// User overrides consulted during scale resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleRequest {
    /// Explicitly requested lower bound.
    pub min: Option<f64>,
    /// Explicitly requested upper bound.
    pub max: Option<f64>,
    /// Explicitly requested major tick step.
    pub step: Option<f64>,
    /// Requested number of minor subdivisions per major interval.
    pub subdivisions: Option<u32>,
    /// Looseness policy for the lower bound.
    pub loose_min: LooseMode,
    /// Looseness policy for the upper bound.
    pub loose_max: LooseMode,
}

/// A resolved axis scale: displayed range plus major and minor sweeps.
///
/// `range` is in display space — data units for a linear axis, `log10` units
/// for a log axis. Major sweep values live in the same space; minor sweep
/// values are fractions of one major interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedScale {
    /// Displayed bounds.
    pub range: AxisRange,
    /// Major tick progression.
    pub major: TickSweep,
    /// Minor tick progression, relative to one major interval.
    pub minor: TickSweep,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "rounded, non-negative by construction, and saturating; oversized counts are rejected downstream"
)]
fn sweep_len(tick_min: f64, tick_max: f64, step: f64) -> usize {
    (((tick_max - tick_min) / step).round() as usize).saturating_add(1)
}

/// Resolves a linear axis over the fixed interval `[min, max]`.
///
/// The major step comes from the requested step (halved until at least two
/// major intervals fit) or from nice-numbering the range; the outer tick
/// bounds are the step multiples enclosing the data. Each side of the
/// displayed range then snaps either to the data extent or to the outer tick
/// according to its looseness policy.
pub fn linear_scale(min: f64, max: f64, req: &ScaleRequest) -> ResolvedScale {
    let mut step = 0.0;
    let mut tick_min = 0.0;
    let mut tick_max = 0.0;
    let mut n_major = 0;
    if min < max {
        let range = max - min;
        step = match req.step {
            Some(s) if s > 0.0 => {
                let mut s = s;
                while 2.0 * s >= range {
                    s *= 0.5;
                }
                s
            }
            _ => nice_num(nice_num(range, false) / DEFAULT_TICK_TARGET, true),
        };
        // The `+ 0.0` collapses a signed-zero bound into plain zero.
        tick_min = (min / step).floor() * step + 0.0;
        tick_max = (max / step).ceil() * step + 0.0;
        n_major = sweep_len(tick_min, tick_max, step);
    }

    let axis_min = if req.loose_min.pins_to_data(req.min) {
        min
    } else {
        tick_min
    };
    let axis_max = if req.loose_max.pins_to_data(req.max) {
        max
    } else {
        tick_max
    };

    let minor = match req.subdivisions {
        // A user-chosen major step keeps its intervals unsubdivided.
        Some(n) if n > 0 && req.step.is_none() => {
            let s = 1.0 / f64::from(n);
            TickSweep::Arithmetic {
                first: s,
                step: s,
                count: (n - 1) as usize,
            }
        }
        _ => TickSweep::empty(),
    };

    ResolvedScale {
        range: AxisRange::new(axis_min, axis_max),
        major: TickSweep::Arithmetic {
            first: tick_min,
            step,
            count: n_major,
        },
        minor,
    }
}

/// Resolves a log axis over the fixed interval `[min, max]`.
///
/// Bounds convert to `log10(|x|)` with exactly `0.0` mapping to the decade
/// origin (`min` side) or to one decade (`max` side). Up to ten decades the
/// axis gets one major tick per decade with the 1–9 log table as minor ticks;
/// beyond that, per-decade ticks are meaningless and the log-space range is
/// resolved like a linear axis instead.
pub fn log_scale(min: f64, max: f64, req: &ScaleRequest) -> ResolvedScale {
    let lmin = if min == 0.0 { 0.0 } else { min.abs().log10() };
    let lmax = if max == 0.0 { 1.0 } else { max.abs().log10() };

    let mut tick_min = lmin.floor();
    let mut tick_max = lmax.ceil();
    let decades = tick_max - tick_min;

    let major_step;
    let n_major;
    let minor;
    if decades > 10.0 {
        let nice_range = nice_num(decades, false);
        major_step = nice_num(nice_range / DEFAULT_TICK_TARGET, true);
        tick_min = (lmin / major_step).floor() * major_step;
        tick_max = (lmax / major_step).ceil() * major_step;
        n_major = sweep_len(tick_min, tick_max, major_step);
        let minor_step = 10.0_f64.powf(major_step.log10().floor());
        minor = if minor_step == major_step {
            // One decade per interval subdivision would be zero-width.
            TickSweep::Arithmetic {
                first: 0.2,
                step: 0.2,
                count: 4,
            }
        } else {
            let rel = minor_step / major_step;
            TickSweep::Arithmetic {
                first: rel,
                step: rel,
                count: sweep_len(0.0, major_step, minor_step).saturating_sub(2),
            }
        };
    } else {
        if tick_min == tick_max {
            tick_max += 1.0;
        }
        major_step = 1.0;
        n_major = sweep_len(tick_min, tick_max, major_step);
        minor = TickSweep::LogMinor { count: 10 };
    }

    let axis_min = if req.loose_min.pins_to_data(req.min) {
        lmin
    } else {
        tick_min
    };
    let axis_max = if req.loose_max.pins_to_data(req.max) {
        lmax
    } else {
        tick_max
    };

    ResolvedScale {
        range: AxisRange::new(axis_min, axis_max),
        major: TickSweep::Arithmetic {
            first: tick_min,
            step: major_step,
            count: n_major,
        },
        minor,
    }
}

/// Inputs to [`fix_axis_range`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeInputs {
    /// Smallest observed data value; `+inf` when nothing was observed.
    pub observed_min: f64,
    /// Largest observed data value; `-inf` when nothing was observed.
    pub observed_max: f64,
    /// Explicitly requested lower bound.
    pub req_min: Option<f64>,
    /// Explicitly requested upper bound.
    pub req_max: Option<f64>,
    /// Whether the axis is log-scaled (changes the no-data default minimum).
    pub log_scale: bool,
    /// Auto-scroll window width; `0.0` disables windowed ranging.
    pub window_size: f64,
    /// Granularity the window's upper edge snaps to while sliding.
    pub shift_by: f64,
}

impl Default for RangeInputs {
    fn default() -> Self {
        Self {
            observed_min: f64::INFINITY,
            observed_max: f64::NEG_INFINITY,
            req_min: None,
            req_max: None,
            log_scale: false,
            window_size: 0.0,
            shift_by: 0.0,
        }
    }
}

fn band_about(v: f64) -> (f64, f64) {
    if v == 0.0 {
        (-0.1, 0.1)
    } else {
        let pad = v.abs() * 0.1;
        (v - pad, v + pad)
    }
}

fn pad10(v: f64) -> f64 {
    if v == 0.0 { 0.1 } else { v.abs() * 0.1 }
}

/// Resolves final displayed bounds from tracked extents and user overrides.
///
/// Precedence, in order: observed data, per-side defaults when no data was
/// seen, a synthesized band around a degenerate range, explicit overrides,
/// repair of an inconsistent single-sided override, and windowed
/// auto-ranging. The result always satisfies `min < max`; calling again with
/// unchanged inputs returns the identical pair.
pub fn fix_axis_range(inp: &RangeInputs) -> (f64, f64) {
    let mut min = inp.observed_min;
    let mut max = inp.observed_max;

    if min == f64::INFINITY {
        min = inp
            .req_min
            .unwrap_or(if inp.log_scale { 0.001 } else { 0.0 });
    }
    if max == f64::NEG_INFINITY {
        max = inp.req_max.unwrap_or(1.0);
    }
    if min >= max {
        (min, max) = band_about(min);
    }

    if let Some(v) = inp.req_min {
        min = v;
    }
    if let Some(v) = inp.req_max {
        max = v;
    }
    if max < min {
        // One side was requested past the other side's natural value.
        if inp.req_min.is_some() && inp.req_max.is_none() {
            max = min + pad10(min);
        } else if inp.req_max.is_some() && inp.req_min.is_none() {
            min = max - pad10(max);
        }
    }

    if inp.window_size > 0.0 && inp.req_min.is_none() && inp.req_max.is_none() {
        let shift = inp.shift_by.max(0.0);
        if max > min + inp.window_size {
            let edge = if shift > 0.0 {
                (max / shift).ceil() * shift
            } else {
                max
            };
            max = edge;
            min = edge - inp.window_size;
        }
    }

    if min >= max {
        (min, max) = band_about(min);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::tick::generate_ticks;

    #[test]
    fn loose_linear_axis_resolves_to_the_nice_grid() {
        // Observed data 3..47: range 44 nices to 50, 50/4 = 12.5 rounds to a
        // step of 10, outer ticks 0..50.
        let req = ScaleRequest {
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = linear_scale(3.0, 47.0, &req);
        assert_eq!(
            scale.major,
            TickSweep::Arithmetic {
                first: 0.0,
                step: 10.0,
                count: 6
            }
        );
        assert_eq!(scale.range.min(), 0.0);
        assert_eq!(scale.range.max(), 50.0);
        let ticks = generate_ticks(scale.major).unwrap();
        assert_eq!(ticks.values, alloc::vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
    }

    #[test]
    fn tight_linear_axis_keeps_the_grid_but_pins_the_bounds() {
        let req = ScaleRequest::default();
        let scale = linear_scale(3.0, 47.0, &req);
        // Same nice tick grid as the loose fit...
        assert_eq!(
            scale.major,
            TickSweep::Arithmetic {
                first: 0.0,
                step: 10.0,
                count: 6
            }
        );
        // ...but the displayed bounds are exactly the data extent, so the
        // outer ticks fail the membership test and are not rendered.
        assert_eq!(scale.range.min(), 3.0);
        assert_eq!(scale.range.max(), 47.0);
        let ticks = generate_ticks(scale.major).unwrap();
        let shown: alloc::vec::Vec<f64> = ticks
            .values
            .iter()
            .copied()
            .filter(|v| scale.range.contains(*v))
            .collect();
        assert_eq!(shown, alloc::vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn explicit_bound_pins_a_loose_side() {
        let req = ScaleRequest {
            min: Some(3.0),
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = linear_scale(3.0, 47.0, &req);
        assert_eq!(scale.range.min(), 3.0);
        assert_eq!(scale.range.max(), 50.0);

        // ALWAYS_LOOSE overrides even an explicit request.
        let req = ScaleRequest {
            min: Some(3.0),
            loose_min: LooseMode::AlwaysLoose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        assert_eq!(linear_scale(3.0, 47.0, &req).range.min(), 0.0);
    }

    #[test]
    fn requested_step_halves_until_two_intervals_fit() {
        // Range 50 with requested step 100: 100 -> 50 -> 25 -> 12.5, the
        // first value where 2 * step < range.
        let req = ScaleRequest {
            step: Some(100.0),
            ..Default::default()
        };
        let scale = linear_scale(0.0, 50.0, &req);
        assert_eq!(scale.major.step(), 12.5);

        // Termination is exactly `2 * step < range`: a step whose double
        // equals the range is halved once more...
        let req = ScaleRequest {
            step: Some(25.0),
            ..Default::default()
        };
        assert_eq!(linear_scale(0.0, 50.0, &req).major.step(), 12.5);

        // ...while a step already below half the range is kept as-is.
        let req = ScaleRequest {
            step: Some(20.0),
            ..Default::default()
        };
        assert_eq!(linear_scale(0.0, 50.0, &req).major.step(), 20.0);
    }

    #[test]
    fn subdivisions_produce_interior_minor_ticks() {
        let req = ScaleRequest {
            subdivisions: Some(5),
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = linear_scale(0.0, 50.0, &req);
        assert_eq!(
            scale.minor,
            TickSweep::Arithmetic {
                first: 0.2,
                step: 0.2,
                count: 4
            }
        );

        // A requested major step disables subdivision.
        let req = ScaleRequest {
            step: Some(10.0),
            subdivisions: Some(5),
            ..Default::default()
        };
        assert_eq!(linear_scale(0.0, 50.0, &req).minor.count(), 0);
    }

    #[test]
    fn log_axis_within_ten_decades_ticks_every_decade() {
        // Observed 5..5000: floor(log10 5) = 0, ceil(log10 5000) = 4.
        let req = ScaleRequest {
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = log_scale(5.0, 5000.0, &req);
        assert_eq!(
            scale.major,
            TickSweep::Arithmetic {
                first: 0.0,
                step: 1.0,
                count: 5
            }
        );
        assert_eq!(scale.minor, TickSweep::LogMinor { count: 10 });
        assert_eq!(scale.range.min(), 0.0);
        assert_eq!(scale.range.max(), 4.0);
    }

    #[test]
    fn log_axis_beyond_ten_decades_falls_back_to_linear_steps() {
        let req = ScaleRequest {
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = log_scale(1.0, 1e24, &req);
        let TickSweep::Arithmetic { step, .. } = scale.major else {
            panic!("expected an arithmetic major sweep");
        };
        // 24 decades nice to 50, /4 = 12.5 rounds to 10 decades per major tick.
        assert_eq!(step, 10.0);
        // minor = 10^floor(log10(10)) equals the major step, forcing the
        // 4-tick 0.2-spacing fallback.
        assert_eq!(
            scale.minor,
            TickSweep::Arithmetic {
                first: 0.2,
                step: 0.2,
                count: 4
            }
        );
    }

    #[test]
    fn log_axis_fallback_minor_is_a_fraction_of_the_major_interval() {
        let req = ScaleRequest {
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        // 14 decades nice to 20, /4 = 5 → major step 5 decades; the minor
        // decade grid lands at 1/5 intervals with 4 interior ticks.
        let scale = log_scale(1.0, 1e14, &req);
        assert_eq!(scale.major.step(), 5.0);
        assert_eq!(
            scale.minor,
            TickSweep::Arithmetic {
                first: 0.2,
                step: 0.2,
                count: 4
            }
        );
    }

    #[test]
    fn log_axis_treats_zero_bounds_specially() {
        let req = ScaleRequest {
            loose_min: LooseMode::Loose,
            loose_max: LooseMode::Loose,
            ..Default::default()
        };
        let scale = log_scale(0.0, 100.0, &req);
        // min of exactly zero enters log space as 0.0, not -inf.
        assert_eq!(scale.range.min(), 0.0);
        assert_eq!(scale.range.max(), 2.0);
    }

    #[test]
    fn no_observed_data_falls_back_to_defaults() {
        let (min, max) = fix_axis_range(&RangeInputs::default());
        assert_eq!((min, max), (0.0, 1.0));

        let (min, max) = fix_axis_range(&RangeInputs {
            log_scale: true,
            ..Default::default()
        });
        assert_eq!((min, max), (0.001, 1.0));
    }

    #[test]
    fn degenerate_data_synthesizes_a_band() {
        let inp = RangeInputs {
            observed_min: 40.0,
            observed_max: 40.0,
            ..Default::default()
        };
        let (min, max) = fix_axis_range(&inp);
        assert!((min - 36.0).abs() < 1e-12);
        assert!((max - 44.0).abs() < 1e-12);

        let inp = RangeInputs {
            observed_min: 0.0,
            observed_max: 0.0,
            ..Default::default()
        };
        assert_eq!(fix_axis_range(&inp), (-0.1, 0.1));
    }

    #[test]
    fn one_sided_override_past_the_data_is_repaired() {
        let inp = RangeInputs {
            observed_min: 0.0,
            observed_max: 10.0,
            req_min: Some(20.0),
            ..Default::default()
        };
        let (min, max) = fix_axis_range(&inp);
        assert_eq!(min, 20.0);
        assert!(max > min);
        assert!((max - 22.0).abs() < 1e-12);
    }

    #[test]
    fn window_slides_to_the_shift_boundary() {
        // Natural max 23 crosses min + window (0 + 10): the window's edge
        // snaps to the next multiple of 5 above 23.
        let inp = RangeInputs {
            observed_min: 0.0,
            observed_max: 23.0,
            window_size: 10.0,
            shift_by: 5.0,
            ..Default::default()
        };
        assert_eq!(fix_axis_range(&inp), (15.0, 25.0));

        // Without a shift granularity the edge is the natural max itself.
        let inp = RangeInputs {
            shift_by: 0.0,
            ..inp
        };
        assert_eq!(fix_axis_range(&inp), (13.0, 23.0));
    }

    #[test]
    fn explicit_bounds_disable_windowing() {
        let inp = RangeInputs {
            observed_min: 0.0,
            observed_max: 23.0,
            req_min: Some(0.0),
            window_size: 10.0,
            shift_by: 5.0,
            ..Default::default()
        };
        assert_eq!(fix_axis_range(&inp), (0.0, 23.0));
    }

    #[test]
    fn fix_axis_range_is_idempotent() {
        let inp = RangeInputs {
            observed_min: 3.0,
            observed_max: 47.0,
            req_max: Some(50.0),
            window_size: 10.0,
            shift_by: 5.0,
            ..Default::default()
        };
        let first = fix_axis_range(&inp);
        let second = fix_axis_range(&inp);
        assert_eq!(first, second);
    }
}
