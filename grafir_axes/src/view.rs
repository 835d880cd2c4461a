// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-view operations.
//!
//! An axis window can be driven by a scrollbar using the classic protocol:
//! query the visible span as a pair of world fractions, then `moveto` a
//! fraction or `scroll` by units/pages. The world range is the configured
//! scroll bounds when set, falling back to the observed data extents. All
//! fraction math happens in display space, so log axes scroll by decades.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{AxisState, ScaleKind};

/// The visible fraction of the scrollable world, `0.0 <= first < last <= 1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisView {
    /// Fraction of the world left/below the view.
    pub first: f64,
    /// `first` plus the visible fraction.
    pub last: f64,
}

/// Scroll step granularity, matching the scrollbar protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollUnits {
    /// Fine steps: one tenth of the visible window.
    Units,
    /// Coarse steps: 90% of the visible window.
    Pages,
}

fn to_log(x: f64) -> f64 {
    if x > 0.0 { x.log10() } else { 0.0 }
}

/// World and view intervals in display space: `(wmin, wmax, vmin, vmax)`.
fn world_and_view(state: &AxisState) -> Option<(f64, f64, f64, f64)> {
    let opts = state.options();
    let (tmin, tmax) = state.tracked_extents();
    let (bmin, bmax) = state.bounds();
    let mut wmin = if tmin.is_finite() { tmin } else { bmin };
    let mut wmax = if tmax.is_finite() { tmax } else { bmax };
    if let Some(s) = opts.scroll_min {
        wmin = s;
    }
    if let Some(s) = opts.scroll_max {
        wmax = s;
    }
    let mut vmin = bmin.max(wmin);
    let mut vmax = bmax.min(wmax);
    if opts.scale == ScaleKind::Log {
        wmin = to_log(wmin);
        wmax = to_log(wmax);
        vmin = to_log(vmin);
        vmax = to_log(vmax);
    }
    if wmax - wmin <= 0.0 || vmax - vmin <= 0.0 {
        return None;
    }
    Some((wmin, wmax, vmin, vmax))
}

/// Returns the visible window as world fractions.
///
/// A descending axis reports fractions from the world maximum, matching the
/// on-screen direction of travel.
pub fn view_fractions(state: &AxisState) -> AxisView {
    let Some((wmin, wmax, vmin, vmax)) = world_and_view(state) else {
        return AxisView {
            first: 0.0,
            last: 1.0,
        };
    };
    let ww = wmax - wmin;
    let vw = vmax - vmin;
    let first = if state.options().descending {
        (wmax - vmax) / ww
    } else {
        (vmin - wmin) / ww
    };
    let first = first.clamp(0.0, 1.0);
    AxisView {
        first,
        last: (first + vw / ww).clamp(first, 1.0),
    }
}

/// Slides the view so `fraction` of the world lies before it.
///
/// The window width is preserved; the target is clamped so the view stays
/// inside the world. The new bounds are applied as explicit min/max
/// overrides, taking effect on the next auto-range pass.
pub fn view_moveto(state: &mut AxisState, fraction: f64) {
    let Some((wmin, wmax, vmin, vmax)) = world_and_view(state) else {
        return;
    };
    let ww = wmax - wmin;
    let vw = vmax - vmin;
    let f = fraction.clamp(0.0, (1.0 - vw / ww).max(0.0));
    let (mut nmin, mut nmax) = if state.options().descending {
        let high = wmax - f * ww;
        (high - vw, high)
    } else {
        let low = wmin + f * ww;
        (low, low + vw)
    };
    if state.options().scale == ScaleKind::Log {
        nmin = 10.0_f64.powf(nmin);
        nmax = 10.0_f64.powf(nmax);
    }
    let opts = state.options_mut();
    opts.min = Some(nmin);
    opts.max = Some(nmax);
}

/// Steps the view by `count` units or pages.
pub fn view_scroll(state: &mut AxisState, count: i32, units: ScrollUnits) {
    let view = view_fractions(state);
    let span = view.last - view.first;
    let step = match units {
        ScrollUnits::Units => 0.1 * span,
        ScrollUnits::Pages => 0.9 * span,
    };
    view_moveto(state, view.first + f64::from(count) * step);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::axis::{AxisClass, AxisOptions};

    fn windowed_axis(descending: bool) -> AxisState {
        let mut axis = AxisState::new("x", AxisClass::X);
        axis.configure(
            AxisOptions::default()
                .with_scroll_limits(Some(0.0), Some(100.0))
                .with_min(20.0)
                .with_max(40.0)
                .with_descending(descending),
        )
        .unwrap();
        axis.reset_tracking();
        axis.merge_extent(0.0, 100.0);
        axis.rescale().unwrap();
        axis
    }

    #[test]
    fn fractions_report_the_visible_window() {
        let axis = windowed_axis(false);
        let view = view_fractions(&axis);
        assert!((view.first - 0.2).abs() < 1e-9);
        assert!((view.last - 0.4).abs() < 1e-9);
    }

    #[test]
    fn descending_fractions_measure_from_the_far_edge() {
        let axis = windowed_axis(true);
        let view = view_fractions(&axis);
        assert!((view.first - 0.6).abs() < 1e-9);
        assert!((view.last - 0.8).abs() < 1e-9);
    }

    #[test]
    fn moveto_slides_a_constant_width_window() {
        let mut axis = windowed_axis(false);
        view_moveto(&mut axis, 0.5);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        assert!((min - 50.0).abs() < 1e-9);
        assert!((max - 70.0).abs() < 1e-9);

        // Past the end: clamped so the window still fits.
        view_moveto(&mut axis, 2.0);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        assert!((min - 80.0).abs() < 1e-9);
        assert!((max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn pages_scroll_ninety_percent_of_the_window() {
        let mut axis = windowed_axis(false);
        view_scroll(&mut axis, 1, ScrollUnits::Pages);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        // first 0.2 + 0.9 * 0.2 = 0.38.
        assert!((min - 38.0).abs() < 1e-9);
        assert!((max - 58.0).abs() < 1e-9);
    }

    #[test]
    fn units_scroll_a_tenth_of_the_window() {
        let mut axis = windowed_axis(false);
        view_scroll(&mut axis, -2, ScrollUnits::Units);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        // first 0.2 - 2 * 0.02 = 0.16.
        assert!((min - 16.0).abs() < 1e-9);
        assert!((max - 36.0).abs() < 1e-9);
    }

    #[test]
    fn log_axis_scrolls_in_decades() {
        let mut axis = AxisState::new("y", AxisClass::Y);
        axis.configure(
            AxisOptions::default()
                .with_scale(ScaleKind::Log)
                .with_scroll_limits(Some(1.0), Some(10_000.0))
                .with_min(1.0)
                .with_max(100.0),
        )
        .unwrap();
        axis.reset_tracking();
        axis.merge_extent(1.0, 10_000.0);
        axis.rescale().unwrap();

        // World spans 4 decades, the view the first 2.
        let view = view_fractions(&axis);
        assert!((view.first - 0.0).abs() < 1e-9);
        assert!((view.last - 0.5).abs() < 1e-9);

        view_moveto(&mut axis, 0.5);
        let opts = axis.options();
        assert!((opts.min.unwrap() - 100.0).abs() < 1e-6);
        assert!((opts.max.unwrap() - 10_000.0).abs() < 1e-2);
    }
}
