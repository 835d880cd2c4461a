// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis entities.
//!
//! An [`AxisState`] carries everything an axis knows independent of where it
//! is drawn: scale kind, requested bounds and policies, tracked data extents,
//! and the derived range/sweeps/ticks of the last rescale. Pixel geometry is
//! attached only once the axis is mapped to a margin (see
//! [`crate::geometry`]), so unmapped "virtual" axes stay cheap and can still
//! answer coordinate queries.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use grafir_core::{
    AxisRange, LooseMode, MAX_TICKS, MapSpec, RangeInputs, ScaleRequest, TickError, TickSweep,
    Ticks, fix_axis_range, generate_ticks, linear_scale, log_scale,
};

use crate::geometry::AxisGeometry;

/// Which way an axis scales its data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Plain linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    Log,
}

/// Orientation class of an axis.
///
/// X-class axes map to the horizontal screen dimension and Y-class axes to
/// the vertical one, unless the owning graph is inverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisClass {
    /// Horizontal data dimension.
    X,
    /// Vertical data dimension.
    Y,
}

/// A tick label formatter callback.
///
/// Receives the tick's data-space value and the default numeric label.
/// Returning `None` signals a formatting failure; the default label is kept
/// and the failure is reported through the graph's error hook.
pub type TickFormatter = Arc<dyn Fn(f64, &str) -> Option<String>>;

/// A background-error reporting hook for recovered failures.
pub type ErrorHook = Arc<dyn Fn(&str)>;

/// Errors reported by axis configuration.
///
/// A rejected option is reset to its auto-scale default before the error is
/// returned, so the axis always stays renderable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The requested min is not below the requested max.
    EmptyRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// A non-positive bound was requested on a log-scale axis.
    NonPositiveLogBound {
        /// The offending bound value.
        value: f64,
    },
    /// An axis was mapped to a margin of the wrong orientation class.
    ClassMismatch,
    /// The axis handle does not name a live axis.
    UnknownAxis,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyRange { min, max } => {
                write!(f, "requested axis bounds are empty: min {min} >= max {max}")
            }
            Self::NonPositiveLogBound { value } => {
                write!(f, "log-scale axis bound must be positive, got {value}")
            }
            Self::ClassMismatch => write!(f, "axis class does not fit the target margin"),
            Self::UnknownAxis => write!(f, "no such axis"),
        }
    }
}

/// User-configurable axis options.
#[derive(Clone)]
pub struct AxisOptions {
    /// Linear or logarithmic scaling.
    pub scale: ScaleKind,
    /// Explicitly requested lower bound; `None` auto-scales.
    pub min: Option<f64>,
    /// Explicitly requested upper bound; `None` auto-scales.
    pub max: Option<f64>,
    /// Explicitly requested major tick step.
    pub step: Option<f64>,
    /// Requested minor subdivisions per major interval.
    pub subdivisions: Option<u32>,
    /// Looseness policy for the lower bound.
    pub loose_min: LooseMode,
    /// Looseness policy for the upper bound.
    pub loose_max: LooseMode,
    /// Reverse the data-to-screen direction.
    pub descending: bool,
    /// Hide the axis from layout and drawing (mapping still works).
    pub hidden: bool,
    /// Whether tick marks (and labels) are drawn at all.
    pub show_ticks: bool,
    /// Major tick length in pixels; negative points the ticks into the plot.
    pub tick_length: f64,
    /// Tick label rotation angle in degrees.
    pub label_angle: f64,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Optional axis title.
    pub title: Option<String>,
    /// Font size for the axis title.
    pub title_font_size: f64,
    /// Auto-scroll window width; `0.0` disables windowed ranging.
    pub window_size: f64,
    /// Granularity the window edge snaps to while sliding.
    pub shift_by: f64,
    /// Lower bound the view may scroll to; `None` falls back to the data.
    pub scroll_min: Option<f64>,
    /// Upper bound the view may scroll to; `None` falls back to the data.
    pub scroll_max: Option<f64>,
    /// Optional tick label formatter callback.
    pub formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisOptions")
            .field("scale", &self.scale)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("subdivisions", &self.subdivisions)
            .field("loose_min", &self.loose_min)
            .field("loose_max", &self.loose_max)
            .field("descending", &self.descending)
            .field("hidden", &self.hidden)
            .field("show_ticks", &self.show_ticks)
            .field("tick_length", &self.tick_length)
            .field("label_angle", &self.label_angle)
            .field("label_font_size", &self.label_font_size)
            .field("title", &self.title)
            .field("title_font_size", &self.title_font_size)
            .field("window_size", &self.window_size)
            .field("shift_by", &self.shift_by)
            .field("scroll_min", &self.scroll_min)
            .field("scroll_max", &self.scroll_max)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            scale: ScaleKind::Linear,
            min: None,
            max: None,
            step: None,
            subdivisions: None,
            loose_min: LooseMode::Tight,
            loose_max: LooseMode::Tight,
            descending: false,
            hidden: false,
            show_ticks: true,
            tick_length: 8.0,
            label_angle: 0.0,
            label_font_size: 10.0,
            title: None,
            title_font_size: 11.0,
            window_size: 0.0,
            shift_by: 0.0,
            scroll_min: None,
            scroll_max: None,
            formatter: None,
        }
    }
}

impl AxisOptions {
    /// Set the scale kind.
    pub fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }

    /// Request an explicit lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Request an explicit upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Request an explicit major tick step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Request a number of minor subdivisions per major interval.
    pub fn with_subdivisions(mut self, n: u32) -> Self {
        self.subdivisions = Some(n);
        self
    }

    /// Set both looseness policies at once.
    pub fn with_loose(mut self, min: LooseMode, max: LooseMode) -> Self {
        self.loose_min = min;
        self.loose_max = max;
        self
    }

    /// Reverse the mapping direction.
    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Hide or show the axis.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the major tick length (negative for inward ticks).
    pub fn with_tick_length(mut self, length: f64) -> Self {
        self.tick_length = length;
        self
    }

    /// Set the tick label rotation angle in degrees.
    pub fn with_label_angle(mut self, degrees: f64) -> Self {
        self.label_angle = degrees;
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Configure windowed auto-ranging.
    pub fn with_window(mut self, size: f64, shift_by: f64) -> Self {
        self.window_size = size;
        self.shift_by = shift_by;
        self
    }

    /// Bound the scrollable world range.
    pub fn with_scroll_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.scroll_min = min;
        self.scroll_max = max;
        self
    }

    /// Install a tick label formatter callback.
    pub fn with_formatter(mut self, f: impl Fn(f64, &str) -> Option<String> + 'static) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Validates the options in place, resetting anything rejected.
    ///
    /// Returns the first problem found. Offending bounds revert to `None`
    /// (auto-scale), so the options always describe a renderable axis.
    pub(crate) fn sanitize(&mut self) -> Result<(), ConfigError> {
        let mut first_err = None;
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min >= max
        {
            self.min = None;
            self.max = None;
            first_err.get_or_insert(ConfigError::EmptyRange { min, max });
        }
        if self.scale == ScaleKind::Log {
            if let Some(min) = self.min
                && min <= 0.0
            {
                self.min = None;
                first_err.get_or_insert(ConfigError::NonPositiveLogBound { value: min });
            }
            if let Some(max) = self.max
                && max <= 0.0
            {
                self.max = None;
                first_err.get_or_insert(ConfigError::NonPositiveLogBound { value: max });
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// The state of one axis.
#[derive(Debug)]
pub struct AxisState {
    name: String,
    class: AxisClass,
    opts: AxisOptions,
    /// Running (min, max) merged from all data producers this pass.
    value_range: (f64, f64),
    /// Resolved data-unit bounds of the last rescale.
    min: f64,
    max: f64,
    /// Displayed range in display space (log10 units for a log axis).
    range: AxisRange,
    major: TickSweep,
    minor: TickSweep,
    major_ticks: Ticks,
    minor_ticks: Ticks,
    geometry: Option<AxisGeometry>,
    dirty: bool,
    prev_bounds: Option<(f64, f64)>,
}

impl AxisState {
    /// Creates a fresh axis with default options.
    pub fn new(name: impl Into<String>, class: AxisClass) -> Self {
        Self {
            name: name.into(),
            class,
            opts: AxisOptions::default(),
            value_range: (f64::INFINITY, f64::NEG_INFINITY),
            min: 0.0,
            max: 1.0,
            range: AxisRange::default(),
            major: TickSweep::empty(),
            minor: TickSweep::empty(),
            major_ticks: Ticks::default(),
            minor_ticks: Ticks::default(),
            geometry: None,
            dirty: true,
            prev_bounds: None,
        }
    }

    /// The axis name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The axis orientation class.
    pub fn class(&self) -> AxisClass {
        self.class
    }

    /// Current options.
    pub fn options(&self) -> &AxisOptions {
        &self.opts
    }

    /// Applies new options after validation.
    ///
    /// Rejected fields are reset to auto-scale defaults and the first error
    /// is returned; the remaining options are applied either way, and the
    /// axis is marked for rescale.
    pub fn configure(&mut self, mut opts: AxisOptions) -> Result<(), ConfigError> {
        let result = opts.sanitize();
        self.opts = opts;
        self.geometry = None;
        self.dirty = true;
        result
    }

    /// Resets the tracked data extents ahead of an auto-range pass.
    pub fn reset_tracking(&mut self) {
        self.value_range = (f64::INFINITY, f64::NEG_INFINITY);
    }

    /// Widens the tracked extents to cover `[lo, hi]`. Never shrinks.
    pub fn merge_extent(&mut self, lo: f64, hi: f64) {
        if lo.is_finite() && lo < self.value_range.0 {
            self.value_range.0 = lo;
        }
        if hi.is_finite() && hi > self.value_range.1 {
            self.value_range.1 = hi;
        }
    }

    /// The tracked data extents (`+inf`/`-inf` when nothing merged).
    pub fn tracked_extents(&self) -> (f64, f64) {
        self.value_range
    }

    /// Resolves bounds and regenerates sweeps and tick arrays.
    ///
    /// This is the per-pass entry point: fix the range, clamp it into the
    /// scroll bounds, dispatch to the linear or log resolver, materialize
    /// ticks, and flag the axis dirty if the bounds moved since last pass.
    pub fn rescale(&mut self) -> Result<(), TickError> {
        let (mut min, mut max) = fix_axis_range(&RangeInputs {
            observed_min: self.value_range.0,
            observed_max: self.value_range.1,
            req_min: self.opts.min,
            req_max: self.opts.max,
            log_scale: self.opts.scale == ScaleKind::Log,
            window_size: self.opts.window_size,
            shift_by: self.opts.shift_by,
        });
        if let Some(lo) = self.opts.scroll_min
            && min < lo
        {
            min = lo;
        }
        if let Some(hi) = self.opts.scroll_max
            && max > hi
        {
            max = hi;
        }

        self.min = min;
        self.max = max;

        let req = ScaleRequest {
            min: self.opts.min,
            max: self.opts.max,
            step: self.opts.step,
            subdivisions: self.opts.subdivisions,
            loose_min: self.opts.loose_min,
            loose_max: self.opts.loose_max,
        };
        let resolved = match self.opts.scale {
            ScaleKind::Linear => linear_scale(min, max, &req),
            ScaleKind::Log => log_scale(min, max, &req),
        };
        self.range = resolved.range;
        self.major = resolved.major.clamped(MAX_TICKS);
        self.minor = resolved.minor.clamped(MAX_TICKS);
        self.major_ticks = generate_ticks(self.major)?;
        self.minor_ticks = generate_ticks(self.minor)?;

        if self.prev_bounds != Some((min, max)) {
            self.dirty = true;
            self.prev_bounds = Some((min, max));
        }
        Ok(())
    }

    /// Displayed bounds in data units, de-logged for a log axis.
    pub fn limits(&self) -> (f64, f64) {
        if self.opts.scale == ScaleKind::Log {
            (
                10.0_f64.powf(self.range.min()),
                10.0_f64.powf(self.range.max()),
            )
        } else {
            (self.range.min(), self.range.max())
        }
    }

    /// The displayed range in display space.
    pub fn axis_range(&self) -> &AxisRange {
        &self.range
    }

    /// Resolved data-unit bounds of the last rescale.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// The major tick sweep of the last rescale.
    pub fn major_sweep(&self) -> TickSweep {
        self.major
    }

    /// The minor tick sweep of the last rescale.
    pub fn minor_sweep(&self) -> TickSweep {
        self.minor
    }

    /// Materialized major tick values (display space), including ticks that
    /// fall outside a tight displayed range.
    pub fn major_ticks(&self) -> &Ticks {
        &self.major_ticks
    }

    /// Materialized minor tick positions, relative to one major interval.
    pub fn minor_ticks(&self) -> &Ticks {
        &self.minor_ticks
    }

    /// Mapper inputs for this axis.
    pub fn map_spec(&self) -> MapSpec {
        MapSpec {
            range: self.range,
            log_scale: self.opts.scale == ScaleKind::Log,
            descending: self.opts.descending,
        }
    }

    /// Pixel geometry from the last layout pass, if the axis is mapped.
    pub fn geometry(&self) -> Option<&AxisGeometry> {
        self.geometry.as_ref()
    }

    pub(crate) fn set_geometry(&mut self, geometry: Option<AxisGeometry>) {
        self.geometry = geometry;
    }

    /// Whether the bounds changed since the previous pass.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn options_mut(&mut self) -> &mut AxisOptions {
        self.dirty = true;
        &mut self.opts
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn configure_rejects_empty_range_but_keeps_the_axis_valid() {
        let mut axis = AxisState::new("x", AxisClass::X);
        let err = axis
            .configure(AxisOptions::default().with_min(5.0).with_max(2.0))
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRange { min: 5.0, max: 2.0 });
        // Both bounds reverted to auto-scale.
        assert_eq!(axis.options().min, None);
        assert_eq!(axis.options().max, None);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        assert!(min < max);
    }

    #[test]
    fn configure_rejects_non_positive_log_bound() {
        let mut axis = AxisState::new("y", AxisClass::Y);
        let err = axis
            .configure(
                AxisOptions::default()
                    .with_scale(ScaleKind::Log)
                    .with_min(-1.0)
                    .with_max(100.0),
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveLogBound { value: -1.0 });
        assert_eq!(axis.options().min, None);
        // The valid max survives.
        assert_eq!(axis.options().max, Some(100.0));
    }

    #[test]
    fn merge_extent_only_widens() {
        let mut axis = AxisState::new("x", AxisClass::X);
        axis.reset_tracking();
        axis.merge_extent(3.0, 47.0);
        axis.merge_extent(10.0, 20.0);
        assert_eq!(axis.tracked_extents(), (3.0, 47.0));
        axis.merge_extent(-1.0, 50.0);
        assert_eq!(axis.tracked_extents(), (-1.0, 50.0));
        axis.merge_extent(f64::NAN, f64::NAN);
        assert_eq!(axis.tracked_extents(), (-1.0, 50.0));
    }

    #[test]
    fn rescale_marks_dirty_only_when_bounds_move() {
        let mut axis = AxisState::new("x", AxisClass::X);
        axis.reset_tracking();
        axis.merge_extent(3.0, 47.0);
        axis.rescale().unwrap();
        assert!(axis.take_dirty());

        // Same extents, same bounds: no new dirty flag.
        axis.reset_tracking();
        axis.merge_extent(3.0, 47.0);
        axis.rescale().unwrap();
        assert!(!axis.is_dirty());

        axis.reset_tracking();
        axis.merge_extent(3.0, 60.0);
        axis.rescale().unwrap();
        assert!(axis.take_dirty());
    }

    #[test]
    fn log_limits_come_back_de_logged() {
        let mut axis = AxisState::new("y", AxisClass::Y);
        axis.configure(
            AxisOptions::default()
                .with_scale(ScaleKind::Log)
                .with_loose(LooseMode::Loose, LooseMode::Loose),
        )
        .unwrap();
        axis.reset_tracking();
        axis.merge_extent(5.0, 5000.0);
        axis.rescale().unwrap();
        let (min, max) = axis.limits();
        assert!((min - 1.0).abs() < 1e-9);
        assert!((max - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn scroll_bounds_clamp_the_resolved_range() {
        let mut axis = AxisState::new("x", AxisClass::X);
        axis.configure(AxisOptions::default().with_scroll_limits(Some(0.0), Some(40.0)))
            .unwrap();
        axis.reset_tracking();
        axis.merge_extent(-10.0, 100.0);
        axis.rescale().unwrap();
        let (min, max) = axis.bounds();
        assert_eq!(min, 0.0);
        assert_eq!(max, 40.0);
    }
}
