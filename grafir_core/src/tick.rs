// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nice-number selection and tick materialization.
//!
//! `nice_num` is Heckbert's "nice numbers" routine: it maps an arbitrary
//! positive value to 1, 2, 5, or 10 times a power of ten. Scale resolution
//! uses it to pick major tick steps; the resulting [`TickSweep`] is then
//! materialized into a concrete [`Ticks`] array once per rescale.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Hard cap on the number of values a single sweep may materialize.
///
/// A computed step that would produce more ticks than this is a degenerate
/// configuration, not a rendering request.
pub const MAX_TICKS: usize = 10_001;

/// Errors from tick materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// The sweep asks for more values than [`MAX_TICKS`].
    TooManyTicks {
        /// The number of values the sweep asked for.
        requested: usize,
    },
    /// The sweep step is non-finite or non-positive.
    BadStep,
}

impl core::fmt::Display for TickError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyTicks { requested } => {
                write!(f, "tick sweep asks for {requested} values (cap is {MAX_TICKS})")
            }
            Self::BadStep => write!(f, "tick sweep step is non-finite or non-positive"),
        }
    }
}

/// Description of a tick progression before it is materialized.
///
/// Minor sweeps are expressed in *fractions of one major interval*: an
/// arithmetic minor sweep with `step = 0.25` places minor ticks at 1/4, 2/4,
/// 3/4 of the span between adjacent major ticks, and [`TickSweep::LogMinor`]
/// places them at `log10(1), log10(2), .., log10(count)` within one decade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickSweep {
    /// Evenly spaced values starting at `first`.
    Arithmetic {
        /// First value of the progression.
        first: f64,
        /// Spacing between consecutive values.
        step: f64,
        /// Number of values to produce.
        count: usize,
    },
    /// Minor-tick positions inside one log decade.
    ///
    /// Materializes to `log10(1..=count)`; with `count = 10` this is the
    /// classic `1 2 3 4 5 6 7 8 9 (10)` subdivision of a decade.
    LogMinor {
        /// Number of table entries to produce (at most 10).
        count: usize,
    },
}

impl TickSweep {
    /// An empty arithmetic sweep.
    ///
    /// The 0.5 step is the historical default for "no minor ticks"; it keeps
    /// downstream arithmetic well-defined without producing any values.
    pub const fn empty() -> Self {
        Self::Arithmetic {
            first: 0.5,
            step: 0.5,
            count: 0,
        }
    }

    /// Returns the number of values this sweep will produce.
    pub const fn count(&self) -> usize {
        match *self {
            Self::Arithmetic { count, .. } => count,
            Self::LogMinor { count } => {
                if count < 10 { count } else { 10 }
            }
        }
    }

    /// Returns the arithmetic step, or `0.0` for a log-minor sweep.
    pub const fn step(&self) -> f64 {
        match *self {
            Self::Arithmetic { step, .. } => step,
            Self::LogMinor { .. } => 0.0,
        }
    }

    /// Returns a copy with the value count clamped to `cap`.
    pub const fn clamped(self, cap: usize) -> Self {
        match self {
            Self::Arithmetic { first, step, count } => Self::Arithmetic {
                first,
                step,
                count: if count < cap { count } else { cap },
            },
            Self::LogMinor { count } => Self::LogMinor {
                count: if count < cap { count } else { cap },
            },
        }
    }
}

/// Materialized tick values.
///
/// Owned by the axis that produced them and rebuilt wholesale on every
/// rescale; callers must not hold on to slices across a rescale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ticks {
    /// Tick positions, ascending.
    pub values: Vec<f64>,
}

impl Ticks {
    /// Returns the number of ticks.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no ticks.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returns a "nice" number (1, 2, 5, or 10 times a power of ten) close to `x`.
///
/// With `round` set, picks the nearest nice mantissa using the breakpoints
/// 1.5, 3, and 7; otherwise rounds up (ceiling mode) with breakpoints 1, 2,
/// and 5. `x` must be positive; non-positive or non-finite input yields `0.0`.
pub fn nice_num(x: f64, round: bool) -> f64 {
    if !x.is_finite() || x <= 0.0 {
        return 0.0;
    }
    let expt = x.log10().floor();
    let frac = x / 10.0_f64.powf(expt);
    let nice = if round {
        if frac < 1.5 {
            1.0
        } else if frac < 3.0 {
            2.0
        } else if frac < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10.0_f64.powf(expt)
}

/// Rounds `value` onto the grid spanned by `step`.
pub(crate) fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Materializes a sweep into concrete tick values.
///
/// Arithmetic sweeps re-round every emitted value onto the step grid so that
/// accumulated floating error cannot drift the sequence off its multiples.
/// Callers are expected to clamp the sweep to [`MAX_TICKS`] (see
/// [`TickSweep::clamped`]); a sweep past the cap, or one with a broken step,
/// fails loudly instead of allocating unbounded memory.
pub fn generate_ticks(sweep: TickSweep) -> Result<Ticks, TickError> {
    match sweep {
        TickSweep::Arithmetic { first, step, count } => {
            if count > MAX_TICKS {
                return Err(TickError::TooManyTicks { requested: count });
            }
            if count > 0 && (!step.is_finite() || step <= 0.0) {
                return Err(TickError::BadStep);
            }
            let mut values = Vec::with_capacity(count);
            let mut value = first;
            for _ in 0..count {
                value = round_to_step(value, step);
                values.push(value);
                value += step;
            }
            Ok(Ticks { values })
        }
        TickSweep::LogMinor { count } => {
            let count = count.min(10);
            let values = (1..=count).map(|i| (i as f64).log10()).collect();
            Ok(Ticks { values })
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn is_nice_form(r: f64) -> bool {
        let expt = r.log10().floor();
        let frac = r / 10.0_f64.powf(expt);
        [1.0, 2.0, 5.0, 10.0]
            .iter()
            .any(|m| (frac - m).abs() < 1e-9)
    }

    #[test]
    fn nice_num_ceiling_never_undershoots() {
        for &x in &[0.003, 0.12, 0.7, 1.0, 1.1, 2.0, 3.3, 44.0, 47.0, 620.0, 9999.0] {
            let r = nice_num(x, false);
            assert!(r >= x - 1e-12 * x, "nice_num({x}) = {r} undershoots");
            assert!(is_nice_form(r), "nice_num({x}) = {r} is not 1/2/5/10 form");
        }
    }

    #[test]
    fn nice_num_round_uses_documented_breakpoints() {
        assert_eq!(nice_num(1.4, true), 1.0);
        assert_eq!(nice_num(1.5, true), 2.0);
        assert_eq!(nice_num(2.9, true), 2.0);
        assert_eq!(nice_num(3.0, true), 5.0);
        assert_eq!(nice_num(6.9, true), 5.0);
        assert_eq!(nice_num(7.0, true), 10.0);
        assert_eq!(nice_num(12.5, true), 10.0);
        assert!((nice_num(0.034, true) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn nice_num_rejects_non_positive() {
        assert_eq!(nice_num(0.0, true), 0.0);
        assert_eq!(nice_num(-3.0, false), 0.0);
        assert_eq!(nice_num(f64::NAN, true), 0.0);
    }

    #[test]
    fn arithmetic_ticks_are_strictly_increasing_on_the_grid() {
        let sweep = TickSweep::Arithmetic {
            first: 0.0,
            step: 10.0,
            count: 6,
        };
        let ticks = generate_ticks(sweep).unwrap();
        assert_eq!(ticks.values, alloc::vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        for w in ticks.values.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn arithmetic_ticks_do_not_drift_off_the_grid() {
        let step = 0.1;
        let sweep = TickSweep::Arithmetic {
            first: -0.3,
            step,
            count: 1000,
        };
        let ticks = generate_ticks(sweep).unwrap();
        assert_eq!(ticks.len(), 1000);
        for v in &ticks.values {
            let rem = (v / step).round() * step - v;
            assert!(rem.abs() < 1e-9, "value {v} drifted off the 0.1 grid");
        }
    }

    #[test]
    fn log_minor_sweep_produces_the_decade_table() {
        let ticks = generate_ticks(TickSweep::LogMinor { count: 10 }).unwrap();
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks.values[0], 0.0);
        assert!((ticks.values[1] - 0.301_029_995_663_981_2).abs() < 1e-12);
        assert!((ticks.values[4] - 0.698_970_004_336_018_8).abs() < 1e-12);
        assert_eq!(ticks.values[9], 1.0);
    }

    #[test]
    fn oversized_sweeps_fail_instead_of_allocating() {
        let sweep = TickSweep::Arithmetic {
            first: 0.0,
            step: 1e-12,
            count: 50_000_000,
        };
        assert_eq!(
            generate_ticks(sweep),
            Err(TickError::TooManyTicks {
                requested: 50_000_000
            })
        );
        assert_eq!(generate_ticks(sweep.clamped(MAX_TICKS)).map(|t| t.len()), Ok(MAX_TICKS));
    }

    #[test]
    fn broken_steps_are_rejected() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let sweep = TickSweep::Arithmetic {
                first: 0.0,
                step,
                count: 3,
            };
            assert_eq!(generate_ticks(sweep), Err(TickError::BadStep));
        }
        // A zero-count sweep never inspects its step.
        assert!(generate_ticks(TickSweep::empty()).unwrap().is_empty());
    }
}
