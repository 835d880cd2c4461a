// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default tick label formatting.
//!
//! Linear tick labels use `%g`-style significant-digit formatting; log-scale
//! labels render the decade as `1E<exponent>`. A step-aware formatter is also
//! provided for hosts that want every label along an axis to carry the same
//! number of decimals.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Significant digits used by the default linear label format.
pub const DEFAULT_SIG_DIGITS: usize = 6;

fn trim_decimal(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats `value` with at most `sig` significant digits, `%g`-style.
///
/// Small and large magnitudes switch to exponent notation; trailing zeros
/// (and a dangling decimal point) are trimmed in either form.
pub fn format_sig(value: f64, sig: usize) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    if value == 0.0 {
        return String::from("0");
    }
    let sig = sig.max(1);
    let exp = {
        let e = value.abs().log10().floor().clamp(-400.0, 400.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small integer range")]
        {
            e as i32
        }
    };
    #[allow(clippy::cast_possible_wrap, reason = "sig is clamped well below i32::MAX")]
    let sig_i = sig.min(1000) as i32;
    if exp < -4 || exp >= sig_i {
        let mant = alloc::format!("{:.*e}", sig - 1, value);
        match mant.split_once('e') {
            Some((m, e)) => alloc::format!("{}e{e}", trim_decimal(m)),
            None => mant,
        }
    } else {
        #[allow(clippy::cast_sign_loss, reason = "max(0) before the cast")]
        let decimals = (sig_i - 1 - exp).max(0) as usize;
        let s = alloc::format!("{value:.decimals$}");
        String::from(trim_decimal(&s))
    }
}

/// Formats a log-axis major tick, given its position in decades.
pub fn format_log_label(decade: f64) -> String {
    let e = {
        let d = decade.round().clamp(-400.0, 400.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small integer range")]
        {
            d as i32
        }
    };
    alloc::format!("1E{e}")
}

/// Formats a tick value with decimals derived from the tick step.
///
/// A step of `0.25` yields two decimals, a step of `10` yields none, so every
/// label along the axis lines up. Useful as a custom formatter when `%g`-style
/// trimming is too eager.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    let decimals = if step > 0.0 && step.is_finite() {
        // Smallest decimal count that writes the step itself exactly.
        let mut d = 0;
        let mut scaled = step;
        while d < 12 && (scaled - scaled.round()).abs() > 1e-9 * scaled.abs().max(1.0) {
            scaled *= 10.0;
            d += 1;
        }
        d
    } else {
        0
    };
    alloc::format!("{value:.decimals$}")
}
