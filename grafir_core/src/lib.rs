// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis scaling, tick generation, and coordinate mapping for 2D plots.
//!
//! This crate is the numeric engine under a plotting widget:
//! - **Nice numbers** pick human-friendly tick steps (Heckbert's algorithm).
//! - **Tick sweeps** describe a progression of tick positions and are
//!   materialized into owned value arrays.
//! - **Axis ranges** are a normalized `[0, 1]` view of the displayed bounds,
//!   used for membership tests and coordinate normalization.
//! - **Scale resolvers** turn observed data extents plus user overrides into
//!   displayed bounds and major/minor sweeps, for linear and log axes.
//! - The **coordinate mapper** converts between data space and screen space
//!   in both directions.
//!
//! Everything here is pure and synchronous; widget state, layout, and text
//! measurement live in the `grafir_axes` and `grafir_text` crates.

#![no_std]

extern crate alloc;

#[cfg(not(feature = "std"))]
mod float;
mod map;
mod range;
mod resolve;
mod tick;

pub use map::{MapSpec, PlaneMap, h_map, h_unmap, v_map, v_unmap};
pub use range::AxisRange;
pub use resolve::{
    DEFAULT_TICK_TARGET, LooseMode, RangeInputs, ResolvedScale, ScaleRequest, fix_axis_range,
    linear_scale, log_scale,
};
pub use tick::{MAX_TICKS, TickError, TickSweep, Ticks, generate_ticks, nice_num};
