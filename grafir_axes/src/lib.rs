// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis entities, margin layout, and auto-ranging for the Grafir plot widget.
//!
//! This crate sits between the numeric engine (`grafir_core`) and the host
//! toolkit:
//! - [`AxisState`] records carry per-axis configuration and derived scale
//!   state, owned by a refcounted [`AxisArena`] with deferred deletion.
//! - [`Graph`] runs the per-frame pass: merge data extents from every visible
//!   [`DataProducer`], rescale each axis, and lay out the four margins around
//!   the plot rectangle.
//! - [`axis_geometry`]/[`map_axis`] produce the owned label and segment
//!   buffers the (external) renderer draws from.
//! - [`view_fractions`]/[`view_moveto`]/[`view_scroll`] implement the classic
//!   scrollbar protocol over an axis window.
//!
//! Drawing, option-string parsing, and event dispatch stay in the host; text
//! metrics come in through `grafir_text::TextMeasurer`.

#![no_std]

extern crate alloc;

mod arena;
mod autorange;
mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod graph;
mod layout;
mod view;

pub use arena::{ArenaError, AxisArena, AxisId};
pub use autorange::{AxisPair, DataLimits, DataProducer};
pub use axis::{
    AxisClass, AxisOptions, AxisState, ConfigError, ErrorHook, ScaleKind, TickFormatter,
};
pub use format::{
    DEFAULT_SIG_DIGITS, format_log_label, format_sig, format_tick_with_step,
};
pub use geometry::{AxisGeometry, AxisSegments, TickLabel, axis_geometry, map_axis};
pub use graph::{Graph, LegendInfo};
pub use layout::{
    AxisOffsets, FrameLayout, LayoutExtras, MIN_MARGIN, MINOR_TICK_RATIO, Margin, MarginSide,
    TICK_LABEL_GAP, TITLE_GAP, axis_offsets, layout_margins,
};
pub use view::{AxisView, ScrollUnits, view_fractions, view_moveto, view_scroll};
