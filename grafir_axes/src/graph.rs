// Copyright 2026 the Grafir Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph-level axis coordinator.
//!
//! A [`Graph`] owns the axis arena and the four margins, and runs the
//! per-frame pass: reset tracked extents, merge every visible producer's
//! extents, rescale each axis, then lay out the margins and the plot
//! rectangle. Everything is synchronous and single-threaded; derived
//! geometry is rebuilt in place on every pass, and callers re-query rather
//! than holding on to results.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use grafir_core::{PlaneMap, TickError, h_map, h_unmap, v_map, v_unmap};
use grafir_text::{TextMeasurer, TextStyle};

use crate::arena::{ArenaError, AxisArena, AxisId};
use crate::autorange::{AxisPair, DataProducer};
use crate::axis::{AxisClass, AxisOptions, AxisState, ConfigError, ErrorHook};
use crate::geometry::{AxisSegments, axis_geometry, map_axis};
use crate::layout::{FrameLayout, LayoutExtras, Margin, MarginSide, axis_offsets, layout_margins};
use crate::view::{AxisView, ScrollUnits, view_fractions, view_moveto, view_scroll};

/// Legend size and placement, as reported by the legend collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendInfo {
    /// Legend width in pixels.
    pub width: f64,
    /// Legend height in pixels.
    pub height: f64,
    /// The margin the legend occupies; `None` means it floats over the plot
    /// and takes no margin room.
    pub site: Option<MarginSide>,
}

/// The axis subsystem of one plot widget.
#[derive(Default)]
pub struct Graph {
    arena: AxisArena,
    margins: [Margin; 4],
    width: f64,
    height: f64,
    /// Swap which data axis maps to which screen dimension.
    pub inverted: bool,
    /// Desired plot aspect ratio; `0.0` leaves it unconstrained.
    pub aspect: f64,
    /// Graph title; reserves room in the top margin.
    pub title: Option<String>,
    /// Font size used to measure the graph title.
    pub title_font_size: f64,
    /// Legend metrics consulted during layout.
    pub legend: Option<LegendInfo>,
    /// Background-error hook for recovered callback failures.
    pub error_hook: Option<ErrorHook>,
    plot: Rect,
}

impl core::fmt::Debug for Graph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("arena", &self.arena)
            .field("margins", &self.margins)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("inverted", &self.inverted)
            .field("aspect", &self.aspect)
            .field("title", &self.title)
            .field("title_font_size", &self.title_font_size)
            .field("legend", &self.legend)
            .field("error_hook", &self.error_hook.is_some())
            .field("plot", &self.plot)
            .finish()
    }
}

impl Graph {
    /// Creates a graph with the four classic default axes.
    ///
    /// `x` maps to the bottom margin and `y` to the left; `x2` and `y2` are
    /// created hidden on the top and right.
    pub fn new(width: f64, height: f64) -> Self {
        let mut graph = Self {
            width,
            height,
            title_font_size: 12.0,
            ..Default::default()
        };
        let x = graph.arena.create("x", AxisClass::X).expect("fresh arena");
        let y = graph.arena.create("y", AxisClass::Y).expect("fresh arena");
        let x2 = graph.arena.create("x2", AxisClass::X).expect("fresh arena");
        let y2 = graph.arena.create("y2", AxisClass::Y).expect("fresh arena");
        graph.map_axis_to(x, MarginSide::Bottom).expect("x is X-class");
        graph.map_axis_to(y, MarginSide::Left).expect("y is Y-class");
        graph.map_axis_to(x2, MarginSide::Top).expect("x2 is X-class");
        graph.map_axis_to(y2, MarginSide::Right).expect("y2 is Y-class");
        for id in [x2, y2] {
            if let Some(state) = graph.arena.get_mut(id) {
                state.options_mut().hidden = true;
            }
        }
        graph
    }

    /// Resizes the widget.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// The plot rectangle computed by the last pass.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Access to the axis arena (create/acquire/release/delete).
    pub fn arena(&self) -> &AxisArena {
        &self.arena
    }

    /// Mutable access to the axis arena.
    pub fn arena_mut(&mut self) -> &mut AxisArena {
        &mut self.arena
    }

    /// Looks up an axis handle by name.
    pub fn axis_id(&self, name: &str) -> Option<AxisId> {
        self.arena.lookup(name)
    }

    /// Borrows an axis.
    pub fn axis(&self, id: AxisId) -> Option<&AxisState> {
        self.arena.get(id)
    }

    /// Creates a new named axis.
    pub fn create_axis(&mut self, name: &str, class: AxisClass) -> Result<AxisId, ArenaError> {
        self.arena.create(name, class)
    }

    /// Applies options to an axis, triggering a rescale on the next pass.
    pub fn configure_axis(&mut self, id: AxisId, opts: AxisOptions) -> Result<(), ConfigError> {
        let state = self.arena.get_mut(id).ok_or(ConfigError::UnknownAxis)?;
        state.configure(opts)
    }

    fn side_class(&self, side: MarginSide) -> AxisClass {
        let horizontal_is_x = !self.inverted;
        if side.is_horizontal() == horizontal_is_x {
            AxisClass::X
        } else {
            AxisClass::Y
        }
    }

    /// Stacks an axis onto a margin.
    ///
    /// The margin's orientation must match the axis class (with the graph's
    /// inversion taken into account). The margin holds a reference on the
    /// axis until [`Graph::unmap_axis_from`].
    pub fn map_axis_to(&mut self, id: AxisId, side: MarginSide) -> Result<(), ConfigError> {
        let state = self.arena.get(id).ok_or(ConfigError::UnknownAxis)?;
        if state.class() != self.side_class(side) {
            return Err(ConfigError::ClassMismatch);
        }
        if !self.margins[side.index()].axes.contains(&id) {
            self.arena.acquire(id).map_err(|_| ConfigError::UnknownAxis)?;
            self.margins[side.index()].axes.push(id);
        }
        Ok(())
    }

    /// Removes an axis from a margin, dropping the margin's reference.
    pub fn unmap_axis_from(&mut self, id: AxisId, side: MarginSide) -> Result<(), ConfigError> {
        let margin = &mut self.margins[side.index()];
        let Some(pos) = margin.axes.iter().position(|&a| a == id) else {
            return Err(ConfigError::UnknownAxis);
        };
        margin.axes.remove(pos);
        self.arena.release(id).map_err(|_| ConfigError::UnknownAxis)?;
        if let Some(state) = self.arena.get_mut(id) {
            state.set_geometry(None);
        }
        Ok(())
    }

    /// Sets an explicit margin-size override (`None` restores auto sizing).
    pub fn set_margin_override(&mut self, side: MarginSide, size: Option<f64>) {
        self.margins[side.index()].requested = size;
    }

    /// The margin an axis is currently mapped to, with its stacking position.
    fn margin_of(&self, id: AxisId) -> Option<(MarginSide, usize)> {
        for side in MarginSide::ALL {
            if let Some(pos) = self.margins[side.index()].axes.iter().position(|&a| a == id) {
                return Some((side, pos));
            }
        }
        None
    }

    /// Whether an axis currently runs horizontally on screen.
    pub fn axis_is_horizontal(&self, state: &AxisState) -> bool {
        (state.class() == AxisClass::X) != self.inverted
    }

    /// The per-frame pass: auto-range, rescale, and lay out every axis.
    ///
    /// Walks `producers` once, merging extents into the mapped axes, then
    /// resolves every axis and recomputes margins and the plot rectangle.
    /// Returns `true` if any axis's bounds changed since the previous pass
    /// (the caller should invalidate its backing store and redraw).
    pub fn reset_axes(
        &mut self,
        producers: &[&dyn DataProducer],
        measurer: &dyn TextMeasurer,
    ) -> Result<bool, TickError> {
        for (_, state) in self.arena.iter_mut() {
            state.reset_tracking();
        }
        for producer in producers {
            if !producer.visible() {
                continue;
            }
            let limits = producer.extents();
            let AxisPair { x, y } = producer.axes();
            if let Some(state) = self.arena.get_mut(x) {
                state.merge_extent(limits.left, limits.right);
            }
            if let Some(state) = self.arena.get_mut(y) {
                state.merge_extent(limits.bottom, limits.top);
            }
        }

        let mut changed = false;
        for (_, state) in self.arena.iter_mut() {
            state.rescale()?;
            if state.take_dirty() {
                changed = true;
            }
        }

        self.layout(measurer);
        Ok(changed)
    }

    /// Recomputes margin requirements and the plot rectangle.
    fn layout(&mut self, measurer: &dyn TextMeasurer) {
        for side in MarginSide::ALL {
            let ids: Vec<AxisId> = self.margins[side.index()].axes.iter().copied().collect();
            let mut total = 0.0;
            let mut max_title = 0.0_f64;
            for id in ids {
                let Some(state) = self.arena.get(id) else {
                    continue;
                };
                if state.options().hidden {
                    self.arena
                        .get_mut(id)
                        .expect("checked above")
                        .set_geometry(None);
                    continue;
                }
                let geometry = axis_geometry(state, side, measurer, self.error_hook.as_ref());
                total += geometry.extent;
                max_title = max_title.max(geometry.title_along);
                self.arena
                    .get_mut(id)
                    .expect("checked above")
                    .set_geometry(Some(geometry));
            }
            let margin = &mut self.margins[side.index()];
            margin.computed = total;
            margin.max_title = max_title;
        }

        let title_height = match &self.title {
            Some(title) => {
                measurer
                    .measure(title, TextStyle::new(self.title_font_size))
                    .line_height()
            }
            None => 0.0,
        };
        let legend = self.legend.and_then(|l| {
            l.site.map(|side| {
                let extent = if side.is_horizontal() { l.height } else { l.width };
                (extent, side)
            })
        });
        let extras = LayoutExtras {
            title_height,
            legend,
            aspect: self.aspect,
        };
        let layout: FrameLayout = layout_margins(self.width, self.height, &self.margins, &extras);
        self.plot = layout.plot;
    }

    /// Maps a data value on `axis` to a screen pixel.
    pub fn transform(&self, id: AxisId, value: f64) -> Option<f64> {
        let state = self.arena.get(id)?;
        let spec = state.map_spec();
        Some(if self.axis_is_horizontal(state) {
            h_map(&spec, self.plot, value)
        } else {
            v_map(&spec, self.plot, value)
        })
    }

    /// Maps a screen pixel on `axis` back to a data value.
    pub fn invtransform(&self, id: AxisId, pixel: f64) -> Option<f64> {
        let state = self.arena.get(id)?;
        let spec = state.map_spec();
        Some(if self.axis_is_horizontal(state) {
            h_unmap(&spec, self.plot, pixel)
        } else {
            v_unmap(&spec, self.plot, pixel)
        })
    }

    /// Displayed bounds of an axis in data units (de-logged).
    pub fn limits(&self, id: AxisId) -> Option<(f64, f64)> {
        Some(self.arena.get(id)?.limits())
    }

    /// Builds a 2D mapper for an axis pair.
    pub fn plane_map(&self, pair: AxisPair) -> Option<PlaneMap> {
        let x = self.arena.get(pair.x)?;
        let y = self.arena.get(pair.y)?;
        Some(PlaneMap {
            x: x.map_spec(),
            y: y.map_spec(),
            plot: self.plot,
            inverted: self.inverted,
        })
    }

    /// Maps a data point through an axis pair.
    pub fn map_point(&self, x: f64, y: f64, pair: AxisPair) -> Option<Point> {
        Some(self.plane_map(pair)?.map(x, y))
    }

    /// Maps a screen point back through an axis pair.
    pub fn unmap_point(&self, p: Point, pair: AxisPair) -> Option<(f64, f64)> {
        Some(self.plane_map(pair)?.unmap(p))
    }

    /// Materializes the drawable segments for one mapped, visible axis.
    ///
    /// Returns fresh owned buffers; they are invalidated by the next pass.
    pub fn axis_segments(&self, id: AxisId) -> Option<AxisSegments> {
        let state = self.arena.get(id)?;
        let geometry = state.geometry()?;
        let (side, pos) = self.margin_of(id)?;
        let margin = &self.margins[side.index()];
        // Stack offset: the extents of the visible axes before this one.
        let mut offset = 0.0;
        for &other in margin.axes.iter().take(pos) {
            if let Some(g) = self.arena.get(other).and_then(|s| s.geometry()) {
                offset += g.extent;
            }
        }
        let offsets = axis_offsets(side, self.plot, offset, state.options().tick_length);
        let title_spills = margin.axes.len() > 1;
        Some(map_axis(state, side, self.plot, &offsets, geometry, title_spills))
    }

    /// Screen positions of the in-range major ticks of an axis.
    ///
    /// This is the grid-line hook: the grid renderer spans these positions
    /// across the plot in the perpendicular direction.
    pub fn grid_positions(&self, id: AxisId) -> Vec<f64> {
        let Some(state) = self.arena.get(id) else {
            return Vec::new();
        };
        let spec = state.map_spec();
        let range = state.axis_range();
        let horizontal = self.axis_is_horizontal(state);
        state
            .major_ticks()
            .values
            .iter()
            .copied()
            .filter(|v| range.contains(*v))
            .map(|v| {
                let t = spec.fraction(v);
                if horizontal {
                    self.plot.x0 + t * self.plot.width()
                } else {
                    self.plot.y1 - t * self.plot.height()
                }
            })
            .collect()
    }

    /// Returns the visible window of an axis as world fractions.
    pub fn view(&self, id: AxisId) -> Option<AxisView> {
        Some(view_fractions(self.arena.get(id)?))
    }

    /// Slides an axis view to a world fraction (scrollbar `moveto`).
    pub fn view_moveto(&mut self, id: AxisId, fraction: f64) -> Result<(), ConfigError> {
        let state = self.arena.get_mut(id).ok_or(ConfigError::UnknownAxis)?;
        view_moveto(state, fraction);
        Ok(())
    }

    /// Steps an axis view by units or pages (scrollbar `scroll`).
    pub fn view_scroll(
        &mut self,
        id: AxisId,
        count: i32,
        units: ScrollUnits,
    ) -> Result<(), ConfigError> {
        let state = self.arena.get_mut(id).ok_or(ConfigError::UnknownAxis)?;
        view_scroll(state, count, units);
        Ok(())
    }
}
