// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chartlet_scalebar::{BarLayout, Placement, ScaleBarResult, scale_bar_length_and_value};
use chartlet_units::{METRIC, UnitConverter};
use chartlet_view::{UninitializedViewport, Viewport};
use kurbo::Point;

/// How many unit systems the scale bar shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleBarMode {
    /// One bar for the primary unit converter.
    #[default]
    Single,
    /// Two stacked bars; the secondary converter supplies the lower one.
    Both,
}

/// Scale-bar overlay state: configuration plus redraw invalidation.
///
/// The rasterizer typically caches the rendered bar as an image and blits it
/// each frame; [`redraw_needed`](Self::redraw_needed) tells it when that
/// cache is stale. The flag starts `true`, is set by every layout-affecting
/// setter and by [`view_changed`](Self::view_changed) when the resolution
/// moved, and is cleared only by [`mark_drawn`](Self::mark_drawn). Panning
/// alone never invalidates: the bar is anchored in screen space and the
/// displayed distance is read at the viewport center, so small center moves
/// do not change it visibly.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBar {
    width: f64,
    height: f64,
    margin_horizontal: f64,
    margin_vertical: f64,
    placement: Placement,
    mode: ScaleBarMode,
    converter: UnitConverter,
    secondary_converter: Option<UnitConverter>,
    tick_length: f64,
    max_width: f64,
    text_margin: f64,
    scale: f64,
    redraw_needed: bool,
    last_resolution: f64,
}

impl Default for ScaleBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaleBar {
    /// Creates a metric, single-mode scale bar that needs its first draw.
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            margin_horizontal: 0.0,
            margin_vertical: 0.0,
            placement: Placement::default(),
            mode: ScaleBarMode::default(),
            converter: METRIC,
            secondary_converter: None,
            tick_length: 3.0,
            max_width: 100.0,
            text_margin: 1.0,
            scale: 1.0,
            redraw_needed: true,
            last_resolution: f64::MAX,
        }
    }

    /// Width of the overlay's pixel box, set by the host when it lays the
    /// overlay out.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sets the box width.
    pub fn set_width(&mut self, width: f64) {
        if self.width != width {
            self.width = width;
            self.redraw_needed = true;
        }
    }

    /// Height of the overlay's pixel box.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the box height.
    pub fn set_height(&mut self, height: f64) {
        if self.height != height {
            self.height = height;
            self.redraw_needed = true;
        }
    }

    /// Horizontal distance to the view edge for edge-anchored placements.
    #[must_use]
    pub fn margin_horizontal(&self) -> f64 {
        self.margin_horizontal
    }

    /// Sets the horizontal margin.
    pub fn set_margin_horizontal(&mut self, margin: f64) {
        if self.margin_horizontal != margin {
            self.margin_horizontal = margin;
            self.redraw_needed = true;
        }
    }

    /// Vertical distance to the view edge for edge-anchored placements.
    #[must_use]
    pub fn margin_vertical(&self) -> f64 {
        self.margin_vertical
    }

    /// Sets the vertical margin.
    pub fn set_margin_vertical(&mut self, margin: f64) {
        if self.margin_vertical != margin {
            self.margin_vertical = margin;
            self.redraw_needed = true;
        }
    }

    /// Where the scale bar sits on screen.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Sets the placement.
    pub fn set_placement(&mut self, placement: Placement) {
        if self.placement != placement {
            self.placement = placement;
            self.redraw_needed = true;
        }
    }

    /// Whether one or two unit systems are shown.
    #[must_use]
    pub fn mode(&self) -> ScaleBarMode {
        self.mode
    }

    /// Sets the mode.
    pub fn set_mode(&mut self, mode: ScaleBarMode) {
        if self.mode != mode {
            self.mode = mode;
            self.redraw_needed = true;
        }
    }

    /// The primary unit converter.
    #[must_use]
    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Sets the primary unit converter. There is always one; it cannot be
    /// unset, only replaced.
    pub fn set_converter(&mut self, converter: UnitConverter) {
        if self.converter != converter {
            self.converter = converter;
            self.redraw_needed = true;
        }
    }

    /// The secondary unit converter shown in [`ScaleBarMode::Both`].
    #[must_use]
    pub fn secondary_converter(&self) -> Option<&UnitConverter> {
        self.secondary_converter.as_ref()
    }

    /// Sets or clears the secondary unit converter.
    pub fn set_secondary_converter(&mut self, converter: Option<UnitConverter>) {
        if self.secondary_converter != converter {
            self.secondary_converter = converter;
            self.redraw_needed = true;
        }
    }

    /// Length of the bar end ticks in pixels.
    #[must_use]
    pub fn tick_length(&self) -> f64 {
        self.tick_length
    }

    /// Sets the tick length.
    pub fn set_tick_length(&mut self, length: f64) {
        if self.tick_length != length {
            self.tick_length = length;
            self.redraw_needed = true;
        }
    }

    /// Maximum usable bar length in pixels. The selected bar is always
    /// shorter, because only round distances are displayed.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Sets the maximum bar length.
    pub fn set_max_width(&mut self, max_width: f64) {
        if self.max_width != max_width {
            self.max_width = max_width;
            self.redraw_needed = true;
        }
    }

    /// Gap between stroke and label text in pixels.
    #[must_use]
    pub fn text_margin(&self) -> f64 {
        self.text_margin
    }

    /// Sets the text margin.
    pub fn set_text_margin(&mut self, margin: f64) {
        if self.text_margin != margin {
            self.text_margin = margin;
            self.redraw_needed = true;
        }
    }

    /// Display scale factor applied to stroke, ticks, and margins.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the display scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        if self.scale != scale {
            self.scale = scale;
            self.redraw_needed = true;
        }
    }

    /// Whether the rasterizer's cached imagery is stale.
    #[must_use]
    pub fn redraw_needed(&self) -> bool {
        self.redraw_needed
    }

    /// Clears the redraw flag after the rasterizer regenerated its cache.
    pub fn mark_drawn(&mut self) {
        self.redraw_needed = false;
    }

    /// Feeds a viewport change into the redraw policy.
    ///
    /// A resolution delta invalidates (the selected distance and bar length
    /// generally change); center and rotation changes are ignored.
    pub fn view_changed(&mut self, resolution: f64) {
        if self.last_resolution != resolution {
            self.last_resolution = resolution;
            self.redraw_needed = true;
        }
    }

    /// Selects the displayed distance(s) for the current viewport.
    ///
    /// The secondary result is present when the mode is
    /// [`ScaleBarMode::Both`] and a secondary converter is set.
    ///
    /// # Errors
    ///
    /// Fails with [`UninitializedViewport`] while the viewport has no center
    /// or resolution.
    pub fn measure(
        &self,
        viewport: &Viewport,
    ) -> Result<(ScaleBarResult, Option<ScaleBarResult>), UninitializedViewport> {
        let primary = scale_bar_length_and_value(viewport, self.max_width, &self.converter)?;
        let secondary = match (self.mode, &self.secondary_converter) {
            (ScaleBarMode::Both, Some(converter)) => {
                Some(scale_bar_length_and_value(viewport, self.max_width, converter)?)
            }
            _ => None,
        };
        Ok((primary, secondary))
    }

    /// Bundles the layout parameters for the geometry functions, given the
    /// stroke width the rasterizer draws with.
    #[must_use]
    pub fn bar_layout(&self, stroke_width: f64) -> BarLayout {
        BarLayout {
            max_width: self.max_width,
            height: self.height,
            tick_length: self.tick_length,
            stroke_width,
            text_margin: self.text_margin,
            scale: self.scale,
            alignment: self.placement.alignment,
        }
    }

    /// Top-left corner of the overlay box for the given view size.
    #[must_use]
    pub fn origin(&self, view_width: f64, view_height: f64) -> Point {
        Point::new(
            self.placement
                .position_left(view_width, self.width, self.margin_horizontal),
            self.placement
                .position_top(view_height, self.height, self.margin_vertical),
        )
    }
}
