// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chartlet Map: the portable map model.
//!
//! A [`Map`] ties the pieces of a map widget together without touching any
//! platform UI or pixel buffer: it owns the
//! [`Viewport`](chartlet_view::Viewport), an ordered [`LayerCollection`],
//! an ordered [`OverlayCollection`], and the background color. Platform
//! shells forward input into the navigation methods; a [`MapRenderer`]
//! implementation consumes the resulting state each frame.
//!
//! All mutation is single-owner: viewport, collections, and overlays are
//! expected to be touched from one UI/rendering thread, and every change
//! notification is delivered synchronously on that thread before the
//! mutator returns. Background work (data fetching, rasterization) lives in
//! external collaborators which hand results back to the owning thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlet_map::{Layer, Map};
//! use chartlet_overlay::Overlay;
//! use kurbo::{Point, Rect};
//!
//! let mut map = Map::new();
//! map.resize(800.0, 600.0);
//! map.layers_mut()
//!     .add(Layer::new("base").with_envelope(Rect::new(0.0, 0.0, 5_000.0, 5_000.0)));
//! map.overlays_mut().add(Overlay::scale_bar());
//!
//! map.navigate_to(Point::new(2_500.0, 2_500.0), 10.0).unwrap();
//!
//! assert_eq!(map.envelope(), Some(Rect::new(0.0, 0.0, 5_000.0, 5_000.0)));
//! assert!(map.viewport().extent().is_ok());
//! ```

mod collection;
mod layer;
mod render;

pub use collection::{CollectionEvent, Keyed, TrackedCollection};
pub use layer::{Layer, LayerId};
pub use render::MapRenderer;

use chartlet_overlay::{Overlay, OverlayId};
use chartlet_view::{InvalidResolution, Viewport};
use kurbo::{Point, Rect};
use peniko::Color;

impl Keyed for Overlay {
    type Id = OverlayId;

    fn id(&self) -> OverlayId {
        Overlay::id(self)
    }
}

/// Ordered, observed container of map layers.
pub type LayerCollection = TrackedCollection<Layer>;

/// Ordered, observed container of overlays.
pub type OverlayCollection = TrackedCollection<Overlay>;

/// The portable map model: viewport, layers, overlays, background.
///
/// Created once per widget and mutated for its whole lifetime; dropping the
/// map drops its viewport and collections with it.
#[derive(Debug)]
pub struct Map {
    viewport: Viewport,
    layers: LayerCollection,
    overlays: OverlayCollection,
    background: Color,
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl Map {
    /// Creates a map with an unpositioned viewport, empty collections, and
    /// a white background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(),
            layers: LayerCollection::new(),
            overlays: OverlayCollection::new(),
            background: Color::WHITE,
        }
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport access.
    ///
    /// Direct viewport mutation bypasses [`Map::view_changed`]; prefer the
    /// navigation methods, or call `view_changed` afterwards so overlays see
    /// the new state.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The layer collection, in drawing order.
    #[must_use]
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Mutable layer collection.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// The overlay collection, in drawing order.
    #[must_use]
    pub fn overlays(&self) -> &OverlayCollection {
        &self.overlays
    }

    /// Mutable overlay collection.
    pub fn overlays_mut(&mut self) -> &mut OverlayCollection {
        &mut self.overlays
    }

    /// The background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Sets the background color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Moves the viewport to a center and resolution, then propagates the
    /// change to overlays.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidResolution`] for non-finite or non-positive
    /// resolutions; the center is not applied in that case.
    pub fn navigate_to(
        &mut self,
        center: Point,
        resolution: f64,
    ) -> Result<(), InvalidResolution> {
        self.viewport.set_resolution(resolution)?;
        self.viewport.set_center(center);
        self.view_changed();
        Ok(())
    }

    /// Pans the viewport to a new center.
    pub fn navigate_to_center(&mut self, center: Point) {
        self.viewport.set_center(center);
        self.view_changed();
    }

    /// Zooms the viewport to a new resolution.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidResolution`] for non-finite or non-positive
    /// resolutions.
    pub fn navigate_to_resolution(&mut self, resolution: f64) -> Result<(), InvalidResolution> {
        self.viewport.set_resolution(resolution)?;
        self.view_changed();
        Ok(())
    }

    /// Rotates the viewport.
    pub fn rotate_to(&mut self, rotation: f64) {
        self.viewport.set_rotation(rotation);
        self.view_changed();
    }

    /// Resizes the rendered screen area.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
        self.view_changed();
    }

    /// The union of all layer envelopes, or `None` if no layer has one.
    #[must_use]
    pub fn envelope(&self) -> Option<Rect> {
        self.layers
            .iter()
            .filter_map(Layer::envelope)
            .reduce(|joined, envelope| joined.union(envelope))
    }

    /// Overlays whose name contains the given fragment.
    pub fn find_overlays<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Overlay> {
        self.overlays
            .iter()
            .filter(move |overlay| overlay.name().contains(name))
    }

    /// Fans the current viewport state out to the overlays' redraw policies.
    ///
    /// Called by the navigation methods after every viewport mutation; call
    /// it manually after mutating the viewport directly. A no-op while the
    /// viewport is unpositioned.
    pub fn view_changed(&mut self) {
        let resolution = self.viewport.resolution();
        if resolution.is_nan() {
            return;
        }
        for overlay in self.overlays.iter_mut() {
            if let Some(scale_bar) = overlay.scale_bar_mut() {
                scale_bar.view_changed(resolution);
            }
        }
    }

    /// Paints one frame through the given renderer.
    pub fn render_with(&mut self, renderer: &mut impl MapRenderer) {
        renderer.render(
            &self.viewport,
            &self.layers,
            &mut self.overlays,
            self.background,
        );
    }
}

#[cfg(test)]
mod tests {
    use chartlet_overlay::Overlay;
    use kurbo::{Point, Rect};

    use super::{Layer, Map};

    #[test]
    fn envelope_of_an_empty_map_is_none() {
        let map = Map::new();
        assert_eq!(map.envelope(), None);
    }

    #[test]
    fn envelope_joins_all_layer_envelopes() {
        let mut map = Map::new();
        map.layers_mut()
            .add(Layer::new("a").with_envelope(Rect::new(0.0, 0.0, 10.0, 10.0)));
        map.layers_mut().add(Layer::new("no-envelope"));
        map.layers_mut()
            .add(Layer::new("b").with_envelope(Rect::new(5.0, -5.0, 20.0, 8.0)));

        assert_eq!(map.envelope(), Some(Rect::new(0.0, -5.0, 20.0, 10.0)));
    }

    #[test]
    fn zooming_invalidates_scale_bars_but_panning_does_not() {
        let mut map = Map::new();
        map.resize(800.0, 600.0);
        let id = map.overlays_mut().add(Overlay::scale_bar());

        map.navigate_to(Point::ZERO, 10.0).unwrap();
        let scale_bar = |map: &mut Map| {
            map.overlays_mut()
                .by_id_mut(id)
                .unwrap()
                .scale_bar_mut()
                .unwrap()
                .redraw_needed()
        };
        map.overlays_mut()
            .by_id_mut(id)
            .unwrap()
            .scale_bar_mut()
            .unwrap()
            .mark_drawn();

        map.navigate_to_center(Point::new(100.0, 100.0));
        assert!(!scale_bar(&mut map), "pan must not invalidate");

        map.navigate_to_resolution(20.0).unwrap();
        assert!(scale_bar(&mut map), "zoom must invalidate");
    }

    #[test]
    fn find_overlays_matches_name_fragments() {
        let mut map = Map::new();
        map.overlays_mut().add(Overlay::scale_bar());
        map.overlays_mut().add(Overlay::center());

        assert_eq!(map.find_overlays("scale").count(), 1);
        assert_eq!(map.find_overlays("c").count(), 2);
        assert_eq!(map.find_overlays("missing").count(), 0);
    }
}
