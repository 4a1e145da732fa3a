// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use bitflags::bitflags;
use kurbo::{Affine, Point, Rect, Vec2};

use crate::observe::{ObserverId, Observers};

bitflags! {
    /// The viewport fields changed by a mutation.
    ///
    /// Passed to observers so they can tell a zoom from a pan from a resize
    /// without diffing state themselves.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ViewportChanges: u8 {
        /// The center point moved.
        const CENTER = 1 << 0;
        /// The resolution (world units per pixel) changed.
        const RESOLUTION = 1 << 1;
        /// The rotation changed.
        const ROTATION = 1 << 2;
        /// The rendered screen size changed.
        const SIZE = 1 << 3;
    }
}

/// The viewport has no center or resolution yet.
///
/// Freshly created viewports carry NaN sentinels for both until the owning
/// map navigates somewhere; coordinate transforms and anything derived from
/// them fail with this error until then.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UninitializedViewport;

impl fmt::Display for UninitializedViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewport has no center or resolution yet")
    }
}

impl core::error::Error for UninitializedViewport {}

/// A resolution that is not a finite positive number was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvalidResolution(pub f64);

impl fmt::Display for InvalidResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resolution must be finite and positive, got {}", self.0)
    }
}

impl core::error::Error for InvalidResolution {}

/// Mutable map-viewport state with cached screen/world transforms.
///
/// The viewport owns four pieces of state: center (projected meters),
/// resolution (world units per pixel), rotation (degrees, normalized into
/// `[0, 360)`), and screen size (pixels). It keeps a forward/inverse
/// affine pair in sync with them. The transform pipeline is: translate by
/// `-center`, scale by `1/resolution` (with the screen-space y flip), rotate
/// by `-rotation`, translate to the screen center. Forward and inverse are
/// exact inverses up to floating-point rounding.
///
/// Each mutator is a no-op when the new value equals the current one;
/// otherwise it applies the change, rebuilds the transforms, and notifies
/// observers synchronously before returning.
#[derive(Debug)]
pub struct Viewport {
    center: Point,
    resolution: f64,
    rotation: f64,
    width: f64,
    height: f64,
    world_to_screen: Affine,
    screen_to_world: Affine,
    observers: Observers<ViewportChanges>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Creates an unpositioned viewport.
    ///
    /// Center and resolution start as NaN sentinels; size and rotation are
    /// zero. Coordinate transforms fail with [`UninitializedViewport`] until
    /// both a center and a resolution have been set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            center: Point::new(f64::NAN, f64::NAN),
            resolution: f64::NAN,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            world_to_screen: Affine::IDENTITY,
            screen_to_world: Affine::IDENTITY,
            observers: Observers::new(),
        }
    }

    /// The center point in projected meters. NaN while unpositioned.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// World units per pixel. NaN while unpositioned.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Rotation in degrees, normalized into `[0, 360)`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rendered screen width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Rendered screen height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether both center and resolution have been set.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        !self.center.x.is_nan() && !self.center.y.is_nan() && !self.resolution.is_nan()
    }

    /// Fails with [`UninitializedViewport`] while unpositioned.
    pub fn require_positioned(&self) -> Result<(), UninitializedViewport> {
        if self.is_positioned() {
            Ok(())
        } else {
            Err(UninitializedViewport)
        }
    }

    /// Moves the center.
    pub fn set_center(&mut self, center: Point) {
        if self.center == center {
            return;
        }
        self.center = center;
        self.rebuild_transforms();
        self.observers.notify(ViewportChanges::CENTER);
    }

    /// Changes the resolution (zoom level).
    ///
    /// Rejects non-finite and non-positive values; the NaN sentinel can only
    /// exist on a viewport that has never been positioned.
    pub fn set_resolution(&mut self, resolution: f64) -> Result<(), InvalidResolution> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(InvalidResolution(resolution));
        }
        if self.resolution == resolution {
            return Ok(());
        }
        self.resolution = resolution;
        self.rebuild_transforms();
        self.observers.notify(ViewportChanges::RESOLUTION);
        Ok(())
    }

    /// Rotates the view. The angle is in degrees and is normalized.
    pub fn set_rotation(&mut self, rotation: f64) {
        let normalized = rotation.rem_euclid(360.0);
        if self.rotation == normalized {
            return;
        }
        self.rotation = normalized;
        self.rebuild_transforms();
        self.observers.notify(ViewportChanges::ROTATION);
    }

    /// Resizes the rendered screen area.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.rebuild_transforms();
        self.observers.notify(ViewportChanges::SIZE);
    }

    /// Registers a change observer; see [`ViewportChanges`] for the events.
    pub fn on_change(&mut self, callback: impl FnMut(ViewportChanges) + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Removes a change observer registered with [`Viewport::on_change`].
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Converts a world-space point into screen pixels.
    pub fn world_to_screen(&self, point: Point) -> Result<Point, UninitializedViewport> {
        self.require_positioned()?;
        Ok(self.world_to_screen * point)
    }

    /// Converts a screen-pixel point into world space.
    pub fn screen_to_world(&self, point: Point) -> Result<Point, UninitializedViewport> {
        self.require_positioned()?;
        Ok(self.screen_to_world * point)
    }

    /// The world-space bounding box visible on screen.
    ///
    /// With rotation, this is the axis-aligned bounding box of the rotated
    /// screen rectangle's corners in world space.
    pub fn extent(&self) -> Result<Rect, UninitializedViewport> {
        self.require_positioned()?;
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(0.0, self.height),
            Point::new(self.width, self.height),
        ];
        let q0 = self.screen_to_world * corners[0];
        let mut min_x = q0.x;
        let mut min_y = q0.y;
        let mut max_x = q0.x;
        let mut max_y = q0.y;
        for corner in &corners[1..] {
            let q = self.screen_to_world * *corner;
            min_x = min_x.min(q.x);
            min_y = min_y.min(q.y);
            max_x = max_x.max(q.x);
            max_y = max_y.max(q.y);
        }
        Ok(Rect::new(min_x, min_y, max_x, max_y))
    }

    fn rebuild_transforms(&mut self) {
        if !self.is_positioned() {
            self.world_to_screen = Affine::IDENTITY;
            self.screen_to_world = Affine::IDENTITY;
            return;
        }
        let screen_center = Vec2::new(self.width * 0.5, self.height * 0.5);
        let scale = 1.0 / self.resolution;
        // World y grows north, screen y grows down, hence the sign flip.
        self.world_to_screen = Affine::translate(screen_center)
            * Affine::rotate(-self.rotation.to_radians())
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-self.center.to_vec2());
        self.screen_to_world = self.world_to_screen.inverse();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Point;

    use super::{UninitializedViewport, Viewport, ViewportChanges};

    fn positioned() -> Viewport {
        let mut viewport = Viewport::new();
        viewport.set_size(800.0, 600.0);
        viewport.set_center(Point::new(1_000.0, 2_000.0));
        viewport.set_resolution(2.0).unwrap();
        viewport
    }

    #[test]
    fn unpositioned_viewport_rejects_transforms() {
        let viewport = Viewport::new();
        assert_eq!(
            viewport.world_to_screen(Point::ZERO),
            Err(UninitializedViewport)
        );
        assert_eq!(
            viewport.screen_to_world(Point::ZERO),
            Err(UninitializedViewport)
        );
        assert!(viewport.extent().is_err());
    }

    #[test]
    fn center_maps_to_screen_center() {
        let viewport = positioned();
        let screen = viewport.world_to_screen(viewport.center()).unwrap();
        assert!((screen.x - 400.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn north_is_up_on_screen() {
        let viewport = positioned();
        let north = Point::new(1_000.0, 2_100.0);
        let screen = viewport.world_to_screen(north).unwrap();
        assert!(screen.y < 300.0, "north should be above the screen center");
    }

    #[test]
    fn roundtrip_with_rotation() {
        let mut viewport = positioned();
        viewport.set_rotation(37.5);
        for &(x, y) in &[(0.0, 0.0), (123.4, -56.7), (799.0, 599.0)] {
            let screen = Point::new(x, y);
            let world = viewport.screen_to_world(screen).unwrap();
            let back = viewport.world_to_screen(world).unwrap();
            assert!((back.x - screen.x).abs() < 1e-9, "x at ({x}, {y})");
            assert!((back.y - screen.y).abs() < 1e-9, "y at ({x}, {y})");
        }
    }

    #[test]
    fn extent_covers_screen_times_resolution() {
        let viewport = positioned();
        let extent = viewport.extent().unwrap();
        assert!((extent.width() - 800.0 * 2.0).abs() < 1e-9);
        assert!((extent.height() - 600.0 * 2.0).abs() < 1e-9);
        let center = extent.center();
        assert!((center.x - 1_000.0).abs() < 1e-9);
        assert!((center.y - 2_000.0).abs() < 1e-9);
    }

    #[test]
    fn extent_at_quarter_turn_swaps_dimensions() {
        let mut viewport = positioned();
        viewport.set_rotation(90.0);
        let extent = viewport.extent().unwrap();
        assert!((extent.width() - 600.0 * 2.0).abs() < 1e-6);
        assert!((extent.height() - 800.0 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_resolutions_are_rejected() {
        let mut viewport = Viewport::new();
        assert!(viewport.set_resolution(0.0).is_err());
        assert!(viewport.set_resolution(-1.0).is_err());
        assert!(viewport.set_resolution(f64::NAN).is_err());
        assert!(viewport.set_resolution(f64::INFINITY).is_err());
        assert!(viewport.set_resolution(1.0).is_ok());
    }

    #[test]
    fn rotation_is_normalized() {
        let mut viewport = positioned();
        viewport.set_rotation(-90.0);
        assert_eq!(viewport.rotation(), 270.0);
        viewport.set_rotation(720.0);
        assert_eq!(viewport.rotation(), 0.0);
    }

    #[test]
    fn observers_see_the_changed_field() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut viewport = positioned();
        let sink = Rc::clone(&seen);
        viewport.on_change(move |changes| sink.borrow_mut().push(changes));

        viewport.set_center(Point::new(0.0, 0.0));
        viewport.set_resolution(4.0).unwrap();
        viewport.set_rotation(10.0);
        viewport.set_size(400.0, 300.0);

        assert_eq!(
            *seen.borrow(),
            vec![
                ViewportChanges::CENTER,
                ViewportChanges::RESOLUTION,
                ViewportChanges::ROTATION,
                ViewportChanges::SIZE,
            ]
        );
    }

    #[test]
    fn equal_values_do_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let mut viewport = positioned();
        let counter = Rc::clone(&count);
        viewport.on_change(move |_| *counter.borrow_mut() += 1);

        viewport.set_center(viewport.center());
        viewport.set_resolution(viewport.resolution()).unwrap();
        viewport.set_rotation(viewport.rotation());
        viewport.set_size(viewport.width(), viewport.height());

        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn removed_observer_is_not_called() {
        let count = Rc::new(RefCell::new(0));
        let mut viewport = positioned();
        let counter = Rc::clone(&count);
        let id = viewport.on_change(move |_| *counter.borrow_mut() += 1);

        viewport.set_rotation(45.0);
        assert!(viewport.remove_observer(id));
        viewport.set_rotation(90.0);

        assert_eq!(*count.borrow(), 1);
    }
}
