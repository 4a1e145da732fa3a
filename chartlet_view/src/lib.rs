// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chartlet View: the mutable map viewport.
//!
//! A [`Viewport`] describes which part of world space is visible on screen:
//! a center point in projected meters, a resolution (world units per pixel),
//! a rotation in degrees, and the rendered screen size in pixels. From that
//! state it derives a cached affine transform pair for converting points
//! between world and screen space, and the world-space extent visible on
//! screen.
//!
//! Viewports start *unpositioned*: center and resolution are NaN sentinels
//! until the owning map navigates somewhere. Any operation that needs a
//! position ([`Viewport::world_to_screen`], [`Viewport::screen_to_world`],
//! [`Viewport::extent`], and the scale-bar computation built on top) fails
//! with [`UninitializedViewport`] until then.
//!
//! Mutations notify registered observers synchronously, before the mutator
//! returns, with a [`ViewportChanges`] mask naming the changed fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlet_view::Viewport;
//! use kurbo::Point;
//!
//! let mut viewport = Viewport::new();
//! viewport.set_size(800.0, 600.0);
//! viewport.set_center(Point::new(1_000.0, 2_000.0));
//! viewport.set_resolution(10.0).unwrap();
//!
//! // The center maps to the middle of the screen…
//! let screen = viewport.world_to_screen(Point::new(1_000.0, 2_000.0)).unwrap();
//! assert_eq!(screen, Point::new(400.0, 300.0));
//!
//! // …and the transforms are exact inverses.
//! let world = viewport.screen_to_world(screen).unwrap();
//! assert!((world.x - 1_000.0).abs() < 1e-9);
//! ```
//!
//! The [`mercator`] module provides the spherical-Mercator projection used
//! to express viewport centers in meters and recover geographic coordinates.

pub mod mercator;
mod observe;
mod viewport;

pub use observe::{ObserverId, Observers};
pub use viewport::{InvalidResolution, UninitializedViewport, Viewport, ViewportChanges};
