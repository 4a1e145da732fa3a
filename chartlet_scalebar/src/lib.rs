// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chartlet Scale Bar: distance selection and layout geometry.
//!
//! A scale bar relates an on-screen length to a ground distance. Producing
//! one takes two steps, both pure functions of their inputs:
//!
//! 1. **Selection** ([`scale_bar_length_and_value`]): given the viewport and
//!    a unit converter, find the largest round distance from the converter's
//!    ladder whose bar still fits into the available width, and render its
//!    label. The viewport resolution is corrected by the cosine of the
//!    center latitude first, since spherical Mercator stretches ground distance
//!    away from the equator, and an uncorrected bar would be systematically
//!    wrong there.
//! 2. **Layout** ([`bar_lines`], [`text_anchors`]): turn one or two selected
//!    lengths into line segments (baseline plus end ticks) and text anchor
//!    points under the configured alignment. With two unit systems the bars
//!    stack onto a shared mid-line with ticks pointing outward.
//!
//! Nothing here touches pixels: the emitted [`kurbo::Line`] segments and
//! anchor points are consumed by an external rasterizer. Coordinates are
//! accumulated in `f64` and rounded to whole pixels only when a point is
//! emitted.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlet_scalebar::scale_bar_length_and_value;
//! use chartlet_units::METRIC;
//! use chartlet_view::Viewport;
//! use kurbo::Point;
//!
//! let mut viewport = Viewport::new();
//! viewport.set_size(800.0, 600.0);
//! viewport.set_center(Point::new(0.0, 0.0)); // equator
//! viewport.set_resolution(10.0).unwrap();
//!
//! let result = scale_bar_length_and_value(&viewport, 300.0, &METRIC).unwrap();
//! // 2 km at 10 m/px is a 200 px bar, the largest that fits under 290 px.
//! assert_eq!(result.value, 2_000);
//! assert_eq!(result.text, "2 km");
//! assert!((result.length - 200.0).abs() < 1e-9);
//! ```

mod geometry;
mod length;
mod placement;

pub use geometry::{BarLayout, bar_lines, text_anchors};
pub use length::{ScaleBarResult, scale_bar_length_and_value};
pub use placement::{HorizontalAlignment, Placement, VerticalAnchor};
