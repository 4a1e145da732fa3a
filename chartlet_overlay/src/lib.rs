// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chartlet Overlay: screen-space decorations drawn above map layers.
//!
//! An [`Overlay`] is a closed variant type: a shared capability record
//! (name, enabled, opacity, foreground/background colors, tag) plus a
//! per-variant payload, either a [`CenterMarker`] crosshair or a [`ScaleBar`].
//! Overlays are owned by the map's overlay collection and are not
//! geo-referenced; they describe screen-space geometry that an external
//! rasterizer paints.
//!
//! Mutating a shared field raises a synchronous [`OverlayProperty`]
//! notification on the overlay's observer list. The scale-bar payload
//! instead tracks invalidation itself: every layout-affecting setter and
//! every resolution change flips its redraw flag, which the rasterizer
//! clears once it has regenerated its cached imagery (see
//! [`ScaleBar::redraw_needed`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlet_overlay::{Overlay, ScaleBarMode};
//! use chartlet_units::IMPERIAL;
//!
//! let mut overlay = Overlay::scale_bar();
//! let scale_bar = overlay.scale_bar_mut().unwrap();
//! scale_bar.set_mode(ScaleBarMode::Both);
//! scale_bar.set_secondary_converter(Some(IMPERIAL));
//!
//! // A fresh scale bar needs its first draw.
//! assert!(overlay.scale_bar().unwrap().redraw_needed());
//!
//! // Zooming invalidates, panning does not.
//! let scale_bar = overlay.scale_bar_mut().unwrap();
//! scale_bar.view_changed(10.0);
//! scale_bar.mark_drawn();
//! scale_bar.view_changed(10.0);
//! assert!(!scale_bar.redraw_needed());
//! scale_bar.view_changed(20.0);
//! assert!(scale_bar.redraw_needed());
//! ```

mod center;
mod overlay;
mod scale_bar;

pub use center::CenterMarker;
pub use overlay::{Overlay, OverlayId, OverlayKind, OverlayProperty};
pub use scale_bar::{ScaleBar, ScaleBarMode};
