// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chartlet_view::Viewport;
use peniko::Color;

use crate::{LayerCollection, OverlayCollection};

/// The rasterizer seam.
///
/// The map model computes state and geometry; a `MapRenderer` turns them
/// into pixels. Implementations receive the overlays mutably so they can
/// clear scale-bar redraw flags after regenerating cached imagery
/// ([`ScaleBar::mark_drawn`](chartlet_overlay::ScaleBar::mark_drawn)).
/// No call in the model blocks on rendering; the renderer is driven by the
/// host's frame loop.
pub trait MapRenderer {
    /// Paints one frame of the given map state.
    fn render(
        &mut self,
        viewport: &Viewport,
        layers: &LayerCollection,
        overlays: &mut OverlayCollection,
        background: Color,
    );
}
