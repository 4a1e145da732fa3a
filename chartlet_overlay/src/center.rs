// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Line, Point};

/// A crosshair marking the viewport center.
///
/// The marker is four stroke segments arranged around the center with a
/// clear gap in the middle, so the marked point itself stays visible. The
/// rasterizer draws the segments twice for a halo effect: background color
/// wide, then foreground color narrow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterMarker {
    gap: f64,
    reach: f64,
}

impl Default for CenterMarker {
    fn default() -> Self {
        Self {
            gap: 10.0,
            reach: 40.0,
        }
    }
}

impl CenterMarker {
    /// Creates a marker with the given inner gap and outer reach, in pixels.
    #[must_use]
    pub fn new(gap: f64, reach: f64) -> Self {
        Self { gap, reach }
    }

    /// Inner gap radius: the arms start this far from the center.
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Outer reach: the arms end this far from the center.
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.reach
    }

    /// The four crosshair arms around the given screen-space center.
    #[must_use]
    pub fn crosshair(&self, center: Point) -> [Line; 4] {
        let Point { x, y } = center;
        [
            Line::new((x - self.gap, y), (x - self.reach, y)),
            Line::new((x + self.gap, y), (x + self.reach, y)),
            Line::new((x, y - self.gap), (x, y - self.reach)),
            Line::new((x, y + self.gap), (x, y + self.reach)),
        ]
    }
}
