// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chartlet_units::UnitConverter;
use chartlet_view::{UninitializedViewport, Viewport, mercator};

/// Pixels kept free between the bar and the available width.
const SAFETY_MARGIN: f64 = 10.0;

/// A selected scale-bar distance: pixel length, ladder value, and label.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBarResult {
    /// Bar length in pixels.
    pub length: f64,
    /// The chosen round value, in the converter's unit.
    pub value: u32,
    /// Display label for the value.
    pub text: String,
}

/// Selects the scale-bar distance for the current viewport.
///
/// The viewport center is projected back to geographic coordinates and the
/// resolution corrected by `cos(latitude)` to get the true ground resolution
/// at the center, then converted into the converter's unit. The converter's
/// ladder is scanned from the largest value down; the first value whose bar
/// is shorter than `max_width` minus a 10 px safety margin wins. If even the
/// smallest value does not fit (extreme zoom), that smallest value is
/// returned with its oversized length; degraded but well defined, never an
/// error.
///
/// This is a pure function: identical inputs produce an identical result.
///
/// # Errors
///
/// Fails with [`UninitializedViewport`] while the viewport has no center or
/// resolution.
pub fn scale_bar_length_and_value(
    viewport: &Viewport,
    max_width: f64,
    converter: &UnitConverter,
) -> Result<ScaleBarResult, UninitializedViewport> {
    viewport.require_positioned()?;

    let center = viewport.center();
    let (_, latitude) = mercator::to_lon_lat(center.x, center.y);
    let ground_resolution =
        viewport.resolution() * latitude.to_radians().cos() / converter.meter_ratio();

    let mut value = 0;
    let mut length = 0.0;
    for &candidate in converter.values().iter().rev() {
        value = candidate;
        length = f64::from(candidate) / ground_resolution;
        if length < max_width - SAFETY_MARGIN {
            break;
        }
    }

    Ok(ScaleBarResult {
        length,
        value,
        text: converter.scale_text(value),
    })
}

#[cfg(test)]
mod tests {
    use chartlet_units::{METRIC, UnitConverter};
    use chartlet_view::{Viewport, mercator};
    use kurbo::Point;

    use super::scale_bar_length_and_value;

    fn viewport_at(center: Point, resolution: f64) -> Viewport {
        let mut viewport = Viewport::new();
        viewport.set_size(800.0, 600.0);
        viewport.set_center(center);
        viewport.set_resolution(resolution).unwrap();
        viewport
    }

    fn test_label(value: u32) -> String {
        format!("{value}")
    }

    #[test]
    fn picks_the_largest_value_that_fits() {
        let converter = UnitConverter::new(1.0, &[1, 2, 5, 10, 20, 50, 100], test_label);
        // At the equator the ground resolution equals the viewport resolution.
        // 10 / 0.11 = 90.9 px fits under 110 - 10 = 100; 20 / 0.11 does not.
        let viewport = viewport_at(Point::ZERO, 0.11);

        let result = scale_bar_length_and_value(&viewport, 110.0, &converter).unwrap();
        assert_eq!(result.value, 10);
        assert!((result.length - 10.0 / 0.11).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_the_smallest_value_when_nothing_fits() {
        let converter = UnitConverter::new(1.0, &[1, 2, 5, 10, 20, 50, 100], test_label);
        // 1 unit is already 10000 px wide at this zoom.
        let viewport = viewport_at(Point::ZERO, 0.000_1);

        let result = scale_bar_length_and_value(&viewport, 110.0, &converter).unwrap();
        assert_eq!(result.value, 1);
        assert!(result.length >= 110.0 - 10.0);
    }

    #[test]
    fn is_deterministic() {
        let viewport = viewport_at(Point::new(123_456.0, 654_321.0), 17.3);
        let first = scale_bar_length_and_value(&viewport, 250.0, &METRIC).unwrap();
        let second = scale_bar_length_and_value(&viewport, 250.0, &METRIC).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.length.to_bits(), second.length.to_bits());
    }

    #[test]
    fn latitude_correction_doubles_the_bar_at_sixty_degrees() {
        let resolution = 10.0;
        let equator = viewport_at(Point::ZERO, resolution);
        let (_, y) = mercator::from_lon_lat(0.0, 60.0);
        let north = viewport_at(Point::new(0.0, y), resolution);

        // Pick a width where both latitudes select the same ladder value.
        let at_equator = scale_bar_length_and_value(&equator, 5_000.0, &METRIC).unwrap();
        let at_sixty = scale_bar_length_and_value(&north, 5_000.0, &METRIC).unwrap();

        // cos(60°) = 0.5 halves the ground resolution, so the same value is
        // twice as long on screen; the search may then pick a value one rung
        // up. Compare like with like by recomputing the equator length for
        // the northern value.
        let equator_length_for_value =
            f64::from(at_sixty.value) / (resolution / METRIC.meter_ratio());
        assert!((at_sixty.length - 2.0 * equator_length_for_value).abs() < 1e-6);
        assert!((at_equator.length - f64::from(at_equator.value) / resolution).abs() < 1e-9);
    }

    #[test]
    fn unpositioned_viewport_is_an_error() {
        let viewport = Viewport::new();
        assert!(scale_bar_length_and_value(&viewport, 110.0, &METRIC).is_err());
    }
}
