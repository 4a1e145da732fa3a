// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chartlet Units: measurement-unit ladders for scale bars.
//!
//! A scale bar shows a "nice" round ground distance (1 km, 500 ft, 2 nmi, …)
//! next to a line whose on-screen length corresponds to that distance. This
//! crate provides the unit side of that computation: a [`UnitConverter`]
//! couples a meters-to-unit ratio with a ladder of round values and a label
//! function, and the built-in [`METRIC`], [`IMPERIAL`], and [`NAUTICAL`]
//! converters cover the common measurement systems.
//!
//! Converters are plain immutable values. The built-in ones are statics and
//! are meant to be passed around by copy or reference; custom converters can
//! be built with [`UnitConverter::new`], which validates its configuration at
//! construction time (at compile time when used in a `const`/`static`).
//!
//! ## Quick Start
//!
//! ```rust
//! use chartlet_units::{METRIC, UnitConverter};
//!
//! // The ladder is strictly ascending and starts at 1 m.
//! assert_eq!(METRIC.values().first(), Some(&1));
//!
//! // Labels switch from meters to kilometers at 1000.
//! assert_eq!(METRIC.scale_text(500), "500 m");
//! assert_eq!(METRIC.scale_text(2000), "2 km");
//!
//! // Custom converters validate at construction.
//! fn label(value: u32) -> String {
//!     format!("{value} u")
//! }
//! let custom = UnitConverter::new(2.0, &[1, 5, 10], label);
//! assert_eq!(custom.scale_text(5), "5 u");
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// A measurement system used to express scale-bar distances.
///
/// A converter carries three things:
///
/// - [`meter_ratio`](Self::meter_ratio): how many meters one unit of the
///   system is (1.0 for meters, 0.3048 for feet, …). Ground resolution in
///   meters per pixel divided by this ratio gives units per pixel.
/// - [`values`](Self::values): the strictly ascending ladder of round
///   distances, in the system's unit, that a scale bar may display.
/// - a label function turning a ladder value into display text.
///
/// Converters are immutable and `Copy`; equality compares the full
/// configuration, so two converters built from the same ladder and label
/// function compare equal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConverter {
    meter_ratio: f64,
    values: &'static [u32],
    label: fn(u32) -> String,
}

impl UnitConverter {
    /// Creates a converter, validating its configuration.
    ///
    /// # Panics
    ///
    /// Panics if `meter_ratio` is not positive, if `values` is empty or
    /// starts at zero, or if `values` is not strictly ascending. These are
    /// programmer errors in converter definitions; for the built-in statics
    /// the checks run at compile time.
    #[must_use]
    pub const fn new(meter_ratio: f64, values: &'static [u32], label: fn(u32) -> String) -> Self {
        assert!(meter_ratio > 0.0, "meter ratio must be positive");
        assert!(!values.is_empty(), "scale ladder must not be empty");
        assert!(values[0] > 0, "scale ladder values must be positive");
        let mut i = 1;
        while i < values.len() {
            assert!(
                values[i - 1] < values[i],
                "scale ladder must be strictly ascending"
            );
            i += 1;
        }
        Self {
            meter_ratio,
            values,
            label,
        }
    }

    /// How many meters one unit of this system is.
    #[must_use]
    pub const fn meter_ratio(&self) -> f64 {
        self.meter_ratio
    }

    /// The ascending ladder of round values, in this system's unit.
    #[must_use]
    pub const fn values(&self) -> &'static [u32] {
        self.values
    }

    /// Renders the display label for a ladder value.
    #[must_use]
    pub fn scale_text(&self, value: u32) -> String {
        (self.label)(value)
    }
}

/// Metric distances: a 1-2-5 ladder of meters, labeled in m below 1 km and
/// in km from there on.
pub static METRIC: UnitConverter = UnitConverter::new(
    1.0,
    &[
        1, 2, 5, 10, 20, 50, 100, 200, 500, 1_000, 2_000, 5_000, 10_000, 20_000, 50_000, 100_000,
        200_000, 500_000, 1_000_000, 2_000_000, 5_000_000, 10_000_000,
    ],
    metric_text,
);

/// Imperial distances: feet below one mile, miles from 5280 ft on.
pub static IMPERIAL: UnitConverter = UnitConverter::new(
    0.3048,
    &[
        1, 2, 5, 10, 20, 50, 100, 200, 500, 1_000, 2_000, 5_280, 10_560, 26_400, 52_800, 105_600,
        264_000, 528_000, 1_056_000, 2_640_000, 5_280_000, 10_560_000, 26_400_000,
    ],
    imperial_text,
);

/// Nautical distances. The ladder is expressed in meters (ratio 1.0) so the
/// short end reads in m, switching to nautical miles at 926 m (half a mile).
pub static NAUTICAL: UnitConverter = UnitConverter::new(
    1.0,
    &[
        1, 2, 5, 10, 20, 50, 100, 200, 500, 926, 1_852, 3_704, 9_260, 18_520, 37_040, 92_600,
        185_200, 370_400, 926_000, 1_852_000, 3_704_000, 9_260_000,
    ],
    nautical_text,
);

fn metric_text(value: u32) -> String {
    if value < 1_000 {
        format!("{value} m")
    } else {
        format!("{} km", value / 1_000)
    }
}

fn imperial_text(value: u32) -> String {
    if value < 5_280 {
        format!("{value} ft")
    } else {
        format!("{} mi", value / 5_280)
    }
}

fn nautical_text(value: u32) -> String {
    if value < 926 {
        format!("{value} m")
    } else if value == 926 {
        String::from("0.5 nmi")
    } else {
        format!("{} nmi", value / 1_852)
    }
}
