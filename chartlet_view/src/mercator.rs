// Copyright 2026 the Chartlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spherical-Mercator projection.
//!
//! Viewport centers are expressed in spherical-Mercator meters (EPSG:3857).
//! The scale-bar computation needs the geographic latitude of the viewport
//! center to correct for the projection's latitude-dependent distortion, so
//! this module provides the inverse projection alongside the forward one.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Earth radius of the spherical-Mercator projection, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Converts projected meters into geographic degrees `(longitude, latitude)`.
#[must_use]
pub fn to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    (lon, lat)
}

/// Converts geographic degrees into projected meters `(x, y)`.
#[must_use]
pub fn from_lon_lat(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon.to_radians() * EARTH_RADIUS;
    let y = (lat.to_radians() * 0.5 + FRAC_PI_4).tan().ln() * EARTH_RADIUS;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_equator_and_prime_meridian() {
        let (lon, lat) = to_lon_lat(0.0, 0.0);
        assert!(lon.abs() < 1e-12);
        assert!(lat.abs() < 1e-12);
    }

    #[test]
    fn roundtrip_through_projection() {
        for &(lon, lat) in &[(0.0, 0.0), (13.4, 52.5), (-122.3, 47.6), (151.2, -33.9)] {
            let (x, y) = from_lon_lat(lon, lat);
            let (lon_back, lat_back) = to_lon_lat(x, y);
            assert!((lon_back - lon).abs() < 1e-9, "lon {lon}");
            assert!((lat_back - lat).abs() < 1e-9, "lat {lat}");
        }
    }

    #[test]
    fn sixty_degrees_north_inverts_correctly() {
        let (_, y) = from_lon_lat(0.0, 60.0);
        let (_, lat) = to_lon_lat(0.0, y);
        assert!((lat - 60.0).abs() < 1e-9);
    }
}
