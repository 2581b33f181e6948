// This file is part of Stratus.
//
// Stratus is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// Stratus is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Stratus.  If not, see <http://www.gnu.org/licenses/>.

//! Shared physical constants, in SI units throughout. The earth values
//! here are the ones the atmosphere model was calibrated against; do
//! not swap in WGS84 figures without re-deriving the layer tables.

/// Newtonian gravitational constant, m³/(kg·s²).
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6730e-11;

/// Earth mass, kg.
pub const EARTH_MASS: f64 = 5.9730e24;

/// Spherical-earth radius used for the geopotential conversion, km.
pub const EARTH_RADIUS_KM: f64 = 6369.0;

/// Specific gas constant of dry air, J/(kg·K).
pub const DRY_AIR_GAS_CONSTANT: f64 = 287.053;

/// Ratio of specific heats for diatomic air.
pub const HEAT_CAPACITY_RATIO: f64 = 1.4;

/// Combined hydrostatic constant g₀·M/R*, K/km, as tabulated for the
/// 1976 standard atmosphere.
pub const HYDROSTATIC_CONSTANT: f64 = 34.163195;

/// Sea-level reference density, kg/m³.
pub const SEA_LEVEL_DENSITY: f64 = 1.2250;

/// Sea-level reference pressure, Pa.
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Sea-level reference temperature, K.
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;

/// Standard gravity at the surface, m/s².
pub const STANDARD_GRAVITY: f64 = 9.806_65;

/// Gravitational acceleration at a geometric altitude above sea level,
/// from the inverse-square law about a spherical earth.
pub fn gravity_at_altitude(altitude_m: f64) -> f64 {
    let radius_m = EARTH_RADIUS_KM * 1_000. + altitude_m;
    GRAVITATIONAL_CONSTANT * EARTH_MASS / (radius_m * radius_m)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_gravity() {
        // The spherical-earth figure lands within a quarter percent of
        // standard gravity.
        assert_relative_eq!(
            gravity_at_altitude(0.),
            STANDARD_GRAVITY,
            max_relative = 0.005
        );
    }

    #[test]
    fn test_gravity_decreases_with_altitude() {
        let mut previous = gravity_at_altitude(0.);
        for alt in (1..=100).map(|i| f64::from(i) * 1_000.) {
            let g = gravity_at_altitude(alt);
            assert!(g < previous);
            previous = g;
        }
    }

    #[test]
    fn test_gravity_inverse_square() {
        let g0 = gravity_at_altitude(0.);
        // Doubling the radius quarters the pull.
        let far = EARTH_RADIUS_KM * 1_000.;
        assert_relative_eq!(gravity_at_altitude(far), g0 / 4., max_relative = 1e-9);
    }
}
