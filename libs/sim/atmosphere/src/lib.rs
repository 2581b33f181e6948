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

//! The 1976 US Standard Atmosphere, evaluated per integration step.
//!
//! [AtmosphereModel::update] maps a geometric altitude and a vehicle
//! speed to the full atmospheric state: density, static pressure,
//! temperature, speed of sound, dynamic pressure, Mach number, and
//! local gravity. The model is valid through 84.852 km and degrades to
//! a flat extrapolation above that rather than failing, so a
//! trajectory integrator can call it blindly at every step.
//!
//! Layer constants follow the Public Domain Aeronautical Software
//! tabulation of the 1976 model.
mod layers;

use crate::layers::{LayerTable, LAYER_COUNT};
use once_cell::sync::Lazy;
use physical_constants::{
    gravity_at_altitude, DRY_AIR_GAS_CONSTANT, EARTH_RADIUS_KM, HEAT_CAPACITY_RATIO,
    HYDROSTATIC_CONSTANT, SEA_LEVEL_DENSITY, SEA_LEVEL_PRESSURE, SEA_LEVEL_TEMPERATURE,
};

/// A shared instance for callers that do not need to own a model.
pub static STANDARD_ATMOSPHERE: Lazy<AtmosphereModel> = Lazy::new(AtmosphereModel::new);

/// Atmospheric properties at one altitude and speed. Rebuilt wholesale
/// on every call to [AtmosphereModel::update]; copy it out if you need
/// history.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AtmosphericState {
    /// Air density, kg/m³.
    pub density: f64,
    /// Static pressure, Pa.
    pub pressure: f64,
    /// Temperature, K.
    pub temperature: f64,
    /// Speed of sound, m/s.
    pub speed_of_sound: f64,
    /// Dynamic pressure at the given speed, Pa.
    pub dynamic_pressure: f64,
    /// Local gravitational acceleration, m/s².
    pub gravity: f64,
    /// Mach number at the given speed.
    pub mach: f64,
}

/// The piecewise-layer atmosphere model. Construction loads the fixed
/// layer tables; evaluation never mutates them, so one model may be
/// shared freely across threads.
#[derive(Clone, Debug)]
pub struct AtmosphereModel {
    layers: LayerTable,
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AtmosphereModel {
    pub fn new() -> Self {
        Self {
            layers: LayerTable::us_standard_1976(),
        }
    }

    /// Evaluate the atmosphere at a geometric altitude above sea level
    /// (m) and a vehicle speed (m/s). The speed feeds only the dynamic
    /// pressure and Mach number.
    ///
    /// Inputs are not validated: negative altitudes evaluate on the
    /// lowest layer, and non-finite inputs propagate through to the
    /// outputs rather than raising an error.
    pub fn update(&self, altitude_m: f64, speed_mps: f64) -> AtmosphericState {
        let altitude_km = altitude_m / 1_000.;

        // Geopotential altitude folds gravity's falloff into the
        // altitude scale so the hydrostatic formulas below can treat g
        // as constant.
        let geopotential_km = altitude_km * EARTH_RADIUS_KM / (altitude_km + EARTH_RADIUS_KM);
        let layer = self.layers.layer_below(geopotential_km);

        // Note that the extrapolation cutoff is on geometric altitude,
        // while the table lookup above ran on geopotential altitude.
        let top_km = self.layers.base_altitude_km[LAYER_COUNT - 1];
        let (density, pressure, temperature) = if altitude_km < top_km {
            let tgrad = self.layers.temperature_gradient[layer];
            let tbase = self.layers.base_temperature[layer];
            let deltah = geopotential_km - self.layers.base_altitude_km[layer];
            let tlocal = tbase + tgrad * deltah;
            let theta = tlocal / self.layers.base_temperature[0];

            let delta = if tgrad == 0. {
                // Isothermal layer: exponential pressure decay.
                self.layers.base_pressure_ratio[layer]
                    * (-HYDROSTATIC_CONSTANT * deltah / tbase).exp()
            } else {
                // Gradient layer: power-law decay in the temperature
                // ratio.
                self.layers.base_pressure_ratio[layer]
                    * (tbase / tlocal).powf(HYDROSTATIC_CONSTANT / tgrad)
            };
            let sigma = delta / theta;

            (
                SEA_LEVEL_DENSITY * sigma,
                SEA_LEVEL_PRESSURE * delta,
                SEA_LEVEL_TEMPERATURE * theta,
            )
        } else {
            // Above the modeled layers: hold the terminal temperature
            // and treat the air as gone.
            (0., 0., self.layers.base_temperature[LAYER_COUNT - 1])
        };

        let speed_of_sound = (HEAT_CAPACITY_RATIO * DRY_AIR_GAS_CONSTANT * temperature).sqrt();
        AtmosphericState {
            density,
            pressure,
            temperature,
            speed_of_sound,
            dynamic_pressure: 0.5 * density * speed_mps * speed_mps,
            gravity: gravity_at_altitude(altitude_m),
            mach: speed_mps / speed_of_sound,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use physical_constants::{EARTH_MASS, GRAVITATIONAL_CONSTANT};

    // Invert the geopotential conversion so boundary tests can aim at
    // an exact table altitude.
    fn geometric_m(geopotential_km: f64) -> f64 {
        geopotential_km * EARTH_RADIUS_KM / (EARTH_RADIUS_KM - geopotential_km) * 1_000.
    }

    #[test]
    fn test_sea_level() {
        let state = STANDARD_ATMOSPHERE.update(0., 0.);
        assert_relative_eq!(state.density, 1.225, max_relative = 1e-6);
        assert_relative_eq!(state.pressure, 101_325., max_relative = 1e-6);
        assert_relative_eq!(state.temperature, 288.15, max_relative = 1e-6);
        assert_eq!(state.dynamic_pressure, 0.);
        assert_eq!(state.mach, 0.);
        // a = sqrt(1.4 * 287.053 * 288.15)
        assert_relative_eq!(state.speed_of_sound, 340.29, max_relative = 1e-4);
    }

    #[test]
    fn test_tropopause_temperature() {
        // 11 km geopotential is the bottom of the isothermal
        // tropopause shelf.
        let state = STANDARD_ATMOSPHERE.update(geometric_m(11.), 0.);
        assert_abs_diff_eq!(state.temperature, 216.65, epsilon = 1e-3);
    }

    #[test]
    fn test_published_30km_values() {
        // Against the published US76 table at 30 km geometric.
        let state = STANDARD_ATMOSPHERE.update(30_000., 0.);
        assert_relative_eq!(state.pressure, 1_197., max_relative = 1e-3);
        assert_relative_eq!(state.density, 1.841e-2, max_relative = 1e-3);
    }

    #[test]
    fn test_layer_boundary_continuity() {
        let model = AtmosphereModel::new();
        for boundary_km in [11., 20., 32., 47., 51., 71.] {
            let at = geometric_m(boundary_km);
            let below = model.update(at - 0.05, 0.);
            let above = model.update(at + 0.05, 0.);
            assert_relative_eq!(below.density, above.density, max_relative = 1e-4);
            assert_relative_eq!(below.pressure, above.pressure, max_relative = 1e-4);
            assert_relative_eq!(below.temperature, above.temperature, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_density_and_pressure_decrease() {
        let model = AtmosphereModel::new();
        let mut previous = model.update(0., 0.);
        for alt in (1..=169).map(|i| f64::from(i) * 500.) {
            let state = model.update(alt, 0.);
            assert!(state.density <= previous.density);
            assert!(state.pressure <= previous.pressure);
            previous = state;
        }
    }

    #[test]
    fn test_extrapolation_above_top() {
        for alt in [84_852., 90_000., 200_000.] {
            let state = STANDARD_ATMOSPHERE.update(alt, 100.);
            assert_eq!(state.density, 0.);
            assert_eq!(state.pressure, 0.);
            assert_eq!(state.temperature, 186.946);
            assert_eq!(state.dynamic_pressure, 0.);
            // Sound speed holds at the terminal temperature, so Mach
            // stays finite up here.
            assert!(state.mach.is_finite());
        }
    }

    #[test]
    fn test_mach_and_dynamic_pressure_consistency() {
        let speed = 250.;
        for alt in [0., 5_000., 10_000., 40_000., 80_000.] {
            let state = STANDARD_ATMOSPHERE.update(alt, speed);
            assert_eq!(state.mach, speed / state.speed_of_sound);
            assert_eq!(state.dynamic_pressure, 0.5 * state.density * speed * speed);
        }
    }

    #[test]
    fn test_gravity_matches_inverse_square() {
        let mut previous = f64::INFINITY;
        for alt in (0..=100).map(|i| f64::from(i) * 1_000.) {
            let state = STANDARD_ATMOSPHERE.update(alt, 0.);
            let radius_m = EARTH_RADIUS_KM * 1_000. + alt;
            let expected = GRAVITATIONAL_CONSTANT * EARTH_MASS / (radius_m * radius_m);
            assert_relative_eq!(state.gravity, expected, max_relative = 1e-9);
            assert!(state.gravity < previous);
            previous = state.gravity;
        }
    }

    #[test]
    fn test_repeat_calls_are_bit_identical() {
        let model = AtmosphereModel::new();
        let a = model.update(12_345.678, 321.5);
        let b = model.update(12_345.678, 321.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_below_sea_level() {
        // The Dead Sea is denser and warmer than the reference, with
        // no special casing.
        let state = STANDARD_ATMOSPHERE.update(-430., 0.);
        assert!(state.density > 1.225);
        assert!(state.pressure > 101_325.);
        assert!(state.temperature > 288.15);
    }

    #[test]
    fn test_non_finite_inputs_propagate() {
        let state = STANDARD_ATMOSPHERE.update(1_000., f64::NAN);
        assert!(state.mach.is_nan());
        assert!(state.dynamic_pressure.is_nan());
        // Altitude-only outputs are untouched by the speed.
        assert!(state.pressure.is_finite());
    }
}
