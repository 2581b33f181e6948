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

pub(crate) const LAYER_COUNT: usize = 8;

/// The piecewise layer structure of the 1976 US Standard Atmosphere:
/// four index-aligned columns describing the base of each of the eight
/// layers between sea level and 84.852 km geopotential altitude.
///
/// Base altitudes must be strictly increasing; the search below leans
/// on that ordering.
#[derive(Clone, Debug)]
pub(crate) struct LayerTable {
    /// Base geopotential altitude of each layer, km.
    pub base_altitude_km: [f64; LAYER_COUNT],
    /// Temperature at each layer base, K.
    pub base_temperature: [f64; LAYER_COUNT],
    /// Pressure at each layer base as a fraction of sea-level pressure.
    pub base_pressure_ratio: [f64; LAYER_COUNT],
    /// Temperature gradient within each layer, K/km. Zero marks an
    /// isothermal layer.
    pub temperature_gradient: [f64; LAYER_COUNT],
}

impl LayerTable {
    pub const fn us_standard_1976() -> Self {
        Self {
            base_altitude_km: [0.0, 11.0, 20.0, 32.0, 47.0, 51.0, 71.0, 84.852],
            base_temperature: [
                288.15, 216.65, 216.65, 228.65, 270.65, 270.65, 214.65, 186.946,
            ],
            base_pressure_ratio: [
                1.0,
                2.233611e-1,
                5.403295e-2,
                8.5666784e-3,
                1.0945601e-3,
                6.6063531e-4,
                3.9046834e-5,
                3.68501e-6,
            ],
            temperature_gradient: [-6.5, 0.0, 1.0, 2.8, 0.0, -2.8, -2.0, 0.0],
        }
    }

    /// Index of the layer whose base sits at or below the given
    /// geopotential altitude. A bisection over the base altitudes;
    /// three iterations bracket any altitude among eight entries. An
    /// altitude exactly on a boundary belongs to the upper layer.
    pub fn layer_below(&self, geopotential_km: f64) -> usize {
        let mut lo = 0;
        let mut hi = LAYER_COUNT - 1;
        while hi > lo + 1 {
            let mid = (lo + hi) / 2;
            if geopotential_km < self.base_altitude_km[mid] {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        lo
    }
}
