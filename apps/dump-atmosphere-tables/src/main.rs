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
use anyhow::{bail, Result};
use atmosphere::STANDARD_ATMOSPHERE;
use log::info;
use std::{fs, path::PathBuf};
use structopt::StructOpt;

/// Sweep the standard atmosphere over an altitude range and dump the
/// resulting property table.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Lowest altitude to sample, meters
    #[structopt(long, default_value = "0")]
    min: f64,

    /// Highest altitude to sample, meters
    #[structopt(long, default_value = "86000")]
    max: f64,

    /// Sample spacing, meters
    #[structopt(short, long, default_value = "1000")]
    step: f64,

    /// Vehicle speed for the dynamic pressure and Mach columns, m/s
    #[structopt(short = "v", long, default_value = "0")]
    speed: f64,

    /// Write CSV to this path instead of printing aligned columns
    #[structopt(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    if !opt.step.is_finite() || opt.step <= 0. {
        bail!("sample spacing must be a positive number of meters");
    }
    if opt.max < opt.min {
        bail!("altitude range is empty: {} < {}", opt.max, opt.min);
    }

    let mut rows = Vec::new();
    let mut altitude = opt.min;
    while altitude <= opt.max {
        rows.push((altitude, STANDARD_ATMOSPHERE.update(altitude, opt.speed)));
        altitude += opt.step;
    }
    info!(
        "sampled {} altitudes in [{}, {}] at speed {}",
        rows.len(),
        opt.min,
        opt.max,
        opt.speed
    );

    if let Some(path) = opt.output {
        let mut csv =
            String::from("altitude_m,density,pressure,temperature,sound_speed,dynamic_pressure,gravity,mach\n");
        for (altitude, state) in &rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                altitude,
                state.density,
                state.pressure,
                state.temperature,
                state.speed_of_sound,
                state.dynamic_pressure,
                state.gravity,
                state.mach
            ));
        }
        fs::write(&path, csv)?;
        info!("wrote {}", path.display());
    } else {
        println!(
            "{:>10} {:>12} {:>12} {:>8} {:>8} {:>12} {:>8} {:>8}",
            "alt m", "rho kg/m3", "press Pa", "temp K", "a m/s", "q Pa", "g m/s2", "mach"
        );
        for (altitude, state) in &rows {
            println!(
                "{:>10.1} {:>12.6e} {:>12.4} {:>8.2} {:>8.2} {:>12.4} {:>8.4} {:>8.4}",
                altitude,
                state.density,
                state.pressure,
                state.temperature,
                state.speed_of_sound,
                state.dynamic_pressure,
                state.gravity,
                state.mach
            );
        }
    }

    Ok(())
}
