extern crate log;
extern crate pretty_env_logger as pel;

use debris_orbits::io::{write_debris_csv, ConfigRepr};
use debris_orbits::tracking::{SpaceTrackCfg, SpaceTrackClient};
use debris_orbits::{Apsis, OrbitError};
use log::{info, warn};
use std::fs::File;

fn main() -> Result<(), OrbitError> {
    pel::init();

    // Credentials come from a YAML file if provided, and from the environment otherwise.
    let cfg = match std::env::args().nth(1) {
        Some(path) => SpaceTrackCfg::load(path)?,
        None => SpaceTrackCfg::from_env()?,
    };

    let mut client = SpaceTrackClient::new(cfg)?;
    let records = client.debris(10)?;

    for record in &records {
        let orbit = match record.to_orbit() {
            Ok(orbit) => orbit,
            Err(e) => {
                warn!("skipping NORAD {}: {e}", record.norad_cat_id);
                continue;
            }
        };

        println!("{} ({})", record.object_name, record.norad_cat_id);
        println!("\t{orbit}");
        for apsis in [Apsis::Apoapsis, Apsis::Periapsis] {
            println!(
                "\t{apsis}: r = {:.3} km\tv = {:.4} km/s",
                orbit.radius_at_apsis(apsis),
                orbit.velocity_at_apsis(apsis)
            );
        }
        println!(
            "\tenergy = {:.4} km^2/s^2\tKepler period = {}",
            orbit.energy_km2_s2(),
            orbit.orbital_period()
        );
        match orbit.ta_deg() {
            Ok(ta_deg) => println!("\ttrue anomaly = {ta_deg:.4} deg"),
            Err(e) => warn!("{e}"),
        }
    }

    let output = File::create("debris_report.csv").map_err(|e| OrbitError::CustomError {
        msg: format!("could not create debris_report.csv: {e}"),
    })?;
    let count = write_debris_csv(&records, output)?;
    info!("wrote {count} debris to debris_report.csv");

    client.logout()?;

    Ok(())
}
