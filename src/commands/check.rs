use std::error::Error;
use std::fs;

use espwizard_core::{generate_yaml, DeviceDescription};
use log::info;

pub fn run(description_path: &str) -> Result<(), Box<dyn Error>> {
    let description = fs::read_to_string(description_path)?;
    let config: DeviceDescription = serde_yaml::from_str(&description)?;

    // Generation itself performs the id-uniqueness validation.
    generate_yaml(&config)?;

    info!("{} validated", description_path);
    println!(
        "{} is valid: {} sensors, {} binary sensors, {} switches, {} lights, {} buttons.",
        description_path,
        config.sensors.len(),
        config.binary_sensors.len(),
        config.switches.len(),
        config.lights.len(),
        config.buttons.len(),
    );
    Ok(())
}
