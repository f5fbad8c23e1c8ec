use std::collections::HashSet;

use thiserror::Error;

use crate::utils::format_credential;
use crate::{ChipPlatform, DeviceDescription};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("duplicate {domain} id `{id}`")]
    DuplicateId { domain: &'static str, id: String },
}

/// Assemble the full configuration document. Emission is one-pass and
/// append-only; the only failure is a duplicate component id, which would make
/// two lights claim the same companion output.
pub fn generate_yaml(config: &DeviceDescription) -> Result<String, GenerateError> {
    check_unique_ids(config)?;

    let device = &config.device;
    let name = device.name.as_deref().unwrap_or("my-device");
    let friendly_name = device.friendly_name.as_deref().unwrap_or("My Device");
    let board = device.board.as_deref().unwrap_or(device.platform.default_board());

    let mut out = format!(
        "esphome:
  name: {name}
  friendly_name: {friendly_name}

{platform_block}
# Enable logging
{logger}

# Enable Home Assistant API
{api}

# Enable OTA updates
{ota}

wifi:
  ssid: {ssid}
  password: {password}

  # Security settings to prevent warnings in newer ESPHome versions
  min_auth_mode: WPA2
  fast_connect: true

  # Enable fallback hotspot (captive portal) in case wifi connection fails
  ap:
    ssid: \"{name}-fallback\"
    password: \"\"

{web_server}

# captive_portal:
",
        platform_block = platform_block(device.platform, board),
        logger = if config.logger {
            "logger:"
        } else {
            "# logger: disabled"
        },
        api = if config.api {
            "api:\n  password: \"\""
        } else {
            "# api: disabled"
        },
        ota = if config.ota {
            "ota:\n  - platform: esphome\n    password: \"\""
        } else {
            "# ota: disabled"
        },
        ssid = format_credential(&config.wifi.ssid),
        password = format_credential(&config.wifi.password),
        web_server = if config.web_server {
            "web_server:\n  port: 80"
        } else {
            "# web_server: disabled"
        },
    );

    if !config.sensors.is_empty() {
        out.push_str("\n# Sensors\nsensor:\n");
        for sensor in &config.sensors {
            out.push_str(&sensor.to_yaml());
            out.push('\n');
        }
    }

    if !config.binary_sensors.is_empty() {
        out.push_str("\n# Binary Sensors\nbinary_sensor:\n");
        for sensor in &config.binary_sensors {
            out.push_str(&sensor.to_yaml());
            out.push('\n');
        }
    }

    if !config.switches.is_empty() {
        out.push_str("\n# Switches\nswitch:\n");
        for switch in &config.switches {
            out.push_str(&switch.to_yaml());
            out.push('\n');
        }
    }

    if !config.lights.is_empty() {
        out.push_str("\n# Lights\nlight:\n");
        let mut light_outputs = String::new();
        for light in &config.lights {
            let blocks = light.to_yaml(device.platform);
            out.push_str(&blocks.light);
            out.push('\n');
            if !blocks.outputs.is_empty() {
                light_outputs.push_str(&blocks.outputs);
                light_outputs.push('\n');
            }
        }
        // Companion outputs are aggregated into a single section so the
        // document keeps one `output:` key however many lights need one.
        if !light_outputs.is_empty() {
            out.push_str("# Outputs for lights\noutput:\n");
            out.push_str(&light_outputs);
        }
    }

    if !config.buttons.is_empty() {
        out.push_str("\n# Buttons\nbutton:\n");
        for button in &config.buttons {
            out.push_str(&button.to_yaml());
            out.push('\n');
        }
    }

    Ok(out)
}

fn platform_block(platform: ChipPlatform, board: &str) -> String {
    let mut block = format!("{}:\n  board: {}\n", platform.config_key(), board);
    match platform {
        ChipPlatform::Esp32 => block.push_str("  framework:\n    type: arduino\n"),
        ChipPlatform::Rtl87xx => block.push_str("  framework:\n    version: recommended\n"),
        ChipPlatform::Esp8266 | ChipPlatform::Bk72xx => {}
    }
    block
}

fn check_unique_ids(config: &DeviceDescription) -> Result<(), GenerateError> {
    check_domain("sensor", config.sensors.iter().map(|c| c.object_id()))?;
    check_domain(
        "binary_sensor",
        config.binary_sensors.iter().map(|c| c.object_id()),
    )?;
    check_domain("switch", config.switches.iter().map(|c| c.object_id()))?;
    check_domain("light", config.lights.iter().map(|c| c.object_id()))?;
    check_domain("button", config.buttons.iter().map(|c| c.object_id()))?;
    Ok(())
}

fn check_domain(
    domain: &'static str,
    ids: impl Iterator<Item = String>,
) -> Result<(), GenerateError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            return Err(GenerateError::DuplicateId { domain, id });
        }
    }
    Ok(())
}
