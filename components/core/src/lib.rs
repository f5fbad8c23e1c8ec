pub mod binary_sensor;
pub mod button;
pub mod light;
pub mod sensor;
pub mod switch;
pub mod template;
pub mod utils;

use serde::Deserialize;

pub use template::{generate_yaml, GenerateError};

use binary_sensor::BinarySensor;
use button::Button;
use light::Light;
use sensor::Sensor;
use switch::Switch;

/// Microcontroller family the configuration targets. Each family has its own
/// top-level configuration key and default board.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum ChipPlatform {
    #[serde(rename = "ESP8266", alias = "esp8266")]
    Esp8266,
    #[serde(rename = "ESP32", alias = "esp32")]
    Esp32,
    #[serde(rename = "BK72xx", alias = "bk72xx")]
    Bk72xx,
    #[serde(rename = "RTL87xx", alias = "rtl87xx", alias = "libretiny")]
    Rtl87xx,
}

impl ChipPlatform {
    pub fn config_key(&self) -> &'static str {
        match self {
            ChipPlatform::Esp8266 => "esp8266",
            ChipPlatform::Esp32 => "esp32",
            ChipPlatform::Bk72xx => "bk72xx",
            // RTL87xx boards build through the libretiny framework
            ChipPlatform::Rtl87xx => "libretiny",
        }
    }

    pub fn default_board(&self) -> &'static str {
        match self {
            ChipPlatform::Esp8266 => "nodemcuv2",
            ChipPlatform::Esp32 => "esp32dev",
            ChipPlatform::Bk72xx => "cb2s",
            ChipPlatform::Rtl87xx => "generic-rtl8710bn-2mb-788a",
        }
    }

    /// PWM-capable output platform for dimmable light channels.
    pub fn pwm_output(&self) -> &'static str {
        match self {
            ChipPlatform::Esp8266 => "esp8266_pwm",
            _ => "ledc",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeviceConfig {
    pub name: Option<String>,
    pub friendly_name: Option<String>,
    pub platform: ChipPlatform,
    pub board: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WifiConfig {
    pub ssid: String,
    pub password: String,
}

fn default_true() -> bool {
    true
}

/// The full device description one generation call consumes. Deserialized from
/// the user's description file; every optional field falls back to a documented
/// default, so any well-typed description generates.
#[derive(Clone, Debug, Deserialize)]
pub struct DeviceDescription {
    pub device: DeviceConfig,
    pub wifi: WifiConfig,

    #[serde(default = "default_true")]
    pub logger: bool,
    #[serde(default = "default_true")]
    pub api: bool,
    #[serde(default = "default_true")]
    pub ota: bool,
    #[serde(default)]
    pub web_server: bool,

    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub binary_sensors: Vec<BinarySensor>,
    #[serde(default)]
    pub switches: Vec<Switch>,
    #[serde(default)]
    pub lights: Vec<Light>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}
