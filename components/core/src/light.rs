use serde::Deserialize;

use crate::utils::format_id;
use crate::ChipPlatform;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum Chipset {
    #[default]
    #[serde(rename = "WS2812")]
    Ws2812,
    #[serde(rename = "WS2811")]
    Ws2811,
    #[serde(rename = "SK6812")]
    Sk6812,
    #[serde(rename = "APA102")]
    Apa102,
}

impl Chipset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chipset::Ws2812 => "WS2812",
            Chipset::Ws2811 => "WS2811",
            Chipset::Sk6812 => "SK6812",
            Chipset::Apa102 => "APA102",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Light {
    pub id: Option<String>,
    pub name: String,

    #[serde(flatten)]
    pub kind: LightKind,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightKind {
    Binary {
        pin: String,
    },
    Monochromatic {
        pin: String,
    },
    Rgb {
        red_pin: Option<String>,
        green_pin: Option<String>,
        blue_pin: Option<String>,
    },
    Rgbw {
        red_pin: Option<String>,
        green_pin: Option<String>,
        blue_pin: Option<String>,
        white_pin: Option<String>,
    },
    Neopixel {
        pin: String,
        num_leds: Option<u32>,
        chipset: Option<Chipset>,
    },
}

/// A light declaration plus the companion low-level output blocks it needs.
/// `outputs` is empty for addressable strips, which drive the hardware
/// directly.
#[derive(Clone, Debug)]
pub struct LightBlocks {
    pub light: String,
    pub outputs: String,
}

impl Light {
    pub fn object_id(&self) -> String {
        format_id(&self.id, &self.name)
    }

    pub fn to_yaml(&self, platform: ChipPlatform) -> LightBlocks {
        let name = &self.name;
        let output_id = format!("output_{}", self.object_id());

        match &self.kind {
            LightKind::Binary { pin } => LightBlocks {
                light: format!(
                    "  - platform: binary
    name: \"{name}\"
    output: {output_id}
",
                ),
                outputs: format!(
                    "  - platform: gpio
    id: {output_id}
    pin: {pin}
",
                ),
            },

            LightKind::Monochromatic { pin } => LightBlocks {
                light: format!(
                    "  - platform: monochromatic
    name: \"{name}\"
    output: {output_id}
",
                ),
                outputs: format!(
                    "  - platform: {pwm}
    id: {output_id}
    pin: {pin}
",
                    pwm = platform.pwm_output(),
                ),
            },

            LightKind::Rgb {
                red_pin,
                green_pin,
                blue_pin,
            } => LightBlocks {
                light: format!(
                    "  - platform: rgb
    name: \"{name}\"
    red: {output_id}_r
    green: {output_id}_g
    blue: {output_id}_b
",
                ),
                outputs: [
                    ("r", red_pin.as_deref().unwrap_or("GPIO12")),
                    ("g", green_pin.as_deref().unwrap_or("GPIO13")),
                    ("b", blue_pin.as_deref().unwrap_or("GPIO14")),
                ]
                .iter()
                .map(|(channel, pin)| channel_output(platform, &output_id, channel, pin))
                .collect(),
            },

            LightKind::Rgbw {
                red_pin,
                green_pin,
                blue_pin,
                white_pin,
            } => LightBlocks {
                light: format!(
                    "  - platform: rgbw
    name: \"{name}\"
    red: {output_id}_r
    green: {output_id}_g
    blue: {output_id}_b
    white: {output_id}_w
",
                ),
                outputs: [
                    ("r", red_pin.as_deref().unwrap_or("GPIO12")),
                    ("g", green_pin.as_deref().unwrap_or("GPIO13")),
                    ("b", blue_pin.as_deref().unwrap_or("GPIO14")),
                    ("w", white_pin.as_deref().unwrap_or("GPIO15")),
                ]
                .iter()
                .map(|(channel, pin)| channel_output(platform, &output_id, channel, pin))
                .collect(),
            },

            LightKind::Neopixel {
                pin,
                num_leds,
                chipset,
            } => {
                let chipset = chipset.unwrap_or_default();
                let num_leds = num_leds.unwrap_or(30);

                // The ESP8266 has no clockless LED peripheral, so it takes the
                // bit-banging neopixelbus driver; every other family uses
                // fastled_clockless.
                let light = if platform == ChipPlatform::Esp8266 {
                    format!(
                        "  - platform: neopixelbus
    name: \"{name}\"
    pin: {pin}
    num_leds: {num_leds}
    variant: {chipset}
",
                        chipset = chipset.as_str(),
                    )
                } else {
                    format!(
                        "  - platform: fastled_clockless
    name: \"{name}\"
    chipset: {chipset}
    pin: {pin}
    num_leds: {num_leds}
    rgb_order: GRB
",
                        chipset = chipset.as_str(),
                    )
                };

                LightBlocks {
                    light,
                    outputs: String::new(),
                }
            }
        }
    }
}

fn channel_output(platform: ChipPlatform, output_id: &str, channel: &str, pin: &str) -> String {
    format!(
        "  - platform: {pwm}
    id: {output_id}_{channel}
    pin: {pin}
",
        pwm = platform.pwm_output(),
    )
}
