use serde::Deserialize;

use crate::utils::format_id;

/// Both kinds read a plain GPIO level; `pir` only differs in what is wired to
/// the pin, so they share one emitted platform.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BinarySensorKind {
    Gpio,
    Pir,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BinarySensor {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BinarySensorKind,
    pub pin: String,
    pub inverted: Option<bool>,
    pub device_class: Option<String>,
}

impl BinarySensor {
    pub fn object_id(&self) -> String {
        format_id(&self.id, &self.name)
    }

    pub fn to_yaml(&self) -> String {
        let mut yaml = format!(
            "  - platform: gpio
    pin: {pin}
    name: \"{name}\"
    device_class: {device_class}
",
            pin = self.pin,
            name = self.name,
            device_class = self.device_class.as_deref().unwrap_or("motion"),
        );

        if self.inverted == Some(true) {
            yaml.push_str("    inverted: true\n");
        }

        yaml
    }
}
