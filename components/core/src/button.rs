use serde::Deserialize;

use crate::utils::format_id;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Gpio,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Button {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    pub pin: String,
}

impl Button {
    pub fn object_id(&self) -> String {
        format_id(&self.id, &self.name)
    }

    pub fn to_yaml(&self) -> String {
        format!(
            "  - platform: gpio
    pin:
      number: {pin}
      mode:
        input: true
        pullup: true
      inverted: true
    name: \"{name}\"
",
            pin = self.pin,
            name = self.name,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_pulled_up_inverted_input() {
        let yaml = Button {
            id: None,
            name: "Restart".to_string(),
            kind: ButtonKind::Gpio,
            pin: "GPIO0".to_string(),
        }
        .to_yaml();

        assert!(yaml.contains("number: GPIO0"));
        assert!(yaml.contains("pullup: true"));
        assert!(yaml.contains("inverted: true"));
        assert!(yaml.contains("name: \"Restart\""));
    }
}
