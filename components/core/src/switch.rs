use serde::Deserialize;

use crate::utils::format_id;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwitchKind {
    Gpio,
    Relay,
}

/// Boot-time restore policy for the switch state.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum RestoreMode {
    #[serde(rename = "RESTORE_DEFAULT_OFF")]
    RestoreDefaultOff,
    #[serde(rename = "RESTORE_DEFAULT_ON")]
    RestoreDefaultOn,
    #[serde(rename = "ALWAYS_OFF")]
    AlwaysOff,
    #[serde(rename = "ALWAYS_ON")]
    AlwaysOn,
}

impl RestoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreMode::RestoreDefaultOff => "RESTORE_DEFAULT_OFF",
            RestoreMode::RestoreDefaultOn => "RESTORE_DEFAULT_ON",
            RestoreMode::AlwaysOff => "ALWAYS_OFF",
            RestoreMode::AlwaysOn => "ALWAYS_ON",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Switch {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SwitchKind,
    pub pin: String,
    pub inverted: Option<bool>,
    pub restore_mode: Option<RestoreMode>,
}

impl Switch {
    pub fn object_id(&self) -> String {
        format_id(&self.id, &self.name)
    }

    /// Optional lines are omitted entirely when unset, never written with a
    /// default value.
    pub fn to_yaml(&self) -> String {
        let mut yaml = format!(
            "  - platform: gpio
    pin: {pin}
    name: \"{name}\"
",
            pin = self.pin,
            name = self.name,
        );

        if let Some(restore_mode) = self.restore_mode {
            yaml.push_str(&format!("    restore_mode: {}\n", restore_mode.as_str()));
        }

        if self.inverted == Some(true) {
            yaml.push_str("    inverted: true\n");
        }

        yaml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch() -> Switch {
        Switch {
            id: Some("s1".to_string()),
            name: "Fan".to_string(),
            kind: SwitchKind::Relay,
            pin: "GPIO5".to_string(),
            inverted: None,
            restore_mode: None,
        }
    }

    #[test]
    fn minimal_switch_has_no_optional_lines() {
        let yaml = switch().to_yaml();

        assert!(yaml.contains("platform: gpio"));
        assert!(yaml.contains("pin: GPIO5"));
        assert!(yaml.contains("name: \"Fan\""));
        assert!(!yaml.contains("restore_mode"));
        assert!(!yaml.contains("inverted"));
    }

    #[test]
    fn restore_mode_is_emitted_when_set() {
        let mut sw = switch();
        sw.restore_mode = Some(RestoreMode::AlwaysOff);

        assert!(sw.to_yaml().contains("restore_mode: ALWAYS_OFF"));
    }

    #[test]
    fn inverted_false_is_never_written() {
        let mut sw = switch();
        sw.inverted = Some(false);

        assert!(!sw.to_yaml().contains("inverted"));
    }

    #[test]
    fn inverted_true_is_written() {
        let mut sw = switch();
        sw.inverted = Some(true);

        assert!(sw.to_yaml().contains("inverted: true"));
    }

    #[test]
    fn restore_mode_parses_firmware_spelling() {
        let sw: Switch = serde_yaml::from_str(
            "id: s1\nname: Fan\ntype: relay\npin: GPIO5\nrestore_mode: RESTORE_DEFAULT_ON\n",
        )
        .unwrap();

        assert_eq!(sw.restore_mode, Some(RestoreMode::RestoreDefaultOn));
    }
}
