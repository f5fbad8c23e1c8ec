use serde::Deserialize;

use crate::utils::format_id;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub enum DhtModel {
    #[serde(rename = "DHT11")]
    Dht11,
    #[default]
    #[serde(rename = "DHT22")]
    Dht22,
    #[serde(rename = "AM2302")]
    Am2302,
}

impl DhtModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DhtModel::Dht11 => "DHT11",
            DhtModel::Dht22 => "DHT22",
            DhtModel::Am2302 => "AM2302",
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Sensor {
    pub id: Option<String>,
    pub name: String,
    pub update_interval: Option<String>,

    #[serde(flatten)]
    pub kind: SensorKind,
}

/// Sensor platforms. `wifi_signal` and `uptime` are internal readings and take
/// no pin; everything else is wired to one.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorKind {
    Dht {
        pin: String,
        #[serde(default)]
        model: DhtModel,
    },
    Dallas {
        pin: String,
    },
    Bme280 {
        pin: String,
        address: Option<String>,
    },
    Bmp280 {
        pin: String,
        address: Option<String>,
    },
    Adc {
        pin: String,
        attenuation: Option<String>,
    },
    WifiSignal,
    Uptime,
}

impl Sensor {
    pub fn object_id(&self) -> String {
        format_id(&self.id, &self.name)
    }

    pub fn to_yaml(&self) -> String {
        let name = &self.name;
        let update_interval = self.update_interval.as_deref().unwrap_or("60s");

        match &self.kind {
            SensorKind::Dht { pin, model } => format!(
                "  - platform: dht
    pin: {pin}
    model: {model}
    temperature:
      name: \"{name} Temperature\"
    humidity:
      name: \"{name} Humidity\"
    update_interval: {update_interval}
",
                model = model.as_str(),
            ),

            SensorKind::Dallas { pin: _ } => format!(
                "  - platform: dallas
    address: 0x1234567890abcdef  # Replace with actual sensor address
    name: \"{name}\"
    update_interval: {update_interval}
",
            ),

            SensorKind::Bme280 { pin: _, address } => format!(
                "  - platform: bme280
    temperature:
      name: \"{name} Temperature\"
    pressure:
      name: \"{name} Pressure\"
    humidity:
      name: \"{name} Humidity\"
    address: {address}
    update_interval: {update_interval}
",
                address = address.as_deref().unwrap_or("0x76"),
            ),

            SensorKind::Bmp280 { pin: _, address } => format!(
                "  - platform: bmp280
    temperature:
      name: \"{name} Temperature\"
    pressure:
      name: \"{name} Pressure\"
    address: {address}
    update_interval: {update_interval}
",
                address = address.as_deref().unwrap_or("0x76"),
            ),

            SensorKind::Adc { pin, attenuation } => format!(
                "  - platform: adc
    pin: {pin}
    name: \"{name}\"
    update_interval: {update_interval}
    attenuation: {attenuation}
",
                attenuation = attenuation.as_deref().unwrap_or("auto"),
            ),

            SensorKind::WifiSignal => format!(
                "  - platform: wifi_signal
    name: \"{name}\"
    update_interval: {update_interval}
",
            ),

            SensorKind::Uptime => format!(
                "  - platform: uptime
    name: \"{name}\"
    update_interval: {update_interval}
",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(kind: SensorKind) -> Sensor {
        Sensor {
            id: Some("s1".to_string()),
            name: "Garage".to_string(),
            update_interval: None,
            kind,
        }
    }

    #[test]
    fn dht_has_both_readings_and_default_model() {
        let yaml = sensor(SensorKind::Dht {
            pin: "GPIO4".to_string(),
            model: DhtModel::default(),
        })
        .to_yaml();

        assert!(yaml.contains("platform: dht"));
        assert!(yaml.contains("model: DHT22"));
        assert!(yaml.contains("name: \"Garage Temperature\""));
        assert!(yaml.contains("name: \"Garage Humidity\""));
        assert!(yaml.contains("update_interval: 60s"));
    }

    #[test]
    fn dht_model_is_configurable() {
        let yaml = sensor(SensorKind::Dht {
            pin: "GPIO4".to_string(),
            model: DhtModel::Dht11,
        })
        .to_yaml();

        assert!(yaml.contains("model: DHT11"));
    }

    #[test]
    fn dallas_flags_placeholder_address() {
        let yaml = sensor(SensorKind::Dallas {
            pin: "GPIO4".to_string(),
        })
        .to_yaml();

        assert!(yaml.contains("address: 0x1234567890abcdef  # Replace with actual sensor address"));
    }

    #[test]
    fn bme280_defaults_address() {
        let yaml = sensor(SensorKind::Bme280 {
            pin: "GPIO21".to_string(),
            address: None,
        })
        .to_yaml();

        assert!(yaml.contains("address: 0x76"));
        assert!(yaml.contains("name: \"Garage Pressure\""));
        assert!(yaml.contains("name: \"Garage Humidity\""));
    }

    #[test]
    fn bmp280_has_no_humidity_reading() {
        let yaml = sensor(SensorKind::Bmp280 {
            pin: "GPIO21".to_string(),
            address: Some("0x77".to_string()),
        })
        .to_yaml();

        assert!(yaml.contains("address: 0x77"));
        assert!(!yaml.contains("humidity"));
    }

    #[test]
    fn adc_defaults_attenuation() {
        let yaml = sensor(SensorKind::Adc {
            pin: "GPIO34".to_string(),
            attenuation: None,
        })
        .to_yaml();

        assert!(yaml.contains("attenuation: auto"));
    }

    #[test]
    fn wifi_signal_and_uptime_take_no_pin() {
        let wifi = sensor(SensorKind::WifiSignal).to_yaml();
        let uptime = sensor(SensorKind::Uptime).to_yaml();

        assert!(!wifi.contains("pin"));
        assert!(!uptime.contains("pin"));
        assert!(wifi.contains("platform: wifi_signal"));
        assert!(uptime.contains("platform: uptime"));
    }

    #[test]
    fn update_interval_is_passed_through() {
        let mut s = sensor(SensorKind::Uptime);
        s.update_interval = Some("5min".to_string());

        assert!(s.to_yaml().contains("update_interval: 5min"));
    }

    #[test]
    fn kind_is_tagged_by_type_field() {
        let s: Sensor = serde_yaml::from_str(
            "id: s1\nname: Temp\ntype: dht\npin: GPIO4\nmodel: AM2302\n",
        )
        .unwrap();

        match s.kind {
            SensorKind::Dht { ref pin, model } => {
                assert_eq!(pin, "GPIO4");
                assert_eq!(model, DhtModel::Am2302);
            }
            _ => panic!("expected dht sensor"),
        }
    }
}
