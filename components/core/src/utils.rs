use convert_case::Case;
use convert_case::Casing;

/// Effective component id: the explicit `id` when given, otherwise the
/// snake-cased display name.
pub fn format_id(id: &Option<String>, name: &str) -> String {
    id.clone().unwrap_or_else(|| name.to_case(Case::Snake))
}

/// Credential formatting rule: a secret reference must stay unquoted or the
/// firmware tooling reads it as a literal string instead of a lookup.
pub fn format_credential(value: &str) -> String {
    if value.starts_with("!secret ") {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_id_if_specified() {
        let id = Some("id".to_string());

        let result = format_id(&id, "name");
        assert_eq!(result, "id");
    }

    #[test]
    fn derive_id_from_name() {
        let result = format_id(&None, "name");
        assert_eq!(result, "name");
    }

    #[test]
    fn normalize_derived_id() {
        let result = format_id(&None, "Cool Sensor");
        assert_eq!(result, "cool_sensor");
    }

    #[test]
    fn secret_reference_stays_unquoted() {
        assert_eq!(format_credential("!secret wifi_ssid"), "!secret wifi_ssid");
    }

    #[test]
    fn literal_value_is_quoted() {
        assert_eq!(format_credential("MyNetwork"), "\"MyNetwork\"");
    }

    #[test]
    fn inner_quotes_are_escaped() {
        assert_eq!(format_credential("My \"Net\""), "\"My \\\"Net\\\"\"");
    }
}
