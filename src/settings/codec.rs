//! JSON encoding of [`DeviceSettings`] for the settings file.
//!
//! Every section is `#[serde(default)]`, so a file written by an older
//! firmware that lacks some fields still decodes, with the missing fields
//! taking their compile-time defaults.

use heapless::String;

use super::DeviceSettings;
use crate::constants::SETTINGS_FILE_MAX;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The settings do not fit in the file buffer
    Encode,
    /// The file is not valid settings JSON. Values with escaped characters
    /// (quotes, backslashes, control characters) are not supported.
    Decode,
    /// The settings failed validation
    Invalid(super::Error),
}

pub fn encode(settings: &DeviceSettings) -> Result<String<SETTINGS_FILE_MAX>, Error> {
    serde_json_core::to_string::<_, SETTINGS_FILE_MAX>(settings).map_err(|_| Error::Encode)
}

/// Decodes a settings file and validates the result.
pub fn decode(input: &str) -> Result<DeviceSettings, Error> {
    let (settings, _) =
        serde_json_core::from_str::<DeviceSettings>(input).map_err(|_| Error::Decode)?;
    settings.validate().map_err(Error::Invalid)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ClockFormat, DisplayController, UnitSystem};
    use heapless::Vec;

    fn customised() -> DeviceSettings {
        let mut s = DeviceSettings::default();
        s.weather.api_key = String::try_from("0123456789abcdef").unwrap();
        s.weather.city_ids = Vec::from_slice(&[5304391, 2643743]).unwrap();
        s.weather.units = UnitSystem::Metric;
        s.weather.language = String::try_from("zh_cn").unwrap();
        s.web.password = String::try_from("pass word").unwrap();
        s.clock.utc_offset_hours = 5.5;
        s.clock.format = ClockFormat::TwentyFourHour;
        s.display.controller = DisplayController::Sh1106;
        s.display.i2c_address = 0x3D;
        s.ota.password = String::try_from("secret").unwrap();
        s.theme = String::try_from("deep-orange").unwrap();
        s
    }

    #[test]
    fn encode_then_decode_preserves_settings() {
        let original = customised();
        let encoded = encode(&original).unwrap();
        assert_eq!(decode(&encoded).unwrap(), original);
    }

    #[test]
    fn encoded_form_uses_readable_names() {
        let encoded = encode(&customised()).unwrap();
        assert!(encoded.contains("\"city_ids\":[5304391,2643743]"));
        assert!(encoded.contains("\"units\":\"metric\""));
        assert!(encoded.contains("\"format\":\"24h\""));
        assert!(encoded.contains("\"controller\":\"sh1106\""));
        assert!(encoded.contains("\"theme\":\"deep-orange\""));
    }

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(decode("{}").unwrap(), DeviceSettings::default());
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let s = decode(r#"{"weather":{"units":"metric"},"clock":{"refresh_interval_minutes":30}}"#)
            .unwrap();
        assert_eq!(s.weather.units, UnitSystem::Metric);
        assert_eq!(s.weather.city_ids.as_slice(), &[5304391]);
        assert_eq!(s.clock.refresh_interval_minutes, 30);
        assert_eq!(s.clock.utc_offset_hours, -6.0);
        assert_eq!(s.web, DeviceSettings::default().web);
    }

    #[test]
    fn malformed_files_are_rejected() {
        assert_eq!(decode(""), Err(Error::Decode));
        assert_eq!(decode("units=metric"), Err(Error::Decode));
        assert_eq!(decode(r#"{"weather":{"units":"kelvin"}}"#), Err(Error::Decode));
        assert_eq!(decode(r#"{"web":{"port":99999}}"#), Err(Error::Decode));
        assert_eq!(
            decode(r#"{"weather":{"city_ids":[1,2,3,4,5]}}"#),
            Err(Error::Decode)
        );
    }

    #[test]
    fn decoded_settings_are_validated() {
        assert_eq!(
            decode(r#"{"weather":{"language":"xx"}}"#),
            Err(Error::Invalid(crate::settings::Error::UnsupportedLanguage))
        );
        assert_eq!(
            decode(r#"{"clock":{"refresh_interval_minutes":0}}"#),
            Err(Error::Invalid(crate::settings::Error::ZeroRefreshInterval))
        );
    }
}
