//! Device settings.
//!
//! The whole block is built from the compile-time [`CONFIG`] on first boot and
//! replaced as a unit whenever the web interface saves new values.

use embassy_time::Duration;
use heapless::{String, Vec};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::constants::*;

pub mod codec;
pub mod store;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    NoCityIds,
    UnsupportedLanguage,
    ZeroRefreshInterval,
    UtcOffsetOutOfRange,
    InvalidTheme,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Converts a Celsius reading to the unit shown on screen.
    pub fn temperature(self, celsius: f32) -> f32 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ClockFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayController {
    Ssd1306,
    Sh1106,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub enabled: bool,
    pub api_key: String<API_KEY_MAX>,
    pub city_ids: Vec<u32, MAX_CITY_IDS>,
    pub units: UnitSystem,
    pub language: String<LANGUAGE_MAX>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebServerSettings {
    pub port: u16,
    pub enabled: bool,
    pub basic_auth: bool,
    pub username: String<CREDENTIAL_MAX>,
    pub password: String<CREDENTIAL_MAX>,
}

impl WebServerSettings {
    pub fn requires_auth(&self) -> bool {
        self.enabled && self.basic_auth
    }

    /// Checks a username/password pair; always passes when basic auth is off.
    pub fn authorize(&self, username: &str, password: &str) -> bool {
        !self.basic_auth || (self.username == username && self.password == password)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub utc_offset_hours: f32,
    pub format: ClockFormat,
    pub refresh_interval_minutes: u16,
    pub enabled: bool,
}

impl ClockSettings {
    pub fn utc_offset_seconds(&self) -> i32 {
        (self.utc_offset_hours * 3600.0) as i32
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval_minutes) * 60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub i2c_address: u8,
    pub sda_pin: u8,
    pub scl_pin: u8,
    pub inverted: bool,
    pub controller: DisplayController,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub led_pin: u8,
    pub alarm_pin: u8,
    pub alarm_duration_ms: u32,
}

impl IndicatorSettings {
    pub fn alarm_pulse(&self) -> Duration {
        Duration::from_millis(u64::from(self.alarm_duration_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtaSettings {
    pub enabled: bool,
    pub password: String<CREDENTIAL_MAX>,
}

impl OtaSettings {
    /// The OTA password, or `None` when updates are not password protected.
    pub fn password(&self) -> Option<&str> {
        if self.password.is_empty() {
            None
        } else {
            Some(self.password.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    pub weather: WeatherSettings,
    pub web: WebServerSettings,
    pub clock: ClockSettings,
    pub display: DisplaySettings,
    pub indicator: IndicatorSettings,
    pub ota: OtaSettings,
    pub theme: String<THEME_MAX>,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        let mut city_ids = Vec::new();
        for id in CONFIG.city_ids {
            if city_ids.push(*id).is_err() {
                warn!("Only the first {} city ids are used", MAX_CITY_IDS);
                break;
            }
        }

        Self {
            enabled: CONFIG.weather_enabled,
            api_key: truncated(CONFIG.weather_api_key),
            city_ids,
            units: CONFIG.units,
            language: truncated(CONFIG.weather_language),
        }
    }
}

impl Default for WebServerSettings {
    fn default() -> Self {
        Self {
            port: CONFIG.webserver_port,
            enabled: CONFIG.webserver_enabled,
            basic_auth: CONFIG.basic_auth,
            username: truncated(CONFIG.web_username),
            password: truncated(CONFIG.web_password),
        }
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: CONFIG.utc_offset_hours,
            format: CONFIG.clock_format,
            refresh_interval_minutes: CONFIG.refresh_interval_minutes,
            enabled: CONFIG.clock_enabled,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            i2c_address: CONFIG.display_i2c_address,
            sda_pin: CONFIG.sda_pin,
            scl_pin: CONFIG.scl_pin,
            inverted: CONFIG.display_inverted,
            controller: CONFIG.display_controller,
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            led_pin: CONFIG.led_pin,
            alarm_pin: CONFIG.alarm_pin,
            alarm_duration_ms: CONFIG.alarm_duration_ms,
        }
    }
}

impl Default for OtaSettings {
    fn default() -> Self {
        Self {
            enabled: CONFIG.ota_enabled,
            password: truncated(CONFIG.ota_password),
        }
    }
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            weather: WeatherSettings::default(),
            web: WebServerSettings::default(),
            clock: ClockSettings::default(),
            display: DisplaySettings::default(),
            indicator: IndicatorSettings::default(),
            ota: OtaSettings::default(),
            theme: truncated(CONFIG.theme),
        }
    }
}

impl DeviceSettings {
    pub fn validate(&self) -> Result<(), Error> {
        if self.weather.city_ids.is_empty() {
            return Err(Error::NoCityIds);
        }

        if !SUPPORTED_LANGUAGES.contains(&self.weather.language.as_str()) {
            return Err(Error::UnsupportedLanguage);
        }

        if self.clock.refresh_interval_minutes == 0 {
            return Err(Error::ZeroRefreshInterval);
        }

        // NaN fails both comparisons
        let offset = self.clock.utc_offset_hours;
        if !(UTC_OFFSET_MIN_HOURS..=UTC_OFFSET_MAX_HOURS).contains(&offset) {
            return Err(Error::UtcOffsetOutOfRange);
        }

        let theme_ok = !self.theme.is_empty()
            && self
                .theme
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if !theme_ok {
            return Err(Error::InvalidTheme);
        }

        Ok(())
    }
}

// Copies as much of `s` as fits, on a char boundary.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            warn!("Default value truncated to {} bytes", N);
            break;
        }
    }
    out
}
