use crate::settings::{ClockFormat, DisplayController, UnitSystem};

/// First-boot defaults, generated from `cfg.toml` at build time.
pub struct Config {
    // Show the weather panel
    pub weather_enabled: bool,

    // OpenWeatherMap API key
    pub weather_api_key: &'static str,

    // OpenWeatherMap city IDs
    pub city_ids: &'static [u32],

    // Imperial or metric units
    pub units: UnitSystem,

    // Weather description language code
    pub weather_language: &'static str,

    // Web interface listen port
    pub webserver_port: u16,

    // Serve the web interface
    pub webserver_enabled: bool,

    // Require basic auth to change settings
    pub basic_auth: bool,

    // Web interface user
    pub web_username: &'static str,

    // Web interface password
    pub web_password: &'static str,

    // Hours from GMT, may be fractional
    pub utc_offset_hours: f32,

    // 12 or 24 hour clock
    pub clock_format: ClockFormat,

    // Minutes between sensor and weather refreshes
    pub refresh_interval_minutes: u16,

    // Show the clock when idle
    pub clock_enabled: bool,

    // Display controller I2C address
    pub display_i2c_address: u8,

    // Display I2C data pin
    pub sda_pin: u8,

    // Display I2C clock pin
    pub scl_pin: u8,

    // Flip the display (pins at top)
    pub display_inverted: bool,

    // Display controller variant
    pub display_controller: DisplayController,

    // Status LED pin
    pub led_pin: u8,

    // Alarm output pin
    pub alarm_pin: u8,

    // Alarm pulse length in milliseconds
    pub alarm_duration_ms: u32,

    // Accept firmware updates over the network
    pub ota_enabled: bool,

    // OTA password, empty for none
    pub ota_password: &'static str,

    // Web interface color theme
    pub theme: &'static str,
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));
