/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SECS_IN_DAY: u32 = 60 * 60 * 24;
pub const DAYS_IN_WEEK: u32 = 7;
pub const DAYS_IN_YEAR: u32 = 365;

/// Number of particulate measurements kept for smoothing (must be odd)
pub const ROLLING_SAMPLES: usize = 5;

/// Size of the I2C transfer buffer used by the sensor driver
pub const I2C_DATA_BUFFER_SIZE: usize = 10;
/// Raw bytes of a single float, as stored in EEPROM
pub const FLOAT_BYTES: usize = 4;
/// Number of raw 16-bit words read per gas sensor measurement
pub const RAW_READINGS: usize = 2;

/// Maximum number of weather locations
pub const MAX_CITY_IDS: usize = 4;
/// Capacity of the weather API key
pub const API_KEY_MAX: usize = 64;
/// Capacity of a language code (e.g. "zh_cn")
pub const LANGUAGE_MAX: usize = 8;
/// Capacity of web and OTA credentials
pub const CREDENTIAL_MAX: usize = 32;
/// Capacity of the theme identifier
pub const THEME_MAX: usize = 24;

/// Buffer size for the encoded settings file
pub const SETTINGS_FILE_MAX: usize = 1536;
/// Buffer size for a single formatted log line
pub const LOG_LINE_MAX: usize = 256;

/// Accepted UTC offset range in hours
pub const UTC_OFFSET_MIN_HOURS: f32 = -12.0;
pub const UTC_OFFSET_MAX_HOURS: f32 = 14.0;

/// Languages understood by the weather API
pub const SUPPORTED_LANGUAGES: [&str; 33] = [
    "ar", "bg", "ca", "cz", "de", "el", "en", "fa", "fi", "fr", "gl", "hr", "hu", "it", "ja",
    "kr", "la", "lt", "mk", "nl", "pl", "pt", "ro", "ru", "se", "sk", "sl", "es", "tr", "ua",
    "vi", "zh_cn", "zh_tw",
];
