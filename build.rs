use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

#[derive(Deserialize)]
struct RawConfig {
    weather_enabled: bool,
    weather_api_key: String,
    city_ids: Vec<u32>,
    units: String,
    weather_language: String,
    webserver_port: u16,
    webserver_enabled: bool,
    basic_auth: bool,
    web_username: String,
    web_password: String,
    utc_offset_hours: f32,
    clock_24h: bool,
    refresh_interval_minutes: u16,
    clock_enabled: bool,
    display_i2c_address: u8,
    sda_pin: u8,
    scl_pin: u8,
    display_inverted: bool,
    display_controller: String,
    led_pin: u8,
    alarm_pin: u8,
    alarm_duration_ms: u32,
    ota_enabled: bool,
    ota_password: String,
    theme: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed=cfg.toml");

    // Read and parse
    let toml_str = fs::read_to_string("cfg.toml")?;
    let raw: RawConfig = toml::from_str(&toml_str)?;

    if raw.city_ids.is_empty() {
        return Err("cfg.toml: city_ids needs at least one city".into());
    }

    let units = match raw.units.as_str() {
        "imperial" => "UnitSystem::Imperial",
        "metric" => "UnitSystem::Metric",
        other => return Err(format!("cfg.toml: unknown units {other:?}").into()),
    };

    let controller = match raw.display_controller.as_str() {
        "ssd1306" => "DisplayController::Ssd1306",
        "sh1106" => "DisplayController::Sh1106",
        other => return Err(format!("cfg.toml: unknown display_controller {other:?}").into()),
    };

    let clock_format = if raw.clock_24h {
        "ClockFormat::TwentyFourHour"
    } else {
        "ClockFormat::TwelveHour"
    };

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            weather_enabled: {we},
            weather_api_key: {key:?},
            city_ids: &{cities:?},
            units: {units},
            weather_language: {lang:?},
            webserver_port: {port},
            webserver_enabled: {wse},
            basic_auth: {auth},
            web_username: {user:?},
            web_password: {pass:?},
            utc_offset_hours: {utc:?},
            clock_format: {clock_format},
            refresh_interval_minutes: {refresh},
            clock_enabled: {ce},
            display_i2c_address: {addr:#04x},
            sda_pin: {sda},
            scl_pin: {scl},
            display_inverted: {inv},
            display_controller: {controller},
            led_pin: {led},
            alarm_pin: {alarm},
            alarm_duration_ms: {alarm_ms},
            ota_enabled: {ota},
            ota_password: {ota_pass:?},
            theme: {theme:?},
        }};
    "#,
        we = raw.weather_enabled,
        key = raw.weather_api_key,
        cities = raw.city_ids,
        lang = raw.weather_language,
        port = raw.webserver_port,
        wse = raw.webserver_enabled,
        auth = raw.basic_auth,
        user = raw.web_username,
        pass = raw.web_password,
        utc = raw.utc_offset_hours,
        refresh = raw.refresh_interval_minutes,
        ce = raw.clock_enabled,
        addr = raw.display_i2c_address,
        sda = raw.sda_pin,
        scl = raw.scl_pin,
        inv = raw.display_inverted,
        led = raw.led_pin,
        alarm = raw.alarm_pin,
        alarm_ms = raw.alarm_duration_ms,
        ota = raw.ota_enabled,
        ota_pass = raw.ota_password,
        theme = raw.theme,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");

    fs::write(dest_path, code)?;
    Ok(())
}
