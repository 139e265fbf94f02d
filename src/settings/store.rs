use log::{info, warn};

use super::codec;
use super::DeviceSettings;
use crate::constants::SETTINGS_FILE_MAX;

/// Backing storage for the settings file (flash partition, SPIFFS file, ...).
pub trait SettingsStore {
    type Error: core::fmt::Debug;

    /// Reads the stored file into `buf`. Returns `Ok(None)` when nothing has
    /// been saved yet.
    fn read(&mut self, buf: &mut [u8]) -> Result<Option<usize>, Self::Error>;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    fn erase(&mut self) -> Result<(), Self::Error>;
}

#[derive(Debug, PartialEq)]
pub enum Error<E> {
    Store(E),
    Codec(codec::Error),
}

/// Loads the persisted settings, falling back to the compile-time defaults
/// when nothing usable is stored.
pub fn load<S: SettingsStore>(store: &mut S) -> DeviceSettings {
    let mut buf = [0u8; SETTINGS_FILE_MAX];

    let len = match store.read(&mut buf) {
        Ok(Some(len)) => len,
        Ok(None) => {
            info!("No saved settings, using defaults");
            return DeviceSettings::default();
        }
        Err(e) => {
            warn!("Failed to read settings: {:?}, using defaults", e);
            return DeviceSettings::default();
        }
    };

    let Some(bytes) = buf.get(..len) else {
        warn!("Settings store reported {} bytes, using defaults", len);
        return DeviceSettings::default();
    };

    let Ok(text) = core::str::from_utf8(bytes) else {
        warn!("Saved settings are not valid UTF-8, using defaults");
        return DeviceSettings::default();
    };

    match codec::decode(text) {
        Ok(settings) => {
            info!("Loaded saved settings");
            settings
        }
        Err(e) => {
            warn!("Saved settings rejected: {:?}, using defaults", e);
            DeviceSettings::default()
        }
    }
}

/// Writes `settings` to the store. Nothing is written unless [`load`] would
/// accept the file on the next boot.
pub fn save<S: SettingsStore>(store: &mut S, settings: &DeviceSettings) -> Result<(), Error<S::Error>> {
    settings
        .validate()
        .map_err(|e| Error::Codec(codec::Error::Invalid(e)))?;
    let encoded = codec::encode(settings).map_err(Error::Codec)?;
    if codec::decode(&encoded).map_err(Error::Codec)? != *settings {
        return Err(Error::Codec(codec::Error::Decode));
    }
    store.write(encoded.as_bytes()).map_err(Error::Store)?;
    info!("Settings saved ({} bytes)", encoded.len());
    Ok(())
}

/// Erases the saved settings and returns the defaults that now apply.
pub fn reset<S: SettingsStore>(store: &mut S) -> Result<DeviceSettings, Error<S::Error>> {
    store.erase().map_err(Error::Store)?;
    info!("Settings reset to defaults");
    Ok(DeviceSettings::default())
}
