//! Shared device state.
//!
//! Settings and telemetry live in two independent blocking mutexes so the
//! sampling task, the display and the web interface can share them by
//! reference. With a single embassy executor `NoopRawMutex` is enough; use
//! `CriticalSectionRawMutex` when interrupts touch the state. Guards are
//! closures, so nothing is ever held across an `.await`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embassy_sync::signal::Signal;
use log::info;

use crate::settings::DeviceSettings;
use crate::telemetry::{DriverScratch, Telemetry, TelemetrySample};

pub struct DeviceState<M: RawMutex> {
    settings: Mutex<M, RefCell<DeviceSettings>>,
    telemetry: Mutex<M, RefCell<Telemetry>>,
    settings_changed: Signal<M, ()>,
}

impl<M: RawMutex> DeviceState<M> {
    pub fn new(settings: DeviceSettings) -> Self {
        Self {
            settings: Mutex::new(RefCell::new(settings)),
            telemetry: Mutex::new(RefCell::new(Telemetry::new())),
            settings_changed: Signal::new(),
        }
    }

    /// A copy of the current settings block.
    pub fn settings(&self) -> DeviceSettings {
        self.with_settings(DeviceSettings::clone)
    }

    pub fn with_settings<R>(&self, f: impl FnOnce(&DeviceSettings) -> R) -> R {
        self.settings.lock(|settings| f(&settings.borrow()))
    }

    /// Swaps in a whole new settings block and wakes anyone waiting on
    /// [`Self::settings_changed`]. Returns the previous block.
    pub fn replace_settings(&self, settings: DeviceSettings) -> DeviceSettings {
        let previous = self.settings.lock(|current| current.replace(settings));
        self.settings_changed.signal(());
        info!("Settings replaced");
        previous
    }

    pub async fn settings_changed(&self) {
        self.settings_changed.wait().await
    }

    /// The latest reading.
    pub fn telemetry(&self) -> TelemetrySample {
        self.with_telemetry(|telemetry| telemetry.latest)
    }

    pub fn scratch(&self) -> DriverScratch {
        self.with_telemetry(|telemetry| telemetry.scratch)
    }

    pub fn with_telemetry<R>(&self, f: impl FnOnce(&Telemetry) -> R) -> R {
        self.telemetry.lock(|telemetry| f(&telemetry.borrow()))
    }

    pub fn record(&self, sample: TelemetrySample, scratch: DriverScratch) {
        self.telemetry
            .lock(|telemetry| telemetry.borrow_mut().record(sample, scratch));
    }
}
