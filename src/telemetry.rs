//! Latest sensor readings plus a short rolling history of particulate
//! measurements. This is not a time-series store.

use core::fmt;

use heapless::HistoryBuffer;

use crate::constants::*;
use crate::sensors::SensorData;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    BufferOverflow,
}

/// One SPS30 particulate matter measurement.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ParticulateMeasurement {
    /// Mass concentration PM1.0 [µg/m³]
    pub mc_1p0: f32,
    /// Mass concentration PM2.5 [µg/m³]
    pub mc_2p5: f32,
    /// Mass concentration PM4.0 [µg/m³]
    pub mc_4p0: f32,
    /// Mass concentration PM10 [µg/m³]
    pub mc_10p0: f32,
    /// Number concentration PM0.5 [#/cm³]
    pub nc_0p5: f32,
    /// Number concentration PM1.0 [#/cm³]
    pub nc_1p0: f32,
    /// Number concentration PM2.5 [#/cm³]
    pub nc_2p5: f32,
    /// Number concentration PM4.0 [#/cm³]
    pub nc_4p0: f32,
    /// Number concentration PM10 [#/cm³]
    pub nc_10p0: f32,
    /// Typical particle size [µm]
    pub typical_particle_size: f32,
}

/// A full reading from all sensors.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub pm: ParticulateMeasurement,
    pub temp_c: f32,
    pub relative_humidity: f32,
    pub tvoc: u16,
    pub co2eq: u16,
    pub volts: f32,
}

impl TelemetrySample {
    pub fn to_sensor_data(&self) -> SensorData {
        let mut data = SensorData::default();
        data.add_measurement("pm1_0", self.pm.mc_1p0);
        data.add_measurement("pm2_5", self.pm.mc_2p5);
        data.add_measurement("pm4_0", self.pm.mc_4p0);
        data.add_measurement("pm10", self.pm.mc_10p0);
        data.add_measurement("particle_size", self.pm.typical_particle_size);
        data.add_measurement("temperature", self.temp_c);
        data.add_measurement("humidity", self.relative_humidity);
        data.add_measurement("tvoc", f32::from(self.tvoc));
        data.add_measurement("co2eq", f32::from(self.co2eq));
        data.add_measurement("volts", self.volts);
        data
    }
}

/// Fixed-capacity ring of the most recent `N` values. `N` must be odd so the
/// window always has a middle element.
pub struct RollingWindow<T, const N: usize> {
    buf: HistoryBuffer<T, N>,
}

impl<T, const N: usize> RollingWindow<T, N> {
    const ODD_CAPACITY: () = assert!(N % 2 == 1, "rolling window capacity must be odd");

    pub fn new() -> Self {
        let () = Self::ODD_CAPACITY;
        Self {
            buf: HistoryBuffer::new(),
        }
    }

    /// Appends a value, overwriting the oldest once full.
    pub fn push(&mut self, value: T) {
        self.buf.write(value);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn latest(&self) -> Option<&T> {
        self.buf.recent()
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buf.oldest_ordered()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<T, const N: usize> Default for RollingWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RollingWindow<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub type ParticulateHistory = RollingWindow<ParticulateMeasurement, ROLLING_SAMPLES>;

/// Scratch storage owned by the sensor driver between cycles.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DriverScratch {
    pub result: u8,
    pub data: [u8; I2C_DATA_BUFFER_SIZE],
    pub tmp: u8,
    pub flt: [u8; FLOAT_BYTES],
    pub readings: [u16; RAW_READINGS],
    pub temp_raw: u16,
    pub humidity_raw: u16,
    /// Minute counter for VOC baseline housekeeping
    pub min_count: u16,
    pub baseline_initialized: bool,
}

impl DriverScratch {
    /// Copies `bytes` to the start of the I2C data buffer.
    pub fn fill_data(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.data
            .get_mut(..bytes.len())
            .ok_or(Error::BufferOverflow)?
            .copy_from_slice(bytes);
        Ok(())
    }

    pub fn fill_float_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.flt
            .get_mut(..bytes.len())
            .ok_or(Error::BufferOverflow)?
            .copy_from_slice(bytes);
        Ok(())
    }

    pub fn set_reading(&mut self, index: usize, value: u16) -> Result<(), Error> {
        *self.readings.get_mut(index).ok_or(Error::BufferOverflow)? = value;
        Ok(())
    }
}

/// Everything the sampling routine publishes.
#[derive(Debug, Default)]
pub struct Telemetry {
    pub latest: TelemetrySample,
    pub pm_history: ParticulateHistory,
    pub scratch: DriverScratch,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sample: TelemetrySample, scratch: DriverScratch) {
        self.latest = sample;
        self.pm_history.push(sample.pm);
        self.scratch = scratch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm(mc_2p5: f32) -> ParticulateMeasurement {
        ParticulateMeasurement {
            mc_2p5,
            ..Default::default()
        }
    }

    #[test]
    fn rolling_window_capacity_is_odd() {
        let window = ParticulateHistory::new();
        assert_eq!(window.capacity(), ROLLING_SAMPLES);
        assert_eq!(window.capacity() % 2, 1);
        assert!(window.is_empty());
    }

    #[test]
    fn rolling_window_never_exceeds_capacity() {
        let mut window: RollingWindow<u32, 5> = RollingWindow::new();
        for i in 0..12 {
            window.push(i);
            assert!(window.len() <= 5);
        }
        assert!(window.is_full());
        assert_eq!(window.latest(), Some(&11));
        let kept: std::vec::Vec<u32> = window.iter().copied().collect();
        assert_eq!(kept, [7, 8, 9, 10, 11]);
    }

    #[test]
    fn rolling_window_partial_fill_is_ordered() {
        let mut window: RollingWindow<u32, 3> = RollingWindow::new();
        window.push(1);
        window.push(2);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        let kept: std::vec::Vec<u32> = window.iter().copied().collect();
        assert_eq!(kept, [1, 2]);

        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.latest(), None);
    }

    #[test]
    fn record_updates_latest_and_history() {
        let mut telemetry = Telemetry::new();
        let mut scratch = DriverScratch::default();
        scratch.min_count = 3;

        for i in 0..7 {
            let sample = TelemetrySample {
                pm: pm(i as f32),
                temp_c: 20.0 + i as f32,
                ..Default::default()
            };
            telemetry.record(sample, scratch);
        }

        assert_eq!(telemetry.latest.temp_c, 26.0);
        assert_eq!(telemetry.pm_history.len(), ROLLING_SAMPLES);
        assert_eq!(telemetry.pm_history.iter().next().map(|m| m.mc_2p5), Some(2.0));
        assert_eq!(telemetry.scratch.min_count, 3);
    }

    #[test]
    fn scratch_writes_are_bounds_checked() {
        let mut scratch = DriverScratch::default();
        scratch.fill_data(&[1, 2, 3]).unwrap();
        assert_eq!(&scratch.data[..4], &[1, 2, 3, 0]);

        assert_eq!(scratch.fill_data(&[0; 11]), Err(Error::BufferOverflow));
        assert_eq!(scratch.fill_float_bytes(&1.5f32.to_le_bytes()), Ok(()));
        assert_eq!(scratch.fill_float_bytes(&[0; 5]), Err(Error::BufferOverflow));

        assert_eq!(scratch.set_reading(1, 400), Ok(()));
        assert_eq!(scratch.readings, [0, 400]);
        assert_eq!(scratch.set_reading(2, 1), Err(Error::BufferOverflow));
    }

    #[test]
    fn sensor_data_export() {
        let sample = TelemetrySample {
            pm: pm(12.5),
            temp_c: 21.0,
            relative_humidity: 40.0,
            tvoc: 15,
            co2eq: 410,
            volts: 3.3,
        };
        let data = sample.to_sensor_data();
        assert_eq!(data.data.len(), 10);
        assert_eq!(data.data.get("pm2_5"), Some(&12.5));
        assert_eq!(data.data.get("co2eq"), Some(&410.0));
    }
}
