#![allow(async_fn_in_trait)]

use heapless::FnvIndexMap;

use crate::telemetry::{DriverScratch, TelemetrySample};

#[derive(Debug, PartialEq, Eq)]
pub enum SensorError {
    MeasurementFailure,
}

#[derive(Default, Debug)]
pub struct SensorData {
    pub data: FnvIndexMap<&'static str, f32, 16>,
}

impl SensorData {
    pub fn add_measurement(&mut self, key: &'static str, value: f32) {
        self.data.insert(key, value).ok();
    }
}

/// A sensor driver filling in its part of a reading.
///
/// `sample` starts out as the previous reading, so a driver only touches the
/// fields it measures. `scratch` persists between cycles.
pub trait Sensor {
    async fn measure(
        &mut self,
        sample: &mut TelemetrySample,
        scratch: &mut DriverScratch,
    ) -> Result<(), SensorError>;
}
