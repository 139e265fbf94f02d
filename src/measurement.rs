use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

use crate::constants::*;
use crate::sensors::{Sensor, SensorData};
use crate::state::DeviceState;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Sensor,
    Format,
}

/// The single writer of telemetry: runs the sensor and publishes the result.
pub struct Measurement<S> {
    sensor: S,
}

impl<S: Sensor> Measurement<S> {
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// Takes one reading, commits it to `state` and returns the log line.
    /// On error nothing is committed.
    pub async fn take<M: RawMutex>(
        &mut self,
        state: &DeviceState<M>,
    ) -> Result<String<LOG_LINE_MAX>, Error> {
        let (mut sample, mut scratch) = state.with_telemetry(|t| (t.latest, t.scratch));

        self.sensor
            .measure(&mut sample, &mut scratch)
            .await
            .map_err(|_| Error::Sensor)?;
        log::debug!("Sensor data received: {:?}", sample);

        let line = format_log_line(&sample.to_sensor_data()).map_err(|_| Error::Format)?;

        state.record(sample, scratch);
        log::info!("{}", line);
        Ok(line)
    }
}

fn format_log_line(sensor_data: &SensorData) -> Result<String<LOG_LINE_MAX>, core::fmt::Error> {
    use core::fmt::Write;
    let mut payload: String<LOG_LINE_MAX> = String::new();

    #[cfg(feature = "json")]
    {
        write!(payload, "{{\"version\": \"{}\"", VERSION)?;
        for (key, value) in sensor_data.data.iter() {
            write!(payload, ", \"{}\": {:.2}", key, value)?;
        }
        write!(payload, "}}")?;
    }

    #[cfg(all(feature = "influx", not(feature = "json")))]
    {
        write!(payload, "airquality,version={}", VERSION)?;
        let mut first = true;
        for (key, value) in sensor_data.data.iter() {
            if first {
                write!(payload, " {}={:.2}", key, value)?;
                first = false;
            } else {
                write!(payload, ",{}={:.2}", key, value)?;
            }
        }
    }

    Ok(payload)
}
