//! Sensor producers
//!
//! A sensor draws a random reading, remembers it and publishes it. Readings
//! can also be reported directly, which is what the tests do.

use crate::events::{TemperatureEvent, WaterLevelEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tidings_events::EventBus;
use tracing::info;

/// Degrees Celsius a temperature sensor can read
pub const TEMPERATURE_RANGE: Range<i32> = 0..40;

/// Levels a water-level sensor can read
pub const WATER_LEVEL_RANGE: Range<i32> = 0..100;

/// Temperature sensor
#[derive(Debug)]
pub struct TemperatureSensor {
    id: String,
    temperature: i32,
    rng: StdRng,
}

impl TemperatureSensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_rng(id, StdRng::from_os_rng())
    }

    /// Sensor with reproducible readings
    pub fn with_seed(id: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: impl Into<String>, rng: StdRng) -> Self {
        Self {
            id: id.into(),
            temperature: 0,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last reading
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    /// Draw a reading without publishing it
    pub fn sample(&mut self) -> i32 {
        self.rng.random_range(TEMPERATURE_RANGE)
    }

    /// Take a new reading and publish it
    pub fn generate_temperature(&mut self, bus: &EventBus) -> i32 {
        let temperature = self.sample();
        self.report(bus, temperature);
        temperature
    }

    /// Publish `temperature` as this sensor's reading
    pub fn report(&mut self, bus: &EventBus, temperature: i32) {
        self.temperature = temperature;
        info!(sensor = %self.id, temperature, "New temperature");
        bus.publish(TemperatureEvent::new(self.id.clone(), temperature));
    }
}

/// Water-level sensor
#[derive(Debug)]
pub struct WaterLevelSensor {
    id: String,
    level: i32,
    rng: StdRng,
}

impl WaterLevelSensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_rng(id, StdRng::from_os_rng())
    }

    pub fn with_seed(id: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: impl Into<String>, rng: StdRng) -> Self {
        Self {
            id: id.into(),
            level: 0,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn sample(&mut self) -> i32 {
        self.rng.random_range(WATER_LEVEL_RANGE)
    }

    /// Take a new reading and publish it
    pub fn generate_water_level(&mut self, bus: &EventBus) -> i32 {
        let level = self.sample();
        self.report(bus, level);
        level
    }

    pub fn report(&mut self, bus: &EventBus, level: i32) {
        self.level = level;
        info!(sensor = %self.id, level, "New water level");
        bus.publish(WaterLevelEvent::new(self.id.clone(), level));
    }
}
