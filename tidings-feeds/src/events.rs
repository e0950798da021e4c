//! Feed events
//!
//! Sensor readings are flat event types. News items share a [`NewsReport`]
//! payload and differ only in their section, which is their concrete type.

use crate::kinds::{CULTURE_NEWS, NEWS, POLITICAL_NEWS, SPORTS_NEWS, TEMPERATURE, WATER_LEVEL};
use std::any::Any;
use tidings_events::{Event, EventMetadata, EventType, EventTypeKey};

/// New reading from a temperature sensor
#[derive(Debug, Clone)]
pub struct TemperatureEvent {
    metadata: EventMetadata,
    sensor: String,
    temperature: i32,
}

impl TemperatureEvent {
    pub fn new(sensor: impl Into<String>, temperature: i32) -> Self {
        Self {
            metadata: EventMetadata::new(),
            sensor: sensor.into(),
            temperature,
        }
    }

    /// Id of the sensor that took the reading
    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    /// Degrees Celsius
    pub fn temperature(&self) -> i32 {
        self.temperature
    }
}

impl Event for TemperatureEvent {
    fn event_type(&self) -> EventTypeKey {
        &TEMPERATURE
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// New reading from a water-level sensor
#[derive(Debug, Clone)]
pub struct WaterLevelEvent {
    metadata: EventMetadata,
    sensor: String,
    level: i32,
}

impl WaterLevelEvent {
    pub fn new(sensor: impl Into<String>, level: i32) -> Self {
        Self {
            metadata: EventMetadata::new(),
            sensor: sensor.into(),
            level,
        }
    }

    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Event for WaterLevelEvent {
    fn event_type(&self) -> EventTypeKey {
        &WATER_LEVEL
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Data every news item carries
#[derive(Debug, Clone)]
pub struct NewsReport {
    metadata: EventMetadata,
    agency: String,
    content: String,
}

impl NewsReport {
    fn new(agency: &str, prefix: &str, headline: &str) -> Self {
        Self {
            metadata: EventMetadata::new(),
            agency: agency.to_string(),
            content: format!("{prefix} {headline}"),
        }
    }

    /// Name of the publishing agency
    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Headline with its section prefix, e.g. `[Sports] Breaking news!`
    pub fn content(&self) -> &str {
        &self.content
    }
}

macro_rules! news_event {
    ($(#[$doc:meta])* $name:ident, $kind:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name(NewsReport);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(agency: &str, headline: &str) -> Self {
                Self(NewsReport::new(agency, Self::PREFIX, headline))
            }

            pub fn report(&self) -> &NewsReport {
                &self.0
            }

            pub fn agency(&self) -> &str {
                self.0.agency()
            }

            pub fn content(&self) -> &str {
                self.0.content()
            }
        }

        impl Event for $name {
            fn event_type(&self) -> EventTypeKey {
                &$kind
            }

            fn metadata(&self) -> &EventMetadata {
                &self.0.metadata
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_ancestor(&self, category: &EventType) -> Option<&dyn Any> {
                (category == &NEWS).then_some(&self.0 as &dyn Any)
            }
        }
    };
}

news_event!(
    /// Sports section news
    SportsNewsEvent,
    SPORTS_NEWS,
    "[Sports]"
);
news_event!(
    /// Political section news
    PoliticalNewsEvent,
    POLITICAL_NEWS,
    "[Political]"
);
news_event!(
    /// Culture section news
    CultureNewsEvent,
    CULTURE_NEWS,
    "[Cultural]"
);
