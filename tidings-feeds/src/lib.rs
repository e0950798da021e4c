//! Sensor and news feeds on the tidings event bus
//!
//! Temperature and water-level sensors and news agencies publish events;
//! displays and human readers consume them. News has an abstract `NEWS`
//! category above its sports, political and culture sections, so a reader
//! subscribed to `NEWS` gets every section.
//!
//! ```rust
//! use std::sync::Arc;
//! use tidings_events::{EventBus, Subscriber};
//! use tidings_feeds::{kinds, HumanSubscriber, MemorySink, NewsAgency, NewsCategory};
//!
//! let bus = EventBus::builder().catalog(kinds::catalog()).build();
//! let sink = Arc::new(MemorySink::new());
//! let reader: Arc<dyn Subscriber> = Arc::new(HumanSubscriber::with_sink("ghita", sink.clone()));
//! bus.subscribe(&kinds::NEWS, reader);
//!
//! NewsAgency::new("Digi24").publish_headline(&bus, NewsCategory::Sports, "Breaking news!");
//!
//! assert_eq!(sink.lines(), vec!["ghita received news from Digi24: [Sports] Breaking news!"]);
//! ```

pub mod displays;
pub mod error;
pub mod events;
pub mod kinds;
pub mod news;
pub mod sensors;
pub mod sink;

pub use displays::{
    HumanSubscriber, NumericDisplay, TextDisplay, temperature_label, water_level_label,
};
pub use error::FeedError;
pub use events::{
    CultureNewsEvent, NewsReport, PoliticalNewsEvent, SportsNewsEvent, TemperatureEvent,
    WaterLevelEvent,
};
pub use news::{HEADLINES, NewsAgency, NewsCategory};
pub use sensors::{TemperatureSensor, WaterLevelSensor};
pub use sink::{MemorySink, Sink, StdoutSink};
