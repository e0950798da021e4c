//! Consumers
//!
//! Every consumer can be wired either way: subscribed explicitly under the
//! keys it cares about ([`Subscriber`]), or registered as a whole and bound
//! through its handler methods ([`Listener`]).

use crate::events::{
    CultureNewsEvent, NewsReport, PoliticalNewsEvent, SportsNewsEvent, TemperatureEvent,
    WaterLevelEvent,
};
use crate::sink::{Sink, StdoutSink};
use std::sync::Arc;
use tidings_events::{Event, HandlerMethod, HandlerResult, Listener, Subscriber};

/// Below this many degrees it is cold
pub const COLD_BELOW: i32 = 20;

/// Below this water level all is well
pub const SAFE_WATER_BELOW: i32 = 36;

pub fn temperature_label(temperature: i32) -> &'static str {
    if temperature < COLD_BELOW { "Cold" } else { "Warm" }
}

pub fn water_level_label(level: i32) -> &'static str {
    if level < SAFE_WATER_BELOW {
        "All good"
    } else {
        "Run for your lives"
    }
}

/// Shows readings as numbers
pub struct NumericDisplay {
    name: String,
    sink: Arc<dyn Sink>,
}

impl NumericDisplay {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, Arc::new(StdoutSink))
    }

    pub fn with_sink(name: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn show_temperature(&self, event: &TemperatureEvent) -> HandlerResult {
        self.sink
            .line(&format!("{} - Temperature: {}°C", self.name, event.temperature()));
        Ok(())
    }

    pub fn show_water_level(&self, event: &WaterLevelEvent) -> HandlerResult {
        self.sink
            .line(&format!("{} - Water Level: {}", self.name, event.level()));
        Ok(())
    }
}

impl Subscriber for NumericDisplay {
    fn inform(&self, event: &dyn Event) -> HandlerResult {
        if let Some(temperature) = event.downcast_ref::<TemperatureEvent>() {
            self.show_temperature(temperature)?;
        }
        if let Some(level) = event.downcast_ref::<WaterLevelEvent>() {
            self.show_water_level(level)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listener for NumericDisplay {
    fn handler_methods(&self) -> Vec<HandlerMethod<Self>> {
        vec![
            HandlerMethod::unary("show_temperature", Self::show_temperature),
            HandlerMethod::unary("show_water_level", Self::show_water_level),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Shows readings as words
pub struct TextDisplay {
    name: String,
    sink: Arc<dyn Sink>,
}

impl TextDisplay {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, Arc::new(StdoutSink))
    }

    pub fn with_sink(name: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn describe_temperature(&self, event: &TemperatureEvent) -> HandlerResult {
        self.sink.line(&format!(
            "{} - {}",
            self.name,
            temperature_label(event.temperature())
        ));
        Ok(())
    }

    pub fn describe_water_level(&self, event: &WaterLevelEvent) -> HandlerResult {
        self.sink
            .line(&format!("{} - {}", self.name, water_level_label(event.level())));
        Ok(())
    }
}

impl Subscriber for TextDisplay {
    fn inform(&self, event: &dyn Event) -> HandlerResult {
        if let Some(temperature) = event.downcast_ref::<TemperatureEvent>() {
            self.describe_temperature(temperature)?;
        }
        if let Some(level) = event.downcast_ref::<WaterLevelEvent>() {
            self.describe_water_level(level)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listener for TextDisplay {
    fn handler_methods(&self) -> Vec<HandlerMethod<Self>> {
        vec![
            HandlerMethod::unary("describe_water_level", Self::describe_water_level),
            HandlerMethod::unary("describe_temperature", Self::describe_temperature),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A person reading the news
///
/// Subscribed explicitly, it reads any news item it is informed of. Registered
/// as a listener, it has one method per section.
pub struct HumanSubscriber {
    name: String,
    sink: Arc<dyn Sink>,
}

impl HumanSubscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_sink(name, Arc::new(StdoutSink))
    }

    pub fn with_sink(name: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.into(),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self, report: &NewsReport) -> HandlerResult {
        self.sink.line(&format!(
            "{} received news from {}: {}",
            self.name,
            report.agency(),
            report.content()
        ));
        Ok(())
    }

    pub fn read_sports(&self, event: &SportsNewsEvent) -> HandlerResult {
        self.read_section("sports", event.report())
    }

    pub fn read_political(&self, event: &PoliticalNewsEvent) -> HandlerResult {
        self.read_section("political", event.report())
    }

    pub fn read_culture(&self, event: &CultureNewsEvent) -> HandlerResult {
        self.read_section("culture", event.report())
    }

    fn read_section(&self, section: &str, report: &NewsReport) -> HandlerResult {
        self.sink.line(&format!(
            "{} received {section} news from {}: {}",
            self.name,
            report.agency(),
            report.content()
        ));
        Ok(())
    }
}

impl Subscriber for HumanSubscriber {
    fn inform(&self, event: &dyn Event) -> HandlerResult {
        match event.downcast_ref::<NewsReport>() {
            Some(report) => self.read(report),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listener for HumanSubscriber {
    fn handler_methods(&self) -> Vec<HandlerMethod<Self>> {
        vec![
            HandlerMethod::unary("read_sports", Self::read_sports),
            HandlerMethod::unary("read_political", Self::read_political),
            HandlerMethod::unary("read_culture", Self::read_culture),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
