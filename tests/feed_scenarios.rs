//! Integration tests for the sensor and news feeds.
//!
//! These tests wire producers and consumers the way the demo does and check
//! what the consumers write.

#![cfg(feature = "feeds")]

use std::sync::Arc;
use tidings::feeds::kinds::{self, NEWS, POLITICAL_NEWS, SPORTS_NEWS, TEMPERATURE, WATER_LEVEL};
use tidings::feeds::{
    CultureNewsEvent, HumanSubscriber, MemorySink, NewsAgency, NewsCategory, NumericDisplay,
    PoliticalNewsEvent, SportsNewsEvent, TemperatureEvent, TemperatureSensor, TextDisplay,
    WaterLevelEvent, WaterLevelSensor,
};
use tidings::{CollectingDiagnostics, EventBus, Subscriber};

fn feed_bus() -> EventBus {
    EventBus::builder()
        .name("feeds")
        .enable_logging(false)
        .catalog(kinds::catalog())
        .build()
}

// =============================================================================
// Sensors
// =============================================================================

#[test]
fn test_displays_on_temperature_and_water_level() {
    let bus = feed_bus();
    let sink = Arc::new(MemorySink::new());
    let numeric: Arc<dyn Subscriber> =
        Arc::new(NumericDisplay::with_sink("Numeric Display", sink.clone()));
    let text: Arc<dyn Subscriber> = Arc::new(TextDisplay::with_sink("Text Display", sink.clone()));

    bus.subscribe(&TEMPERATURE, numeric.clone());
    bus.subscribe(&TEMPERATURE, text.clone());
    bus.subscribe(&WATER_LEVEL, numeric);
    bus.subscribe(&WATER_LEVEL, text);

    bus.publish(TemperatureEvent::new("tS1", 15));
    assert!(sink.contains("Text Display - Cold"));
    assert!(sink.contains("Numeric Display - Temperature: 15°C"));

    sink.clear();
    bus.publish(WaterLevelEvent::new("wS1", 50));
    assert_eq!(
        sink.lines(),
        vec![
            "Numeric Display - Water Level: 50",
            "Text Display - Run for your lives",
        ]
    );
}

#[test]
fn test_sensor_ticks_reach_every_display() {
    let bus = feed_bus();
    let sink = Arc::new(MemorySink::new());
    let text: Arc<dyn Subscriber> = Arc::new(TextDisplay::with_sink("Text Display", sink.clone()));
    bus.subscribe(&TEMPERATURE, text.clone());
    bus.subscribe(&WATER_LEVEL, text);

    let mut first = TemperatureSensor::with_seed("tS1", 1);
    let mut second = TemperatureSensor::with_seed("tS2", 2);
    let mut water = WaterLevelSensor::with_seed("wS1", 3);

    for _ in 0..5 {
        first.generate_temperature(&bus);
        second.generate_temperature(&bus);
        water.generate_water_level(&bus);
    }

    assert_eq!(sink.len(), 15);
    assert!(sink.lines().iter().all(|line| {
        ["Cold", "Warm", "All good", "Run for your lives"]
            .iter()
            .any(|label| line == &format!("Text Display - {label}"))
    }));
}

// =============================================================================
// News
// =============================================================================

#[test]
fn test_reader_on_news_category_gets_each_section_once() {
    let bus = feed_bus();
    let sink = Arc::new(MemorySink::new());
    bus.subscribe(&NEWS, Arc::new(HumanSubscriber::with_sink("ghita", sink.clone())));

    bus.publish(SportsNewsEvent::new("digi24", "Breaking news!"));
    bus.publish(PoliticalNewsEvent::new("proTV", "Big update!"));

    assert_eq!(
        sink.lines(),
        vec![
            "ghita received news from digi24: [Sports] Breaking news!",
            "ghita received news from proTV: [Political] Big update!",
        ]
    );
}

#[test]
fn test_reader_on_sections_only_gets_those_sections() {
    let bus = feed_bus();
    let sink = Arc::new(MemorySink::new());
    let vasile: Arc<dyn Subscriber> = Arc::new(HumanSubscriber::with_sink("vasile", sink.clone()));
    bus.subscribe(&POLITICAL_NEWS, vasile.clone());
    bus.subscribe(&SPORTS_NEWS, vasile);

    let mut pro_tv = NewsAgency::with_seed("proTV", 11);
    let mut digi24 = NewsAgency::with_seed("digi24", 12);
    for _ in 0..3 {
        pro_tv.publish_news(&bus, "political").unwrap();
        digi24.publish_news(&bus, "sports").unwrap();
    }
    bus.publish(CultureNewsEvent::new("digi24", "Shocking event!"));

    assert_eq!(sink.len(), 6);
    assert!(!sink.contains("[Cultural]"));
}

#[test]
fn test_registered_reader_uses_section_methods() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let bus = EventBus::builder()
        .enable_logging(false)
        .catalog(kinds::catalog())
        .diagnostics(diagnostics.clone())
        .build();
    let sink = Arc::new(MemorySink::new());

    let added = bus.register_object(Arc::new(HumanSubscriber::with_sink("Vasilica", sink.clone())));
    let agency = NewsAgency::new("ProTV");
    for category in NewsCategory::ALL {
        agency.publish_headline(&bus, category, "Important announcement!");
    }

    assert_eq!(added, 3);
    assert!(diagnostics.registration_errors().is_empty());
    assert_eq!(
        sink.lines(),
        vec![
            "Vasilica received sports news from ProTV: [Sports] Important announcement!",
            "Vasilica received political news from ProTV: [Political] Important announcement!",
            "Vasilica received culture news from ProTV: [Cultural] Important announcement!",
        ]
    );
}

#[test]
fn test_unknown_news_category_is_an_error() {
    let bus = feed_bus();
    let mut agency = NewsAgency::new("ProTV");

    let err = agency.publish_news(&bus, "weather").unwrap_err();
    assert_eq!(err.to_string(), "Unknown news category: weather");
}
