//! Event categories of the sensor and news feeds

use crate::events::{
    CultureNewsEvent, NewsReport, PoliticalNewsEvent, SportsNewsEvent, TemperatureEvent,
    WaterLevelEvent,
};
use tidings_events::{EventCatalog, EventType};

pub static TEMPERATURE: EventType = EventType::concrete("temperature");
pub static WATER_LEVEL: EventType = EventType::concrete("water_level");

/// Every news item, whatever its section
pub static NEWS: EventType = EventType::category("news");
pub static SPORTS_NEWS: EventType = EventType::concrete("sports_news").extends(&NEWS);
pub static POLITICAL_NEWS: EventType = EventType::concrete("political_news").extends(&NEWS);
pub static CULTURE_NEWS: EventType = EventType::concrete("culture_news").extends(&NEWS);

/// Payload types of every feed event, for listener registration.
///
/// [`NewsReport`] stands for the abstract news category: a handler method taking
/// `&NewsReport` receives sports, political and culture news alike.
pub fn catalog() -> EventCatalog {
    EventCatalog::new()
        .with::<TemperatureEvent>(&TEMPERATURE)
        .with::<WaterLevelEvent>(&WATER_LEVEL)
        .with::<NewsReport>(&NEWS)
        .with::<SportsNewsEvent>(&SPORTS_NEWS)
        .with::<PoliticalNewsEvent>(&POLITICAL_NEWS)
        .with::<CultureNewsEvent>(&CULTURE_NEWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_hierarchy() {
        for section in [&SPORTS_NEWS, &POLITICAL_NEWS, &CULTURE_NEWS] {
            assert!(NEWS.matches(section));
            assert!(!section.matches(&NEWS));
        }
        assert!(!SPORTS_NEWS.matches(&POLITICAL_NEWS));
        assert!(NEWS.is_abstract());
    }

    #[test]
    fn test_sensor_types_are_flat() {
        assert_eq!(TEMPERATURE.depth(), 0);
        assert!(!TEMPERATURE.matches(&WATER_LEVEL));
        assert!(!NEWS.matches(&TEMPERATURE));
    }

    #[test]
    fn test_catalog_covers_every_feed_type() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.key_of::<NewsReport>(), Some(&NEWS));
        assert_eq!(catalog.key_of::<SportsNewsEvent>(), Some(&SPORTS_NEWS));
        assert_eq!(catalog.key_of::<TemperatureEvent>(), Some(&TEMPERATURE));
    }
}
