//! News agency producer

use crate::error::{FeedError, Result};
use crate::events::{CultureNewsEvent, PoliticalNewsEvent, SportsNewsEvent};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;
use tidings_events::EventBus;
use tracing::info;

/// Headlines an agency picks from
pub const HEADLINES: [&str; 4] = [
    "Breaking news!",
    "Big update!",
    "Shocking event!",
    "Important announcement!",
];

/// Section a news item is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewsCategory {
    Sports,
    Political,
    Culture,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 3] = [Self::Sports, Self::Political, Self::Culture];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sports => "SPORTS",
            Self::Political => "POLITICAL",
            Self::Culture => "CULTURE",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sports" | "sport" => Ok(Self::Sports),
            "political" | "politics" => Ok(Self::Political),
            "culture" | "cultural" => Ok(Self::Culture),
            _ => Err(FeedError::UnknownCategory(s.to_string())),
        }
    }
}

/// Publishes news items in any section
#[derive(Debug)]
pub struct NewsAgency {
    name: String,
    rng: StdRng,
}

impl NewsAgency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish a random headline in `category` and return the published content
    ///
    /// # Errors
    ///
    /// [`FeedError::UnknownCategory`] if `category` names no section; nothing
    /// is published then.
    pub fn publish_news(&mut self, bus: &EventBus, category: &str) -> Result<String> {
        let category = category.parse::<NewsCategory>()?;
        let headline = HEADLINES.choose(&mut self.rng).copied().unwrap_or(HEADLINES[0]);
        Ok(self.publish_headline(bus, category, headline))
    }

    /// Publish `headline` in `category` and return the published content
    pub fn publish_headline(
        &self,
        bus: &EventBus,
        category: NewsCategory,
        headline: &str,
    ) -> String {
        let content = match category {
            NewsCategory::Sports => {
                let event = SportsNewsEvent::new(&self.name, headline);
                let content = event.content().to_string();
                bus.publish(event);
                content
            }
            NewsCategory::Political => {
                let event = PoliticalNewsEvent::new(&self.name, headline);
                let content = event.content().to_string();
                bus.publish(event);
                content
            }
            NewsCategory::Culture => {
                let event = CultureNewsEvent::new(&self.name, headline);
                let content = event.content().to_string();
                bus.publish(event);
                content
            }
        };

        info!(agency = %self.name, category = %category, content = %content, "Published news");
        content
    }
}
