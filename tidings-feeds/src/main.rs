//! tidings demo - sensors and news agencies publishing to displays and readers.
//!
//! Two wirings are shown:
//!
//! - `basic`: consumers are subscribed explicitly under the keys they want
//! - `reflected`: consumers are registered whole and bound through their
//!   handler methods, next to two plain callbacks

use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::time::Duration;
use tidings_events::{EventBus, EventBusConfig, HandlerResult, Subscriber};
use tidings_feeds::{
    CultureNewsEvent, HumanSubscriber, NewsAgency, NumericDisplay, PoliticalNewsEvent, Sink,
    SportsNewsEvent, StdoutSink, TemperatureEvent, TemperatureSensor, TextDisplay,
    WaterLevelEvent, WaterLevelSensor, kinds,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "tidings-demo")]
#[command(version)]
#[command(about = "Publish sensor readings and news through the tidings event bus")]
struct Cli {
    /// Which wiring to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Sensor rounds per run
    #[arg(short, long, default_value_t = 5)]
    ticks: u32,

    /// Pause between rounds
    #[arg(short, long, default_value_t = 100)]
    interval_ms: u64,

    /// Seed for reproducible readings and headlines
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Basic,
    Reflected,
    Both,
}

/// Builds producers, seeded one after another when a seed is given
struct Producers {
    seed: Option<u64>,
}

impl Producers {
    fn next_seed(&mut self) -> Option<u64> {
        let seed = self.seed?;
        self.seed = Some(seed.wrapping_add(1));
        Some(seed)
    }

    fn temperature(&mut self, id: &str) -> TemperatureSensor {
        match self.next_seed() {
            Some(seed) => TemperatureSensor::with_seed(id, seed),
            None => TemperatureSensor::new(id),
        }
    }

    fn water_level(&mut self, id: &str) -> WaterLevelSensor {
        match self.next_seed() {
            Some(seed) => WaterLevelSensor::with_seed(id, seed),
            None => WaterLevelSensor::new(id),
        }
    }

    fn agency(&mut self, name: &str) -> NewsAgency {
        match self.next_seed() {
            Some(seed) => NewsAgency::with_seed(name, seed),
            None => NewsAgency::new(name),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = EventBusConfig::from_env()?;
    let interval = Duration::from_millis(cli.interval_ms);
    let mut producers = Producers { seed: cli.seed };
    let out: Arc<dyn Sink> = Arc::new(StdoutSink);

    info!(bus = %config.name, ticks = cli.ticks, "Starting demo");

    if matches!(cli.mode, Mode::Basic | Mode::Both) {
        run_basic(config.clone(), &cli, interval, &mut producers, &out).await?;
    }
    if matches!(cli.mode, Mode::Reflected | Mode::Both) {
        run_reflected(config, &cli, interval, &mut producers, &out).await?;
    }

    Ok(())
}

async fn run_basic(
    config: EventBusConfig,
    cli: &Cli,
    interval: Duration,
    producers: &mut Producers,
    out: &Arc<dyn Sink>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running explicit subscriptions");
    let bus = EventBus::builder()
        .config(config)
        .catalog(kinds::catalog())
        .build();

    let numeric: Arc<dyn Subscriber> =
        Arc::new(NumericDisplay::with_sink("Numeric Display", out.clone()));
    let text: Arc<dyn Subscriber> = Arc::new(TextDisplay::with_sink("Text Display", out.clone()));
    let ghita: Arc<dyn Subscriber> = Arc::new(HumanSubscriber::with_sink("ghita", out.clone()));
    let vasile: Arc<dyn Subscriber> = Arc::new(HumanSubscriber::with_sink("vasile", out.clone()));

    for key in [&kinds::TEMPERATURE, &kinds::WATER_LEVEL] {
        bus.subscribe(key, numeric.clone());
        bus.subscribe(key, text.clone());
    }
    bus.subscribe(&kinds::SPORTS_NEWS, ghita);
    bus.subscribe(&kinds::POLITICAL_NEWS, vasile.clone());
    bus.subscribe(&kinds::SPORTS_NEWS, vasile);

    let mut first = producers.temperature("tS1");
    let mut second = producers.temperature("tS2");
    let mut water = producers.water_level("wS1");

    for _ in 0..cli.ticks {
        tick_temperature(out, &mut first, &bus);
        tick_temperature(out, &mut second, &bus);
        tick_water_level(out, &mut water, &bus);
        out.line("");
        tokio::time::sleep(interval).await;
    }

    let mut pro_tv = producers.agency("proTV");
    let mut digi24 = producers.agency("digi24");
    for _ in 0..3 {
        publish(out, &mut pro_tv, &bus, "political")?;
        publish(out, &mut digi24, &bus, "sports")?;
    }
    out.line("");

    Ok(())
}

async fn run_reflected(
    config: EventBusConfig,
    cli: &Cli,
    interval: Duration,
    producers: &mut Producers,
    out: &Arc<dyn Sink>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running discovered handler methods");
    let bus = EventBus::builder()
        .config(config)
        .catalog(kinds::catalog())
        .build();

    bus.register_object(Arc::new(NumericDisplay::with_sink("Display 1", out.clone())));
    bus.register_object(Arc::new(TextDisplay::with_sink("Display 2", out.clone())));
    bus.register_object(Arc::new(HumanSubscriber::with_sink("Vasilica", out.clone())));

    let explicit = out.clone();
    bus.register_handler(&kinds::TEMPERATURE, move |event: &TemperatureEvent| -> HandlerResult {
        explicit.line(&format!(
            "[Explicit] Handling temperature event: {}",
            event.temperature()
        ));
        Ok(())
    });
    let explicit = out.clone();
    bus.register_handler(&kinds::WATER_LEVEL, move |event: &WaterLevelEvent| -> HandlerResult {
        explicit.line(&format!("[Explicit] Water level detected: {}", event.level()));
        Ok(())
    });

    let mut temperature = producers.temperature("T1");
    let mut water = producers.water_level("W1");
    let mut agency = producers.agency("ProTV");

    temperature.report(&bus, 28);
    water.report(&bus, 50);
    bus.publish(SportsNewsEvent::new(agency.name(), "Epic sports victory!"));
    bus.publish(PoliticalNewsEvent::new(agency.name(), "Election updates!"));
    bus.publish(CultureNewsEvent::new(agency.name(), "New art exhibition!"));

    for _ in 0..cli.ticks {
        tick_temperature(out, &mut temperature, &bus);
        tick_water_level(out, &mut water, &bus);
        out.line("");
        tokio::time::sleep(interval).await;
    }

    out.line("");
    for category in ["political", "sports", "culture"] {
        publish(out, &mut agency, &bus, category)?;
    }

    Ok(())
}

fn tick_temperature(out: &Arc<dyn Sink>, sensor: &mut TemperatureSensor, bus: &EventBus) {
    let temperature = sensor.sample();
    out.line(&format!("Sensor {} - New Temperature: {temperature}", sensor.id()));
    sensor.report(bus, temperature);
}

fn tick_water_level(out: &Arc<dyn Sink>, sensor: &mut WaterLevelSensor, bus: &EventBus) {
    let level = sensor.sample();
    out.line(&format!("Sensor {} - New Water Level: {level}", sensor.id()));
    sensor.report(bus, level);
}

fn publish(
    out: &Arc<dyn Sink>,
    agency: &mut NewsAgency,
    bus: &EventBus,
    category: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = agency.publish_news(bus, category)?;
    out.line(&format!(
        "{} published {} news: {content}",
        agency.name(),
        category.to_uppercase()
    ));
    Ok(())
}
