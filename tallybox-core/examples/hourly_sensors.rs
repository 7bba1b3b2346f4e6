//! Collect sensor readings into hourly, per-sensor buckets and print every
//! bucket once the next hour starts.
use tallybox::accumulator::Collection;
use tallybox::collector::{CollectorSettings, EmitPolicy};
use tallybox::sinks::{CollectionOut, ConsoleOut, Sink};
use tallybox::types::{Event, TimedEvent, WindowKey};
use tallybox::window::FixedWindow;

const MINUTE: i64 = 60_000;

type Reading = TimedEvent<(&'static str, f64)>;

fn main() {
    tracing_subscriber::fmt::init();

    let settings = CollectorSettings::builder()
        .window_type("fixed")
        .window_duration("1h")
        .emit_on(EmitPolicy::Discard)
        .build();
    let hourly: FixedWindow = "1h".parse().unwrap();

    let mut sink: CollectionOut<Reading> = CollectionOut::from_settings(&settings)
        .unwrap()
        .group_by(|e: &Reading| Some(e.value.0.to_owned()));
    sink.on_emit(Box::new(
        move |(collection, window): (Collection<Reading>, WindowKey)| {
            let range = hourly.bounds(&window).unwrap();
            let total: f64 = collection.iter().map(|e| e.value.1).sum();
            println!(
                "window {window} [{}, {}) {} readings, total {total}",
                range.start,
                range.end,
                collection.len()
            );
        },
    ));

    // everything which comes in is also printed raw
    let mut console: ConsoleOut<Reading> = ConsoleOut::new();

    let readings = [
        (5, "sensor-a", 1.0),
        (6, "sensor-b", 2.5),
        (40, "sensor-a", 3.0),
        (65, "sensor-a", 0.5),
        (70, "sensor-b", 4.0),
        (130, "sensor-a", 1.5),
    ];
    for (minute, sensor, value) in readings {
        let event = TimedEvent::new(minute * MINUTE, (sensor, value));
        tracing::debug!(timestamp = event.timestamp(), "Reading arrived");
        console.add_event(event.clone());
        sink.add_event(event);
    }

    // drain the window which is still open
    sink.flush();
    sink.done();
    console.done();
}
