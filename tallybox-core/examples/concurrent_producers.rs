//! Feed a single collector from several producer threads
use std::thread;

use tallybox::accumulator::Collection;
use tallybox::collector::{Collector, CollectorWorker, EmitPolicy};
use tallybox::types::{TimedEvent, WindowKey};
use tallybox::window::WindowType;

fn main() {
    tracing_subscriber::fmt::init();

    let collector: Collector<TimedEvent<u64>> =
        Collector::new(WindowType::from_parts("fixed", Some("10s")).unwrap(), EmitPolicy::Manual)
            .group_by(|e: &TimedEvent<u64>| Some(format!("producer-{}", e.value % 4)))
            .with_trigger(|collection: &Collection<TimedEvent<u64>>, window: &WindowKey| {
                println!("{window}: {} events", collection.len())
            });

    let (worker, handle) = CollectorWorker::spawn(collector).unwrap();

    let producers: Vec<_> = (0..4u64)
        .map(|producer| {
            let handle = handle.clone();
            thread::spawn(move || {
                for i in 0..100u64 {
                    let timestamp = (i * 250) as i64;
                    handle
                        .add_event(TimedEvent::new(timestamp, producer + 4 * i))
                        .unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    handle.flush().unwrap();
    drop(handle);

    let collector = worker.join().unwrap();
    println!("{} buckets live at shutdown", collector.len());
}
