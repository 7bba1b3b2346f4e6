//! Run a collector on its own thread, fed by any number of producers.

use std::thread::JoinHandle;

use thiserror::Error;
use tracing::{debug_span, info};

use super::Collector;
use crate::{accumulator::Accumulator, types::Event};

enum Command<E> {
    Event(E),
    Flush,
}

/// Cloneable handle for sending events to a [CollectorWorker]
pub struct CollectorHandle<E> {
    sender: flume::Sender<Command<E>>,
}

impl<E> Clone for CollectorHandle<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> CollectorHandle<E> {
    /// Queue an event for the collector
    pub fn add_event(&self, event: E) -> Result<(), WorkerError> {
        self.sender
            .send(Command::Event(event))
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Queue a flush of all live buckets. The flush happens after every event
    /// queued before it from this handle.
    pub fn flush(&self) -> Result<(), WorkerError> {
        self.sender
            .send(Command::Flush)
            .map_err(|_| WorkerError::Disconnected)
    }
}

/// A collector owned by a dedicated thread.
///
/// Producers only enqueue events through [CollectorHandle]s, the worker
/// processes them one at a time. This keeps the collector single-writer,
/// so stale bucket detection always sees a consistent set of buckets and
/// trigger callbacks run on the worker thread without any lock held.
pub struct CollectorWorker<E, A> {
    thread: JoinHandle<Collector<E, A>>,
}

impl<E, A> CollectorWorker<E, A>
where
    E: Event + Send + 'static,
    A: Accumulator<E> + Send + 'static,
{
    /// Move `collector` onto a new thread and return a handle to feed it
    pub fn spawn(mut collector: Collector<E, A>) -> Result<(Self, CollectorHandle<E>), WorkerError> {
        let (sender, receiver) = flume::unbounded();
        let thread = std::thread::Builder::new()
            .name("tallybox-collector".to_owned())
            .spawn(move || {
                let span = debug_span!("collector_worker");
                let _guard = span.enter();
                info!("Collector worker started");
                for command in receiver.iter() {
                    match command {
                        Command::Event(event) => collector.add_event(event),
                        Command::Flush => collector.flush_collections(),
                    }
                }
                info!(live = collector.len(), "All handles dropped, stopping collector worker");
                collector
            })
            .map_err(WorkerError::Spawn)?;
        Ok((Self { thread }, CollectorHandle { sender }))
    }

    /// Wait for the worker to finish and take back the collector with
    /// all buckets still live.
    ///
    /// The worker finishes once every [CollectorHandle] has been dropped,
    /// so this blocks forever if the caller still holds one.
    pub fn join(self) -> Result<Collector<E, A>, WorkerError> {
        self.thread.join().map_err(WorkerError::Panicked)
    }
}

/// Errors running a collector on a worker thread
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Error spawning collector worker thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("Collector worker is not running")]
    Disconnected,
    #[error("Collector worker panicked: {0:?}")]
    Panicked(Box<dyn std::any::Any + Send>),
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{
        collector::EmitPolicy,
        testing::{by_sensor, capture, hourly, reading, SENSORS},
    };

    /// Events from many producers all end up in the collector
    #[test]
    fn collects_from_many_producers() {
        let (worker, handle) = CollectorWorker::spawn(hourly(EmitPolicy::Manual).group_by(by_sensor))
            .unwrap();

        let producers = SENSORS
            .iter()
            .map(|&sensor| {
                let handle = handle.clone();
                std::thread::spawn(move || {
                    for minute in 0..50 {
                        handle.add_event(reading(0, minute, sensor)).unwrap();
                    }
                })
            })
            .collect_vec();
        drop(handle);
        for producer in producers {
            producer.join().unwrap();
        }

        let collector = worker.join().unwrap();
        assert_eq!(collector.len(), SENSORS.len());
        assert!(collector.buckets().all(|(_, c)| c.len() == 50));
    }

    #[test]
    fn flush_through_handle() {
        let sink = capture();
        let (worker, handle) =
            CollectorWorker::spawn(hourly(EmitPolicy::Discard).with_trigger(sink.trigger()))
                .unwrap();
        handle.add_event(reading(0, 1, "a")).unwrap();
        handle.add_event(reading(0, 2, "a")).unwrap();
        handle.add_event(reading(1, 1, "a")).unwrap();
        handle.flush().unwrap();
        drop(handle);

        let collector = worker.join().unwrap();
        let emitted = sink.drain_vec(..);
        let windows = emitted.iter().map(|(_, w)| w.as_str()).collect_vec();
        assert_eq!(windows, vec!["1h-0", "1h-1"]);
        assert_eq!(emitted[0].0.len(), 2);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn panicking_trigger_is_reported() {
        let (worker, handle) = CollectorWorker::spawn(
            hourly(EmitPolicy::EachEvent).with_trigger(|_, _| panic!("downstream failed")),
        )
        .unwrap();
        handle.add_event(reading(0, 1, "a")).unwrap();
        drop(handle);
        assert!(matches!(worker.join(), Err(WorkerError::Panicked(_))));
    }

    #[test]
    fn handle_errors_once_worker_is_gone() {
        let (worker, handle) = CollectorWorker::spawn(
            hourly(EmitPolicy::EachEvent).with_trigger(|_, _| panic!("downstream failed")),
        )
        .unwrap();
        handle.add_event(reading(0, 1, "a")).unwrap();
        // the worker thread dies, dropping the receiver
        while handle.add_event(reading(0, 2, "a")).is_ok() {
            std::thread::yield_now();
        }
        assert!(matches!(handle.flush(), Err(WorkerError::Disconnected)));
        drop(handle);
        assert!(worker.join().is_err());
    }
}
