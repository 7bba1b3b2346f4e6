//! The collector assigns every event to a bucket keyed by its window and group,
//! keeps track of all live buckets and emits them according to an [EmitPolicy].
//!
//! # Example
//!
//! Collect hourly windows and emit every window once the first event of
//! the next hour arrives:
//!
//! ```rust
//! use tallybox::accumulator::Collection;
//! use tallybox::collector::{Collector, CollectorSettings, EmitPolicy};
//! use tallybox::sinks::VecSink;
//! use tallybox::types::{TimedEvent, WindowKey};
//!
//! let sink: VecSink<(Collection<TimedEvent<u32>>, WindowKey)> = VecSink::new();
//! let settings = CollectorSettings::builder()
//!     .window_type("fixed")
//!     .window_duration("1h")
//!     .emit_on(EmitPolicy::Discard)
//!     .build();
//!
//! let mut collector = Collector::from_settings(&settings)
//!     .unwrap()
//!     .with_trigger(sink.trigger());
//!
//! let minute = 60_000;
//! collector.add_event(TimedEvent::new(10 * minute, 1));
//! collector.add_event(TimedEvent::new(40 * minute, 2));
//! collector.add_event(TimedEvent::new(65 * minute, 3));
//!
//! let emitted = sink.drain_vec(..);
//! assert_eq!(emitted.len(), 1);
//! assert_eq!(emitted[0].1.as_str(), "1h-0");
//! assert_eq!(emitted[0].0.len(), 2);
//! ```
mod settings;
mod worker;

use indexmap::{map::Entry, IndexMap};
pub use settings::{CollectorSettings, EmitPolicy};
use tracing::{debug, trace};
pub use worker::{CollectorHandle, CollectorWorker, WorkerError};

pub use crate::window::ConfigError;
use crate::{
    accumulator::{Accumulator, Collection},
    types::{BucketKey, Event, GroupKey, WindowKey},
    window::WindowType,
};

type GroupByFn<E> = Box<dyn Fn(&E) -> Option<GroupKey> + Send>;
type TriggerFn<A> = Box<dyn FnMut(&A, &WindowKey) + Send>;

/// Accumulates events into buckets per window and group.
///
/// Every call to [Collector::add_event] folds the event into exactly one
/// bucket and runs all resulting trigger callbacks before returning.
/// Buckets are kept in the order they were created, which is also the order
/// they are emitted in.
pub struct Collector<E, A = Collection<E>> {
    window: WindowType,
    emit_on: EmitPolicy,
    group_by: GroupByFn<E>,
    on_trigger: Option<TriggerFn<A>>,
    buckets: IndexMap<BucketKey, A>,
}

impl<E, A> Collector<E, A>
where
    E: Event + 'static,
    A: Accumulator<E> + 'static,
{
    /// Create a collector without grouping and without a trigger callback
    pub fn new(window: WindowType, emit_on: EmitPolicy) -> Self {
        Self {
            window,
            emit_on,
            group_by: Box::new(|_| None),
            on_trigger: None,
            buckets: IndexMap::new(),
        }
    }

    /// Create a collector from windowing settings, failing if the settings
    /// are incomplete or contradictory.
    pub fn from_settings(settings: &CollectorSettings) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.window()?, settings.emit_on))
    }

    /// Split every window by the group key returned from `group_by`.
    /// Events for which it returns `None` share one bucket per window.
    pub fn group_by(
        mut self,
        group_by: impl Fn(&E) -> Option<GroupKey> + Send + 'static,
    ) -> Self {
        self.group_by = Box::new(group_by);
        self
    }

    /// Set the callback receiving emitted buckets
    pub fn with_trigger(
        mut self,
        on_trigger: impl FnMut(&A, &WindowKey) + Send + 'static,
    ) -> Self {
        self.set_trigger(on_trigger);
        self
    }

    /// Replace the callback receiving emitted buckets
    pub fn set_trigger(&mut self, on_trigger: impl FnMut(&A, &WindowKey) + Send + 'static) {
        self.on_trigger = Some(Box::new(on_trigger));
    }

    /// Remove the trigger callback. Emissions are dropped until a new one is set.
    pub fn clear_trigger(&mut self) {
        self.on_trigger = None;
    }

    /// Window type this collector assigns events by
    pub fn window_type(&self) -> &WindowType {
        &self.window
    }

    /// Policy deciding when buckets are emitted
    pub fn emit_policy(&self) -> EmitPolicy {
        self.emit_on
    }

    /// Number of live buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True if there are no live buckets
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The accumulator of the bucket with the given key, if it is live
    pub fn get(&self, key: &BucketKey) -> Option<&A> {
        self.buckets.get(key)
    }

    /// All live buckets in creation order
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = (&BucketKey, &A)> {
        self.buckets.iter()
    }

    /// Fold `event` into its bucket and apply the emission policy.
    ///
    /// For fixed windows, the first event of a new bucket marks every bucket
    /// of a different window as stale. Under [EmitPolicy::Discard] the stale
    /// buckets are emitted and removed.
    pub fn add_event(&mut self, event: E) {
        let window_key = self.window.window_key(event.timestamp());
        let group_key = (self.group_by)(&event);

        let is_new_bucket = match self
            .buckets
            .entry(BucketKey::new(window_key.clone(), group_key))
        {
            Entry::Occupied(mut entry) => {
                let accumulator = entry.get().add(event);
                entry.insert(accumulator);
                false
            }
            Entry::Vacant(entry) => {
                let accumulator = A::default().add(event);
                debug!(bucket = %entry.key(), "Created bucket");
                entry.insert(accumulator);
                true
            }
        };

        match self.emit_on {
            EmitPolicy::EachEvent => emit(&mut self.on_trigger, self.buckets.iter()),
            EmitPolicy::Discard if is_new_bucket && self.window.is_fixed() => {
                let (live, stale): (IndexMap<_, _>, IndexMap<_, _>) =
                    std::mem::take(&mut self.buckets)
                        .into_iter()
                        .partition(|(key, _)| key.window_key() == &window_key);
                self.buckets = live;
                if !stale.is_empty() {
                    debug!(
                        window = %window_key,
                        stale = stale.len(),
                        "New window opened, discarding stale buckets"
                    );
                }
                emit(&mut self.on_trigger, stale.iter());
            }
            EmitPolicy::Discard | EmitPolicy::Manual => (),
        }
    }

    /// Emit every live bucket, regardless of the emission policy.
    /// No bucket is removed.
    pub fn flush_collections(&mut self) {
        emit(&mut self.on_trigger, self.buckets.iter());
    }
}

fn emit<'a, A: 'a>(
    on_trigger: &mut Option<TriggerFn<A>>,
    buckets: impl ExactSizeIterator<Item = (&'a BucketKey, &'a A)>,
) {
    let count = buckets.len();
    let Some(trigger) = on_trigger.as_mut() else {
        trace!(count, "No trigger registered, dropping emission");
        return;
    };
    for (key, accumulator) in buckets {
        trigger(accumulator, key.window_key());
    }
    trace!(count, "Emitted buckets");
}

impl<E, A> std::fmt::Debug for Collector<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("window", &self.window)
            .field("emit_on", &self.emit_on)
            .field("buckets", &self.buckets.len())
            .field("has_trigger", &self.on_trigger.is_some())
            .finish_non_exhaustive()
    }
}
