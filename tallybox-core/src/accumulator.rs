//! Bucket bodies which events are folded into.

use std::ops::Range;

use crate::types::{Event, Timestamp};

/// An immutably updated container for the events of one bucket.
///
/// Every new bucket starts out as `Default::default()`, every event then
/// produces a new accumulator through [Accumulator::add]. The old value is
/// only replaced once `add` returned, so a panicking `add` leaves the bucket
/// untouched.
pub trait Accumulator<E>: Default {
    /// Return a new accumulator containing everything in `self` plus `event`
    fn add(&self, event: E) -> Self;
}

/// The default accumulator. Keeps all events in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection<E> {
    events: Vec<E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: Clone> Accumulator<E> for Collection<E> {
    fn add(&self, event: E) -> Self {
        let mut events = Vec::with_capacity(self.events.len() + 1);
        events.extend_from_slice(&self.events);
        events.push(event);
        Self { events }
    }
}

impl<E> Collection<E> {
    /// Number of events in this collection
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no event was added yet
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in the order they were added
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Iterate the events in the order they were added
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }
}

impl<E: Event> Collection<E> {
    /// Range from the earliest to just after the latest event timestamp,
    /// `None` for an empty collection
    pub fn time_range(&self) -> Option<Range<Timestamp>> {
        let begin = self.events.iter().map(Event::timestamp).min()?;
        let end = self.events.iter().map(Event::timestamp).max()?;
        Some(begin..end.saturating_add(1))
    }
}

impl<E> FromIterator<E> for Collection<E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl<E> IntoIterator for Collection<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Collection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
