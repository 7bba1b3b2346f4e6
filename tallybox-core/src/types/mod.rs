//! Types and traits used accross Tallybox
mod event;
mod key;

pub use event::{Event, TimedEvent, Timestamp};
pub use key::{BucketKey, GroupKey, WindowKey};
