//! Tallybox collects streams of timestamped events into windowed, grouped buckets
//! and emits them to a downstream consumer according to a trigger policy.
pub mod accumulator;
pub mod collector;
pub mod errorhandling;
pub mod sinks;
pub mod types;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
