use std::{
    ops::RangeBounds,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::EmitFn;
use crate::types::WindowKey;

/// A Helper to write values into a shared vector and take them out
/// again.
/// This is mainly useful to extract emitted buckets in unit tests.
/// This struct uses an Arc<Mutex<Vec<T>> internally, so it can be freely
/// cloned
pub struct VecSink<T> {
    inner: Arc<Mutex<Vec<T>>>,
}

// a derive would require `T: Clone`, but only the Arc is cloned
impl<T> Clone for VecSink<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for VecSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VecSink<T> {
    /// Create a new sink which collects all values into a `Vec`
    pub fn new() -> Self {
        VecSink {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        // a panicking writer can not leave the Vec in an invalid state
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put a value into this sink
    pub fn give(&self, value: T) {
        self.lock().push(value)
    }

    /// Take the given range out of this sink
    pub fn drain_vec<R: RangeBounds<usize>>(&self, range: R) -> Vec<T> {
        self.lock().drain(range).collect()
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if the sink holds no values
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T: Send + 'static> VecSink<T> {
    /// A sink callback putting every value into this sink
    pub fn callback(&self) -> EmitFn<T> {
        let this = self.clone();
        Box::new(move |value| this.give(value))
    }
}

impl<A: Clone + Send + 'static> VecSink<(A, WindowKey)> {
    /// A collector trigger putting a copy of every emitted bucket into this sink
    pub fn trigger(&self) -> impl FnMut(&A, &WindowKey) + Send + 'static {
        let this = self.clone();
        move |accumulator: &A, window: &WindowKey| {
            this.give((accumulator.clone(), window.clone()))
        }
    }
}

impl<T> IntoIterator for VecSink<T> {
    type Item = T;

    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.drain_vec(..).into_iter()
    }
}
