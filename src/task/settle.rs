use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

type Callback<T> = Box<dyn FnOnce(T) + Send>;

struct Callbacks<T, E> {
    on_reject: Callback<E>,
    on_resolve: Callback<T>,
}

/// Handle used by a task computation to report its outcome
///
/// A `Settle` carries the pair of callbacks given to a single
/// [fork](`crate::Task::fork`) and accepts at most one outcome. After the
/// first [resolve](`Settle::resolve`) or [reject](`Settle::reject`), any
/// later attempt is ignored and logged at `warn` level, whether it comes
/// through the same handle or a clone.
///
/// Clones share the guard, so a computation may hand copies of the handle
/// to concurrent branches and let them race for the outcome. Dropping every
/// handle without settling leaves the fork without an outcome, which is the
/// behavior of [Task::empty](`crate::Task::empty`).
pub struct Settle<T, E> {
    inner: Arc<Inner<T, E>>,
}

struct Inner<T, E> {
    settled: AtomicBool,
    callbacks: Mutex<Option<Callbacks<T, E>>>,
}

impl<T, E> Clone for Settle<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Settle<T, E> {
    pub(crate) fn new<R, F>(on_reject: R, on_resolve: F) -> Self
    where
        R: FnOnce(E) + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                settled: AtomicBool::new(false),
                callbacks: Mutex::new(Some(Callbacks {
                    on_reject: Box::new(on_reject),
                    on_resolve: Box::new(on_resolve),
                })),
            }),
        }
    }

    /// Settle the fork with a success value
    pub fn resolve(self, value: T) {
        if let Some(callbacks) = self.take("resolve") {
            (callbacks.on_resolve)(value);
        }
    }

    /// Settle the fork with a rejection
    pub fn reject(self, err: E) {
        if let Some(callbacks) = self.take("reject") {
            (callbacks.on_reject)(err);
        }
    }

    fn take(&self, operation: &str) -> Option<Callbacks<T, E>> {
        if self.inner.settled.swap(true, Ordering::AcqRel) {
            warn!("ignoring {operation} on an already settled fork");
            return None;
        }

        // Only the caller that flipped the guard reaches the lock
        self.inner
            .callbacks
            .lock()
            .ok()
            .and_then(|mut callbacks| callbacks.take())
    }
}
