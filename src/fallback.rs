//! Fallback adapters for deferred optional values
//!
//! A `Task<Maybe<T>, E>` models a deferred operation that may succeed while
//! still yielding nothing, a shape with two distinct "try something else"
//! triggers: the task rejecting outright, and the task resolving with an
//! absent value. The adapters here cover both.

use crate::maybe::Maybe;
use crate::task::Task;

/// Collapse an optional value into task form
///
/// `Just(x)` becomes a task resolving with `x`, `Nothing` becomes
/// [Task::empty](`Task::empty`). Passed to [chain](`Task::chain`), this
/// turns a task of an optional value into a task that silently produces no
/// outcome when the value is absent, letting downstream steps skip the
/// empty case uniformly:
///
/// ```rust
/// use satie::prelude::*;
///
/// # tokio_test::block_on(async {
/// let present = Task::<_, String>::of(Just(1)).chain(maybe_to_task);
/// assert_eq!(present.run().await, Some(Ok(1)));
///
/// let absent = Task::<_, String>::of(Nothing::<i32>).chain(maybe_to_task);
/// assert_eq!(absent.run().await, None);
/// # })
/// ```
pub fn maybe_to_task<T, E>(maybe: Maybe<T>) -> Task<T, E>
where
    T: Clone + Send + Sync + 'static,
{
    match maybe {
        Maybe::Just(value) => Task::of(value),
        Maybe::Nothing => Task::empty(),
    }
}

/// Fallback across both the failure and the absence channel
///
/// Forks `primary` and keeps its value when it resolves with a present
/// `Maybe`. The `fallback` task is used whenever `primary` rejects or
/// resolves with `Nothing`; either way `fallback` settles the outcome,
/// including a `Nothing` of its own.
pub fn double_alt<T, E>(
    primary: Task<Maybe<T>, E>,
    fallback: Task<Maybe<T>, E>,
) -> Task<Maybe<T>, E>
where
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    let on_absent = fallback.clone();
    primary
        .chain(move |maybe| {
            if maybe.is_nothing() {
                on_absent.clone()
            } else {
                Task::of(maybe)
            }
        })
        .alt(fallback)
}
