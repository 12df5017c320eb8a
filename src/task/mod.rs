//! Cold, re-runnable deferred computations settling to success or failure
mod settle;

use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::oneshot;
use tracing::debug;

use crate::errors::Error;

pub use settle::Settle;

type Computation<T, E> = Arc<dyn Fn(Settle<T, E>) + Send + Sync>;

/// A deferred computation that settles to success or failure
///
/// A `Task` holds a computation without running it. Nothing happens until
/// the task is [forked](`Task::fork`), at which point the computation
/// receives a [`Settle`] handle and reports its outcome through it, possibly
/// from a later runtime turn, possibly never (see [`Task::empty`]).
///
/// Tasks are cold and are not memoized: forking the same task twice runs
/// the computation twice, independently, with no state shared between
/// forks. This is what distinguishes a `Task` from an eagerly started
/// future. Cloning a task clones a handle to the computation, never the
/// work itself.
///
/// Rejection is the single failure channel, delivered to the first callback
/// of [fork](`Task::fork`) and short-circuiting [map](`Task::map`) and
/// [chain](`Task::chain`); [alt](`Task::alt`) is the recovery primitive. A
/// computation that panics is not caught: the panic propagates to the
/// caller of `fork` as a fatal fault. Fallible work belongs on the
/// rejection channel instead, see [`Settle::reject`] and [`Task::from_io`].
///
/// ```rust
/// use satie::Task;
///
/// let task: Task<i32> = Task::of(20).map(|x| x * 2).chain(|x| Task::of(x + 2));
///
/// task.fork(
///     |_| unreachable!("no rejection path"),
///     |value| assert_eq!(value, 42),
/// );
/// ```
pub struct Task<T, E = Error> {
    computation: Computation<T, E>,
}

impl<T, E> Clone for Task<T, E> {
    fn clone(&self) -> Self {
        Self {
            computation: Arc::clone(&self.computation),
        }
    }
}

impl<T, E> fmt::Debug for Task<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

impl<T, E> Task<T, E> {
    /// Create a task from a computation
    ///
    /// The computation is called once per fork with the [`Settle`] handle
    /// for that fork and must settle at most one outcome. It may settle
    /// synchronously before returning, hand the handle to concurrent work,
    /// or drop it to produce no outcome at all.
    pub fn new<F>(computation: F) -> Self
    where
        F: Fn(Settle<T, E>) + Send + Sync + 'static,
    {
        Self {
            computation: Arc::new(computation),
        }
    }

    /// A task that settles with neither outcome
    ///
    /// Forking an empty task invokes neither callback. Compositions built
    /// on top of it with [map](`Task::map`) or [chain](`Task::chain`)
    /// remain outcome-free rather than receiving a synthetic value, which
    /// makes the empty task the unit for representing deliberate absence,
    /// distinct from failure.
    pub fn empty() -> Self {
        Task::new(|_settle| {})
    }

    /// Start the computation
    ///
    /// This is the only trigger for execution. Each call runs the
    /// computation again with a fresh pair of callbacks; at most one of
    /// `on_reject` and `on_resolve` is invoked, at most once.
    pub fn fork<R, F>(&self, on_reject: R, on_resolve: F)
    where
        R: FnOnce(E) + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        (self.computation)(Settle::new(on_reject, on_resolve));
    }
}

impl<T, E> Task<T, E>
where
    T: Clone + Send + Sync + 'static,
{
    /// Lift a value into a task
    ///
    /// The returned task resolves immediately with a clone of the value on
    /// every fork. There is no rejection path.
    pub fn of(value: T) -> Self {
        Task::new(move |settle| settle.resolve(value.clone()))
    }
}

impl<T, E> Task<T, E>
where
    E: Clone + Send + Sync + 'static,
{
    /// Create a task that rejects immediately with the given error
    pub fn from_error(err: E) -> Self {
        Task::new(move |settle| settle.reject(err.clone()))
    }
}

impl<T, E> Task<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a task that settles immediately from a `Result`
    pub fn from_result(result: Result<T, E>) -> Self {
        Task::new(move |settle| match result.clone() {
            Ok(value) => settle.resolve(value),
            Err(err) => settle.reject(err),
        })
    }
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a task from an asynchronous computation
    ///
    /// The factory is called once per fork and the returned future is
    /// spawned on the ambient tokio runtime. An `Ok` output resolves the
    /// fork, an `Err` output rejects it.
    ///
    /// # Panics
    ///
    /// Forking the returned task panics if called from outside a tokio
    /// runtime.
    pub fn from_io<F, Fut>(io: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Task::new(move |settle| {
            let fut = io();
            tokio::spawn(async move {
                match fut.await {
                    Ok(value) => settle.resolve(value),
                    Err(err) => settle.reject(err),
                }
            });
        })
    }

    /// Transform the success value
    ///
    /// Returns a new task whose fork runs the original computation and
    /// applies `f` to a successful result before resolving. Rejections pass
    /// through untouched and `f` is never called for them.
    pub fn map<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let Self { computation } = self;
        let f = Arc::new(f);
        Task::new(move |settle: Settle<U, E>| {
            let f = Arc::clone(&f);
            let on_reject = {
                let settle = settle.clone();
                move |err| settle.reject(err)
            };
            (computation)(Settle::new(on_reject, move |value| settle.resolve(f(value))));
        })
    }

    /// Transform the rejection error
    ///
    /// The counterpart of [map](`Task::map`) for the failure channel.
    /// Success passes through untouched.
    pub fn map_err<E1, F>(self, f: F) -> Task<T, E1>
    where
        E1: Send + 'static,
        F: Fn(E) -> E1 + Send + Sync + 'static,
    {
        let Self { computation } = self;
        let f = Arc::new(f);
        Task::new(move |settle: Settle<T, E1>| {
            let f = Arc::clone(&f);
            let on_resolve = {
                let settle = settle.clone();
                move |value| settle.resolve(value)
            };
            (computation)(Settle::new(move |err| settle.reject(f(err)), on_resolve));
        })
    }

    /// Sequence a dependent task
    ///
    /// On success of the original computation, the task returned by `f` is
    /// forked and its outcome relayed, flattening one level of nesting. On
    /// rejection, the error propagates and `f` is never called.
    pub fn chain<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Task<U, E> + Send + Sync + 'static,
    {
        let Self { computation } = self;
        let f = Arc::new(f);
        Task::new(move |settle: Settle<U, E>| {
            let f = Arc::clone(&f);
            let on_reject = {
                let settle = settle.clone();
                move |err| settle.reject(err)
            };
            let on_resolve = move |value| {
                let next = f(value);
                let on_reject = {
                    let settle = settle.clone();
                    move |err| settle.reject(err)
                };
                next.fork(on_reject, move |value| settle.resolve(value));
            };
            (computation)(Settle::new(on_reject, on_resolve));
        })
    }

    /// Fallback combinator
    ///
    /// Forks the original computation and resolves with its result on
    /// success. Only on rejection is `other` forked, and its outcome
    /// relayed instead; a successful value never triggers the fallback,
    /// whatever the value is. Chains of `alt` try each fallback in order,
    /// left to right.
    pub fn alt(self, other: Task<T, E>) -> Task<T, E> {
        let Self { computation } = self;
        Task::new(move |settle: Settle<T, E>| {
            let other = other.clone();
            let on_reject = {
                let settle = settle.clone();
                move |_err: E| {
                    let on_resolve = {
                        let settle = settle.clone();
                        move |value| settle.resolve(value)
                    };
                    other.fork(move |err| settle.reject(err), on_resolve);
                }
            };
            (computation)(Settle::new(on_reject, move |value| settle.resolve(value)));
        })
    }

    /// Fork the task and wait for its outcome
    ///
    /// Returns `Some(Ok(value))` or `Some(Err(err))` once the fork
    /// settles, or `None` when the computation finished without settling
    /// (see [`Task::empty`]). A computation that holds its [`Settle`]
    /// handle indefinitely keeps the returned future pending; there is no
    /// built-in timeout or abort.
    pub async fn run(&self) -> Option<Result<T, E>> {
        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let on_reject = {
            let tx = Arc::clone(&tx);
            move |err| {
                if let Some(tx) = tx.lock().ok().and_then(|mut guard| guard.take()) {
                    let _ = tx.send(Err(err));
                }
            }
        };
        self.fork(on_reject, move |value| {
            if let Some(tx) = tx.lock().ok().and_then(|mut guard| guard.take()) {
                let _ = tx.send(Ok(value));
            }
        });

        match rx.await {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                debug!("task fork finished without settling");
                None
            }
        }
    }
}

impl<T, E> IntoFuture for Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = Option<Result<T, E>>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    /// Awaiting a task forks it exactly once, as with [run](`Task::run`)
    fn into_future(self) -> Self::IntoFuture {
        async move { self.run().await }.boxed()
    }
}
