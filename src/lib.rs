#![cfg_attr(docsrs, feature(doc_cfg))]
//! satie is a small library of algebraic types for uncertain values: values
//! that may be absent, and computations that are deferred and may fail.
//!
//! The library provides three pieces that compose without knowing about each
//! other's internals:
//!
//! - [`Maybe`]: an optional value, either `Just(x)` or `Nothing`. Absence is
//!   a value, not an error.
//! - [`Task`]: a cold, re-runnable deferred computation that settles to
//!   success or failure through callbacks when forked.
//! - [fallback](`crate::fallback`) adapters: `alt` on both types plus
//!   [maybe_to_task](`fallback::maybe_to_task`) and
//!   [double_alt](`fallback::double_alt`) for the common `Task<Maybe<T>, E>`
//!   composite, a deferred operation that may yield nothing.
//!
//! # Maybe
//!
//! Partial lookups return a [`Maybe`] and stay composable through
//! [map](`Maybe::map`) and [chain](`Maybe::chain`) until a terminal
//! [get_or_else](`Maybe::get_or_else`) leaves the context:
//!
//! ```rust
//! use satie::maybe::{Just, Maybe, Nothing};
//!
//! fn billing_address(country: &str) -> Maybe<&str> {
//!     match country {
//!         "cl" => Just("santiago"),
//!         _ => Nothing,
//!     }
//! }
//!
//! let label = billing_address("cl")
//!     .map(str::to_uppercase)
//!     .get_or_else("UNKNOWN".to_string());
//! assert_eq!(label, "SANTIAGO");
//! ```
//!
//! # Task
//!
//! A [`Task`] describes work without starting it. Only
//! [fork](`Task::fork`) (or its async terminals, [run](`Task::run`) and
//! `.await`) triggers execution, and every fork re-runs the computation from
//! scratch:
//!
//! ```rust
//! use satie::Task;
//!
//! let double_up: Task<i32> = Task::of(21).map(|x| x * 2);
//!
//! // Nothing has run yet; forking settles the outcome through callbacks
//! double_up.fork(
//!     |err| eprintln!("rejected: {err}"),
//!     |value| assert_eq!(value, 42),
//! );
//! ```
//!
//! Asynchronous work uses the same shape through
//! [from_io](`Task::from_io`), backed by the tokio runtime:
//!
//! ```rust
//! use satie::Task;
//!
//! # tokio_test::block_on(async {
//! let fetch = Task::<u32, String>::from_io(|| async { Ok(7) });
//! assert_eq!(fetch.run().await, Some(Ok(7)));
//! # })
//! ```
//!
//! # Fallbacks
//!
//! `alt` prefers the left operand's successful or present outcome and
//! otherwise tries the right one. For a `Task<Maybe<T>, E>`,
//! [double_alt](`fallback::double_alt`) extends the same policy across both
//! triggers, rejection and absence:
//!
//! ```rust
//! use satie::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let cache = Task::<_, String>::of(Nothing::<u16>);
//! let origin = Task::of(Just(404));
//!
//! let status = double_alt(cache, origin).map(|m| m.get_or_else(500));
//! assert_eq!(status.run().await, Some(Ok(404)));
//! # })
//! ```
//!
//! For logging, the library emits [tracing](https://crates.io/crates/tracing)
//! events on contract violations (a computation settling twice) and
//! outcome-free forks.
pub mod errors;
pub mod fallback;
pub mod maybe;
pub mod task;

pub use maybe::Maybe;
pub use task::{Settle, Task};

pub mod prelude {
    //! Core types and combinators in one import
    pub use crate::fallback::{double_alt, maybe_to_task};
    pub use crate::maybe::{Just, Maybe, Nothing};
    pub use crate::task::{Settle, Task};
}
