//! # qflow: stack-safe sequential flow for callback-style steps
//!
//! Run a sequence of steps one after another, where each step signals completion by
//! settling a [`Next`] handle, either before it returns or on some later turn. The
//! driver loops in place over steps that complete synchronously, so a run of a million
//! synchronous steps uses no more stack than a run of one.
//!
//! ## Core Pieces
//!
//! - **[`Visitor`]**: step logic plus accumulated state, driven one step at a time
//! - **[`drive`]**: the trampoline that runs a visitor and calls the final callback once
//! - **[`Next`]**: the one-shot completion handle a step settles
//! - **[`Outcome`]**: what the final callback receives, success or [`Failed`]
//!
//! ## Example
//!
//! ```
//! use qflow::*;
//!
//! let mut n = 0u64;
//! repeat_until(
//!     move |next| {
//!         n += 1;
//!         next.done((n > 20_000).then_some(n))
//!     },
//!     |outcome| {
//!         assert_eq!(outcome.ok(), Some(20_001));
//!         Ok::<(), Error>(())
//!     },
//! )
//! .unwrap();
//! ```
//!
//! ## Operations
//!
//! - [`repeat_until(step, finish)`] - Repeat a step until it reports a value
//! - [`repeat_while(predicate, body, finish)`] - Repeat a body while a predicate holds
//! - [`iterate(links, finish)`] - Thread a value through a list of steps
//! - [`reduce(items, initial, combine, finish)`] - Fold items into an accumulator
//! - [`map(items, transform, finish)`] - Transform items into a new list
//! - [`filter(items, predicate, finish)`] - Keep the items a predicate accepts
//! - [`apply_visitor(items, visit, finish)`] - Visit items for their effect
//!
//! **Deferral:** [`Turns`] is a small FIFO of later turns for steps that settle outside
//! the current frame.

mod advance;
mod driver;
mod error;
mod next;
mod ops;
mod outcome;
pub mod prelude;
mod turns;

pub use advance::*;
pub use driver::*;
pub use error::*;
pub use next::Next;
pub use ops::*;
pub use outcome::*;
pub use turns::*;
