//! Operations built on the driver
//!
//! Each operation is a [`Visitor`](crate::Visitor) plus a function that hands it to
//! [`drive`](crate::drive). None of them adds stack-safety or error-routing rules of
//! its own.

mod each;
mod filter;
mod iterate;
mod map;
mod reduce;
mod repeat;

pub use each::{ApplyVisitor, apply_visitor};
pub use filter::{Filter, filter};
pub use iterate::{Iterate, Link, iterate, link};
pub use map::{Map, map};
pub use reduce::{Reduce, reduce};
pub use repeat::{RepeatUntil, RepeatWhile, repeat_until, repeat_while};
