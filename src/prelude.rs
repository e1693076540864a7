//! Commonly used imports
//!
//! Use `use qflow::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Advance, Error, Failed, Next, Origin, Outcome};

// Driving
pub use crate::{Visited, Visitor, drive};

// Operations
pub use crate::{apply_visitor, filter, iterate, link, map, reduce, repeat_until, repeat_while};

// Deferral
pub use crate::Turns;
