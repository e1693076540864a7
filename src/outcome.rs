//! What a run hands to its final callback.
//!
//! The error-first `(error, ...values)` convention becomes a plain [`Result`]: success
//! carries the run's output, failure carries a [`Failed`] holding the error *and* the
//! partial value the run had built up to the failing step. The two are never
//! mutually exclusive.

use std::fmt;

use thiserror::Error;

/// Result delivered to a final callback: the run's output or how it failed.
pub type Outcome<T, P, E> = Result<T, Failed<P, E>>;

/// How a failing step surfaced its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The step settled its completion handle with an error.
    Reported,
    /// The step returned `Err` before settling its completion handle.
    Raised,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Reported => write!(f, "reported"),
            Origin::Raised => write!(f, "raised"),
        }
    }
}

/// A failed run: the step error together with the partial result.
///
/// Displays as the wrapped error, so the step's message survives unchanged.
///
/// ```rust
/// use qflow::{Error, Failed, Origin};
///
/// let failed = Failed::raised(Error::msg("die"), vec![2, 4]);
/// assert_eq!(failed.to_string(), "die");
/// assert_eq!(failed.origin, Origin::Raised);
/// assert_eq!(failed.partial, vec![2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct Failed<P, E> {
    /// The error the step produced.
    pub error: E,
    /// State accumulated up to and including the failing step.
    pub partial: P,
    /// Whether the error was reported through the handle or raised by the step.
    pub origin: Origin,
}

impl<P, E> Failed<P, E> {
    pub fn reported(error: E, partial: P) -> Self {
        Failed {
            error,
            partial,
            origin: Origin::Reported,
        }
    }

    pub fn raised(error: E, partial: P) -> Self {
        Failed {
            error,
            partial,
            origin: Origin::Raised,
        }
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.origin == Origin::Raised
    }

    /// Splits into the error and the partial value.
    pub fn into_parts(self) -> (E, P) {
        (self.error, self.partial)
    }

    /// Transforms the partial value, keeping the error and its origin.
    pub fn map_partial<P2, F>(self, f: F) -> Failed<P2, E>
    where
        F: FnOnce(P) -> P2,
    {
        Failed {
            error: self.error,
            partial: f(self.partial),
            origin: self.origin,
        }
    }
}
