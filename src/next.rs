//! The completion handle a step settles to report its outcome.
//!
//! A [`Next`] is handed to every step. Settling it while the step is still running
//! (a synchronous completion) only records the report; the driver picks it up when the
//! step returns and loops in place. Settling it after the step has returned (a deferred
//! completion) resumes the run from the settling frame, so the `Result` returned by the
//! settle methods carries whatever escapes from that resumed leg.

use std::fmt;
use std::rc::Rc;

/// A step's report as seen by the driver.
pub(crate) enum Settled<R, E> {
    Done(R),
    Failed(E, Option<R>),
}

/// Receiver side of a [`Next`]: the run it settles.
pub(crate) trait Resume<R, E> {
    fn resume(self: Rc<Self>, settled: Settled<R, E>) -> Result<(), E>;
}

/// Error-first completion handle for one step.
///
/// The handle is consumed when settled, so a step reports at most once. Dropping it
/// without settling leaves the run suspended for good.
///
/// ```rust
/// use qflow::{Error, repeat_until};
///
/// let mut calls = 0;
/// repeat_until(
///     move |next| {
///         calls += 1;
///         next.done((calls == 3).then_some(calls))
///     },
///     |outcome: Result<u32, _>| {
///         assert_eq!(outcome.ok(), Some(3));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub struct Next<R, E> {
    run: Rc<dyn Resume<R, E>>,
}

impl<R, E> Next<R, E> {
    pub(crate) fn new(run: Rc<dyn Resume<R, E>>) -> Self {
        Next { run }
    }

    /// Reports success with a value.
    pub fn done(self, report: R) -> Result<(), E> {
        self.run.resume(Settled::Done(report))
    }

    /// Reports failure; the run stops and forwards its own partial value.
    pub fn fail(self, error: E) -> Result<(), E> {
        self.run.resume(Settled::Failed(error, None))
    }

    /// Reports failure together with a value that travels with the error.
    pub fn fail_with(self, error: E, report: R) -> Result<(), E> {
        self.run.resume(Settled::Failed(error, Some(report)))
    }

    /// Reports a `Result`: `Ok` as [`done`](Next::done), `Err` as [`fail`](Next::fail).
    pub fn settle(self, result: Result<R, E>) -> Result<(), E> {
        match result {
            Ok(report) => self.done(report),
            Err(error) => self.fail(error),
        }
    }
}

impl<E> Next<(), E> {
    /// Reports success for a step with nothing to report.
    pub fn ok(self) -> Result<(), E> {
        self.done(())
    }
}

impl<R, E> fmt::Debug for Next<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}
