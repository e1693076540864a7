//! The stack-safe sequential driver.
//!
//! Every operation in this crate is a [`Visitor`] handed to [`drive`]. The driver asks
//! the visitor to launch a step, passing a [`Next`] handle, and then looks at what
//! happened while the step ran:
//!
//! - the handle was settled before the step returned: loop in place, same stack frame;
//! - the step returned without settling: park the visitor and return. Whoever settles
//!   the handle later resumes the loop from their own frame.
//!
//! Stack depth is therefore bounded by one frame per asynchronous suspension, never by
//! the number of steps.
//!
//! A step that returns `Err` before settling its handle has *raised*: the error goes to
//! the final callback like a reported one. A step that returns `Err` after settling has
//! broken its contract: the run is abandoned and the error escapes to whoever is driving
//! the current leg, as does any error returned by the final callback.

use std::cell::Cell;
use std::rc::Rc;

use either::Either;
use tracing::{debug, trace};

use crate::advance::Advance;
use crate::next::{Next, Resume, Settled};
use crate::outcome::{Failed, Outcome};

/// What [`Visitor::visit`] returns: the visitor and the step launch result, or the output.
pub type Visited<V, E> = Advance<(V, Result<(), E>), <V as Visitor<E>>::Output>;

/// Step logic plus the state it accumulates, driven one step at a time.
///
/// The driver owns the visitor and moves it through `visit` on every turn, getting it
/// back inside [`Advance::Continue`]. A visitor is the only place a run
/// keeps state, so it may be suspended and resumed from any stack frame.
///
/// ```rust
/// use qflow::{Advance, Error, Next, Visited, Visitor, drive};
///
/// /// Counts down, one step per tick.
/// struct Countdown(u32);
///
/// impl Visitor<Error> for Countdown {
///     type Report = ();
///     type Output = &'static str;
///     type Partial = u32;
///
///     fn visit(self, _report: Option<()>, next: Next<(), Error>) -> Visited<Self, Error> {
///         if self.0 == 0 {
///             return Advance::Stop("liftoff");
///         }
///         let launched = next.ok();
///         Advance::Continue((Countdown(self.0 - 1), launched))
///     }
///
///     fn partial(self, _report: Option<()>) -> u32 {
///         self.0
///     }
/// }
///
/// drive(Countdown(3), |outcome| {
///     assert_eq!(outcome.ok(), Some("liftoff"));
///     Ok::<(), Error>(())
/// })
/// .unwrap();
/// ```
pub trait Visitor<E>: Sized {
    /// Value a step settles its handle with on success.
    type Report;
    /// Value handed to the final callback when the run succeeds.
    type Output;
    /// Value handed to the final callback next to an error.
    type Partial;

    /// Takes the last step's report (`None` before the first step) and either launches
    /// another step with `next` or stops with the output.
    fn visit(
        self,
        report: Option<Self::Report>,
        next: Next<Self::Report, E>,
    ) -> Visited<Self, E>;

    /// Builds the partial value after a failure. `report` is the value a failing step
    /// attached to its error, if any.
    fn partial(self, report: Option<Self::Report>) -> Self::Partial;
}

impl<E, L, R> Visitor<E> for Either<L, R>
where
    L: Visitor<E>,
    R: Visitor<E, Report = L::Report, Output = L::Output, Partial = L::Partial>,
{
    type Report = L::Report;
    type Output = L::Output;
    type Partial = L::Partial;

    fn visit(
        self,
        report: Option<Self::Report>,
        next: Next<Self::Report, E>,
    ) -> Visited<Self, E> {
        match self {
            Either::Left(l) => l
                .visit(report, next)
                .map_continue(|(l, launched)| (Either::Left(l), launched)),
            Either::Right(r) => r
                .visit(report, next)
                .map_continue(|(r, launched)| (Either::Right(r), launched)),
        }
    }

    fn partial(self, report: Option<Self::Report>) -> Self::Partial {
        either::for_both!(self, v => v.partial(report))
    }
}

/// Runs `visitor` to completion and hands its outcome to `finish`, exactly once.
///
/// Returns `Ok(())` when the run finished or suspended cleanly in this frame, and the
/// error otherwise: from `finish`, or from a step that raised after settling its handle.
pub fn drive<E, V, F>(visitor: V, finish: F) -> Result<(), E>
where
    V: Visitor<E> + 'static,
    F: FnOnce(Outcome<V::Output, V::Partial, E>) -> Result<(), E> + 'static,
    E: 'static,
{
    let run = Rc::new(Run {
        visitor: Cell::new(Some(visitor)),
        finish: Cell::new(Some(finish)),
        settled: Cell::new(None),
        phase: Cell::new(Phase::Waiting),
        steps: Cell::new(0),
    });
    run.drive(None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// A step is running in the driver's frame; settling only records the report.
    Visiting,
    /// No frame is driving; settling resumes the loop.
    Waiting,
    Finished,
}

struct Run<E, V: Visitor<E>, F> {
    visitor: Cell<Option<V>>,
    finish: Cell<Option<F>>,
    settled: Cell<Option<Settled<V::Report, E>>>,
    phase: Cell<Phase>,
    steps: Cell<u64>,
}

impl<E, V, F> Run<E, V, F>
where
    V: Visitor<E> + 'static,
    F: FnOnce(Outcome<V::Output, V::Partial, E>) -> Result<(), E> + 'static,
    E: 'static,
{
    fn drive(self: Rc<Self>, mut settled: Option<Settled<V::Report, E>>) -> Result<(), E> {
        loop {
            let Some(visitor) = self.visitor.take() else {
                return Ok(());
            };

            let report = match settled.take() {
                None => None,
                Some(Settled::Done(report)) => Some(report),
                Some(Settled::Failed(error, report)) => {
                    let partial = visitor.partial(report);
                    return self.conclude(Err(Failed::reported(error, partial)));
                }
            };

            self.phase.set(Phase::Visiting);
            let next = Next::new(Rc::clone(&self) as Rc<dyn Resume<V::Report, E>>);
            let (visitor, launched) = match visitor.visit(report, next) {
                Advance::Stop(output) => return self.conclude(Ok(output)),
                Advance::Continue(launched) => launched,
            };
            self.steps.set(self.steps.get() + 1);

            match (launched, self.settled.take()) {
                (Ok(()), Some(now)) => {
                    self.visitor.set(Some(visitor));
                    settled = Some(now);
                }
                (Ok(()), None) => {
                    self.visitor.set(Some(visitor));
                    self.phase.set(Phase::Waiting);
                    trace!(steps = self.steps.get(), "run suspended");
                    return Ok(());
                }
                (Err(error), None) => {
                    let partial = visitor.partial(None);
                    return self.conclude(Err(Failed::raised(error, partial)));
                }
                (Err(error), Some(_)) => {
                    self.phase.set(Phase::Finished);
                    self.finish.take();
                    debug!(steps = self.steps.get(), "step failed after settling; run abandoned");
                    return Err(error);
                }
            }
        }
    }

    fn conclude(&self, outcome: Outcome<V::Output, V::Partial, E>) -> Result<(), E> {
        self.phase.set(Phase::Finished);
        debug!(steps = self.steps.get(), failed = outcome.is_err(), "run finished");
        match self.finish.take() {
            Some(finish) => finish(outcome),
            None => Ok(()),
        }
    }
}

impl<E, V, F> Resume<V::Report, E> for Run<E, V, F>
where
    V: Visitor<E> + 'static,
    F: FnOnce(Outcome<V::Output, V::Partial, E>) -> Result<(), E> + 'static,
    E: 'static,
{
    fn resume(self: Rc<Self>, settled: Settled<V::Report, E>) -> Result<(), E> {
        match self.phase.get() {
            Phase::Visiting => {
                self.settled.set(Some(settled));
                Ok(())
            }
            Phase::Waiting => {
                trace!(steps = self.steps.get(), "run resumed");
                self.drive(Some(settled))
            }
            Phase::Finished => {
                trace!("completion after the run finished; ignored");
                Ok(())
            }
        }
    }
}
