use std::marker::PhantomData;

use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// Runs a step until it reports a value.
///
/// Created via [`repeat_until`]. Each step settles its handle with `None` to keep going
/// or `Some(value)` to stop; `value` becomes the run's output.
pub struct RepeatUntil<T, S> {
    step: S,
    _output: PhantomData<fn() -> T>,
}

impl<T, S> RepeatUntil<T, S> {
    pub fn new(step: S) -> Self {
        RepeatUntil {
            step,
            _output: PhantomData,
        }
    }
}

impl<T, E, S> Visitor<E> for RepeatUntil<T, S>
where
    S: FnMut(Next<Option<T>, E>) -> Result<(), E>,
{
    type Report = Option<T>;
    type Output = T;
    type Partial = Option<T>;

    fn visit(mut self, report: Option<Option<T>>, next: Next<Option<T>, E>) -> Visited<Self, E> {
        match Advance::until(report.flatten()) {
            Advance::Stop(value) => Advance::Stop(value),
            Advance::Continue(()) => {
                let launched = (self.step)(next);
                Advance::Continue((self, launched))
            }
        }
    }

    fn partial(self, report: Option<Option<T>>) -> Option<T> {
        report.flatten()
    }
}

/// Repeat `step` until it reports `Some(value)`, then call `finish` with that value.
///
/// On failure `finish` receives the error and whatever value the step attached to it.
///
/// ```rust
/// use qflow::{Error, repeat_until};
///
/// let mut loops = 0;
/// repeat_until(
///     move |next| {
///         loops += 1;
///         next.done((loops >= 10).then_some("stop"))
///     },
///     |outcome| {
///         assert_eq!(outcome.ok(), Some("stop"));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub fn repeat_until<T, E, S, F>(step: S, finish: F) -> Result<(), E>
where
    S: FnMut(Next<Option<T>, E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<T, Option<T>, E>) -> Result<(), E> + 'static,
    T: 'static,
    E: 'static,
{
    drive(RepeatUntil::new(step), finish)
}

/// Runs a body while a predicate holds.
///
/// Created via [`repeat_while`]. The predicate is checked before every step, including
/// the first.
pub struct RepeatWhile<P, S> {
    predicate: P,
    body: S,
}

impl<P, S> RepeatWhile<P, S> {
    pub fn new(predicate: P, body: S) -> Self {
        RepeatWhile { predicate, body }
    }
}

impl<E, P, S> Visitor<E> for RepeatWhile<P, S>
where
    P: FnMut() -> bool,
    S: FnMut(Next<(), E>) -> Result<(), E>,
{
    type Report = ();
    type Output = ();
    type Partial = ();

    fn visit(mut self, _report: Option<()>, next: Next<(), E>) -> Visited<Self, E> {
        if !(self.predicate)() {
            return Advance::Stop(());
        }
        let launched = (self.body)(next);
        Advance::Continue((self, launched))
    }

    fn partial(self, _report: Option<()>) {}
}

/// Run `body` for as long as `predicate` returns `true`, then call `finish`.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use qflow::{Error, repeat_while};
///
/// let count = Rc::new(Cell::new(0));
/// let (check, bump) = (Rc::clone(&count), Rc::clone(&count));
///
/// repeat_while(
///     move || check.get() < 3,
///     move |next| {
///         bump.set(bump.get() + 1);
///         next.ok()
///     },
///     |outcome| {
///         assert!(outcome.is_ok());
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
///
/// assert_eq!(count.get(), 3);
/// ```
pub fn repeat_while<E, P, S, F>(predicate: P, body: S, finish: F) -> Result<(), E>
where
    P: FnMut() -> bool + 'static,
    S: FnMut(Next<(), E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<(), (), E>) -> Result<(), E> + 'static,
    E: 'static,
{
    drive(RepeatWhile::new(predicate, body), finish)
}
