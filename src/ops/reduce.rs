use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// Folds items into an accumulator, one step per item.
///
/// Created via [`reduce`].
pub struct Reduce<I, A, F> {
    items: I,
    acc: A,
    combine: F,
}

impl<I, A, F> Reduce<I, A, F> {
    pub fn new<T>(items: T, initial: A, combine: F) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Reduce {
            items: items.into_iter(),
            acc: initial,
            combine,
        }
    }
}

impl<E, I, A, F> Visitor<E> for Reduce<I, A, F>
where
    I: Iterator,
    F: FnMut(&A, I::Item, Next<A, E>) -> Result<(), E>,
{
    type Report = A;
    type Output = A;
    type Partial = A;

    fn visit(mut self, report: Option<A>, next: Next<A, E>) -> Visited<Self, E> {
        if let Some(acc) = report {
            self.acc = acc;
        }
        match self.items.next() {
            Some(item) => {
                let launched = (self.combine)(&self.acc, item, next);
                Advance::Continue((self, launched))
            }
            None => Advance::Stop(self.acc),
        }
    }

    /// A value attached to the error wins over the last good accumulator.
    fn partial(self, report: Option<A>) -> A {
        report.unwrap_or(self.acc)
    }
}

/// Fold `items` into `initial` with `combine`, one step per item.
///
/// `combine` sees the current accumulator and the next item, and settles with the new
/// accumulator. If a step fails, `finish` receives the accumulator as of the last
/// successful step.
///
/// ```rust
/// use qflow::{Error, reduce};
///
/// reduce(
///     [1, 2, 3, 4, 5],
///     String::new(),
///     |acc: &String, item: i32, next| next.done(format!("{acc}.{item}")),
///     |outcome| {
///         assert_eq!(outcome.ok().as_deref(), Some(".1.2.3.4.5"));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub fn reduce<T, A, E, C, F>(items: T, initial: A, combine: C, finish: F) -> Result<(), E>
where
    T: IntoIterator,
    T::IntoIter: 'static,
    C: FnMut(&A, T::Item, Next<A, E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<A, A, E>) -> Result<(), E> + 'static,
    A: 'static,
    E: 'static,
{
    drive(Reduce::new(items, initial, combine), finish)
}
