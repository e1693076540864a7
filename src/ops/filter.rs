use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// Keeps the items a predicate step accepts.
///
/// Created via [`filter`].
pub struct Filter<I: Iterator, F> {
    items: I,
    current: Option<I::Item>,
    out: Vec<I::Item>,
    predicate: F,
}

impl<I: Iterator, F> Filter<I, F> {
    pub fn new<T>(items: T, predicate: F) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Filter {
            items: items.into_iter(),
            current: None,
            out: Vec::new(),
            predicate,
        }
    }
}

impl<E, I, F> Visitor<E> for Filter<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, Next<bool, E>) -> Result<(), E>,
{
    type Report = bool;
    type Output = Vec<I::Item>;
    type Partial = Vec<I::Item>;

    fn visit(mut self, report: Option<bool>, next: Next<bool, E>) -> Visited<Self, E> {
        let kept = self.current.take();
        if report == Some(true) {
            self.out.extend(kept);
        }
        match self.items.next() {
            Some(item) => {
                let item = self.current.insert(item);
                let launched = (self.predicate)(item, next);
                Advance::Continue((self, launched))
            }
            None => Advance::Stop(self.out),
        }
    }

    fn partial(self, _report: Option<bool>) -> Vec<I::Item> {
        self.out
    }
}

/// Keep the items of `items` for which `predicate` settles with `true`, in input order.
/// On failure `finish` receives the items kept so far.
///
/// ```rust
/// use qflow::{Error, filter};
///
/// filter(
///     1..=10,
///     |x: &i32, next| next.done(x % 2 == 0),
///     |outcome| {
///         assert_eq!(outcome.ok(), Some(vec![2, 4, 6, 8, 10]));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub fn filter<T, E, P, F>(items: T, predicate: P, finish: F) -> Result<(), E>
where
    T: IntoIterator,
    T::IntoIter: 'static,
    T::Item: 'static,
    P: FnMut(&T::Item, Next<bool, E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<Vec<T::Item>, Vec<T::Item>, E>) -> Result<(), E> + 'static,
    E: 'static,
{
    drive(Filter::new(items, predicate), finish)
}
