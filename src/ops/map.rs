use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// Transforms each item in order, collecting the results.
///
/// Created via [`map`].
pub struct Map<I, U, F> {
    items: I,
    out: Vec<U>,
    transform: F,
}

impl<I: Iterator, U, F> Map<I, U, F> {
    pub fn new<T>(items: T, transform: F) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        let items = items.into_iter();
        Map {
            out: Vec::with_capacity(items.size_hint().0),
            items,
            transform,
        }
    }
}

impl<E, I, U, F> Visitor<E> for Map<I, U, F>
where
    I: Iterator,
    F: FnMut(I::Item, Next<U, E>) -> Result<(), E>,
{
    type Report = U;
    type Output = Vec<U>;
    type Partial = Vec<U>;

    fn visit(mut self, report: Option<U>, next: Next<U, E>) -> Visited<Self, E> {
        self.out.extend(report);
        match self.items.next() {
            Some(item) => {
                let launched = (self.transform)(item, next);
                Advance::Continue((self, launched))
            }
            None => Advance::Stop(self.out),
        }
    }

    fn partial(self, _report: Option<U>) -> Vec<U> {
        self.out
    }
}

/// Transform `items` one at a time with `transform`; `finish` receives the results in
/// input order. On failure it receives the results built before the failing item.
///
/// ```rust
/// use qflow::{Error, map};
///
/// map(
///     vec![1, 2, 3, 4],
///     |x: i32, next| next.done(x + x),
///     |outcome| {
///         assert_eq!(outcome.ok(), Some(vec![2, 4, 6, 8]));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub fn map<T, U, E, M, F>(items: T, transform: M, finish: F) -> Result<(), E>
where
    T: IntoIterator,
    T::IntoIter: 'static,
    M: FnMut(T::Item, Next<U, E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<Vec<U>, Vec<U>, E>) -> Result<(), E> + 'static,
    U: 'static,
    E: 'static,
{
    drive(Map::new(items, transform), finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Origin};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<Outcome<Vec<u32>, Vec<u32>, Error>>>>;

    fn record(
        seen: &Seen,
    ) -> impl FnOnce(Outcome<Vec<u32>, Vec<u32>, Error>) -> Result<(), Error> + 'static {
        let seen = Rc::clone(seen);
        move |outcome| {
            seen.borrow_mut().push(outcome);
            Ok(())
        }
    }

    #[test]
    fn test_map_doubles_in_order() {
        let seen: Seen = Rc::default();
        map(vec![1u32, 2, 3, 4], |x, next| next.done(x + x), record(&seen)).unwrap();
        assert_eq!(seen.borrow()[0].as_ref().ok(), Some(&vec![2, 4, 6, 8]));
    }

    #[test]
    fn test_map_raise_forwards_partial_results() {
        let seen: Seen = Rc::default();
        map(
            vec![1u32, 2, 3, 4],
            |x, next| {
                if x == 3 {
                    return Err(Error::msg("die"));
                }
                next.done(x + x)
            },
            record(&seen),
        )
        .unwrap();

        let seen = seen.borrow();
        let failed = seen[0].as_ref().unwrap_err();
        assert_eq!(failed.to_string(), "die");
        assert_eq!(failed.partial, vec![2, 4]);
        assert_eq!(failed.origin, Origin::Raised);
    }

    #[test]
    fn test_map_empty_input() {
        let seen: Seen = Rc::default();
        map(Vec::<u32>::new(), |x, next| next.done(x), record(&seen)).unwrap();
        assert_eq!(seen.borrow()[0].as_ref().ok(), Some(&Vec::new()));
    }

    #[test]
    fn test_map_many_synchronous_items() {
        let seen: Seen = Rc::default();
        map(0..50_000u32, |x, next| next.done(x % 7), record(&seen)).unwrap();

        let seen = seen.borrow();
        let out = seen[0].as_ref().unwrap();
        assert_eq!(out.len(), 50_000);
        assert_eq!(out[49_999], 49_999 % 7);
    }
}
