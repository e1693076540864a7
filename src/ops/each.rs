use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// Runs a step for every item, for its effect only.
///
/// Created via [`apply_visitor`].
pub struct ApplyVisitor<I, F> {
    items: I,
    visit: F,
}

impl<I, F> ApplyVisitor<I, F> {
    pub fn new<T>(items: T, visit: F) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        ApplyVisitor {
            items: items.into_iter(),
            visit,
        }
    }
}

impl<E, I, F> Visitor<E> for ApplyVisitor<I, F>
where
    I: Iterator,
    F: FnMut(I::Item, Next<(), E>) -> Result<(), E>,
{
    type Report = ();
    type Output = ();
    type Partial = ();

    fn visit(mut self, _report: Option<()>, next: Next<(), E>) -> Visited<Self, E> {
        match self.items.next() {
            Some(item) => {
                let launched = (self.visit)(item, next);
                Advance::Continue((self, launched))
            }
            None => Advance::Stop(()),
        }
    }

    fn partial(self, _report: Option<()>) {}
}

/// Call `visit` on each item in order, waiting for each step to settle before the next.
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use qflow::{Error, apply_visitor};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// apply_visitor(
///     ["a", "b", "c"],
///     move |item, next| {
///         sink.borrow_mut().push(item);
///         next.ok()
///     },
///     |outcome| {
///         assert!(outcome.is_ok());
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
///
/// assert_eq!(*seen.borrow(), ["a", "b", "c"]);
/// ```
pub fn apply_visitor<T, E, V, F>(items: T, visit: V, finish: F) -> Result<(), E>
where
    T: IntoIterator,
    T::IntoIter: 'static,
    V: FnMut(T::Item, Next<(), E>) -> Result<(), E> + 'static,
    F: FnOnce(Outcome<(), (), E>) -> Result<(), E> + 'static,
    E: 'static,
{
    drive(ApplyVisitor::new(items, visit), finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Origin, Turns};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<Outcome<(), (), Error>>>>;

    fn record(seen: &Seen) -> impl FnOnce(Outcome<(), (), Error>) -> Result<(), Error> + 'static {
        let seen = Rc::clone(seen);
        move |outcome| {
            seen.borrow_mut().push(outcome);
            Ok(())
        }
    }

    #[test]
    fn test_apply_visitor_visits_in_order() {
        let seen: Seen = Rc::default();
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);

        apply_visitor(
            1..=5u32,
            move |x, next| {
                sink.borrow_mut().push(x);
                next.ok()
            },
            record(&seen),
        )
        .unwrap();

        assert_eq!(*visited.borrow(), [1, 2, 3, 4, 5]);
        assert!(seen.borrow()[0].is_ok());
    }

    #[test]
    fn test_apply_visitor_stops_at_raised_error() {
        let seen: Seen = Rc::default();
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);

        apply_visitor(
            1..=5u32,
            move |x, next| {
                if x == 3 {
                    return Err(Error::msg("three"));
                }
                sink.borrow_mut().push(x);
                next.ok()
            },
            record(&seen),
        )
        .unwrap();

        assert_eq!(*visited.borrow(), [1, 2]);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let failed = seen[0].as_ref().unwrap_err();
        assert_eq!(failed.to_string(), "three");
        assert_eq!(failed.origin, Origin::Raised);
    }

    #[test]
    fn test_apply_visitor_deferred_steps() {
        let turns: Rc<Turns<Error>> = Rc::new(Turns::new());
        let seen: Seen = Rc::default();
        let queue = Rc::clone(&turns);
        let visited = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&visited);

        apply_visitor(
            vec!["x", "y"],
            move |item, next| {
                let sink = Rc::clone(&sink);
                queue.defer(move || {
                    sink.borrow_mut().push(item);
                    next.ok()
                });
                Ok(())
            },
            record(&seen),
        )
        .unwrap();

        assert!(visited.borrow().is_empty());
        assert_eq!(turns.run().unwrap(), 2);
        assert_eq!(*visited.borrow(), ["x", "y"]);
        assert!(seen.borrow()[0].is_ok());
    }
}
