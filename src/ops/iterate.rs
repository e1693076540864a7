use std::collections::VecDeque;

use crate::driver::{Visited, Visitor, drive};
use crate::{Advance, Next, Outcome};

/// One step of an [`iterate`] chain: takes the previous step's value (`None` for the
/// first step) and settles with the value for the next one.
pub type Link<T, E> = Box<dyn FnOnce(Option<T>, Next<T, E>) -> Result<(), E>>;

/// Box a closure into a [`Link`].
pub fn link<T, E, F>(f: F) -> Link<T, E>
where
    F: FnOnce(Option<T>, Next<T, E>) -> Result<(), E> + 'static,
{
    Box::new(f)
}

/// Runs a list of steps in order, threading each reported value into the next step.
///
/// Created via [`iterate`]. Each link takes ownership of the previous report, so a link
/// that returns `Err` before settling leaves no partial value: the run fails with `None`.
/// A link that wants to keep state on failure reports it with
/// [`Next::fail_with`](crate::Next::fail_with).
pub struct Iterate<T, E> {
    links: VecDeque<Link<T, E>>,
}

impl<T, E> Iterate<T, E> {
    pub fn new<L>(links: L) -> Self
    where
        L: IntoIterator<Item = Link<T, E>>,
    {
        Iterate {
            links: links.into_iter().collect(),
        }
    }
}

impl<T, E> Visitor<E> for Iterate<T, E> {
    type Report = T;
    type Output = Option<T>;
    type Partial = Option<T>;

    fn visit(mut self, report: Option<T>, next: Next<T, E>) -> Visited<Self, E> {
        match self.links.pop_front() {
            Some(link) => {
                let launched = link(report, next);
                Advance::Continue((self, launched))
            }
            None => Advance::Stop(report),
        }
    }

    fn partial(self, report: Option<T>) -> Option<T> {
        report
    }
}

/// Run `links` in order. Each link receives the value the previous one settled with;
/// `finish` receives the last link's value, or `None` for an empty list.
///
/// ```rust
/// use qflow::{Error, iterate, link};
///
/// iterate(
///     vec![
///         link(|prev: Option<(u32, u32)>, next| {
///             assert_eq!(prev, None);
///             next.done((1, 2))
///         }),
///         link(|prev: Option<(u32, u32)>, next| {
///             let (a, b) = prev.unwrap_or_default();
///             next.done((a + b, a * b))
///         }),
///     ],
///     |outcome| {
///         assert_eq!(outcome.ok(), Some(Some((3, 2))));
///         Ok::<(), Error>(())
///     },
/// )
/// .unwrap();
/// ```
pub fn iterate<T, E, L, F>(links: L, finish: F) -> Result<(), E>
where
    L: IntoIterator<Item = Link<T, E>>,
    F: FnOnce(Outcome<Option<T>, Option<T>, E>) -> Result<(), E> + 'static,
    T: 'static,
    E: 'static,
{
    drive(Iterate::new(links), finish)
}
