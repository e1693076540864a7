//! A single-threaded queue of deferred work.
//!
//! [`Turns`] stands in for "a later turn of the scheduler": a step that wants to
//! complete asynchronously defers the settling of its [`Next`](crate::Next) handle, and
//! whoever owns the queue drains it. Every task runs from the drain loop's frame, so a
//! run resumed by a task starts on a fresh stack.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

use tracing::trace;

type Task<E> = Box<dyn FnOnce() -> Result<(), E>>;

/// FIFO queue of deferred tasks, drained by [`Turns::run`].
///
/// ```rust
/// use std::rc::Rc;
/// use qflow::{Error, Turns, repeat_until};
///
/// let turns: Rc<Turns<Error>> = Rc::new(Turns::new());
/// let mut n = 0;
///
/// let queue = Rc::clone(&turns);
/// repeat_until(
///     move |next| {
///         n += 1;
///         let report = (n == 5).then_some(n);
///         queue.defer(move || next.done(report));
///         Ok(())
///     },
///     |outcome| {
///         assert_eq!(outcome.ok(), Some(5));
///         Ok(())
///     },
/// )
/// .unwrap();
///
/// assert_eq!(turns.run().unwrap(), 5);
/// ```
pub struct Turns<E> {
    queue: RefCell<VecDeque<Task<E>>>,
    draining: Cell<bool>,
}

impl<E> Turns<E> {
    pub fn new() -> Self {
        Turns {
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }

    /// Queues `task` to run on a later turn.
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() -> Result<(), E> + 'static,
    {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Runs queued tasks in order until the queue is empty, including tasks deferred
    /// while draining. Returns the number of turns taken.
    ///
    /// The first task that returns `Err` stops the drain; its error is returned and the
    /// remaining tasks stay queued. Calling `run` from inside a task returns `Ok(0)`
    /// without running anything: the outer drain picks the work up.
    pub fn run(&self) -> Result<usize, E> {
        if self.draining.replace(true) {
            return Ok(0);
        }
        let _draining = Draining(&self.draining);
        let mut turns = 0;
        loop {
            // Release the queue before the task runs; tasks defer more work.
            let task = self.queue.borrow_mut().pop_front();
            let Some(task) = task else {
                break Ok(turns);
            };
            turns += 1;
            if let Err(e) = task() {
                trace!(turns, "deferred task failed");
                break Err(e);
            }
        }
    }
}

/// Clears the draining flag when a drain ends, including by panic.
struct Draining<'a>(&'a Cell<bool>);

impl Drop for Draining<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<E> Default for Turns<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Turns<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turns")
            .field("queued", &self.len())
            .field("draining", &self.draining.get())
            .finish()
    }
}
