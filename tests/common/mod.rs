//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use qflow::{Error, Outcome};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every outcome a final callback was handed, in order.
pub type Seen<T, P> = Rc<RefCell<Vec<Outcome<T, P, Error>>>>;

pub fn seen<T, P>() -> Seen<T, P> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A final callback that records its outcome into `seen`.
pub fn record<T: 'static, P: 'static>(
    seen: &Seen<T, P>,
) -> impl FnOnce(Outcome<T, P, Error>) -> Result<(), Error> + 'static {
    let seen = Rc::clone(seen);
    move |outcome| {
        seen.borrow_mut().push(outcome);
        Ok(())
    }
}
