/// Decision a visitor makes on each turn of the driver loop: keep going or stop.
///
/// `Advance` is the return type of [`Visitor::visit`](crate::Visitor::visit). `Continue`
/// carries whatever the driver needs to keep the run alive (the visitor itself and the
/// result of launching the next step), `Stop` carries the final output.
///
/// # Examples
///
/// ```rust
/// use qflow::Advance;
///
/// let going: Advance<u32, &str> = Advance::Continue(1);
/// assert_eq!(going.map_continue(|n| n + 1), Advance::Continue(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advance<C, O> {
    /// A step was launched and the run goes on
    Continue(C),
    /// The run is over with a final output
    Stop(O),
}

impl<C, O> Advance<C, O> {
    /// Maps the `Continue` payload, leaving a final output untouched.
    ///
    /// Used when a visitor wraps another one and has to re-wrap the inner visitor
    /// handed back by the driver loop.
    #[inline]
    pub fn map_continue<C2, F>(self, f: F) -> Advance<C2, O>
    where
        F: FnOnce(C) -> C2,
    {
        match self {
            Advance::Continue(c) => Advance::Continue(f(c)),
            Advance::Stop(o) => Advance::Stop(o),
        }
    }
}

impl<O> Advance<(), O> {
    /// Stops with `output` if present, continues otherwise.
    ///
    /// This is the decision of a "repeat until" loop: the step's report is the stop
    /// signal, and its value becomes the final output.
    ///
    /// ```rust
    /// use qflow::Advance;
    ///
    /// assert_eq!(Advance::until(Some(7)), Advance::Stop(7));
    /// assert_eq!(Advance::until(None::<u8>), Advance::Continue(()));
    /// ```
    #[inline]
    pub fn until(output: Option<O>) -> Self {
        match output {
            Some(o) => Advance::Stop(o),
            None => Advance::Continue(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_continue_keeps_stop() {
        let s: Advance<i32, &str> = Advance::Stop("done");
        assert_eq!(s.map_continue(|x| x * 2), Advance::Stop("done"));

        let c: Advance<i32, &str> = Advance::Continue(4);
        assert_eq!(c.map_continue(|x| (x, "visitor")), Advance::Continue((4, "visitor")));
    }

    #[test]
    fn test_until() {
        assert_eq!(Advance::until(Some("id")), Advance::Stop("id"));
        assert_eq!(Advance::<(), &str>::until(None), Advance::Continue(()));
    }
}
