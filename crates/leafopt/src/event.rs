//! Progress events emitted while optimizing.

use crate::multistart::Attempt;

/// An event observed during [`optimize_leaf_with`](crate::optimize_leaf_with).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// A multi-start cycle is about to run `starts` local optimizations.
    Started { n_init: usize, starts: usize },

    /// One local optimization finished.
    Attempted {
        n_init: usize,
        index: usize,
        attempt: &'a Attempt,
    },

    /// A multi-start cycle finished with `best` as its result.
    Finished { n_init: usize, best: &'a Attempt },

    /// No attempt converged and a finer grid is about to be tried.
    Refit { n_init: usize },
}

/// A control action returned by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop after the current event and report the best attempt so far.
    ///
    /// Ignored on [`Event::Started`] and [`Event::Finished`].
    StopEarly,
}
