//! Retrying multi-start cycles on progressively finer grids.

use leafopt_core::Observer;

use crate::{
    Error,
    event::{Action, Event},
    multistart::{Attempt, Convergence, Cycle},
};

/// Where the refit cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefitState {
    /// A cycle at resolution `n_init` is due.
    Attempting { n_init: usize },
    /// The latest cycle converged, or refitting is disabled.
    Converged,
    /// `max_init` was reached without a converged cycle.
    Exhausted,
}

impl RefitState {
    /// Advances the state after a cycle that finished with `convergence`.
    #[must_use]
    pub fn next(self, convergence: Convergence, refit: bool, max_init: usize) -> Self {
        match self {
            Self::Attempting { n_init } => {
                if convergence.is_success() || !refit {
                    Self::Converged
                } else if n_init < max_init {
                    Self::Attempting { n_init: n_init + 1 }
                } else {
                    Self::Exhausted
                }
            }
            done => done,
        }
    }
}

/// The final state of a refit cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Refit {
    pub best: Attempt,
    /// Resolution of the cycle that produced `best`.
    pub n_init: usize,
    /// Number of cycles run.
    pub attempts: usize,
    /// `Attempting` if an observer stopped the cycle early.
    pub state: RefitState,
}

/// Runs `cycle` from resolution `start` until it converges, refitting is
/// disabled, or `max_init` is exhausted.
///
/// Each retry announces itself with [`Event::Refit`], and a
/// [`Action::StopEarly`] response ends the run with the current best.
///
/// # Errors
///
/// Returns the first error raised by `cycle`.
pub(crate) fn run<F, Obs>(
    start: usize,
    max_init: usize,
    refit: bool,
    observer: &mut Obs,
    mut cycle: F,
) -> Result<Refit, Error>
where
    F: FnMut(usize, &mut Obs) -> Result<Cycle, Error>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let mut n_init = start;
    let mut attempts = 0;
    loop {
        let Cycle { best, stopped } = cycle(n_init, &mut *observer)?;
        attempts += 1;

        let state = RefitState::Attempting { n_init }.next(best.convergence, refit, max_init);
        let stop = stopped
            || match state {
                RefitState::Attempting { n_init: next } => {
                    observer.observe(&Event::Refit { n_init: next }) == Some(Action::StopEarly)
                }
                RefitState::Converged | RefitState::Exhausted => true,
            };

        if stop {
            return Ok(Refit {
                best,
                n_init,
                attempts,
                state,
            });
        }
        if let RefitState::Attempting { n_init: next } = state {
            n_init = next;
        }
    }
}
