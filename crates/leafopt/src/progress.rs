//! Progress records through `tracing`.

use leafopt_core::Observer;
use tracing::{debug, info, warn};

use crate::event::{Action, Event};

/// An observer that logs every event and never intervenes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressLog;

impl<'a> Observer<Event<'a>, Action> for ProgressLog {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        match *event {
            Event::Started { n_init, starts } => {
                info!(n_init, starts, "starting multi-start optimization");
            }
            Event::Attempted {
                n_init,
                index,
                attempt,
            } => {
                debug!(
                    n_init,
                    index,
                    value = attempt.value,
                    convergence = attempt.convergence.code(),
                    "local optimization finished"
                );
            }
            Event::Finished { n_init, best } => {
                info!(
                    n_init,
                    value = best.value,
                    convergence = best.convergence.code(),
                    x = ?best.x,
                    "multi-start optimization finished"
                );
            }
            Event::Refit { n_init } => {
                warn!(n_init, "no attempt converged, refitting on a finer grid");
            }
        }
        None
    }
}
