use argmin::core::{TerminationReason, TerminationStatus};
use leafopt_core::Snapshot;

/// How a bounded minimizer finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A convergence criterion was met.
    Converged,
    /// The iteration limit was reached first.
    MaxIters,
    /// The solver stopped for another reason (for example a line search exit).
    Exited,
}

impl Status {
    pub(super) fn from_termination(status: &TerminationStatus) -> Self {
        match status {
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached,
            ) => Self::Converged,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => Self::MaxIters,
            _ => Self::Exited,
        }
    }
}

/// The best point found by a bounded minimizer.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    pub status: Status,
    pub x: [f64; N],
    pub objective: f64,
    pub snapshot: Snapshot<I, O>,
    pub iters: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_termination_reasons() {
        assert_eq!(
            Status::from_termination(&TerminationStatus::Terminated(
                TerminationReason::SolverConverged
            )),
            Status::Converged
        );
        assert_eq!(
            Status::from_termination(&TerminationStatus::Terminated(
                TerminationReason::MaxItersReached
            )),
            Status::MaxIters
        );
        assert_eq!(
            Status::from_termination(&TerminationStatus::NotTerminated),
            Status::Exited
        );
    }
}
