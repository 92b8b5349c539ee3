use crate::equation::Evaluation;

use super::Bracket;

/// Emitted by the bisection solver after each successful evaluation.
#[derive(Debug)]
pub enum Event<'a, I, O> {
    /// One end of the starting interval, left first.
    Endpoint { eval: &'a Evaluation<I, O> },

    /// The midpoint of `bracket`, evaluated on iteration `iter`.
    Step {
        iter: usize,
        bracket: &'a Bracket,
        eval: &'a Evaluation<I, O>,
    },
}

impl<'a, I, O> Event<'a, I, O> {
    #[must_use]
    pub fn eval(&self) -> &'a Evaluation<I, O> {
        match self {
            Event::Endpoint { eval } | Event::Step { eval, .. } => *eval,
        }
    }
}

/// What an observer can ask of the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and report the closest evaluation so far.
    StopEarly,
}
