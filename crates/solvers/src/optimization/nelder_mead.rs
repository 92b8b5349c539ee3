//! Bounded Nelder–Mead minimization.
//!
//! Runs `argmin`'s Nelder–Mead simplex search in unbounded coordinates that
//! [`Bounds::from_internal`] maps into the box, so every vertex is a distinct
//! feasible point and a bound is reached smoothly rather than by clamping.
//! A vertex whose objective cannot be computed costs [`Config::penalty`].
//!
//! After the simplex converges the search restarts from a fresh simplex
//! around the best vertex, which recovers from a simplex that collapsed
//! along a bound before reaching the minimum.

mod config;

pub use config::{Config, ConfigError};

use argmin::core::{Executor, State, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use leafopt_core::{MinimizationProblem, Model};

use super::{
    Bounds, Error, Solution,
    adapter::{Adapter, Space},
};

/// Minimizes the problem inside `bounds`, starting from `x0`.
///
/// A start outside the bounds is clamped first.
///
/// # Errors
///
/// Returns an error if the best vertex found still fails to evaluate.
pub fn minimize<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    bounds: &Bounds<N>,
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let adapter = Adapter::new(model, problem, bounds, Space::Sine, config.penalty());
    let start = bounds.clamp(&x0)?;

    let mut run = search(adapter, &start, bounds, config)?;
    let mut iters = run.iters;
    for _ in 0..config.restarts() {
        let start = adapter.point(&run.best)?;
        let next = search(adapter, &start, bounds, config)?;
        iters += next.iters;

        let improved = next.cost < run.cost;
        if next.cost <= run.cost {
            run = next;
        }
        if !improved {
            break;
        }
    }

    adapter.conclude(Some(&run.best), &run.termination, iters)
}

/// One converged simplex, in solver coordinates.
struct Run {
    best: Vec<f64>,
    cost: f64,
    termination: TerminationStatus,
    iters: u64,
}

fn search<M, P, const N: usize>(
    adapter: Adapter<'_, M, P, N>,
    start: &[f64; N],
    bounds: &Bounds<N>,
    config: &Config,
) -> Result<Run, Error>
where
    M: Model,
    P: MinimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let simplex = initial_simplex(start, bounds, config.initial_step())
        .iter()
        .map(|vertex| bounds.to_internal(vertex).to_vec())
        .collect();
    let solver: NelderMead<Vec<f64>, f64> = NelderMead::new(simplex)
        .with_sd_tolerance(config.sd_tol())
        .map_err(|e| Error::Solver(e.to_string()))?;

    let res = Executor::new(adapter, solver)
        .configure(|state| state.max_iters(config.max_iters()))
        .run()
        .map_err(|e| adapter.error(e))?;

    let state = res.state();
    Ok(Run {
        best: state.get_best_param().ok_or(Error::NoBestPoint)?.clone(),
        cost: state.get_best_cost(),
        termination: state.get_termination_status().clone(),
        iters: state.get_iter(),
    })
}

/// Builds `N + 1` vertices: the start and one step along each axis.
///
/// Each step is a fraction of the bound range and points inward when a
/// forward step would leave the box.
fn initial_simplex<const N: usize>(
    start: &[f64; N],
    bounds: &Bounds<N>,
    fraction: f64,
) -> Vec<[f64; N]> {
    let (lower, upper) = (bounds.lower(), bounds.upper());

    let mut vertices = Vec::with_capacity(N + 1);
    vertices.push(*start);
    for i in 0..N {
        let range = upper[i] - lower[i];
        let step = fraction * range;

        let mut vertex = *start;
        vertex[i] = if start[i] + step <= upper[i] {
            start[i] + step
        } else {
            start[i] - step
        };
        vertices.push(vertex);
    }
    vertices
}
