//! Start points for the multi-start search.

use crate::{InternalError, TraitSelection};

/// Returns `n` evenly spaced points strictly inside `(lower, upper)`.
///
/// The points are `n + 2` equally spaced values from `lower` to `upper` with
/// both ends dropped.
#[must_use]
pub fn interior_points((lower, upper): (f64, f64), n: usize) -> Vec<f64> {
    let step = (upper - lower) / (n + 1) as f64;
    (1..=n).map(|i| lower + step * i as f64).collect()
}

/// Builds the start grid: the cartesian product of [`interior_points`] over
/// every selected trait, first trait varying slowest.
///
/// Duplicate points are removed, keeping the first. An empty selection gives
/// a single empty point.
///
/// # Errors
///
/// Returns [`InternalError::InitGridSize`] unless the grid holds exactly
/// `n_init` to the power of the number of traits.
pub fn init_grid(traits: &TraitSelection, n_init: usize) -> Result<Vec<Vec<f64>>, InternalError> {
    let mut grid: Vec<Vec<f64>> = vec![Vec::new()];
    for t in traits.iter() {
        let axis = interior_points(t.bounds(), n_init);
        grid = grid
            .into_iter()
            .flat_map(|point| {
                axis.iter().map(move |&value| {
                    let mut next = point.clone();
                    next.push(value);
                    next
                })
            })
            .collect();
    }

    // Keeps first occurrences, so the product order (last trait fastest) survives.
    let mut unique: Vec<Vec<f64>> = Vec::with_capacity(grid.len());
    for point in grid {
        if !unique.contains(&point) {
            unique.push(point);
        }
    }

    let expected = traits.iter().fold(1, |size, _| size * n_init);
    if unique.len() != expected {
        return Err(InternalError::InitGridSize {
            expected,
            found: unique.len(),
        });
    }
    Ok(unique)
}
