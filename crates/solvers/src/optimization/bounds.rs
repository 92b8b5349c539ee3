use thiserror::Error;

/// Reasons a set of bounds cannot be used.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    #[error("non-finite bound for variable {index}")]
    NonFinite { index: usize },

    #[error("lower bound exceeds upper bound for variable {index}")]
    Inverted { index: usize },

    #[error("expected {expected} variables, found {found}")]
    Dimension { expected: usize, found: usize },
}

/// A finite box `lower[i] <= x[i] <= upper[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    lower: [f64; N],
    upper: [f64; N],
}

impl<const N: usize> Bounds<N> {
    /// Creates bounds from lower and upper limits.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is non-finite or a lower limit exceeds
    /// its upper limit.
    pub fn new(lower: [f64; N], upper: [f64; N]) -> Result<Self, BoundsError> {
        for index in 0..N {
            if !lower[index].is_finite() || !upper[index].is_finite() {
                return Err(BoundsError::NonFinite { index });
            }
            if lower[index] > upper[index] {
                return Err(BoundsError::Inverted { index });
            }
        }
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn lower(&self) -> &[f64; N] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[f64; N] {
        &self.upper
    }

    /// Returns `true` if `x` lies inside the box.
    #[must_use]
    pub fn contains(&self, x: &[f64; N]) -> bool {
        (0..N).all(|i| self.lower[i] <= x[i] && x[i] <= self.upper[i])
    }

    /// Clamps a point into the box.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Dimension`] if `x` does not have `N` entries.
    pub fn clamp(&self, x: &[f64]) -> Result<[f64; N], BoundsError> {
        let mut clamped: [f64; N] = x.try_into().map_err(|_| BoundsError::Dimension {
            expected: N,
            found: x.len(),
        })?;
        for (i, value) in clamped.iter_mut().enumerate() {
            *value = value.clamp(self.lower[i], self.upper[i]);
        }
        Ok(clamped)
    }

    /// Maps a point in the box to unbounded solver coordinates.
    ///
    /// Each variable goes through `u = asin(2 (x - lo) / (hi - lo) - 1)`, the
    /// inverse of [`from_internal`](Self::from_internal). Fixed variables map
    /// to zero.
    #[must_use]
    pub fn to_internal(&self, x: &[f64; N]) -> [f64; N] {
        let mut u = [0.0; N];
        for (i, value) in u.iter_mut().enumerate() {
            let range = self.upper[i] - self.lower[i];
            if range > 0.0 {
                let scaled = 2.0 * (x[i] - self.lower[i]) / range - 1.0;
                *value = scaled.clamp(-1.0, 1.0).asin();
            }
        }
        u
    }

    /// Maps unbounded solver coordinates back into the box.
    ///
    /// Each variable goes through `x = lo + (hi - lo) (sin u + 1) / 2`, so every
    /// `u` lands inside the bounds and the objective stays smooth near them.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::Dimension`] if `u` does not have `N` entries.
    pub fn from_internal(&self, u: &[f64]) -> Result<[f64; N], BoundsError> {
        let mut x: [f64; N] = u.try_into().map_err(|_| BoundsError::Dimension {
            expected: N,
            found: u.len(),
        })?;
        for (i, value) in x.iter_mut().enumerate() {
            let range = self.upper[i] - self.lower[i];
            let mapped = self.lower[i] + range * (value.sin() + 1.0) / 2.0;
            *value = mapped.clamp(self.lower[i], self.upper[i]);
        }
        Ok(x)
    }

    /// Zeroes gradient components that would push a point at a bound outward.
    pub fn project_gradient(&self, x: &[f64; N], gradient: &mut [f64]) {
        const EPS: f64 = 1e-12;
        for (i, g) in gradient.iter_mut().enumerate().take(N) {
            if x[i] <= self.lower[i] + EPS && *g > 0.0 {
                *g = 0.0;
            }
            if x[i] >= self.upper[i] - EPS && *g < 0.0 {
                *g = 0.0;
            }
        }
    }
}
