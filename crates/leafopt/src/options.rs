use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Run options for [`optimize_leaf`](crate::optimize_leaf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Convert every quantity to its canonical unit before solving.
    ///
    /// When `false`, magnitudes are used as if already canonical.
    pub set_units: bool,
    /// Initial grid points per trait.
    pub n_init: usize,
    /// Validate options, costs, and parameter ranges before any work.
    pub check: bool,
    /// Suppress progress records.
    pub quiet: bool,
    /// Retry with a finer grid when no attempt converges.
    pub refit: bool,
    /// Largest grid resolution tried by the refit cycle.
    pub max_init: usize,
}

/// Errors raised by [`Options::validate`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OptionsError {
    #[error("n_init must be at least 1")]
    NInit,

    #[error("max_init ({max_init}) must be at least n_init ({n_init})")]
    MaxInit { n_init: usize, max_init: usize },
}

impl Default for Options {
    fn default() -> Self {
        Self {
            set_units: true,
            n_init: 1,
            check: true,
            quiet: false,
            refit: true,
            max_init: 3,
        }
    }
}

impl Options {
    /// Checks the grid settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_init` is zero or exceeds `max_init`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.n_init == 0 {
            return Err(OptionsError::NInit);
        }
        if self.max_init < self.n_init {
            return Err(OptionsError::MaxInit {
                n_init: self.n_init,
                max_init: self.max_init,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Options::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_grid_settings() {
        let options = Options {
            n_init: 0,
            ..Options::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::NInit));

        let options = Options {
            n_init: 4,
            ..Options::default()
        };
        assert_eq!(
            options.validate(),
            Err(OptionsError::MaxInit {
                n_init: 4,
                max_init: 3
            })
        );
    }
}
