//! Solver parameters.
//!
//! [`SolverConfig::default()`] reproduces the classic parameter set
//! (`tau = 0.1`, 5000 iterations, `mu = 0.02`, `lambda1 = 2`, `lambda2 = 1`,
//! `nu = 0`, reinitialization every 10 iterations, `epsilon = 1`).
//!
//! ```
//! use chanvese_solver::SolverConfig;
//!
//! let config = SolverConfig::default()
//!     .with_max_iterations(200)
//!     .with_mu(0.1);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Boundary;

/// How a supplied initial region is turned into the starting level set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionInit {
    /// `-5` inside, `+5` outside. Reinitialization fixes up the distances.
    #[default]
    Indicator,
    /// Signed Euclidean distance to the region boundary.
    SignedDistance,
}

/// Early stop on a stable partition.
///
/// The run stops once at most `max_changed` pixels flip sign between
/// successive iterations for more than `patience` iterations in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    pub max_changed: usize,
    pub patience: u32,
}

impl Default for Convergence {
    fn default() -> Self {
        Self {
            max_changed: 0,
            patience: 5,
        }
    }
}

/// Parameters of the Chan-Vese evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Explicit time step `tau`.
    pub time_step: f64,
    /// Number of iterations `N`.
    pub max_iterations: usize,
    /// Weight of the curvature (length) term `mu`.
    pub mu: f64,
    /// Weight of the inside fitting term `lambda1`.
    pub lambda1: f64,
    /// Weight of the outside fitting term `lambda2`.
    pub lambda2: f64,
    /// Balloon force `nu`, any sign.
    pub nu: f64,
    /// Reinitialize every `k` iterations, `0` disables.
    pub reinit_period: usize,
    /// Width of the regularized Dirac delta.
    pub epsilon: f64,
    /// Neighbor policy of the evolution step.
    pub evolution_boundary: Boundary,
    /// Neighbor policy of reinitialization.
    pub reinit_boundary: Boundary,
    pub region_init: RegionInit,
    /// Optional early stop, `None` runs exactly `max_iterations`.
    pub convergence: Option<Convergence>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            max_iterations: 5000,
            mu: 0.02,
            lambda1: 2.0,
            lambda2: 1.0,
            nu: 0.0,
            reinit_period: 10,
            epsilon: 1.0,
            evolution_boundary: Boundary::Periodic,
            reinit_boundary: Boundary::Clamp,
            region_init: RegionInit::Indicator,
            convergence: None,
        }
    }
}

impl SolverConfig {
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_lambdas(mut self, lambda1: f64, lambda2: f64) -> Self {
        self.lambda1 = lambda1;
        self.lambda2 = lambda2;
        self
    }

    pub fn with_nu(mut self, nu: f64) -> Self {
        self.nu = nu;
        self
    }

    pub fn with_reinit_period(mut self, reinit_period: usize) -> Self {
        self.reinit_period = reinit_period;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_boundaries(mut self, evolution: Boundary, reinit: Boundary) -> Self {
        self.evolution_boundary = evolution;
        self.reinit_boundary = reinit;
        self
    }

    pub fn with_region_init(mut self, region_init: RegionInit) -> Self {
        self.region_init = region_init;
        self
    }

    pub fn with_convergence(mut self, convergence: Convergence) -> Self {
        self.convergence = Some(convergence);
        self
    }

    /// Checks every parameter against its domain.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("time_step", self.time_step),
            ("mu", self.mu),
            ("lambda1", self.lambda1),
            ("lambda2", self.lambda2),
            ("nu", self.nu),
            ("epsilon", self.epsilon),
        ];
        for (parameter, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidConfiguration {
                    parameter,
                    value,
                    reason: "must be finite",
                });
            }
        }

        if self.time_step <= 0.0 {
            return Err(Error::InvalidConfiguration {
                parameter: "time_step",
                value: self.time_step,
                reason: "must be > 0",
            });
        }
        if self.epsilon <= 0.0 {
            return Err(Error::InvalidConfiguration {
                parameter: "epsilon",
                value: self.epsilon,
                reason: "must be > 0",
            });
        }
        for (parameter, value) in [
            ("mu", self.mu),
            ("lambda1", self.lambda1),
            ("lambda2", self.lambda2),
        ] {
            if value < 0.0 {
                return Err(Error::InvalidConfiguration {
                    parameter,
                    value,
                    reason: "must be >= 0",
                });
            }
        }
        Ok(())
    }

    /// Iteration cadence of progress reports, roughly a tenth of the run.
    pub fn progress_interval(&self) -> usize {
        (self.max_iterations / 10).max(1)
    }

    /// Whether reinitialization follows iteration `iteration`.
    pub fn reinit_due(&self, iteration: usize) -> bool {
        self.reinit_period > 0 && iteration % self.reinit_period == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.time_step, 0.1);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.mu, 0.02);
        assert_eq!(config.lambda1, 2.0);
        assert_eq!(config.lambda2, 1.0);
        assert_eq!(config.nu, 0.0);
        assert_eq!(config.reinit_period, 10);
        assert_eq!(config.epsilon, 1.0);
        assert_eq!(config.evolution_boundary, Boundary::Periodic);
        assert_eq!(config.reinit_boundary, Boundary::Clamp);
        assert!(config.convergence.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        let err = SolverConfig::default().with_time_step(0.0).validate();
        assert!(matches!(
            err,
            Err(Error::InvalidConfiguration {
                parameter: "time_step",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_positive_epsilon() {
        let err = SolverConfig::default().with_epsilon(-1.0).validate();
        assert!(matches!(
            err,
            Err(Error::InvalidConfiguration {
                parameter: "epsilon",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_and_negative_weights() {
        assert!(SolverConfig::default().with_nu(f64::NAN).validate().is_err());
        assert!(SolverConfig::default()
            .with_lambdas(-1.0, 1.0)
            .validate()
            .is_err());
        assert!(SolverConfig::default().with_nu(-3.0).validate().is_ok());
        assert!(SolverConfig::default().with_mu(0.0).validate().is_ok());
    }

    #[test]
    fn test_schedule() {
        let config = SolverConfig::default()
            .with_max_iterations(50)
            .with_reinit_period(5);
        assert_eq!(config.progress_interval(), 5);
        assert!(config.reinit_due(0));
        assert!(!config.reinit_due(3));
        assert!(config.reinit_due(10));
        assert!(!config.with_reinit_period(0).reinit_due(0));
        assert_eq!(
            SolverConfig::default()
                .with_max_iterations(3)
                .progress_interval(),
            1
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"mu": 0.5, "reinit_boundary": "periodic"}"#).unwrap();
        assert_eq!(config.mu, 0.5);
        assert_eq!(config.reinit_boundary, Boundary::Periodic);
        assert_eq!(config.max_iterations, 5000);
    }
}
