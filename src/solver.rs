//! The iteration driver.

use log::{debug, info, trace};

use crate::config::SolverConfig;
use crate::error::Result;
use crate::evolve::{evolve, RegionStatistics};
use crate::grid::Field;
use crate::init::{initial_level_set, Region};
use crate::normalize::normalize;
use crate::partition::{changed_pixels, extract_partition};
use crate::reinit::reinitialize;
use crate::{BoolGrid, FloatGrid};

/// Progress report handed to callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Index of the iteration that just completed, starting at 0.
    pub iteration: usize,
    pub max_iterations: usize,
}

/// Result of a finished run.
pub struct Segmentation {
    /// `true` = foreground, `false` = background.
    pub partition: BoolGrid,
    /// The final level-set function.
    pub phi: FloatGrid,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// A Chan-Vese run in progress.
///
/// Owns the normalized samples and two level-set buffers; each step writes
/// into the spare buffer from the current one and swaps them.
pub struct Solver {
    config: SolverConfig,
    samples: Field,
    phi: Field,
    scratch: Field,
    iteration: usize,
    stable: u32,
    converged: bool,
}

impl Solver {
    /// Builds the initial level set for `samples` and hands over to
    /// [`Solver::with_level_set`].
    pub fn new(
        samples: &FloatGrid,
        region: Option<&dyn Region>,
        config: SolverConfig,
    ) -> Result<Solver> {
        let samples = Field::from_grid(samples)?;
        let phi = initial_level_set(samples.width(), samples.height(), region, config.region_init)?;
        Self::with_level_set(samples, phi, config)
    }

    /// Starts from raw samples and an explicit level set.
    ///
    /// Validates `config`, rejects non-finite values in either field and
    /// mismatched dimensions, then normalizes `samples` into `[0, 1]`.
    pub fn with_level_set(samples: Field, phi: Field, config: SolverConfig) -> Result<Solver> {
        config.validate()?;
        samples.ensure_same_shape(&phi)?;
        samples.ensure_finite()?;
        phi.ensure_finite()?;
        let samples = normalize(&samples);
        let scratch = Field::new(phi.width(), phi.height())?;

        info!(
            "Chan-Vese on {}x{}: tau={} mu={} nu={} lambda1={} lambda2={} eps={} iterations={} reinit every {}",
            samples.width(),
            samples.height(),
            config.time_step,
            config.mu,
            config.nu,
            config.lambda1,
            config.lambda2,
            config.epsilon,
            config.max_iterations,
            config.reinit_period
        );

        Ok(Solver {
            config,
            samples,
            phi,
            scratch,
            iteration: 0,
            stable: 0,
            converged: false,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn samples(&self) -> &Field {
        &self.samples
    }

    /// Current level-set function.
    pub fn phi(&self) -> &Field {
        &self.phi
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the early stop criterion fired.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn is_finished(&self) -> bool {
        self.converged || self.iteration >= self.config.max_iterations
    }

    /// Runs one iteration: an evolution step, followed by re-initialization
    /// when it is due. Returns `None` once the run is finished.
    pub fn step(&mut self) -> Option<RegionStatistics> {
        if self.is_finished() {
            return None;
        }

        let stats = evolve(&self.samples, &self.phi, &mut self.scratch, &self.config);
        std::mem::swap(&mut self.phi, &mut self.scratch);
        trace!(
            "iteration {}: c1={:.6} ({} px) c2={:.6} ({} px)",
            self.iteration,
            stats.mean_inside,
            stats.count_inside,
            stats.mean_outside,
            stats.count_outside
        );

        if let Some(convergence) = self.config.convergence {
            // scratch still holds the field before this step
            let changed = changed_pixels(&self.scratch, &self.phi);
            if changed <= convergence.max_changed {
                self.stable += 1;
            } else {
                self.stable = 0;
            }
            if self.stable > convergence.patience {
                debug!(
                    "partition stable for {} iterations, stopping after iteration {}",
                    self.stable, self.iteration
                );
                self.converged = true;
            }
        }

        if self.config.reinit_due(self.iteration) {
            debug!("re-initializing at iteration {}", self.iteration);
            reinitialize(&mut self.phi, &mut self.scratch, self.config.reinit_boundary);
        }

        self.iteration += 1;
        Some(stats)
    }

    /// Runs to completion.
    pub fn run(&mut self) {
        self.run_with_progress(|_| {});
    }

    /// Runs to completion, reporting progress about every tenth of the run.
    pub fn run_with_progress<F>(&mut self, mut progress: F)
    where
        F: FnMut(Progress),
    {
        let interval = self.config.progress_interval();
        while !self.is_finished() {
            let iteration = self.iteration;
            self.step();
            if iteration % interval == 0 {
                info!("iteration {} / {}", iteration, self.config.max_iterations);
                progress(Progress {
                    iteration,
                    max_iterations: self.config.max_iterations,
                });
            }
        }
    }

    /// Extracts the partition and the final level set.
    pub fn finish(self) -> Segmentation {
        Segmentation {
            partition: extract_partition(&self.phi),
            phi: self.phi.to_grid(),
            iterations: self.iteration,
        }
    }
}
