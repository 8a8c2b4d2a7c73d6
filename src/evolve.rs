//! One explicit time step of the Chan-Vese gradient descent.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::config::SolverConfig;
use crate::grid::{Boundary, Field};

/// Gradients with squared magnitude at or below this have zero curvature.
pub const FLAT_GRADIENT: f64 = 1e-12;

/// Mean intensity inside (`phi < 0`) and outside (`phi >= 0`) the contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStatistics {
    pub mean_inside: f64,
    pub mean_outside: f64,
    pub count_inside: usize,
    pub count_outside: usize,
}

/// Computes the region means. An empty region has mean `0`.
pub fn region_statistics(samples: &Field, phi: &Field) -> RegionStatistics {
    let (sum_in, count_in, sum_out, count_out) = samples
        .as_slice()
        .iter()
        .zip(phi.as_slice())
        .fold((0.0, 0usize, 0.0, 0usize), |acc, (&i, &p)| {
            if p < 0.0 {
                (acc.0 + i, acc.1 + 1, acc.2, acc.3)
            } else {
                (acc.0, acc.1, acc.2 + i, acc.3 + 1)
            }
        });

    let mean = |sum: f64, count: usize| if count > 0 { sum / count as f64 } else { 0.0 };
    RegionStatistics {
        mean_inside: mean(sum_in, count_in),
        mean_outside: mean(sum_out, count_out),
        count_inside: count_in,
        count_outside: count_out,
    }
}

/// Regularized Dirac delta `(eps / pi) / (eps^2 + phi^2)`.
#[inline]
pub fn dirac(phi: f64, epsilon: f64) -> f64 {
    (epsilon / PI) / (epsilon * epsilon + phi * phi)
}

/// Curvature of the level set through `(x, y)` from central differences.
pub fn curvature(phi: &Field, x: usize, y: usize, boundary: Boundary) -> f64 {
    let (xm, xp) = boundary.neighbors(x, phi.width());
    let (ym, yp) = boundary.neighbors(y, phi.height());
    let center = phi.at(x, y);

    let px = (phi.at(xp, y) - phi.at(xm, y)) * 0.5;
    let py = (phi.at(x, yp) - phi.at(x, ym)) * 0.5;
    let pxx = phi.at(xp, y) - 2.0 * center + phi.at(xm, y);
    let pyy = phi.at(x, yp) - 2.0 * center + phi.at(x, ym);
    let pxy = (phi.at(xp, yp) - phi.at(xm, yp) - phi.at(xp, ym) + phi.at(xm, ym)) / 4.0;

    let denom = px * px + py * py;
    if denom <= FLAT_GRADIENT {
        return 0.0;
    }
    -(pxx * py * py - 2.0 * px * py * pxy + pyy * px * px) / denom
}

/// Rate of change of phi at one pixel, before scaling by the time step.
#[inline]
fn speed(sample: f64, phi: f64, kappa: f64, stats: &RegionStatistics, config: &SolverConfig) -> f64 {
    let inside = sample - stats.mean_inside;
    let outside = sample - stats.mean_outside;
    dirac(phi, config.epsilon)
        * (config.mu * kappa + config.lambda1 * inside * inside - config.lambda2 * outside * outside
            + config.nu)
}

/// Advances `current` by one time step, writing the result into `next`.
///
/// `current` is only read, so every pixel sees the same pre-update values.
/// All three fields must share dimensions.
pub fn evolve(
    samples: &Field,
    current: &Field,
    next: &mut Field,
    config: &SolverConfig,
) -> RegionStatistics {
    debug_assert_eq!(samples.dimensions(), current.dimensions());
    debug_assert_eq!(current.dimensions(), next.dimensions());

    let stats = region_statistics(samples, current);
    let width = current.width();
    let boundary = config.evolution_boundary;

    next.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out)| {
            let row = current.row(y);
            let intensities = samples.row(y);
            for (x, value) in out.iter_mut().enumerate() {
                let kappa = curvature(current, x, y, boundary);
                let phi = row[x];
                *value = phi + config.time_step * speed(intensities[x], phi, kappa, &stats, config);
            }
        });

    stats
}
