//! This crate provides a solver for the two-phase piecewise-constant
//! segmentation model described in
//! [Active contours without edges](http://ieeexplore.ieee.org/document/902291/)
//! by T. Chan and L. Vese.
//!
//! A level-set function phi is evolved over the whole image by explicit
//! gradient descent on the fitting energy plus a curvature term, and
//! periodically re-initialized to a signed distance function. Pixels with
//! `phi < 0` form the foreground.
//!
//! # Examples
//!
//! ```
//! extern crate chanvese_solver;
//!
//! use chanvese_solver::{segment, FloatGrid, Rect, SolverConfig};
//!
//! fn main() {
//!     // a bright square on a dark background
//!     let mut img = FloatGrid::new(32, 32);
//!     for (x, y, value) in img.iter_mut() {
//!         if x >= 10 && x < 22 && y >= 10 && y < 22 {
//!             *value = 180.;
//!         }
//!     }
//!
//!     // a rough initial region
//!     let roi = Rect { x0: 6, y0: 6, x1: 26, y1: 26 };
//!
//!     let config = SolverConfig::default().with_max_iterations(300);
//!     let seg = segment(&img, Some(&roi), &config).unwrap();
//!     assert!(*seg.get(16, 16).unwrap());
//!     assert!(!*seg.get(0, 0).unwrap());
//! }
//! ```
//!
//! To load and save images with the functions inside module
//! `chanvese_solver::utils` you need to compile this crate with the feature
//! `image-utils`.

pub use distance_transform::{BoolGrid, FloatGrid};

pub mod config;
pub mod error;
pub mod evolve;
pub mod grid;
pub mod init;
pub mod normalize;
pub mod partition;
pub mod reinit;
pub mod solver;

#[cfg(feature = "image-utils")]
pub mod utils;

pub use config::{Convergence, RegionInit, SolverConfig};
pub use error::{Error, Result};
pub use evolve::{curvature, dirac, evolve, region_statistics, RegionStatistics};
pub use grid::{Boundary, Field};
pub use init::{initial_level_set, mask_to_phi, Disk, Mask, Rect, Region};
pub use normalize::normalize;
pub use partition::{changed_pixels, extract_partition};
pub use reinit::reinitialize;
pub use solver::{Progress, Segmentation, Solver};

/// Segments `samples` into foreground (`true`) and background (`false`).
///
/// # Arguments
///
/// * `samples` - the input image, any non-negative intensities
/// * `initial_region` - optional starting region; a centered disk otherwise
/// * `config` - solver parameters, see [`SolverConfig`]
pub fn segment(
    samples: &FloatGrid,
    initial_region: Option<&dyn Region>,
    config: &SolverConfig,
) -> Result<BoolGrid> {
    Ok(chanvese(samples, initial_region, config, |_| {})?.partition)
}

/// Like [`segment`], calling `progress` about every tenth of the run.
pub fn segment_with_progress<F>(
    samples: &FloatGrid,
    initial_region: Option<&dyn Region>,
    config: &SolverConfig,
    progress: F,
) -> Result<BoolGrid>
where
    F: FnMut(Progress),
{
    Ok(chanvese(samples, initial_region, config, progress)?.partition)
}

/// Runs the Chan-Vese algorithm
///
/// Returns the resulting mask (`true` = foreground, `false` = background),
/// the level-set function and the number of iterations.
pub fn chanvese<F>(
    samples: &FloatGrid,
    initial_region: Option<&dyn Region>,
    config: &SolverConfig,
    progress: F,
) -> Result<Segmentation>
where
    F: FnMut(Progress),
{
    let mut solver = Solver::new(samples, initial_region, config.clone())?;
    solver.run_with_progress(progress);
    Ok(solver.finish())
}
