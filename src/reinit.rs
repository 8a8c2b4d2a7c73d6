//! Level set re-initialization by the Sussman method.
//!
//! Solves `phi_t = S(phi) (1 - |grad phi|)` for a few pseudo-time steps with
//! a Godunov upwind gradient, pulling phi towards a signed distance function
//! while keeping its zero crossing in place.

use rayon::prelude::*;

use crate::grid::{Boundary, Field};

/// Pseudo-time steps per re-initialization.
pub const REINIT_SUBSTEPS: usize = 5;
/// Pseudo-time step size.
pub const REINIT_DT: f64 = 0.3;

/// Smoothed sign `phi / sqrt(phi^2 + 1)`.
#[inline]
pub fn sussman_sign(phi: f64) -> f64 {
    phi / (phi * phi + 1.0).sqrt()
}

/// Godunov upwind gradient magnitudes `(plus, minus)` at `(x, y)`.
///
/// `plus` is the upwind magnitude for fronts moving outward (`S > 0`),
/// `minus` for fronts moving inward.
pub fn upwind_gradient(phi: &Field, x: usize, y: usize, boundary: Boundary) -> (f64, f64) {
    let (xm, xp) = boundary.neighbors(x, phi.width());
    let (ym, yp) = boundary.neighbors(y, phi.height());
    let center = phi.at(x, y);

    let dx_f = phi.at(xp, y) - center;
    let dx_b = center - phi.at(xm, y);
    let dy_f = phi.at(x, yp) - center;
    let dy_b = center - phi.at(x, ym);

    let sq = |v: f64| v * v;
    let plus = (sq(dx_b.max(0.0)) + sq(dx_f.min(0.0)) + sq(dy_b.max(0.0)) + sq(dy_f.min(0.0))).sqrt();
    let minus = (sq(dx_b.min(0.0)) + sq(dx_f.max(0.0)) + sq(dy_b.min(0.0)) + sq(dy_f.max(0.0))).sqrt();
    (plus, minus)
}

/// One pseudo-time step from `current` into `next`.
pub fn sussman_step(current: &Field, next: &mut Field, dt: f64, boundary: Boundary) {
    debug_assert_eq!(current.dimensions(), next.dimensions());
    let width = current.width();

    next.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out)| {
            let row = current.row(y);
            for (x, value) in out.iter_mut().enumerate() {
                let phi = row[x];
                let s = sussman_sign(phi);
                let (plus, minus) = upwind_gradient(current, x, y, boundary);
                let grad = if s > 0.0 { plus } else { minus };
                *value = phi + dt * s * (1.0 - grad);
            }
        });
}

/// Re-initializes `field` in place, using `scratch` as the second buffer.
///
/// Both buffers are swapped back and forth, so after the call `field` holds
/// the result and `scratch` holds garbage.
pub fn reinitialize(field: &mut Field, scratch: &mut Field, boundary: Boundary) {
    debug_assert_eq!(field.dimensions(), scratch.dimensions());
    for _ in 0..REINIT_SUBSTEPS {
        sussman_step(field, scratch, REINIT_DT, boundary);
        std::mem::swap(field, scratch);
    }
}
