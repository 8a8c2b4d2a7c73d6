//! Two-region labels from the sign of the level set.

use crate::grid::Field;
use crate::BoolGrid;

/// `true` if a level-set value marks the foreground.
#[inline]
pub fn is_foreground(phi: f64) -> bool {
    phi < 0.0
}

/// Labels every pixel with `phi < 0` as foreground (`true`).
pub fn extract_partition(phi: &Field) -> BoolGrid {
    let mut res = BoolGrid::new(phi.width(), phi.height());
    for (x, y, value) in res.iter_mut() {
        *value = is_foreground(phi.at(x, y));
    }
    res
}

/// Number of pixels whose label differs between `previous` and `current`.
pub fn changed_pixels(previous: &Field, current: &Field) -> usize {
    previous
        .as_slice()
        .iter()
        .zip(current.as_slice())
        .filter(|&(&p, &n)| is_foreground(p) != is_foreground(n))
        .count()
}
