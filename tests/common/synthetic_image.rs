use chanvese_solver::{BoolGrid, FloatGrid};
use rand::distributions::{IndependentSample, Range};
use rand::Rng;

/// `true` for pixels in the half-open square `lo..hi` on both axes.
pub fn in_square(x: usize, y: usize, lo: usize, hi: usize) -> bool {
    x >= lo && x < hi && y >= lo && y < hi
}

/// A `size` x `size` image with value `fg` on the square `lo..hi` and `bg`
/// elsewhere.
pub fn square(size: usize, lo: usize, hi: usize, fg: f64, bg: f64) -> FloatGrid {
    let mut img = FloatGrid::new(size, size);
    for (x, y, value) in img.iter_mut() {
        *value = if in_square(x, y, lo, hi) { fg } else { bg };
    }
    img
}

/// Like [`square`], with uniform noise in `[-amplitude / 2, amplitude / 2)`.
pub fn noisy_square<R: Rng>(
    size: usize,
    lo: usize,
    hi: usize,
    fg: f64,
    bg: f64,
    amplitude: f64,
    rng: &mut R,
) -> FloatGrid {
    let noiserange = Range::new(-amplitude / 2.0, amplitude / 2.0);
    let mut img = square(size, lo, hi, fg, bg);
    for (_, _, value) in img.iter_mut() {
        *value += noiserange.ind_sample(rng);
    }
    img
}

/// Fraction of pixels where `seg` agrees with `truth(x, y)`.
pub fn accuracy<F: Fn(usize, usize) -> bool>(seg: &BoolGrid, truth: F) -> f64 {
    let (hits, total) = seg.iter().fold((0usize, 0usize), |acc, (x, y, &v)| {
        (acc.0 + (v == truth(x, y)) as usize, acc.1 + 1)
    });
    hits as f64 / total as f64
}
