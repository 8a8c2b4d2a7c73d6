//! Intensity normalization into the unit range.

use crate::grid::Field;

/// Rescales samples into `[0, 1]` by dividing by the maximum sample.
///
/// A non-positive maximum (e.g. an all-zero image) leaves the values
/// untouched apart from clamping to `[0, 1]`, so the result is always finite.
pub fn normalize(samples: &Field) -> Field {
    let max = samples
        .as_slice()
        .iter()
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));

    let mut result = samples.clone();
    let max = if max > 0.0 { max } else { 1.0 };
    for value in result.as_mut_slice() {
        *value = (*value / max).clamp(0.0, 1.0);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_values_in_unit_range() {
        let raw = Field::from_fn(5, 4, |x, y| (x * 37 + y * 11) as f64).unwrap();
        let norm = normalize(&raw);
        assert!(norm.as_slice().iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert_relative_eq!(norm.at(4, 3), 1.0);
        assert_relative_eq!(norm.at(1, 0), 37.0 / (4.0 * 37.0 + 3.0 * 11.0));
    }

    #[test]
    fn test_all_zero_stays_zero() {
        let raw = Field::new(3, 3).unwrap();
        let norm = normalize(&raw);
        assert!(norm.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_negative_samples_clamped() {
        let raw = Field::from_fn(2, 1, |x, _| if x == 0 { -2.0 } else { 4.0 }).unwrap();
        let norm = normalize(&raw);
        assert_eq!(norm.as_slice(), &[0.0, 1.0]);
    }
}
