//! Starting level sets.

use distance_transform::dt2d;

use crate::config::RegionInit;
use crate::grid::Field;
use crate::{BoolGrid, FloatGrid};

/// Magnitude of the two-level indicator used for region initialization.
pub const INDICATOR_LEVEL: f64 = 5.0;

/// Membership test for an initial region.
///
/// Any shape can seed the contour; closures `Fn(usize, usize) -> bool` work
/// out of the box.
pub trait Region {
    /// `true` if pixel `(x, y)` lies inside the region.
    fn contains(&self, x: usize, y: usize) -> bool;
}

impl<F> Region for F
where
    F: Fn(usize, usize) -> bool,
{
    fn contains(&self, x: usize, y: usize) -> bool {
        self(x, y)
    }
}

/// A binary mask, `true` = inside. Pixels outside the mask are outside.
#[derive(Clone)]
pub struct Mask(pub BoolGrid);

impl Region for Mask {
    fn contains(&self, x: usize, y: usize) -> bool {
        self.0.get(x, y).copied().unwrap_or(false)
    }
}

/// Axis-aligned rectangle covering `x0..x1` by `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region for Rect {
    fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Closed disk around `(cx, cy)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Disk {
    /// The default contour: radius half the smaller side, centered on the grid.
    pub fn centered(width: usize, height: usize) -> Disk {
        Disk {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            radius: 0.5 * width.min(height) as f64,
        }
    }

    /// Signed distance of `(x, y)` to the circle, negative inside.
    pub fn signed_distance(&self, x: usize, y: usize) -> f64 {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        (dx * dx + dy * dy).sqrt() - self.radius
    }
}

impl Region for Disk {
    fn contains(&self, x: usize, y: usize) -> bool {
        self.signed_distance(x, y) <= 0.0
    }
}

/// Builds the starting level set.
///
/// Without a region this is the signed distance to [`Disk::centered`].
/// With a region the values depend on `mode`; see [`RegionInit`].
pub fn initial_level_set(
    width: usize,
    height: usize,
    region: Option<&dyn Region>,
    mode: RegionInit,
) -> crate::Result<Field> {
    match region {
        None => {
            let disk = Disk::centered(width, height);
            Field::from_fn(width, height, |x, y| disk.signed_distance(x, y))
        }
        Some(region) => match mode {
            RegionInit::Indicator => Field::from_fn(width, height, |x, y| indicator(region, x, y)),
            RegionInit::SignedDistance => {
                let mask = rasterize(width, height, region);
                let (inside, total) = mask
                    .iter()
                    .fold((0usize, 0usize), |acc, (_, _, &v)| (acc.0 + v as usize, acc.1 + 1));
                if inside == 0 || inside == total {
                    // no boundary to measure against
                    return Field::from_fn(width, height, |x, y| indicator(region, x, y));
                }
                Field::from_grid(&mask_to_phi(&mask))
            }
        },
    }
}

fn indicator(region: &dyn Region, x: usize, y: usize) -> f64 {
    if region.contains(x, y) {
        -INDICATOR_LEVEL
    } else {
        INDICATOR_LEVEL
    }
}

/// Samples `region` on every pixel of a `width` x `height` grid.
pub fn rasterize(width: usize, height: usize, region: &dyn Region) -> BoolGrid {
    let mut mask = BoolGrid::new(width, height);
    for (x, y, value) in mask.iter_mut() {
        *value = region.contains(x, y);
    }
    mask
}

fn bwdist(a: &BoolGrid) -> FloatGrid {
    let mut res = dt2d(a);
    for (_, _, value) in res.iter_mut() {
        *value = value.sqrt();
    }
    res
}

/// Converts a mask into a signed distance map, negative inside.
///
/// The mask must contain both inside and outside pixels.
pub fn mask_to_phi(mask: &BoolGrid) -> FloatGrid {
    let inverse = {
        let mut result = mask.clone();
        for (_, _, value) in result.iter_mut() {
            *value = !*value;
        }
        result
    };

    let dist_in = bwdist(mask);
    let dist_out = bwdist(&inverse);
    let mut phi = FloatGrid::new(mask.width(), mask.height());
    for (x, y, value) in phi.iter_mut() {
        let a = dist_in.get(x, y).copied().unwrap_or(0.0);
        let b = dist_out.get(x, y).copied().unwrap_or(0.0);
        let inside = mask.get(x, y).copied().unwrap_or(false);
        *value = a - b + if inside { 1.0 } else { 0.0 } - 0.5;
    }
    phi
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_disk_center_and_corner() {
        for &(w, h) in &[(2usize, 2usize), (8, 8), (9, 5), (4, 11)] {
            let phi = initial_level_set(w, h, None, RegionInit::Indicator).unwrap();
            let radius = 0.5 * w.min(h) as f64;
            if w % 2 == 0 && h % 2 == 0 {
                assert_relative_eq!(phi.at(w / 2, h / 2), -radius);
            }
            assert!(phi.at(0, 0) > 0.0, "corner of {w}x{h}");
            if w.min(h) >= 3 {
                assert!(phi.at(w - 1, h - 1) > 0.0, "far corner of {w}x{h}");
            }
        }
    }

    #[test]
    fn test_indicator_from_predicate() {
        let region = |x: usize, y: usize| x < 2 && y == 1;
        let phi = initial_level_set(4, 3, Some(&region), RegionInit::Indicator).unwrap();
        assert_eq!(phi.at(0, 1), -INDICATOR_LEVEL);
        assert_eq!(phi.at(1, 1), -INDICATOR_LEVEL);
        assert_eq!(phi.at(2, 1), INDICATOR_LEVEL);
        assert_eq!(phi.at(0, 0), INDICATOR_LEVEL);
    }

    #[test]
    fn test_shapes() {
        let rect = Rect {
            x0: 1,
            y0: 1,
            x1: 3,
            y1: 2,
        };
        assert!(rect.contains(1, 1));
        assert!(rect.contains(2, 1));
        assert!(!rect.contains(3, 1));
        assert!(!rect.contains(1, 2));

        let disk = Disk::centered(8, 6);
        assert_eq!(disk.radius, 3.0);
        assert!(disk.contains(4, 3));
        assert!(!disk.contains(0, 0));
    }

    #[test]
    fn test_mask_region() {
        let mut grid = BoolGrid::new(3, 3);
        grid.set(1, 1, true);
        let mask = Mask(grid);
        assert!(mask.contains(1, 1));
        assert!(!mask.contains(0, 1));
        assert!(!mask.contains(7, 7));
    }

    #[test]
    fn test_signed_distance_init_keeps_sign() {
        let rect = Rect {
            x0: 3,
            y0: 3,
            x1: 9,
            y1: 9,
        };
        let phi = initial_level_set(12, 12, Some(&rect), RegionInit::SignedDistance).unwrap();
        for y in 0..12 {
            for x in 0..12 {
                assert_eq!(phi.at(x, y) < 0.0, rect.contains(x, y), "({x}, {y})");
            }
        }
        assert!(phi.at(5, 5) < phi.at(3, 5));
        assert!(phi.at(0, 0) > phi.at(2, 2));
    }

    #[test]
    fn test_signed_distance_init_degenerate_region() {
        let everywhere = |_: usize, _: usize| true;
        let phi = initial_level_set(3, 3, Some(&everywhere), RegionInit::SignedDistance).unwrap();
        assert!(phi.as_slice().iter().all(|&v| v == -INDICATOR_LEVEL));
    }
}
