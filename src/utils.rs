extern crate image;

use std::fs::File;
use std::path::Path;

use rand::distributions::{IndependentSample, Range};
use rand::Rng;

use super::*;

/// Loads an image as 8-bit grayscale samples.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<FloatGrid> {
    let img = image::open(path)?.to_luma();
    let mut result = FloatGrid::new(img.width() as usize, img.height() as usize);
    for (x, y, pixel) in img.enumerate_pixels() {
        result.set(x as usize, y as usize, pixel.data[0] as f64);
    }
    Ok(result)
}

/// Saves a partition as a black (background) and white (foreground) PNG.
pub fn save_boolgrid<P: AsRef<Path>>(bg: &BoolGrid, outpath: P) -> Result<()> {
    let mut imgbuf = image::ImageBuffer::new(bg.width() as u32, bg.height() as u32);
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        let foreground = bg.get(x as usize, y as usize).copied().unwrap_or(false);
        *pixel = image::Luma([if foreground { 255u8 } else { 0u8 }]);
    }
    let ref mut fout = File::create(outpath)?;
    image::ImageLuma8(imgbuf).save(fout, image::PNG)?;
    Ok(())
}

/// Linearly maps the values of `input` onto `range`.
///
/// A constant grid maps to all zeros.
pub fn min_max_scaling(input: &FloatGrid, range: &(f64, f64)) -> FloatGrid {
    let (min_value, max_value) = input.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, (_, _, &v)| {
        (acc.0.min(v), acc.1.max(v))
    });

    if min_value == max_value {
        return FloatGrid::new(input.width(), input.height());
    }

    let mut result = input.clone();
    for (_, _, value) in result.iter_mut() {
        let newval = (*value - min_value) / (max_value - min_value);
        *value = newval * (range.1 - range.0) + range.0;
    }
    result
}

/// Saves a level-set function as a grayscale PNG, darkest = most negative.
pub fn save_floatgrid<P: AsRef<Path>>(fg: &FloatGrid, outpath: P) -> Result<()> {
    let scaled_fg = min_max_scaling(fg, &(0., 255.));

    let mut imgbuf = image::ImageBuffer::new(fg.width() as u32, fg.height() as u32);
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        let v = scaled_fg.get(x as usize, y as usize).copied().unwrap_or(0.0);
        *pixel = image::Luma([v.round() as u8]);
    }
    let ref mut fout = File::create(outpath)?;
    image::ImageLuma8(imgbuf).save(fout, image::PNG)?;
    Ok(())
}

/// Two overlapping bright ellipses on a dark background plus uniform noise
/// in `[0, noise)`.
pub fn synthetic_blobs<R: Rng>(width: usize, height: usize, noise: f64, rng: &mut R) -> FloatGrid {
    let (w, h) = (width as f64, height as f64);
    let mut img = FloatGrid::new(width, height);
    for (x, y, value) in img.iter_mut() {
        let (fx, fy) = (x as f64 / w, y as f64 / h);
        if (fx - 0.4).powi(2) / 0.02 + (fy - 0.55).powi(2) / 0.07 <= 1.0 {
            *value = 200.;
        }
        if (fx - 0.5).powi(2) / 0.03 + (fy - 0.4).powi(2) / 0.05 <= 1.0 {
            *value = 150.;
        }
    }

    if noise > 0.0 {
        let noiserange = Range::new(0.0f64, noise);
        for (_, _, value) in img.iter_mut() {
            *value += noiserange.ind_sample(rng);
        }
    }
    img
}
