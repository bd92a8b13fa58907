//! PNG decode/encode to and from float pixel arrays
//!
//! Images are processed as `(height, width, 3)` float arrays with channel
//! values in the 0.0-255.0 range; conversion back to 8-bit clamps and
//! rounds, so averaged colors survive the trip to disk.

use crate::io::error::{ReductionError, Result};
use image::{ImageBuffer, Rgb};
use ndarray::Array3;
use std::path::Path;

/// Load an image file as an RGB float array
///
/// Any channel layout the `image` crate can decode is converted to RGB;
/// alpha is discarded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a decodable
/// image format.
pub fn load_image_as_array<P: AsRef<Path>>(path: P) -> Result<Array3<f32>> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| ReductionError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgb_img = img.to_rgb8();

    let (width, height) = (rgb_img.width() as usize, rgb_img.height() as usize);
    let mut data = Array3::zeros((height, width, 3));

    for (x, y, pixel) in rgb_img.enumerate_pixels() {
        let channels = pixel.0;
        for c in 0..3 {
            let val = channels.get(c).copied().unwrap_or(0);
            if let Some(sample) = data.get_mut((y as usize, x as usize, c)) {
                *sample = f32::from(val);
            }
        }
    }

    Ok(data)
}

/// Export an RGB float array as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_array_as_png<P: AsRef<Path>>(data: &Array3<f32>, path: P) -> Result<()> {
    let (height, width, _) = data.dim();

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let pixel = [
                data[(y, x, 0)].clamp(0.0, 255.0).round() as u8,
                data[(y, x, 1)].clamp(0.0, 255.0).round() as u8,
                data[(y, x, 2)].clamp(0.0, 255.0).round() as u8,
            ];
            img.put_pixel(x as u32, y as u32, Rgb(pixel));
        }
    }

    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReductionError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(path_ref).map_err(|e| ReductionError::ImageExport {
        path: path_ref.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
