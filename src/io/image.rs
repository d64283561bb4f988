//! PNG decoding and encoding of RGB sample grids
//!
//! Samples and outputs are row-major `Array2<Rgb>` grids with row 0 at the
//! top; alpha is dropped on load and emitted opaque on save.

use image::ImageBuffer;
use ndarray::Array2;
use std::path::Path;

use crate::io::error::{Result, SynthesisError};

/// An 8-bit RGB triple; equality is componentwise
pub type Rgb = [u8; 3];

/// Load a PNG file into a row-major RGB grid
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a decodable
/// image.
pub fn read_png<P: AsRef<Path>>(path: P) -> Result<Array2<Rgb>> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgb_img = img.to_rgb8();

    let (width, height) = (rgb_img.width() as usize, rgb_img.height() as usize);
    Ok(Array2::from_shape_fn((height, width), |(row, col)| {
        rgb_img.get_pixel(col as u32, row as u32).0
    }))
}

/// Save a row-major RGB grid as a PNG file
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded to the given path.
pub fn write_png<P: AsRef<Path>>(grid: &Array2<Rgb>, path: P) -> Result<()> {
    let path = path.as_ref();
    let (height, width) = grid.dim();

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for ((row, col), pixel) in grid.indexed_iter() {
        img.put_pixel(col as u32, row as u32, image::Rgb(*pixel));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(path).map_err(|e| SynthesisError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
