//! PNG export of a rendered canvas.
//!
//! Feature-gated behind `png` (default on) so embedders that only want the
//! in-memory rasterizer can drop the `image` dependency.

use std::path::Path;

use flower_core::error::Error;

use crate::canvas::LineCanvas;

/// Writes the canvas contents as a PNG image.
///
/// Returns `Error::InvalidDimensions` if the canvas dimensions overflow
/// `u32`, or `Error::Io` on write failure.
pub fn write_png(canvas: &LineCanvas, path: &Path) -> Result<(), Error> {
    let w = u32::try_from(canvas.width()).map_err(|_| Error::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| Error::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, canvas.pixels().to_vec())
        .ok_or_else(|| Error::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| Error::Io(e.to_string()))
}
