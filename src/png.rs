//! Reading and writing of PNG files

use crate::color::Rgba8;
use crate::pixfmt::Pixfmt;
use crate::Pixel;
use crate::PixelData;

use std::path::Path;

/// Write an image as an 8-bit RGBA PNG
pub fn write_png<P: AsRef<Path>>(filename: P, pix: &Pixfmt<Rgba8>) -> Result<(), image::ImageError> {
    image::save_buffer(filename, pix.pixeldata(),
                       pix.width() as u32, pix.height() as u32,
                       image::ColorType::Rgba8)
}

/// Read an image as RGBA data, returning (data, width, height)
pub fn read_rgba<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>,usize,usize),image::ImageError> {
    let img = image::open(filename)?.to_rgba8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Compare two image files pixel by pixel
///
/// Differing components are logged at debug level
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool,image::ImageError> {
    let (d1,w1,h1) = read_rgba(f1)?;
    let (d2,w2,h2) = read_rgba(f2)?;
    if w1 != w2 || h1 != h2 {
        log::debug!("image sizes differ: {}x{} {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            log::debug!("{} [{},{},{}]: {} {}", i, (i/4)%w1, (i/4)/w1, i%4, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
