//! Rendering Base

use crate::color::Rgba8;
use crate::Color;
use crate::Pixel;
use crate::PixelData;

use std::cmp::min;
use std::cmp::max;

/// Rendering Base
///
/// Clips all drawing operations to the bounds of the pixel format
#[derive(Debug,Default,Clone,PartialEq)]
pub struct RenderingBase<T> {
    /// Pixel Format
    pub pixf: T,
}

impl<T> RenderingBase<T> where T: Pixel {
    /// Create new Rendering Base from Pixel Format
    pub fn new(pixf: T) -> RenderingBase<T> {
        RenderingBase { pixf }
    }
    /// Take back the Pixel Format
    pub fn into_inner(self) -> T {
        self.pixf
    }
    /// Set the image to a single color
    pub fn clear(&mut self, color: Rgba8) {
        self.pixf.fill(color);
    }
    /// Get Image size
    pub fn limits(&self) -> (i64,i64,i64,i64) {
        let w = self.pixf.width() as i64;
        let h = self.pixf.height() as i64;
        (0, w-1, 0, h-1)
    }
    /// Width of the image in pixels
    pub fn width(&self) -> usize {
        self.pixf.width()
    }
    /// Height of the image in pixels
    pub fn height(&self) -> usize {
        self.pixf.height()
    }
    /// Copy a single pixel, locations outside of the image are ignored
    pub fn copy_pixel<C: Color>(&mut self, x: i64, y: i64, c: C) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        if x < xmin || x > xmax || y < ymin || y > ymax {
            return;
        }
        self.pixf.copy_or_blend_pix((x as usize, y as usize), c);
    }
    /// Blend a color along y-row from x1 to x2
    pub fn blend_hline<C: Color>(&mut self, x1: i64, y: i64, x2: i64, c: C, cover: u64) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        let (x1,x2) = if x2 > x1 { (x1,x2) } else { (x2,x1) };
        if y > ymax || y < ymin || x1 > xmax || x2 < xmin {
            return;
        }
        let x1 = max(x1, xmin);
        let x2 = min(x2, xmax);
        self.pixf.blend_hline(x1, y, x2 - x1 + 1, c, cover);
    }
    /// Blend a color from (x,y) with variable covers
    pub fn blend_solid_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64, c: C, covers: &[u64]) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        if y > ymax || y < ymin {
            return;
        }
        let (mut x, mut len, mut off) = (x,len, 0);
        if x < xmin {
            len -= xmin - x;
            if len <= 0 {
                return;
            }
            off += xmin - x;
            x = xmin;
        }
        if x + len - 1 > xmax {
            len = xmax - x + 1;
            if len <= 0 {
                return;
            }
        }
        let covers_win = &covers[off as usize .. (off + len) as usize];
        self.pixf.blend_solid_hspan(x, y, len, c, covers_win);
    }
}

impl<T> PixelData for RenderingBase<T> where T: PixelData {
    fn pixeldata(&self) -> &[u8] {
        self.pixf.pixeldata()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Pixfmt, Rgba8, Source, RenderingBase};

    #[test]
    fn hspan_clipping() {
        let mut base = RenderingBase::new(Pixfmt::<Rgba8>::new(4,2));
        base.clear(Rgba8::white());
        base.blend_solid_hspan(-2, 0, 8, Rgba8::black(), &[255; 8]);
        for x in 0 .. 4 {
            assert_eq!(base.pixf.get((x,0)), Rgba8::black());
            assert_eq!(base.pixf.get((x,1)), Rgba8::white());
        }
        base.blend_hline(2, 1, 10, Rgba8::black(), 255);
        assert_eq!(base.pixf.get((1,1)), Rgba8::white());
        assert_eq!(base.pixf.get((3,1)), Rgba8::black());
        // Entirely outside
        base.blend_hline(-5, 1, -1, Rgba8::new(255,0,0,255), 255);
        base.blend_solid_hspan(0, 7, 2, Rgba8::new(255,0,0,255), &[255; 2]);
        base.copy_pixel(-1, -1, Rgba8::new(255,0,0,255));
        assert_eq!(base.pixf.get((0,1)), Rgba8::white());
    }

    #[test]
    fn empty_image_ignores_drawing() {
        let mut base = RenderingBase::new(Pixfmt::<Rgba8>::new(0,0));
        base.clear(Rgba8::white());
        base.blend_hline(0, 0, 3, Rgba8::black(), 255);
        base.blend_solid_hspan(0, 0, 1, Rgba8::black(), &[255]);
        base.copy_pixel(0, 0, Rgba8::black());
        assert_eq!(base.limits(), (0,-1,0,-1));
    }
}
