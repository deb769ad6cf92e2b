//! Renderer

use crate::scan::ScanlineU8;
use crate::base::RenderingBase;
use crate::color::Rgba8;
use crate::raster::RasterizerScanline;
use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;

use crate::Render;
use crate::Color;
use crate::Pixel;

/// Aliased Renderer
///
/// Every pixel with non-zero coverage is painted with full coverage
#[derive(Debug)]
pub struct RenderingScanlineBinSolid<'a,T> where T: 'a {
    pub base: &'a mut RenderingBase<T>,
    pub color: Rgba8,
}
/// Anti-Aliased Renderer
///
/// Pixels are blended with their coverage
#[derive(Debug)]
pub struct RenderingScanlineAASolid<'a,T> where T: 'a {
    pub base: &'a mut RenderingBase<T>,
    pub color: Rgba8,
}

/// Render a single Scanline (y-row) without Anti-Aliasing
fn render_scanline_bin_solid<T,C: Color>(sl: &ScanlineU8,
                                         ren: &mut RenderingBase<T>,
                                         color: C)
    where T: Pixel
{
    let cover_full = 255;
    for span in &sl.spans {
        ren.blend_hline(span.x, sl.y, span.x - 1 + span.len.abs(),
                        color, cover_full);
    }
}

/// Render a single Scanline (y-row) with Anti Aliasing
fn render_scanline_aa_solid<T,C: Color>(sl: &ScanlineU8,
                                        ren: &mut RenderingBase<T>,
                                        color: C)
    where T: Pixel
{
    let y = sl.y;
    for span in & sl.spans {
        ren.blend_solid_hspan(span.x, y, span.len, color, &span.covers);
    }
}

impl<'a,T> Render for RenderingScanlineAASolid<'a,T> where T: Pixel {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &ScanlineU8) {
        render_scanline_aa_solid(sl, &mut self.base, self.color);
    }
    /// Set the current color
    fn color<C: Color>(&mut self, color: C) {
        self.color = Rgba8::from_trait(color);
    }
}
impl<'a,T> Render for RenderingScanlineBinSolid<'a,T> where T: Pixel {
    /// Render a single Scanline Row
    fn render(&mut self, sl: &ScanlineU8) {
        render_scanline_bin_solid(sl, &mut self.base, self.color);
    }
    /// Set the current Color
    fn color<C: Color>(&mut self, color: C) {
        self.color = Rgba8::from_trait(color);
    }
}
impl<'a,T> RenderingScanlineBinSolid<'a,T> where T: Pixel {
    /// Create a new Renderer from a Rendering Base
    pub fn with_base(base: &'a mut RenderingBase<T>) -> Self {
        let color = Rgba8::black();
        Self { base, color }
    }
}
impl<'a,T> RenderingScanlineAASolid<'a,T> where T: Pixel {
    /// Create a new Renderer from a Rendering Base
    pub fn with_base(base: &'a mut RenderingBase<T>) -> Self {
        let color = Rgba8::black();
        Self { base, color }
    }
}

/// Render rasterized data to an image using the current color
pub fn render_scanlines<REN>(ras: &mut RasterizerScanline, ren: &mut REN)
    where REN: Render
{
    let mut sl = ScanlineU8::new();
    if ras.rewind_scanlines() {
        sl.reset( ras.min_x(), ras.max_x() );
        ren.prepare();
        while ras.sweep_scanline(&mut sl) {
            ren.render(&sl);
        }
    }
}

/// Renderer for single pixel wide lines
///
/// Lines are drawn directly onto the image, without coverage, starting
///   from subpixel end points
pub struct RendererPrimatives<'a,T> where T: 'a {
    pub base: &'a mut RenderingBase<T>,
    pub line_color: Rgba8,
    x: i64,
    y: i64,
}

impl<'a,T> RendererPrimatives<'a,T> where T: Pixel {
    /// Create a new Renderer from a Rendering Base, drawing in black
    pub fn with_base(base: &'a mut RenderingBase<T>) -> Self {
        let line_color = Rgba8::black();
        Self { base, line_color, x: 0, y: 0 }
    }
    /// Set the line color
    pub fn line_color<C: Color>(&mut self, line_color: C) {
        self.line_color = Rgba8::from_trait(line_color);
    }
    /// Convert a pixel coordinate into subpixel units
    pub fn coord(&self, c: f64) -> i64 {
        (c * POLY_SUBPIXEL_SCALE as f64).round() as i64
    }
    /// Move the current position to (`x`,`y`) in subpixel units
    pub fn move_to(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }
    /// Draw a line from the current position to (`x`,`y`) in subpixel units
    ///
    /// The pixel at (`x`,`y`) is not drawn
    pub fn line_to(&mut self, x: i64, y: i64) {
        let (x0,y0) = (self.x, self.y);
        self.line(x0, y0, x, y);
        self.x = x;
        self.y = y;
    }
    /// Draw the pixel at the current position
    pub fn plot(&mut self) {
        let (x, y) = (self.x >> POLY_SUBPIXEL_SHIFT, self.y >> POLY_SUBPIXEL_SHIFT);
        self.base.copy_pixel(x, y, self.line_color);
    }
    fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let color = self.line_color;
        let mut li = BresehamInterpolator::new(x1,y1,x2,y2);
        let (xmin, xmax, ymin, ymax) = self.base.limits();
        // Only steps with the major axis inside the image
        let steps = if li.ver {
            li.visible(li.y1, ymin, ymax)
        } else {
            li.visible(li.x1, xmin, xmax)
        };
        let (first, last) = match steps {
            Some(steps) => steps,
            None => return,
        };
        li.skip(first);
        for _ in first .. last {
            if li.ver {
                self.base.copy_pixel(li.x2, li.y1, color);
                li.vstep();
            } else {
                self.base.copy_pixel(li.x1, li.y2, color);
                li.hstep();
            }
        }
    }
}

/// Integer line stepping along the major axis
///
/// The minor axis is interpolated from the subpixel end points
#[derive(Debug)]
struct BresehamInterpolator {
    /// Current x position, horizontal lines
    x1: i64,
    /// Current y position, vertical lines
    y1: i64,
    /// Current x position, vertical lines
    x2: i64,
    /// Current y position, horizontal lines
    y2: i64,
    /// Line is primarilly vertical
    ver: bool,
    /// Number of pixels along the major axis
    len: i64,
    /// Step along the major axis, +1 or -1
    inc: i64,
    func: LineInterpolator,
}

impl BresehamInterpolator {
    fn new(x1_hr: i64, y1_hr: i64, x2_hr: i64, y2_hr: i64) -> Self {
        let x1 = x1_hr >> POLY_SUBPIXEL_SHIFT;
        let x2 = x2_hr >> POLY_SUBPIXEL_SHIFT;
        let y1 = y1_hr >> POLY_SUBPIXEL_SHIFT;
        let y2 = y2_hr >> POLY_SUBPIXEL_SHIFT;
        let dy = (y2 - y1).abs();
        let dx = (x2 - x1).abs();
        let ver = dy > dx;
        let len = if ver { dy } else { dx };
        let inc = match (ver, y2 > y1, x2 > x1) {
            (true, true, _)   => 1,
            (true, false, _)  => -1,
            (false, _, true)  => 1,
            (false, _, false) => -1,
        };
        let (z1,z2) = if ver { (x1_hr,x2_hr) } else { (y1_hr,y2_hr) };
        let func = LineInterpolator::new(z1,z2,len);
        let minor = func.y >> POLY_SUBPIXEL_SHIFT;
        Self { x1, y1, x2: minor, y2: minor, ver, len, inc, func }
    }
    /// Range of steps where the major axis, starting at `start`, lies
    ///   within `lo ..= hi`
    fn visible(&self, start: i64, lo: i64, hi: i64) -> Option<(i64, i64)> {
        let (first, last) = if self.inc > 0 {
            ((lo - start).max(0), (hi - start + 1).min(self.len))
        } else {
            ((start - hi).max(0), (start - lo + 1).min(self.len))
        };
        if first < last { Some((first, last)) } else { None }
    }
    /// Advance `n` steps at once
    fn skip(&mut self, n: i64) {
        if n <= 0 {
            return;
        }
        self.func.skip(n);
        let minor = self.func.y >> POLY_SUBPIXEL_SHIFT;
        if self.ver {
            self.y1 += self.inc * n;
            self.x2 = minor;
        } else {
            self.x1 += self.inc * n;
            self.y2 = minor;
        }
    }
    fn vstep(&mut self) {
        self.func.inc();
        self.y1 += self.inc;
        self.x2 = self.func.y >> POLY_SUBPIXEL_SHIFT;
    }
    fn hstep(&mut self) {
        self.func.inc();
        self.x1 += self.inc;
        self.y2 = self.func.y >> POLY_SUBPIXEL_SHIFT;
    }
}

/// Distribute the distance `y1` to `y2` evenly over `count` steps
#[derive(Debug)]
pub struct LineInterpolator {
    count: i64,
    left: i64,
    rem: i64,
    xmod: i64,
    /// Current value
    pub y: i64
}

impl LineInterpolator {
    /// Create a new Interpolator
    pub fn new(y1: i64, y2: i64, count: i64) -> Self {
        let cnt = std::cmp::max(1,count);
        let mut left = (y2 - y1) / cnt;
        let mut rem  = (y2 - y1) % cnt;
        let mut xmod = rem;
        if xmod <= 0 {
            xmod += cnt;
            rem  += cnt;
            left -= 1;
        }
        xmod -= cnt;
        Self { y: y1, left, rem, xmod, count: cnt }
    }
    /// Step `n` values forward, same as calling `inc` `n` times
    pub fn skip(&mut self, n: i64) {
        let t = i128::from(self.xmod) + i128::from(n) * i128::from(self.rem);
        let count = i128::from(self.count);
        // Number of carries; xmod stays within (-count, 0]
        let carries = (t + count - 1).div_euclid(count);
        self.y += n * self.left + carries as i64;
        self.xmod = (t - carries * count) as i64;
    }
    /// Step to the next value
    pub fn inc(&mut self) {
        self.xmod += self.rem;
        self.y += self.left;
        if self.xmod > 0 {
            self.xmod -= self.count;
            self.y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolator_reaches_end() {
        let mut li = LineInterpolator::new(0, 100, 7);
        let mut last = li.y;
        for _ in 0 .. 7 {
            li.inc();
            assert!(li.y - last == 14 || li.y - last == 15);
            last = li.y;
        }
        assert_eq!(li.y, 100);
        let mut li = LineInterpolator::new(50, 0, 3);
        for _ in 0 .. 3 {
            li.inc();
        }
        assert_eq!(li.y, 0);
    }

    #[test]
    fn interpolator_skip_matches_steps() {
        for &(y1, y2, count) in &[(0, 100, 7), (50, 0, 3), (-13, 999, 250), (5, 5, 4)] {
            for n in 0 ..= count {
                let mut a = LineInterpolator::new(y1, y2, count);
                let mut b = LineInterpolator::new(y1, y2, count);
                for _ in 0 .. n {
                    a.inc();
                }
                b.skip(n);
                assert_eq!((a.y, a.xmod), (b.y, b.xmod), "{} {} {} {}", y1, y2, count, n);
            }
        }
    }

    #[test]
    fn long_lines_only_visit_the_image() {
        use crate::{Pixfmt, Source};
        let mut ren_base = RenderingBase::new(Pixfmt::<Rgba8>::new(10, 10));
        ren_base.clear(Rgba8::white());
        let mut ren = RendererPrimatives::with_base(&mut ren_base);
        let s = |v: f64| (v * POLY_SUBPIXEL_SCALE as f64).round() as i64;
        ren.move_to(s(-2.0e8), s(1.0));
        ren.line_to(s(5.0), s(1.0));
        // Reversed and steep, from far outside
        ren.move_to(s(7.0), s(3.0e8));
        ren.line_to(s(7.0), s(2.0));
        for i in 0 .. 10 {
            let want = if i < 5 { Rgba8::black() } else { Rgba8::white() };
            assert_eq!(ren_base.pixf.get((i, 1)), want, "({},1)", i);
            let want = if i > 2 { Rgba8::black() } else { Rgba8::white() };
            assert_eq!(ren_base.pixf.get((7, i)), want, "(7,{})", i);
        }
    }

    #[test]
    fn bresenham_excludes_end_pixel() {
        let mut li = BresehamInterpolator::new(768, 768, 1536, 768);
        assert!(!li.ver);
        assert_eq!(li.len, 3);
        let mut px = vec![];
        for _ in 0 .. li.len {
            px.push((li.x1, li.y2));
            li.hstep();
        }
        assert_eq!(px, vec![(3,3), (4,3), (5,3)]);
    }
}
