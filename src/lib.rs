//! Diagram Rasterizer
//!
//! Renders a decoded diagram description (a pixel grid, shapes and text
//! labels) into an RGBA pixel buffer.
//!
//! # Example
//!
//!     use diagram_raster::{Diagram, Grid, Shape, ShapeKind, Point};
//!     use diagram_raster::{Renderer, RenderOptions, Rgba8, Source};
//!
//!     let mut shape = Shape::new(ShapeKind::Simple);
//!     shape.points = vec![Point::new(2.0, 2.0), Point::new(8.0, 2.0),
//!                         Point::new(8.0, 8.0), Point::new(2.0, 8.0)];
//!     shape.closed = true;
//!     shape.fill_color = Some(Rgba8::new(255, 0, 0, 255));
//!
//!     let diagram = Diagram::new(Grid::new(12, 12), vec![shape], vec![]);
//!     let renderer = Renderer::new(RenderOptions::default()).unwrap();
//!     let pix = renderer.render(&diagram).unwrap();
//!     assert_eq!(pix.get((5,5)), Rgba8::new(255, 0, 0, 255));
//!     assert_eq!(pix.get((2,5)), Rgba8::black());
//!     assert_eq!(pix.get((0,0)), Rgba8::white());
//!
//! # How does this work
//!
//!```text
//!    ren_base = RenderingBase( Pixfmt( data ) )
//!    Shape pass (compose::render_diagram)
//!      shape::build_path()         -- Path of MoveTo / LineTo / Close
//!      fill()
//!        RasterizerScanline::add_path
//!          clip.line_to()
//!            cell.line()
//!              render_hline()      -- Cells with x, cover and area
//!        render_scanlines()
//!          rewind_scanlines        -- sort cells by y then x
//!          sweep_scanline          -- spans with coverage
//!          blend_hline / blend_solid_hspan
//!      stroke()
//!        RasterizerOutline         -- 1px, Bresenham style DDA
//!        Stroke -> fill()          -- wide or anti-aliased lines
//!    Marker pass
//!      shape::marker_paths() -> fill(outer), fill(inner)
//!    Label pass
//!      text::draw_text()           -- FreeType glyph bitmaps as covers
//!```

pub mod buffer;
pub mod color;
pub mod math;
pub mod pixfmt;
pub mod base;
pub mod clip;
pub mod cell;
pub mod scan;
pub mod raster;
pub mod render;
pub mod outline;
pub mod paths;
pub mod stroke;
pub mod dash;
pub mod model;
pub mod shape;
pub mod text;
pub mod compose;
pub mod decode;
pub mod png;
pub mod batch;
pub mod error;

pub use crate::buffer::*;
pub use crate::color::*;
pub use crate::pixfmt::*;
pub use crate::base::*;
pub use crate::clip::*;
pub use crate::raster::*;
pub use crate::render::*;
pub use crate::outline::*;
pub use crate::paths::*;
pub use crate::stroke::*;
pub use crate::dash::*;
pub use crate::model::*;
pub use crate::text::*;
pub use crate::compose::*;
pub use crate::error::*;

pub use freetype as ft;

const POLY_SUBPIXEL_SHIFT : i64 = 8;
const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;

/// Access Color properties and compoents
pub trait Color: std::fmt::Debug + Copy {
    /// Get red value [0,1] as f64
    fn red(&self) -> f64;
    /// Get green value [0,1] as f64
    fn green(&self) -> f64;
    /// Get blue value [0,1] as f64
    fn blue(&self) -> f64;
    /// Get alpha value [0,1] as f64
    fn alpha(&self) -> f64;
    /// Get red value [0,255] as u8
    fn red8(&self) -> u8;
    /// Get green value [0,255] as u8
    fn green8(&self) -> u8;
    /// Get blue value [0,255] as u8
    fn blue8(&self) -> u8;
    /// Get alpha value [0,255] as u8
    fn alpha8(&self) -> u8;
    /// Return if the color is completely transparent, alpha = 0.0
    fn is_transparent(&self) -> bool { self.alpha() == 0.0 }
    /// Return if the color is completely opaque, alpha = 1.0
    fn is_opaque(&self) -> bool { self.alpha() >= 1.0 }
}

/// Access Pixel source color
pub trait Source {
    fn get(&self, id: (usize, usize)) -> Rgba8;
}

/// Access raw color component data at the pixel level
pub trait PixelData {
    fn pixeldata(&self) -> &[u8];
}

/// Drawing and pixel related routines
pub trait Pixel {
    /// Set the pixel at `id` to color `c`, no blending
    fn set<C: Color>(&mut self, id: (usize, usize), c: C);
    /// Blend the pixel at `id` with color `c` and coverage `cover`
    fn blend_pix<C: Color>(&mut self, id: (usize, usize), c: C, cover: u64);
    /// Bytes per pixel
    fn bpp() -> usize;
    /// Maximum coverage value
    fn cover_mask() -> u64;
    /// Width of the pixel buffer
    fn width(&self) -> usize;
    /// Height of the pixel buffer
    fn height(&self) -> usize;

    /// Fill the entire buffer with color `c`
    fn fill<C: Color>(&mut self, c: C) {
        for y in 0 .. self.height() {
            for x in 0 .. self.width() {
                self.set((x,y), c);
            }
        }
    }
    /// Copy or blend the pixel at `id` with color `c`
    ///
    /// Fully opaque colors are copied, transparent colors are ignored
    fn copy_or_blend_pix<C: Color>(&mut self, id: (usize,usize), c: C) {
        if ! c.is_transparent() {
            if c.is_opaque() {
                self.set(id, c);
            } else {
                self.blend_pix(id, c, 255);
            }
        }
    }
    /// Copy or blend the pixel at `id` with color `c` and coverage `cover`
    fn copy_or_blend_pix_with_cover<C: Color>(&mut self, id: (usize,usize), c: C, cover: u64) {
        if ! c.is_transparent() {
            if c.is_opaque() && cover == Self::cover_mask() {
                self.set(id, c);
            } else {
                self.blend_pix(id, c, cover);
            }
        }
    }
    /// Blend `len` pixels horizontally from (`x`,`y`) with a single coverage
    fn blend_hline<C: Color>(&mut self, x: i64, y: i64, len: i64, c: C, cover: u64) {
        if c.is_transparent() {
            return;
        }
        let (x,y) = (x as usize, y as usize);
        for i in 0 .. len as usize {
            self.copy_or_blend_pix_with_cover((x+i, y), c, cover);
        }
    }
    /// Blend `len` pixels horizontally from (`x`,`y`) with varying coverage
    fn blend_solid_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64, c: C, covers: &[u64]) {
        assert_eq!(len as usize, covers.len());
        let (x,y) = (x as usize, y as usize);
        for (i, &cover) in covers.iter().enumerate() {
            self.copy_or_blend_pix_with_cover((x+i,y), c, cover);
        }
    }
}

/// Render scanlines to Image
pub trait Render {
    /// Render a single scanlines to the image
    fn render(&mut self, data: &scan::ScanlineU8);
    /// Set the Color of the Renderer
    fn color<C: Color>(&mut self, color: C);
    /// Prepare the Renderer
    fn prepare(&self) { }
}

/// Source of vertex points
pub trait VertexSource {
    /// Return the vertices of the source, converted if required
    fn xconvert(&self) -> Vec<paths::Vertex<f64>>;
}
