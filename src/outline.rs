//! Aliased Outline Rasterizer

use crate::paths::PathCommand;
use crate::Pixel;
use crate::VertexSource;
use crate::render::RendererPrimatives;

/// Rasterizer for Outlined Shapes, single pixel wide
///
/// The rendering is directly attached and drawing is done immediately.
/// Each edge draws every pixel but its last, which is drawn by the next
/// edge; open paths draw their final point explicitly.
///
///     use diagram_raster::{Pixfmt,Rgba8,RenderingBase,Source,Path};
///     use diagram_raster::{RendererPrimatives,RasterizerOutline};
///
///     let pix = Pixfmt::<Rgba8>::new(10,10);
///     let mut ren_base = RenderingBase::new(pix);
///     ren_base.clear( Rgba8::white() );
///
///     let mut ren = RendererPrimatives::with_base(&mut ren_base);
///     ren.line_color(Rgba8::black());
///
///     let mut path = Path::new();
///     path.move_to(1.0, 1.0);
///     path.line_to(8.0, 1.0);
///
///     let mut ras = RasterizerOutline::with_primative(&mut ren);
///     ras.add_path(&path);
///     assert_eq!(ren_base.pixf.get((1,1)), Rgba8::black());
///     assert_eq!(ren_base.pixf.get((8,1)), Rgba8::black());
///     assert_eq!(ren_base.pixf.get((9,1)), Rgba8::white());
///
pub struct RasterizerOutline<'a,'b,T> where T: Pixel {
    ren: &'a mut RendererPrimatives<'b,T>,
    start_x: i64,
    start_y: i64,
    vertices: usize,
}
impl<'a,'b,T> RasterizerOutline<'a,'b,T> where T: Pixel {
    /// Create a new RasterizerOutline with a Renderer
    pub fn with_primative(ren: &'a mut RendererPrimatives<'b,T>) -> Self {
        Self { start_x: 0, start_y: 0, vertices: 0, ren }
    }
    /// Add a path and render
    pub fn add_path<VS: VertexSource>(&mut self, path: &VS) {
        for v in path.xconvert().iter() {
            match v.cmd {
                PathCommand::MoveTo => self.move_to_d(v.x, v.y),
                PathCommand::LineTo => self.line_to_d(v.x, v.y),
                PathCommand::Close => self.close(),
            }
        }
        self.finish();
    }
    /// Close the current path
    pub fn close(&mut self) {
        if self.vertices > 2 {
            let (x,y) = (self.start_x, self.start_y);
            self.line_to( x, y );
            self.vertices = 0;
        } else {
            // Single segment, the edge back would retrace it
            self.finish();
        }
    }
    /// Move to position (`x`,`y`)
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.finish();
        let x = self.ren.coord(x);
        let y = self.ren.coord(y);
        self.move_to( x, y );
    }
    /// Draw a line from the current position to position (`x`,`y`)
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let x = self.ren.coord(x);
        let y = self.ren.coord(y);
        self.line_to( x, y );
    }
    /// Draw the last point of an open path
    fn finish(&mut self) {
        if self.vertices > 1 {
            self.ren.plot();
        }
        self.vertices = 0;
    }
    fn move_to(&mut self, x: i64, y: i64) {
        self.vertices = 1;
        self.start_x = x;
        self.start_y = y;
        self.ren.move_to(x, y);
    }
    fn line_to(&mut self, x: i64, y: i64) {
        self.vertices += 1;
        self.ren.line_to(x, y);
    }
}
