//! Diagram Compositor
//!
//! Draws a Diagram in three passes: shapes, point markers, then labels.

use crate::base::RenderingBase;
use crate::color::Rgba8;
use crate::dash::Dash;
use crate::error::RenderError;
use crate::model::{Diagram, Grid, Shape, ShapeKind};
use crate::outline::RasterizerOutline;
use crate::pixfmt::Pixfmt;
use crate::raster::{FillingRule, RasterizerScanline};
use crate::render::{render_scanlines, RendererPrimatives};
use crate::render::{RenderingScanlineAASolid, RenderingScanlineBinSolid};
use crate::shape::{build_path, marker_paths};
use crate::stroke::Stroke;
use crate::text::{draw_label, Font, FontSource};
use crate::Pixel;
use crate::Render;
use crate::VertexSource;

/// Miter limit of wide strokes
const MITER_LIMIT: f64 = 4.0;

/// Rendering Options
#[derive(Debug,Clone,PartialEq)]
pub struct RenderOptions {
    /// Blend edges with their coverage
    pub antialias: bool,
    /// Stroke width of shapes without their own
    pub stroke_width: f64,
    /// Font for labels
    pub font: Option<FontSource>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { antialias: false, stroke_width: 1.0, font: None }
    }
}

/// Diagram Renderer
///
/// Holds the loaded font, so one Renderer can draw many diagrams
#[derive(Debug)]
pub struct Renderer {
    opts: RenderOptions,
    font: Option<Font>,
}

impl Renderer {
    /// Create a new Renderer, loading the font if one is configured
    pub fn new(opts: RenderOptions) -> Result<Self, RenderError> {
        let font = opts.font.as_ref().map(Font::load).transpose()?;
        Ok(Self { opts, font })
    }
    /// Rendering options
    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }
    /// Render a Diagram into a new image of the grid size
    pub fn render(&self, diagram: &Diagram) -> Result<Pixfmt<Rgba8>, RenderError> {
        let pix = Pixfmt::<Rgba8>::new(diagram.grid.width, diagram.grid.height);
        let mut ren_base = RenderingBase::new(pix);
        render_diagram(&mut ren_base, diagram, self.font.as_ref(), &self.opts)?;
        Ok(ren_base.into_inner())
    }
}

/// Render a Diagram onto `ren_base`
///
/// The image is cleared to white first. Fails without drawing anything
///   if the diagram has labels but there is no font.
pub fn render_diagram<T>(ren_base: &mut RenderingBase<T>, diagram: &Diagram,
                         font: Option<&Font>, opts: &RenderOptions)
                         -> Result<(), RenderError>
    where T: Pixel
{
    let font = match font {
        Some(font) => Some(font),
        None if diagram.labels.is_empty() => None,
        None => return Err(RenderError::NoFont(diagram.labels.len())),
    };
    ren_base.clear(Rgba8::white());

    let grid = &diagram.grid;
    let mut markers = vec![];
    for (i, shape) in diagram.shapes.iter().enumerate() {
        match shape.kind {
            ShapeKind::PointMarker => markers.push(shape),
            ShapeKind::Storage | ShapeKind::Custom => {
                log::debug!("shape {}: {:?} is not drawn", i, shape.kind);
            },
            ShapeKind::Simple |
            ShapeKind::Arrowhead |
            ShapeKind::Document |
            ShapeKind::Io |
            ShapeKind::Decision |
            ShapeKind::ManualOperation |
            ShapeKind::Trapezoid |
            ShapeKind::InvTrapezoid |
            ShapeKind::Ellipse => draw_shape(ren_base, shape, grid, opts, i),
        }
    }

    for shape in markers {
        let width = shape.stroke_width.unwrap_or(opts.stroke_width);
        if let Some((outer, inner)) = marker_paths(shape, grid, width) {
            fill(ren_base, &outer, shape.stroke_color(), opts.antialias);
            fill(ren_base, &inner, Rgba8::white(), opts.antialias);
        }
    }

    if let Some(font) = font {
        for label in &diagram.labels {
            log::trace!("label {:?} at ({}, {})", label.text, label.x, label.y);
            draw_label(ren_base, font, label)?;
        }
    }
    Ok(())
}

fn draw_shape<T>(ren_base: &mut RenderingBase<T>, shape: &Shape, grid: &Grid,
                 opts: &RenderOptions, i: usize)
    where T: Pixel
{
    let path = match build_path(shape, grid) {
        Some(path) => path,
        None => {
            log::debug!("shape {}: {} points, skipped", i, shape.points.len());
            return;
        }
    };
    let width = shape.stroke_width.unwrap_or(opts.stroke_width);
    if shape.dashed {
        let interval = grid.cell_width.min(grid.cell_height) / 2.0;
        let dash = Dash::new(path, interval, interval);
        stroke(ren_base, dash, shape.stroke_color(), width, opts.antialias);
        return;
    }
    if shape.closed {
        fill(ren_base, &path, shape.fill_color(), opts.antialias);
    }
    if shape.kind != ShapeKind::Arrowhead {
        stroke(ren_base, path, shape.stroke_color(), width, opts.antialias);
    }
}

/// Fill a path with the non-zero winding rule
pub fn fill<T, VS>(ren_base: &mut RenderingBase<T>, path: &VS, color: Rgba8, antialias: bool)
    where T: Pixel, VS: VertexSource
{
    let mut ras = RasterizerScanline::new();
    ras.set_filling_rule(FillingRule::NonZero);
    ras.clip_box(0.0, 0.0, ren_base.width() as f64, ren_base.height() as f64);
    ras.add_path(path);
    if antialias {
        let mut ren = RenderingScanlineAASolid::with_base(ren_base);
        ren.color(color);
        render_scanlines(&mut ras, &mut ren);
    } else {
        let mut ren = RenderingScanlineBinSolid::with_base(ren_base);
        ren.color(color);
        render_scanlines(&mut ras, &mut ren);
    }
}

/// Stroke a path `width` pixels wide
///
/// Thin aliased lines are drawn pixel by pixel; everything else is
///   converted to an outline and filled.
pub fn stroke<T, VS>(ren_base: &mut RenderingBase<T>, path: VS, color: Rgba8,
                     width: f64, antialias: bool)
    where T: Pixel, VS: VertexSource
{
    if !antialias && width <= 1.0 {
        let mut ren = RendererPrimatives::with_base(ren_base);
        ren.line_color(color);
        let mut ras = RasterizerOutline::with_primative(&mut ren);
        ras.add_path(&path);
        return;
    }
    let mut outline = Stroke::new(path);
    outline.width(width);
    outline.miter_limit(MITER_LIMIT);
    fill(ren_base, &outline, color, antialias);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Label, Point, Source};

    fn square(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Point> {
        vec![Point::new(x1, y1), Point::new(x2, y1), Point::new(x2, y2), Point::new(x1, y2)]
    }

    #[test]
    fn labels_without_font_fail_before_drawing() {
        let diagram = Diagram::new(Grid::new(4, 4), vec![],
                                   vec![Label::new("x", 10.0, 1.0, 1.0)]);
        let mut base = RenderingBase::new(Pixfmt::<Rgba8>::new(4, 4));
        base.clear(Rgba8::black());
        let err = render_diagram(&mut base, &diagram, None, &RenderOptions::default());
        assert!(matches!(err, Err(RenderError::NoFont(1))));
        assert_eq!(base.pixf.get((0, 0)), Rgba8::black());
    }

    #[test]
    fn arrowheads_are_filled_not_stroked() {
        let red = Rgba8::new(255, 0, 0, 255);
        let mut head = Shape::new(ShapeKind::Arrowhead).closed()
            .with_points(square(2.0, 2.0, 8.0, 8.0));
        head.fill_color = Some(red);
        let diagram = Diagram::new(Grid::new(12, 12), vec![head], vec![]);
        let pix = Renderer::new(RenderOptions::default()).unwrap().render(&diagram).unwrap();
        assert_eq!(pix.get((2, 5)), red);
        assert_eq!(pix.get((5, 2)), red);
        assert_eq!(pix.get((8, 5)), Rgba8::white());
    }

    #[test]
    fn unsupported_kinds_draw_nothing() {
        let shapes = vec![
            Shape::new(ShapeKind::Storage).closed().with_points(square(1.0, 1.0, 6.0, 6.0)),
            Shape::new(ShapeKind::Custom).closed().with_points(square(1.0, 1.0, 6.0, 6.0)),
        ];
        let diagram = Diagram::new(Grid::new(8, 8), shapes, vec![]);
        let pix = Renderer::new(RenderOptions::default()).unwrap().render(&diagram).unwrap();
        for y in 0 .. 8 {
            for x in 0 .. 8 {
                assert_eq!(pix.get((x, y)), Rgba8::white());
            }
        }
    }
}
