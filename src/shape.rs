//! Path Builder
//!
//! Converts the point list of a Shape into a Path, using the grid cell
//! size for rounded corners and the outlines of special shapes.

use crate::model::{Grid, Point, PointKind, Shape, ShapeKind};
use crate::paths::{Ellipse, Path};
use crate::VertexSource;

/// Diameter of a point marker relative to the smaller cell dimension
const MARKER_SCALE: f64 = 0.7;

/// Build the outline Path of a Shape
///
/// Returns `None` for shapes with fewer than two points
///
///     use diagram_raster::{Grid, Shape, ShapeKind, Point, PathCommand};
///     use diagram_raster::shape::build_path;
///
///     let shape = Shape::new(ShapeKind::Simple)
///         .with_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
///     let path = build_path(&shape, &Grid::new(20, 20)).unwrap();
///     assert_eq!(path.len(), 2);
///     assert_eq!(path.vertices[0].cmd, PathCommand::MoveTo);
///
///     let dot = Shape::new(ShapeKind::Simple).with_points(vec![Point::new(1.0, 1.0)]);
///     assert!(build_path(&dot, &Grid::new(20, 20)).is_none());
///
pub fn build_path(shape: &Shape, grid: &Grid) -> Option<Path> {
    if shape.points.len() < 2 {
        return None;
    }
    if shape.points.len() == 4 {
        if let Some(path) = special_path(shape, grid) {
            return Some(path);
        }
    }
    Some(polyline(shape, grid))
}

/// Point moved from `corner` towards `to` by half a cell
fn half_cell_towards(corner: &Point, to: &Point, grid: &Grid) -> Option<(f64, f64)> {
    let (dx, dy) = (to.x - corner.x, to.y - corner.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return None;
    }
    let (mut ox, mut oy) = (dx / len * grid.cell_width / 2.0,
                            dy / len * grid.cell_height / 2.0);
    // Never past the middle of the edge
    let olen = ox.hypot(oy);
    if olen > len / 2.0 {
        ox *= len / 2.0 / olen;
        oy *= len / 2.0 / olen;
    }
    Some((corner.x + ox, corner.y + oy))
}

/// Straight edges with optional rounded corners
fn polyline(shape: &Shape, grid: &Grid) -> Path {
    let pts = &shape.points;
    let n = pts.len();
    let mut path = Path::new();
    for (i, p) in pts.iter().enumerate() {
        let rounded = p.kind == PointKind::Round && (shape.closed || (i > 0 && i < n-1));
        let corner = if rounded {
            let prev = &pts[(i + n - 1) % n];
            let next = &pts[(i + 1) % n];
            half_cell_towards(p, prev, grid).zip(half_cell_towards(p, next, grid))
        } else {
            None
        };
        match corner {
            Some(((x0, y0), (x1, y1))) => {
                if path.is_empty() {
                    path.move_to(x0, y0);
                } else {
                    path.line_to(x0, y0);
                }
                path.curve3(p.x, p.y, x1, y1);
            },
            None if path.is_empty() => path.move_to(p.x, p.y),
            None => path.line_to(p.x, p.y),
        }
    }
    if shape.closed {
        path.close_polygon();
    }
    path
}

/// Outline for special shapes, computed from the bounding box of their points
fn special_path(shape: &Shape, grid: &Grid) -> Option<Path> {
    let pts = &shape.points;
    let l = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let r = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let t = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let b = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    let o = grid.cell_width / 2.0;
    let w = r - l;

    let corners = match shape.kind {
        ShapeKind::Io => [(l+o, t), (r+o, t), (r-o, b), (l-o, b)],
        ShapeKind::Decision => {
            let (cx, cy) = ((l + r) / 2.0, (t + b) / 2.0);
            [(cx, t), (r, cy), (cx, b), (l, cy)]
        },
        ShapeKind::Trapezoid => [(l+o, t), (r-o, t), (r, b), (l, b)],
        ShapeKind::InvTrapezoid |
        ShapeKind::ManualOperation => [(l, t), (r, t), (r-o, b), (l+o, b)],
        ShapeKind::Document => {
            let mut path = Path::new();
            path.move_to(l, t);
            path.line_to(r, t);
            path.line_to(r, b);
            path.curve4(l + 2.0 * w / 3.0, b - grid.cell_height / 2.0,
                        l + w / 3.0, b + grid.cell_height / 2.0,
                        l, b);
            path.close_polygon();
            return Some(path);
        },
        ShapeKind::Ellipse => {
            let e = Ellipse::new((l + r) / 2.0, (t + b) / 2.0, w / 2.0, (b - t) / 2.0);
            let path = Path { vertices: e.xconvert() };
            return if path.is_empty() { None } else { Some(path) };
        },
        ShapeKind::Simple |
        ShapeKind::Arrowhead |
        ShapeKind::PointMarker |
        ShapeKind::Storage |
        ShapeKind::Custom => return None,
    };
    let mut path = Path::new();
    path.move_to(corners[0].0, corners[0].1);
    for &(x, y) in &corners[1..] {
        path.line_to(x, y);
    }
    path.close_polygon();
    Some(path)
}

/// Outer and inner discs of a point marker, centered on the first point
///
/// The ring between the two discs is `width` wide
pub fn marker_paths(shape: &Shape, grid: &Grid, width: f64) -> Option<(Ellipse, Ellipse)> {
    let p = shape.points.first()?;
    let d = MARKER_SCALE * grid.cell_width.min(grid.cell_height);
    let outer = d / 2.0 + width / 2.0;
    let inner = (d / 2.0 - width / 2.0).max(0.0);
    Some((Ellipse::new(p.x, p.y, outer, outer),
          Ellipse::new(p.x, p.y, inner, inner)))
}
