//! Paths, Vertices and Ellipses

use crate::clip::Rectangle;
use crate::VertexSource;

use std::f64::consts::PI;

/// Path Command
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PathCommand {
    /// Start a new sub-path
    MoveTo,
    /// Straight line from the previous vertex
    LineTo,
    /// Close the current sub-path back to its start
    Close,
}
impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

/// Point with a Path Command
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex<T> {
    pub x: T,
    pub y: T,
    pub cmd: PathCommand
}

impl<T> Vertex<T> {
    /// Create a new Vertex
    pub fn new(x: T, y: T, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    /// Create a new MoveTo Vertex
    pub fn move_to(x: T, y:T) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    /// Create a new LineTo Vertex
    pub fn line_to(x: T, y:T) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
    /// Create a new Close Vertex
    pub fn close_polygon(x: T, y: T) -> Self {
        Self { x, y, cmd: PathCommand::Close }
    }
}

/// Compute length between two vertices
pub fn len(a: &Vertex<f64>, b: &Vertex<f64>) -> f64 {
    ((a.x-b.x).powi(2) + (a.y-b.y).powi(2)).sqrt()
}
/// Compute cross product of three vertices
pub fn cross(p1: &Vertex<f64>, p2: &Vertex<f64>, p: &Vertex<f64>) -> f64 {
    (p.x - p2.x) * (p2.y - p1.y) - (p.y - p2.y) * (p2.x - p1.x)
}

/// Split vertices into sub-paths
///
/// Returns the first and last index (inclusive) of each sub-path.
/// A sub-path starts at a MoveTo and needs at least one more vertex
pub fn split(vertices: &[Vertex<f64>]) -> Vec<(usize, usize)> {
    let mut out = vec![];
    let mut start : Option<usize> = None;
    for (i, v) in vertices.iter().enumerate() {
        if v.cmd == PathCommand::MoveTo {
            if let Some(s) = start {
                if i - s > 1 {
                    out.push((s, i-1));
                }
            }
            start = Some(i);
        }
    }
    if let Some(s) = start {
        if vertices.len() - s > 1 {
            out.push((s, vertices.len()-1));
        }
    }
    out
}

/// Number of line segments used to flatten a curve of length `len`
fn curve_steps(len: f64) -> usize {
    let n = (len * 0.25).round() as usize;
    if n < 4 { 4 } else { n }
}

/// Path of straight line segments
///
/// Curves are flattened into line segments as they are added
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Path {
    pub vertices: Vec<Vertex<f64>>,
}

impl VertexSource for Path {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.vertices.clone()
    }
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self { vertices: vec![] }
    }
    /// Remove all vertices
    pub fn remove_all(&mut self) {
        self.vertices.clear();
    }
    /// Path contains no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    /// Last vertex
    pub fn last(&self) -> Option<&Vertex<f64>> {
        self.vertices.last()
    }
    /// Start a new sub-path at (`x`,`y`)
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push( Vertex::move_to(x,y) );
    }
    /// Straight line to (`x`,`y`)
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push( Vertex::line_to(x,y) );
    }
    /// Quadratic Bezier from the last point to (`x`,`y`), control (`cx`,`cy`)
    pub fn curve3(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let (x0, y0) = match self.vertices.last() {
            Some(v) => (v.x, v.y),
            None => return self.move_to(x, y),
        };
        let length = (cx-x0).hypot(cy-y0) + (x-cx).hypot(y-cy);
        let n = curve_steps(length);
        for i in 1 ..= n {
            let t = i as f64 / n as f64;
            let s = 1.0 - t;
            let px = s*s*x0 + 2.0*s*t*cx + t*t*x;
            let py = s*s*y0 + 2.0*s*t*cy + t*t*y;
            self.line_to(px, py);
        }
    }
    /// Cubic Bezier from the last point to (`x`,`y`), controls (`cx1`,`cy1`) and (`cx2`,`cy2`)
    pub fn curve4(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        let (x0, y0) = match self.vertices.last() {
            Some(v) => (v.x, v.y),
            None => return self.move_to(x, y),
        };
        let length = (cx1-x0).hypot(cy1-y0) + (cx2-cx1).hypot(cy2-cy1) + (x-cx2).hypot(y-cy2);
        let n = curve_steps(length);
        for i in 1 ..= n {
            let t = i as f64 / n as f64;
            let s = 1.0 - t;
            let px = s*s*s*x0 + 3.0*s*s*t*cx1 + 3.0*s*t*t*cx2 + t*t*t*x;
            let py = s*s*s*y0 + 3.0*s*s*t*cy1 + 3.0*s*t*t*cy2 + t*t*t*y;
            self.line_to(px, py);
        }
    }
    /// Close the current sub-path
    pub fn close_polygon(&mut self) {
        if let Some(last) = self.vertices.last().copied() {
            if last.cmd == PathCommand::LineTo {
                self.vertices.push( Vertex::close_polygon(last.x, last.y) );
            }
        }
    }
    /// Bounding box of all vertices
    pub fn bounding_rect(&self) -> Option<Rectangle<f64>> {
        let first = self.vertices.first()?;
        let mut r = Rectangle::new(first.x, first.y, first.x, first.y);
        for p in &self.vertices {
            r.expand(p.x, p.y);
        }
        Some(r)
    }
}

/// Ellipse, approximated as a closed polygon
///
///     use diagram_raster::{Ellipse, VertexSource, PathCommand};
///
///     let e = Ellipse::new(10.0, 10.0, 5.0, 5.0);
///     let v = e.xconvert();
///     assert_eq!(v[0].cmd, PathCommand::MoveTo);
///     assert_eq!(v[0].x, 15.0);
///     assert_eq!(v.last().unwrap().cmd, PathCommand::Close);
///
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Ellipse {
    /// Center, x position
    pub x: f64,
    /// Center, y position
    pub y: f64,
    /// Radius in x
    pub rx: f64,
    /// Radius in y
    pub ry: f64,
    /// Number of vertices
    pub num: usize,
}

impl Ellipse {
    /// Create a new Ellipse, the number of vertices is chosen from the radii
    pub fn new(x: f64, y: f64, rx: f64, ry: f64) -> Self {
        let ra = (rx.abs() + ry.abs()) / 2.0;
        let num = if ra > 0.0 {
            let da = (ra / (ra + 0.125)).acos() * 2.0;
            (2.0 * PI / da).round() as usize
        } else {
            0
        };
        Self::with_steps(x, y, rx, ry, num)
    }
    /// Create a new Ellipse with `num` vertices
    pub fn with_steps(x: f64, y: f64, rx: f64, ry: f64, num: usize) -> Self {
        let num = if num < 4 { 4 } else { num };
        Self { x, y, rx, ry, num }
    }
}

impl VertexSource for Ellipse {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return vec![];
        }
        let mut out = Vec::with_capacity(self.num + 1);
        for i in 0 .. self.num {
            let angle = i as f64 / self.num as f64 * 2.0 * PI;
            let x = self.x + angle.cos() * self.rx;
            let y = self.y + angle.sin() * self.ry;
            if i == 0 {
                out.push(Vertex::move_to(x, y));
            } else {
                out.push(Vertex::line_to(x, y));
            }
        }
        let (x, y) = (out[out.len()-1].x, out[out.len()-1].y);
        out.push(Vertex::close_polygon(x, y));
        out
    }
}
