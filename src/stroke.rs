//! Path Stroking
//!
//! Converts the center line of a path into the outline of a line of a
//! given width. The outline is filled with the non-zero rule. Line ends
//! are butt caps; joins are mitered, falling back to a bevel when the
//! miter would be longer than the limit.
//!
//!     use diagram_raster::{Path, Stroke, RasterizerScanline};
//!
//!     let mut path = Path::new();
//!     path.move_to(  0.0,   0.0);
//!     path.line_to(100.0, 100.0);
//!     path.line_to(200.0,  50.0);
//!
//!     let mut stroke = Stroke::new( path );
//!     stroke.width(2.5);
//!     stroke.miter_limit(4.0);
//!
//!     let mut ras = RasterizerScanline::new();
//!     ras.add_path(&stroke);
//!     assert!(ras.rewind_scanlines());
//!

use crate::paths::PathCommand;
use crate::paths::Vertex;
use crate::paths::len;
use crate::paths::cross;
use crate::paths::split;

use crate::VertexSource;

/// Stroke for Paths and Vertex Sources
#[derive(Debug)]
pub struct Stroke<T: VertexSource> {
    /// Source of Verticies
    source: T,
    /// Half width of the line in pixels
    width: f64,
    /// Absolute value of the half width
    width_abs: f64,
    /// Maximum Length of miter at segment intersection, relative to half width
    miter_limit: f64,
    /// Minimum length of the inner miter, relative to half width
    inner_miter_limit: f64,
}

impl<T> VertexSource for Stroke<T> where T: VertexSource {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.stroke()
    }
}

macro_rules! prev {
    ($i:expr, $n:expr) => ( ($i + $n - 1) % $n )
}
macro_rules! next {
    ($i:expr, $n:expr) => ( ($i + 1) % $n )
}

impl<T> Stroke<T> where T: VertexSource {
    /// Create a new Stroke from a Vertex Source
    ///
    /// Default is a line 1 pixel wide with a miter limit of 4
    pub fn new(source: T) -> Self {
        Self {
            source,
            width: 0.5,
            width_abs: 0.5,
            miter_limit: 4.0,
            inner_miter_limit: 1.01,
        }
    }
    /// Set the Stroke Width
    pub fn width(&mut self, width: f64) {
        self.width = width / 2.0;
        self.width_abs = self.width.abs();
    }
    /// Set miter limit
    pub fn miter_limit(&mut self, miter_limit: f64) {
        self.miter_limit = miter_limit;
    }
    /// Calculate the Butt Cap at `v0`, with the line heading towards `v1`
    fn calc_cap(&self, v0: &Vertex<f64>, v1: &Vertex<f64>) -> Vec<Vertex<f64>> {
        let dx = v1.x-v0.x;
        let dy = v1.y-v0.y;
        let len = (dx*dx + dy*dy).sqrt();
        let dx1 = self.width * dy / len;
        let dy1 = self.width * dx / len;
        vec![Vertex::line_to(v0.x - dx1, v0.y + dy1),
             Vertex::line_to(v0.x + dx1, v0.y - dy1)]
    }
    /// Calculate a Miter Join at `p1`, or a bevel past `mlimit`
    #[allow(clippy::too_many_arguments)]
    fn calc_miter(&self,
                  p0: &Vertex<f64>,
                  p1: &Vertex<f64>,
                  p2: &Vertex<f64>,
                  dx1: f64, dy1: f64, dx2: f64, dy2: f64,
                  mlimit: f64)
                  -> Vec<Vertex<f64>>{
        let lim = self.width_abs * mlimit;
        if let Some((xi,yi)) = calc_intersection(p0.x + dx1, p0.y - dy1,
                                                 p1.x + dx1, p1.y - dy1,
                                                 p1.x + dx2, p1.y - dy2,
                                                 p2.x + dx2, p2.y - dy2) {
            if len(p1, &Vertex::line_to(xi,yi)) <= lim {
                return vec![Vertex::line_to(xi, yi)];
            }
        } else {
            // Parallel offsets: either the path continues straight on
            // or it doubles back on itself
            let pz = Vertex::line_to(p1.x + dx1, p1.y - dy1);
            if (cross(p0, p1, &pz) < 0.0) == (cross(p1, p2, &pz) < 0.0) {
                return vec![pz];
            }
        }
        vec![Vertex::line_to(p1.x + dx1, p1.y - dy1),
             Vertex::line_to(p1.x + dx2, p1.y - dy2)]
    }
    /// Calculate the Join of Two Line Segments at `p1`
    fn calc_join(&self,
                 p0: &Vertex<f64>,
                 p1: &Vertex<f64>,
                 p2: &Vertex<f64>) -> Vec<Vertex<f64>> {
        let len1 = len(p1,p0);
        let len2 = len(p2,p1);

        let dx1 = self.width * (p1.y-p0.y) / len1;
        let dy1 = self.width * (p1.x-p0.x) / len1;
        let dx2 = self.width * (p2.y-p1.y) / len2;
        let dy2 = self.width * (p2.x-p1.x) / len2;
        let cp = cross(p0, p1, p2);

        if cp != 0.0 && cp.is_sign_positive() == self.width.is_sign_positive() {
            // Inner Join
            let limit = (len1.min(len2) / self.width_abs).max(self.inner_miter_limit);
            self.calc_miter(p0, p1, p2, dx1, dy1, dx2, dy2, limit)
        } else {
            // Outer Join
            self.calc_miter(p0, p1, p2, dx1, dy1, dx2, dy2, self.miter_limit)
        }
    }
    /// Stroke the Vertex Source
    ///
    /// Each sub-path becomes one (open) or two (closed) polygons:
    ///   the forward side followed by the backward side
    fn stroke(&self) -> Vec<Vertex<f64>> {
        let mut all_out = vec![];
        let v0 = self.source.xconvert();
        for (m1,m2) in split(&v0) {
            let v = clean_path(&v0[m1..=m2]);
            let closed = is_path_closed(&v);
            // Ignore the Close Vertex
            let n = if closed { v.len() - 1 } else { v.len() };
            if n < 2 {
                continue;
            }
            let (n1,n2) = if closed { (0, n) } else { (1,n-1) };

            // Forward Path
            let mut outf = vec![];
            if ! closed {
                outf.extend( self.calc_cap(&v[0], &v[1]) );
            }
            for i in n1 .. n2 {
                outf.extend( self.calc_join(&v[prev!(i,n)], &v[i], &v[next!(i,n)]) );
            }
            // Backward Path
            let mut outb = vec![];
            if ! closed {
                outb.extend( self.calc_cap(&v[n-1], &v[n-2]) );
            }
            for i in (n1 .. n2).rev() {
                outb.extend( self.calc_join(&v[next!(i,n)], &v[i], &v[prev!(i,n)]) );
            }
            if outf.is_empty() || outb.is_empty() {
                continue;
            }
            outf[0].cmd = PathCommand::MoveTo;
            if closed {
                // Outer and inner sides are separate polygons
                close(&mut outf);
                outb[0].cmd = PathCommand::MoveTo;
            }
            close(&mut outb);
            all_out.extend(outf);
            all_out.extend(outb);
        }
        all_out
    }
}

/// Append a Close at the last vertex
fn close(v: &mut Vec<Vertex<f64>>) {
    if let Some(last) = v.last().copied() {
        v.push( Vertex::close_polygon(last.x, last.y) );
    }
}

/// Calculate Intersection of two lines
///
/// Lines are given by pairs of points (`ax`,`ay`) -> (`bx`,`by`) and
///   (`cx`,`cy`) -> (`dx`,`dy`). Parallel lines return `None`.
///
/// [Line-Line Intersection](https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line)
#[allow(clippy::too_many_arguments)]
fn calc_intersection(ax: f64, ay: f64, bx: f64, by: f64,
                     cx: f64, cy: f64, dx: f64, dy: f64)
                     -> Option<(f64, f64)> {
    let intersection_epsilon = 1.0e-30;
    let num = (ay-cy) * (dx-cx) - (ax-cx) * (dy-cy);
    let den = (bx-ax) * (dy-cy) - (by-ay) * (dx-cx);
    if den.abs() < intersection_epsilon {
        return None;
    }
    let r = num / den;
    Some((ax + r * (bx-ax), ay + r * (by-ay)))
}

/// Path has a Close vertex
fn is_path_closed(verts: &[Vertex<f64>]) -> bool {
    verts.iter().any(|v| v.cmd == PathCommand::Close)
}

/// Remove repeated vertices, closer than 1e-6
///
/// For closed paths trailing vertices equal to the first are also removed
fn clean_path(v: &[Vertex<f64>]) -> Vec<Vertex<f64>>{
    let mut out : Vec<Vertex<f64>> = Vec::with_capacity(v.len());
    for p in v {
        match (p.cmd, out.last()) {
            (PathCommand::LineTo, Some(last)) if len(last, p) < 1e-6 => {},
            _ => out.push(*p),
        }
    }
    if ! is_path_closed(&out) {
        return out;
    }
    // Drop the Close, trim the end, then add the Close back
    out.retain(|p| p.cmd != PathCommand::Close);
    while out.len() > 1 && len(&out[0], &out[out.len()-1]) < 1e-6 {
        out.pop();
    }
    close(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Path;

    #[test]
    fn horizontal_segment_outline() {
        let mut path = Path::new();
        path.move_to(0.0, 5.0);
        path.line_to(10.0, 5.0);
        let mut s = Stroke::new(path);
        s.width(2.0);
        let v = s.xconvert();
        let pts : Vec<_> = v.iter().map(|p| (p.x, p.y, p.cmd)).collect();
        assert_eq!(pts, vec![(0.0, 6.0, PathCommand::MoveTo),
                             (0.0, 4.0, PathCommand::LineTo),
                             (10.0, 4.0, PathCommand::LineTo),
                             (10.0, 6.0, PathCommand::LineTo),
                             (10.0, 6.0, PathCommand::Close)]);
    }

    #[test]
    fn closed_square_has_two_rings() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.line_to(0.0, 10.0);
        path.close_polygon();
        let mut s = Stroke::new(path);
        s.width(2.0);
        let v = s.xconvert();
        let moves = v.iter().filter(|p| p.cmd == PathCommand::MoveTo).count();
        let closes = v.iter().filter(|p| p.cmd == PathCommand::Close).count();
        assert_eq!((moves, closes), (2, 2));
        // Corners are mitered 1 pixel out and in
        let has = |x: f64| v.iter().any(|p| (p.x - x).abs() < 1e-9);
        assert!(has(-1.0) && has(11.0));
        assert!(has(1.0) && has(9.0));
    }

    #[test]
    fn sharp_joins_are_beveled() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(20.0, 2.0);
        path.line_to(0.0, 4.0);
        let mut s = Stroke::new(path);
        s.width(2.0);
        s.miter_limit(4.0);
        let v = s.xconvert();
        // A miter would reach x = 30
        let max_x = v.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!(max_x > 20.0 && max_x <= 21.0, "{}", max_x);

        // Within the limit the miter is kept
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        let mut s = Stroke::new(path);
        s.width(2.0);
        let corner = |p: &Vertex<f64>| (p.x - 11.0).abs() < 1e-9 && (p.y + 1.0).abs() < 1e-9;
        assert!(s.xconvert().iter().any(corner));
    }

    #[test]
    fn degenerate_paths_produce_nothing() {
        let mut path = Path::new();
        path.move_to(3.0, 3.0);
        path.line_to(3.0, 3.0);
        let s = Stroke::new(path);
        assert!(s.xconvert().is_empty());
    }
}
