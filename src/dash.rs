//! Dashed Lines

use crate::paths::PathCommand;
use crate::paths::Vertex;
use crate::paths::split;
use crate::VertexSource;

/// Dash converter for Paths and Vertex Sources
///
/// Each sub-path is cut into open dashes of alternating `on` and `off`
/// length. Closed sub-paths include their closing edge. The pattern
/// restarts at each sub-path.
///
///     use diagram_raster::{Path, Dash, VertexSource, PathCommand};
///
///     let mut path = Path::new();
///     path.move_to(0.0, 0.0);
///     path.line_to(10.0, 0.0);
///     let dash = Dash::new(path, 3.0, 2.0);
///     let v = dash.xconvert();
///     let moves = v.iter().filter(|v| v.cmd == PathCommand::MoveTo).count();
///     assert_eq!(moves, 2);
///
#[derive(Debug)]
pub struct Dash<T: VertexSource> {
    source: T,
    on: f64,
    off: f64,
}

impl<T> Dash<T> where T: VertexSource {
    /// Create a new Dash converter with dash length `on` and gap `off`
    pub fn new(source: T, on: f64, off: f64) -> Self {
        Self { source, on, off }
    }
    /// Cut the source into dashes
    fn dash(&self) -> Vec<Vertex<f64>> {
        let v0 = self.source.xconvert();
        if self.on <= 0.0 {
            return vec![];
        }
        if self.off <= 0.0 {
            return v0;
        }
        let mut out = vec![];
        for (m1, m2) in split(&v0) {
            let sub = &v0[m1..=m2];
            let mut pts : Vec<(f64,f64)> = sub.iter()
                .filter(|v| v.cmd != PathCommand::Close)
                .map(|v| (v.x, v.y))
                .collect();
            if sub.iter().any(|v| v.cmd == PathCommand::Close) {
                pts.push(pts[0]);
            }
            // Position in the pattern
            let mut on = true;
            let mut left = self.on;
            let mut pen_down = false;
            for w in pts.windows(2) {
                let (mut x0, mut y0) = w[0];
                let (x1, y1) = w[1];
                let mut seg = (x1-x0).hypot(y1-y0);
                while seg > 0.0 {
                    let step = seg.min(left);
                    let t = step / seg;
                    let (x, y) = (x0 + (x1-x0) * t, y0 + (y1-y0) * t);
                    if on {
                        if ! pen_down {
                            out.push(Vertex::move_to(x0, y0));
                            pen_down = true;
                        }
                        out.push(Vertex::line_to(x, y));
                    }
                    x0 = x;
                    y0 = y;
                    seg -= step;
                    left -= step;
                    if left <= 0.0 {
                        on = ! on;
                        pen_down = false;
                        left = if on { self.on } else { self.off };
                    }
                }
            }
        }
        out
    }
}

impl<T> VertexSource for Dash<T> where T: VertexSource {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.dash()
    }
}
