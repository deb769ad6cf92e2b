//! Rasterizer Cells
//!
//! Edges are accumulated into cells of one pixel each. A cell carries
//! the signed `cover` (vertical extent of the edges crossing it) and the
//! `area` between the edges and the left side of the cell, both in
//! subpixel units.

use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_MASK;

use std::cmp::min;
use std::cmp::max;

/// Single pixel cell, cell_aa
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct Cell {
    /// Pixel x position
    pub x: i64,
    /// Pixel y position
    pub y: i64,
    /// Accumulated cover
    pub cover: i64,
    /// Accumulated area
    pub area: i64,
}

impl Cell {
    /// Create an unplaced Cell
    pub fn new() -> Self {
        Cell { x: std::i64::MAX,
               y: std::i64::MAX,
               cover: 0,
               area: 0
        }
    }
    /// Create an empty Cell at (`x`,`y`)
    pub fn at(x: i64, y: i64) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    /// Cell is at location (`x`,`y`)
    pub fn equal(&self, x: i64, y: i64) -> bool {
        self.x == x && self.y == y
    }
    /// Cell has no cover and no area
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Collection of Cells for a set of edges
#[derive(Debug,Default)]
pub struct RasterizerCell {
    /// Cells in the order they were generated; the last is the current cell
    pub cells: Vec<Cell>,
    /// Minimum x cell
    pub min_x: i64,
    /// Maximum x cell
    pub max_x: i64,
    /// Minimum y cell
    pub min_y: i64,
    /// Maximum y cell
    pub max_y: i64,
    /// Cells by row, each row sorted by x
    pub sorted_y: Vec<Vec<Cell>>,
}

impl RasterizerCell {
    /// Create a new, empty set of cells
    pub fn new() -> Self {
        Self { cells: vec![],
               min_x: std::i64::MAX,
               min_y: std::i64::MAX,
               max_x: std::i64::MIN,
               max_y: std::i64::MIN,
               sorted_y: vec![],
        }
    }
    /// Remove all cells and bounds
    pub fn reset(&mut self) {
        self.max_x = std::i64::MIN;
        self.max_y = std::i64::MIN;
        self.min_x = std::i64::MAX;
        self.min_y = std::i64::MAX;
        self.sorted_y.clear();
        self.cells.clear();
    }
    /// Number of cells
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    /// Distribute cells into rows and sort each row by x
    ///
    /// Rows above the image (y < 0) are dropped
    pub fn sort_cells(&mut self) {
        if ! self.sorted_y.is_empty() || self.max_y < 0 {
            return;
        }
        self.sorted_y = vec![vec![]; (self.max_y+1) as usize];
        for c in self.cells.iter() {
            if c.y >= 0 && ! c.is_empty() {
                self.sorted_y[c.y as usize].push(*c);
            }
        }
        for row in self.sorted_y.iter_mut() {
            row.sort_by(|a,b| (a.x).cmp(&b.x));
        }
        log::trace!("sort_cells: {} cells in rows {} .. {}",
                    self.cells.len(), self.min_y, self.max_y);
    }
    /// Number of cells in row `y`
    pub fn scanline_num_cells(&self, y: i64) -> usize {
        self.scanline_cells(y).len()
    }
    /// Sorted cells of row `y`
    pub fn scanline_cells(&self, y: i64) -> &[Cell] {
        if y < 0 || y as usize >= self.sorted_y.len() {
            return &[];
        }
        & self.sorted_y[y as usize]
    }
    fn curr_cell_not_equal(&self, x: i64, y: i64) -> bool {
        match self.cells.last() {
            None      => true,
            Some(cur) => ! cur.equal(x,y),
        }
    }
    fn pop_last_cell_if_empty(&mut self) {
        if let Some(c) = self.cells.last() {
            if c.is_empty() {
                self.cells.pop();
            }
        }
    }
    fn set_curr_cell(&mut self, x: i64, y: i64)  {
        if self.curr_cell_not_equal(x, y) {
            self.pop_last_cell_if_empty();
            self.cells.push( Cell::at(x,y) );
        }
    }
    fn curr_cell(&mut self) -> &mut Cell {
        if self.cells.is_empty() {
            self.cells.push( Cell::new() );
        }
        let n = self.cells.len();
        &mut self.cells[n-1]
    }
    fn incr_curr_cell(&mut self, cover: i64, area: i64) {
        let c = self.curr_cell();
        c.cover += cover;
        c.area  += area;
    }

    /// Render a line segment within a single row `ey`
    ///
    /// `y1` and `y2` are fractional positions within the row
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1  & POLY_SUBPIXEL_MASK;
        let fx2 = x2  & POLY_SUBPIXEL_MASK;

        // Horizontal Line
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        // Single Cell
        if ex1 == ex2 {
            self.incr_curr_cell(y2-y1, (fx1 + fx2) * (y2-y1));
            return;
        }
        // Adjacent Cells on Same Line
        let (mut p, first, incr, dx) = if x2-x1 < 0 {
            (fx1 * (y2-y1), 0,-1, x1-x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2-y1), POLY_SUBPIXEL_SCALE, 1, x2-x1)
        };
        let mut delta = p / dx;
        let mut xmod =  p % dx;

        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.incr_curr_cell(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;

            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.incr_curr_cell(delta, POLY_SUBPIXEL_SCALE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        delta = y2-y1;
        self.incr_curr_cell(delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta);
    }

    /// Add a line from (`x1`,`y1`) to (`x2`,`y2`) in subpixel units
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let dx_limit = 16384 << POLY_SUBPIXEL_SHIFT;
        let dx = x2 - x1;
        // Split long lines in half
        if dx >= dx_limit || dx <= -dx_limit {
            let cx = (x1 + x2) / 2;
            let cy = (y1 + y2) / 2;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }
        let dy = y2-y1;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 &  POLY_SUBPIXEL_MASK;
        let fy2 = y2 &  POLY_SUBPIXEL_MASK;

        self.min_x = min(ex2, min(ex1, self.min_x));
        self.min_y = min(ey2, min(ey1, self.min_y));
        self.max_x = max(ex2, max(ex1, self.max_x));
        self.max_y = max(ey2, max(ey1, self.max_y));

        self.set_curr_cell(ex1, ey1);

        // Everything in a single row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            self.pop_last_cell_if_empty();
            return;
        }

        // Vertical Line
        if dx == 0 {
            let ex = x1 >> POLY_SUBPIXEL_SHIFT;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;

            let (first, incr) = if dy < 0 {
                (0, -1)
            } else {
                (POLY_SUBPIXEL_SCALE, 1)
            };
            let delta = first - fy1;
            self.incr_curr_cell(delta, two_fx * delta);

            let mut ey1 = ey1 + incr;
            self.set_curr_cell(ex, ey1);
            let delta = first + first - POLY_SUBPIXEL_SCALE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                {
                    let c = self.curr_cell();
                    c.cover = delta;
                    c.area = area;
                }
                ey1 += incr;
                self.set_curr_cell(ex, ey1);
            }
            let delta = fy2 - POLY_SUBPIXEL_SCALE + first;
            self.incr_curr_cell(delta, two_fx * delta);
            return;
        }

        // Multiple rows
        let (p,first,incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod  = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);
        let mut ey1 = ey1 + incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
        if ey1 != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem  = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2);
        self.pop_last_cell_if_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_line_cover() {
        let mut ras = RasterizerCell::new();
        // x = 2.5, y from 1 to 3
        ras.line(2*256 + 128, 256, 2*256 + 128, 3*256);
        ras.sort_cells();
        assert_eq!(ras.scanline_num_cells(0), 0);
        for y in 1 .. 3 {
            let cells = ras.scanline_cells(y);
            assert_eq!(cells.len(), 1);
            assert_eq!(cells[0].x, 2);
            assert_eq!(cells[0].cover, 256);
            assert_eq!(cells[0].area, 256 * 256);
        }
        assert_eq!((ras.min_y, ras.max_y), (1, 3));
    }

    #[test]
    fn horizontal_line_no_cover() {
        let mut ras = RasterizerCell::new();
        ras.line(0, 512, 5*256, 512);
        ras.sort_cells();
        let n : usize = (0 ..= ras.max_y).map(|y| ras.scanline_num_cells(y)).sum();
        assert_eq!(n, 0);
    }

    #[test]
    fn long_line_is_split() {
        let mut ras = RasterizerCell::new();
        let x2 = 20_000 << POLY_SUBPIXEL_SHIFT;
        ras.line(0, 0, x2, 256);
        let cover : i64 = ras.cells.iter().map(|c| c.cover).sum();
        assert_eq!(cover, 256);
    }
}
