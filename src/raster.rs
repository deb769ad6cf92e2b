//! Scanline Rasterizer
//!
//! Converts closed polygons into scanlines of coverage values.
//!
//!     use diagram_raster::{RasterizerScanline, FillingRule};
//!     use diagram_raster::scan::ScanlineU8;
//!
//!     let mut ras = RasterizerScanline::new();
//!     ras.move_to(1.0, 1.0);
//!     ras.line_to(4.0, 1.0);
//!     ras.line_to(4.0, 3.0);
//!     ras.line_to(1.0, 3.0);
//!     assert!(ras.rewind_scanlines());
//!     let mut sl = ScanlineU8::new();
//!     sl.reset(ras.min_x(), ras.max_x());
//!     assert!(ras.sweep_scanline(&mut sl));
//!     assert_eq!(sl.y, 1);
//!     assert_eq!(sl.spans[0].x, 1);
//!     assert_eq!(sl.spans[0].covers, vec![255,255,255]);
//!     assert_eq!(ras.filling_rule(), FillingRule::NonZero);

use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_SCALE;

use crate::clip::Clip;
use crate::scan::ScanlineU8;
use crate::cell::RasterizerCell;
use crate::paths::PathCommand;

use crate::VertexSource;

use std::cmp::min;
use std::cmp::max;

struct RasConvInt {
}
impl RasConvInt {
    fn upscale(v: f64) -> i64 {
        (v * POLY_SUBPIXEL_SCALE as f64).round() as i64
    }
}

/// Winding Rule for deciding which areas are inside
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    /// Inside if the winding number is not zero
    NonZero,
    /// Inside if the winding number is odd
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

/// Path Status
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PathStatus {
    Initial,
    Closed,
    MoveTo,
    LineTo
}
impl Default for PathStatus {
    fn default() -> PathStatus {
        PathStatus::Initial
    }
}

/// Rasterizer Anti-Alias using Scanline
#[derive(Debug, Default)]
pub struct RasterizerScanline {
    /// Clipping Region
    pub clipper: Clip,
    /// Collection of Rasterizing Cells
    pub outline: RasterizerCell,
    /// Status of Path
    pub status: PathStatus,
    /// Current x position
    pub x0: i64,
    /// Current y position
    pub y0: i64,
    /// Current y row being swept
    scan_y: i64,
    /// Filling Rule for Polygons
    filling_rule: FillingRule,
}

impl RasterizerScanline {
    /// Create a new RasterizerScanline
    pub fn new() -> Self {
        Self { clipper: Clip::new(), status: PathStatus::Initial,
               outline: RasterizerCell::new(),
               x0: 0, y0: 0, scan_y: 0,
               filling_rule: FillingRule::NonZero,
        }
    }
    /// Reset Rasterizer, the clip box is kept
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
    }
    /// Set the filling rule
    pub fn set_filling_rule(&mut self, filling_rule: FillingRule) {
        self.filling_rule = filling_rule;
    }
    /// Current filling rule
    pub fn filling_rule(&self) -> FillingRule {
        self.filling_rule
    }
    /// Set the Clipping Region, usually the image bounds
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.clipper.clip_box(RasConvInt::upscale(x1),
                              RasConvInt::upscale(y1),
                              RasConvInt::upscale(x2),
                              RasConvInt::upscale(y2));
    }
    /// Add a Path
    ///
    /// Each MoveTo starts a new polygon; the previous one is closed
    pub fn add_path<VS: VertexSource>(&mut self, path: &VS) {
        if ! self.outline.sorted_y.is_empty() {
            self.reset();
        }
        for seg in path.xconvert() {
            match seg.cmd {
                PathCommand::LineTo => self.line_to(seg.x, seg.y),
                PathCommand::MoveTo => self.move_to(seg.x, seg.y),
                PathCommand::Close  => self.close_polygon(),
            }
        }
    }
    /// Move to point (`x`,`y`), starting a new polygon
    pub fn move_to(&mut self, x: f64, y: f64) {
        if ! self.outline.sorted_y.is_empty() {
            self.reset();
        }
        self.close_polygon();
        self.x0 = RasConvInt::upscale( x );
        self.y0 = RasConvInt::upscale( y );
        self.clipper.move_to(self.x0,self.y0);
        self.status = PathStatus::MoveTo;
    }
    /// Draw line from the current point to (`x`,`y`)
    pub fn line_to(&mut self, x: f64, y: f64) {
        let x = RasConvInt::upscale( x );
        let y = RasConvInt::upscale( y );
        self.clipper.line_to(&mut self.outline, x,y);
        self.status = PathStatus::LineTo;
    }
    /// Close the current polygon back to its starting point
    pub fn close_polygon(&mut self) {
        if self.status == PathStatus::LineTo {
            self.clipper.line_to(&mut self.outline, self.x0, self.y0);
            self.status = PathStatus::Closed;
        }
    }
    /// Close the polygon and sort the cells
    ///
    /// Returns false if there is nothing to draw
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            false
        } else {
            self.scan_y = self.outline.min_y;
            true
        }
    }
    /// Fill the next non-empty row of spans into `sl`
    ///
    /// Returns false once all rows have been swept
    pub fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        loop {
            if self.scan_y < 0 {
                self.scan_y = 0;
                continue;
            }
            if self.scan_y > self.outline.max_y {
                return false;
            }
            sl.reset_spans();
            let cells = self.outline.scanline_cells( self.scan_y );
            let mut num_cells = cells.len();
            let mut iter = cells.iter();
            let mut cover = 0;

            if let Some(mut cur_cell) = iter.next() {
                while num_cells > 0 {
                    let mut x = cur_cell.x;
                    let mut area = cur_cell.area;
                    cover += cur_cell.cover;
                    num_cells -= 1;
                    // Accumulate all cells with the same x
                    while num_cells > 0 {
                        cur_cell = match iter.next() {
                            Some(c) => c,
                            None => break,
                        };
                        if cur_cell.x != x {
                            break;
                        }
                        area += cur_cell.area;
                        cover += cur_cell.cover;
                        num_cells -= 1;
                    }
                    if area != 0 {
                        let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                        if alpha > 0 {
                            sl.add_cell(x, alpha);
                        }
                        x += 1;
                    }
                    if num_cells > 0 && cur_cell.x > x {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha > 0 {
                            sl.add_span(x, cur_cell.x - x, alpha);
                        }
                    }
                }
            }
            if sl.num_spans() != 0 {
                break;
            }
            self.scan_y += 1;
        }
        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
    /// Minimum x cell
    pub fn min_x(&self) -> i64 {
        self.outline.min_x
    }
    /// Maximum x cell
    pub fn max_x(&self) -> i64 {
        self.outline.max_x
    }
    /// Convert an accumulated area into a coverage value [0,255]
    fn calculate_alpha(&self, area: i64) -> u64 {
        let aa_shift  = 8;
        let aa_scale  = 1 << aa_shift;
        let aa_scale2 = aa_scale * 2;
        let aa_mask   = aa_scale  - 1;
        let aa_mask2  = aa_scale2 - 1;

        let mut cover = area >> (POLY_SUBPIXEL_SHIFT*2 + 1 - aa_shift);
        cover = cover.abs();
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= aa_mask2;
            if cover > aa_scale {
                cover = aa_scale2 - cover;
            }
        }
        max(0, min(cover, aa_mask)) as u64
    }
}
