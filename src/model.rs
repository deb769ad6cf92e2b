//! Diagram Model
//!
//! Grid, shapes and labels as produced by the upstream ASCII art parser.

use crate::color::Rgba8;

/// Default width of a text cell in pixels
pub const CELL_WIDTH: f64 = 10.0;
/// Default height of a text cell in pixels
pub const CELL_HEIGHT: f64 = 14.0;

/// Output canvas size and text cell metrics
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Grid {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Width of a single text cell in pixels
    pub cell_width: f64,
    /// Height of a single text cell in pixels
    pub cell_height: f64,
}

impl Grid {
    /// Create a Grid with the default cell size
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cell_width: CELL_WIDTH, cell_height: CELL_HEIGHT }
    }
    /// Set the text cell size
    pub fn with_cell(mut self, cell_width: f64, cell_height: f64) -> Self {
        self.cell_width = cell_width;
        self.cell_height = cell_height;
        self
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Corner style of a Point
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PointKind {
    Normal,
    /// Corner is rounded off
    Round,
}

impl Default for PointKind {
    fn default() -> Self {
        PointKind::Normal
    }
}

/// Point in pixel space
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub kind: PointKind,
}

impl Point {
    /// Create a normal Point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, kind: PointKind::Normal }
    }
    /// Create a rounded Point
    pub fn round(x: f64, y: f64) -> Self {
        Self { x, y, kind: PointKind::Round }
    }
}

/// Variety of Shape
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash)]
pub enum ShapeKind {
    Simple,
    Arrowhead,
    PointMarker,
    Document,
    Storage,
    Io,
    Decision,
    ManualOperation,
    Trapezoid,
    InvTrapezoid,
    Ellipse,
    Custom,
}

impl ShapeKind {
    /// Numeric code used by the serialized diagram format
    pub fn code(self) -> i32 {
        match self {
            ShapeKind::Simple          => 0,
            ShapeKind::Arrowhead       => 1,
            ShapeKind::PointMarker     => 2,
            ShapeKind::Document        => 3,
            ShapeKind::Storage         => 4,
            ShapeKind::Io              => 5,
            ShapeKind::Decision        => 6,
            ShapeKind::ManualOperation => 7,
            ShapeKind::Trapezoid       => 8,
            ShapeKind::InvTrapezoid    => 9,
            ShapeKind::Ellipse         => 10,
            ShapeKind::Custom          => -1,
        }
    }
    /// Shape kind for a numeric code
    pub fn from_code(code: i32) -> Option<Self> {
        let kind = match code {
            0  => ShapeKind::Simple,
            1  => ShapeKind::Arrowhead,
            2  => ShapeKind::PointMarker,
            3  => ShapeKind::Document,
            4  => ShapeKind::Storage,
            5  => ShapeKind::Io,
            6  => ShapeKind::Decision,
            7  => ShapeKind::ManualOperation,
            8  => ShapeKind::Trapezoid,
            9  => ShapeKind::InvTrapezoid,
            10 => ShapeKind::Ellipse,
            -1 => ShapeKind::Custom,
            _ => return None,
        };
        Some(kind)
    }
    /// Shape kind from its name, case insensitive, `_` and `-` ignored
    pub fn from_name(name: &str) -> Option<Self> {
        let name : String = name.chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let kind = match name.as_str() {
            "simple"          => ShapeKind::Simple,
            "arrowhead"       => ShapeKind::Arrowhead,
            "pointmarker"     => ShapeKind::PointMarker,
            "document"        => ShapeKind::Document,
            "storage"         => ShapeKind::Storage,
            "io"              => ShapeKind::Io,
            "decision"        => ShapeKind::Decision,
            "manualoperation" => ShapeKind::ManualOperation,
            "trapezoid"       => ShapeKind::Trapezoid,
            "invtrapezoid"    => ShapeKind::InvTrapezoid,
            "ellipse"         => ShapeKind::Ellipse,
            "custom"          => ShapeKind::Custom,
            _ => return None,
        };
        Some(kind)
    }
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Simple
    }
}

/// Geometric entity of a Diagram
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Outline points, in order
    pub points: Vec<Point>,
    /// Last point connects back to the first
    pub closed: bool,
    /// Outline is drawn dashed, never filled
    pub dashed: bool,
    /// Fill color, white when not set
    pub fill_color: Option<Rgba8>,
    /// Stroke color, black when not set
    pub stroke_color: Option<Rgba8>,
    /// Stroke width, the rendering default when not set
    pub stroke_width: Option<f64>,
}

impl Shape {
    /// Create an empty, open Shape
    pub fn new(kind: ShapeKind) -> Self {
        Self { kind, ..Default::default() }
    }
    /// Set the points
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }
    /// Mark the Shape as closed
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }
    /// Stroke color, or black
    pub fn stroke_color(&self) -> Rgba8 {
        self.stroke_color.unwrap_or_else(Rgba8::black)
    }
    /// Fill color, or white
    pub fn fill_color(&self) -> Rgba8 {
        self.fill_color.unwrap_or_else(Rgba8::white)
    }
}

/// Text Label
#[derive(Debug,Clone,PartialEq)]
pub struct Label {
    pub text: String,
    /// Size in pixels
    pub font_size: f64,
    /// Left end of the baseline
    pub x: f64,
    /// Baseline
    pub y: f64,
    pub color: Rgba8,
    /// Label sits on top of a line
    pub on_line: bool,
    /// Draw an outline around the glyphs
    pub outline: bool,
    /// Outline color, white when not set
    pub outline_color: Option<Rgba8>,
}

impl Label {
    /// Create a black Label with its baseline starting at (`x`,`y`)
    pub fn new(text: &str, font_size: f64, x: f64, y: f64) -> Self {
        Self { text: text.to_string(), font_size, x, y,
               color: Rgba8::black(),
               on_line: false, outline: false, outline_color: None }
    }
    /// Label needs an outline drawn first
    pub fn has_outline(&self) -> bool {
        self.outline || self.on_line
    }
}

/// Complete diagram description
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Diagram {
    pub grid: Grid,
    pub shapes: Vec<Shape>,
    pub labels: Vec<Label>,
}

impl Diagram {
    /// Create a new Diagram
    pub fn new(grid: Grid, shapes: Vec<Shape>, labels: Vec<Label>) -> Self {
        Self { grid, shapes, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_codes() {
        for code in -1 ..= 10 {
            let kind = ShapeKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(ShapeKind::from_code(11), None);
        assert_eq!(ShapeKind::from_name("INV_TRAPEZOID"), Some(ShapeKind::InvTrapezoid));
        assert_eq!(ShapeKind::from_name("point-marker"), Some(ShapeKind::PointMarker));
        assert_eq!(ShapeKind::from_name("circle"), None);
    }

    #[test]
    fn unset_colors_use_defaults() {
        let mut s = Shape::new(ShapeKind::Simple);
        assert_eq!(s.fill_color(), Rgba8::white());
        assert_eq!(s.stroke_color(), Rgba8::black());
        s.fill_color = Some(Rgba8::white());
        assert_eq!(s.fill_color(), Rgba8::white());
        assert_ne!(s.fill_color, None);
    }
}
