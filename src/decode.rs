//! XML Diagram Decoding
//!
//! Reads the XML diagram description written by the ASCII art parser
//!
//!```xml
//! <diagram>
//!   <grid><width>80</width><height>42</height></grid>
//!   <shapes>
//!     <shape>
//!       <type>0</type>
//!       <points>
//!         <point><x>5</x><y>7</y><type>normal</type></point>
//!         <point><x>45</x><y>7</y><type>round</type></point>
//!       </points>
//!       <closed>false</closed>
//!       <strokeColor>#000000</strokeColor>
//!     </shape>
//!   </shapes>
//!   <texts>
//!     <text>
//!       <text>hello</text><font><size>12</size></font>
//!       <xPos>10</xPos><yPos>30</yPos>
//!       <color><r>0</r><g>0</g><b>0</b><a>255</a></color>
//!     </text>
//!   </texts>
//! </diagram>
//!```

use crate::color::Rgba8;
use crate::error::DecodeError;
use crate::model::{Diagram, Grid, Label, Point, PointKind, Shape, ShapeKind};
use crate::model::{CELL_HEIGHT, CELL_WIDTH};

use roxmltree::{Document, Node};

use std::path::Path;
use std::str::FromStr;

/// Default label size in pixels
const FONT_SIZE: f64 = 12.0;

/// Read a Diagram from an XML file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Diagram, DecodeError> {
    let text = std::fs::read_to_string(path)?;
    from_xml(&text)
}

/// Decode a Diagram from an XML string
///
///     use diagram_raster::decode::from_xml;
///     use diagram_raster::ShapeKind;
///
///     let d = from_xml("<diagram><grid><width>4</width><height>3</height></grid>
///                       <shapes><shape><type>decision</type></shape></shapes>
///                       </diagram>").unwrap();
///     assert_eq!((d.grid.width, d.grid.height), (4, 3));
///     assert_eq!(d.shapes[0].kind, ShapeKind::Decision);
///
pub fn from_xml(text: &str) -> Result<Diagram, DecodeError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("diagram") {
        return Err(DecodeError::MissingElement("diagram"));
    }
    let grid = child(root, "grid").ok_or(DecodeError::MissingElement("grid"))?;
    let width = value(grid, "width")?.ok_or(DecodeError::MissingElement("width"))?;
    let height = value(grid, "height")?.ok_or(DecodeError::MissingElement("height"))?;
    let grid = Grid::new(width, height)
        .with_cell(value(grid, "cellWidth")?.unwrap_or(CELL_WIDTH),
                   value(grid, "cellHeight")?.unwrap_or(CELL_HEIGHT));

    let shapes = match child(root, "shapes") {
        Some(node) => elements(node, "shape").map(shape).collect::<Result<_,_>>()?,
        None => vec![],
    };
    let labels = match child(root, "texts") {
        Some(node) => elements(node, "text").map(label).collect::<Result<_,_>>()?,
        None => vec![],
    };
    log::debug!("decoded {}x{} grid, {} shapes, {} labels",
                grid.width, grid.height, shapes.len(), labels.len());
    Ok(Diagram::new(grid, shapes, labels))
}

fn shape(node: Node) -> Result<Shape, DecodeError> {
    let kind = match text(node, "type") {
        None => ShapeKind::Simple,
        Some(t) => t.parse::<i32>().ok()
            .and_then(ShapeKind::from_code)
            .or_else(|| ShapeKind::from_name(t))
            .ok_or_else(|| invalid("type", t))?,
    };
    let points = match child(node, "points") {
        Some(points) => elements(points, "point").map(point).collect::<Result<_,_>>()?,
        None => vec![],
    };
    Ok(Shape {
        kind,
        points,
        closed: flag(node, "closed")?,
        dashed: flag(node, "dashed")?,
        fill_color: color(node, "fillColor")?,
        stroke_color: color(node, "strokeColor")?,
        stroke_width: value(node, "strokeWidth")?,
    })
}

fn point(node: Node) -> Result<Point, DecodeError> {
    let x = value(node, "x")?.ok_or(DecodeError::MissingElement("x"))?;
    let y = value(node, "y")?.ok_or(DecodeError::MissingElement("y"))?;
    let kind = match text(node, "type") {
        None => PointKind::Normal,
        Some(t) if t.eq_ignore_ascii_case("normal") => PointKind::Normal,
        Some(t) if t.eq_ignore_ascii_case("round") => PointKind::Round,
        Some(t) => return Err(invalid("type", t)),
    };
    Ok(Point { x, y, kind })
}

fn label(node: Node) -> Result<Label, DecodeError> {
    let size = match child(node, "font") {
        Some(font) => value(font, "size")?,
        None => None,
    };
    let mut label = Label::new(text(node, "text").unwrap_or(""),
                               size.unwrap_or(FONT_SIZE),
                               value(node, "xPos")?.unwrap_or(0.0),
                               value(node, "yPos")?.unwrap_or(0.0));
    if let Some(c) = color(node, "color")? {
        label.color = c;
    }
    label.on_line = flag(node, "isTextOnLine")?;
    label.outline = flag(node, "hasOutline")?;
    label.outline_color = color(node, "outlineColor")?;
    Ok(label)
}

/// First child element named `name`
fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// All child elements named `name`
fn elements<'a, 'i: 'a>(node: Node<'a, 'i>, name: &'a str) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children().filter(move |n| n.has_tag_name(name))
}

/// Trimmed, non-empty text of the child element `name`
fn text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn invalid(element: &str, value: &str) -> DecodeError {
    DecodeError::InvalidValue { element: element.to_string(), value: value.to_string() }
}

fn value<T: FromStr>(node: Node, name: &str) -> Result<Option<T>, DecodeError> {
    match text(node, name) {
        None => Ok(None),
        Some(t) => t.parse().map(Some).map_err(|_| invalid(name, t)),
    }
}

fn flag(node: Node, name: &str) -> Result<bool, DecodeError> {
    match text(node, name) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(t) => Err(invalid(name, t)),
    }
}

/// Color as `<r/><g/><b/>[<a/>]` children or `#RRGGBB[AA]` text
fn color(node: Node, name: &str) -> Result<Option<Rgba8>, DecodeError> {
    let c = match child(node, name) {
        Some(c) => c,
        None => return Ok(None),
    };
    if child(c, "r").is_some() {
        let r = value(c, "r")?.unwrap_or(0);
        let g = value(c, "g")?.unwrap_or(0);
        let b = value(c, "b")?.unwrap_or(0);
        let a = value(c, "a")?.unwrap_or(255);
        return Ok(Some(Rgba8::new(r, g, b, a)));
    }
    let t = match c.text().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(None),
    };
    parse_hex(t).map(Some).ok_or_else(|| invalid(name, t))
}

fn parse_hex(t: &str) -> Option<Rgba8> {
    let hex = t.strip_prefix('#')?;
    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i .. i + 2], 16).ok();
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex("#ff0080"), Some(Rgba8::new(255, 0, 128, 255)));
        assert_eq!(parse_hex("#FF008040"), Some(Rgba8::new(255, 0, 128, 64)));
        assert_eq!(parse_hex("ff0080"), None);
        assert_eq!(parse_hex("#ff00"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }

    #[test]
    fn missing_grid_size() {
        let err = from_xml("<diagram><grid><width>3</width></grid></diagram>");
        assert!(matches!(err, Err(DecodeError::MissingElement("height"))));
        let err = from_xml("<diagram></diagram>");
        assert!(matches!(err, Err(DecodeError::MissingElement("grid"))));
        let err = from_xml("<picture/>");
        assert!(matches!(err, Err(DecodeError::MissingElement("diagram"))));
    }

    #[test]
    fn bad_values() {
        let err = from_xml("<diagram><grid><width>-3</width><height>1</height></grid></diagram>");
        assert!(matches!(err, Err(DecodeError::InvalidValue { .. })));
        let err = from_xml("<diagram><grid><width>3</width><height>1</height></grid>
                            <shapes><shape><type>hexagon</type></shape></shapes></diagram>");
        assert!(matches!(err, Err(DecodeError::InvalidValue { .. })));
        assert!(matches!(from_xml("<diagram>"), Err(DecodeError::Xml(_))));
    }
}
