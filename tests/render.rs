use diagram_raster::{Diagram, Grid, Point, Shape, ShapeKind};
use diagram_raster::{Pixel, PixelData, Pixfmt, RenderOptions, Renderer, Rgba8, Source};

fn render(diagram: &Diagram) -> Pixfmt<Rgba8> {
    Renderer::new(RenderOptions::default()).unwrap().render(diagram).unwrap()
}

fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Point> {
    vec![Point::new(x1, y1), Point::new(x2, y1), Point::new(x2, y2), Point::new(x1, y2)]
}

fn assert_only(pix: &Pixfmt<Rgba8>, color: Rgba8, inside: impl Fn(usize, usize) -> bool) {
    for y in 0 .. pix.height() {
        for x in 0 .. pix.width() {
            let want = if inside(x, y) { color } else { Rgba8::white() };
            assert_eq!(pix.get((x, y)), want, "pixel ({},{})", x, y);
        }
    }
}

#[test_log::test]
fn filled_square() {
    let mut shape = Shape::new(ShapeKind::Simple).closed().with_points(rect(3.0, 3.0, 6.0, 6.0));
    shape.fill_color = Some(Rgba8::black());
    shape.stroke_color = Some(Rgba8::black());
    let pix = render(&Diagram::new(Grid::new(10, 10), vec![shape], vec![]));
    assert_only(&pix, Rgba8::black(), |x, y| (3 ..= 6).contains(&x) && (3 ..= 6).contains(&y));
}

#[test_log::test]
fn open_diagonal_line() {
    let shape = Shape::new(ShapeKind::Simple)
        .with_points(vec![Point::new(0.0, 0.0), Point::new(9.0, 9.0)]);
    let pix = render(&Diagram::new(Grid::new(10, 10), vec![shape], vec![]));
    assert_only(&pix, Rgba8::black(), |x, y| x == y);
}

#[test_log::test]
fn closed_single_segment() {
    let shape = Shape::new(ShapeKind::Simple).closed()
        .with_points(vec![Point::new(1.0, 1.0), Point::new(5.0, 1.0)]);
    let pix = render(&Diagram::new(Grid::new(8, 4), vec![shape], vec![]));
    assert_only(&pix, Rgba8::black(), |x, y| y == 1 && (1 ..= 5).contains(&x));
}

#[test_log::test]
fn fill_then_stroke() {
    let red = Rgba8::new(255, 0, 0, 255);
    let mut shape = Shape::new(ShapeKind::Simple).closed().with_points(rect(2.0, 2.0, 8.0, 8.0));
    shape.fill_color = Some(red);
    let pix = render(&Diagram::new(Grid::new(12, 12), vec![shape], vec![]));
    for i in 2 ..= 8 {
        assert_eq!(pix.get((2, i)), Rgba8::black());
        assert_eq!(pix.get((8, i)), Rgba8::black());
        assert_eq!(pix.get((i, 2)), Rgba8::black());
        assert_eq!(pix.get((i, 8)), Rgba8::black());
    }
    for y in 3 ..= 7 {
        for x in 3 ..= 7 {
            assert_eq!(pix.get((x, y)), red);
        }
    }
    assert_eq!(pix.get((9, 9)), Rgba8::white());
}

#[test_log::test]
fn unset_fill_is_white() {
    // The later shape erases the first one inside its border
    let mut below = Shape::new(ShapeKind::Simple).closed().with_points(rect(0.0, 0.0, 10.0, 10.0));
    below.fill_color = Some(Rgba8::black());
    let above = Shape::new(ShapeKind::Simple).closed().with_points(rect(2.0, 2.0, 8.0, 8.0));
    let pix = render(&Diagram::new(Grid::new(10, 10), vec![below, above], vec![]));
    assert_eq!(pix.get((5, 5)), Rgba8::white());
    assert_eq!(pix.get((1, 1)), Rgba8::black());
}

#[test_log::test]
fn shapes_without_points_draw_nothing() {
    let shapes = vec![
        Shape::new(ShapeKind::Simple).closed(),
        Shape::new(ShapeKind::Decision),
        Shape::new(ShapeKind::PointMarker),
        Shape::new(ShapeKind::Simple).with_points(vec![Point::new(4.0, 4.0)]),
    ];
    let pix = render(&Diagram::new(Grid::new(8, 8), shapes, vec![]));
    assert_only(&pix, Rgba8::black(), |_, _| false);
}

#[test_log::test]
fn empty_grid() {
    let shape = Shape::new(ShapeKind::Simple).closed().with_points(rect(1.0, 1.0, 5.0, 5.0));
    for (w, h) in vec![(0, 0), (0, 10), (10, 0)] {
        let pix = render(&Diagram::new(Grid::new(w, h), vec![shape.clone()], vec![]));
        assert_eq!(pix.width(), w);
        assert_eq!(pix.height(), h);
        assert!(pix.pixeldata().is_empty());
    }
}

#[test_log::test]
fn point_marker_ring() {
    let mut marker = Shape::new(ShapeKind::PointMarker).with_points(vec![Point::new(50.0, 50.0)]);
    marker.stroke_width = Some(4.0);
    let grid = Grid::new(100, 100).with_cell(40.0, 40.0);
    let pix = render(&Diagram::new(grid, vec![marker], vec![]));
    // Outer radius 16, inner radius 12
    assert_eq!(pix.get((50, 50)), Rgba8::white());
    assert_eq!(pix.get((64, 50)), Rgba8::black());
    assert_eq!(pix.get((35, 50)), Rgba8::black());
    assert_eq!(pix.get((50, 36)), Rgba8::black());
    assert_eq!(pix.get((70, 50)), Rgba8::white());
    assert_eq!(pix.get((50, 75)), Rgba8::white());
}

#[test_log::test]
fn markers_are_drawn_over_shapes() {
    let blue = Rgba8::new(0, 0, 255, 255);
    let mut marker = Shape::new(ShapeKind::PointMarker).with_points(vec![Point::new(20.0, 20.0)]);
    marker.stroke_color = Some(blue);
    marker.stroke_width = Some(4.0);
    let mut square = Shape::new(ShapeKind::Simple).closed().with_points(rect(0.0, 0.0, 40.0, 40.0));
    square.fill_color = Some(Rgba8::black());
    let grid = Grid::new(40, 40).with_cell(20.0, 20.0);
    // Marker comes first but is drawn last
    let pix = render(&Diagram::new(grid, vec![marker, square], vec![]));
    // Outer radius 9, inner radius 5
    assert_eq!(pix.get((20, 20)), Rgba8::white());
    assert_eq!(pix.get((27, 20)), blue);
    assert_eq!(pix.get((35, 20)), Rgba8::black());
}

#[test_log::test]
fn wide_stroke() {
    let mut line = Shape::new(ShapeKind::Simple)
        .with_points(vec![Point::new(2.0, 10.0), Point::new(20.0, 10.0)]);
    line.stroke_width = Some(4.0);
    let pix = render(&Diagram::new(Grid::new(24, 20), vec![line], vec![]));
    for y in 8 ..= 11 {
        assert_eq!(pix.get((10, y)), Rgba8::black());
    }
    assert_eq!(pix.get((10, 7)), Rgba8::white());
    assert_eq!(pix.get((10, 12)), Rgba8::white());
    // Butt caps
    assert_eq!(pix.get((1, 10)), Rgba8::white());
    assert_eq!(pix.get((20, 10)), Rgba8::white());
}

#[test_log::test]
fn antialiased_edges_are_blended() {
    let mut shape = Shape::new(ShapeKind::Simple).closed().with_points(rect(2.25, 2.0, 12.0, 12.0));
    shape.fill_color = Some(Rgba8::black());
    let diagram = Diagram::new(Grid::new(16, 16), vec![shape], vec![]);

    let opts = RenderOptions { antialias: true, ..Default::default() };
    let pix = Renderer::new(opts).unwrap().render(&diagram).unwrap();
    assert_eq!(pix.get((7, 7)), Rgba8::black());
    assert_eq!(pix.get((0, 7)), Rgba8::white());
    // Stroke reaches a quarter of the way into column 1
    let edge = pix.get((1, 7));
    assert!(edge.r > 0 && edge.r < 255, "{:?}", edge);
    assert_eq!(edge.r, edge.g);

    // Aliased output only has the two colors
    let pix = render(&diagram);
    for y in 0 .. 16 {
        for x in 0 .. 16 {
            let p = pix.get((x, y));
            assert!(p == Rgba8::black() || p == Rgba8::white());
        }
    }
}

#[test_log::test]
fn rendering_is_deterministic() {
    let mut shapes = vec![];
    for (i, kind) in [ShapeKind::Document, ShapeKind::Io, ShapeKind::Decision,
                      ShapeKind::Trapezoid, ShapeKind::Ellipse].iter().enumerate() {
        let x = 10.0 + 60.0 * i as f64;
        let mut s = Shape::new(*kind).closed().with_points(rect(x, 10.0, x + 40.0, 50.0));
        s.fill_color = Some(Rgba8::new(40 * i as u8, 100, 200, 255));
        shapes.push(s);
    }
    let mut rounded = Shape::new(ShapeKind::Simple).closed().with_points(vec![
        Point::round(10.0, 70.0), Point::round(100.0, 70.0),
        Point::round(100.0, 110.0), Point::round(10.0, 110.0)]);
    rounded.dashed = true;
    shapes.push(rounded);
    let diagram = Diagram::new(Grid::new(320, 120), shapes, vec![]);

    for antialias in vec![false, true] {
        let renderer = Renderer::new(RenderOptions { antialias, ..Default::default() }).unwrap();
        let a = renderer.render(&diagram).unwrap();
        let b = renderer.render(&diagram).unwrap();
        assert_eq!(a.pixeldata(), b.pixeldata());
        assert!(a.pixeldata().chunks(4).all(|p| p[3] == 255));
    }
}
