use diagram_raster::{Diagram, Grid, Point, Shape, ShapeKind};
use diagram_raster::{FillingRule, Path, Pixfmt, RasterizerScanline, RenderOptions, Renderer};
use diagram_raster::{render_scanlines, RenderingBase, RenderingScanlineBinSolid, Rgba8, Source};

/// Five pointed star drawn in one stroke, center (50,50), radius 40
fn pentagram() -> Vec<(f64, f64)> {
    (0 .. 5).map(|i| {
        let a = (-90.0 + 144.0 * i as f64).to_radians();
        (50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin())
    }).collect()
}

#[test_log::test]
fn diagram_fill_is_nonzero() {
    let mut star = Shape::new(ShapeKind::Simple).closed()
        .with_points(pentagram().into_iter().map(|(x, y)| Point::new(x, y)).collect());
    star.fill_color = Some(Rgba8::black());
    let diagram = Diagram::new(Grid::new(100, 100), vec![star], vec![]);
    let pix = Renderer::new(RenderOptions::default()).unwrap().render(&diagram).unwrap();
    // Center is wound twice
    assert_eq!(pix.get((50, 50)), Rgba8::black());
    // Top point
    assert_eq!(pix.get((50, 20)), Rgba8::black());
    assert_eq!(pix.get((5, 5)), Rgba8::white());
}

#[test_log::test]
fn even_odd_leaves_the_center_empty() {
    let mut path = Path::new();
    for (i, (x, y)) in pentagram().into_iter().enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close_polygon();

    let mut ren_base = RenderingBase::new(Pixfmt::<Rgba8>::new(100, 100));
    ren_base.clear(Rgba8::white());
    let mut ras = RasterizerScanline::new();
    ras.clip_box(0.0, 0.0, 100.0, 100.0);
    ras.set_filling_rule(FillingRule::EvenOdd);
    ras.add_path(&path);
    let mut ren = RenderingScanlineBinSolid::with_base(&mut ren_base);
    render_scanlines(&mut ras, &mut ren);

    assert_eq!(ren_base.pixf.get((50, 50)), Rgba8::white());
    assert_eq!(ren_base.pixf.get((50, 20)), Rgba8::black());
}
