use diagram_raster::{Diagram, Font, FontSource, Grid, Label, RenderError};
use diagram_raster::{Pixel, RenderOptions, Renderer, Rgba8, Source};
use diagram_raster::{draw_text, Pixfmt, RenderingBase};

use std::path::PathBuf;

mod assets;

fn font_options() -> RenderOptions {
    RenderOptions { font: Some(FontSource::File(assets::test_font())), ..Default::default() }
}

/// Inked pixel count and bounding box (x0, y0, x1, y1)
fn ink(pix: &Pixfmt<Rgba8>) -> (usize, Option<(usize, usize, usize, usize)>) {
    let mut n = 0;
    let mut bbox : Option<(usize, usize, usize, usize)> = None;
    for y in 0 .. pix.height() {
        for x in 0 .. pix.width() {
            if pix.get((x, y)) != Rgba8::white() {
                n += 1;
                bbox = Some(match bbox {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    (n, bbox)
}

#[test_log::test]
fn label_is_drawn_at_the_baseline() {
    let diagram = Diagram::new(Grid::new(40, 40), vec![],
                               vec![Label::new("A", 12.0, 5.0, 20.0)]);
    let pix = Renderer::new(font_options()).unwrap().render(&diagram).unwrap();
    let (inked, bbox) = ink(&pix);
    assert!(inked > 10, "{}", inked);
    let (x0, y0, x1, y1) = bbox.unwrap();
    assert!(x0 >= 4 && x1 < 16, "{:?}", bbox);
    // Capital sits on the baseline
    assert!(y0 >= 9 && y0 <= 12 && y1 >= 18 && y1 <= 20, "{:?}", bbox);
}

#[test_log::test]
fn label_near_the_top_is_clipped() {
    let diagram = Diagram::new(Grid::new(20, 20), vec![],
                               vec![Label::new("A", 12.0, 5.0, 5.0)]);
    let pix = Renderer::new(font_options()).unwrap().render(&diagram).unwrap();
    let (inked, bbox) = ink(&pix);
    assert!(inked > 10, "{}", inked);
    let (x0, y0, x1, y1) = bbox.unwrap();
    assert!(x0 >= 4 && x1 <= 14, "{:?}", bbox);
    assert_eq!(y0, 0);
    assert!(y1 >= 3 && y1 <= 5, "{:?}", bbox);
}

#[test_log::test]
fn outlined_label() {
    let red = Rgba8::new(255, 0, 0, 255);
    let mut label = Label::new("H", 16.0, 5.0, 25.0);
    label.outline = true;
    label.outline_color = Some(red);
    let diagram = Diagram::new(Grid::new(40, 40), vec![], vec![label]);
    let pix = Renderer::new(font_options()).unwrap().render(&diagram).unwrap();
    let mut reddish = 0;
    let mut dark = 0;
    for y in 0 .. 40 {
        for x in 0 .. 40 {
            let p = pix.get((x, y));
            if p.r > 200 && p.g < 100 && p.b < 100 {
                reddish += 1;
            }
            if p.r < 60 && p.g < 60 && p.b < 60 {
                dark += 1;
            }
        }
    }
    assert!(reddish > 0);
    assert!(dark > 0);
}

#[test_log::test]
fn text_is_clipped_to_the_image() {
    let font = Font::load(&FontSource::File(assets::test_font())).unwrap();
    let mut ren_base = RenderingBase::new(Pixfmt::<Rgba8>::new(8, 8));
    ren_base.clear(Rgba8::white());
    draw_text(&mut ren_base, &font, "Wide text off the edges", 30.0,
              Rgba8::black(), -10.0, 12.0).unwrap();
    draw_text(&mut ren_base, &font, "", 30.0, Rgba8::black(), 0.0, 0.0).unwrap();
    let (inked, _) = ink(&ren_base.pixf);
    assert!(inked > 0);
}

#[test_log::test]
fn labels_need_a_font() {
    let diagram = Diagram::new(Grid::new(10, 10), vec![],
                               vec![Label::new("A", 12.0, 5.0, 5.0)]);
    let err = Renderer::new(RenderOptions::default()).unwrap().render(&diagram);
    assert!(matches!(err, Err(RenderError::NoFont(1))));
}

#[test_log::test]
fn missing_font_file() {
    let path = PathBuf::from("/nonexistent/font.ttf");
    let opts = RenderOptions { font: Some(FontSource::File(path.clone())), ..Default::default() };
    match Renderer::new(opts) {
        Err(RenderError::Font { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}
