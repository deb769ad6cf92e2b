//! Text Rendering
//!
//! Glyphs are rendered by FreeType into 8-bit coverage bitmaps and
//! blended onto the image in the text color.

use crate::base::RenderingBase;
use crate::color::Rgba8;
use crate::error::RenderError;
use crate::model::Label;
use crate::Pixel;

use freetype::{Face, Library};
use freetype::face::LoadFlag;

use std::path::PathBuf;

/// Where to find a Font
#[derive(Debug,Clone,PartialEq)]
pub enum FontSource {
    /// Font file, any format FreeType reads
    File(PathBuf),
    /// Family name of an installed system font
    System(String),
}

/// Loaded Font
///
/// Not `Send`; each thread loads its own
pub struct Font {
    face: Face,
    // Must be dropped after the face
    _lib: Library,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.face.family_name())
            .finish()
    }
}

impl Font {
    /// Load a Font
    pub fn load(source: &FontSource) -> Result<Self, RenderError> {
        let lib = Library::init()?;
        let face = match source {
            FontSource::File(path) => {
                log::debug!("loading font {}", path.display());
                lib.new_face(path.as_os_str(), 0)
                    .map_err(|source| RenderError::Font { path: path.clone(), source })?
            },
            FontSource::System(family) => {
                let property = font_loader::system_fonts::FontPropertyBuilder::new()
                    .family(family)
                    .build();
                let (bytes, index) = font_loader::system_fonts::get(&property)
                    .ok_or_else(|| RenderError::FontNotFound(family.clone()))?;
                log::debug!("loading system font {:?} ({} bytes)", family, bytes.len());
                lib.new_memory_face(bytes, index as isize)?
            }
        };
        Ok(Self { face, _lib: lib })
    }
    /// FreeType face
    pub fn face(&self) -> &Face {
        &self.face
    }
}

/// Draw `text` with its baseline starting at (`x`,`y`)
///
/// `size` is in pixels. Glyphs missing from the font are skipped;
///   pixels outside the image are ignored.
pub fn draw_text<T>(ren: &mut RenderingBase<T>, font: &Font, text: &str,
                    size: f64, color: Rgba8, x: f64, y: f64)
                    -> Result<(), RenderError>
    where T: Pixel
{
    let face = font.face();
    face.set_char_size((size * 64.0).round() as isize, 0, 72, 0)?;
    let mut pen_x = x.round() as i64;
    let pen_y = y.round() as i64;
    for c in text.chars() {
        if let Err(err) = face.load_char(c as usize, LoadFlag::RENDER) {
            log::trace!("no glyph for {:?}: {}", c, err);
            continue;
        }
        let glyph = face.glyph();
        let bitmap = glyph.bitmap();
        let (w, rows) = (bitmap.width() as usize, bitmap.rows() as usize);
        let pitch = bitmap.pitch();
        let stride = pitch.unsigned_abs() as usize;
        let x0 = pen_x + i64::from(glyph.bitmap_left());
        let y0 = pen_y - i64::from(glyph.bitmap_top());
        if w > 0 {
            let buf = bitmap.buffer();
            for r in 0 .. rows {
                // Negative pitch: rows are stored bottom-up
                let start = if pitch < 0 { (rows - 1 - r) * stride } else { r * stride };
                if start + w > buf.len() {
                    break;
                }
                let covers : Vec<u64> = buf[start .. start + w].iter()
                    .map(|&v| u64::from(v))
                    .collect();
                ren.blend_solid_hspan(x0, y0 + r as i64, w as i64, color, &covers);
            }
        }
        pen_x += (glyph.advance().x as i64) >> 6;
    }
    Ok(())
}

/// Draw a Label, with an outline first if requested
pub fn draw_label<T>(ren: &mut RenderingBase<T>, font: &Font, label: &Label)
                     -> Result<(), RenderError>
    where T: Pixel
{
    if label.has_outline() {
        let outline = label.outline_color.unwrap_or_else(Rgba8::white);
        for (dx, dy) in &[(0.0, -1.0), (0.0, 1.0), (-1.0, 0.0), (1.0, 0.0)] {
            draw_text(ren, font, &label.text, label.font_size, outline,
                      label.x + dx, label.y + dy)?;
        }
    }
    draw_text(ren, font, &label.text, label.font_size, label.color, label.x, label.y)
}
