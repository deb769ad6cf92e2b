//! Errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure to set up or run a render
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unable to load font {}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: freetype::Error,
    },
    #[error("No system font found for family {0:?}")]
    FontNotFound(String),
    #[error("Diagram has {0} labels but no font was configured")]
    NoFont(usize),
    #[error("FreeType error")]
    FreeType(#[from] freetype::Error),
}

/// Failure to decode a diagram description
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unable to read diagram")]
    Io(#[from] std::io::Error),
    #[error("Malformed XML")]
    Xml(#[from] roxmltree::Error),
    #[error("Missing element <{0}>")]
    MissingElement(&'static str),
    #[error("Invalid value {value:?} in <{element}>")]
    InvalidValue {
        element: String,
        value: String,
    },
}

/// Failure of a single file in a batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Unable to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("Unable to render")]
    Render(#[from] RenderError),
    #[error("Unable to write {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
