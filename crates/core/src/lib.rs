//! Core slide model, layout mapping, and Beamer emission for converting
//! PowerPoint decks into LaTeX.

pub mod beamer;
pub mod error;
pub mod geometry;
pub mod latex;
pub mod media;
pub mod types;

pub use beamer::{BeamerEmitter, BeamerTemplate, SharedPreamble};
pub use error::{Error, Result};
pub use geometry::{is_full_slide_background, BackgroundPolicy};
pub use latex::{escape_latex, sanitize_command_name};
pub use media::{normalize_media_name, ImageDisposition, ImagePolicy};
pub use types::{
    Diagnostic, Extraction, Image, ParsedSlide, Position, Presentation, RelativePosition, Slide,
    SlideSize, TitlePageInfo,
};
