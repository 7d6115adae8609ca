//! Domain types for representing extracted presentation content.

use serde::{Deserialize, Serialize};

/// Default slide width in EMU (16:9, 13.333 in).
pub const DEFAULT_SLIDE_WIDTH: i64 = 12_192_000;

/// Default slide height in EMU (16:9, 7.5 in).
pub const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// An entire presentation with its extracted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Declared slide size.
    pub slide_size: SlideSize,

    /// Title-page metadata taken from the first slide.
    pub title_page: TitlePageInfo,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a presentation from its parts.
    pub fn new(slide_size: SlideSize, title_page: TitlePageInfo, slides: Vec<Slide>) -> Self {
        Self {
            slide_size,
            title_page,
            slides,
        }
    }

    /// Slides that become content frames (everything after the title slide).
    pub fn content_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter().filter(|s| !s.is_title_slide())
    }
}

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSize {
    pub width: i64,
    pub height: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_SLIDE_WIDTH,
            height: DEFAULT_SLIDE_HEIGHT,
        }
    }
}

/// A single extracted slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number, taken from the `slideN.xml` part name.
    pub number: usize,

    /// Frame title; `"Slide N"` unless a title placeholder was found.
    pub title: String,

    /// Body text, one entry per text shape, in document order.
    pub texts: Vec<String>,

    /// Pictures in document order.
    pub images: Vec<Image>,
}

impl Slide {
    /// Create an empty slide with the default title.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            title: Self::default_title(number),
            texts: Vec::new(),
            images: Vec::new(),
        }
    }

    /// The title used when no title placeholder is present.
    pub fn default_title(number: usize) -> String {
        format!("Slide {}", number)
    }

    /// The first slide is rendered as the title page, not as a frame.
    pub fn is_title_slide(&self) -> bool {
        self.number == 1
    }
}

/// A picture placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Media file name after relationship resolution and normalization.
    pub filename: String,

    /// Absolute placement in EMU.
    pub position: Position,
}

/// Absolute placement of a shape in EMU.
///
/// Offsets may be negative when a picture hangs off the slide edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Placement expressed as fractions of the slide size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativePosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Metadata for the Beamer title page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageInfo {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub institute: String,
    pub date: String,
}

/// A slide together with the reason its content had to be defaulted, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSlide {
    pub slide: Slide,
    pub diagnostic: Option<String>,
}

impl ParsedSlide {
    /// A slide that parsed cleanly.
    pub fn ok(slide: Slide) -> Self {
        Self {
            slide,
            diagnostic: None,
        }
    }

    /// A defaulted slide record carrying the parse failure.
    pub fn degraded(number: usize, diagnostic: impl Into<String>) -> Self {
        Self {
            slide: Slide::new(number),
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// A recoverable problem found while extracting one part of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Archive-internal path of the part that caused the problem.
    pub part: String,
    pub message: String,
}

/// The result of reading a presentation: the model plus everything that
/// had to be defaulted along the way.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub presentation: Presentation,
    pub diagnostics: Vec<Diagnostic>,
}
