//! Title-page metadata from the first slide.
//!
//! Title and subtitle come from their placeholder types. Author, institute
//! and date have no placeholder type of their own; title slides carry them
//! as plain `body` placeholders, so they are assigned by encounter order.

use crate::shapes::{Placeholder, SlideShapes};
use beamer_core::TitlePageInfo;

/// Which title-page field the next `body` placeholder fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySlot {
    Author,
    Institute,
    Date,
    /// All three slots are taken; further body text is ignored.
    Full,
}

impl BodySlot {
    /// Slot for the `index`-th (0-based) body placeholder.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Self::Author,
            1 => Self::Institute,
            2 => Self::Date,
            _ => Self::Full,
        }
    }
}

/// Accumulates title-page fields while walking the first slide's shapes.
#[derive(Debug, Default)]
pub struct TitlePageBuilder {
    info: TitlePageInfo,
    body_index: usize,
}

impl TitlePageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot the next body placeholder will fill.
    pub fn next_slot(&self) -> BodySlot {
        BodySlot::for_index(self.body_index)
    }

    /// Feed one shape. Shapes without a placeholder never contribute.
    pub fn accept(&mut self, placeholder: Option<&Placeholder>, text: &str) {
        let Some(placeholder) = placeholder else {
            return;
        };
        if text.is_empty() {
            return;
        }

        match placeholder {
            Placeholder::Title | Placeholder::CenteredTitle => {
                set_if_empty(&mut self.info.title, text);
            }
            Placeholder::Subtitle => set_if_empty(&mut self.info.subtitle, text),
            Placeholder::Body => {
                match self.next_slot() {
                    BodySlot::Author => self.info.author = text.to_string(),
                    BodySlot::Institute => self.info.institute = text.to_string(),
                    BodySlot::Date => self.info.date = text.to_string(),
                    BodySlot::Full => {
                        log::debug!("Ignoring extra title-page body text: {}", text);
                        return;
                    }
                }
                self.body_index += 1;
            }
            Placeholder::Other(_) | Placeholder::Untyped => {}
        }
    }

    pub fn finish(self) -> TitlePageInfo {
        self.info
    }
}

fn set_if_empty(field: &mut String, text: &str) {
    if field.is_empty() {
        *field = text.to_string();
    }
}

/// Derive title-page metadata from the first slide's shapes.
pub fn extract_title_page(shapes: &SlideShapes) -> TitlePageInfo {
    let mut builder = TitlePageBuilder::new();
    for shape in &shapes.shapes {
        builder.accept(shape.placeholder.as_ref(), &shape.text);
    }
    builder.finish()
}
