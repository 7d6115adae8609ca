//! PPTX (Office Open XML) content extraction for Beamer conversion.
//!
//! A .pptx file is a ZIP archive of XML parts. This crate unpacks it,
//! resolves each slide's relationships, and reads titles, body text,
//! pictures, and title-page metadata into the `beamer-core` model.

pub mod archive;
pub mod parser;
pub mod presentation;
pub mod relationships;
pub mod shapes;
pub mod slide;
pub mod title_page;
mod xml;

#[cfg(test)]
mod fixtures;

pub use archive::{PptxArchive, SlidePart};
pub use parser::PptxParser;
pub use relationships::RelationshipTable;
pub use title_page::{BodySlot, TitlePageBuilder};
