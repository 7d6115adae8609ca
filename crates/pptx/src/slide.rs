//! Slide content: title, body text, and resolved pictures.

use crate::relationships::RelationshipTable;
use crate::shapes::{scan_slide, Placeholder, SlideShapes};
use beamer_core::media::{file_name_of, normalize_media_name};
use beamer_core::{Image, ParsedSlide, Slide};

/// Parse one slide part. A slide that cannot be read is returned with
/// default content and the reason as its diagnostic.
pub fn parse_slide(number: usize, xml: &str, rels: &RelationshipTable) -> ParsedSlide {
    match scan_slide(xml) {
        Ok(shapes) => ParsedSlide::ok(build_slide(number, &shapes, rels)),
        Err(e) => ParsedSlide::degraded(number, e.to_string()),
    }
}

/// Turn scanned shapes into a slide record.
///
/// The first title placeholder names the slide; subtitles belong to the
/// title page only; every other text shape becomes a body item.
pub fn build_slide(number: usize, shapes: &SlideShapes, rels: &RelationshipTable) -> Slide {
    let mut slide = Slide::new(number);
    let mut has_title = false;

    for shape in &shapes.shapes {
        match &shape.placeholder {
            Some(ph) if ph.is_title() => {
                if !has_title {
                    slide.title = shape.text.clone();
                    has_title = true;
                }
            }
            Some(Placeholder::Subtitle) => {}
            _ => slide.texts.push(shape.text.clone()),
        }
    }

    for picture in &shapes.pictures {
        let Some(embed) = picture.embed.as_deref() else {
            log::debug!("Slide {}: picture without image reference", number);
            continue;
        };
        let Some(target) = rels.resolve(embed) else {
            log::debug!("Slide {}: unresolved image reference {}", number, embed);
            continue;
        };

        slide.images.push(Image {
            filename: normalize_media_name(file_name_of(target)),
            position: picture.position,
        });
    }

    slide
}
