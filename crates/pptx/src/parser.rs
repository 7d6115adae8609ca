//! PPTX extraction driver.

use crate::archive::{PptxArchive, SlidePart};
use crate::presentation::{parse_slide_size, PRESENTATION_PART};
use crate::relationships::RelationshipTable;
use crate::shapes::scan_slide;
use crate::slide::parse_slide;
use crate::title_page::extract_title_page;
use beamer_core::{
    Diagnostic, Extraction, ParsedSlide, Presentation, Result, SlideSize, TitlePageInfo,
};

/// Reads slide content, title-page metadata, and slide size from an
/// unpacked PPTX archive.
///
/// Problems confined to one part (a broken slide, an unreadable `.rels`,
/// a bad slide size) are recorded as diagnostics and defaulted; only
/// failures to list the archive itself are returned as errors.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Extract everything the Beamer emitter needs.
    pub fn parse(&self, archive: &PptxArchive) -> Result<Extraction> {
        let mut diagnostics = Vec::new();

        let slide_size = self.read_slide_size(archive, &mut diagnostics);

        let parts = archive.slide_parts()?;
        log::info!("Found {} slides", parts.len());

        let mut slides = Vec::with_capacity(parts.len());
        for part in &parts {
            let parsed = self.parse_slide_part(archive, part, &mut diagnostics);
            if let Some(message) = parsed.diagnostic {
                log::warn!("Slide {} could not be parsed: {}", part.number, message);
                diagnostics.push(Diagnostic {
                    part: part.path.clone(),
                    message,
                });
            }
            slides.push(parsed.slide);
        }

        let title_page = self.read_title_page(archive, &parts, &mut diagnostics);

        Ok(Extraction {
            presentation: Presentation::new(slide_size, title_page, slides),
            diagnostics,
        })
    }

    fn read_slide_size(&self, archive: &PptxArchive, diagnostics: &mut Vec<Diagnostic>) -> SlideSize {
        let parsed = archive
            .read_part(PRESENTATION_PART)
            .and_then(|xml| xml.map(|xml| parse_slide_size(&xml)).transpose());

        match parsed {
            Ok(Some(size)) => size,
            Ok(None) => {
                log::debug!("No {}, using default slide size", PRESENTATION_PART);
                SlideSize::default()
            }
            Err(e) => {
                log::warn!("Could not read slide size, using default: {}", e);
                diagnostics.push(Diagnostic {
                    part: PRESENTATION_PART.to_string(),
                    message: e.to_string(),
                });
                SlideSize::default()
            }
        }
    }

    /// Parse one slide part; any failure yields a defaulted slide.
    fn parse_slide_part(
        &self,
        archive: &PptxArchive,
        part: &SlidePart,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ParsedSlide {
        let rels = match RelationshipTable::load(archive, &part.path) {
            Ok(rels) => rels,
            Err(e) => {
                log::warn!("Ignoring relationships of {}: {}", part.path, e);
                diagnostics.push(Diagnostic {
                    part: part.path.clone(),
                    message: format!("relationships: {}", e),
                });
                RelationshipTable::new()
            }
        };

        match archive.read_part(&part.path) {
            Ok(Some(xml)) => parse_slide(part.number, &xml, &rels),
            Ok(None) => ParsedSlide::degraded(part.number, "slide part disappeared"),
            Err(e) => ParsedSlide::degraded(part.number, e.to_string()),
        }
    }

    /// Title-page fields come from the same part that supplies slide 1.
    fn read_title_page(
        &self,
        archive: &PptxArchive,
        parts: &[SlidePart],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TitlePageInfo {
        let Some(first) = parts.iter().find(|p| p.number == 1) else {
            log::debug!("No first slide, title page left empty");
            return TitlePageInfo::default();
        };
        let part = first.path.clone();
        let shapes = archive
            .read_part(&part)
            .and_then(|xml| xml.map(|xml| scan_slide(&xml)).transpose());

        match shapes {
            Ok(Some(shapes)) => extract_title_page(&shapes),
            Ok(None) => {
                log::debug!("No first slide, title page left empty");
                TitlePageInfo::default()
            }
            Err(e) => {
                log::warn!("Could not read title page from {}: {}", part, e);
                diagnostics.push(Diagnostic {
                    part,
                    message: format!("title page: {}", e),
                });
                TitlePageInfo::default()
            }
        }
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{pic, presentation_xml, rels_xml, slide_xml, sp, PptxBuilder};

    fn three_slide_deck() -> PptxBuilder {
        PptxBuilder::new()
            .file("ppt/presentation.xml", presentation_xml(12_192_000, 6_858_000))
            .file(
                "ppt/slides/slide1.xml",
                slide_xml(&[
                    sp(Some("ctrTitle"), &["Intro"]),
                    sp(Some("subTitle"), &["Sub"]),
                    sp(Some("body"), &["Dr. X"]),
                    sp(Some("body"), &["Dept. Y"]),
                ]),
            )
            .file(
                "ppt/slides/slide2.xml",
                slide_xml(&[
                    sp(Some("title"), &["Methods"]),
                    sp(Some("body"), &["Point A"]),
                    pic("rId2", 609_600, 342_900, 10_972_800, 6_172_200),
                ]),
            )
            .file(
                "ppt/slides/_rels/slide2.xml.rels",
                rels_xml(&[("rId2", "../media/image1.png")]),
            )
            .file(
                "ppt/slides/slide3.xml",
                slide_xml(&[pic("rId2", 0, 0, 6_096_000, 3_429_000)]),
            )
            .file(
                "ppt/slides/_rels/slide3.xml.rels",
                rels_xml(&[("rId2", "../media/image2.tiff")]),
            )
            .binary("ppt/media/image1.png", &[0x89, b'P', b'N', b'G'])
            .binary("ppt/media/image2.tiff", &[b'I', b'I', 42, 0])
    }

    #[test]
    fn test_parse_three_slide_deck() {
        let archive = three_slide_deck().build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        let presentation = extraction.presentation;

        assert!(extraction.diagnostics.is_empty());
        assert_eq!(presentation.slides.len(), 3);
        assert_eq!(presentation.title_page.title, "Intro");
        assert_eq!(presentation.title_page.subtitle, "Sub");
        assert_eq!(presentation.title_page.author, "Dr. X");
        assert_eq!(presentation.title_page.institute, "Dept. Y");
        assert_eq!(presentation.title_page.date, "");

        let methods = &presentation.slides[1];
        assert_eq!(methods.title, "Methods");
        assert_eq!(methods.texts, vec!["Point A"]);
        assert_eq!(methods.images.len(), 1);
        assert_eq!(methods.images[0].filename, "image1.png");

        let third = &presentation.slides[2];
        assert_eq!(third.title, "Slide 3");
        assert!(third.texts.is_empty());
        assert_eq!(third.images[0].filename, "image2.tiff");
    }

    #[test]
    fn test_archive_without_slides() {
        let archive = PptxBuilder::new()
            .file("[Content_Types].xml", "<Types/>")
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        assert!(extraction.presentation.slides.is_empty());
        assert_eq!(extraction.presentation.title_page, TitlePageInfo::default());
        assert_eq!(extraction.presentation.slide_size, SlideSize::default());
    }

    #[test]
    fn test_broken_slide_is_isolated() {
        let archive = three_slide_deck()
            .file("ppt/slides/slide4.xml", "<p:sld><p:cSld><p:spTree></p:sld>")
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        let slides = &extraction.presentation.slides;

        assert_eq!(slides.len(), 4);
        assert_eq!(slides[3].title, "Slide 4");
        assert!(slides[3].texts.is_empty());
        assert_eq!(slides[1].title, "Methods");
        assert_eq!(extraction.diagnostics.len(), 1);
        assert_eq!(extraction.diagnostics[0].part, "ppt/slides/slide4.xml");
    }

    #[test]
    fn test_broken_first_slide_reports_title_page() {
        let archive = PptxBuilder::new()
            .file("ppt/slides/slide1.xml", "<p:sld><p:cSld><p:spTree></p:sld>")
            .file("ppt/slides/slide2.xml", slide_xml(&[sp(Some("title"), &["Next"])]))
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();

        assert_eq!(extraction.presentation.title_page, TitlePageInfo::default());
        assert_eq!(extraction.presentation.slides[1].title, "Next");
        assert_eq!(extraction.diagnostics.len(), 2);
        assert!(extraction
            .diagnostics
            .iter()
            .all(|d| d.part == "ppt/slides/slide1.xml"));
        assert!(!extraction.diagnostics[0].message.starts_with("title page:"));
        assert!(extraction.diagnostics[1].message.starts_with("title page:"));
    }

    #[test]
    fn test_title_page_uses_kept_duplicate() {
        let archive = PptxBuilder::new()
            .file(
                "ppt/slides/slide01.xml",
                slide_xml(&[sp(Some("ctrTitle"), &["Kept"]), sp(Some("body"), &["Ann"])]),
            )
            .file(
                "ppt/slides/slide1.xml",
                slide_xml(&[sp(Some("ctrTitle"), &["Dropped"])]),
            )
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        let presentation = extraction.presentation;

        assert_eq!(presentation.slides.len(), 1);
        assert_eq!(presentation.slides[0].title, "Kept");
        assert_eq!(presentation.title_page.title, "Kept");
        assert_eq!(presentation.title_page.author, "Ann");
    }

    #[test]
    fn test_invalid_utf8_slide_is_degraded() {
        let archive = three_slide_deck()
            .binary("ppt/slides/slide4.xml", b"<p:sld>\xc3\x28</p:sld>")
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        let slides = &extraction.presentation.slides;

        assert_eq!(slides.len(), 4);
        assert_eq!(slides[3].title, "Slide 4");
        assert_eq!(extraction.diagnostics.len(), 1);
        assert!(extraction.diagnostics[0].message.contains("UTF-8"));
    }

    #[test]
    fn test_broken_rels_drop_only_images() {
        let archive = PptxBuilder::new()
            .file(
                "ppt/slides/slide2.xml",
                slide_xml(&[sp(Some("title"), &["Kept"]), pic("rId1", 0, 0, 10, 10)]),
            )
            .file("ppt/slides/_rels/slide2.xml.rels", "<Relationships></Oops>")
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        let slide = &extraction.presentation.slides[0];
        assert_eq!(slide.title, "Kept");
        assert!(slide.images.is_empty());
        assert_eq!(extraction.diagnostics.len(), 1);
    }

    #[test]
    fn test_bad_presentation_part_uses_default_size() {
        let archive = PptxBuilder::new()
            .file("ppt/presentation.xml", "<p:presentation><p:x></p:y>")
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        assert_eq!(extraction.presentation.slide_size, SlideSize::default());
        assert_eq!(extraction.diagnostics[0].part, PRESENTATION_PART);
    }

    #[test]
    fn test_custom_slide_size() {
        let archive = PptxBuilder::new()
            .file("ppt/presentation.xml", presentation_xml(9_144_000, 6_858_000))
            .build();
        let extraction = PptxParser::new().parse(&archive).unwrap();
        assert_eq!(extraction.presentation.slide_size.width, 9_144_000);
    }
}
