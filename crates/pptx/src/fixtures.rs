//! In-memory PPTX archives for tests.

use crate::archive::PptxArchive;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a zip container entry by entry.
#[derive(Default)]
pub struct PptxBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl PptxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(self, name: &str, content: impl AsRef<str>) -> Self {
        self.binary(name, content.as_ref().as_bytes())
    }

    pub fn binary(mut self, name: &str, content: &[u8]) -> Self {
        self.entries.push((name.to_string(), content.to_vec()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in &self.entries {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn build(&self) -> PptxArchive {
        PptxArchive::from_reader(Cursor::new(self.to_bytes())).unwrap()
    }
}

/// Wrap shape markup in a `p:sld` document with the usual namespaces.
pub fn slide_xml(shapes: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        shapes.concat()
    )
}

/// A text shape. `placeholder` is the `p:ph` type; `None` omits `p:ph`.
pub fn sp(placeholder: Option<&str>, runs: &[&str]) -> String {
    let ph = placeholder
        .map(|t| format!(r#"<p:ph type="{}"/>"#, t))
        .unwrap_or_default();
    let runs: String = runs
        .iter()
        .map(|r| format!(r#"<a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r>"#, r))
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Shape"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="838200" y="365125"/><a:ext cx="10515600" cy="1325563"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p>{}</a:p></p:txBody></p:sp>"#,
        ph, runs
    )
}

/// A picture referencing `embed`, placed at the given EMU rectangle.
pub fn pic(embed: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        embed, x, y, cx, cy
    )
}

/// A picture with no `a:xfrm` at all.
pub fn pic_without_xfrm(embed: &str) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="5" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="{}"/></p:blipFill><p:spPr/></p:pic>"#,
        embed
    )
}

/// A `.rels` part with image relationships.
pub fn rels_xml(relationships: &[(&str, &str)]) -> String {
    let body: String = relationships
        .iter()
        .map(|(id, target)| {
            format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{}"/>"#,
                id, target
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        body
    )
}

/// `ppt/presentation.xml` declaring a slide size.
pub fn presentation_xml(cx: i64, cy: i64) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
        cx, cy
    )
}
