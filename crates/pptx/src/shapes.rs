//! Shape and picture scanning for slide XML.
//!
//! A single streaming pass over `p:sld` collects two flat lists in document
//! order: text shapes (`p:sp`, including those nested in group shapes) with
//! their placeholder role, and pictures (`p:pic`) with their image reference
//! and transform. Interpreting those lists is left to the slide and
//! title-page readers.

use crate::xml::{attr_value, int_attr, local_name};
use beamer_core::{Error, Position, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Placeholder role of a shape (`p:nvPr/p:ph/@type`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Title,
    CenteredTitle,
    Subtitle,
    Body,
    /// Any other type value (`dt`, `ftr`, `sldNum`, `obj`, ...).
    Other(String),
    /// A `p:ph` element without a `type` attribute.
    Untyped,
}

impl Placeholder {
    fn from_type(value: Option<&str>) -> Self {
        match value {
            None => Self::Untyped,
            Some("title") => Self::Title,
            Some("ctrTitle") => Self::CenteredTitle,
            Some("subTitle") | Some("subtitle") => Self::Subtitle,
            Some("body") => Self::Body,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// `title` or `ctrTitle`.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenteredTitle)
    }
}

/// A text-bearing shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeText {
    /// `None` when the shape has no `p:ph` element at all.
    pub placeholder: Option<Placeholder>,
    /// All run text of the shape joined in order, trimmed. Never empty.
    pub text: String,
}

/// A picture element before relationship resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureRef {
    /// `r:embed` of the picture's blip, if any.
    pub embed: Option<String>,
    /// Transform from `a:xfrm`; all zero when absent.
    pub position: Position,
}

/// Everything scanned from one slide part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideShapes {
    pub shapes: Vec<ShapeText>,
    pub pictures: Vec<PictureRef>,
}

#[derive(Debug, Default)]
struct ShapeState {
    depth: usize,
    placeholder: Option<Placeholder>,
    text: String,
}

#[derive(Debug, Default)]
struct PictureState {
    depth: usize,
    /// First `blipFill/blip` found: `Some(embed)`.
    fill_blip: Option<Option<String>>,
    /// First `blip` anywhere in the picture.
    any_blip: Option<Option<String>>,
    xfrm_seen: bool,
    /// Depth of the open `xfrm` element, while inside it.
    xfrm_depth: Option<usize>,
    off_seen: bool,
    ext_seen: bool,
    position: Position,
}

impl PictureState {
    fn finish(self) -> PictureRef {
        PictureRef {
            embed: self.fill_blip.or(self.any_blip).flatten(),
            position: self.position,
        }
    }
}

/// Streaming scanner state.
#[derive(Default)]
struct Scanner {
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    shape: Option<ShapeState>,
    picture: Option<PictureState>,
    result: SlideShapes,
}

impl Scanner {
    fn parent(&self) -> Option<&[u8]> {
        self.stack.last().map(Vec::as_slice)
    }

    /// Handle an element opening. `is_empty` marks self-closing elements,
    /// which never get a matching end event.
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) -> Result<()> {
        let name = e.name();
        let local = local_name(name.as_ref());
        let depth = self.stack.len();

        match local {
            b"sp" if !is_empty && self.shape.is_none() => {
                self.shape = Some(ShapeState {
                    depth,
                    ..ShapeState::default()
                });
            }
            b"pic" if !is_empty && self.picture.is_none() => {
                self.picture = Some(PictureState {
                    depth,
                    ..PictureState::default()
                });
            }
            b"ph" if self.parent() == Some(b"nvPr".as_slice()) => {
                if let Some(shape) = self.shape.as_mut() {
                    if shape.placeholder.is_none() {
                        let kind = attr_value(e, b"type");
                        shape.placeholder = Some(Placeholder::from_type(kind.as_deref()));
                    }
                }
            }
            b"blip" => {
                let in_fill = self.parent() == Some(b"blipFill".as_slice());
                if let Some(picture) = self.picture.as_mut() {
                    let embed = attr_value(e, b"embed");
                    if in_fill && picture.fill_blip.is_none() {
                        picture.fill_blip = Some(embed.clone());
                    }
                    if picture.any_blip.is_none() {
                        picture.any_blip = Some(embed);
                    }
                }
            }
            b"xfrm" => {
                if let Some(picture) = self.picture.as_mut() {
                    if !picture.xfrm_seen {
                        picture.xfrm_seen = true;
                        if !is_empty {
                            picture.xfrm_depth = Some(depth);
                        }
                    }
                }
            }
            b"off" => {
                if let Some(picture) = self.picture.as_mut() {
                    if picture.xfrm_depth.is_some() && !picture.off_seen {
                        picture.off_seen = true;
                        picture.position.x = int_attr(e, b"x")?.unwrap_or(0);
                        picture.position.y = int_attr(e, b"y")?.unwrap_or(0);
                    }
                }
            }
            b"ext" => {
                if let Some(picture) = self.picture.as_mut() {
                    if picture.xfrm_depth.is_some() && !picture.ext_seen {
                        picture.ext_seen = true;
                        picture.position.width = int_attr(e, b"cx")?.unwrap_or(0);
                        picture.position.height = int_attr(e, b"cy")?.unwrap_or(0);
                    }
                }
            }
            _ => {}
        }

        if !is_empty {
            self.stack.push(local.to_vec());
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> Result<()> {
        let local = local_name(name);
        match self.stack.pop() {
            Some(open) if open == local => {}
            Some(open) => {
                return Err(Error::XmlError(format!(
                    "Mismatched end tag: expected </{}>, found </{}>",
                    String::from_utf8_lossy(&open),
                    String::from_utf8_lossy(local)
                )));
            }
            None => {
                return Err(Error::XmlError(format!(
                    "Unexpected end tag </{}>",
                    String::from_utf8_lossy(local)
                )));
            }
        }
        let depth = self.stack.len();

        if self.shape.as_ref().is_some_and(|s| s.depth == depth) && local == b"sp" {
            if let Some(shape) = self.shape.take() {
                let text = shape.text.trim();
                if !text.is_empty() {
                    self.result.shapes.push(ShapeText {
                        placeholder: shape.placeholder,
                        text: text.to_string(),
                    });
                }
            }
        }

        if let Some(picture) = self.picture.as_mut() {
            if picture.xfrm_depth == Some(depth) && local == b"xfrm" {
                picture.xfrm_depth = None;
            }
        }

        if self.picture.as_ref().is_some_and(|p| p.depth == depth) && local == b"pic" {
            if let Some(picture) = self.picture.take() {
                self.result.pictures.push(picture.finish());
            }
        }

        Ok(())
    }

    /// Run text belongs to a shape only inside an `a:t` element.
    fn text(&mut self, text: &str) {
        if self.parent() != Some(b"t".as_slice()) {
            return;
        }
        if let Some(shape) = self.shape.as_mut() {
            shape.text.push_str(text);
        }
    }
}

/// Scan a slide part for text shapes and pictures.
///
/// Any XML error, a truncated document, or a non-integer coordinate fails
/// the whole slide; callers decide how to degrade.
pub fn scan_slide(xml: &str) -> Result<SlideShapes> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside runs is significant.
    reader.trim_text(false);

    let mut scanner = Scanner::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => scanner.open(e, false)?,
            Ok(Event::Empty(ref e)) => scanner.open(e, true)?,
            Ok(Event::End(ref e)) => scanner.close(e.name().as_ref())?,
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| {
                    Error::XmlError(format!(
                        "Bad text at position {}: {}",
                        reader.buffer_position(),
                        err
                    ))
                })?;
                scanner.text(&text);
            }
            Ok(Event::CData(ref e)) => {
                let raw = e.clone().into_inner();
                scanner.text(&String::from_utf8_lossy(&raw));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing slide at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = scanner.stack.last() {
        return Err(Error::XmlError(format!(
            "Unexpected end of document inside <{}>",
            String::from_utf8_lossy(open)
        )));
    }

    Ok(scanner.result)
}
