//! Slide size from `ppt/presentation.xml`.

use crate::xml::{attr_value, local_name};
use beamer_core::{Error, Result, SlideSize};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Archive path of the presentation part.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Read `p:sldSz` from a presentation part.
///
/// A missing element or an unusable `cx`/`cy` falls back to the default
/// for that dimension. Only malformed XML is an error.
pub fn parse_slide_size(xml: &str) -> Result<SlideSize> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                return Ok(SlideSize::from_declared(
                    dimension(e, b"cx"),
                    dimension(e, b"cy"),
                ));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    log::debug!("No slide size declared, using default");
    Ok(SlideSize::default())
}

fn dimension(e: &BytesStart<'_>, key: &[u8]) -> Option<i64> {
    attr_value(e, key).and_then(|v| v.trim().parse::<i64>().ok())
}
