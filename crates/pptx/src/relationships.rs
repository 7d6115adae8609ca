//! Per-part relationship tables (`_rels/*.rels`).

use crate::archive::PptxArchive;
use crate::xml::local_name;
use beamer_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// Relationship ID to target mapping for a single part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipTable {
    targets: HashMap<String, String>,
}

impl RelationshipTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the contents of a `.rels` part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut table = Self::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = Some(String::from_utf8_lossy(&attr.value).to_string()),
                            b"Target" => {
                                target = Some(String::from_utf8_lossy(&attr.value).to_string())
                            }
                            _ => {}
                        }
                    }

                    match (id, target) {
                        (Some(id), Some(target)) => table.insert(id, target),
                        _ => log::debug!("Skipping relationship without Id or Target"),
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(table)
    }

    /// Load the relationships of `part`. A part without a `.rels` sidecar
    /// has no relationships, which is not an error.
    pub fn load(archive: &PptxArchive, part: &str) -> Result<Self> {
        let rels_part = rels_part_for(part);
        match archive.read_part(&rels_part)? {
            Some(xml) => Self::parse(&xml),
            None => {
                log::debug!("No relationships for {}", part);
                Ok(Self::new())
            }
        }
    }

    /// Add or replace a relationship.
    pub fn insert(&mut self, id: impl Into<String>, target: impl Into<String>) {
        self.targets.insert(id.into(), target.into());
    }

    /// Target path of a relationship ID.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Path of the relationships part that belongs to `part`:
/// `ppt/slides/slide1.xml` becomes `ppt/slides/_rels/slide1.xml.rels`.
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}
