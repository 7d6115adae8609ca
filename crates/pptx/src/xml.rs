//! Small helpers shared by the OOXML part readers.

use beamer_core::{Error, Result};
use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the attribute whose local name is `key`, if present.
pub fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Integer attribute, `None` if absent. A present value that is not an
/// integer is an error.
pub fn int_attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<i64>> {
    match attr_value(e, key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
            Error::XmlError(format!(
                "Invalid integer '{}' for attribute '{}' on <{}>",
                raw,
                String::from_utf8_lossy(key),
                String::from_utf8_lossy(e.name().as_ref())
            ))
        }),
    }
}
