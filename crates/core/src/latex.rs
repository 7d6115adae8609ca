//! LaTeX text escaping and identifier sanitization.

use sha2::{Digest, Sha256};

/// Prefix for identifiers derived from text with no usable characters.
pub const FALLBACK_IDENT_PREFIX: &str = "layout";

/// Escape LaTeX special characters so `text` typesets literally.
///
/// Only the ten reserved characters are rewritten; everything else,
/// including non-ASCII text, passes through unchanged.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}

/// Reduce `text` to a string usable as a LaTeX command name or label.
///
/// Keeps ASCII letters and digits only. Text with none of those (all
/// punctuation, CJK, emoji...) maps to `layout` followed by the first
/// eight hex digits of its SHA-256, so the result is never empty and is
/// stable across runs.
pub fn sanitize_command_name(text: &str) -> String {
    let sanitized: String = text.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if !sanitized.is_empty() {
        return sanitized;
    }

    let digest = Sha256::digest(text.as_bytes());
    let hex: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}{}", FALLBACK_IDENT_PREFIX, hex)
}
