//! Media file naming and image format handling.

/// Normalize a media file name for LaTeX: `.jfif` becomes `.jpg`.
///
/// The extension comparison ignores case; the stem is kept as-is.
/// Applying this twice gives the same result as applying it once.
pub fn normalize_media_name(name: &str) -> String {
    match split_extension(name) {
        Some((stem, ext)) if ext.eq_ignore_ascii_case("jfif") => format!("{}.jpg", stem),
        _ => name.to_string(),
    }
}

/// Last component of a `/`-separated archive path.
pub fn file_name_of(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

fn split_extension(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.').filter(|(stem, _)| !stem.is_empty())
}

/// How an image reference is handled when emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDisposition {
    /// Reference the file under this name.
    Include(String),
    /// No supported way to embed this format.
    Skip,
}

/// Which image formats are dropped and which are referenced under a
/// converted extension.
///
/// Converted extensions assume some external step produces the target
/// file (e.g. EMF rendered to PDF); nothing here performs the conversion.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    skip_extensions: Vec<String>,
    rewrites: Vec<(String, String)>,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            skip_extensions: vec!["tiff".to_string(), "tif".to_string()],
            rewrites: vec![("emf".to_string(), "pdf".to_string())],
        }
    }
}

impl ImagePolicy {
    /// Create a policy that skips TIFF and references EMF as PDF.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of skipped extensions (without the leading dot).
    pub fn with_skip_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Add or replace an extension rewrite, e.g. `("wmf", "pdf")`.
    pub fn with_rewrite(mut self, from: &str, to: &str) -> Self {
        let from = from.trim_start_matches('.').to_ascii_lowercase();
        let to = to.trim_start_matches('.').to_string();
        self.rewrites.retain(|(f, _)| *f != from);
        self.rewrites.push((from, to));
        self
    }

    /// Decide how to reference an already normalized media file name.
    pub fn disposition(&self, name: &str) -> ImageDisposition {
        let Some((stem, ext)) = split_extension(name) else {
            return ImageDisposition::Include(name.to_string());
        };
        let ext_lower = ext.to_ascii_lowercase();

        if let Some((_, to)) = self.rewrites.iter().find(|(from, _)| *from == ext_lower) {
            return ImageDisposition::Include(format!("{}.{}", stem, to));
        }
        if self.skip_extensions.iter().any(|s| *s == ext_lower) {
            return ImageDisposition::Skip;
        }
        ImageDisposition::Include(name.to_string())
    }
}
