//! Beamer source output.
//!
//! Renders a [`Presentation`] into a single `.tex` document built on the
//! institutional template: a shared preamble pulled in with `\input`, a title
//! page with the institute logo, and one frame per content slide.

use crate::error::Result;
use crate::geometry::BackgroundPolicy;
use crate::latex::{escape_latex, sanitize_command_name};
use crate::media::{ImageDisposition, ImagePolicy};
use crate::types::{Image, Presentation, Slide, SlideSize, TitlePageInfo};
use std::collections::HashSet;
use std::path::Path;

/// File name of the generated document inside the output directory.
pub const MAIN_TEX_NAME: &str = "overview_eng.tex";

/// File name of the shared package preamble.
pub const PACKAGE_TEX_NAME: &str = "0-package.tex";

/// File name of the shared macro file.
pub const MACRO_TEX_NAME: &str = "0-macro.tex";

/// Shared directory as seen from the output directory in the default layout.
pub const DEFAULT_SHARED_PREFIX: &str = "..";

/// Join a file name onto a shared-directory prefix using TeX path syntax.
pub fn shared_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() || prefix == "." {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Fixed parts of the generated document.
#[derive(Debug, Clone)]
pub struct BeamerTemplate {
    /// Files pulled in with `\input` right after `\documentclass`.
    pub preamble_inputs: Vec<String>,
    /// Command issued right after `\begin{document}` (font selection).
    pub font_command: Option<String>,
    /// Logo shown under the title page, relative to the output directory.
    pub logo: Option<String>,
    /// Logo width as a fraction of `\linewidth`.
    pub logo_width: f64,
    /// Image width as a fraction of `\linewidth`.
    pub image_width: f64,
}

impl Default for BeamerTemplate {
    fn default() -> Self {
        Self {
            preamble_inputs: Vec::new(),
            font_command: Some(r"\kaishu".to_string()),
            logo: None,
            logo_width: 0.618,
            image_width: 0.85,
        }
        .with_shared_prefix(DEFAULT_SHARED_PREFIX)
    }
}

impl BeamerTemplate {
    /// Point the preamble inputs and the logo at the shared directory,
    /// given as a path relative to the output directory.
    pub fn with_shared_prefix(mut self, prefix: &str) -> Self {
        self.preamble_inputs = vec![
            shared_path(prefix, PACKAGE_TEX_NAME),
            shared_path(prefix, MACRO_TEX_NAME),
        ];
        self.logo = Some(shared_path(prefix, "pic/szu_logo.png"));
        self
    }
}

/// Formatter for Beamer frame markup.
#[derive(Debug, Clone, Default)]
pub struct BeamerEmitter {
    template: BeamerTemplate,
    images: ImagePolicy,
    backgrounds: BackgroundPolicy,
    frame_labels: bool,
}

impl BeamerEmitter {
    /// Create an emitter with the default template and image rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: BeamerTemplate) -> Self {
        self.template = template;
        self
    }

    /// Relocate the shared preamble and logo references of the current template.
    pub fn with_shared_prefix(mut self, prefix: &str) -> Self {
        let logo = self.template.logo.is_some();
        self.template = self.template.with_shared_prefix(prefix);
        if !logo {
            self.template.logo = None;
        }
        self
    }

    pub fn with_image_policy(mut self, images: ImagePolicy) -> Self {
        self.images = images;
        self
    }

    pub fn with_background_policy(mut self, backgrounds: BackgroundPolicy) -> Self {
        self.backgrounds = backgrounds;
        self
    }

    /// Give every frame a `label=` option derived from its title.
    pub fn with_frame_labels(mut self, enabled: bool) -> Self {
        self.frame_labels = enabled;
        self
    }

    /// Render the whole document, ending with a trailing newline.
    pub fn render(&self, presentation: &Presentation) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(r"\documentclass{beamer}".to_string());
        for input in &self.template.preamble_inputs {
            lines.push(format!(r"\input{{{}}}", input));
        }
        lines.push(String::new());

        self.push_title_page_info(&mut lines, &presentation.title_page);
        lines.push(String::new());

        lines.push(r"\begin{document}".to_string());
        lines.push(String::new());
        self.push_title_frame(&mut lines);
        lines.push(String::new());

        let mut used_labels = HashSet::new();
        for slide in presentation.content_slides() {
            self.push_frame(&mut lines, slide, presentation.slide_size, &mut used_labels);
            lines.push(String::new());
        }

        lines.push(r"\end{document}".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn push_title_page_info(&self, lines: &mut Vec<String>, info: &TitlePageInfo) {
        let fields = [
            ("author", &info.author),
            ("title", &info.title),
            ("subtitle", &info.subtitle),
            ("institute", &info.institute),
            ("date", &info.date),
        ];
        for (command, value) in fields {
            lines.push(format!(r"\{}{{{}}}", command, escape_latex(value)));
        }
    }

    fn push_title_frame(&self, lines: &mut Vec<String>) {
        if let Some(font) = &self.template.font_command {
            lines.push(font.clone());
        }
        lines.push(r"\begin{frame}".to_string());
        lines.push(r"    \titlepage".to_string());
        if let Some(logo) = &self.template.logo {
            lines.push(r"    \begin{figure}[htpb]".to_string());
            lines.push(r"        \begin{center}".to_string());
            lines.push(format!(
                r"            \includegraphics[width={}\linewidth]{{{}}}",
                self.template.logo_width, logo
            ));
            lines.push(r"        \end{center}".to_string());
            lines.push(r"    \end{figure}".to_string());
        }
        lines.push(r"\end{frame}".to_string());
    }

    fn push_frame(
        &self,
        lines: &mut Vec<String>,
        slide: &Slide,
        slide_size: SlideSize,
        used_labels: &mut HashSet<String>,
    ) {
        lines.push(format!("% Slide {}", slide.number));

        let title = escape_latex(&slide.title);
        if self.frame_labels {
            let label = unique_label(&slide.title, slide.number, used_labels);
            lines.push(format!(r"\begin{{frame}}[label={}]{{{}}}", label, title));
        } else {
            lines.push(format!(r"\begin{{frame}}{{{}}}", title));
        }

        if !slide.texts.is_empty() {
            lines.push(r"  \begin{itemize}".to_string());
            for text in &slide.texts {
                lines.push(format!(r"    \item {}", escape_latex(text)));
            }
            lines.push(r"  \end{itemize}".to_string());
        }

        for image in &slide.images {
            if let Some(path) = self.image_reference(image, slide_size) {
                lines.push(r"  \begin{center}".to_string());
                lines.push(format!(
                    r"    \includegraphics[width={}\linewidth]{{{}}}",
                    self.template.image_width, path
                ));
                lines.push(r"  \end{center}".to_string());
            }
        }

        lines.push(r"\end{frame}".to_string());
    }

    /// The file name to include for `image`, or `None` if it is not emitted.
    fn image_reference(&self, image: &Image, slide_size: SlideSize) -> Option<String> {
        let path = match self.images.disposition(&image.filename) {
            ImageDisposition::Include(path) => path,
            ImageDisposition::Skip => {
                log::debug!("Skipping unsupported image format: {}", image.filename);
                return None;
            }
        };

        let rel = slide_size.relative(&image.position);
        if self.backgrounds.suppresses(&rel) {
            log::debug!("Skipping full-slide background image: {}", image.filename);
            return None;
        }

        Some(path)
    }
}

/// Frame label for a title, made unique by appending the slide number and,
/// if that is taken as well, a counter.
fn unique_label(title: &str, number: usize, used: &mut HashSet<String>) -> String {
    let base = sanitize_command_name(title);
    let mut label = base.clone();
    let mut counter = 1;
    while used.contains(&label) {
        label = if counter == 1 {
            format!("{}{}", base, number)
        } else {
            format!("{}{}x{}", base, number, counter)
        };
        counter += 1;
    }
    used.insert(label.clone());
    label
}

/// Shared preamble files written next to (not inside) the output directory,
/// so several decks can share one package list and macro set.
#[derive(Debug, Clone)]
pub struct SharedPreamble {
    packages: Vec<String>,
    style: String,
    shared_prefix: String,
    macros: Vec<String>,
}

impl Default for SharedPreamble {
    fn default() -> Self {
        Self {
            packages: [
                r"\usepackage{ctex, hyperref}",
                r"\usepackage[T1]{fontenc}",
                r"\usepackage{latexsym,amsmath,xcolor,multicol,booktabs,calligra}",
                r"\usepackage{graphicx,pstricks,listings,stackengine}",
                r"\graphicspath{{fig/}}",
                r"\usepackage{tikz}",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            style: "szu_blue".to_string(),
            shared_prefix: DEFAULT_SHARED_PREFIX.to_string(),
            macros: vec!["% Put shared macros here".to_string()],
        }
    }
}

impl SharedPreamble {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the shared style from `prefix`, relative to the output directory.
    pub fn with_shared_prefix(mut self, prefix: &str) -> Self {
        self.shared_prefix = prefix.to_string();
        self
    }

    /// Contents of `0-package.tex`.
    pub fn package_source(&self) -> String {
        let mut lines = self.packages.clone();
        lines.push(format!(
            r"\usepackage{{{}}}",
            shared_path(&self.shared_prefix, &self.style)
        ));
        with_trailing_newline(&lines)
    }

    /// Contents of `0-macro.tex`.
    pub fn macro_source(&self) -> String {
        with_trailing_newline(&self.macros)
    }

    /// Write both preamble files into `dir`, overwriting existing ones.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(PACKAGE_TEX_NAME), self.package_source())?;
        std::fs::write(dir.join(MACRO_TEX_NAME), self.macro_source())?;
        log::debug!("Wrote shared preamble to {}", dir.display());
        Ok(())
    }
}

fn with_trailing_newline(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
