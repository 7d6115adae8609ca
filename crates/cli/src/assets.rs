//! Output tree layout and file copying.

use anyhow::{Context, Result};
use beamer_core::beamer::MAIN_TEX_NAME;
use beamer_core::normalize_media_name;
use beamer_pptx::PptxArchive;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Template file that is never copied (the emitter generates the document).
const TEMPLATE_MAIN: &str = "main.tex";

/// Template folder that is shared between decks.
const TEMPLATE_PIC_DIR: &str = "pic";

/// Where a conversion writes its files.
///
/// `shared_dir` receives files shared by sibling decks (preamble, style
/// files, logo pictures). It defaults to the parent of `output_dir`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub output_dir: PathBuf,
    pub shared_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let shared_dir = output_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            output_dir,
            shared_dir,
        }
    }

    pub fn with_shared_dir(mut self, shared_dir: impl Into<PathBuf>) -> Self {
        self.shared_dir = shared_dir.into();
        self
    }

    /// Generated Beamer source.
    pub fn main_tex(&self) -> PathBuf {
        self.output_dir.join(MAIN_TEX_NAME)
    }

    /// Copied slide media.
    pub fn fig_dir(&self) -> PathBuf {
        self.output_dir.join("fig")
    }

    /// Shared template pictures (logo).
    pub fn pic_dir(&self) -> PathBuf {
        self.shared_dir.join(TEMPLATE_PIC_DIR)
    }

    /// Remove any previous output and create an empty output tree.
    pub fn prepare(&self) -> Result<()> {
        if self.output_dir.exists() {
            log::debug!("Removing previous output {}", self.output_dir.display());
            fs::remove_dir_all(&self.output_dir).with_context(|| {
                format!("Failed to remove {}", self.output_dir.display())
            })?;
        }
        fs::create_dir_all(self.fig_dir())
            .with_context(|| format!("Failed to create {}", self.fig_dir().display()))?;
        fs::create_dir_all(&self.shared_dir)
            .with_context(|| format!("Failed to create {}", self.shared_dir.display()))?;
        Ok(())
    }

    /// The shared directory as the generated document sees it: relative to
    /// the output directory when possible, absolute otherwise.
    ///
    /// Both directories must exist (see [`OutputLayout::prepare`]).
    pub fn shared_prefix(&self) -> Result<String> {
        let output = self
            .output_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", self.output_dir.display()))?;
        let shared = self
            .shared_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", self.shared_dir.display()))?;
        Ok(relative_tex_path(&shared, &output))
    }
}

/// `target` relative to `base`, with `/` separators as TeX expects.
/// Falls back to `target` itself when the two share no root.
fn relative_tex_path(target: &Path, base: &Path) -> String {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return target.to_string_lossy().replace('\\', "/");
    }

    let mut parts = vec!["..".to_string(); base_parts.len() - common];
    parts.extend(
        target_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Copy the static template files into the output tree.
///
/// `pic/` and `*.sty` files go to the shared directory; everything else
/// except `main.tex` goes into the output directory. A missing template
/// directory only degrades the output.
pub fn copy_template(template_dir: &Path, layout: &OutputLayout) -> Result<usize> {
    if !template_dir.is_dir() {
        log::warn!(
            "Template directory {} not found, skipping template files",
            template_dir.display()
        );
        return Ok(0);
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(template_dir)
        .with_context(|| format!("Failed to read {}", template_dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    let mut copied = 0;
    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        if name == TEMPLATE_MAIN {
            continue;
        }

        if path.is_dir() {
            let target = if name == TEMPLATE_PIC_DIR {
                layout.pic_dir()
            } else {
                layout.output_dir.join(name)
            };
            copied += copy_dir_all(&path, &target)?;
        } else {
            let is_style = path.extension().is_some_and(|ext| ext == "sty");
            let target_dir = if is_style {
                &layout.shared_dir
            } else {
                &layout.output_dir
            };
            copy_file(&path, &target_dir.join(name))?;
            copied += 1;
        }
    }

    log::debug!("Copied {} template files", copied);
    Ok(copied)
}

/// Copy every media file of the archive into `fig_dir`, renaming `.jfif`
/// to `.jpg` the same way image references are renamed.
pub fn copy_media(archive: &PptxArchive, fig_dir: &Path) -> Result<usize> {
    let files = archive.media_files()?;
    fs::create_dir_all(fig_dir)
        .with_context(|| format!("Failed to create {}", fig_dir.display()))?;

    let mut copied = 0;
    for file in &files {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping media file with non UTF-8 name: {}", file.display());
            continue;
        };
        copy_file(file, &fig_dir.join(normalize_media_name(name)))?;
        copied += 1;
    }

    log::debug!("Copied {} media files", copied);
    Ok(copied)
}

/// Recursively copy `src` into `dst`, merging with existing content.
fn copy_dir_all(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("Failed to create {}", dst.display()))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("Failed to read {}", src.display()))? {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_all(&path, &target)?;
        } else {
            copy_file(&path, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}
