//! One PPTX to Beamer conversion run.

use crate::assets::{copy_media, copy_template, OutputLayout};
use anyhow::{bail, Context, Result};
use beamer_core::{BeamerEmitter, Diagnostic, SharedPreamble};
use beamer_pptx::{PptxArchive, PptxParser};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a conversion needs to know.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub layout: OutputLayout,
    pub template_dir: Option<PathBuf>,
    pub emitter: BeamerEmitter,
    pub dump_json: Option<PathBuf>,
}

/// What a finished conversion produced.
#[derive(Debug)]
pub struct ConversionSummary {
    pub slides: usize,
    pub media_files: usize,
    pub template_files: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert one PPTX file.
///
/// The archive is opened and parsed before anything is written, so a
/// missing or corrupt input leaves the output location untouched.
pub fn convert(options: &ConvertOptions) -> Result<ConversionSummary> {
    let archive = PptxArchive::open(&options.input)
        .with_context(|| format!("Cannot read {}", options.input.display()))?;
    let extraction = PptxParser::new()
        .parse(&archive)
        .with_context(|| format!("Failed to parse {}", options.input.display()))?;
    let presentation = &extraction.presentation;

    let layout = &options.layout;
    guard_input_outside_output(&options.input, &layout.output_dir)?;
    layout.prepare()?;
    let shared_prefix = layout.shared_prefix()?;
    log::debug!("Shared files referenced through {}", shared_prefix);

    let template_files = match &options.template_dir {
        Some(dir) => copy_template(dir, layout)?,
        None => 0,
    };

    SharedPreamble::new()
        .with_shared_prefix(&shared_prefix)
        .write_to(&layout.shared_dir)
        .with_context(|| format!("Failed to write preamble to {}", layout.shared_dir.display()))?;

    let media_files = copy_media(&archive, &layout.fig_dir())?;

    let tex = options
        .emitter
        .clone()
        .with_shared_prefix(&shared_prefix)
        .render(presentation);
    let main_tex = layout.main_tex();
    fs::write(&main_tex, tex).with_context(|| format!("Failed to write {}", main_tex.display()))?;
    log::info!("Wrote {}", main_tex.display());

    if let Some(path) = &options.dump_json {
        let json = serde_json::to_string_pretty(presentation)
            .context("Failed to serialize extracted slides")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote slide dump {}", path.display());
    }

    Ok(ConversionSummary {
        slides: presentation.slides.len(),
        media_files,
        template_files,
        diagnostics: extraction.diagnostics,
    })
}

/// Refuse to wipe an output directory that holds the input file.
fn guard_input_outside_output(input: &Path, output_dir: &Path) -> Result<()> {
    let (Ok(input), Ok(output)) = (input.canonicalize(), output_dir.canonicalize()) else {
        return Ok(());
    };
    if input.starts_with(&output) {
        bail!(
            "Output directory {} contains the input file and would be deleted",
            output_dir.display()
        );
    }
    Ok(())
}
