//! CLI tool for converting PowerPoint files into LaTeX Beamer decks.

mod assets;
mod convert;

use anyhow::{anyhow, Result};
use assets::OutputLayout;
use beamer_core::{BackgroundPolicy, BeamerEmitter, ImagePolicy};
use clap::Parser;
use convert::{convert, ConvertOptions};
use std::path::PathBuf;

/// Extract PPTX content into the institutional Beamer template.
#[derive(Parser, Debug)]
#[command(name = "pptx2beamer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    pptx_file: PathBuf,

    /// Output directory (removed and recreated)
    #[arg(short, long, default_value = "tex/overview_eng")]
    output_dir: PathBuf,

    /// Directory for shared preamble, style, and logo files (default: parent of the output directory)
    #[arg(long)]
    shared_dir: Option<PathBuf>,

    /// Directory holding the static template files
    #[arg(long, default_value = "template")]
    template_dir: PathBuf,

    /// Tolerance for detecting full-slide background images (fraction of the slide)
    #[arg(long, default_value = "0.02")]
    background_tolerance: f64,

    /// Keep full-slide background images instead of dropping them
    #[arg(long)]
    keep_backgrounds: bool,

    /// Image extensions to leave out of the frames (default: tif, tiff)
    #[arg(long = "skip-ext", value_name = "EXT")]
    skip_extensions: Vec<String>,

    /// Reference images under another extension, e.g. emf=pdf
    #[arg(long = "rewrite-ext", value_name = "FROM=TO", value_parser = parse_rewrite)]
    rewrites: Vec<(String, String)>,

    /// Add a label to every frame, derived from its title
    #[arg(long)]
    frame_labels: bool,

    /// Also write the extracted slides as JSON
    #[arg(long, value_name = "FILE")]
    dump_json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = build_options(&args);

    if args.verbose {
        eprintln!("Processing: {}", args.pptx_file.display());
    }

    let summary = convert(&options)?;

    if args.verbose {
        eprintln!("  Found {} slides", summary.slides);
        eprintln!("  Copied {} media files", summary.media_files);
        eprintln!("  Copied {} template files", summary.template_files);
    }
    for diagnostic in &summary.diagnostics {
        eprintln!("Warning: {}: {}", diagnostic.part, diagnostic.message);
    }

    println!("Content extracted into: {}/", options.layout.output_dir.display());
    Ok(())
}

/// Map command-line arguments onto conversion options.
fn build_options(args: &Args) -> ConvertOptions {
    let mut layout = OutputLayout::new(&args.output_dir);
    if let Some(shared) = &args.shared_dir {
        layout = layout.with_shared_dir(shared);
    }

    let mut images = ImagePolicy::new();
    if !args.skip_extensions.is_empty() {
        images = images.with_skip_extensions(args.skip_extensions.iter().cloned());
    }
    for (from, to) in &args.rewrites {
        images = images.with_rewrite(from, to);
    }

    let backgrounds = BackgroundPolicy::new()
        .with_tolerance(args.background_tolerance)
        .with_enabled(!args.keep_backgrounds);

    let emitter = BeamerEmitter::new()
        .with_image_policy(images)
        .with_background_policy(backgrounds)
        .with_frame_labels(args.frame_labels);

    ConvertOptions {
        input: args.pptx_file.clone(),
        layout,
        template_dir: Some(args.template_dir.clone()),
        emitter,
        dump_json: args.dump_json.clone(),
    }
}

/// Parse a `FROM=TO` extension rewrite.
fn parse_rewrite(value: &str) -> Result<(String, String)> {
    let (from, to) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FROM=TO, got '{}'", value))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(anyhow!("expected FROM=TO, got '{}'", value));
    }
    Ok((from.to_string(), to.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamer_core::types::{Image, Position, Presentation, Slide, SlideSize, TitlePageInfo};

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pptx2beamer", "deck.pptx"]);
        assert_eq!(args.output_dir, PathBuf::from("tex/overview_eng"));
        assert_eq!(args.template_dir, PathBuf::from("template"));
        assert_eq!(args.background_tolerance, 0.02);

        let options = build_options(&args);
        assert_eq!(options.layout.shared_dir, PathBuf::from("tex"));
        assert_eq!(options.input, PathBuf::from("deck.pptx"));
    }

    #[test]
    fn test_parse_rewrite() {
        assert_eq!(
            parse_rewrite("wmf=pdf").unwrap(),
            ("wmf".to_string(), "pdf".to_string())
        );
        assert!(parse_rewrite("wmf").is_err());
        assert!(parse_rewrite("=pdf").is_err());
    }

    #[test]
    fn test_image_flags_reach_emitter() {
        let args = Args::parse_from([
            "pptx2beamer",
            "deck.pptx",
            "--skip-ext",
            "gif",
            "--rewrite-ext",
            "wmf=pdf",
            "--keep-backgrounds",
        ]);
        let emitter = build_options(&args).emitter;

        let image = |name: &str, width: i64, height: i64| Image {
            filename: name.to_string(),
            position: Position {
                x: 0,
                y: 0,
                width,
                height,
            },
        };
        let slide = Slide {
            number: 2,
            title: "Pictures".to_string(),
            texts: Vec::new(),
            images: vec![
                image("a.gif", 10, 10),
                image("b.wmf", 10, 10),
                image("c.tiff", 10, 10),
                image("bg.png", 12_192_000, 6_858_000),
            ],
        };
        let presentation = Presentation::new(
            SlideSize::default(),
            TitlePageInfo::default(),
            vec![Slide::new(1), slide],
        );
        let tex = emitter.render(&presentation);
        assert!(!tex.contains("a.gif"));
        assert!(tex.contains("{b.pdf}"));
        assert!(tex.contains("{c.tiff}"));
        assert!(tex.contains("{bg.png}"));
    }
}
