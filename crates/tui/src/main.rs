mod renderer;
mod source;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use swimlane_core::model::GraphView;
use swimlane_core::sources::{GitLogCollector, write_document};
use swimlane_core::svg::render_svg;
use swimlane_core::views::glyphs::render_glyphs;
use swimlane_core::views::timeline::{TimelineStyle, badges, render_timeline};
use swimlane_protocol::{GraphDocument, HistoryLimit, Viewport};

use crate::source::HistorySource;

/// Lane-based commit graph viewer.
#[derive(Debug, Parser)]
#[command(name = "swimlane", version, about)]
struct Args {
    /// Graph document (JSON) or raw `git log` output to show instead of a repository.
    path: Option<PathBuf>,

    /// Repository to collect history from.
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Git executable.
    #[arg(long, default_value = "git")]
    git: PathBuf,

    /// Number of commits to collect (1 to 2000).
    #[arg(long, default_value_t = HistoryLimit::default())]
    limit: HistoryLimit,

    /// Print the graph as text and exit.
    #[arg(long)]
    print: bool,

    /// Write the graph as an SVG file and exit.
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Use the light palette for SVG output.
    #[arg(long)]
    light: bool,

    /// Write the collected graph as a JSON document and exit. Without FILE,
    /// or with `-`, the document goes to stdout.
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "-")]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = match &args.path {
        Some(path) => HistorySource::File(path.clone()),
        None => HistorySource::Repository(GitLogCollector::new(&args.repo).with_git(&args.git)),
    };

    if !args.print && args.svg.is_none() && args.json.is_none() {
        return renderer::run_tui(source, args.limit);
    }

    let document = source
        .load(args.limit)
        .with_context(|| format!("failed to load history from {}", source.describe()))?;

    if let Some(path) = &args.json {
        write_json(&document, path)?;
    }
    if !args.print && args.svg.is_none() {
        return Ok(());
    }
    let view = GraphView::build(document);

    if let Some(path) = &args.svg {
        write_svg(&view, path, !args.light)?;
    }
    if args.print {
        print_view(&view)?;
    }
    Ok(())
}

fn write_json(document: &GraphDocument, path: &Path) -> Result<()> {
    let json = write_document(document).context("failed to serialize graph document")?;
    if path == Path::new("-") {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{json}")?;
    } else {
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {} commits to {}", document.commits.len(), path.display());
    }
    Ok(())
}

fn write_svg(view: &GraphView, path: &Path, dark: bool) -> Result<()> {
    let style = TimelineStyle::default();
    let (width, height) = style.extent(view);
    let commands = render_timeline(view, &style, &Viewport::new(0.0, 0.0, width, height));
    std::fs::write(path, render_svg(&commands, width, height, dark))
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {} commits to {}", view.commits.len(), path.display());
    Ok(())
}

fn print_view(view: &GraphView) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(placeholder) = view.placeholder() {
        writeln!(out, "{placeholder}")?;
    }

    let graph_width = view.layout.lane_count * 2;
    for row in render_glyphs(view) {
        let graph = row.text();
        match row.commit.and_then(|index| view.commits.get(index)) {
            Some(commit) => {
                let refs: Vec<String> = badges(commit).into_iter().map(|(text, _)| text).collect();
                let refs = if refs.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", refs.join(", "))
                };
                writeln!(
                    out,
                    "{graph:<graph_width$} {} {}{refs}",
                    commit.display_id(),
                    commit.summary
                )?;
            }
            None if graph.is_empty() => {}
            None => writeln!(out, "{graph}")?,
        }
    }

    writeln!(out, "{}", renderer::summary_line(&view.summary))?;
    Ok(())
}
