//! aiditor - sentence selection and list-marker decoration for markdown.
//!
//! # Usage
//!
//! ```bash
//! aiditor select notes.md --line 3 --col 12
//! aiditor decorate notes.md --offset 20 --height 40
//! aiditor --format json select notes.md --line 0 --col 5
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use serde::Serialize;

use aiditor::command::{self, SELECT_CURRENT_SENTENCE};
use aiditor::config::{
    ConfigFlags, OutputFormat, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens,
};
use aiditor::decoration::{LIST_GLYPH, ListMarkerPlugin, Replacement};
use aiditor::editor::{EditorBuffer, Position};
use aiditor::view::MarkdownView;

/// Sentence selection and list-marker decoration for markdown files
#[derive(Parser, Debug)]
#[command(name = "aiditor", version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Log scan and decoration details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select the sentence around a cursor position
    Select {
        /// Markdown file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Zero-based cursor line
        #[arg(long)]
        line: usize,

        /// Zero-based cursor column, in characters
        #[arg(long)]
        col: usize,
    },

    /// Print the visible lines with list markers decorated
    Decorate {
        /// Markdown file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// First line to show
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of lines to show (defaults to the whole file)
        #[arg(long)]
        height: Option<u16>,
    },
}

#[derive(Serialize)]
struct SelectionReport {
    anchor: Position,
    head: Position,
    text: String,
}

#[derive(Serialize)]
struct DecorationReport<'a> {
    glyph: &'a str,
    replacements: &'a [Replacement],
    lines: Vec<String>,
}

fn read_source(path: &Path) -> Result<String> {
    ensure!(path.exists(), "File not found: {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn select(file: &Path, line: usize, col: usize, format: OutputFormat) -> Result<()> {
    let mut buffer = EditorBuffer::from_text(&read_source(file)?);
    ensure!(
        line < buffer.line_count(),
        "Line {line} is past the end of {} ({} lines)",
        file.display(),
        buffer.line_count()
    );
    ensure!(
        col <= buffer.line_len(line),
        "Column {col} is past the end of line {line} ({} characters)",
        buffer.line_len(line)
    );
    buffer.move_to(line, col);

    let selection =
        command::run(SELECT_CURRENT_SENTENCE, &mut buffer).context("Sentence selection failed")?;
    let text = buffer.selected_text().unwrap_or_default();
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => {
            let report = SelectionReport {
                anchor: selection.anchor,
                head: selection.head,
                text,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn decorate(file: &Path, offset: usize, height: Option<u16>, format: OutputFormat) -> Result<()> {
    let mut view = MarkdownView::new(read_source(file)?, height.unwrap_or(u16::MAX));
    view.go_to_line(offset);
    let plugin = ListMarkerPlugin::new(&view);
    let lines = view.render_visible(plugin.decorations());
    match format {
        OutputFormat::Text => {
            for line in lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let report = DecorationReport {
                glyph: LIST_GLYPH,
                replacements: plugin.decorations().as_slice(),
                lines,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let cli_flags = parse_flag_tokens(&raw_args);
    let file_flags = load_config_flags(&global_config_path())?
        .union(&load_config_flags(&local_override_path())?);
    let effective: ConfigFlags = file_flags.union(&cli_flags);

    // Initialize logging
    let level = if effective.verbose || cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let format = effective.format.or(cli.format).unwrap_or_default();
    match cli.command {
        Commands::Select { file, line, col } => select(&file, line, col, format),
        Commands::Decorate {
            file,
            offset,
            height,
        } => decorate(&file, offset, height, format),
    }
}
