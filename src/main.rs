//! motifmark - kinase consensus annotator
//!
//! Marks motif matches on a conserved protein sequence and writes an HTML
//! report (or opens a terminal preview).
//!
//! ## Usage
//!
//! ```bash
//! motifmark ndc10.fasta ndc10.labels                 # writes output.html
//! motifmark ndc10.fasta ndc10.labels -o - --ranked   # report to stdout
//! motifmark ndc10.fasta ndc10.labels -p 'R.[ST]' --view
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};

use motifmark::annotate;
use motifmark::controller::run_viewer;
use motifmark::input::{read_labels, read_sequence};
use motifmark::model::ViewerState;
use motifmark::motif::{Motif, AURORA_B};
use motifmark::render::{RenderOptions, ROW_WIDTH};

/// motifmark - mark kinase consensus sites on a conserved protein sequence
///
/// Reads a (possibly gapped) sequence and one conservation label per
/// position (yellow, pink, lightgreen; anything else is non-conserved),
/// then writes an HTML report listing every motif match with its
/// conservation score, followed by the colorized sequence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file holding the sequence
    sequence: PathBuf,

    /// Conservation labels, one per sequence position (gaps included)
    labels: PathBuf,

    /// Identifier of the FASTA record to use (default: first record)
    #[arg(short = 'i', long = "id")]
    id: Option<String>,

    /// Motif pattern (regular expression), default: Aurora B consensus
    #[arg(short = 'p', long = "pattern", default_value = AURORA_B)]
    pattern: String,

    /// Residues per row in the annotated sequence
    #[arg(short = 'w', long = "row-width", default_value_t = ROW_WIDTH)]
    row_width: usize,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "output.html")]
    output: String,

    /// Also list matches ranked by conservation score
    #[arg(long = "ranked")]
    ranked: bool,

    /// Open an interactive terminal preview instead of writing a report
    #[arg(long = "view", conflicts_with = "output")]
    view: bool,

    /// Specify multiple times to increase verbosity (e.g., -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbosity: u8,
}

fn init_verbose(args: &Args) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match level {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_verbose(&args);

    if args.row_width == 0 {
        anyhow::bail!("Row width must be at least 1");
    }
    log::info!("Running {}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // Compile first so a bad pattern fails before any file is read
    let motif = Motif::new(&args.pattern)?;

    let record = read_sequence(&args.sequence, args.id.as_deref())
        .with_context(|| format!("Cannot load sequence from {}", args.sequence.display()))?;
    let labels = read_labels(&args.labels)
        .with_context(|| format!("Cannot load labels from {}", args.labels.display()))?;
    log::info!("Loaded sequence {} ({} positions)", record.id, record.data.chars().count());

    let annotation = annotate(&record.data, &labels, &motif)?;

    if args.view {
        let state = ViewerState::new(annotation.sequence, annotation.records, args.row_width);
        return run_viewer(state);
    }

    let options = RenderOptions {
        row_width: args.row_width,
        ranked: args.ranked,
        title: format!("{} consensus sites in {}", motif.pattern(), record.id),
    };
    let document = annotation.render(&options);

    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(document.as_bytes())?;
    } else {
        std::fs::write(&args.output, document)
            .with_context(|| format!("Cannot write report to {}", args.output))?;
        eprintln!(
            "Wrote {} motif matches to {}",
            annotation.records.len(),
            args.output
        );
    }

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}
