use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use library_catalog::{
    CatalogConfig, LibraryCatalog, OutputFormat, TracingObserver, TreeStats, TreeVisualization,
    process_log,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Run a library command log against an in-memory catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command log to read, one command per line
    #[arg(default_value = "inputPS04.txt")]
    input: PathBuf,

    /// File receiving one result per command
    #[arg(short, long, default_value = "outputPS04.txt")]
    output: PathBuf,

    /// Result format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write Graphviz renderings of both trees as `<path>.books.dot` and `<path>.patrons.dot`
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the recorded event history as a markdown table after the run
    #[arg(long)]
    history: bool,

    /// Number of catalog events kept in memory
    #[arg(long, default_value_t = CatalogConfig::default().history_limit)]
    history_limit: usize,

    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Default log filter for the requested verbosity
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "library_catalog=info",
            1 => "library_catalog=debug",
            _ => "library_catalog=trace",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut catalog =
        LibraryCatalog::with_config(CatalogConfig { history_limit: args.history_limit });
    catalog.register_observer(Box::new(TracingObserver));

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open command log {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("failed to create output file {}", args.output.display()))?;

    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "processing command log"
    );
    let summary = process_log(
        &mut catalog,
        BufReader::new(input),
        BufWriter::new(output),
        args.format,
    )
    .context("failed to process command log")?;

    let book_stats = TreeStats::of(catalog.books().tree());
    let patron_stats = TreeStats::of(catalog.patrons().tree());
    tracing::debug!(books = %book_stats, patrons = %patron_stats, "tree shapes");
    for (name, stats) in [("book", book_stats), ("patron", patron_stats)] {
        if stats.is_degenerate() {
            tracing::warn!(%stats, "{name} tree has degenerated into a list");
        }
    }

    if let Some(base) = &args.dot {
        let books_path = base.with_extension("books.dot");
        let patrons_path = base.with_extension("patrons.dot");
        TreeVisualization::save_dot_to_file(
            &TreeVisualization::book_dot(catalog.books()),
            &books_path,
        )
        .with_context(|| format!("failed to write {}", books_path.display()))?;
        TreeVisualization::save_dot_to_file(
            &TreeVisualization::patron_dot(catalog.patrons()),
            &patrons_path,
        )
        .with_context(|| format!("failed to write {}", patrons_path.display()))?;
    }

    if args.history {
        println!("{}", TreeVisualization::history_table(catalog.history()));
    }

    let counts = format!(
        "{} ok, {} refused, {} malformed",
        summary.succeeded, summary.refused, summary.malformed
    );
    let painted =
        if summary.malformed > 0 { counts.as_str().yellow() } else { counts.as_str().green() };
    eprintln!(
        "{} {} commands -> {} ({painted}); books: {book_stats}; patrons: {patron_stats}",
        "Done:".bold(),
        summary.total(),
        args.output.display()
    );

    Ok(())
}
