use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use travelproc::Outcome;
use travelproc::application::processor::TravelProcessor;
use travelproc::domain::ports::RecordSinkBox;
use travelproc::domain::record::EXPECTED_CONTENT_TYPE;
use travelproc::infrastructure::in_memory::DiscardSink;
use travelproc::infrastructure::ndjson::NdjsonSink;
use travelproc::interfaces::json::record_reader::{RecordReader, read_document};

type Payload = travelproc::error::Result<Vec<u8>>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input files of newline-delimited trip records (`-` for stdin)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Treat each input file as a single JSON record
    #[arg(long)]
    whole_file: bool,

    /// Write priced records here instead of stdout
    #[arg(long)]
    success: Option<PathBuf>,

    /// Write rejected records, unchanged, to this file. Dropped if not set.
    #[arg(long)]
    failure: Option<PathBuf>,

    /// Number of records transformed concurrently. Output order is kept only when 1.
    #[arg(long, default_value = "1")]
    concurrency: NonZeroUsize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).into_diagnostic()?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Lazily yields the payloads of one input, either per line or as one document.
fn payloads(path: &Path, whole_file: bool) -> Result<Box<dyn Iterator<Item = Payload>>> {
    let source = open_input(path)?;
    if whole_file {
        Ok(Box::new(std::iter::once(read_document(source))))
    } else {
        Ok(Box::new(RecordReader::new(source).records()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let success: RecordSinkBox = match &cli.success {
        Some(path) => Box::new(NdjsonSink::create(path).into_diagnostic()?),
        None => Box::new(NdjsonSink::stdout()),
    };
    let failure: RecordSinkBox = match &cli.failure {
        Some(path) => Box::new(NdjsonSink::create(path).into_diagnostic()?),
        None => Box::new(DiscardSink),
    };
    let processor = Arc::new(TravelProcessor::new(success, failure));
    let limit = cli.concurrency.get();

    let mut in_flight: JoinSet<travelproc::error::Result<Outcome>> = JoinSet::new();
    for input in &cli.inputs {
        debug!(input = %input.display(), content_type = EXPECTED_CONTENT_TYPE, "reading records");
        for payload in payloads(input, cli.whole_file)? {
            let payload = payload.into_diagnostic()?;
            if limit == 1 {
                processor.process_record(payload).await.into_diagnostic()?;
                continue;
            }
            if in_flight.len() >= limit
                && let Some(joined) = in_flight.join_next().await
            {
                joined.into_diagnostic()?.into_diagnostic()?;
            }
            let processor = Arc::clone(&processor);
            in_flight.spawn(async move { processor.process_record(payload).await });
        }
    }
    while let Some(joined) = in_flight.join_next().await {
        joined.into_diagnostic()?.into_diagnostic()?;
    }

    let summary = processor.finish().await.into_diagnostic()?;
    info!(
        "processed {} records ({} succeeded, {} failed)",
        summary.total(),
        summary.succeeded,
        summary.failed
    );

    Ok(())
}
