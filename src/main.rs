use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use wikishard::config::{ConfigOverrides, ExtractConfig};
use wikishard::extract::DumpExtractor;
use wikishard::logging;

#[derive(Parser)]
#[command(
    name = "wikishard",
    about = "Extract articles from a compressed Wikipedia XML dump into JSON-lines shards"
)]
struct Cli {
    /// Path to the bzip2-compressed XML dump (falls back to WIKISHARD_DUMP_PATH).
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory receiving the numbered shard files (default: output).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of accepted articles per shard file (default: 10000).
    #[arg(long)]
    pages_per_shard: Option<usize>,
    /// Stop after this many pages; useful for partial or trial runs.
    #[arg(long)]
    max_pages: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let cli = Cli::parse();
    let config = ExtractConfig::resolve(ConfigOverrides {
        dump_path: cli.input,
        output_dir: cli.output,
        pages_per_shard: cli.pages_per_shard,
        max_pages: cli.max_pages,
    })?;

    let summary = DumpExtractor::new(config).run()?;
    println!(
        "Extraction complete: {} pages processed, {} shards written",
        summary.pages_seen, summary.shards_written
    );
    Ok(())
}
