use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use song_csv_converter::{SongConverter, DEFAULT_INPUT, DEFAULT_OUTPUT};

#[derive(clap::Parser, Debug)]
#[command(
    name = "song-csv-converter",
    about = "Converts a CSV file of song records into a JSON array"
)]
struct Args {
    /// Input CSV file path
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Output JSON file path ('-' for stdout)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Write a UTF-8 byte order mark before the JSON
    #[arg(long)]
    bom: bool,

    /// Print a summary to stderr when done
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let summary = SongConverter::new()
        .with_bom(args.bom)
        .convert(&args.input, &args.output)
        .with_context(|| {
            format!(
                "Failed to convert {} to {}",
                args.input.display(),
                args.output.display()
            )
        })?;

    if args.verbose {
        eprintln!(
            "Conversion complete! Wrote {} records to {}.",
            summary.records, summary.target
        );
    }

    Ok(())
}
