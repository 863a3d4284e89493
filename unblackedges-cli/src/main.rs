use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bitgrid::pnm::{read_bit_grid, PbmWriter, PbmWriterConfig};
use bitgrid::{remove_black_edges, BitGrid};

/// Remove border-connected black regions from a PBM image and print it as plain PBM
#[derive(Parser)]
#[command(name = "unblackedges", version)]
struct Args {
    /// Input PBM file (plain or raw); reads stdin when omitted
    input: Option<PathBuf>,

    /// Comment written on the second line of the output
    #[arg(long, default_value = "Black Edges Removed")]
    comment: String,

    /// Maximum pixel values per output line
    #[arg(long, default_value_t = 35)]
    max_per_line: usize,

    /// Print flood-fill statistics as JSON on stderr
    #[arg(long)]
    stats: bool,

    /// Pretty-print the statistics JSON
    #[arg(long)]
    pretty: bool,
}

fn load_bitmap(input: Option<&PathBuf>) -> Result<BitGrid> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("unable to open file: {}", path.display()))?;
            read_bit_grid(BufReader::new(file))
                .with_context(|| format!("could not read PBM image: {}", path.display()))
        }
        None => read_bit_grid(io::stdin().lock()).context("could not read PBM image from stdin"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut grid = load_bitmap(args.input.as_ref())?;
    info!("read {}x{} bitmap", grid.width(), grid.height());

    let stats = remove_black_edges(&mut grid);
    info!("cleared {} black pixels from {} border seeds", stats.cleared, stats.seeded);

    let writer = PbmWriter::new(PbmWriterConfig {
        comment: args.comment,
        max_per_line: args.max_per_line,
    });
    writer
        .write(&grid, BufWriter::new(io::stdout().lock()))
        .context("failed to write PBM output")?;

    if args.stats {
        let json = if args.pretty {
            serde_json::to_string_pretty(&stats)?
        } else {
            serde_json::to_string(&stats)?
        };
        eprintln!("{json}");
    }

    Ok(())
}
