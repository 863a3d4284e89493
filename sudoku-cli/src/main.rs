use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bitgrid::sudoku::{check_board, read_board, Board};

/// Check a solved sudoku stored as a 9x9 PGM image with maxval 9
///
/// Exits 0 when the board is a valid solution and 1 otherwise.
#[derive(Parser)]
#[command(name = "sudoku", version)]
struct Args {
    /// Input PGM file; reads stdin when omitted
    input: Option<PathBuf>,
}

fn load_board(input: Option<&PathBuf>) -> Result<Board> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("trouble reading file: {}", path.display()))?;
            read_board(BufReader::new(file))
                .with_context(|| format!("could not read sudoku board: {}", path.display()))
        }
        None => read_board(io::stdin().lock()).context("could not read sudoku board from stdin"),
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let board = load_board(args.input.as_ref())?;

    match check_board(&board) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(violation) => {
            info!("not a solution: {violation}");
            Ok(ExitCode::FAILURE)
        }
    }
}
