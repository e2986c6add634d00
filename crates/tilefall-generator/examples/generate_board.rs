//! Example demonstrating board generation.
//!
//! This example shows how to:
//! - Create a `GridGenerator` from a `GeneratorConfig`
//! - Generate a random board, or reproduce one from its seed
//! - Display the board, its seed, and how many legal moves it offers
//! - Search many seeds in parallel for the board with the fewest legal moves
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Reproduce a board:
//!
//! ```sh
//! cargo run --example generate_board -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```
//!
//! Find a tight board among 10000 candidates:
//!
//! ```sh
//! cargo run --example generate_board -- --hardest 10000
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use tilefall_core::{SymbolSet, count_moves};
use tilefall_generator::{BoardSeed, GeneratedBoard, GeneratorConfig, GridGenerator};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Side length of the board.
    #[arg(long, value_name = "N", default_value_t = 8)]
    size: u8,

    /// Number of distinct symbols.
    #[arg(long, value_name = "COUNT", default_value_t = 6)]
    symbols: u8,

    /// Seed to reproduce (64 hex digits).
    #[arg(long, value_name = "SEED", conflicts_with = "hardest")]
    seed: Option<BoardSeed>,

    /// Sample this many boards and keep the one with the fewest legal moves.
    #[arg(long, value_name = "COUNT")]
    hardest: Option<usize>,
}

fn main() {
    let args = Args::parse();
    let symbols = match SymbolSet::new(args.symbols) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };
    let generator = GridGenerator::new(GeneratorConfig {
        size: args.size,
        symbols,
        ..GeneratorConfig::default()
    });

    if let Some(seed) = args.seed {
        let mut board = generator.generate_with_seed(seed);
        let moves = count_moves(&mut board.grid);
        print_board(&board, moves);
        return;
    }

    let tries = args.hardest.unwrap_or(1);
    if tries == 0 {
        eprintln!("--hardest must be at least 1.");
        process::exit(1);
    }

    let best = (0..tries)
        .into_par_iter()
        .map(|_| {
            let mut board = generator.generate_seeded();
            let moves = count_moves(&mut board.grid);
            (board, moves)
        })
        .min_by_key(|(_, moves)| *moves);

    if let Some((board, moves)) = best {
        print_board(&board, moves);
    }
}

fn print_board(board: &GeneratedBoard, moves: usize) {
    println!("Seed:");
    println!("  {}", board.seed);
    println!();
    println!("Board:");
    for line in board.grid.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Legal moves: {moves}");
}
