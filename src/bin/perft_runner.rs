//! Perft runner for validating the move generator from the command line.
//!
//! Usage:
//! `cargo run --release --bin perft_runner -- --depth 4`
//! `RUST_LOG=chess_core=trace cargo run --bin perft_runner -- --fen "<fen>" --depth 3 --divide`

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_core::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_core::move_generation::perft::{perft_divide, perft_parallel};
use chess_core::GameState;

#[derive(Debug, Parser)]
#[command(about = "Count legal move tree leaves from a position")]
struct Args {
    /// Position to start from.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// Plies to expand.
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below every root move.
    #[arg(long)]
    divide: bool,

    /// Worker threads for the root split.
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> chess_core::ChessResult<()> {
    let state = GameState::from_fen(&args.fen)?;

    if args.divide {
        let lines = perft_divide(&state, args.depth)?;
        for (mv, nodes) in &lines {
            println!("{mv}: {nodes}");
        }
        println!();
        println!("Moves: {}", lines.len());
        println!("Nodes: {}", lines.iter().map(|(_, nodes)| nodes).sum::<u64>());
        return Ok(());
    }

    let started = Instant::now();
    let counts = perft_parallel(&state, args.depth, args.threads)?;
    let elapsed = started.elapsed();
    let nps = counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9);

    println!("depth      {}", args.depth);
    println!("nodes      {}", counts.nodes);
    println!("captures   {}", counts.captures);
    println!("en passant {}", counts.en_passant);
    println!("castles    {}", counts.castles);
    println!("promotions {}", counts.promotions);
    println!("checks     {}", counts.checks);
    println!("checkmates {}", counts.checkmates);
    println!("time       {:.3}s ({nps:.0} nodes/s)", elapsed.as_secs_f64());
    Ok(())
}
