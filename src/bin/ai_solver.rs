use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle_solver::heuristics::EvaluatorKind;
use eight_puzzle_solver::solver::{search_with_config, SearchConfig, SearchOutcome, SearchStats};
use eight_puzzle_solver::utils::{init_tracing, parse_board, read_board_file};
use eight_puzzle_solver::BoardState;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_INITIAL: &str = "413/285/076";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Heuristic mode: F1 (misplaced tiles), F2 (misplaced rows/columns) or
    /// F3 (Manhattan distance). Omit for uniform-cost search.
    #[clap(value_parser = EvaluatorKind::from_str)]
    mode: Option<EvaluatorKind>,

    /// Path to a board file (three rows of three tiles, 0 for the blank)
    #[clap(short, long, conflicts_with = "initial")]
    board: Option<PathBuf>,

    /// Initial board as nine tiles, e.g. "123/406/758"
    #[clap(short, long, value_parser = parse_board)]
    initial: Option<BoardState>,

    /// Goal board, defaults to "123/456/780"
    #[clap(short, long, value_parser = parse_board)]
    goal: Option<BoardState>,

    /// Give up after this many milliseconds
    #[clap(long)]
    timeout_ms: Option<u64>,

    /// Skip the parity pre-check and rely on exhausting the frontier
    #[clap(long)]
    no_parity_check: bool,

    /// Log search progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn print_summary(stats: &SearchStats, wall_clock: Duration) {
    println!("Nodes visited: {}", stats.visited_count);
    println!("Nodes generated: {}", stats.generated);
    println!("Peak frontier size: {}", stats.max_frontier_size);
    println!("Time: {:.3} ms", wall_clock.as_secs_f64() * 1000.0);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let initial = match (&args.board, args.initial) {
        (Some(path), _) => read_board_file(path)
            .with_context(|| format!("Failed to read board from file: {}", path.display()))?,
        (None, Some(board)) => board,
        (None, None) => parse_board(DEFAULT_INITIAL).context("Invalid built-in board")?,
    };
    let goal = args.goal.unwrap_or_else(BoardState::goal);
    let evaluator = args.mode.unwrap_or_default();
    let config = SearchConfig {
        check_parity: !args.no_parity_check,
        deadline: args.timeout_ms.map(Duration::from_millis),
        ..SearchConfig::default()
    };
    debug!(?config, "parsed arguments");

    println!("Initial board:\n{}\n", initial);
    println!("Goal board:\n{}\n", goal);
    println!("Searching with {}...\n", evaluator);

    let started = Instant::now();
    let outcome = search_with_config(initial, goal, evaluator, &config);
    let wall_clock = started.elapsed();

    match &outcome {
        SearchOutcome::Solved { path, cost, stats } => {
            println!("Solution found:\n");
            println!("Moves ({}):", cost);
            if *cost == 0 {
                println!("  No moves needed.");
            }
            for (i, pair) in path.windows(2).enumerate() {
                let (before, after) = (&pair[0], &pair[1]);
                let Some(blank_move) = before.move_between(after) else {
                    continue;
                };
                let slid_to = before.blank_position();
                println!(
                    "  Move {}: slide {} {}",
                    i + 1,
                    after.tile(slid_to.0, slid_to.1),
                    blank_move.opposite()
                );
                println!("{}\n", after.to_string_with_highlight(Some(slid_to)));
            }
            println!("Path length: {}", path.len());
            print_summary(stats, wall_clock);
        }
        SearchOutcome::Unsolvable { stats } => {
            println!("No solution: the goal cannot be reached from this board.\n");
            print_summary(stats, wall_clock);
        }
        SearchOutcome::TimedOut { stats } => {
            println!("Gave up: no solution found within the time limit.\n");
            print_summary(stats, wall_clock);
        }
    }

    Ok(())
}
