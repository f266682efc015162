use anyhow::Result;
use clap::Parser;
use eight_puzzle_solver::heuristics::EvaluatorKind;
use eight_puzzle_solver::solver::{search, SearchOutcome, SearchStats};
use eight_puzzle_solver::utils::{init_tracing, scrambled_board_with_seed};
use eight_puzzle_solver::BoardState;
use std::collections::HashMap;
use tracing::warn;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search evaluators on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to solve
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Random blank slides applied to the goal to build each board
    #[clap(long, default_value_t = 20)]
    scramble_moves: usize,

    /// Log search progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let goal = BoardState::goal();
    let mut all_stats: HashMap<EvaluatorKind, Vec<SearchStats>> = HashMap::new();

    println!("Starting evaluator comparison for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial = scrambled_board_with_seed(&goal, args.scramble_moves, current_seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);
        println!("{}", initial);

        let mut costs = Vec::new();
        for kind in EvaluatorKind::ALL {
            match search(initial, goal, kind) {
                SearchOutcome::Solved { cost, stats, .. } => {
                    println!(
                        "  Evaluator: {:<4} Cost: {:<4} Visited: {:<8} Peak frontier: {:<8} Time: {:.2} ms",
                        kind.mode_token(),
                        cost,
                        stats.visited_count,
                        stats.max_frontier_size,
                        stats.elapsed.as_secs_f64() * 1000.0
                    );
                    costs.push(cost);
                    all_stats.entry(kind).or_default().push(stats);
                }
                other => {
                    warn!(evaluator = %kind, seed = current_seed, "scrambled board not solved: {:?}", other);
                }
            }
        }

        if costs.windows(2).any(|pair| pair[0] != pair[1]) {
            warn!(seed = current_seed, ?costs, "evaluators disagree on the optimal cost");
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    let mut averages: Vec<(EvaluatorKind, f64, f64)> = Vec::new();
    for kind in EvaluatorKind::ALL {
        let Some(runs) = all_stats.get(&kind).filter(|runs| !runs.is_empty()) else {
            println!("Evaluator {}: No runs recorded.", kind);
            continue;
        };
        let count = runs.len() as f64;
        let avg_visited = runs.iter().map(|s| s.visited_count as f64).sum::<f64>() / count;
        let avg_frontier = runs.iter().map(|s| s.max_frontier_size as f64).sum::<f64>() / count;
        averages.push((kind, avg_visited, avg_frontier));
    }

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (kind, avg_visited, avg_frontier) in averages {
        println!(
            "Evaluator {:<28}: Average visited = {:>10.1}, Average peak frontier = {:>10.1}",
            kind.to_string(),
            avg_visited,
            avg_frontier
        );
    }

    Ok(())
}
