use anyhow::{Context, Result};
use clap::Parser;
use eight_puzzle_solver::engine::{Game, Move};
use eight_puzzle_solver::heuristics::EvaluatorKind;
use eight_puzzle_solver::utils::{init_tracing, scrambled_board_with_seed};
use eight_puzzle_solver::BoardState;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the 8-puzzle in the terminal", long_about = None)]
struct Args {
    /// Seed for the starting scramble
    #[clap(long, default_value_t = 514514)]
    seed: u64,

    /// Random blank slides applied to the goal to build the starting board
    #[clap(long, default_value_t = 20)]
    scramble_moves: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(false);

    let goal = BoardState::goal();
    let initial = scrambled_board_with_seed(&goal, args.scramble_moves, args.seed);
    let mut game = Game::new_with_board(initial, goal);
    println!("Welcome to the 8-puzzle!");
    println!("Move the blank with u/d/l/r, 'z' to undo, 'h' for a hint, 'q' to quit.");

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.board());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("Solved!");
            println!("Total Steps: {}", game.steps());
            println!("---------------------");
            break;
        }

        print!("Enter your move: ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input).context("Failed to read input")? == 0 {
            break;
        }

        let trimmed_input = input.trim();
        let mut chars = trimmed_input.chars();
        let (Some(command), None) = (chars.next(), chars.next()) else {
            println!("Invalid input format. Use one of u, d, l, r, z, h or q.");
            continue;
        };

        match command {
            'q' => {
                println!("Thanks for playing!");
                break;
            }
            'z' => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (no moves made).");
                }
            }
            'h' => match game.hint(EvaluatorKind::ManhattanDistance) {
                Some(m) => println!("Hint: move the blank {}.", m),
                None => println!("No hint available."),
            },
            _ => match Move::from_char(command) {
                Some(m) => {
                    if game.process_move(m) {
                        println!("Moved the blank {}.", m);
                    } else {
                        println!("Invalid move: the blank cannot move {} from here.", m);
                    }
                }
                None => println!("Unknown command '{}'.", command),
            },
        }
    }

    Ok(())
}
