//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the 8-puzzle (a 3x3 sliding-tile
//! board with one blank) and a best-first graph search that runs either as
//! uniform-cost search or as A* under one of three heuristics.
//!
//! It is used by three binaries:
//! - `ai_solver`: Takes a heuristic mode (`F1`, `F2`, `F3`, or none for uniform
//!   cost) and a board, then prints the solution path and search statistics.
//! - `heuristic_evaluator`: Compares the four evaluators over seeded random boards.
//! - `human_player`: Allows interactive play via the command line, with hints.
//!
//! ## Modules
//! - `engine`: The board representation (`BoardState`), blank moves (`Move`),
//!   successor generation, parity, and the interactive `Game`.
//! - `heuristics`: Misplaced tiles, misplaced rows/columns and Manhattan distance,
//!   plus `EvaluatorKind`, the closed set of evaluation functions.
//! - `frontier`: The stable open set and the closed set.
//! - `solver`: Search nodes, the node arena, path reconstruction and `search`.
//! - `utils`: Parsing boards from text and generating seeded scrambles.
//! - `error`: The crate's `Error` type.
//!
//! ```
//! use eight_puzzle_solver::{search, BoardState, EvaluatorKind, SearchOutcome};
//!
//! let start: BoardState = "123/406/758".parse().unwrap();
//! match search(start, BoardState::goal(), EvaluatorKind::ManhattanDistance) {
//!     SearchOutcome::Solved { cost, .. } => assert_eq!(cost, 2),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{BoardState, Move};
pub use error::{Error, Result};
pub use heuristics::EvaluatorKind;
pub use solver::{search, search_with_config, SearchConfig, SearchOutcome, SearchStats};
