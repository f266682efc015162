//! Heuristics and evaluation functions that order the search frontier.
//!
//! Each heuristic estimates how far a board is from the goal. An [`EvaluatorKind`]
//! combines the path cost of a node with one of them (or none, for uniform-cost
//! search) into the score the open set is ordered by.
use crate::engine::{BoardState, BLANK, BOARD_SIZE};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Goal row and column of every tile, precomputed once per search.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::BoardState;
/// use eight_puzzle_solver::heuristics::GoalLayout;
///
/// let layout = GoalLayout::new(&BoardState::goal());
/// assert_eq!(layout.position(1), (0, 0));
/// assert_eq!(layout.position(0), (2, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoalLayout {
    board: BoardState,
    positions: [(usize, usize); BOARD_SIZE * BOARD_SIZE],
}

impl GoalLayout {
    pub fn new(goal: &BoardState) -> Self {
        let mut positions = [(0, 0); BOARD_SIZE * BOARD_SIZE];
        for (pos, tile) in goal.cells() {
            positions[tile as usize] = pos;
        }
        GoalLayout {
            board: *goal,
            positions,
        }
    }

    /// Returns the goal board this layout was built from.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the `(row, column)` that `tile` occupies in the goal.
    ///
    /// # Panics
    /// Panics if `tile` is larger than 8.
    pub fn position(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

/// Counts the non-blank tiles that are not on their goal cell.
///
/// Each such tile needs at least one slide, so the count never overestimates
/// the remaining cost. The blank is left out: counting it would score a board
/// one slide from the goal as 2.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::BoardState;
/// use eight_puzzle_solver::heuristics::{misplaced_tiles, GoalLayout};
///
/// let layout = GoalLayout::new(&BoardState::goal());
/// let board = BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
/// assert_eq!(misplaced_tiles(&board, &layout), 2);
/// ```
pub fn misplaced_tiles(board: &BoardState, goal: &GoalLayout) -> u32 {
    board
        .cells()
        .filter(|&(pos, tile)| tile != BLANK && goal.position(tile) != pos)
        .count() as u32
}

/// Counts, for each tile `1..=8`, whether its goal row of `board` lacks it and
/// whether its goal column of `board` lacks it (0 to 16 in total).
///
/// A tile's two penalties never exceed its Manhattan distance, so this is
/// admissible too, just less informed.
pub fn misplaced_lines_and_columns(board: &BoardState, goal: &GoalLayout) -> u32 {
    let mut penalties = 0;
    for (_, tile) in board.cells() {
        if tile == BLANK {
            continue;
        }
        let (goal_r, goal_c) = goal.position(tile);
        if !board.rows()[goal_r].contains(&tile) {
            penalties += 1;
        }
        if !(0..BOARD_SIZE).any(|row| board.tile(row, goal_c) == tile) {
            penalties += 1;
        }
    }
    penalties
}

/// Sums, over tiles `1..=8`, the row distance plus the column distance between
/// the tile's current cell and its goal cell.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::BoardState;
/// use eight_puzzle_solver::heuristics::{manhattan_distance, GoalLayout};
///
/// let layout = GoalLayout::new(&BoardState::goal());
/// let board = BoardState::new([[0, 2, 3], [4, 5, 6], [7, 8, 1]]).unwrap();
/// assert_eq!(manhattan_distance(&board, &layout), 4);
/// ```
pub fn manhattan_distance(board: &BoardState, goal: &GoalLayout) -> u32 {
    board
        .cells()
        .filter(|&(_, tile)| tile != BLANK)
        .map(|((r, c), tile)| {
            let (goal_r, goal_c) = goal.position(tile);
            (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32
        })
        .sum()
}

/// The evaluation function a search run orders its frontier by.
///
/// Selected once per run. Every variant is a pure function of the node's path
/// cost and board, so it can be evaluated any number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EvaluatorKind {
    /// `g(n)`: uniform-cost search.
    #[default]
    UniformCost,
    /// `g(n) + misplaced_tiles(n)` (mode `F1`).
    MisplacedTiles,
    /// `g(n) + misplaced_lines_and_columns(n)` (mode `F2`).
    MisplacedLinesAndColumns,
    /// `g(n) + manhattan_distance(n)` (mode `F3`).
    ManhattanDistance,
}

impl EvaluatorKind {
    /// All evaluators, from least to most informed.
    pub const ALL: [EvaluatorKind; 4] = [
        EvaluatorKind::UniformCost,
        EvaluatorKind::MisplacedTiles,
        EvaluatorKind::MisplacedLinesAndColumns,
        EvaluatorKind::ManhattanDistance,
    ];

    /// Maps an optional mode token to an evaluator; no token means uniform cost.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::heuristics::EvaluatorKind;
    ///
    /// assert_eq!(EvaluatorKind::from_mode(None).unwrap(), EvaluatorKind::UniformCost);
    /// assert_eq!(EvaluatorKind::from_mode(Some("F3")).unwrap(), EvaluatorKind::ManhattanDistance);
    /// assert!(EvaluatorKind::from_mode(Some("F4")).is_err());
    /// ```
    pub fn from_mode(token: Option<&str>) -> Result<Self, Error> {
        token.map_or(Ok(EvaluatorKind::UniformCost), |t| t.parse())
    }

    /// Returns the estimate of the remaining cost from `board` to the goal.
    pub fn heuristic(&self, board: &BoardState, goal: &GoalLayout) -> u32 {
        match self {
            EvaluatorKind::UniformCost => 0,
            EvaluatorKind::MisplacedTiles => misplaced_tiles(board, goal),
            EvaluatorKind::MisplacedLinesAndColumns => misplaced_lines_and_columns(board, goal),
            EvaluatorKind::ManhattanDistance => manhattan_distance(board, goal),
        }
    }

    /// Scores a node with path cost `cost` standing on `board`. Lower is better.
    pub fn score(&self, cost: u32, board: &BoardState, goal: &GoalLayout) -> u32 {
        cost + self.heuristic(board, goal)
    }

    /// Returns the mode token that selects this evaluator.
    pub fn mode_token(&self) -> &'static str {
        match self {
            EvaluatorKind::UniformCost => "UC",
            EvaluatorKind::MisplacedTiles => "F1",
            EvaluatorKind::MisplacedLinesAndColumns => "F2",
            EvaluatorKind::ManhattanDistance => "F3",
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().as_str() {
            "UC" | "UNIFORM" => Ok(EvaluatorKind::UniformCost),
            "F1" => Ok(EvaluatorKind::MisplacedTiles),
            "F2" => Ok(EvaluatorKind::MisplacedLinesAndColumns),
            "F3" => Ok(EvaluatorKind::ManhattanDistance),
            _ => Err(Error::UnknownEvaluator {
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvaluatorKind::UniformCost => "uniform cost",
            EvaluatorKind::MisplacedTiles => "misplaced tiles",
            EvaluatorKind::MisplacedLinesAndColumns => "misplaced rows/columns",
            EvaluatorKind::ManhattanDistance => "manhattan distance",
        };
        write!(f, "{} ({})", name, self.mode_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;

    fn goal_layout() -> GoalLayout {
        GoalLayout::new(&BoardState::goal())
    }

    #[test]
    fn test_heuristics_are_zero_at_goal() {
        let layout = goal_layout();
        let goal = BoardState::goal();
        assert_eq!(misplaced_tiles(&goal, &layout), 0);
        assert_eq!(misplaced_lines_and_columns(&goal, &layout), 0);
        assert_eq!(manhattan_distance(&goal, &layout), 0);
        for kind in EvaluatorKind::ALL {
            assert_eq!(kind.score(0, &goal, &layout), 0, "{}", kind);
        }
    }

    #[test]
    fn test_heuristics_positive_away_from_goal() {
        let layout = goal_layout();
        let mut board = BoardState::goal();
        for m in [Move::Up, Move::Left, Move::Up, Move::Left] {
            board = board.apply_move(m).unwrap();
            assert!(misplaced_tiles(&board, &layout) > 0);
            assert!(manhattan_distance(&board, &layout) > 0);
            assert!(manhattan_distance(&board, &layout) >= misplaced_tiles(&board, &layout));
        }
    }

    #[test]
    fn test_two_move_board_scores() {
        let layout = goal_layout();
        let board = BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
        assert_eq!(misplaced_tiles(&board, &layout), 2);
        // 5 is out of its goal row; 8 is out of its goal column.
        assert_eq!(misplaced_lines_and_columns(&board, &layout), 2);
        assert_eq!(manhattan_distance(&board, &layout), 2);

        assert_eq!(EvaluatorKind::UniformCost.score(3, &board, &layout), 3);
        assert_eq!(EvaluatorKind::MisplacedTiles.score(3, &board, &layout), 5);
        assert_eq!(EvaluatorKind::ManhattanDistance.score(3, &board, &layout), 5);
    }

    #[test]
    fn test_lines_and_columns_upper_bound() {
        let layout = goal_layout();
        // Every tile is moved off both its goal row and its goal column.
        let board = BoardState::new([[5, 6, 4], [8, 0, 7], [2, 3, 1]]).unwrap();
        assert_eq!(misplaced_lines_and_columns(&board, &layout), 16);
    }

    #[test]
    fn test_heuristics_respect_custom_goal() {
        let goal = BoardState::new([[1, 2, 3], [8, 0, 4], [7, 6, 5]]).unwrap();
        let layout = GoalLayout::new(&goal);
        assert_eq!(layout.board(), &goal);
        assert_eq!(misplaced_tiles(&goal, &layout), 0);
        assert_eq!(manhattan_distance(&goal, &layout), 0);

        let canonical = BoardState::goal();
        assert_eq!(misplaced_tiles(&canonical, &layout), 4);
    }

    #[test]
    fn test_mode_tokens() {
        assert_eq!("F1".parse::<EvaluatorKind>().unwrap(), EvaluatorKind::MisplacedTiles);
        assert_eq!(
            "f2".parse::<EvaluatorKind>().unwrap(),
            EvaluatorKind::MisplacedLinesAndColumns
        );
        assert_eq!("uniform".parse::<EvaluatorKind>().unwrap(), EvaluatorKind::UniformCost);
        assert_eq!(
            "F9".parse::<EvaluatorKind>().unwrap_err(),
            Error::UnknownEvaluator {
                token: "F9".to_string()
            }
        );
        for kind in EvaluatorKind::ALL {
            assert_eq!(kind.mode_token().parse::<EvaluatorKind>().unwrap(), kind);
        }
    }
}
