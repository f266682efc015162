//! Core board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: The four directions the blank can travel.
//! - `BoardState`: An immutable 3x3 arrangement of tiles with exactly one blank,
//!   plus successor generation, parity and rendering.
//! - `Game`: An interactive session over a board, with move history for undo
//!   and solver-backed hints.
use crate::error::{Error, Result};
use crate::heuristics::EvaluatorKind;
use crate::solver::{search, SearchOutcome};
use std::fmt;

/// Defines the size of the board (width and height). The 8-puzzle is always 3x3.
pub const BOARD_SIZE: usize = 3;

/// The tile label used for the blank cell.
pub const BLANK: u8 = 0;

/// The largest tile label on a 3x3 board.
pub const MAX_TILE: u8 = (BOARD_SIZE * BOARD_SIZE - 1) as u8;

/// A direction in which the blank travels.
///
/// Moving the blank `Up` is the same as sliding the tile above it down into the gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Right,
    Left,
}

impl Move {
    /// All moves in the fixed order successors are generated in.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Right, Move::Left];

    /// Returns the `(row, column)` delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
        }
    }

    /// Returns the move that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Right => Move::Left,
            Move::Left => Move::Right,
        }
    }

    /// Parses the single-letter commands used by the interactive player.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'u' => Some(Move::Up),
            'd' => Some(Move::Down),
            'r' => Some(Move::Right),
            'l' => Some(Move::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Right => "Right",
            Move::Left => "Left",
        };
        write!(f, "{}", s)
    }
}

/// An immutable 3x3 board of tiles labelled `0..=8`, where `0` is the blank.
///
/// Equality and hashing are structural. Every operation that "moves" a tile
/// returns a new `BoardState`; existing values are never modified, so a state
/// can be shared freely between search nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
    blank: (usize, usize),
}

impl BoardState {
    /// Creates a board from a grid, validating that it holds each of `0..=8` exactly once.
    ///
    /// # Errors
    /// * `Error::TileOutOfRange` if a cell holds a value above 8.
    /// * `Error::BlankCount` if the grid does not contain exactly one blank.
    /// * `Error::DuplicateTile` if a non-blank tile appears twice.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::BoardState;
    ///
    /// let board = BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
    /// assert_eq!(board.blank_position(), (1, 1));
    ///
    /// assert!(BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 0]]).is_err());
    /// ```
    pub fn new(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut seen = [false; BOARD_SIZE * BOARD_SIZE];
        let mut blanks = Vec::new();

        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value > MAX_TILE {
                    return Err(Error::TileOutOfRange { value, row: r, col: c });
                }
                if value == BLANK {
                    blanks.push((r, c));
                }
            }
        }

        if blanks.len() != 1 {
            return Err(Error::BlankCount {
                found: blanks.len(),
            });
        }

        for &value in grid.iter().flatten() {
            if seen[value as usize] {
                return Err(Error::DuplicateTile { value });
            }
            seen[value as usize] = true;
        }

        Ok(BoardState {
            grid,
            blank: blanks[0],
        })
    }

    /// Returns the canonical goal configuration, tiles in order with the blank last.
    ///
    /// ```text
    /// 1 2 3
    /// 4 5 6
    /// 7 8
    /// ```
    pub fn goal() -> Self {
        BoardState {
            grid: [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
            blank: (BOARD_SIZE - 1, BOARD_SIZE - 1),
        }
    }

    /// Returns the tile at row `r` and column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside `0..BOARD_SIZE`.
    pub fn tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    /// Returns an immutable reference to the underlying grid.
    pub fn rows(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Returns the `(row, column)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        self.blank
    }

    /// Returns the `(row, column)` of `tile`, or `None` if the label is not on the board.
    pub fn position_of(&self, tile: u8) -> Option<(usize, usize)> {
        self.cells()
            .find(|&(_, value)| value == tile)
            .map(|(pos, _)| pos)
    }

    /// Iterates over `((row, column), tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), u8)> + '_ {
        self.grid.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &value)| ((r, c), value))
        })
    }

    /// Returns the board reached by moving the blank in direction `movement`,
    /// or `None` if that would leave the grid. `self` is left untouched.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{BoardState, Move};
    ///
    /// let goal = BoardState::goal();
    /// assert!(goal.apply_move(Move::Down).is_none());
    ///
    /// let moved = goal.apply_move(Move::Left).unwrap();
    /// assert_eq!(moved.blank_position(), (2, 1));
    /// assert_eq!(moved.apply_move(Move::Right), Some(goal));
    /// ```
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        let (dr, dc) = movement.offset();
        let (br, bc) = self.blank;

        let new_r = br.checked_add_signed(dr).filter(|&r| r < BOARD_SIZE)?;
        let new_c = bc.checked_add_signed(dc).filter(|&c| c < BOARD_SIZE)?;

        let mut grid = self.grid;
        grid[br][bc] = grid[new_r][new_c];
        grid[new_r][new_c] = BLANK;

        Some(BoardState {
            grid,
            blank: (new_r, new_c),
        })
    }

    /// Generates every board reachable with one slide, paired with the move that produced it.
    ///
    /// Moves are tried in the order of [`Move::ALL`] (up, down, right, left) and
    /// moves that would push the blank off the grid are skipped, so the result
    /// holds two (corner), three (edge) or four (centre) entries.
    pub fn successors(&self) -> Vec<(Move, BoardState)> {
        Move::ALL
            .iter()
            .filter_map(|&m| self.apply_move(m).map(|next| (m, next)))
            .collect()
    }

    /// Like [`BoardState::successors`] but without the moves.
    pub fn successor_states(&self) -> Vec<BoardState> {
        self.successors().into_iter().map(|(_, next)| next).collect()
    }

    /// Returns the single slide that turns `self` into `other`, if there is one.
    pub fn move_between(&self, other: &BoardState) -> Option<Move> {
        Move::ALL
            .iter()
            .copied()
            .find(|&m| self.apply_move(m).as_ref() == Some(other))
    }

    /// Counts pairs of non-blank tiles that appear in reverse order when the
    /// board is read row by row.
    pub fn inversions(&self) -> usize {
        let flattened: Vec<u8> = self
            .grid
            .iter()
            .flatten()
            .copied()
            .filter(|&v| v != BLANK)
            .collect();

        flattened
            .iter()
            .enumerate()
            .map(|(i, &val)| flattened[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    /// Returns `true` if `goal` can be reached from `self`.
    ///
    /// On an odd-width board a slide never changes the parity of the inversion
    /// count, and any two boards of equal parity are connected.
    pub fn is_solvable_from(&self, goal: &BoardState) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    /// Renders the board as a 3x3 grid with the blank shown as a space.
    ///
    /// If `pos` is `Some((r, c))`, that cell is wrapped in brackets, which the
    /// solver output uses to point at the tile that just slid.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        for (r_idx, row) in self.grid.iter().enumerate() {
            for (c_idx, &value) in row.iter().enumerate() {
                let label = if value == BLANK {
                    ' '
                } else {
                    char::from(b'0' + value)
                };
                if pos == Some((r_idx, c_idx)) {
                    output.push('[');
                    output.push(label);
                    output.push(']');
                } else {
                    output.push(' ');
                    output.push(label);
                    output.push(' ');
                }
            }
            if r_idx < BOARD_SIZE - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// An interactive session: a board being solved by hand toward a goal.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{BoardState, Game, Move};
///
/// let start = BoardState::new([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// let mut game = Game::new_with_board(start, BoardState::goal());
///
/// assert!(!game.process_move(Move::Down)); // blank is already on the bottom row
/// assert!(game.process_move(Move::Right));
/// assert!(game.is_solved());
///
/// assert!(game.undo_last_move());
/// assert_eq!(game.board(), &start);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: BoardState,
    goal: BoardState,
    history: Vec<(BoardState, Move)>,
}

impl Game {
    /// Creates a session starting from `initial_board` and aiming for `goal`.
    pub fn new_with_board(initial_board: BoardState, goal: BoardState) -> Self {
        Game {
            board: initial_board,
            goal,
            history: Vec::new(),
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the goal board.
    pub fn goal(&self) -> &BoardState {
        &self.goal
    }

    /// Returns the number of moves made so far (undone moves are not counted).
    pub fn steps(&self) -> usize {
        self.history.len()
    }

    /// Returns the moves made so far, oldest first.
    pub fn moves(&self) -> Vec<Move> {
        self.history.iter().map(|&(_, m)| m).collect()
    }

    /// Moves the blank in direction `movement`.
    ///
    /// # Returns
    /// * `true` if the move was legal and has been applied.
    /// * `false` if it would push the blank off the board; the game is unchanged.
    pub fn process_move(&mut self, movement: Move) -> bool {
        match self.board.apply_move(movement) {
            Some(next) => {
                self.history.push((self.board, movement));
                self.board = next;
                true
            }
            None => false,
        }
    }

    /// Reverts the most recent move. Returns `false` if there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some((previous, _)) => {
                self.board = previous;
                true
            }
            None => false,
        }
    }

    /// Returns `true` once the current board equals the goal.
    pub fn is_solved(&self) -> bool {
        self.board == self.goal
    }

    /// Runs a search from the current board and returns the first move of the
    /// path it finds, or `None` if the game is already solved or unsolvable.
    pub fn hint(&self, kind: EvaluatorKind) -> Option<Move> {
        match search(self.board, self.goal, kind) {
            SearchOutcome::Solved { path, .. } => path
                .get(1)
                .and_then(|next| self.board.move_between(next)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(grid: [[u8; 3]; 3]) -> BoardState {
        BoardState::new(grid).unwrap()
    }

    #[test]
    fn test_goal_board() {
        let goal = BoardState::goal();
        assert_eq!(goal, board([[1, 2, 3], [4, 5, 6], [7, 8, 0]]));
        assert_eq!(goal.blank_position(), (2, 2));
        assert_eq!(goal.inversions(), 0);
    }

    #[test]
    fn test_new_rejects_out_of_range_tile() {
        let err = BoardState::new([[1, 2, 3], [4, 0, 6], [7, 9, 8]]).unwrap_err();
        assert_eq!(
            err,
            Error::TileOutOfRange {
                value: 9,
                row: 2,
                col: 1
            }
        );
        assert!(err.is_invalid_board());
    }

    #[test]
    fn test_new_rejects_wrong_blank_count() {
        assert_eq!(
            BoardState::new([[1, 2, 3], [4, 5, 6], [7, 8, 8]]).unwrap_err(),
            Error::BlankCount { found: 0 }
        );
        assert_eq!(
            BoardState::new([[1, 2, 3], [4, 0, 6], [7, 0, 8]]).unwrap_err(),
            Error::BlankCount { found: 2 }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_tile() {
        assert_eq!(
            BoardState::new([[1, 2, 3], [4, 0, 6], [7, 6, 8]]).unwrap_err(),
            Error::DuplicateTile { value: 6 }
        );
    }

    #[test]
    fn test_successor_counts_by_blank_position() {
        let corner = board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let edge = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);

        assert_eq!(corner.successors().len(), 2);
        assert_eq!(edge.successors().len(), 3);
        assert_eq!(centre.successors().len(), 4);
    }

    #[test]
    fn test_successors_follow_fixed_order() {
        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let moves: Vec<Move> = centre.successors().into_iter().map(|(m, _)| m).collect();
        assert_eq!(moves, vec![Move::Up, Move::Down, Move::Right, Move::Left]);

        let states = centre.successor_states();
        assert_eq!(states[0], board([[1, 0, 3], [4, 2, 5], [6, 7, 8]]));
        assert_eq!(states[1], board([[1, 2, 3], [4, 7, 5], [6, 0, 8]]));
        assert_eq!(states[2], board([[1, 2, 3], [4, 5, 0], [6, 7, 8]]));
        assert_eq!(states[3], board([[1, 2, 3], [0, 4, 5], [6, 7, 8]]));
    }

    #[test]
    fn test_successors_do_not_modify_source() {
        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let copy = centre;
        let _ = centre.successors();
        assert_eq!(centre, copy);
    }

    #[test]
    fn test_move_then_inverse_is_identity() {
        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        for m in Move::ALL {
            let moved = centre.apply_move(m).unwrap();
            assert_ne!(moved, centre);
            assert_eq!(moved.apply_move(m.opposite()), Some(centre), "{}", m);
        }
    }

    #[test]
    fn test_move_between() {
        let start = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let next = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(start.move_between(&next), Some(Move::Down));
        assert_eq!(next.move_between(&start), Some(Move::Up));
        assert_eq!(start.move_between(&BoardState::goal()), None);
        assert_eq!(start.move_between(&start), None);
    }

    #[test]
    fn test_position_of() {
        let start = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert_eq!(start.position_of(5), Some((2, 1)));
        assert_eq!(start.position_of(BLANK), Some((1, 1)));
        assert_eq!(start.position_of(9), None);
    }

    #[test]
    fn test_parity() {
        let goal = BoardState::goal();
        let swapped = board([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable_from(&goal));

        let reachable = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert!(reachable.is_solvable_from(&goal));
    }

    #[test]
    fn test_display_board_formatting() {
        let start = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert_eq!(start.to_string(), " 1  2  3 \n 4     6 \n 7  5  8 ");
        assert_eq!(
            start.to_string_with_highlight(Some((2, 1))),
            " 1  2  3 \n 4     6 \n 7 [5] 8 "
        );
    }

    #[test]
    fn test_move_from_char() {
        assert_eq!(Move::from_char('u'), Some(Move::Up));
        assert_eq!(Move::from_char('L'), Some(Move::Left));
        assert_eq!(Move::from_char('x'), None);
    }

    #[test]
    fn test_game_undo_multiple_moves() {
        let start = BoardState::goal();
        let mut game = Game::new_with_board(start, BoardState::goal());
        assert!(game.is_solved());
        assert!(!game.undo_last_move());

        assert!(game.process_move(Move::Up));
        assert!(game.process_move(Move::Left));
        assert_eq!(game.steps(), 2);
        assert_eq!(game.moves(), vec![Move::Up, Move::Left]);
        assert!(!game.is_solved());

        assert!(game.undo_last_move());
        assert!(game.undo_last_move());
        assert_eq!(game.steps(), 0);
        assert!(game.is_solved());
    }

    #[test]
    fn test_game_hint_leads_toward_goal() {
        let start = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let mut game = Game::new_with_board(start, BoardState::goal());

        let first = game.hint(EvaluatorKind::ManhattanDistance).unwrap();
        assert_eq!(first, Move::Down);
        assert!(game.process_move(first));

        let second = game.hint(EvaluatorKind::ManhattanDistance).unwrap();
        assert!(game.process_move(second));
        assert!(game.is_solved());
        assert_eq!(game.hint(EvaluatorKind::ManhattanDistance), None);
    }
}
