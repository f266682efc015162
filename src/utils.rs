use crate::engine::{BoardState, Move, BLANK, BOARD_SIZE};
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '/' || c == ','
}

/// Reads tile labels out of `s`, skipping separators.
fn parse_cells(s: &str) -> Result<Vec<u8>> {
    let mut cells = Vec::with_capacity(CELL_COUNT);
    for (position, character) in s.chars().enumerate() {
        if is_separator(character) {
            continue;
        }
        let value = match character {
            '0' | '.' | '_' => BLANK,
            '1'..='8' => character as u8 - b'0',
            _ => {
                return Err(Error::InvalidCellCharacter {
                    character,
                    position,
                    context: s.to_string(),
                })
            }
        };
        cells.push(value);
    }
    Ok(cells)
}

fn board_from_cells(cells: &[u8], context: &str) -> Result<BoardState> {
    if cells.len() != CELL_COUNT {
        return Err(Error::InvalidBoardLength {
            expected: CELL_COUNT,
            got: cells.len(),
            context: context.to_string(),
        });
    }

    let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
    for (i, &value) in cells.iter().enumerate() {
        grid[i / BOARD_SIZE][i % BOARD_SIZE] = value;
    }
    BoardState::new(grid)
}

/// Parses a whole board from one string.
///
/// The nine tiles are read in row-major order. `/`, `,` and whitespace are
/// ignored, and the blank may be written as `0`, `.` or `_`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::BoardState;
/// use eight_puzzle_solver::utils::parse_board;
///
/// let board = parse_board("123/4.6/758").unwrap();
/// assert_eq!(board, BoardState::new([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap());
/// assert_eq!(parse_board("1,2,3,4,5,6,7,8,0").unwrap(), BoardState::goal());
///
/// assert!(parse_board("12345678").is_err());
/// assert!(parse_board("123/456/789").is_err());
/// ```
pub fn parse_board(s: &str) -> Result<BoardState> {
    let cells = parse_cells(s)?;
    board_from_cells(&cells, s)
}

/// Parses a board given one string per row, top row first.
///
/// Each row must hold exactly three tiles, written as in [`parse_board`].
///
/// # Errors
/// * `Error::InvalidBoardLength` if a row does not hold three tiles or there are not three rows.
/// * `Error::InvalidCellCharacter` for anything other than a tile, blank or separator.
/// * Any of the `BoardState::new` validation errors.
pub fn board_from_str_array(rows: &[&str]) -> Result<BoardState> {
    let mut cells = Vec::with_capacity(CELL_COUNT);
    for row in rows {
        let row_cells = parse_cells(row)?;
        if row_cells.len() != BOARD_SIZE {
            return Err(Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: row_cells.len(),
                context: row.to_string(),
            });
        }
        cells.extend(row_cells);
    }
    board_from_cells(&cells, &rows.join("/"))
}

/// Reads a board file: three non-empty lines of three tiles each.
pub fn read_board_file(path: &Path) -> Result<BoardState> {
    let content = fs::read_to_string(path).map_err(|e| Error::BoardFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines)
}

impl FromStr for BoardState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_board(s)
    }
}

/// Walks the blank `moves` random slides away from `goal`, never undoing the
/// previous slide straight away. The result is always solvable toward `goal`.
pub fn scrambled_board<R: Rng + ?Sized>(goal: &BoardState, moves: usize, rng: &mut R) -> BoardState {
    let mut board = *goal;
    let mut last_move: Option<Move> = None;

    for _ in 0..moves {
        let candidates: Vec<(Move, BoardState)> = board
            .successors()
            .into_iter()
            .filter(|&(m, _)| Some(m.opposite()) != last_move)
            .collect();
        let (m, next) = candidates[rng.gen_range(0..candidates.len())];
        board = next;
        last_move = Some(m);
    }

    board
}

/// Same as [`scrambled_board`], using a `SmallRng` seeded with `seed` so the
/// same seed always yields the same board.
pub fn scrambled_board_with_seed(goal: &BoardState, moves: usize, seed: u64) -> BoardState {
    let mut rng = SmallRng::seed_from_u64(seed);
    scrambled_board(goal, moves, &mut rng)
}

/// Installs a stderr `tracing` subscriber for the binaries.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug output
/// from this crate when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,eight_puzzle_solver=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["413", "2 8 5", "_76"]).unwrap();
        assert_eq!(
            board,
            BoardState::new([[4, 1, 3], [2, 8, 5], [0, 7, 6]]).unwrap()
        );
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["123", "4X6", "780"]);
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidCellCharacter {
                character: 'X',
                position: 1,
                context: "4X6".to_string(),
            }
        );
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let result = board_from_str_array(&["1234", "56", "780"]);
        assert!(result.unwrap_err().to_string().contains("expected 3 cells, got 4"));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let result = board_from_str_array(&["123", "456", "780", "000"]);
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidBoardLength {
                expected: 9,
                got: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(board_from_str_array(&rows).is_err());
    }

    #[test]
    fn test_parse_board_rejects_duplicates() {
        let err = parse_board("123 456 788").unwrap_err();
        assert!(err.is_invalid_board());
        assert_eq!(err, Error::BlankCount { found: 0 });
        assert_eq!(
            parse_board("113 456 780").unwrap_err(),
            Error::DuplicateTile { value: 1 }
        );
    }

    #[test]
    fn test_from_str() {
        let board: BoardState = "123 456 780".parse().unwrap();
        assert_eq!(board, BoardState::goal());
    }

    #[test]
    fn test_read_board_file() {
        let path = std::env::temp_dir().join(format!("eight_puzzle_{}.txt", std::process::id()));
        fs::write(&path, "\n4 1 3\n2 8 5\n0 7 6\n\n").unwrap();
        let board = read_board_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            board,
            BoardState::new([[4, 1, 3], [2, 8, 5], [0, 7, 6]]).unwrap()
        );

        let missing = read_board_file(Path::new("/nonexistent/board.txt")).unwrap_err();
        assert!(matches!(missing, Error::BoardFile { .. }));
    }

    #[test]
    fn test_scrambled_board_is_solvable_and_seeded() {
        let goal = BoardState::goal();
        for seed in 0..20 {
            let board = scrambled_board_with_seed(&goal, 30, seed);
            assert!(board.is_solvable_from(&goal));
            assert_eq!(board, scrambled_board_with_seed(&goal, 30, seed));
        }
        assert_eq!(scrambled_board_with_seed(&goal, 0, 7), goal);
    }

    #[test]
    fn test_scrambled_board_single_move() {
        let goal = BoardState::goal();
        let board = scrambled_board_with_seed(&goal, 1, 42);
        assert!(goal.move_between(&board).is_some());
    }
}
