use std::fmt;

use super::player::Token;
use super::scan::longest_run;
use crate::error::{CancelError, ConfigError, MoveError};

/// A board position as `(col, row)`. Row 0 is the bottom.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Numeric value of the cell: `+1` for Red, `-1` for Yellow, `0` when empty.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Red => 1,
            Cell::Yellow => -1,
        }
    }

    /// Character used when printing the board
    pub fn display(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Red => 'o',
            Cell::Yellow => 'x',
        }
    }

    /// The token occupying this cell, if any
    pub fn token(self) -> Option<Token> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Token::Red),
            Cell::Yellow => Some(Token::Yellow),
        }
    }
}

/// Which diagonal family a sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// `/` diagonals, constant `col - row`
    Up,
    /// `\` diagonals, constant `col + row`
    Down,
}

/// Gravity-filled connect-N grid.
///
/// Cells are stored column-major so a column is a contiguous slice ordered
/// bottom to top. The board records the first winning run it detects and
/// keeps it until the play is cancelled or the board is reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    nrows: usize,
    ncols: usize,
    winning_length: usize,
    columns: Vec<Vec<Cell>>,
    heights: Vec<usize>,
    remaining: usize,
    winner: Option<Token>,
    winning_cells: Vec<Position>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Fails when a dimension is zero, or when `winning_length` is zero or
    /// larger than both dimensions (no run could ever reach it).
    pub fn new(nrows: usize, ncols: usize, winning_length: usize) -> Result<Self, ConfigError> {
        if nrows == 0 || ncols == 0 {
            return Err(ConfigError::Validation(format!(
                "board dimensions must be > 0 (got {nrows}x{ncols})"
            )));
        }
        if winning_length == 0 || winning_length > nrows.max(ncols) {
            return Err(ConfigError::Validation(format!(
                "winning_length must be in 1..={} (got {winning_length})",
                nrows.max(ncols)
            )));
        }

        let board = Board {
            nrows,
            ncols,
            winning_length,
            columns: vec![vec![Cell::Empty; nrows]; ncols],
            heights: vec![0; ncols],
            remaining: nrows * ncols,
            winner: None,
            winning_cells: Vec::new(),
        };
        log::debug!(
            "created board nrows={} ncols={} winning_length={}",
            nrows,
            ncols,
            winning_length
        );
        Ok(board)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn winning_length(&self) -> usize {
        self.winning_length
    }

    /// Clear every cell and any recorded winner.
    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.fill(Cell::Empty);
        }
        self.heights.fill(0);
        self.remaining = self.nrows * self.ncols;
        self.reset_winner();
    }

    fn reset_winner(&mut self) {
        self.winner = None;
        self.winning_cells.clear();
    }

    /// Whether `(col, row)` lies on the board
    pub fn contains(&self, (col, row): Position) -> bool {
        col < self.ncols && row < self.nrows
    }

    /// Get the cell at a position. Panics when the position is off the board.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.columns[col][row]
    }

    /// Cells of a column, bottom to top
    pub fn column(&self, col: usize) -> &[Cell] {
        &self.columns[col]
    }

    /// Number of tokens stacked in a column
    pub fn height(&self, col: usize) -> usize {
        self.heights[col]
    }

    /// Columns that can still accept a token
    pub fn available_columns(&self) -> Vec<usize> {
        (0..self.ncols)
            .filter(|&col| self.heights[col] < self.nrows)
            .collect()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.remaining
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }

    /// A winner was found or no cell is left
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    pub fn winner(&self) -> Option<Token> {
        self.winner
    }

    pub fn winning_cells(&self) -> &[Position] {
        &self.winning_cells
    }

    /// Cells of row `row`, left to right, with their positions
    pub fn row(&self, row: usize) -> (Vec<Cell>, Vec<Position>) {
        self.line((0..self.ncols).map(|col| (col, row)).collect())
    }

    /// Cells of a diagonal, ordered by increasing column.
    ///
    /// For [`Diagonal::Up`] `shift` is `col - row`; for [`Diagonal::Down`]
    /// it is `col + row`. Shifts that miss the board yield empty sequences.
    pub fn diagonal(&self, diagonal: Diagonal, shift: isize) -> (Vec<Cell>, Vec<Position>) {
        let positions = (0..self.ncols)
            .filter_map(|col| {
                let row = match diagonal {
                    Diagonal::Up => col as isize - shift,
                    Diagonal::Down => shift - col as isize,
                };
                (row >= 0 && (row as usize) < self.nrows).then_some((col, row as usize))
            })
            .collect();
        self.line(positions)
    }

    fn line(&self, positions: Vec<Position>) -> (Vec<Cell>, Vec<Position>) {
        let cells = positions
            .iter()
            .map(|&(col, row)| self.get(col, row))
            .collect();
        (cells, positions)
    }

    /// Drop a token in a column, returns the row where it landed.
    ///
    /// Rejected plays leave the board untouched.
    pub fn play(&mut self, cell: Cell, col: usize) -> Result<usize, MoveError> {
        if col >= self.ncols {
            log::debug!("cannot play in column {col}: outside the board");
            return Err(MoveError::InvalidColumn {
                col,
                ncols: self.ncols,
            });
        }
        if cell == Cell::Empty {
            return Err(MoveError::InvalidToken);
        }

        let row = self.heights[col];
        if row >= self.nrows {
            log::debug!("cannot play in column {col}: column is full");
            return Err(MoveError::ColumnFull(col));
        }

        self.columns[col][row] = cell;
        self.heights[col] += 1;
        self.remaining -= 1;
        log::debug!("played {:?} at col={} row={}", cell, col, row);

        self.check_for_winner((col, row));
        Ok(row)
    }

    /// Undo the most recent play in a column.
    ///
    /// The top cell must hold `token`. Any recorded winner is cleared.
    pub fn cancel_play(&mut self, token: Cell, col: usize) -> Result<(), CancelError> {
        if col >= self.ncols {
            return Err(CancelError::InvalidColumn {
                col,
                ncols: self.ncols,
            });
        }
        let Some(expected) = token.token() else {
            return Err(CancelError::InvalidToken);
        };

        let height = self.heights[col];
        if height == 0 {
            return Err(CancelError::EmptyColumn(col));
        }
        let top = self.columns[col][height - 1];
        if top != token {
            return Err(CancelError::TokenMismatch {
                col,
                expected,
                found: top,
            });
        }

        self.columns[col][height - 1] = Cell::Empty;
        self.heights[col] -= 1;
        self.remaining += 1;
        self.reset_winner();
        Ok(())
    }

    /// Scan the column, row and both diagonals through `pos`, stopping at
    /// the first one holding a long enough run.
    fn check_for_winner(&mut self, (col, row): Position) {
        if self.winner.is_some() {
            return;
        }
        let sequences = [
            self.line((0..self.nrows).map(|r| (col, r)).collect()),
            self.row(row),
            self.diagonal(Diagonal::Up, col as isize - row as isize),
            self.diagonal(Diagonal::Down, (col + row) as isize),
        ];

        for (cells, positions) in sequences {
            let run = longest_run(&cells);
            if run.len() >= self.winning_length {
                self.winner = cells[run.start].token();
                self.winning_cells = positions[run].to_vec();
                log::debug!(
                    "found winner {:?} at {:?}",
                    self.winner,
                    self.winning_cells
                );
                return;
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.nrows).rev() {
            write!(f, "|")?;
            for col in 0..self.ncols {
                write!(f, "{}|", self.get(col, row).display())?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
