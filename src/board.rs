//! The game grid, move legality and win detection

use crate::{error::GameError, heuristic, HEIGHT, WIDTH, WINDOW_LENGTH};

/// A tile belonging to one of the two sides
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    PlayerOne,
    PlayerTwo,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::PlayerOne => Piece::PlayerTwo,
            Piece::PlayerTwo => Piece::PlayerOne,
        }
    }

    /// The one-indexed player number shown to users
    pub fn number(self) -> usize {
        match self {
            Piece::PlayerOne => 1,
            Piece::PlayerTwo => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameOutcome {
    InProgress,
    Win(Piece),
    Draw,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// A `WIDTH` x `HEIGHT` Connect 4 grid
///
/// Row 0 is the bottom of the board. The grid is a plain value: copying it
/// gives an independent board, which is what the search relies on when it
/// explores sibling moves.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Grid {
    cells: [Option<Piece>; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Builds a grid from a string of one-indexed columns, starting with `PlayerOne`
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self, GameError> {
        let mut grid = Self::new();
        let mut piece = Piece::PlayerOne;

        for (position, column_char) in moves.as_ref().chars().enumerate() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if grid.drop_piece(column - 1, piece).is_none() {
                        return Err(GameError::ColumnFull { column: column - 1 });
                    }
                    piece = piece.opponent();
                }
                _ => {
                    return Err(GameError::ParseMove {
                        position,
                        found: column_char,
                    })
                }
            }
        }
        Ok(grid)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Piece> {
        self.cells[column + WIDTH * row]
    }

    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Returns true if `column` is on the board and its top cell is free
    pub fn is_valid_column(&self, column: usize) -> bool {
        column < WIDTH && self.heights[column] < HEIGHT
    }

    /// The lowest empty row of `column`, or `None` if the column is full or off the board
    pub fn next_open_row(&self, column: usize) -> Option<usize> {
        match *self.heights.get(column)? {
            HEIGHT => None,
            row => Some(row),
        }
    }

    /// Sets a cell, panicking if the cell is taken or would leave the piece floating
    pub fn place(&mut self, row: usize, column: usize, piece: Piece) {
        assert!(
            self.cell(row, column).is_none(),
            "cell ({}, {}) is already occupied",
            row,
            column
        );
        assert_eq!(
            row, self.heights[column],
            "piece placed at row {} of column {} would float",
            row, column
        );
        self.cells[column + WIDTH * row] = Some(piece);
        self.heights[column] += 1;
    }

    /// Drops `piece` into `column`, returning the row it landed on
    pub fn drop_piece(&mut self, column: usize, piece: Piece) -> Option<usize> {
        if !self.is_valid_column(column) {
            return None;
        }
        let row = self.next_open_row(column)?;
        self.place(row, column, piece);
        Some(row)
    }

    /// Playable columns in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&c| self.is_valid_column(c)).collect()
    }

    pub fn has_four_in_a_row(&self, piece: Piece) -> bool {
        let owns = |row: usize, column: usize| self.cell(row, column) == Some(piece);
        let run = |row: usize, column: usize, dy: isize, dx: usize| {
            (0..WINDOW_LENGTH).all(|i| {
                let r = row as isize + dy * i as isize;
                owns(r as usize, column + dx * i)
            })
        };

        // horizontal
        for row in 0..HEIGHT {
            for column in 0..=WIDTH - WINDOW_LENGTH {
                if run(row, column, 0, 1) {
                    return true;
                }
            }
        }
        // vertical
        for row in 0..=HEIGHT - WINDOW_LENGTH {
            for column in 0..WIDTH {
                if run(row, column, 1, 0) {
                    return true;
                }
            }
        }
        // diagonal /
        for row in 0..=HEIGHT - WINDOW_LENGTH {
            for column in 0..=WIDTH - WINDOW_LENGTH {
                if run(row, column, 1, 1) {
                    return true;
                }
            }
        }
        // diagonal \
        for row in WINDOW_LENGTH - 1..HEIGHT {
            for column in 0..=WIDTH - WINDOW_LENGTH {
                if run(row, column, -1, 1) {
                    return true;
                }
            }
        }

        false
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == HEIGHT)
    }

    pub fn is_terminal(&self) -> bool {
        self.has_four_in_a_row(Piece::PlayerOne)
            || self.has_four_in_a_row(Piece::PlayerTwo)
            || self.is_full()
    }

    pub fn outcome(&self) -> GameOutcome {
        if self.has_four_in_a_row(Piece::PlayerOne) {
            GameOutcome::Win(Piece::PlayerOne)
        } else if self.has_four_in_a_row(Piece::PlayerTwo) {
            GameOutcome::Win(Piece::PlayerTwo)
        } else if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    /// Static heuristic score of the position from `piece`'s point of view
    pub fn evaluate(&self, piece: Piece) -> i32 {
        heuristic::evaluate(self, piece)
    }

    /// An independent copy of the grid
    pub fn copy(&self) -> Self {
        *self
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
