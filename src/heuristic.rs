//! Static evaluation of non-terminal positions
//!
//! A position is scored by sliding a window of `WINDOW_LENGTH` cells over
//! every row, column and diagonal and summing a score for each window, plus
//! a bonus for tiles in the centre column.

use crate::{board::{Grid, Piece}, HEIGHT, WIDTH, WINDOW_LENGTH};

/// Bonus for each of the player's tiles in the centre column
pub const CENTER_BONUS: i32 = 3;
/// A complete alignment of the player's tiles
pub const FOUR_SCORE: i32 = 100;
/// Three of the player's tiles and one empty cell
pub const THREE_SCORE: i32 = 5;
/// Two of the player's tiles and two empty cells
pub const TWO_SCORE: i32 = 2;
/// Three of the opponent's tiles and one empty cell
pub const OPPONENT_THREE_PENALTY: i32 = -4;

/// Scores a single window of cells for `piece`
pub fn score_window(window: &[Option<Piece>; WINDOW_LENGTH], piece: Piece) -> i32 {
    let count = |cell: Option<Piece>| window.iter().filter(|&&c| c == cell).count();
    let own = count(Some(piece));
    let opponent = count(Some(piece.opponent()));
    let empty = count(None);

    let mut score = match (own, empty) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };
    if opponent == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Scores the whole grid for `piece`
pub fn evaluate(grid: &Grid, piece: Piece) -> i32 {
    let center = WIDTH / 2;
    let mut score = (0..HEIGHT)
        .filter(|&row| grid.cell(row, center) == Some(piece))
        .count() as i32
        * CENTER_BONUS;

    // collect the window starting at (row, column) and walking in (dy, dx)
    let window = |row: usize, column: usize, dy: isize, dx: usize| {
        let mut cells = [None; WINDOW_LENGTH];
        for (i, cell) in cells.iter_mut().enumerate() {
            let r = (row as isize + dy * i as isize) as usize;
            *cell = grid.cell(r, column + dx * i);
        }
        cells
    };

    // horizontal
    for row in 0..HEIGHT {
        for column in 0..=WIDTH - WINDOW_LENGTH {
            score += score_window(&window(row, column, 0, 1), piece);
        }
    }
    // vertical
    for column in 0..WIDTH {
        for row in 0..=HEIGHT - WINDOW_LENGTH {
            score += score_window(&window(row, column, 1, 0), piece);
        }
    }
    // diagonal /
    for row in 0..=HEIGHT - WINDOW_LENGTH {
        for column in 0..=WIDTH - WINDOW_LENGTH {
            score += score_window(&window(row, column, 1, 1), piece);
        }
    }
    // diagonal \, walking down from the top-left cell of the window
    for row in 0..=HEIGHT - WINDOW_LENGTH {
        for column in 0..=WIDTH - WINDOW_LENGTH {
            let top = row + WINDOW_LENGTH - 1;
            score += score_window(&window(top, column, -1, 1), piece);
        }
    }

    score
}
