//! Turn handling around the authoritative game grid

use rand::Rng;
use tracing::{error, info};

use crate::{
    board::{GameOutcome, Grid, Piece},
    error::GameError,
    search::Searcher,
    WIDTH,
};

/// Who picks the moves for one side
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Controller {
    Human,
    Computer { depth: u32 },
}

/// A game in progress
///
/// Only confirmed moves reach the grid held here; the search works on its
/// own copies.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    to_move: Piece,
    controllers: [Controller; 2],
    player_one_moves: usize,
    outcome: GameOutcome,
    /// The moves played so far as one-indexed column digits
    pub history: String,
}

impl Game {
    /// Starts an empty game with `PlayerOne` to move
    pub fn new(player_one: Controller, player_two: Controller) -> Self {
        Self::starting_with(player_one, player_two, Piece::PlayerOne)
    }

    /// Starts an empty game with `first` to move
    pub fn starting_with(player_one: Controller, player_two: Controller, first: Piece) -> Self {
        Self {
            grid: Grid::new(),
            to_move: first,
            controllers: [player_one, player_two],
            player_one_moves: 0,
            outcome: GameOutcome::InProgress,
            history: String::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn controller(&self, piece: Piece) -> Controller {
        self.controllers[piece.number() - 1]
    }

    /// The number of tiles `PlayerOne` has dropped
    pub fn player_one_moves(&self) -> usize {
        self.player_one_moves
    }

    /// Plays a zero-indexed column for the side to move
    pub fn play_checked(&mut self, column: usize) -> Result<GameOutcome, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver);
        }
        if column >= WIDTH {
            return Err(GameError::ColumnOutOfRange { column });
        }
        let row = self
            .grid
            .drop_piece(column, self.to_move)
            .ok_or(GameError::ColumnFull { column })?;

        info!(
            player = self.to_move.number(),
            column = column + 1,
            row,
            "piece placed"
        );
        if self.to_move == Piece::PlayerOne {
            self.player_one_moves += 1;
        }
        self.history.push_str(&(column + 1).to_string());
        self.outcome = self.grid.outcome();
        self.to_move = self.to_move.opponent();

        if self.outcome.is_over() {
            info!(outcome = ?self.outcome, moves = self.grid.piece_count(), "game over");
        }
        Ok(self.outcome)
    }

    /// Lets `searcher` pick and play a move for the side to move
    ///
    /// A board with no legal columns, or a search result that is not legal,
    /// ends the game as a draw and returns `None`.
    pub fn computer_move<R: Rng>(
        &mut self,
        searcher: &mut Searcher<R>,
        depth: u32,
    ) -> Result<Option<usize>, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver);
        }
        let legal = self.grid.legal_columns();
        if legal.is_empty() {
            self.outcome = GameOutcome::Draw;
            return Ok(None);
        }

        let piece = self.to_move;
        match searcher.choose_move(&self.grid, depth, piece, piece.opponent()) {
            Some(column) if self.grid.is_valid_column(column) => {
                self.play_checked(column)?;
                Ok(Some(column))
            }
            column => {
                error!(?column, ?legal, "search returned an invalid move, declaring a draw");
                self.outcome = GameOutcome::Draw;
                Ok(None)
            }
        }
    }

    /// Plays computer moves until the game ends or a human is to move
    ///
    /// `searchers[0]` moves for `PlayerOne` and `searchers[1]` for `PlayerTwo`.
    pub fn advance<R: Rng>(
        &mut self,
        searchers: &mut [Searcher<R>; 2],
    ) -> Result<GameOutcome, GameError> {
        while !self.outcome.is_over() {
            match self.controller(self.to_move) {
                Controller::Human => break,
                Controller::Computer { depth } => {
                    let searcher = &mut searchers[self.to_move.number() - 1];
                    self.computer_move(searcher, depth)?;
                }
            }
        }
        Ok(self.outcome)
    }
}
