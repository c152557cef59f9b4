//! Fixed-depth minimax search with alpha-beta pruning

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    board::{Grid, Piece},
    MAX_DEPTH,
};

/// Position scores, wide enough for the win score plus any heuristic value
pub type Score = i32;

/// The score of a position won by the searching side
pub const WIN_SCORE: Score = 1_000_000;
/// The score of a position won by the other side
pub const LOSS_SCORE: Score = -WIN_SCORE;
/// The score of a full board with no winner
pub const DRAW_SCORE: Score = 0;

/// How the search picks between columns with equal scores
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the lowest column that reached the best score
    #[default]
    FirstBest,
    /// Pick uniformly among all columns that reached the best score
    RandomAmongBest,
}

/// An agent that picks moves by minimax search
///
/// # Scoring
/// Scores are always from the point of view of the searching side (the
/// maximizing piece). A terminal position is worth [`WIN_SCORE`], [`LOSS_SCORE`]
/// or [`DRAW_SCORE`]; a position at the depth limit is worth its heuristic
/// evaluation for the searching side.
///
/// # Tie breaks
/// With [`TieBreak::FirstBest`] the search is deterministic. With
/// [`TieBreak::RandomAmongBest`] ties are broken with the `Searcher`'s own
/// random source, so a seeded `Searcher` is still reproducible. The search
/// windows are widened by one under this policy so that every column in the
/// tie set carries its exact minimax score rather than a pruning bound.
pub struct Searcher<R = StdRng> {
    tie_break: TieBreak,
    rng: R,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher<StdRng> {
    /// Creates a deterministic `Searcher` that keeps the first best column
    pub fn new() -> Self {
        Self::with_tie_break(TieBreak::FirstBest)
    }

    /// Creates a `Searcher` with the given tie break, seeded from the OS
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self::with_rng(tie_break, StdRng::from_os_rng())
    }

    /// Creates a `Searcher` with a reproducible random source
    pub fn seeded(tie_break: TieBreak, seed: u64) -> Self {
        Self::with_rng(tie_break, StdRng::seed_from_u64(seed))
    }
}

impl Default for Searcher<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Searcher<R> {
    /// Creates a `Searcher` drawing tie breaks from `rng`
    pub fn with_rng(tie_break: TieBreak, rng: R) -> Self {
        Self {
            tie_break,
            rng,
            node_count: 0,
        }
    }

    /// Picks a column for `ai_piece` by searching `depth` plies ahead
    ///
    /// Returns `None` if the grid has no legal columns, leaving the caller
    /// to treat the position as a draw.
    ///
    /// # Panics
    /// Panics if `depth` is zero or above [`MAX_DEPTH`], if the two pieces
    /// are the same, or if the grid already contains a win.
    pub fn choose_move(
        &mut self,
        grid: &Grid,
        depth: u32,
        ai_piece: Piece,
        opponent_piece: Piece,
    ) -> Option<usize> {
        assert!(
            (1..=MAX_DEPTH).contains(&depth),
            "search depth {} must be between 1 and {}",
            depth,
            MAX_DEPTH
        );
        assert_eq!(
            opponent_piece,
            ai_piece.opponent(),
            "the searching side and its opponent must hold different pieces"
        );
        assert!(
            !grid.has_four_in_a_row(ai_piece) && !grid.has_four_in_a_row(opponent_piece),
            "cannot search a position that is already won"
        );

        if grid.legal_columns().is_empty() {
            debug!("no legal columns to search");
            return None;
        }

        let start = self.node_count;
        let (column, score) = self.search(grid, depth, Score::MIN, Score::MAX, true, ai_piece);
        debug!(
            ?column,
            score,
            depth,
            nodes = self.node_count - start,
            "search finished"
        );
        column
    }

    /// Searches `grid` to `depth` plies, returning the best column and its score
    ///
    /// `maximizing` is true when `ai_piece` is to move. The column is `None`
    /// when the node is a cutoff (depth exhausted or game over).
    pub fn search(
        &mut self,
        grid: &Grid,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        ai_piece: Piece,
    ) -> (Option<usize>, Score) {
        self.node_count += 1;

        let legal = grid.legal_columns();
        if grid.is_terminal() {
            let score = if grid.has_four_in_a_row(ai_piece) {
                WIN_SCORE
            } else if grid.has_four_in_a_row(ai_piece.opponent()) {
                LOSS_SCORE
            } else {
                DRAW_SCORE
            };
            return (None, score);
        }
        if depth == 0 {
            return (None, grid.evaluate(ai_piece));
        }

        let to_move = if maximizing {
            ai_piece
        } else {
            ai_piece.opponent()
        };
        let mut best_score = if maximizing { Score::MIN } else { Score::MAX };
        let mut best_columns: Vec<usize> = Vec::with_capacity(legal.len());

        for column in legal.iter().copied() {
            // each child gets its own copy, siblings never share a grid
            let mut next = grid.copy();
            let row = match next.next_open_row(column) {
                Some(row) => row,
                None => unreachable!("legal column {} has no open row", column),
            };
            next.place(row, column, to_move);

            // a child that only matches the best score must come back exact to join the tie set
            let (child_alpha, child_beta) = match (self.tie_break, maximizing) {
                (TieBreak::FirstBest, _) => (alpha, beta),
                (TieBreak::RandomAmongBest, true) => (alpha.saturating_sub(1), beta),
                (TieBreak::RandomAmongBest, false) => (alpha, beta.saturating_add(1)),
            };
            let (_, score) = self.search(
                &next,
                depth - 1,
                child_alpha,
                child_beta,
                !maximizing,
                ai_piece,
            );

            let improves = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if improves {
                best_score = score;
                best_columns.clear();
                best_columns.push(column);
            } else if score == best_score {
                best_columns.push(column);
            }

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }
            // the other side will never allow this line, skip the remaining siblings
            if alpha >= beta {
                break;
            }
        }

        let best_column = match self.tie_break {
            TieBreak::FirstBest => best_columns.first().copied(),
            TieBreak::RandomAmongBest => best_columns.choose(&mut self.rng).copied(),
        }
        // only reachable below a non-terminal node, which always has a move
        .or_else(|| legal.first().copied());

        trace!(depth, maximizing, ?best_columns, best_score, "node searched");
        (best_column, best_score)
    }
}
