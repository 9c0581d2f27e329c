//! An agent to find the best move in N×N tic-tac-toe

use crate::{
    board::*,
    config::SearchConfig,
    error::{Error, Result},
    evaluator::{evaluate, Evaluation},
    parallel,
    winning_lines::LineCache,
};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Score of a line won by the searching player
pub const WIN_SCORE: i32 = 1;
/// Score of a line won by the opponent
pub const LOSS_SCORE: i32 = -1;
/// Score of a tied line, or one cut off by the depth limit
pub const DRAW_SCORE: i32 = 0;
/// Score reported for the opening move, which is played without search
pub const INFINITE_SCORE: i32 = i32::MAX;

// Search values fold the distance to a decided line into the score: a win at
// depth d is worth `DECISIVE_VALUE - d` and a loss `d - DECISIVE_VALUE`, so
// the maximizer prefers faster wins and slower losses, and the minimizer the
// reverse. Draws stay at 0. Board depths never come close to this bound.
const DECISIVE_VALUE: i32 = 1 << 20;

/// A root candidate and its search result
///
/// `depth` counts plies from the current position, the candidate itself being
/// ply 1, to the position that decided the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub index: usize,
    pub score: i32,
    pub depth: usize,
}

impl ScoredMove {
    /// True if the move wins on the spot
    pub fn is_immediate_win(&self) -> bool {
        self.score == WIN_SCORE && self.depth == 1
    }
}

/// The cell played on an empty board
///
/// This is cell (⌈N/2⌉-1, ⌈N/2⌉-1), the true center for odd sizes. Even sizes
/// have no center cell and get the top-left cell of the central 2x2 block.
pub fn opening_move(size: usize) -> usize {
    let half = (size + 1) / 2;
    half * size - (size - half) - 1
}

/// One depth-first search scoring positions for `player`
///
/// The board handed to the search is mutated while a line is explored and
/// restored before moving on to the next one, so it is unchanged once the
/// search returns.
pub(crate) struct Search {
    player: Player,
    max_depth: Option<usize>,
    pruning: bool,
    pub node_count: usize,
}

impl Search {
    pub fn new(player: Player, max_depth: Option<usize>, pruning: bool) -> Self {
        Self {
            player,
            max_depth,
            pruning,
            node_count: 0,
        }
    }

    /// Scores playing `index` on `board`
    pub fn score_move(&mut self, board: &mut BoardState, index: usize) -> ScoredMove {
        board.set(index, self.player.into());
        let scored = self.score_placed(board, index);
        board.set(index, Cell::Empty);
        scored
    }

    /// Scores a board where `index` has already been played
    pub fn score_placed(&mut self, board: &mut BoardState, index: usize) -> ScoredMove {
        let (value, depth) = self.alpha_beta(board, 1, i32::MIN, i32::MAX, false);
        ScoredMove {
            index,
            score: value.signum(),
            depth,
        }
    }

    fn depth_capped(&self, depth: usize) -> bool {
        self.max_depth.map_or(false, |max_depth| depth >= max_depth)
    }

    /// Performs game tree search
    ///
    /// Returns the value of the position for `self.player` and the depth at
    /// which the line chosen under best play is decided. Decided lines are
    /// exact in both; a draw reports the depth of the first drawing line.
    fn alpha_beta(
        &mut self,
        board: &mut BoardState,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, usize) {
        self.node_count += 1;

        if board.is_win(self.player) {
            return (DECISIVE_VALUE - depth as i32, depth);
        }
        if board.is_win(self.player.opponent()) {
            return (depth as i32 - DECISIVE_VALUE, depth);
        }
        if board.is_tie() || self.depth_capped(depth) {
            return (DRAW_SCORE, depth);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.player.opponent()
        };
        let mut best = if maximizing {
            (i32::MIN, depth)
        } else {
            (i32::MAX, depth)
        };

        for index in board.empty_cells() {
            board.set(index, mover.into());
            let (value, reached) = self.alpha_beta(board, depth + 1, alpha, beta, !maximizing);
            board.set(index, Cell::Empty);

            if maximizing {
                if value > best.0 {
                    best = (value, reached);
                }
                alpha = alpha.max(value);
            } else {
                if value < best.0 {
                    best = (value, reached);
                }
                beta = beta.min(value);
            }
            // the other player already has a better option elsewhere in the tree
            if self.pruning && beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Picks the best of the root candidates, which must arrive in ascending cell order
///
/// Higher scores win, then fewer plies to resolution, then the higher static
/// weight, then the lower cell. An immediate win is taken as soon as it is seen
/// and the remaining candidates are never pulled from the iterator.
pub(crate) fn select<I>(candidates: I, evaluation: &Evaluation) -> Option<ScoredMove>
where
    I: IntoIterator<Item = ScoredMove>,
{
    let mut best: Option<ScoredMove> = None;
    for candidate in candidates {
        debug!(
            index = candidate.index,
            score = candidate.score,
            depth = candidate.depth,
            "scored candidate"
        );
        if candidate.is_immediate_win() {
            return Some(candidate);
        }
        let better = match best {
            None => true,
            Some(current) => match candidate.score.cmp(&current.score) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match candidate.depth.cmp(&current.depth) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => {
                        evaluation.weight(candidate.index) > evaluation.weight(current.index)
                    }
                },
            },
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// An agent to pick moves in N×N tic-tac-toe positions
///
/// # Notes
/// Every legal move is scored by a minimax search with alpha-beta pruning,
/// optionally cut off after a number of plies. On boards up to 3x3 the full
/// game tree is small enough to search, giving perfect play; larger boards
/// need a depth limit.
///
/// # Position Scoring
/// A move scores [`WIN_SCORE`] if the mover can force a win, [`LOSS_SCORE`] if
/// the opponent can, and [`DRAW_SCORE`] otherwise. Scores reached under a
/// depth limit only cover the lines searched: a draw may hide a forced result
/// just beyond the limit.
#[derive(Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    lines: LineCache,
    pool: Arc<ThreadPool>,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchEngine {
    /// Creates a new `SearchEngine` with its own line cache
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_line_cache(config, LineCache::new())
    }

    /// Creates a new `SearchEngine` sharing an existing line cache
    pub fn with_line_cache(config: SearchConfig, lines: LineCache) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("search-{}", i))
            .build()?;
        debug!(
            threads = pool.current_num_threads(),
            "built search thread pool"
        );
        Ok(Self {
            config,
            lines,
            pool: Arc::new(pool),
            node_count: 0,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn line_cache(&self) -> &LineCache {
        &self.lines
    }

    /// Creates an empty board through this engine's line cache
    pub fn new_board(&self, size: usize) -> Result<BoardState> {
        self.lines.new_board(size)
    }

    /// Finds and plays the best move for `player` using the configured depth
    /// limit and parallelism
    pub fn choose_move(&mut self, state: &mut BoardState, player: Player) -> Result<ScoredMove> {
        let SearchConfig {
            max_depth,
            parallel,
            ..
        } = self.config;
        self.best_move(state, player, max_depth, parallel)
    }

    /// Finds the best move for `player` and plays it on `state`
    ///
    /// `player` does not have to be the side to move: the engine answers what
    /// `player` should do here and places that mark. An empty board gets
    /// [`opening_move`] with [`INFINITE_SCORE`] without searching.
    pub fn best_move(
        &mut self,
        state: &mut BoardState,
        player: Player,
        max_depth: Option<usize>,
        parallel: bool,
    ) -> Result<ScoredMove> {
        if state.is_terminal() {
            return Err(Error::GameAlreadyOver);
        }
        let start = Instant::now();

        let chosen = if state.is_empty_board() {
            ScoredMove {
                index: opening_move(state.size()),
                score: INFINITE_SCORE,
                depth: 0,
            }
        } else {
            let evaluation = evaluate(state, player);
            let pruning = self.config.pruning;
            let chosen = if parallel {
                let (candidates, nodes) =
                    parallel::score_candidates(&self.pool, state, player, max_depth, pruning);
                self.node_count += nodes;
                select(candidates, &evaluation)
            } else {
                let mut search = Search::new(player, max_depth, pruning);
                let moves = state.empty_cells();
                let chosen = select(
                    moves.into_iter().map(|index| search.score_move(state, index)),
                    &evaluation,
                );
                self.node_count += search.node_count;
                chosen
            };
            // a non-terminal board always has a candidate
            chosen.ok_or(Error::GameAlreadyOver)?
        };

        state.set(chosen.index, player.into());
        info!(
            player = %player,
            index = chosen.index,
            score = chosen.score,
            depth = chosen.depth,
            nodes = self.node_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "selected move"
        );
        Ok(chosen)
    }

    /// Scores every legal move for `player` without playing any of them
    ///
    /// Unlike [`best_move`](SearchEngine::best_move) this never stops early and
    /// searches empty boards too. Candidates are returned in ascending cell
    /// order.
    pub fn analyse(&mut self, state: &BoardState, player: Player) -> Result<Vec<ScoredMove>> {
        if state.is_terminal() {
            return Err(Error::GameAlreadyOver);
        }
        let SearchConfig {
            max_depth,
            parallel,
            pruning,
            ..
        } = self.config;

        if parallel {
            let (candidates, nodes) =
                parallel::score_candidates(&self.pool, state, player, max_depth, pruning);
            self.node_count += nodes;
            return Ok(candidates);
        }

        let mut board = state.copy();
        let mut search = Search::new(player, max_depth, pruning);
        let candidates = state
            .empty_cells()
            .into_iter()
            .map(|index| search.score_move(&mut board, index))
            .collect();
        self.node_count += search.node_count;
        Ok(candidates)
    }
}
