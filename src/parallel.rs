//! Root-level fan-out of the search over a worker pool

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::debug;

use crate::board::{BoardState, Player};
use crate::solver::{ScoredMove, Search};

/// Scores every empty cell of `board` for `player` on `pool`
///
/// Each candidate gets its own copy of the board with the move already
/// played, and its own search state, so workers share nothing mutable.
/// Results come back in ascending cell order whatever order the workers
/// finish in, along with the total number of nodes searched.
pub(crate) fn score_candidates(
    pool: &ThreadPool,
    board: &BoardState,
    player: Player,
    max_depth: Option<usize>,
    pruning: bool,
) -> (Vec<ScoredMove>, usize) {
    let children: Vec<(usize, BoardState)> = board
        .empty_cells()
        .into_iter()
        .map(|index| {
            let mut child = board.copy();
            child.set(index, player.into());
            (index, child)
        })
        .collect();

    debug!(
        candidates = children.len(),
        workers = pool.current_num_threads().min(children.len()),
        "scoring root candidates in parallel"
    );

    let mut results: Vec<(ScoredMove, usize)> = pool.install(|| {
        children
            .into_par_iter()
            .map(|(index, mut child)| {
                let mut search = Search::new(player, max_depth, pruning);
                let scored = search.score_placed(&mut child, index);
                (scored, search.node_count)
            })
            .collect()
    });
    results.sort_by_key(|(scored, _)| scored.index);

    let nodes: usize = results.iter().map(|(_, nodes)| nodes).sum();
    let candidates: Vec<ScoredMove> = results.into_iter().map(|(scored, _)| scored).collect();
    (candidates, nodes)
}
