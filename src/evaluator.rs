//! A static, search-free evaluation of empty cells
//!
//! The evaluation never overrides a search result; it only separates root
//! candidates that search scored identically.

use std::collections::BTreeMap;

use crate::board::{BoardState, Cell, Player};

/// Weight given to a cell that stops the opponent completing a line
pub const BLOCK_WEIGHT: u32 = u32::MAX;

/// Heuristic weights of the empty cells of a position, higher is better
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    weights: BTreeMap<usize, u32>,
}

impl Evaluation {
    /// The weight of `index`, 0 for cells that are not empty
    pub fn weight(&self, index: usize) -> u32 {
        self.weights.get(&index).copied().unwrap_or(0)
    }

    /// Cells and weights in ascending cell order
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.weights.iter().map(|(&index, &weight)| (index, weight))
    }

    /// The highest weighted cell, preferring lower indices on ties
    pub fn best(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (index, weight) in self.iter() {
            match best {
                Some((_, best_weight)) if weight <= best_weight => {}
                _ => best = Some((index, weight)),
            }
        }
        best.map(|(index, _)| index)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Weighs every empty cell for `player`
///
/// A cell scores one point per line through it that holds no opponent mark.
/// A cell whose line is otherwise full of opponent marks scores
/// [`BLOCK_WEIGHT`].
pub fn evaluate(board: &BoardState, player: Player) -> Evaluation {
    let opponent = Cell::from(player.opponent());
    let cells = board.cells();

    let weights = board
        .empty_cells()
        .into_iter()
        .map(|index| {
            let mut weight = 0;
            for line in board.lines().through(index) {
                let opponent_marks = line.iter().filter(|&&i| cells[i] == opponent).count();
                if opponent_marks == 0 {
                    weight += 1;
                } else if opponent_marks == line.len() - 1 {
                    weight = BLOCK_WEIGHT;
                    break;
                }
            }
            (index, weight)
        })
        .collect();

    Evaluation { weights }
}
