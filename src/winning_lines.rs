use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::board::BoardState;
use crate::error::{Error, Result};

/// Every line that wins the game on an N×N board
///
/// Rows come first (top to bottom), then columns (left to right), then the
/// main diagonal and the anti-diagonal, giving 2N+2 lines of N cells each.
#[derive(Debug, PartialEq, Eq)]
pub struct WinningLines {
    size: usize,
    lines: Vec<Vec<usize>>,
    // indices into `lines` for every cell
    through: Vec<Vec<usize>>,
}

impl WinningLines {
    pub fn new(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(Error::InvalidSize(size));
        }

        let mut lines: Vec<Vec<usize>> = Vec::with_capacity(2 * size + 2);
        for row in 0..size {
            lines.push((0..size).map(|column| row * size + column).collect());
        }
        for column in 0..size {
            lines.push((0..size).map(|row| row * size + column).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());

        let mut through = vec![Vec::new(); size * size];
        for (line_index, line) in lines.iter().enumerate() {
            for &cell in line.iter() {
                through[cell].push(line_index);
            }
        }

        trace!(size, lines = lines.len(), "computed winning lines");
        Ok(Self {
            size,
            lines,
            through,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// The lines passing through `cell`
    pub fn through(&self, cell: usize) -> impl Iterator<Item = &[usize]> {
        self.through
            .get(cell)
            .into_iter()
            .flatten()
            .map(move |&line| self.lines[line].as_slice())
    }
}

/// A size-keyed memo of [`WinningLines`] tables
///
/// Each table is computed the first time its size is requested and shared
/// read-only afterwards. Clones of a cache share the same storage, separate
/// caches never do.
#[derive(Clone, Default)]
pub struct LineCache {
    tables: Arc<Mutex<HashMap<usize, Arc<WinningLines>>>>,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, size: usize) -> Result<Arc<WinningLines>> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(&size) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(WinningLines::new(size)?);
        tables.insert(size, Arc::clone(&table));
        Ok(table)
    }

    /// Creates an empty board sharing this cache's line table for `size`
    pub fn new_board(&self, size: usize) -> Result<BoardState> {
        Ok(BoardState::with_lines(self.get(size)?))
    }

    /// The number of sizes computed so far
    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
