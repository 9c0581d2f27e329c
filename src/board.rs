use std::fmt;
use std::sync::Arc;

use crate::error::{Error, MoveError, Result};
use crate::winning_lines::WinningLines;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, " "),
            Cell::X => write!(f, "X"),
            Cell::O => write!(f, "O"),
        }
    }
}

/// An N×N tic-tac-toe board
///
/// Cells are stored row-major, top-left first. Whose turn it is follows from
/// the cells: X moves whenever both players have placed the same number of
/// marks, so X always opens.
///
/// Cloning (or [`copy`](BoardState::copy)) copies the cells; the winning-line
/// table is immutable and shared between copies.
#[derive(Clone, Debug)]
pub struct BoardState {
    size: usize,
    cells: Vec<Cell>,
    lines: Arc<WinningLines>,
}

impl BoardState {
    /// Creates an empty board, computing its own winning-line table
    ///
    /// Use [`LineCache::new_board`](crate::winning_lines::LineCache::new_board) to
    /// share tables between boards of the same size.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::with_lines(Arc::new(WinningLines::new(size)?)))
    }

    /// Creates an empty board sized to fit `lines`
    pub fn with_lines(lines: Arc<WinningLines>) -> Self {
        let size = lines.size();
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            lines,
        }
    }

    /// Replays a sequence of cell indices, alternating from X
    pub fn from_moves(size: usize, moves: &[usize]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for &index in moves.iter() {
            // abort if the position is decided before all moves are played
            if board.is_terminal() {
                return Err(Error::GameAlreadyOver);
            }
            let player = board.turn();
            board.place(index, player)?;
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn lines(&self) -> &WinningLines {
        &self.lines
    }

    pub fn num_moves(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_empty_board(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// The player to move next
    ///
    /// X moves when both sides have placed equally many marks. On odd sizes this
    /// is the same as "X moves when an odd number of cells is empty"; on even
    /// sizes that rule would have O open, this one keeps X opening.
    pub fn turn(&self) -> Player {
        if self.num_moves() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    /// Indices of all empty cells in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Places `player`'s mark at `index`
    ///
    /// Fails if the index is off the board, the cell is taken, or it is not
    /// `player`'s turn.
    pub fn place(&mut self, index: usize, player: Player) -> Result<&mut Self> {
        let invalid = |reason| Error::InvalidMove { index, reason };

        let cell = self.cell(index).ok_or_else(|| {
            invalid(MoveError::OutOfRange {
                cells: self.cells.len(),
            })
        })?;
        if !cell.is_empty() {
            return Err(invalid(MoveError::Occupied(cell)));
        }
        let expected = self.turn();
        if player != expected {
            return Err(invalid(MoveError::WrongTurn { expected }));
        }

        self.cells[index] = player.into();
        Ok(self)
    }

    /// Writes a cell without any rule checks, for search backtracking and
    /// committing engine moves
    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub fn is_win(&self, player: Player) -> bool {
        let mark = Cell::from(player);
        self.lines
            .iter()
            .any(|line| line.iter().all(|&index| self.cells[index] == mark))
    }

    pub fn winner(&self) -> Option<Player> {
        if self.is_win(Player::X) {
            Some(Player::X)
        } else if self.is_win(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// True when the board is full and nobody has won
    pub fn is_tie(&self) -> bool {
        !self.cells.iter().any(Cell::is_empty) && self.winner().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_tie() || self.is_win(Player::X) || self.is_win(Player::O)
    }

    /// Resets every cell to empty
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::Empty;
        }
    }

    /// An independent copy; changes to either board never affect the other
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for BoardState {}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = format!("{}+", "+---".repeat(self.size));
        write!(f, "{}", separator)?;
        for row in self.cells.chunks(self.size) {
            writeln!(f)?;
            for cell in row.iter() {
                write!(f, "|{:^3}", cell.to_string())?;
            }
            writeln!(f, "|")?;
            write!(f, "{}", separator)?;
        }
        Ok(())
    }
}
