use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// The mark a player leaves on the board. `X` always moves first.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Returns the symbol of the other player.
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Symbol {
    type Err = Error;

    /// Parses `x`/`X` or `o`/`O`, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "X" => Ok(Symbol::X),
            "O" => Ok(Symbol::O),
            _ => Err(Error::InvalidSymbol(s.to_string())),
        }
    }
}

/// A `(row, col)` coordinate on the board.
///
/// Coordinates are signed so that raw input such as `(-1, 0)` can be handed
/// to the board and rejected there. Ordering is row-major.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A `width` x `height` grid of cells, each empty or holding a [`Symbol`].
///
/// The set of empty positions is kept in step with the grid on every move and
/// undo, so enumerating legal moves never rescans the grid. It is ordered
/// row-major, which makes every search over it deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    grid: Vec<Option<Symbol>>,
    empty_positions: BTreeSet<Position>,
    lines: Vec<Vec<usize>>,
}

impl Board {
    /// Creates an empty board with the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let mut empty_positions = BTreeSet::new();
        for row in 0..height {
            for col in 0..width {
                empty_positions.insert(Position::new(row as i32, col as i32));
            }
        }

        Self {
            width,
            height,
            grid: vec![None; width * height],
            empty_positions,
            lines: Board::build_lines(width, height),
        }
    }

    /// Creates an empty `size` x `size` board.
    pub fn square(size: usize) -> Self {
        Board::new(size, size)
    }

    /// Grid indices of every row, then every column, then (on square boards)
    /// the main diagonal and the anti-diagonal.
    fn build_lines(width: usize, height: usize) -> Vec<Vec<usize>> {
        let mut lines = Vec::with_capacity(width + height + 2);
        for row in 0..height {
            lines.push((0..width).map(|col| row * width + col).collect());
        }
        for col in 0..width {
            lines.push((0..height).map(|row| row * width + col).collect());
        }
        if width == height && width > 0 {
            lines.push((0..width).map(|i| i * width + i).collect());
            lines.push((0..width).map(|i| i * width + (width - 1 - i)).collect());
        }
        lines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns the symbol at `position`, or `None` for an empty or out of range cell.
    pub fn get(&self, position: impl Into<Position>) -> Option<Symbol> {
        self.index_of(position.into()).and_then(|i| self.grid[i])
    }

    /// Iterates over the empty positions in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.empty_positions.iter().copied()
    }

    pub fn empty_count(&self) -> usize {
        self.empty_positions.len()
    }

    pub fn is_empty_at(&self, position: impl Into<Position>) -> bool {
        self.empty_positions.contains(&position.into())
    }

    /// Iterates over the evaluation lines: rows, columns and, on square
    /// boards, both diagonals. Each line yields its cells in order.
    pub fn lines(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Option<Symbol>> + '_> + '_ {
        self.lines
            .iter()
            .map(move |line| line.iter().map(move |&i| self.grid[i]))
    }

    /// Checks that a symbol could be placed at `position` without touching the board.
    pub fn validate_move(&self, position: impl Into<Position>) -> Result<()> {
        let position = position.into();
        let index = self.checked_index(position)?;
        if self.grid[index].is_some() {
            return Err(Error::CellOccupied {
                row: position.row,
                col: position.col,
            });
        }
        Ok(())
    }

    /// Places `symbol` at `position`.
    ///
    /// Fails with [`Error::InvalidPosition`] when the position is off the board
    /// and with [`Error::CellOccupied`] when the cell already holds a symbol.
    /// The board is left untouched on failure.
    pub fn make_move(&mut self, symbol: Symbol, position: impl Into<Position>) -> Result<()> {
        let position = position.into();
        self.validate_move(position)?;
        let index = self.checked_index(position)?;
        self.grid[index] = Some(symbol);
        self.empty_positions.remove(&position);
        Ok(())
    }

    /// Clears the cell at `position`.
    ///
    /// Fails with [`Error::CellNotOccupied`] when the cell is already empty.
    pub fn undo_move(&mut self, position: impl Into<Position>) -> Result<()> {
        let position = position.into();
        let index = self.checked_index(position)?;
        if self.grid[index].is_none() {
            return Err(Error::CellNotOccupied {
                row: position.row,
                col: position.col,
            });
        }
        self.clear(index, position);
        Ok(())
    }

    /// Places `symbol` at `position` for as long as the returned guard lives.
    ///
    /// The guard derefs to the board and undoes the move when dropped, on
    /// every exit path of the code holding it.
    pub fn apply(&mut self, symbol: Symbol, position: impl Into<Position>) -> Result<AppliedMove<'_>> {
        let position = position.into();
        self.make_move(symbol, position)?;
        Ok(AppliedMove {
            board: self,
            position,
        })
    }

    pub fn is_full(&self) -> bool {
        self.empty_positions.is_empty()
    }

    /// Returns the symbol filling a whole row, column or diagonal, if any.
    ///
    /// Rows are scanned first, then columns, then the two diagonals of a
    /// square board.
    pub fn check_winner(&self) -> Option<Symbol> {
        self.lines().find_map(|mut line| {
            let first = line.next()??;
            line.all(|cell| cell == Some(first)).then_some(first)
        })
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    fn checked_index(&self, position: Position) -> Result<usize> {
        self.index_of(position).ok_or(Error::InvalidPosition {
            row: position.row,
            col: position.col,
        })
    }

    fn clear(&mut self, index: usize, position: Position) {
        self.grid[index] = None;
        self.empty_positions.insert(position);
    }

    fn render_cell(cell: Option<Symbol>, colored: bool) -> String {
        match (cell, colored) {
            (Some(Symbol::X), true) => format!("{RED}X{RESET}"),
            (Some(Symbol::O), true) => format!("{BLUE}O{RESET}"),
            (Some(symbol), false) => symbol.to_string(),
            (None, _) => " ".to_string(),
        }
    }
}

impl Default for Board {
    /// Creates an empty 3x3 board.
    fn default() -> Self {
        Board::square(3)
    }
}

impl fmt::Display for Board {
    /// Renders the grid with `│` between cells and `───┼` rules between rows.
    /// The alternate form (`{:#}`) colors `X` red and `O` blue.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colored = f.alternate();
        let separator = format!(
            "{}───",
            "───┼".repeat(self.width.saturating_sub(1))
        );
        for row in 0..self.height {
            let cells: Vec<String> = self.grid[row * self.width..(row + 1) * self.width]
                .iter()
                .map(|&cell| Board::render_cell(cell, colored))
                .collect();
            write!(f, " {} ", cells.join(" │ "))?;
            if row + 1 < self.height {
                write!(f, "\n{separator}\n")?;
            }
        }
        Ok(())
    }
}

/// A move applied through [`Board::apply`], undone when this guard is dropped.
pub struct AppliedMove<'a> {
    board: &'a mut Board,
    position: Position,
}

impl AppliedMove<'_> {
    pub fn position(&self) -> Position {
        self.position
    }
}

impl Deref for AppliedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for AppliedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        if let Some(index) = self.board.index_of(self.position) {
            self.board.clear(index, self.position);
        }
    }
}
