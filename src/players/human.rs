use crate::board::{Board, Position, Symbol};
use crate::error::{Error, Result};
use crate::players::Player;
use log::debug;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Parses `i, j` into a position, ignoring whitespace around either number.
pub fn parse_position(line: &str) -> Option<Position> {
    let (row, col) = line.trim().split_once(',')?;
    let row = row.trim().parse().ok()?;
    let col = col.trim().parse().ok()?;
    Some(Position::new(row, col))
}

/// A player whose moves are typed as `row, col` lines.
///
/// Malformed lines and positions the board would reject are answered with
/// `Invalid position` and a new prompt, with no retry limit.
pub struct HumanPlayer<R = StdinLock<'static>, W = Stdout> {
    symbol: Symbol,
    input: R,
    output: W,
}

impl HumanPlayer {
    /// Creates a player reading from standard input and prompting on standard output.
    pub fn stdio(symbol: Symbol) -> Self {
        HumanPlayer::new(symbol, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(symbol: Symbol, input: R, output: W) -> Self {
        Self {
            symbol,
            input,
            output,
        }
    }

    /// Consumes the player, returning everything written to its output.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn symbol(&self) -> Symbol {
        self.symbol
    }

    fn select_move(&mut self, board: &mut Board) -> Result<Position> {
        writeln!(self.output, "Player {} is making a move", self.symbol)?;
        loop {
            write!(self.output, "Enter the position to move (i, j): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }

            if let Some(position) = parse_position(&line) {
                match board.validate_move(position) {
                    Ok(()) => return Ok(position),
                    Err(err) => debug!("rejected {position}: {err}"),
                }
            }
            writeln!(self.output, "Invalid position")?;
        }
    }
}
