use crate::board::{Board, Position, Symbol};
use crate::error::{Error, Result};
use log::{debug, trace};

/// Depth at which the search stops recursing and falls back to the heuristic.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Score of a win found at depth zero. Deeper wins score `WIN_SCORE - depth`.
pub const WIN_SCORE: i32 = 1000;

const LINE_COMPLETE: i32 = 100;
const LINE_ONE_MISSING: i32 = 10;
const LINE_OPPONENT_ONE_MISSING: i32 = -90;
const LINE_SINGLE: i32 = 1;

/// How a computer player picks its moves.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Strategy {
    /// Uniformly random empty cell.
    Random,
    /// Depth-limited minimax.
    #[default]
    Minimax,
    /// Depth-limited minimax with alpha-beta pruning.
    AlphaBeta,
}

impl Strategy {
    pub fn uses_alpha_beta(self) -> bool {
        self == Strategy::AlphaBeta
    }
}

impl TryFrom<u8> for Strategy {
    type Error = Error;

    /// Maps the menu codes `1`, `2` and `3` to random, minimax and alpha-beta.
    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Strategy::Random),
            2 => Ok(Strategy::Minimax),
            3 => Ok(Strategy::AlphaBeta),
            other => Err(Error::InvalidStrategy(other)),
        }
    }
}

/// Depth-limited minimax over a shared board, scored from the point of view of `symbol`.
///
/// Moves are simulated in place with [`Board::apply`], so the board is back in
/// its original state whenever a search call returns, including on errors and
/// after a pruning cutoff.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSearch {
    symbol: Symbol,
    max_depth: u32,
    use_alpha_beta_pruning: bool,
}

impl MinimaxSearch {
    pub fn new(symbol: Symbol, max_depth: u32, use_alpha_beta_pruning: bool) -> Self {
        Self {
            symbol,
            max_depth,
            use_alpha_beta_pruning,
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Scores a finished game, or returns `None` while it is still in progress.
    ///
    /// Faster wins score higher and slower losses score less negative.
    pub fn evaluate_terminal(&self, board: &Board, depth: u32) -> Option<i32> {
        match board.check_winner() {
            Some(winner) if winner == self.symbol => Some(WIN_SCORE - depth as i32),
            Some(_) => Some(-(WIN_SCORE - depth as i32)),
            None if board.is_full() => Some(0),
            None => None,
        }
    }

    /// Static score of a position: the sum of [`MinimaxSearch::evaluate_line`]
    /// over every row, column and (on square boards) diagonal, minus `depth`.
    pub fn evaluate_heuristic(&self, board: &Board, depth: u32) -> i32 {
        let score: i32 = board.lines().map(|line| self.evaluate_line(line)).sum();
        score - depth as i32
    }

    /// Scores one line by its piece counts: a line filled by one side scores
    /// ±100, two pieces with one empty cell +10 for us and -90 for the
    /// opponent, one piece with two empty cells ±1. Counts are fixed, so on
    /// lines longer than three most configurations score 0.
    pub fn evaluate_line(&self, line: impl IntoIterator<Item = Option<Symbol>>) -> i32 {
        let (mut own, mut opponent, mut empty) = (0usize, 0usize, 0usize);
        for cell in line {
            match cell {
                Some(symbol) if symbol == self.symbol => own += 1,
                Some(_) => opponent += 1,
                None => empty += 1,
            }
        }

        let length = own + opponent + empty;
        if length == 0 {
            return 0;
        }

        if own == length {
            LINE_COMPLETE
        } else if opponent == length {
            -LINE_COMPLETE
        } else if own == 2 && empty == 1 {
            LINE_ONE_MISSING
        } else if opponent == 2 && empty == 1 {
            LINE_OPPONENT_ONE_MISSING
        } else if own == 1 && empty == 2 {
            LINE_SINGLE
        } else if opponent == 1 && empty == 2 {
            -LINE_SINGLE
        } else {
            0
        }
    }

    /// Picks the empty cell with the strictly greatest minimax score.
    ///
    /// Candidates are tried in row-major order and ties keep the first one.
    /// Fails with [`Error::NoValidMove`] when the board has no empty cell.
    pub fn best_move(&self, board: &mut Board) -> Result<(Position, i32)> {
        let options: Vec<Position> = board.empty_positions().collect();
        let mut best: Option<(Position, i32)> = None;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for position in options {
            let score = {
                let mut child = board.apply(self.symbol, position)?;
                let score = self.minimax(&mut child, 0, false, alpha, beta)?;
                debug!(
                    "player {} considering move {} with score {score}",
                    self.symbol,
                    child.position()
                );
                score
            };

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((position, score));
            }

            if self.use_alpha_beta_pruning {
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
        }

        best.ok_or(Error::NoValidMove)
    }

    /// Minimax value of `board` at `depth`, with the side to play given by `maximizing`.
    pub fn minimax(
        &self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32> {
        if let Some(score) = self.evaluate_terminal(board, depth) {
            return Ok(score);
        }

        if depth >= self.max_depth {
            return Ok(self.evaluate_heuristic(board, depth));
        }

        let (mover, mut best_score) = if maximizing {
            (self.symbol, i32::MIN)
        } else {
            (self.symbol.opponent(), i32::MAX)
        };

        let options: Vec<Position> = board.empty_positions().collect();
        for position in options {
            let score = {
                let mut child = board.apply(mover, position)?;
                self.minimax(&mut child, depth + 1, !maximizing, alpha, beta)?
            };

            if maximizing {
                best_score = best_score.max(score);
            } else {
                best_score = best_score.min(score);
            }

            if self.use_alpha_beta_pruning {
                if maximizing {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
                if beta <= alpha {
                    trace!("pruned at depth {depth} after {position}");
                    break;
                }
            }
        }

        Ok(best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows[0].len(), rows.len());
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if let Ok(symbol) = ch.to_string().parse::<Symbol>() {
                    board.make_move(symbol, (row as i32, col as i32)).unwrap();
                }
            }
        }
        board
    }

    #[test]
    fn strategy_codes() {
        assert_eq!(Strategy::try_from(1).unwrap(), Strategy::Random);
        assert_eq!(Strategy::try_from(2).unwrap(), Strategy::Minimax);
        assert_eq!(Strategy::try_from(3).unwrap(), Strategy::AlphaBeta);
        assert!(matches!(Strategy::try_from(0), Err(Error::InvalidStrategy(0))));
        assert_eq!(Strategy::default(), Strategy::Minimax);
    }

    #[test]
    fn terminal_scores_reward_fast_wins() {
        let board = board_from(&["XXX", "OO ", "   "]);
        let as_x = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);
        let as_o = MinimaxSearch::new(Symbol::O, DEFAULT_MAX_DEPTH, false);

        assert_eq!(as_x.evaluate_terminal(&board, 0), Some(1000));
        assert_eq!(as_x.evaluate_terminal(&board, 3), Some(997));
        assert_eq!(as_o.evaluate_terminal(&board, 3), Some(-997));
    }

    #[test]
    fn terminal_scores_draw_and_in_progress() {
        let search = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);
        assert_eq!(
            search.evaluate_terminal(&board_from(&["XOX", "XOO", "OXX"]), 5),
            Some(0)
        );
        assert_eq!(
            search.evaluate_terminal(&board_from(&["XO ", "   ", "   "]), 1),
            None
        );
    }

    #[test]
    fn line_scores_are_golden() {
        let x = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);
        let (c, e) = (Some(Symbol::X), None);
        let o = Some(Symbol::O);

        assert_eq!(x.evaluate_line([c, c, c]), 100);
        assert_eq!(x.evaluate_line([o, o, o]), -100);
        assert_eq!(x.evaluate_line([c, e, c]), 10);
        assert_eq!(x.evaluate_line([o, o, e]), -90);
        assert_eq!(x.evaluate_line([e, c, e]), 1);
        assert_eq!(x.evaluate_line([e, e, o]), -1);
        assert_eq!(x.evaluate_line([c, o, e]), 0);
        assert_eq!(x.evaluate_line([e, e, e]), 0);
        assert_eq!(x.evaluate_line([c, o, c]), 0);
    }

    #[test]
    fn long_line_scores_use_fixed_counts() {
        let x = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);
        let (c, e) = (Some(Symbol::X), None);
        let o = Some(Symbol::O);

        assert_eq!(x.evaluate_line([c, c, e, o]), 10);
        assert_eq!(x.evaluate_line([c, c, o, e]), 10);
        assert_eq!(x.evaluate_line([o, o, e, c]), -90);
        assert_eq!(x.evaluate_line([c, e, e, o]), 1);
        assert_eq!(x.evaluate_line([c, o, e, e]), 1);
        assert_eq!(x.evaluate_line([c, e, e, e]), 0);
        assert_eq!(x.evaluate_line([c, c, c, e]), 0);
        assert_eq!(x.evaluate_line([c, c, c, c]), 100);
        assert_eq!(x.evaluate_line([o, o, o, o]), -100);
    }

    #[test]
    fn heuristic_is_golden() {
        let x = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);

        let advancing = board_from(&["XX ", " O ", "   "]);
        assert_eq!(x.evaluate_heuristic(&advancing, 0), 9);
        assert_eq!(x.evaluate_heuristic(&advancing, 2), 7);

        let threatened = board_from(&["X  ", "OO ", "   "]);
        assert_eq!(x.evaluate_heuristic(&threatened, 0), -91);

        assert_eq!(x.evaluate_heuristic(&Board::default(), 4), -4);
    }

    #[test]
    fn takes_immediate_win() {
        let mut board = board_from(&["XX ", "O  ", "   "]);
        let before = board.clone();

        for use_alpha_beta in [false, true] {
            let search = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, use_alpha_beta);
            let (position, score) = search.best_move(&mut board).unwrap();
            assert_eq!(position, Position::new(0, 2));
            assert_eq!(score, 1000);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn blocks_opponent_win() {
        let mut board = board_from(&["XX ", " O ", "   "]);
        let search = MinimaxSearch::new(Symbol::O, DEFAULT_MAX_DEPTH, false);
        let (position, _) = search.best_move(&mut board).unwrap();
        assert_eq!(position, Position::new(0, 2));
    }

    #[test]
    fn full_board_has_no_valid_move() {
        let mut board = board_from(&["XOX", "XOO", "OXX"]);
        let search = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, true);
        assert!(matches!(search.best_move(&mut board), Err(Error::NoValidMove)));
    }

    #[test]
    fn search_restores_board() {
        let mut board = board_from(&["X  ", " O ", "   "]);
        let before = board.clone();

        for use_alpha_beta in [false, true] {
            let search = MinimaxSearch::new(Symbol::X, 9, use_alpha_beta);
            search.best_move(&mut board).unwrap();
            search.minimax(&mut board, 0, true, i32::MIN, i32::MAX).unwrap();
            assert_eq!(board, before);
        }
    }

    #[test]
    fn alpha_beta_matches_minimax() {
        let positions = [
            board_from(&["X  ", "   ", "   "]),
            board_from(&["X  ", " O ", "   "]),
            board_from(&["XO ", " X ", "   "]),
            board_from(&[" O ", "XX ", "  O"]),
            board_from(&["X O", "   ", "O X"]),
            board_from(&["XOX", " O ", "   "]),
        ];

        for board in positions {
            for symbol in [Symbol::X, Symbol::O] {
                for max_depth in [2, DEFAULT_MAX_DEPTH, 9] {
                    let mut board = board.clone();
                    let plain = MinimaxSearch::new(symbol, max_depth, false)
                        .best_move(&mut board)
                        .unwrap();
                    let pruned = MinimaxSearch::new(symbol, max_depth, true)
                        .best_move(&mut board)
                        .unwrap();
                    assert_eq!(plain, pruned, "{symbol} at depth {max_depth} on\n{board}");
                }
            }
        }
    }

    #[test]
    fn depth_zero_uses_heuristic_only() {
        let mut board = Board::default();
        let search = MinimaxSearch::new(Symbol::X, 0, false);
        let (position, score) = search.best_move(&mut board).unwrap();
        assert_eq!(position, Position::new(1, 1));
        assert_eq!(score, 4);
    }

    #[test]
    fn heuristic_on_four_by_four() {
        let board = board_from(&["XX O", "O   ", " X  ", "   O"]);
        let x = MinimaxSearch::new(Symbol::X, DEFAULT_MAX_DEPTH, false);

        assert_eq!(x.evaluate_heuristic(&board, 0), 13);
        assert_eq!(x.evaluate_heuristic(&board, 1), 12);
    }

    #[test]
    fn heuristic_picks_move_on_four_by_four() {
        for use_alpha_beta in [false, true] {
            let mut board = board_from(&["XX O", "O   ", " X  ", "   O"]);
            let before = board.clone();

            let shallow = MinimaxSearch::new(Symbol::X, 0, use_alpha_beta)
                .best_move(&mut board)
                .unwrap();
            let deeper = MinimaxSearch::new(Symbol::X, 2, use_alpha_beta)
                .best_move(&mut board)
                .unwrap();

            assert_eq!(shallow, (Position::new(3, 0), 32));
            assert_eq!(deeper, (Position::new(1, 1), 39));
            assert_eq!(board, before);
        }
    }
}
