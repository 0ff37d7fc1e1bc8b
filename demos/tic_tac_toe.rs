extern crate tictactoe_lib;

use clap::{Parser, ValueEnum};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use tictactoe_lib::Result;
use tictactoe_lib::board::{Board, Symbol};
use tictactoe_lib::game::{Game, GameOutcome, Turn};
use tictactoe_lib::players::{ComputerPlayer, HumanPlayer, Player};
use tictactoe_lib::search::{DEFAULT_MAX_DEPTH, Strategy};

#[derive(Parser)]
#[command(name = "tic_tac_toe")]
#[command(about = "Play N x N tic-tac-toe against the computer", long_about = None)]
struct Cli {
    /// Side length of the square board
    #[arg(default_value_t = 4)]
    size: usize,

    /// Who sits at the board
    #[arg(long, value_enum, default_value_t = Mode::HumanVsComputer)]
    mode: Mode,

    /// How computer players pick their moves
    #[arg(long, value_enum, default_value_t = StrategyArg::AlphaBeta)]
    strategy: StrategyArg,

    /// Symbol of player 1 (X always goes first)
    #[arg(long, default_value = "X")]
    symbol: Symbol,

    /// Search depth before falling back to the heuristic
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u32,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    HumanVsComputer,
    ComputerVsComputer,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Random,
    Minimax,
    AlphaBeta,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Minimax => Strategy::Minimax,
            StrategyArg::AlphaBeta => Strategy::AlphaBeta,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    clear_screen()?;
    println!("Welcome to the Tic Tac Toe game!\n");

    let strategy = Strategy::from(cli.strategy);
    let player_2_symbol = cli.symbol.opponent();
    let computer =
        |symbol: Symbol| -> Box<dyn Player> { Box::new(ComputerPlayer::new(symbol, strategy, cli.depth)) };
    let player_1: Box<dyn Player> = match cli.mode {
        Mode::HumanVsComputer => Box::new(HumanPlayer::stdio(cli.symbol)),
        Mode::ComputerVsComputer => computer(cli.symbol),
    };
    let player_2 = computer(player_2_symbol);

    // X always opens
    let (first, second) = if cli.symbol == Symbol::X {
        (player_1, player_2)
    } else {
        (player_2, player_1)
    };

    let mut game = Game::new(Board::square(cli.size), first, second);
    println!("{:#}\n", game.board());
    let outcome = game.play_with(|game, turn| {
        if let Err(err) = redraw(game, turn) {
            eprintln!("failed to draw the board: {err}");
        }
    })?;

    match outcome {
        GameOutcome::Winner(symbol) => println!("Player {symbol} wins!"),
        GameOutcome::Tie => println!("It's a tie!"),
    }
    println!("Thank you for playing!");
    Ok(())
}

fn clear_screen() -> io::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
}

fn redraw(game: &Game, turn: &Turn) -> io::Result<()> {
    clear_screen()?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{:#}\n", game.board())?;
    writeln!(stdout, "Turn {}: Player {} played {}", turn.number, turn.symbol, turn.position)?;
    writeln!(stdout, "Time taken: {:.2} seconds\n", turn.elapsed.as_secs_f64())?;
    stdout.flush()
}
