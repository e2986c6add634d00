//! Terminal front end for Tilefall.
//!
//! Reads picks as `x y` pairs from standard input and prints the board after
//! every swap. Pass `--step` to see each cascade round separately.

use std::{
    io::{self, BufRead, Write as _},
    path::PathBuf,
};

use clap::{CommandFactory as _, Parser, error::ErrorKind};
use tilefall_core::Position;
use tilefall_game::{
    BestScoreStore, CascadeEvent, Game, GameConfig, MemoryBestStore, SwapOutcome,
};
use tilefall_generator::{BoardSeed, SymbolSource};
use tilefall_resolver::{CascadeReport, Round};

use crate::{
    render::{Glyphs, render},
    store::FileBestStore,
};

mod render;
mod store;

#[derive(Debug, Parser)]
#[command(version, about = "Swap neighboring tiles to line up three or more")]
struct Args {
    /// Side length of the board
    #[arg(long, value_name = "N", default_value_t = GameConfig::default().size)]
    size: u8,

    /// Number of distinct symbols
    #[arg(long, value_name = "COUNT", default_value_t = GameConfig::default().symbol_count)]
    symbols: u8,

    /// Seed for a reproducible session (64 hex digits)
    #[arg(long, value_name = "HEX")]
    seed: Option<BoardSeed>,

    /// Upper bound on rounds in a single cascade
    #[arg(long, value_name = "ROUNDS", default_value_t = GameConfig::default().max_rounds)]
    max_rounds: u32,

    /// File the best score is kept in; kept in memory if omitted
    #[arg(long, value_name = "PATH")]
    best_file: Option<PathBuf>,

    /// Print every cascade round instead of only the settled board
    #[arg(long)]
    step: bool,

    /// Draw symbols as letters even when shapes are available
    #[arg(long)]
    letters: bool,
}

fn main() -> io::Result<()> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let config = GameConfig {
        size: args.size,
        symbol_count: args.symbols,
        max_rounds: args.max_rounds,
        ..GameConfig::default()
    };
    let seed = args.seed.unwrap_or_else(BoardSeed::random);
    log::info!("session seed {seed}");

    let store: Box<dyn BestScoreStore> = match &args.best_file {
        Some(path) => Box::new(FileBestStore::open(path)),
        None => Box::new(MemoryBestStore::default()),
    };
    let mut game = match Game::initialize(&config, seed.rng(), store) {
        Ok(game) => game,
        Err(err) => Args::command().error(ErrorKind::InvalidValue, err).exit(),
    };

    let mut ui = Ui {
        glyphs: Glyphs::for_symbol_count(args.symbols, args.letters),
        step: args.step,
        out: io::stdout().lock(),
    };
    writeln!(ui.out, "seed {seed}")?;
    ui.run(&mut game, io::stdin().lock())?;

    let best = game.commit_best();
    writeln!(ui.out, "final score {}, best {best}", game.current_score())?;
    Ok(())
}

struct Ui<W> {
    glyphs: Glyphs,
    step: bool,
    out: W,
}

impl<W: io::Write> Ui<W> {
    fn run<R, S>(&mut self, game: &mut Game<R, S>, input: impl BufRead) -> io::Result<()>
    where
        R: SymbolSource,
        S: BestScoreStore,
    {
        let mut lines = input.lines();
        loop {
            self.show_board(game)?;
            write!(
                self.out,
                "score {} (best {}) > ",
                game.current_score(),
                game.best_score()
            )?;
            self.out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(self.out)?;
                return Ok(());
            };
            match line.trim() {
                "" => {}
                "q" | "quit" => return Ok(()),
                "h" | "hint" => match game.hint() {
                    Some(mv) => writeln!(self.out, "try {mv}")?,
                    None => writeln!(self.out, "no moves left")?,
                },
                "r" | "reset" => {
                    game.reset();
                    writeln!(self.out, "new game (best {})", game.best_score())?;
                }
                "?" | "help" => self.help()?,
                text => match text.parse::<Position>() {
                    Ok(pos) => {
                        if self.pick(game, pos)? {
                            self.offer_new_board(game, &mut lines)?;
                        }
                    }
                    Err(err) => writeln!(self.out, "{err}; type `help` for commands")?,
                },
            }
        }
    }

    /// Handles a pick and returns `true` if the board ended up deadlocked.
    fn pick<R, S>(&mut self, game: &mut Game<R, S>, pos: Position) -> io::Result<bool>
    where
        R: SymbolSource,
        S: BestScoreStore,
    {
        let outcome = if self.step {
            game.activate_stepwise(pos)
        } else {
            game.activate(pos)
        };
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(false);
            }
        };
        let deadlocked = match outcome {
            SwapOutcome::Selected(pos) => {
                writeln!(self.out, "selected {pos}")?;
                false
            }
            SwapOutcome::Deselected => {
                writeln!(self.out, "selection cleared")?;
                false
            }
            SwapOutcome::RejectedSwap(mv) => {
                writeln!(self.out, "{mv} makes no line")?;
                false
            }
            SwapOutcome::AcceptedSwap(report) => self.summary(&report)?,
            SwapOutcome::CascadePending(mv) => {
                writeln!(self.out, "swapped {mv}")?;
                self.play_rounds(game)?
            }
            SwapOutcome::Busy => {
                writeln!(self.out, "busy")?;
                false
            }
        };
        game.mark_idle();
        Ok(deadlocked)
    }

    fn play_rounds<R, S>(&mut self, game: &mut Game<R, S>) -> io::Result<bool>
    where
        R: SymbolSource,
        S: BestScoreStore,
    {
        while game.has_pending_cascade() {
            match game.advance() {
                Some(CascadeEvent::Round(step)) => {
                    self.round(&step.round)?;
                    writeln!(self.out, "{}", render(game.grid(), None, self.glyphs))?;
                }
                Some(CascadeEvent::Settled(report)) => return self.summary(&report),
                None => break,
            }
        }
        Ok(false)
    }

    fn round(&mut self, round: &Round) -> io::Result<()> {
        writeln!(
            self.out,
            "round {}: {} tiles, +{}",
            round.index,
            round.removed.len(),
            round.points
        )
    }

    fn summary(&mut self, report: &CascadeReport) -> io::Result<bool> {
        if !self.step {
            for round in &report.rounds {
                self.round(round)?;
            }
        }
        writeln!(
            self.out,
            "+{} in {} round(s)",
            report.total_points,
            report.rounds.len()
        )?;
        if report.truncated {
            writeln!(self.out, "cascade stopped at the round limit")?;
        }
        Ok(report.deadlocked)
    }

    fn offer_new_board<R, S>(
        &mut self,
        game: &mut Game<R, S>,
        lines: &mut impl Iterator<Item = io::Result<String>>,
    ) -> io::Result<()>
    where
        R: SymbolSource,
        S: BestScoreStore,
    {
        self.show_board(game)?;
        write!(self.out, "no moves left, new board? [Y/n] ")?;
        self.out.flush()?;
        let answer = lines.next().transpose()?.unwrap_or_default();
        if !answer.trim().eq_ignore_ascii_case("n") {
            game.regenerate();
        }
        Ok(())
    }

    fn show_board<R, S>(&mut self, game: &Game<R, S>) -> io::Result<()>
    where
        R: SymbolSource,
        S: BestScoreStore,
    {
        writeln!(
            self.out,
            "{}",
            render(game.grid(), game.selection(), self.glyphs)
        )
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.out, "x y    pick the cell in column x, row y")?;
        writeln!(self.out, "hint   suggest a move")?;
        writeln!(self.out, "reset  save the best score and start over")?;
        writeln!(self.out, "quit   save the best score and exit")
    }
}

#[cfg(test)]
mod tests {
    use tilefall_core::Grid;
    use tilefall_generator::testing::ScriptedSource;

    use super::*;

    /// Swapping `(0,0)` and `(1,0)` lines up three `A`s in row 0.
    const BOARD: &str = "
        ABAACDEF
        CDEFABCD
        EFABCDEA
        ABCDEFAB
        CDEFABCD
        EFABCDEF
        ABCDEFAB
        CDEFABCE
    ";

    fn game<R: SymbolSource>(rng: R) -> Game<R, MemoryBestStore> {
        let grid: Grid = BOARD.parse().unwrap();
        Game::from_grid(&GameConfig::default(), grid, rng, MemoryBestStore::default()).unwrap()
    }

    fn play<R>(game: &mut Game<R, MemoryBestStore>, step: bool, input: &str) -> String
    where
        R: SymbolSource,
    {
        let mut ui = Ui {
            glyphs: Glyphs::Letters,
            step,
            out: Vec::new(),
        };
        ui.run(game, input.as_bytes()).unwrap();
        String::from_utf8(ui.out).unwrap()
    }

    #[test]
    fn test_swap_resolves_cascade() {
        let seed = BoardSeed::from_bytes([7; 32]);
        let mut game = game(seed.rng());
        let out = play(&mut game, false, "0 0\n1 0\nquit\n");
        assert!(out.contains("selected (0, 0)"));
        assert!(out.contains("round 1: 3 tiles, +30"));
        assert!(game.current_score() >= 30);
        assert!(!game.is_busy());
    }

    #[test]
    fn test_step_mode_offers_new_board_on_deadlock() {
        let mut game = game(ScriptedSource::new([3, 4, 5]));
        let out = play(&mut game, true, "0 0\n1 0\nn\nquit\n");
        assert!(out.contains("swapped (0, 0) <-> (1, 0)"));
        assert!(out.contains("round 1: 3 tiles, +30"));
        assert!(out.contains("+30 in 1 round(s)"));
        assert!(out.contains("no moves left, new board? [Y/n]"));
        assert!(!game.has_pending_cascade());
        assert!(!game.is_busy());
        assert_eq!(game.current_score(), 30);
        // Declined, so the deadlocked board stays
        assert!(game.grid().to_string().starts_with("BDEFCDEF\n"));
    }

    #[test]
    fn test_bad_input_is_reported() {
        let mut game = game(ScriptedSource::new([]));
        let before = game.grid().clone();
        let out = play(&mut game, false, "9 9\nfoo\nhint\n");
        assert!(out.contains("position (9, 9) is outside the 8x8 board"));
        assert!(out.contains("type `help` for commands"));
        assert!(out.contains("try "));
        assert_eq!(game.grid(), &before);
        assert_eq!(game.current_score(), 0);
    }
}
