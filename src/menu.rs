//! Interactive selection front end.
//!
//! Reads whitespace-separated integers from a line-oriented input, builds the
//! chosen automaton from [`MenuConfig`], and evolves it for the requested
//! number of steps.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::compute::{
    AutomatonError, Census, CellularAutomaton, ElementaryCA, ForestFire, GameOfLife, Lifecycle,
    MajorityCA, parse_step_count, rng_from_seed,
};
use crate::schema::MenuConfig;

const RULE: &str = "********************************************";

/// The automata offered by the menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonKind {
    Elementary,
    ForestFire,
    Life,
    Majority,
}

impl AutomatonKind {
    pub const ALL: [AutomatonKind; 4] = [
        AutomatonKind::Elementary,
        AutomatonKind::ForestFire,
        AutomatonKind::Life,
        AutomatonKind::Majority,
    ];

    /// Map a 1-based menu choice to a kind.
    pub fn from_choice(choice: i64) -> Option<Self> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            AutomatonKind::Elementary => "Cellular Automaton 1D",
            AutomatonKind::ForestFire => "Forest Fire",
            AutomatonKind::Life => "Game of Life",
            AutomatonKind::Majority => "Majority Cellular Automaton",
        }
    }

    /// Build this kind of automaton from configuration.
    pub fn build(self, config: &MenuConfig) -> Result<Box<dyn CellularAutomaton>, AutomatonError> {
        let rng = rng_from_seed(config.random_seed);
        let automaton: Box<dyn CellularAutomaton> = match self {
            AutomatonKind::Elementary => {
                Box::new(ElementaryCA::from_config(&config.elementary, rng)?)
            }
            AutomatonKind::ForestFire => {
                Box::new(ForestFire::from_config(&config.forest_fire, rng)?)
            }
            AutomatonKind::Life => Box::new(GameOfLife::from_config(&config.life, rng)?),
            AutomatonKind::Majority => Box::new(MajorityCA::from_config(&config.majority, rng)?),
        };
        Ok(automaton)
    }
}

/// Front-end errors.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended before a number was read")]
    UnexpectedEof,
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// How a menu session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The choice did not name an automaton; nothing ran.
    InvalidChoice(i64),
    /// An automaton ran to completion.
    Ran {
        kind: AutomatonKind,
        steps: u64,
        generation: u64,
    },
}

/// Splits buffered input into whitespace-separated tokens.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// A single menu session over an input and an output stream.
pub struct Menu<R, W> {
    input: TokenReader<R>,
    out: W,
    config: MenuConfig,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, config: MenuConfig) -> Self {
        Self {
            input: TokenReader::new(input),
            out,
            config,
        }
    }

    /// Show the menu, run the chosen automaton, and report what happened.
    pub fn run(&mut self) -> Result<MenuOutcome, MenuError> {
        self.print_banner()?;

        let choice = self.read_integer("Enter your choice: ")?;
        let Some(kind) = AutomatonKind::from_choice(choice) else {
            log::warn!("Rejected menu choice {choice}");
            writeln!(self.out, "Invalid choice")?;
            return Ok(MenuOutcome::InvalidChoice(choice));
        };

        let mut automaton = kind.build(&self.config)?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "*        {}", automaton.name())?;
        writeln!(self.out, "{RULE}")?;

        if automaton.lifecycle() == Lifecycle::Uninitialized {
            automaton.initialize_random_state();
        }

        let steps = parse_step_count(self.read_integer("Enter the number of steps: ")?)?;
        automaton.evolve(steps, &mut self.out)?;
        log::info!(
            "{} after {} generations: {}",
            automaton.name(),
            automaton.generation(),
            Census::from_grid(automaton.grid(), automaton.states())
        );
        writeln!(self.out, "{RULE}")?;
        self.out.flush()?;

        Ok(MenuOutcome::Ran {
            kind,
            steps,
            generation: automaton.generation(),
        })
    }

    /// Consume the session and return the output stream.
    pub fn into_output(self) -> W {
        self.out
    }

    fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "*          Cellular Automaton Menu         *")?;
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "Choose a cellular automaton:")?;
        for (i, kind) in AutomatonKind::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, kind.label())?;
        }
        writeln!(self.out, "{RULE}")
    }

    /// Prompt until a token parses as an integer.
    fn read_integer(&mut self, prompt: &str) -> Result<i64, MenuError> {
        loop {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
            let token = self.input.next_token()?.ok_or(MenuError::UnexpectedEof)?;
            match token.parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    log::warn!("Ignoring non-numeric input {token:?}");
                    writeln!(self.out)?;
                    writeln!(self.out, "Invalid input. Please enter a number.")?;
                }
            }
        }
    }
}
