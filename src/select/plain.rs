//! Line-oriented picker for terminals without TUI support.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use anyhow::Result;

use super::prompt::{Choice, SelectPrompt, Selector};
use crate::tui::Theme;

/// Invalid answers allowed before the prompt gives up.
const MAX_ATTEMPTS: usize = 3;

/// Prints a numbered list and reads the answer from a line of input.
///
/// An empty line, `q` or end of input cancels. The answer may be the entry
/// number or the exact label or name of an entry.
pub struct PlainSelector {
    input: RefCell<Box<dyn BufRead>>,
    output: RefCell<Box<dyn Write>>,
    dim_details: bool,
}

impl PlainSelector {
    /// Create a selector over arbitrary input and output streams.
    ///
    /// Output is plain text; see [`PlainSelector::with_dim_details`].
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            input: RefCell::new(Box::new(input)),
            output: RefCell::new(Box::new(output)),
            dim_details: false,
        }
    }

    /// Render choice details dimmed with ANSI escapes.
    pub fn with_dim_details(mut self, dim: bool) -> Self {
        self.dim_details = dim;
        self
    }

    /// Read from stdin and print to stderr.
    ///
    /// Details are dimmed only when stderr is a terminal and `NO_COLOR` is unset.
    pub fn stdio() -> Self {
        let dim = io::stderr().is_terminal() && Theme::detect().is_colored();
        Self::new(BufReader::new(io::stdin()), io::stderr()).with_dim_details(dim)
    }
}

impl Selector for PlainSelector {
    fn choose(&self, choices: &[Choice], prompt: &SelectPrompt) -> Result<Option<usize>> {
        let mut out = self.output.borrow_mut();
        let mut input = self.input.borrow_mut();

        if choices.is_empty() {
            return Ok(None);
        }

        writeln!(out, "{}:", prompt.title)?;
        let width = choices.len().to_string().len();
        for (i, choice) in choices.iter().enumerate() {
            match &choice.detail {
                Some(detail) if self.dim_details => {
                    writeln!(out, "  {:>width$}) {}  \x1b[2m{}\x1b[0m", i + 1, choice.label, detail)?
                }
                Some(detail) => writeln!(out, "  {:>width$}) {}  {}", i + 1, choice.label, detail)?,
                None => writeln!(out, "  {:>width$}) {}", i + 1, choice.label)?,
            }
        }

        for _ in 0..MAX_ATTEMPTS {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            if let Some(index) = parse_answer(answer, choices) {
                return Ok(Some(index));
            }

            writeln!(out, "Invalid choice: {answer}")?;
        }

        Ok(None)
    }
}

/// Resolve an answer to a choice index.
fn parse_answer(answer: &str, choices: &[Choice]) -> Option<usize> {
    if let Ok(number) = answer.parse::<usize>() {
        return (1..=choices.len()).contains(&number).then(|| number - 1);
    }

    choices
        .iter()
        .position(|c| c.label == answer)
        .or_else(|| choices.iter().position(|c| c.key == answer))
}
