//! Line-oriented menus for the three programs.
//!
//! Every menu reads from any [`BufRead`] and writes to any [`Write`], so integration
//! tests drive a whole session through in-memory buffers.

pub mod declarations;
pub mod internships;
pub mod vehicles;

pub use declarations::DeclarationShell;
pub use internships::InternshipShell;
pub use vehicles::VehicleShell;

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::calendar::DatePattern;
use crate::validation::{parse_decimal, parse_flag, parse_int, require_text, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to read or write the console: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended before the session was closed")]
    EndOfInput,
}

/// Treat running out of input as a normal way to leave a menu loop.
pub(crate) fn finish(result: Result<(), ShellError>) -> Result<(), ShellError> {
    match result {
        Err(ShellError::EndOfInput) => Ok(()),
        other => other,
    }
}

/// Whole number strictly above zero, rejected with `message` otherwise.
pub(crate) fn positive_count(raw: &str, message: &str) -> Result<u32, ValidationError> {
    let value = parse_int(raw)?;
    u32::try_from(value)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ValidationError::rejected(message))
}

pub(crate) fn non_negative_count(raw: &str, message: &str) -> Result<u32, ValidationError> {
    let value = parse_int(raw)?;
    u32::try_from(value).map_err(|_| ValidationError::rejected(message))
}

/// Prompt/answer plumbing shared by every menu.
///
/// Each `ask_*` helper keeps asking until the answer parses, printing `Error: <message>`
/// after every rejected line.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), ShellError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Write a pre-rendered block as-is.
    pub fn print(&mut self, block: &str) -> Result<(), ShellError> {
        self.output.write_all(block.as_bytes())?;
        Ok(())
    }

    pub fn error(&mut self, err: impl Display) -> Result<(), ShellError> {
        self.say(format_args!("Error: {err}"))
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ShellError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the trimmed answer.
    pub fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, ValidationError>,
    ) -> Result<T, ShellError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => self.error(err)?,
            }
        }
    }

    pub fn ask_text(&mut self, prompt: &str) -> Result<String, ShellError> {
        self.ask(prompt, |raw| require_text(raw, "Input"))
    }

    pub fn ask_int(&mut self, prompt: &str) -> Result<i64, ShellError> {
        self.ask(prompt, parse_int)
    }

    pub fn ask_decimal(&mut self, prompt: &str) -> Result<f64, ShellError> {
        self.ask(prompt, parse_decimal)
    }

    pub fn ask_date(
        &mut self,
        prompt: &str,
        pattern: DatePattern,
    ) -> Result<chrono::NaiveDate, ShellError> {
        self.ask(prompt, |raw| pattern.parse(raw))
    }

    /// Yes/no question; `hint` names the spellings shown on a bad answer.
    pub fn ask_flag(&mut self, prompt: &str, hint: &str) -> Result<bool, ShellError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse_flag(&line) {
                Some(flag) => return Ok(flag),
                None => self.say(format_args!("Invalid input. Please enter {hint}."))?,
            }
        }
    }

    /// Read a menu number once. Returns the zero-based index, or `None` when it is out of
    /// `1..=count`.
    pub fn pick(&mut self, prompt: &str, count: usize) -> Result<Option<usize>, ShellError> {
        let choice = self.ask_int(prompt)?;
        Ok(usize::try_from(choice)
            .ok()
            .filter(|choice| (1..=count).contains(choice))
            .map(|choice| choice - 1))
    }

    /// Print `options` as a numbered list and keep asking until one is chosen.
    pub fn choose<T: Copy>(&mut self, options: &[(T, &str)]) -> Result<T, ShellError> {
        for (index, (_, label)) in options.iter().enumerate() {
            self.say(format_args!("{}. {label}", index + 1))?;
        }
        loop {
            if let Some(index) = self.pick("Enter your choice: ", options.len())? {
                return Ok(options[index].0);
            }
            self.say(format_args!(
                "Invalid choice. Please enter a number between 1 and {}.",
                options.len()
            ))?;
        }
    }
}
