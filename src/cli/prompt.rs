//! Line-oriented prompting over any reader and writer.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

use crate::cli::terminal::Colorize;

/// Asks questions on `output` and reads answers from `input`, one line at a
/// time.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `question` and reads one trimmed line.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for an age until a non-negative whole number is entered.
    ///
    /// Returns `None` if the input runs out first.
    pub fn ask_age(&mut self, question: &str) -> io::Result<Option<u32>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse_age(&answer) {
                Ok(age) => return Ok(Some(age)),
                Err(problem) => self.say(format!("⚠ {problem}").warning())?,
            }
        }
    }

    /// Prints a line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Direct access to the output, for multi-line reports.
    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_age(answer: &str) -> Result<u32, &'static str> {
    let age: i64 = answer
        .parse()
        .map_err(|_| "Invalid age! Enter a whole number.")?;
    if age < 0 {
        return Err("Age cannot be negative!");
    }
    u32::try_from(age).map_err(|_| "Invalid age! Enter a whole number.")
}
