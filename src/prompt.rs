//! Interactive prompts for choosing a city and filters.
//!
//! Every question is re-asked until the answer is valid. Closed input
//! surfaces as an [`io::ErrorKind::UnexpectedEof`] error so callers can end
//! the session instead of looping forever.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::DatasetSource;
use crate::filter::{DayFilter, MonthFilter, Selection};
use crate::output::{separator, title_case};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one answer, lowercased and trimmed.
    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Shows `question` until `parse` accepts the answer.
    fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> io::Result<T> {
        loop {
            writeln!(self.output, "\n{question}")?;
            let answer = self.read_answer()?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            debug!(answer, "Rejected input");
            writeln!(
                self.output,
                "\nInput not valid: {answer:?}. Please use one of the allowed answers."
            )?;
        }
    }

    pub fn ask_city(&mut self, source: &DatasetSource) -> io::Result<String> {
        let choices = source.cities().map(title_case).collect::<Vec<_>>().join(", ");
        let question = format!("Which city would you like to explore? ({choices})");
        let city = self.ask(&question, |answer| {
            source.contains(answer).then(|| answer.to_string())
        })?;
        writeln!(self.output, "\nYou have selected {}.", title_case(&city))?;
        Ok(city)
    }

    pub fn ask_month(&mut self) -> io::Result<MonthFilter> {
        let month = self.ask(
            "Which month? (January to June, or 'all' for no month filter)",
            |answer| answer.parse().ok(),
        )?;
        writeln!(self.output, "\nYou have selected month: {month}.")?;
        Ok(month)
    }

    pub fn ask_day(&mut self) -> io::Result<DayFilter> {
        let day = self.ask(
            "Which day of the week? (Monday to Sunday, or 'all' for no day filter)",
            |answer| answer.parse().ok(),
        )?;
        writeln!(self.output, "\nYou have selected day: {day}.")?;
        Ok(day)
    }

    /// Asks for city, month and day, then echoes the full choice.
    pub fn ask_selection(&mut self, source: &DatasetSource) -> io::Result<(String, Selection)> {
        let city = self.ask_city(source)?;
        let selection = Selection::new(self.ask_month()?, self.ask_day()?);
        writeln!(
            self.output,
            "\nViewing data for {}, {selection}.\n{}",
            city.to_uppercase(),
            separator()
        )?;
        Ok((city, selection))
    }

    /// Yes/no question; anything else is asked again.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.ask(&format!("{question} (yes/no)"), |answer| match answer {
            "yes" | "y" => Some(true),
            "no" | "n" => Some(false),
            _ => None,
        })
    }
}
