//! Interactive shell: input field, one generation at a time, rendered result.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

use makearch_scenario::AutomationScenario;

use crate::backend::ScenarioBackend;
use crate::catalog::{example, examples};
use crate::messages::{Locale, Messages};
use crate::render::{render_examples, render_scenario};

/// `Idle -> Submitting -> {ShowingScenario, ShowingError}`. The two result
/// states accept a new submission like `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellState {
    Idle,
    Submitting,
    ShowingScenario(AutomationScenario),
    ShowingError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; the backend was not called.
    Rejected,
    /// A generation is already in flight.
    Busy,
    Generated,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Example(usize),
    ListExamples,
    Submit,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(command) = line.strip_prefix(':') else {
            return Command::Text(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("example"), Some(n)) => match n.parse() {
                Ok(position) => Command::Example(position),
                Err(_) => Command::Unknown(line.to_string()),
            },
            (Some("examples"), None) => Command::ListExamples,
            (Some("submit"), None) => Command::Submit,
            (Some("help"), None) => Command::Help,
            (Some("quit") | Some("q"), None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub struct Shell<B, W> {
    backend: B,
    locale: Locale,
    messages: &'static Messages,
    out: W,
    input: String,
    state: ShellState,
}

impl<B: ScenarioBackend, W: Write> Shell<B, W> {
    pub fn new(backend: B, locale: Locale, out: W) -> Self {
        Self {
            backend,
            locale,
            messages: locale.messages(),
            out,
            input: String::new(),
            state: ShellState::Idle,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    #[cfg(test)]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Fill the input with the example at `position` (1-based). Never submits.
    pub fn select_example(&mut self, position: usize) -> Result<bool> {
        match example(self.locale, position) {
            Some(example) => {
                self.input = example.description.to_string();
                writeln!(self.out, "{} {}", self.messages.input_filled, self.input)?;
                Ok(true)
            }
            None => {
                writeln!(self.out, "{} {}", self.messages.example_not_found, position)?;
                Ok(false)
            }
        }
    }

    /// Generate a scenario from the current input and render the outcome.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if self.state == ShellState::Submitting {
            return Ok(SubmitOutcome::Busy);
        }

        if self.input.trim().is_empty() {
            // The validation message replaces a previously displayed error
            if matches!(self.state, ShellState::ShowingError(_)) {
                self.state = ShellState::ShowingError(self.messages.validation.to_string());
            }
            writeln!(self.out, "{}", self.messages.validation)?;
            return Ok(SubmitOutcome::Rejected);
        }

        self.state = ShellState::Submitting;
        writeln!(self.out, "{}", self.messages.busy)?;
        self.out.flush()?;

        match self.backend.generate(&self.input).await {
            Ok(scenario) => {
                self.state = ShellState::ShowingScenario(scenario);
                if let ShellState::ShowingScenario(scenario) = &self.state {
                    render_scenario(&mut self.out, scenario, self.messages)?;
                }
                Ok(SubmitOutcome::Generated)
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "Scenario generation failed");
                self.state = ShellState::ShowingError(self.messages.generic_error.to_string());
                writeln!(self.out, "{}", self.messages.generic_error)?;
                Ok(SubmitOutcome::Failed)
            }
        }
    }

    pub fn show_examples(&mut self) -> Result<()> {
        render_examples(&mut self.out, examples(self.locale), self.messages)?;
        Ok(())
    }

    fn show_welcome(&mut self) -> Result<()> {
        writeln!(self.out, "{}", self.messages.banner)?;
        writeln!(self.out, "{}", self.messages.tagline)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.messages.help)?;
        self.show_examples()?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.messages.prompt_label)?;
        Ok(())
    }

    /// Run the read-eval loop until `:quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<()> {
        self.show_welcome()?;

        let mut lines = reader.lines();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = Command::parse(&line);
            let submitted = matches!(command, Command::Text(_) | Command::Submit);

            match command {
                Command::Empty => {}
                Command::Text(text) => {
                    self.input = text;
                    self.submit().await?;
                }
                Command::Submit => {
                    self.submit().await?;
                }
                Command::Example(position) => {
                    self.select_example(position)?;
                }
                Command::ListExamples => self.show_examples()?,
                Command::Help => writeln!(self.out, "{}", self.messages.help)?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.out, "{} {}", self.messages.unknown_command, command)?
                }
            }

            // Examples stay on screen only while no scenario is displayed.
            if submitted && matches!(self.state, ShellState::Idle | ShellState::ShowingError(_)) {
                self.show_examples()?;
            }
        }

        writeln!(self.out)?;
        Ok(())
    }
}
