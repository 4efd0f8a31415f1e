//! Dialog surface used by the interactive switch workflow.
//!
//! [`HostUi`] is the contract the workflow needs from whatever renders dialogs.
//! [`TerminalUi`] renders them as numbered prompts on a line-oriented
//! reader/writer pair (stdin/stderr for the binary, buffers in tests).

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};

pub trait HostUi {
    /// Show a list of entries; returns the chosen index or `None` on cancel.
    fn select(&mut self, heading: &str, entries: &[String]) -> Result<Option<usize>>;
    /// Yes/no confirmation.
    fn yes_no(&mut self, heading: &str, message: &str) -> Result<bool>;
    /// Transient notification.
    fn notify(&mut self, heading: &str, message: &str, duration: Duration) -> Result<()>;
    /// Text entry; returns `None` on cancel.
    fn input(&mut self, heading: &str) -> Result<Option<String>>;
    /// Blocking informational dialog.
    fn ok(&mut self, heading: &str, message: &str) -> Result<()>;
}

pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line; `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).context("read input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}").context("write prompt")?;
        self.output.flush().context("flush prompt")
    }
}

impl<R: BufRead, W: Write> HostUi for TerminalUi<R, W> {
    fn select(&mut self, heading: &str, entries: &[String]) -> Result<Option<usize>> {
        writeln!(self.output, "{heading}")?;
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.output, "  {}) {entry}", index + 1)?;
        }
        loop {
            self.prompt("Choice (blank to cancel): ")?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=entries.len()).contains(&choice) => {
                    return Ok(Some(choice - 1));
                }
                _ => writeln!(self.output, "Enter a number between 1 and {}.", entries.len())?,
            }
        }
    }

    fn yes_no(&mut self, heading: &str, message: &str) -> Result<bool> {
        writeln!(self.output, "{heading}\n{message}")?;
        self.prompt("[y/N]: ")?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn notify(&mut self, heading: &str, message: &str, _duration: Duration) -> Result<()> {
        writeln!(self.output, "[{heading}] {message}").context("write notification")
    }

    fn input(&mut self, heading: &str) -> Result<Option<String>> {
        self.prompt(&format!("{heading}: "))?;
        Ok(self.read_line()?.filter(|answer| !answer.is_empty()))
    }

    fn ok(&mut self, heading: &str, message: &str) -> Result<()> {
        writeln!(self.output, "{heading}\n{message}").context("write dialog")
    }
}
