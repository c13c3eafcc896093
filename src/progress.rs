//! Single-line console status
//!
//! The batch reports through a [`StatusSink`]: a transient line that is
//! replaced on every update, and permanent lines for per-file errors.

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Destination for progress and error lines
pub trait StatusSink {
    /// Replace the current transient line
    fn update(&mut self, line: &str);

    /// Print a line that stays on screen
    fn emit(&mut self, line: &str);

    /// End the batch output with a newline
    fn finish(&mut self);
}

/// Console sink using crossterm cursor commands
pub struct ConsoleStatus<W: Write> {
    out: W,
    /// A transient line is currently displayed
    dirty: bool,
}

impl ConsoleStatus<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleStatus<W> {
    pub fn new(out: W) -> Self {
        Self { out, dirty: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))
    }
}

impl<W: Write> StatusSink for ConsoleStatus<W> {
    fn update(&mut self, line: &str) {
        let _ = self
            .clear_line()
            .and_then(|_| queue!(self.out, Print(line)))
            .and_then(|_| self.out.flush());
        self.dirty = true;
    }

    fn emit(&mut self, line: &str) {
        if self.dirty {
            let _ = self.clear_line();
            self.dirty = false;
        }
        let _ = queue!(self.out, Print(line), Print("\n")).and_then(|_| self.out.flush());
    }

    fn finish(&mut self) {
        let _ = queue!(self.out, Print("\n")).and_then(|_| self.out.flush());
        self.dirty = false;
    }
}

/// Recorded sink event
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StatusEvent {
    Update(String),
    Emit(String),
    Finish,
}

/// Sink that keeps every event for assertions
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingStatus {
    pub events: Vec<StatusEvent>,
}

#[cfg(test)]
impl RecordingStatus {
    pub fn updates(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                StatusEvent::Update(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn emitted(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                StatusEvent::Emit(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl StatusSink for RecordingStatus {
    fn update(&mut self, line: &str) {
        self.events.push(StatusEvent::Update(line.to_string()));
    }

    fn emit(&mut self, line: &str) {
        self.events.push(StatusEvent::Emit(line.to_string()));
    }

    fn finish(&mut self) {
        self.events.push(StatusEvent::Finish);
    }
}
