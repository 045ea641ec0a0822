use crate::display::Display;
use crate::edit::EditBuffer;
use crate::history::History;
use crate::keymap::{self, Command};
use crossterm::event::KeyEvent;

pub const DEFAULT_STDIN_INDICATOR: &str = "reading from stdin...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    /// The hosted program asked for input; the next submitted line continues its command.
    ReadingStdin,
}

/// Assembles key presses into argument vectors for the hosted program.
pub struct LineEditor {
    program_name: String,
    record_continuations: bool,
    stdin_indicator: String,
    state: EditorState,
    history: History,
    buffer: EditBuffer,
}

impl LineEditor {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            record_continuations: false,
            stdin_indicator: DEFAULT_STDIN_INDICATOR.to_string(),
            state: EditorState::Idle,
            history: History::new(),
            buffer: EditBuffer::new(),
        }
    }

    /// Also push the joined command onto history when a continuation line is submitted.
    pub fn record_continuations(mut self, record: bool) -> Self {
        self.record_continuations = record;
        self
    }

    pub fn stdin_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.stdin_indicator = indicator.into();
        self
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Handles one key press. Returns the argument vector to run when the press submitted a
    /// non-blank command.
    pub fn handle_key<D: Display + ?Sized>(
        &mut self,
        display: &mut D,
        key: &KeyEvent,
    ) -> Option<Vec<String>> {
        match keymap::command_for(key) {
            Command::ClearScreen => display.clear(),
            Command::HistoryPrevious => {
                if let Some(entry) = self.history.previous() {
                    self.buffer.set(entry);
                }
            }
            Command::HistoryNext => {
                if let Some(entry) = self.history.next() {
                    self.buffer.set(entry);
                }
            }
            Command::Submit => return self.submit(display),
            Command::Edit(op) => self.buffer.apply(op),
            Command::Ignore => {}
        }
        None
    }

    /// Records that the hosted program is blocked on a read.
    pub fn begin_stdin_read<D: Display + ?Sized>(&mut self, display: &mut D) {
        if self.state == EditorState::ReadingStdin {
            log::warn!("stdin read requested while one is already pending");
            return;
        }
        log::debug!("entering stdin continuation mode");
        self.state = EditorState::ReadingStdin;
        display.append(&format!("{}\n", self.stdin_indicator));
    }

    /// Submits the current line: echoes it, updates history and builds the argument vector.
    pub fn submit<D: Display + ?Sized>(&mut self, display: &mut D) -> Option<Vec<String>> {
        if !self.program_name.is_empty() {
            display.append(&format!("$ {} ", self.program_name));
        }
        display.append(&format!("{}\n", self.buffer.as_str()));

        let line = self.buffer.take();
        self.history.reset_cursor();

        let command = match self.state {
            EditorState::ReadingStdin => {
                log::debug!("leaving stdin continuation mode");
                self.state = EditorState::Idle;
                let blank = line.trim().is_empty();
                let command = match self.history.last() {
                    Some(previous) if blank => previous.to_string(),
                    Some(previous) => format!("{previous} {line}"),
                    None => line,
                };
                if self.record_continuations && !blank {
                    self.history.push(command.clone());
                }
                command
            }
            EditorState::Idle => {
                if !line.trim().is_empty() {
                    self.history.push(line.clone());
                }
                line
            }
        };

        let mut argv: Vec<String> = command.split_whitespace().map(String::from).collect();
        if argv.is_empty() {
            log::debug!("blank submission, nothing to dispatch");
            return None;
        }
        if argv[0] != self.program_name {
            argv.insert(0, self.program_name.clone());
        }
        log::debug!("dispatching {argv:?}");
        Some(argv)
    }
}
