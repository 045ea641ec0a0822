use crate::display::Display;
use crate::edit::EditBuffer;
use anyhow::{Context, Result};
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

const TAB_STOP: usize = 8;

/// Column reached after printing `text` from `column`, with tabs advancing to the next stop.
fn advance(column: usize, text: impl IntoIterator<Item = char>) -> usize {
    text.into_iter().fold(column, |column, c| match c {
        '\t' => (column / TAB_STOP + 1) * TAB_STOP,
        c => column + c.width().unwrap_or(0),
    })
}

/// A [Display] drawn on a raw-mode terminal.
///
/// The bottom row holds any unterminated output followed by the prompt and the line being
/// edited, the same way a shell shows a prompt printed by the program it runs.
pub struct TtyDisplay<W: Write> {
    out: W,
    prompt: String,
    // Output after the last newline, still on the bottom row.
    partial: String,
    input: String,
    caret: usize,
}

impl<W: Write> TtyDisplay<W> {
    pub fn new(out: W, prompt: impl Into<String>) -> Self {
        Self {
            out,
            prompt: prompt.into(),
            partial: String::new(),
            input: String::new(),
            caret: 0,
        }
    }

    /// Shows `buffer` as the line being edited.
    pub fn render_input(&mut self, buffer: &EditBuffer) {
        self.input.clear();
        self.input.push_str(buffer.as_str());
        self.caret = buffer.caret();
        if let Err(err) = self.redraw_input() {
            log::warn!("failed to draw input line: {err}");
        }
    }

    fn redraw_input(&mut self) -> io::Result<()> {
        let column = advance(0, self.partial.chars());
        let column = advance(column, self.prompt.chars());
        let column = advance(column, self.input.chars().take(self.caret));
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&self.partial),
            Print(&self.prompt),
            Print(&self.input),
            MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)),
        )?;
        self.out.flush()
    }

    fn write_output(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        // Raw mode does not turn \n into \r\n.
        let shown = format!("{}{}", self.partial, text).replace('\n', "\r\n");
        self.out.write_all(shown.as_bytes())?;
        self.partial.push_str(text);
        if let Some(nl) = self.partial.rfind('\n') {
            self.partial.drain(..=nl);
        }
        self.redraw_input()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.partial.clear();
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.redraw_input()
    }
}

impl<W: Write> Display for TtyDisplay<W> {
    fn append(&mut self, text: &str) {
        if let Err(err) = self.write_output(text) {
            log::warn!("failed to write output: {err}");
        }
    }

    fn clear(&mut self) {
        if let Err(err) = self.clear_screen() {
            log::warn!("failed to clear screen: {err}");
        }
    }
}

/// Keeps the terminal in raw mode so every key press reaches the editor, until dropped.
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        Ok(Self(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            log::error!("failed to restore terminal: {err}");
        }
    }
}
