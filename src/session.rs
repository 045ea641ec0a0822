use crate::display::Display;
use crate::editor::{EditorState, LineEditor, DEFAULT_STDIN_INDICATOR};
use crate::output::OutputDecoder;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::io::{self, Write};

/// Construction-time options for a [Session].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub program_name: String,
    pub record_continuations: bool,
    pub stdin_indicator: String,
}

impl SessionConfig {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            record_continuations: false,
            stdin_indicator: DEFAULT_STDIN_INDICATOR.to_string(),
        }
    }

    pub fn record_continuations(mut self, record: bool) -> Self {
        self.record_continuations = record;
        self
    }

    pub fn stdin_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.stdin_indicator = indicator.into();
        self
    }
}

/// One terminal session: the display plus the decoder and editor that write to it.
///
/// Key presses go in through [Session::handle_key]; whatever runs the hosted program reports
/// back through [Session::feed] and [Session::begin_stdin_read].
pub struct Session<D: Display> {
    display: D,
    decoder: OutputDecoder,
    editor: LineEditor,
}

impl<D: Display> Session<D> {
    pub fn new(config: SessionConfig, display: D) -> Self {
        let editor = LineEditor::new(config.program_name)
            .record_continuations(config.record_continuations)
            .stdin_indicator(config.stdin_indicator);
        Self {
            display,
            decoder: OutputDecoder::new(),
            editor,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn program_name(&self) -> &str {
        self.editor.program_name()
    }

    pub fn is_reading_stdin(&self) -> bool {
        self.editor.state() == EditorState::ReadingStdin
    }

    /// Returns the argument vector to run when the key submitted a command.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<Vec<String>> {
        self.editor.handle_key(&mut self.display, key)
    }

    pub fn feed(&mut self, chunk: &[u8]) {
        self.decoder.feed(&mut self.display, chunk);
    }

    /// Output decoded but not shown yet because its line is incomplete.
    pub fn pending_output(&self) -> &str {
        self.decoder.pending()
    }

    pub fn begin_stdin_read(&mut self) {
        self.editor.begin_stdin_read(&mut self.display);
    }

    /// Runs an in-process program against this session.
    ///
    /// A failing program is reported on the display; the session stays usable.
    pub fn run_program<P: Program + ?Sized>(&mut self, program: &mut P, argv: &[String]) {
        let mut io = ProgramIo {
            decoder: &mut self.decoder,
            display: &mut self.display,
            wants_input: false,
        };
        let result = program.run(argv, &mut io);
        let wants_input = io.wants_input;
        if let Err(err) = result {
            log::error!("{} failed: {err:#}", argv.join(" "));
            self.display.append(&format!("error: {err:#}\n"));
        }
        if wants_input {
            self.begin_stdin_read();
        }
    }
}

/// A program that runs inside the host process and talks to the session through [ProgramIo].
///
/// A program cannot block for input. It calls [ProgramIo::read_line] and returns; it is run
/// again with the submitted line appended to its arguments.
pub trait Program {
    fn run(&mut self, argv: &[String], io: &mut ProgramIo<'_>) -> Result<()>;
}

/// Standard output and input for a [Program] run.
pub struct ProgramIo<'a> {
    decoder: &'a mut OutputDecoder,
    display: &'a mut dyn Display,
    wants_input: bool,
}

impl ProgramIo<'_> {
    /// Asks for a line of input. The request takes effect once the program returns.
    pub fn read_line(&mut self) {
        self.wants_input = true;
    }
}

impl Write for ProgramIo<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.decoder.feed(&mut *self.display, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
