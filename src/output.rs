use crate::display::Display;
use crate::vte_actions::{VteAction, VteActionParser};

/// Turns the hosted program's output stream into whole lines on a [Display].
///
/// Bytes are decoded incrementally, so chunks may split lines and code points anywhere. Text
/// after the last newline stays pending until a later chunk completes the line.
pub struct OutputDecoder {
    parser: VteActionParser,
    pending: String,
}

impl OutputDecoder {
    pub fn new() -> Self {
        Self {
            parser: VteActionParser::new(),
            pending: String::new(),
        }
    }

    /// Decodes `chunk` and flushes every completed line to `display` in a single append.
    pub fn feed<D: Display + ?Sized>(&mut self, display: &mut D, chunk: &[u8]) -> &mut Self {
        log::trace!("output chunk of {} bytes", chunk.len());
        for action in self.parser.parse_bytes(chunk) {
            match action {
                VteAction::Text(c) => self.pending.push(c),
                VteAction::Tab => self.pending.push('\t'),
                VteAction::LineFeed => self.pending.push('\n'),
                // No cursor positioning on a plain-text surface.
                VteAction::CarriageReturn => {}
            }
        }

        if let Some(nl) = self.pending.rfind('\n') {
            let rest = self.pending.split_off(nl + 1);
            let lines = std::mem::replace(&mut self.pending, rest);
            display.append(&lines);
        }
        self
    }

    /// Decoded text not yet shown because its line is incomplete.
    pub fn pending(&self) -> &str {
        &self.pending
    }
}

impl Default for OutputDecoder {
    fn default() -> Self {
        Self::new()
    }
}
