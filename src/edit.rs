/// Editing operations on the input line that are not history or submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    KillToStart,
    KillToEnd,
}

/// The line currently being typed, with a caret measured in chars.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    caret: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the contents and puts the caret at the end.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.caret = self.char_len();
    }

    /// Empties the buffer, returning what it held.
    pub fn take(&mut self) -> String {
        self.caret = 0;
        std::mem::take(&mut self.text)
    }

    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => {
                let at = self.byte_offset(self.caret);
                self.text.insert(at, c);
                self.caret += 1;
            }
            EditOp::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let at = self.byte_offset(self.caret);
                    self.text.remove(at);
                }
            }
            EditOp::Delete => {
                if self.caret < self.char_len() {
                    let at = self.byte_offset(self.caret);
                    self.text.remove(at);
                }
            }
            EditOp::Left => self.caret = self.caret.saturating_sub(1),
            EditOp::Right => self.caret = (self.caret + 1).min(self.char_len()),
            EditOp::Home => self.caret = 0,
            EditOp::End => self.caret = self.char_len(),
            EditOp::KillToStart => {
                let at = self.byte_offset(self.caret);
                self.text.drain(..at);
                self.caret = 0;
            }
            EditOp::KillToEnd => {
                let at = self.byte_offset(self.caret);
                self.text.truncate(at);
            }
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
