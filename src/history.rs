/// Submitted command lines plus a navigation cursor.
///
/// The cursor counts back from the newest entry: 0 is the blank new line, 1 the most recent
/// entry, `len()` the oldest. Navigation clamps at both ends and never wraps.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Steps one entry further back. Returns the entry now selected, or `None` when already at
    /// the oldest one.
    pub fn previous(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.selected()
    }

    /// Steps one entry towards the newest. `Some("")` means the cursor is back on the blank
    /// line; `None` means it already was.
    pub fn next(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.selected().unwrap_or(""))
    }

    fn selected(&self) -> Option<&str> {
        let index = self.entries.len().checked_sub(self.cursor)?;
        self.entries.get(index).map(String::as_str)
    }
}
