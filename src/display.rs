/// The surface output and echoed input are written to.
///
/// Implementations keep the newest text visible after every append. Neither operation can
/// fail from the caller's point of view; a surface that hits an I/O error logs it and carries on.
pub trait Display {
    fn append(&mut self, text: &str);
    fn clear(&mut self);
}

/// An in-memory display that records everything appended to it.
///
/// Useful for headless hosts and for asserting on what a session showed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    appends: usize,
    clears: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything currently shown, i.e. appended since the last clear.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of appends since creation, including empty ones.
    pub fn appends(&self) -> usize {
        self.appends
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Display for Transcript {
    fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.appends += 1;
    }

    fn clear(&mut self) {
        self.text.clear();
        self.clears += 1;
    }
}
