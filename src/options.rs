use crate::constants::MAX_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Deepest nesting accepted while folding keys into containers. Counts the
    /// head, every bracketed segment, and every container level of the value.
    pub max_depth: usize,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}
