use memchr::{memchr, memchr2};

use crate::constants::{CLOSE, OPEN};

/// Bracketed segments of a simple key, left to right.
///
/// Each `[` pairs with the first `]` after it, so `a[b][c]` yields `b` then
/// `c` and `a[b[c]]` yields `b[c`. A pair never spans a line break: when one
/// is found before the closing bracket the opening bracket is skipped and
/// scanning resumes right after it.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    key: &'a str,
    pos: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn starting_at(key: &'a str, pos: usize) -> Self {
        Self { key, pos }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.key.as_bytes();
        loop {
            let open = self.pos + memchr(OPEN, bytes.get(self.pos..)?)?;
            let start = open + 1;
            let Some(offset) = memchr2(CLOSE, b'\n', &bytes[start..]) else {
                self.pos = bytes.len();
                return None;
            };
            let end = start + offset;
            if bytes[end] == b'\n' {
                self.pos = start;
                continue;
            }
            self.pos = end + 1;
            // Both delimiters are ASCII, so the slice bounds are char boundaries.
            return Some(&self.key[start..end]);
        }
    }
}

/// Every bracketed segment of `simple_key`, including empty ones.
pub fn extract_segments(simple_key: &str) -> Segments<'_> {
    Segments::starting_at(simple_key, 0)
}
