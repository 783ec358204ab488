//! Simple key syntax: `head[seg1][seg2]…[segN]`.

mod segments;

use std::iter;

use memchr::memchr;
use smallvec::SmallVec;

use crate::constants::{CLOSE, OPEN};

pub use segments::{extract_segments, Segments};

type SegmentBuf<'a> = SmallVec<[&'a str; 8]>;

/// Returns the head of `simple_key` when it has bracketed children.
///
/// A key has children only if its first `[` is not at position 0 and a `]`
/// follows it somewhere. Anything else (`a`, `e[x`, `e]x`, `[a]`) is a plain
/// key and yields `None`.
pub fn parse_head(simple_key: &str) -> Option<&str> {
    let bytes = simple_key.as_bytes();
    let open = memchr(OPEN, bytes)?;
    if open == 0 {
        return None;
    }
    memchr(CLOSE, &bytes[open..])?;
    Some(&simple_key[..open])
}

/// A parsed simple key with a parent: the head plus its bracketed segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleKey<'a> {
    head: &'a str,
    segments: SegmentBuf<'a>,
}

impl<'a> SimpleKey<'a> {
    /// Parses `simple_key`, or returns `None` when it is a plain key.
    pub fn parse(simple_key: &'a str) -> Option<Self> {
        let head = parse_head(simple_key)?;
        let segments = Segments::starting_at(simple_key, head.len()).collect();
        Some(Self { head, segments })
    }

    pub fn head(&self) -> &'a str {
        self.head
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Number of nesting levels the key addresses, head included.
    pub fn depth(&self) -> usize {
        1 + self.segments.len()
    }

    /// Head followed by every segment.
    pub fn parts(&self) -> impl DoubleEndedIterator<Item = &'a str> + '_ {
        iter::once(self.head).chain(self.segments.iter().copied())
    }
}

/// Renders `key` as the bracketed suffix used below a parent path.
///
/// A key that already carries children (`x[y]`) has its head bracketed and its
/// remaining segments spliced in as they are (`[x][y]`), so nested paths are
/// never wrapped twice.
pub fn format_segment(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    push_segment(&mut out, key);
    out
}

pub(crate) fn push_segment(out: &mut String, key: &str) {
    out.push('[');
    match parse_head(key) {
        Some(head) => {
            out.push_str(head);
            out.push_str("][");
            out.push_str(&key[head.len() + 1..]);
        }
        None => {
            out.push_str(key);
            out.push(']');
        }
    }
}

/// Mapping key under which a sequence element at `index` is addressed.
pub(crate) fn index_key(index: usize) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(index).to_owned()
}

/// Reads `key` as a sequence index. Only canonical decimal forms match, so
/// `01`, `+1` and the empty string address nothing.
pub(crate) fn parse_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => key.parse().ok(),
        _ => None,
    }
}

/// Path of `key` below `prefix`; top-level keys stay bare.
pub fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        return key.to_string();
    }
    let mut out = String::with_capacity(prefix.len() + key.len() + 2);
    out.push_str(prefix);
    push_segment(&mut out, key);
    out
}
