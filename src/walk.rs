use std::borrow::Cow;
use std::iter::Enumerate;
use std::slice;

use serde_json::{map, Map, Value};

use crate::path::{child_path, extract_segments, index_key, parse_head, parse_index};

enum Children<'a> {
    Object(map::Iter<'a>),
    Array(Enumerate<slice::Iter<'a, Value>>),
}

impl<'a> Children<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Children::Object(map.iter())),
            Value::Array(items) => Some(Children::Array(items.iter().enumerate())),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<(Cow<'a, str>, &'a Value)> {
        match self {
            Children::Object(iter) => iter
                .next()
                .map(|(key, value)| (Cow::Borrowed(key.as_str()), value)),
            Children::Array(iter) => iter
                .next()
                .map(|(index, value)| (Cow::Owned(index_key(index)), value)),
        }
    }
}

struct Frame<'a> {
    prefix: String,
    children: Children<'a>,
}

/// Depth-first walk over every scalar of a nested value, yielding its simple
/// key and the value itself.
///
/// Keys are visited in insertion order and sequences are addressed by index.
/// Empty containers produce nothing. The walk keeps its own stack, so deeply
/// nested input cannot overflow the call stack.
pub struct Leaves<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Leaves<'a> {
    pub fn new(nested: &'a Map<String, Value>) -> Self {
        Self::root(Children::Object(nested.iter()))
    }

    /// Walks an object or a sequence; any other value has no leaves.
    pub fn of_value(value: &'a Value) -> Self {
        match Children::of(value) {
            Some(children) => Self::root(children),
            None => Self { stack: Vec::new() },
        }
    }

    fn root(children: Children<'a>) -> Self {
        Self {
            stack: vec![Frame {
                prefix: String::new(),
                children,
            }],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((key, value)) = frame.children.next() else {
                self.stack.pop();
                continue;
            };
            let path = child_path(&frame.prefix, &key);
            match Children::of(value) {
                Some(children) => self.stack.push(Frame {
                    prefix: path,
                    children,
                }),
                None => return Some((path, value)),
            }
        }
    }
}

pub(crate) fn keys(nested: &Map<String, Value>) -> Vec<String> {
    Leaves::new(nested).map(|(path, _)| path).collect()
}

pub(crate) fn lookup<'a>(
    simple_key: &str,
    nested: &'a Map<String, Value>,
) -> Option<&'a Value> {
    let Some(head) = parse_head(simple_key) else {
        return nested.get(simple_key);
    };
    let mut current = nested.get(head)?;
    for segment in extract_segments(&simple_key[head.len()..]) {
        current = child(current, segment)?;
    }
    Some(current)
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => items.get(parse_index(key)?),
        _ => None,
    }
}
