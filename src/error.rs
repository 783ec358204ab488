use thiserror::Error as ThisError;

use crate::path::child_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value the operation does not accept.
    InvalidArgument,
    /// Input nests deeper than `Options::max_depth`.
    DepthLimit,
    /// Reshaped data could not be read back into a typed record.
    Deserialize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Unflatten,
    Flatten,
    Uploads,
    Unknown,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub stage: ErrorStage,
    pub message: String,
    /// Simple key being processed when the error was raised, if any.
    pub path: Option<String>,
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            stage: ErrorStage::Unknown,
            message: message.into(),
            path: None,
        }
    }

    pub fn depth_limit(max_depth: usize) -> Self {
        Self {
            kind: ErrorKind::DepthLimit,
            stage: ErrorStage::Unflatten,
            message: format!("nesting exceeds the maximum depth of {max_depth}"),
            path: None,
        }
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            stage: ErrorStage::Uploads,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_stage(mut self, stage: ErrorStage) -> Self {
        self.stage = stage;
        self
    }

    /// Records that the error happened below `key`, prefixing any path
    /// already recorded by a deeper level.
    pub fn within(mut self, key: &str) -> Self {
        self.path = Some(match self.path.take() {
            Some(inner) => child_path(key, &inner),
            None => key.to_string(),
        });
        self
    }
}
