use serde::Serialize;
use thiserror::Error;

use crate::track::TrackSnapshot;

/// The view model handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum PollState {
    /// Nothing has been classified yet.
    #[default]
    Loading,
    /// The endpoint says nothing is playing.
    Idle,
    Playing(TrackSnapshot),
    /// Rendered like `Idle`; kept apart for logs and tests.
    Error(PollError),
}

impl PollState {
    pub fn track(&self) -> Option<&TrackSnapshot> {
        match self {
            PollState::Playing(track) => Some(track),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PollState::Error(_))
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            PollState::Loading => "loading",
            PollState::Idle => "idle",
            PollState::Playing(_) => "playing",
            PollState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum PollError {
    #[error("fetch failed: {0}")]
    Transport(String),
    #[error("endpoint answered with status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollErrorKind {
    TransportError,
    ContentAbsent,
    MalformedPayload,
}

impl PollError {
    pub fn kind(&self) -> PollErrorKind {
        match self {
            PollError::Transport(_) => PollErrorKind::TransportError,
            PollError::Status(_) => PollErrorKind::ContentAbsent,
            PollError::MalformedPayload(_) => PollErrorKind::MalformedPayload,
        }
    }
}
