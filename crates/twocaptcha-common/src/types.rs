//! Core types shared across the client crates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::actions;

/// Opaque task identifier returned by the submission endpoint.
///
/// Only meaningful as a correlation key for the poll that follows a
/// submission, or for a later report on the answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A unit of work the service can solve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptchaTask {
    /// Base64-encoded image; content is opaque to the client
    Image { body: String },
    /// reCAPTCHA v2 challenge on a site
    RecaptchaV2 { page_url: String, site_key: String },
}

impl CaptchaTask {
    pub fn image(body: impl Into<String>) -> Self {
        Self::Image { body: body.into() }
    }

    pub fn recaptcha_v2(page_url: impl Into<String>, site_key: impl Into<String>) -> Self {
        Self::RecaptchaV2 {
            page_url: page_url.into(),
            site_key: site_key.into(),
        }
    }

    /// Operation name used in errors and spans
    pub fn operation(&self) -> Operation {
        match self {
            Self::Image { .. } => Operation::SolveImage,
            Self::RecaptchaV2 { .. } => Operation::SolveRecaptchaV2,
        }
    }
}

/// Solved task: the answer plus the id it was solved under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub task_id: TaskId,
    pub answer: String,
}

/// Feedback on a previously returned answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Bad,
}

impl Verdict {
    /// Value of the `action` field for this report
    pub fn action(&self) -> &'static str {
        match self {
            Self::Good => actions::REPORT_GOOD,
            Self::Bad => actions::REPORT_BAD,
        }
    }
}

impl From<bool> for Verdict {
    fn from(is_good: bool) -> Self {
        if is_good { Self::Good } else { Self::Bad }
    }
}

/// Public operation an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SolveImage,
    SolveRecaptchaV2,
    ReportAnswer,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SolveImage => "solve_image",
            Self::SolveRecaptchaV2 => "solve_recaptcha_v2",
            Self::ReportAnswer => "report_answer",
        })
    }
}

/// Which exchange of an operation was running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Submission endpoint, yields a task id
    Submit,
    /// Retrieval endpoint, yields the answer
    Retrieve,
    /// Single report request
    Report,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submit => "submit task",
            Self::Retrieve => "retrieve result",
            Self::Report => "send report",
        })
    }
}

/// Step of a single HTTP exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Send,
    Read,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Send => "sending request",
            Self::Read => "reading response",
        })
    }
}
