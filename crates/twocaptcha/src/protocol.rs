//! Plain-text wire protocol.
//!
//! Every endpoint answers with one line: `OK|<payload>` on success,
//! `CAPCHA_NOT_READY` while a task is still queued, or an arbitrary error
//! code. Only the meaning of `<payload>` differs between submission (task id)
//! and retrieval (answer).

use twocaptcha_common::CaptchaTask;
use twocaptcha_common::constants::{actions, fields, markers, methods};

/// Ordered form fields of a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(&'static str, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Borrowed name/value pairs, e.g. for a request query
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(n, v)| (*n, v.as_str())).collect()
    }

    /// `application/x-www-form-urlencoded` encoding
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Submission form for a task, without the API key
pub fn submission_form(task: &CaptchaTask, soft_id: &str) -> Form {
    let mut form = Form::new();
    match task {
        CaptchaTask::Image { body } => {
            form.push(fields::METHOD, methods::BASE64)
                .push(fields::BODY, body.as_str());
        }
        CaptchaTask::RecaptchaV2 { page_url, site_key } => {
            form.push(fields::METHOD, methods::USER_RECAPTCHA)
                .push(fields::GOOGLE_KEY, site_key.as_str())
                .push(fields::PAGE_URL, page_url.as_str());
        }
    }
    form.push(fields::SOFT_ID, soft_id);
    form
}

/// Result-request form for a task id, without the API key
pub fn retrieval_form(task_id: &str) -> Form {
    let mut form = Form::new();
    form.push(fields::ACTION, actions::GET).push(fields::ID, task_id);
    form
}

/// Classification of a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success; task id or answer depending on the endpoint
    Ready(String),
    /// Still processing, ask again later
    NotReady,
    /// Anything else, kept verbatim
    Rejected(String),
}

impl Response {
    /// Success requires the body to start with `OK|`; a marker embedded later
    /// in an error line is not a success.
    pub fn classify(body: &str) -> Self {
        if let Some(payload) = body.strip_prefix(markers::OK_PREFIX) {
            Self::Ready(payload.to_string())
        } else if body.contains(markers::NOT_READY) {
            Self::NotReady
        } else {
            Self::Rejected(body.to_string())
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::NotReady => "not_ready",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// True if a report response confirms the report was recorded
pub fn is_report_confirmed(body: &str) -> bool {
    body.contains(markers::REPORT_RECORDED)
}
