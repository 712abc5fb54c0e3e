//! Submit-and-poll sequence.
//!
//! One loop serves both the task submission and the result retrieval: the
//! response grammar is the same on both endpoints. A sequence sends the first
//! request immediately, then waits the policy delay before each further
//! request, and stops on a success, a rejection, or an exhausted budget.

use tokio::time::sleep;
use tracing::debug;

use twocaptcha_common::{Operation, Phase, SolverError};

use crate::config::PollPolicy;
use crate::protocol::{Form, Response};
use crate::transport::Transport;

/// Position of a request within its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attempt {
    /// No delay before this one
    First,
    Retry,
}

/// Target and labels of one sequence
pub(crate) struct Sequence<'a> {
    pub url: &'a str,
    pub operation: Operation,
    pub phase: Phase,
}

/// Run a sequence and return the payload of the `OK|` line.
///
/// `form` must already carry the API key.
pub(crate) async fn submit_and_poll<T: Transport + ?Sized>(
    transport: &T,
    policy: &PollPolicy,
    sequence: Sequence<'_>,
    form: &Form,
) -> Result<String, SolverError> {
    let Sequence { url, operation, phase } = sequence;
    let body = form.encode();
    let mut attempt = Attempt::First;

    for number in 1..=policy.max_attempts {
        if attempt == Attempt::Retry {
            sleep(policy.delay()).await;
        }

        let text = transport
            .post_form(url, body.clone())
            .await
            .map_err(|source| SolverError::Transport { operation, phase, source })?;

        let response = Response::classify(&text);
        debug!(%operation, %phase, attempt = number, outcome = response.label(), "Poll attempt");

        match response {
            Response::Ready(payload) => return Ok(payload),
            Response::NotReady => attempt = Attempt::Retry,
            Response::Rejected(body) => {
                return Err(SolverError::Rejected { operation, phase, body });
            }
        }
    }

    Err(SolverError::RetryExhausted {
        operation,
        phase,
        attempts: policy.max_attempts,
    })
}
