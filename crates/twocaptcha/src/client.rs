//! Public client façade.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::instrument;

use twocaptcha_common::constants::fields;
use twocaptcha_common::{
    CaptchaTask, Operation, Phase, Solution, SolverError, TaskId, TransportError, Verdict,
};

use crate::config::{PollPolicy, SolverConfig};
use crate::poll::{Sequence, submit_and_poll};
use crate::protocol::{self, Form};
use crate::transport::{ReqwestTransport, Transport};

/// Client for the 2Captcha submit/poll API.
///
/// Holds only immutable configuration and a transport handle, so one
/// instance can serve concurrent calls from many tasks.
pub struct TwoCaptchaClient<T = ReqwestTransport> {
    api_key: String,
    submit_url: String,
    retrieve_url: String,
    soft_id: String,
    poll: PollPolicy,
    transport: T,
}

impl TwoCaptchaClient<ReqwestTransport> {
    /// Client with default endpoints and poll policy
    pub fn new(api_key: impl Into<String>) -> Result<Self, SolverError> {
        Self::from_config(&SolverConfig::new(api_key))
    }

    pub fn from_config(config: &SolverConfig) -> Result<Self, SolverError> {
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> TwoCaptchaClient<T> {
    pub fn with_transport(config: &SolverConfig, transport: T) -> Self {
        Self {
            api_key: config.api_key.clone(),
            submit_url: config.submit_url.clone(),
            retrieve_url: config.retrieve_url.clone(),
            soft_id: config.soft_id.clone(),
            poll: config.poll,
            transport,
        }
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    /// Solve a base64-encoded image and return the recognized text
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn solve_image(&self, body: &str) -> Result<String, SolverError> {
        self.solve(&CaptchaTask::image(body))
            .await
            .map(|solution| solution.answer)
    }

    /// Encode raw image bytes and solve them
    #[instrument(skip(self, image), fields(image_len = image.len()))]
    pub async fn solve_image_bytes(&self, image: &[u8]) -> Result<String, SolverError> {
        self.solve_image(&STANDARD.encode(image)).await
    }

    /// Solve a reCAPTCHA v2 challenge and return the response token
    #[instrument(skip(self))]
    pub async fn solve_recaptcha_v2(
        &self,
        site_url: &str,
        site_key: &str,
    ) -> Result<String, SolverError> {
        self.solve(&CaptchaTask::recaptcha_v2(site_url, site_key))
            .await
            .map(|solution| solution.answer)
    }

    /// Submit any task, poll until solved, and return the answer together
    /// with the task id (needed for [`report_answer`](Self::report_answer)).
    #[instrument(skip(self, task), fields(operation = %task.operation()))]
    pub async fn solve(&self, task: &CaptchaTask) -> Result<Solution, SolverError> {
        let operation = task.operation();

        let form = self.keyed(protocol::submission_form(task, &self.soft_id));
        let task_id = self
            .run(&self.submit_url, operation, Phase::Submit, &form)
            .await
            .map(TaskId::new)?;
        tracing::debug!(%operation, task_id = %task_id, "Task accepted");

        let form = self.keyed(protocol::retrieval_form(task_id.as_str()));
        let answer = self
            .run(&self.retrieve_url, operation, Phase::Retrieve, &form)
            .await?;

        Ok(Solution { task_id, answer })
    }

    /// Report whether an answer was correct. Sent once, never retried.
    #[instrument(skip(self))]
    pub async fn report_answer(&self, is_good: bool, task_id: &str) -> Result<(), SolverError> {
        let operation = Operation::ReportAnswer;
        let verdict = Verdict::from(is_good);

        let mut query = Form::new();
        query
            .push(fields::KEY, self.api_key.as_str())
            .push(fields::ACTION, verdict.action())
            .push(fields::ID, task_id);
        let body = self
            .transport
            .get(&self.retrieve_url, &query.pairs())
            .await
            .map_err(|source| report_error(operation, source))?;

        if protocol::is_report_confirmed(&body) {
            Ok(())
        } else {
            Err(SolverError::MalformedConfirmation { operation, body })
        }
    }

    fn keyed(&self, mut form: Form) -> Form {
        form.push(fields::KEY, self.api_key.as_str());
        form
    }

    async fn run(
        &self,
        url: &str,
        operation: Operation,
        phase: Phase,
        form: &Form,
    ) -> Result<String, SolverError> {
        let sequence = Sequence { url, operation, phase };
        submit_and_poll(&self.transport, &self.poll, sequence, form).await
    }
}

fn report_error(operation: Operation, source: TransportError) -> SolverError {
    SolverError::Transport {
        operation,
        phase: Phase::Report,
        source,
    }
}
