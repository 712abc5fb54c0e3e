//! # twocaptcha
//!
//! Async client for the 2Captcha solving service.
//!
//! A task is submitted to the submission endpoint, which answers with a task
//! id; the answer is then polled from the retrieval endpoint with a fixed
//! delay between attempts until it is ready, the service rejects the task,
//! or the retry budget runs out.
//!
//! ## Architecture
//! ```text
//! caller → TwoCaptchaClient → submit_and_poll (in.php) → task id
//!                           → submit_and_poll (res.php) → answer
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use twocaptcha::{SolverConfig, TwoCaptchaClient};
//!
//! # async fn run() -> Result<(), twocaptcha::SolverError> {
//! let config = SolverConfig::from_env()?;
//! let client = TwoCaptchaClient::from_config(&config)?;
//!
//! let token = client
//!     .solve_recaptcha_v2("https://example.com/login", "6Le-site-key")
//!     .await?;
//! println!("{token}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod protocol;
pub mod transport;

mod poll;

pub use client::TwoCaptchaClient;
pub use config::{PollPolicy, SolverConfig};
pub use transport::{ReqwestTransport, Transport};
pub use twocaptcha_common::{
    CaptchaTask, Operation, Phase, Solution, SolverError, Stage, TaskId, TransportError, Verdict,
};
