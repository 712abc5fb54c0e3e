//! # twocaptcha-common
//!
//! Shared types, errors, and protocol constants for the 2Captcha client.
//!
//! ## Modules
//! - `types` - Task descriptions, ids, solutions, operation/phase labels
//! - `error` - Transport and solver error types
//! - `constants` - Endpoints, field names, response markers, defaults

pub mod constants;
pub mod error;
pub mod types;

pub use error::{BoxError, SolverError, TransportError};
pub use types::*;
