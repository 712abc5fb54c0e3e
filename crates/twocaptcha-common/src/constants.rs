//! Shared constants for the 2Captcha client.

/// Default submission endpoint (accepts a new task, returns its id)
pub const DEFAULT_SUBMIT_URL: &str = "https://2captcha.com/in.php";

/// Default retrieval endpoint (answers, reports)
pub const DEFAULT_RETRIEVE_URL: &str = "https://2captcha.com/res.php";

/// Client identifier sent with every submission
pub const DEFAULT_SOFT_ID: &str = "2099";

/// Poll attempts per submit-and-poll sequence
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Delay between poll attempts (5 seconds)
pub const DEFAULT_POLL_DELAY_MS: u64 = 5_000;

/// Per-request transport timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Content type of every POST body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Markers in plain-text response bodies
pub mod markers {
    /// Success line: OK|{payload}
    pub const OK_PREFIX: &str = "OK|";

    /// Task accepted but not solved yet
    pub const NOT_READY: &str = "CAPCHA_NOT_READY";

    /// Report accepted
    pub const REPORT_RECORDED: &str = "OK_REPORT_RECORDED";
}

/// Form and query field names
pub mod fields {
    pub const KEY: &str = "key";
    pub const SOFT_ID: &str = "soft_id";
    pub const METHOD: &str = "method";
    pub const BODY: &str = "body";
    pub const GOOGLE_KEY: &str = "googlekey";
    pub const PAGE_URL: &str = "pageurl";
    pub const ACTION: &str = "action";
    pub const ID: &str = "id";
}

/// Values of the `method` field
pub mod methods {
    pub const BASE64: &str = "base64";
    pub const USER_RECAPTCHA: &str = "userrecaptcha";
}

/// Values of the `action` field
pub mod actions {
    pub const GET: &str = "get";
    pub const REPORT_GOOD: &str = "reportgood";
    pub const REPORT_BAD: &str = "reportbad";
}
