//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::DebugData;

/// Main error type for edgemgmt
#[derive(Error, Debug)]
pub enum EdgeError {
    /// Caller supplied an invalid argument. Raised before any network call.
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    /// Remote API answered outside 2xx, or the transport failed (code 0).
    #[error(transparent)]
    Response(Box<ResponseError>),

    /// Recognized vendor error refined out of a [`ResponseError`].
    #[error(transparent)]
    Api(ApiFault),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EdgeError {
    /// HTTP status carried by a response error (`Some(0)` for transport
    /// failures), `None` for every other variant.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|err| err.status_code)
    }

    /// Borrow the underlying response error, if this is one.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseError> {
        match self {
            Self::Response(err) => Some(err),
            _ => None,
        }
    }

    /// Convert a response error whose body carries a recognized vendor code
    /// into [`EdgeError::Api`]. Every other error is returned unchanged.
    #[must_use]
    pub fn refine(self) -> Self {
        match self {
            Self::Response(err) => match ApiFault::from_response(&err) {
                Some(fault) => Self::Api(fault),
                None => Self::Response(err),
            },
            other => other,
        }
    }

    /// `true` when the remote API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

impl From<ResponseError> for EdgeError {
    fn from(err: ResponseError) -> Self {
        Self::Response(Box::new(err))
    }
}

impl From<ApiFault> for EdgeError {
    fn from(fault: ApiFault) -> Self {
        Self::Api(fault)
    }
}

/// Result type alias for edgemgmt operations
pub type Result<T> = std::result::Result<T, EdgeError>;

/// Failed HTTP transaction.
///
/// `status_code == 0` marks a transport failure (timeout, refused
/// connection, DNS); no HTTP status was received and the body fields are
/// empty.
#[derive(Debug, Clone)]
pub struct ResponseError {
    pub status_code: u16,
    pub status_phrase: String,
    pub uri: String,
    /// `message` (or `fault.faultstring`) from the decoded error body.
    pub message: Option<String>,
    /// Vendor error code (`code` or `fault.detail.errorcode`).
    pub error_code: Option<String>,
    pub body: Option<Value>,
    pub debug: DebugData,
}

impl ResponseError {
    /// Build an error for a non-2xx status, pulling `message` and `code` out
    /// of the decoded body when present.
    pub fn from_status(
        status_code: u16,
        status_phrase: impl Into<String>,
        uri: impl Into<String>,
        body: Option<Value>,
        debug: DebugData,
    ) -> Self {
        let (message, error_code) = body.as_ref().map(extract_error_fields).unwrap_or_default();

        Self {
            status_code,
            status_phrase: status_phrase.into(),
            uri: uri.into(),
            message,
            error_code,
            body,
            debug,
        }
    }

    /// Build an error for a request that never produced an HTTP status.
    pub fn transport(uri: impl Into<String>, description: impl Into<String>, debug: DebugData) -> Self {
        Self {
            status_code: 0,
            status_phrase: description.into(),
            uri: uri.into(),
            message: None,
            error_code: None,
            body: None,
            debug,
        }
    }

    #[must_use]
    pub fn code_class(&self) -> u16 {
        self.status_code / 100
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.status_code == 0
    }

    /// Look up a named entry of the `contexts` array vendor errors attach.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Value> {
        self.body
            .as_ref()?
            .get("contexts")?
            .as_array()?
            .iter()
            .find(|ctx| ctx.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|ctx| ctx.get("value"))
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_transport() {
            return write!(f, "Transport failure for {}: {}", self.uri, self.status_phrase);
        }

        write!(f, "{} {} for {}", self.status_code, self.status_phrase, self.uri)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ResponseError {}

fn extract_error_fields(body: &Value) -> (Option<String>, Option<String>) {
    let fault = body.get("fault");

    let message = body
        .get("message")
        .or_else(|| fault.and_then(|f| f.get("faultstring")))
        .and_then(Value::as_str)
        .map(String::from);

    let code = body
        .get("code")
        .or_else(|| fault.and_then(|f| f.pointer("/detail/errorcode")))
        .and_then(Value::as_str)
        .map(String::from);

    (message, code)
}

/// Vendor error codes with structured context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiFault {
    #[error("Insufficient funds: {message}")]
    InsufficientFunds { message: String, cost: CostBreakdown },

    #[error("Rate plan not published: {message}")]
    RatePlanNotPublished { message: String, rate_plan: Option<String> },

    #[error("Developer already exists: {message}")]
    DeveloperAlreadyExists { message: String },
}

pub const INSUFFICIENT_FUNDS_CODE: &str = "mint.insufficientFunds";
pub const RATE_PLAN_NOT_PUBLISHED_CODE: &str = "mint.ratePlanNotPublished";
pub const DEVELOPER_ALREADY_EXISTS_CODE: &str = "developer.service.DeveloperAlreadyExists";

impl ApiFault {
    /// Recognize a vendor fault from the error code of a response error.
    #[must_use]
    pub fn from_response(err: &ResponseError) -> Option<Self> {
        let message = err.message.clone().unwrap_or_else(|| err.status_phrase.clone());

        match err.error_code.as_deref()? {
            INSUFFICIENT_FUNDS_CODE => Some(Self::InsufficientFunds {
                message,
                cost: CostBreakdown::from_response(err),
            }),
            RATE_PLAN_NOT_PUBLISHED_CODE => Some(Self::RatePlanNotPublished {
                message,
                rate_plan: err.context("ratePlan").and_then(context_string),
            }),
            DEVELOPER_ALREADY_EXISTS_CODE => Some(Self::DeveloperAlreadyExists { message }),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => INSUFFICIENT_FUNDS_CODE,
            Self::RatePlanNotPublished { .. } => RATE_PLAN_NOT_PUBLISHED_CODE,
            Self::DeveloperAlreadyExists { .. } => DEVELOPER_ALREADY_EXISTS_CODE,
        }
    }
}

/// Cost components reported alongside an insufficient-funds fault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub required_balance: Option<f64>,
    pub current_balance: Option<f64>,
    pub setup_fee: Option<f64>,
    pub recurring_fee: Option<f64>,
    pub currency: Option<String>,
}

impl CostBreakdown {
    fn from_response(err: &ResponseError) -> Self {
        let amount = |name: &str| err.context(name).and_then(context_number);

        Self {
            required_balance: amount("requiredBalance"),
            current_balance: amount("currentBalance"),
            setup_fee: amount("setupFee"),
            recurring_fee: amount("recurringFee"),
            currency: err.context("currency").and_then(context_string),
        }
    }
}

// Context values arrive as JSON numbers or as numeric strings.
fn context_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn context_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
