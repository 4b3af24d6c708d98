//! Error types for curlgen

use thiserror::Error;

/// Main error type for curlgen
///
/// Every variant is terminal for the conversion in progress; nothing is
/// retried internally.
#[derive(Error, Debug)]
pub enum CurlgenError {
    #[error("Syntax error at byte {position}: {message}")]
    Syntax {
        position: usize,
        message: String,
    },

    #[error("Unknown flag: {flag}")]
    UnknownFlag { flag: String },

    #[error("Flag {flag} requires an argument")]
    MissingArgument { flag: String },

    #[error("No URL found in curl command")]
    MissingUrl,

    #[error("Multiple URLs found: '{first}' and '{second}'")]
    MultipleUrls { first: String, second: String },

    #[error("Conflicting request body: {0}")]
    ConflictingBody(String),

    #[error("Invalid value for {flag}: {message}")]
    InvalidArgument { flag: String, message: String },

    #[error("The {style} target does not support {feature}")]
    UnsupportedFeature {
        style: &'static str,
        feature: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl CurlgenError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        CurlgenError::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid(flag: &str, message: impl Into<String>) -> Self {
        CurlgenError::InvalidArgument {
            flag: flag.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(style: &'static str, feature: impl Into<String>) -> Self {
        CurlgenError::UnsupportedFeature {
            style,
            feature: feature.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurlgenError>;
