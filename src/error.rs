#![deny(clippy::all, clippy::pedantic)]

use std::fmt;

use thiserror::Error;

use crate::config::LoadError;

pub const EXIT_SETUP: u8 = 1;
pub const EXIT_ARGUMENT: u8 = 2;
pub const EXIT_BODY_PARSE: u8 = 3;
pub const EXIT_PRECONDITION: u8 = 4;
pub const EXIT_REMOTE: u8 = 5;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error(
        "Argument pass error: [{}] - Only one of: [{}] or without arguments must be passed",
        .passed.join(","),
        .allowed.join(",")
    )]
    ArgumentValidation {
        passed: Vec<String>,
        allowed: Vec<&'static str>,
    },
    #[error("Body parse error: {0}")]
    BodyParse(#[source] serde_json::Error),
    #[error("{0}")]
    Precondition(MissingOption),
    #[error("{message}")]
    Remote { message: String },
}

impl CliError {
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Process exit status for this error; each failure class gets its own code.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_)
            | Self::Url(_)
            | Self::Http(_)
            | Self::Telemetry(_)
            | Self::Output(_) => EXIT_SETUP,
            Self::ArgumentValidation { .. } => EXIT_ARGUMENT,
            Self::BodyParse(_) => EXIT_BODY_PARSE,
            Self::Precondition(_) => EXIT_PRECONDITION,
            Self::Remote { .. } => EXIT_REMOTE,
        }
    }
}

/// Required flag combination an action was invoked without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOption {
    Body,
    Id,
    IdAndBody,
}

impl fmt::Display for MissingOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body => f.write_str("The option --body is required"),
            Self::Id => f.write_str("The option --id is required"),
            Self::IdAndBody => f.write_str("The options --id and --body are required"),
        }
    }
}
