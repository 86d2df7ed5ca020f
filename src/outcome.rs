#![deny(clippy::all, clippy::pedantic)]

use std::io::Write;

use reqwest::StatusCode;

use crate::error::CliError;
use crate::transport::{ApiResponse, RemoteFailure, ResponseBody};

/// Result of the single request made by an invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        status: StatusCode,
        body: ResponseBody,
    },
    Failure {
        message: String,
    },
}

impl From<Result<ApiResponse, RemoteFailure>> for Outcome {
    fn from(result: Result<ApiResponse, RemoteFailure>) -> Self {
        match result {
            Ok(ApiResponse { status, body }) => Self::Success { status, body },
            Err(RemoteFailure { message }) => Self::Failure { message },
        }
    }
}

/// Writes successful payloads to `out`; failures are handed back as [`CliError::Remote`].
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// # Errors
    ///
    /// Returns [`CliError::Remote`] for a failure outcome and [`CliError::Output`] when `out`
    /// cannot be written.
    pub fn report(&mut self, outcome: Outcome) -> Result<(), CliError> {
        match outcome {
            Outcome::Success { status, .. } if status == StatusCode::NO_CONTENT => {
                self.line("OK")
            }
            Outcome::Success { body, .. } => match body {
                ResponseBody::Empty => Ok(()),
                ResponseBody::Text(text) => self.line(&text),
                ResponseBody::Json(value) => {
                    let rendered = serde_json::to_string_pretty(&value).map_err(|e| {
                        CliError::Output(std::io::Error::other(format!(
                            "failed to render output: {e}"
                        )))
                    })?;
                    self.line(&rendered)
                }
            },
            Outcome::Failure { message } => Err(CliError::remote(message)),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

/// Print an error to `err` as a single `error: ...` line.
pub fn report_error<W: Write>(err: &mut W, error: &CliError) {
    let _ = writeln!(err, "error: {error}");
}
