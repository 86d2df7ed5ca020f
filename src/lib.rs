//! restcmd: CRUD command-line client for REST resource collections.
//!
//! Each resource subcommand (`brands`, `cars`, ...) runs the same pipeline:
//! [`action::parse`] → [`options::parse`] → [`dispatch::plan`] → [`dispatch::Request::send`]
//! → [`outcome::Reporter`]. Everything up to the plan is local and needs no settings.

#![deny(clippy::all, clippy::pedantic)]

pub mod action;
pub mod args;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod options;
pub mod outcome;
pub mod resources;
pub mod telemetry;
pub mod transport;

#[cfg(test)]
mod tests;

use std::io::Write;

use tracing::{Instrument, info_span};

use crate::args::ResourceArgs;
use crate::client::ApiClient;
use crate::config::Settings;
use crate::dispatch::Request;
use crate::error::CliError;
use crate::outcome::Reporter;
use crate::resources::ResourceDescriptor;
use crate::transport::Transport;

/// Parse the action and options and check the action's requirements. Touches no network.
///
/// # Errors
///
/// Returns [`CliError::ArgumentValidation`], [`CliError::BodyParse`] or
/// [`CliError::Precondition`].
pub fn prepare(resource: &ResourceDescriptor, args: ResourceArgs) -> Result<Request, CliError> {
    let action = action::parse(&args.action)?;
    let options = options::parse(args.options)?;
    dispatch::plan(resource, action, &options)
}

/// Validate, dispatch and report one resource command against `transport`.
///
/// # Errors
///
/// Returns the first local validation error, or [`CliError::Remote`] when the request failed.
pub async fn run_resource<T, W>(
    transport: &T,
    resource: &ResourceDescriptor,
    args: ResourceArgs,
    out: W,
) -> Result<(), CliError>
where
    T: Transport + ?Sized,
    W: Write,
{
    let request = prepare(resource, args)?;
    Reporter::new(out).report(request.send(transport).await)
}

/// Run a parsed invocation with resolved settings, printing payloads to stdout.
///
/// The base URL is only required once local validation has passed.
///
/// # Errors
///
/// Propagates validation errors from [`prepare`], a missing base URL, client construction
/// errors and remote failures.
pub async fn run(
    settings: &Settings,
    resource: ResourceDescriptor,
    args: ResourceArgs,
) -> Result<(), CliError> {
    let span = info_span!("restcmd", service = %settings.service.name, resource = resource.name);
    async move {
        let request = prepare(&resource, args)?;
        let client = ApiClient::new(settings.api.require_base_url()?.clone())?;
        Reporter::new(std::io::stdout()).report(request.send(&client).await)
    }
    .instrument(span)
    .await
}
