//! Routes an [`Action`] on a resource to exactly one HTTP call.
//!
//! | action | requires      | request                      |
//! |--------|---------------|------------------------------|
//! | list   |               | `GET path[/id]?sort&page&limit` |
//! | create | body          | `POST path`                  |
//! | update | id, body      | `PATCH path/id`              |
//! | delete | id            | `DELETE path/id`             |
//!
//! [`plan`] checks the requirements without touching the network, so a missing option is
//! reported before any settings or client are needed.

#![deny(clippy::all, clippy::pedantic)]

use serde_json::Value;
use tracing::debug;

use crate::action::Action;
use crate::error::{CliError, MissingOption};
use crate::options::RequestOptions;
use crate::outcome::Outcome;
use crate::resources::ResourceDescriptor;
use crate::transport::{ResourcePath, Transport};

/// The single request an invocation will make.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get {
        path: ResourcePath,
        query: Vec<(&'static str, String)>,
    },
    Post {
        path: ResourcePath,
        body: Value,
    },
    Patch {
        path: ResourcePath,
        body: Value,
    },
    Delete {
        path: ResourcePath,
    },
}

impl Request {
    /// Perform the request. Remote failures come back as [`Outcome::Failure`].
    pub async fn send<T: Transport + ?Sized>(&self, transport: &T) -> Outcome {
        let result = match self {
            Self::Get { path, query } => transport.get(path, query).await,
            Self::Post { path, body } => transport.post(path, body).await,
            Self::Patch { path, body } => transport.patch(path, body).await,
            Self::Delete { path } => transport.delete(path).await,
        };
        Outcome::from(result)
    }
}

/// Check the action's required options and build its request.
///
/// # Errors
///
/// Returns [`CliError::Precondition`] when a required option is missing.
pub fn plan(
    resource: &ResourceDescriptor,
    action: Action,
    options: &RequestOptions,
) -> Result<Request, CliError> {
    let path = ResourcePath::new(resource.path);
    debug!(resource = resource.name, %action, "planning request");

    let request = match action {
        Action::List => Request::Get {
            path: match options.id() {
                Some(id) => path.child(id),
                None => path,
            },
            query: list_query(options),
        },
        Action::Create => {
            let body = options
                .body()
                .ok_or(CliError::Precondition(MissingOption::Body))?;
            Request::Post {
                path,
                body: body.clone(),
            }
        }
        Action::Update => {
            let (id, body) = id_and_body(options)?;
            Request::Patch {
                path: path.child(id),
                body: body.clone(),
            }
        }
        Action::Delete => {
            let id = options
                .id()
                .ok_or(CliError::Precondition(MissingOption::Id))?;
            Request::Delete {
                path: path.child(id),
            }
        }
    };
    Ok(request)
}

/// [`plan`] then [`Request::send`].
///
/// # Errors
///
/// Returns [`CliError::Precondition`] when a required option is missing. Remote failures are
/// not errors here; they come back as [`Outcome::Failure`].
pub async fn dispatch<T: Transport + ?Sized>(
    transport: &T,
    resource: &ResourceDescriptor,
    action: Action,
    options: &RequestOptions,
) -> Result<Outcome, CliError> {
    let request = plan(resource, action, options)?;
    Ok(request.send(transport).await)
}

fn id_and_body(options: &RequestOptions) -> Result<(&str, &Value), CliError> {
    match (options.id(), options.body()) {
        (Some(id), Some(body)) => Ok((id, body)),
        _ => Err(CliError::Precondition(MissingOption::IdAndBody)),
    }
}

/// Query pairs for listing; only options that were supplied are sent.
#[must_use]
pub fn list_query(options: &RequestOptions) -> Vec<(&'static str, String)> {
    let mut q = Vec::new();
    if let Some(sort) = &options.sort {
        q.push(("sort", sort.clone()));
    }
    if let Some(page) = options.page {
        q.push(("page", page.to_string()));
    }
    if let Some(limit) = options.limit {
        q.push(("limit", limit.to_string()));
    }
    q
}
