#![deny(clippy::all, clippy::pedantic)]

use std::fmt;

use crate::error::CliError;

/// What a resource command was asked to do. `List` is implied by an empty positional list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    List,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Tokens accepted as a positional argument.
    pub const TOKENS: [&'static str; 3] = ["create", "update", "delete"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "create" => Some(Self::Create),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the raw positional arguments into a single action.
///
/// # Errors
///
/// Returns [`CliError::ArgumentValidation`] when more than one argument is given or the
/// single argument is not one of [`Action::TOKENS`].
pub fn parse<S: AsRef<str>>(positional: &[S]) -> Result<Action, CliError> {
    match positional {
        [] => Ok(Action::List),
        [token] => Action::from_token(token.as_ref()).ok_or_else(|| rejected(positional)),
        _ => Err(rejected(positional)),
    }
}

fn rejected<S: AsRef<str>>(positional: &[S]) -> CliError {
    CliError::ArgumentValidation {
        passed: positional.iter().map(|s| s.as_ref().to_string()).collect(),
        allowed: Action::TOKENS.to_vec(),
    }
}
