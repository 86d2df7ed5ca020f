//! Command-line surface for `restcmd`.
//! Every resource subcommand shares the same positional action and flag table;
//! the variant only decides which [`ResourceDescriptor`] is dispatched.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

use crate::action::Action;
use crate::resources::{self, ResourceDescriptor};

#[derive(Parser, Debug)]
#[command(name = "restcmd", version, about = "CRUD client for REST resource collections", long_about = None)]
pub struct Cli {
    /// Optional path to a configuration file.
    #[arg(long, env = "RESTCMD_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that take precedence over configuration files and `RESTCMD__*` variables.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// API base URL every resource path is appended to, e.g. <http://localhost:3000/api>
    #[arg(long, env = "BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Service name attached to log output.
    #[arg(long, env = "SERVICE_NAME", value_name = "NAME", global = true)]
    pub service_name: Option<String>,

    /// Override the log level (trace|debug|info|warn|error).
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Brands
    #[command(after_help = resource_help(&resources::BRANDS))]
    Brands(ResourceArgs),
    /// Cars
    #[command(after_help = resource_help(&resources::CARS))]
    Cars(ResourceArgs),
}

impl Commands {
    #[must_use]
    pub fn into_parts(self) -> (ResourceDescriptor, ResourceArgs) {
        match self {
            Self::Brands(args) => (resources::BRANDS, args),
            Self::Cars(args) => (resources::CARS, args),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ResourceArgs {
    /// create|update|delete; lists when omitted
    #[arg(value_name = "ACTION")]
    pub action: Vec<String>,

    #[command(flatten)]
    pub options: RawOptions,
}

/// Flags exactly as typed; [`crate::options::parse`] turns them into request options.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    /// Id
    #[arg(short, long, value_name = "STRING")]
    pub id: Option<String>,

    /// Sorting results, e.g: [-name,+id]
    #[arg(short, long, value_name = "STRING", allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Page
    #[arg(short, long, value_name = "NUMBER", allow_hyphen_values = true)]
    pub page: Option<String>,

    /// Limit
    #[arg(short, long, value_name = "NUMBER", allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Json string, e.g: '{"field":"value"}'
    #[arg(short, long, value_name = "JSON")]
    pub body: Option<String>,
}

fn resource_help(resource: &ResourceDescriptor) -> String {
    format!(
        "Actions: {}\n\npayload for create/update:\n{}",
        Action::TOKENS.join("|"),
        resource.payload
    )
}
