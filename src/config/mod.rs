//! Configuration layer: typed settings with layered precedence.
//!
//! Lowest to highest: `config/default.*`, `restcmd.*`, `--config-file`, `.env`, `.env.local`,
//! `RESTCMD__*` environment variables, then CLI flags (including the `BASE_URL` and
//! `SERVICE_NAME` variables clap reads for them).

use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::args::{Cli, SettingsOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "restcmd";
const DOTENV_FILES: [&str; 2] = [".env", ".env.local"];
const ENV_PREFIX: &str = "RESTCMD";
const DEFAULT_SERVICE_NAME: &str = "restcmd";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub service: ServiceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Option<Url>,
}

impl ApiSettings {
    /// # Errors
    ///
    /// Returns [`LoadError::MissingBaseUrl`] when no layer supplied a base URL.
    pub fn require_base_url(&self) -> Result<&Url, LoadError> {
        self.base_url.as_ref().ok_or(LoadError::MissingBaseUrl)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("base URL is required (use --base-url, BASE_URL, .env or api.base_url)")]
    MissingBaseUrl,
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings from the working directory and the process environment.
pub fn load(cli: &Cli) -> Result<Settings, LoadError> {
    load_from(cli, Path::new("."), env_source())
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

/// Load settings with config files resolved against `root` and `RESTCMD__*` keys read from `env`.
fn load_from(cli: &Cli, root: &Path, env: Environment) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(config_file(root, DEFAULT_CONFIG_BASENAME))
        .add_source(config_file(root, LOCAL_CONFIG_BASENAME));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(dotenv_layer(root)?).add_source(env);

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

fn config_file(root: &Path, basename: &str) -> File<config::FileSourceFile, FileFormat> {
    File::with_name(&root.join(basename).to_string_lossy()).required(false)
}

/// `KEY=VALUE` files in `root`, later files winning, mapped onto the nested settings keys.
fn dotenv_layer(root: &Path) -> Result<Config, LoadError> {
    let mut files = Config::builder();
    for name in DOTENV_FILES {
        files = files.add_source(
            File::from(root.join(name))
                .format(FileFormat::Ini)
                .required(false),
        );
    }
    let dotenv: RawDotEnv = files.build()?.try_deserialize()?;

    Ok(Config::builder()
        .set_override_option("api.base_url", dotenv.base_url)?
        .set_override_option("service.name", dotenv.service_name)?
        .build()?)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDotEnv {
    #[serde(alias = "BASE_URL")]
    base_url: Option<String>,
    #[serde(alias = "SERVICE_NAME")]
    service_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    service: RawServiceSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServiceSettings {
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(url) = overrides.base_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(name) = overrides.service_name.as_ref() {
            self.service.name = Some(name.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            service,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            service: build_service_settings(service),
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let Some(value) = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    else {
        return Ok(ApiSettings { base_url: None });
    };

    let base_url = Url::parse(&value)
        .map_err(|err| LoadError::invalid("api.base_url", format!("`{value}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    Ok(ApiSettings {
        base_url: Some(base_url),
    })
}

fn build_service_settings(service: RawServiceSettings) -> ServiceSettings {
    let name = service
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
    ServiceSettings { name }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
