//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use secrecy::SecretString;
use serde::Deserialize;
use service::domain::lead;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Backend gateway configuration.
    pub gateway: Gateway,

    /// Device-local storage configuration.
    pub storage: Storage,

    /// Service configuration.
    pub service: Service,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Backend gateway configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Gateway {
    /// Base URL of the backend API.
    #[default("http://127.0.0.1:8080/api".to_owned())]
    pub endpoint: String,

    /// Bearer token to authorize backend requests with.
    pub auth_token: String,
}

impl From<Gateway> for service::infra::gateway::Config {
    fn from(value: Gateway) -> Self {
        let Gateway {
            endpoint,
            auth_token,
        } = value;
        Self {
            endpoint,
            auth_token: SecretString::from(auth_token),
        }
    }
}

/// Device-local storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory the device-local state is persisted under.
    #[default(PathBuf::from("./storage"))]
    pub dir: PathBuf,
}

/// Service configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Service tasks configuration.
    pub tasks: Tasks,
}

impl TryFrom<Service> for service::Config {
    type Error = InvalidLeadKind;

    fn try_from(value: Service) -> Result<Self, Self::Error> {
        let Service {
            tasks: Tasks { poll_leads },
        } = value;

        let kinds = poll_leads
            .kinds
            .iter()
            .map(|raw| {
                raw.parse::<lead::Kind>()
                    .map_err(|_| InvalidLeadKind(raw.clone()))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            poll_leads: service::task::poll_leads::Config {
                interval: poll_leads.interval,
                kinds,
            },
        })
    }
}

/// Service tasks configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tasks {
    /// `PollLeads` task configuration.
    pub poll_leads: PollLeads,
}

/// `PollLeads` task configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct PollLeads {
    /// Interval between polls.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,

    /// Lead kinds whose worklists are polled.
    #[default(vec![
        "CUSTOMER".to_owned(),
        "AGENT".to_owned(),
        "CORE_MEMBER".to_owned(),
        "EXPERT".to_owned(),
    ])]
    pub kinds: Vec<String>,
}

/// Error of a configured lead kind not being recognized.
#[derive(Clone, Debug, Display, Error)]
#[display("`{_0}` is not a known lead kind")]
pub struct InvalidLeadKind(#[error(not(source))] String);

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
