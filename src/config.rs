use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rates::RateSchedule;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid bind address {value}: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "credit-simulator")]
#[command(about = "HTTP service that simulates loan installments")]
pub struct CliArgs {
    #[arg(long, env = "CREDIT_SIMULATOR_BIND", help = "Address to listen on (overrides the config file)")]
    pub bind: Option<String>,

    #[arg(long, env = "CREDIT_SIMULATOR_CONFIG", help = "TOML file with server and rate settings")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, env = "CREDIT_SIMULATOR_LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, short, help = "Enable debug logging")]
    pub verbose: bool,
}

/// contents of the optional config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub rates: Option<RateSchedule>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// resolved server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub rates: RateSchedule,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl ServerConfig {
    /// merge command line, environment and config file; the command line wins
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    fn resolve(args: CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        let bind_value = args
            .bind
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        Ok(Self {
            bind,
            rates: file.rates.unwrap_or_default(),
            log_format: args.log_format,
            verbose: args.verbose,
        })
    }
}
