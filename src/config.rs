//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Default listen port
const DEFAULT_PORT: u16 = 3333;

/// Default pool size
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Run mode of the process (APP_ENV)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    Development,
    Test,
    #[default]
    Production,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Test => "test",
            RunMode::Production => "production",
        }
    }

    /// Dotenv file to load for this mode
    pub fn env_file(&self) -> &'static str {
        match self {
            RunMode::Test => ".env.test",
            _ => ".env",
        }
    }
}

impl FromStr for RunMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(RunMode::Development),
            "test" => Ok(RunMode::Test),
            "production" => Ok(RunMode::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Run mode (development, test, production)
    pub run_mode: RunMode,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, collecting every invalid variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = Vec::new();

        let database_url = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => {
                issues.push(ConfigIssue::MissingEnv("DATABASE_URL"));
                String::new()
            }
        };

        let run_mode = match lookup("APP_ENV") {
            Some(value) => value.parse().unwrap_or_else(|_| {
                issues.push(ConfigIssue::InvalidValue {
                    name: "APP_ENV",
                    value,
                    expected: "one of development, test, production",
                });
                RunMode::default()
            }),
            None => RunMode::default(),
        };

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT, "a port number", &mut issues);

        let database_max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
            "a positive integer",
            &mut issues,
        );

        let host = lookup("HOST").unwrap_or_else(|| match run_mode {
            RunMode::Production => "0.0.0.0".to_string(),
            _ => "127.0.0.1".to_string(),
        });

        if !issues.is_empty() {
            return Err(ConfigError { issues });
        }

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            run_mode,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.run_mode == RunMode::Production
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self.run_mode {
            RunMode::Development => "session_ledger=debug,tower_http=debug",
            _ => "session_ledger=info,tower_http=info",
        }
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
    issues: &mut Vec<ConfigIssue>,
) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            issues.push(ConfigIssue::InvalidValue {
                name,
                value,
                expected,
            });
            default
        }),
        None => default,
    }
}

/// Load the dotenv file matching APP_ENV. A missing file is not an error.
pub fn load_dotenv() {
    let mode = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse::<RunMode>().ok())
        .unwrap_or_default();

    dotenvy::from_filename(mode.env_file()).ok();
}

/// A single invalid environment variable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable {name}: {value:?} (expected {expected})")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Configuration error listing every offending variable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid environment variables: {}", format_issues(.issues))]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
