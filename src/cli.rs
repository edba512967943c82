//! Command-line interface parsing for feedscope
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --serve flag for running the HTTP microservice and the --source flag
//! selecting which data origin backs the client.

use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use crate::data::{DataSource, MockSource, RemoteSource};
use crate::server::DEFAULT_ADDR;

/// Seed used for the demo data set when none is given
const DEFAULT_DEMO_SEED: u64 = 42;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified source name is not recognized
    #[error("Invalid source: '{0}'. Valid sources: mock, demo, live")]
    InvalidSource(String),
}

/// Which data origin backs the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Canned fixture tables
    #[default]
    Mock,
    /// Seeded pseudo-random data set
    Demo,
    /// Live upstream REST API
    Live,
}

impl SourceKind {
    /// Parses a source name, accepting a few aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mock" | "canned" => Some(SourceKind::Mock),
            "demo" | "generated" => Some(SourceKind::Demo),
            "live" | "remote" => Some(SourceKind::Live),
            _ => None,
        }
    }
}

/// Feedscope - social media feed dashboard and microservice
#[derive(Parser, Debug)]
#[command(name = "feedscope")]
#[command(about = "Social media feed dashboard and REST microservice")]
#[command(version)]
pub struct Cli {
    /// Run the HTTP microservice instead of the dashboard, optionally on a
    /// custom listen address
    ///
    /// Examples:
    ///   feedscope --serve                 # Serve on 127.0.0.1:3000
    ///   feedscope --serve 0.0.0.0:8080    # Serve on a custom address
    #[arg(long, value_name = "ADDR")]
    pub serve: Option<Option<String>>,

    /// Data source backing the client
    ///
    /// Valid sources: mock (canned tables), demo (seeded generator),
    /// live (upstream REST API)
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Seed for the demo data generator
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Base URL of the upstream API for the live source
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// How the process should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Terminal dashboard
    Dashboard,
    /// HTTP microservice on the given listen address
    Serve(String),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Dashboard or microservice
    pub mode: RunMode,
    /// Which data origin to construct
    pub source: SourceKind,
    /// Seed for the demo generator
    pub seed: u64,
    /// Upstream base URL override for the live source
    pub base_url: Option<String>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Dashboard,
            source: SourceKind::Mock,
            seed: DEFAULT_DEMO_SEED,
            base_url: None,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed Cli struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid source was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let source = match &cli.source {
            None => SourceKind::default(),
            Some(name) => {
                SourceKind::from_str(name).ok_or_else(|| CliError::InvalidSource(name.clone()))?
            }
        };

        let mode = match &cli.serve {
            None => RunMode::Dashboard,
            Some(None) => RunMode::Serve(DEFAULT_ADDR.to_string()),
            Some(Some(addr)) => RunMode::Serve(addr.clone()),
        };

        Ok(StartupConfig {
            mode,
            source,
            seed: cli.seed.unwrap_or(DEFAULT_DEMO_SEED),
            base_url: cli.base_url.clone(),
        })
    }

    /// Constructs the data source this configuration selects
    pub fn build_source(&self) -> Arc<dyn DataSource> {
        match self.source {
            SourceKind::Mock => Arc::new(MockSource::canned()),
            SourceKind::Demo => Arc::new(MockSource::generated(self.seed)),
            SourceKind::Live => match &self.base_url {
                Some(url) => Arc::new(RemoteSource::with_base_url(url.clone())),
                None => Arc::new(RemoteSource::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_mock_aliases() {
        assert_eq!(SourceKind::from_str("mock"), Some(SourceKind::Mock));
        assert_eq!(SourceKind::from_str("canned"), Some(SourceKind::Mock));
    }

    #[test]
    fn test_source_kind_demo_aliases() {
        assert_eq!(SourceKind::from_str("demo"), Some(SourceKind::Demo));
        assert_eq!(SourceKind::from_str("generated"), Some(SourceKind::Demo));
    }

    #[test]
    fn test_source_kind_live_aliases() {
        assert_eq!(SourceKind::from_str("live"), Some(SourceKind::Live));
        assert_eq!(SourceKind::from_str("remote"), Some(SourceKind::Live));
    }

    #[test]
    fn test_source_kind_invalid() {
        assert_eq!(SourceKind::from_str("postgres"), None);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["feedscope"]);
        assert!(cli.serve.is_none());
        assert!(cli.source.is_none());
    }

    #[test]
    fn test_cli_parse_serve_only() {
        let cli = Cli::parse_from(["feedscope", "--serve"]);
        assert!(cli.serve.is_some());
        assert!(cli.serve.as_ref().unwrap().is_none());
    }

    #[test]
    fn test_cli_parse_serve_with_addr() {
        let cli = Cli::parse_from(["feedscope", "--serve", "0.0.0.0:8080"]);
        assert_eq!(cli.serve.as_ref().unwrap().as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn test_startup_config_default_is_mock_dashboard() {
        let cli = Cli::parse_from(["feedscope"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Dashboard);
        assert_eq!(config.source, SourceKind::Mock);
    }

    #[test]
    fn test_startup_config_serve_uses_default_addr() {
        let cli = Cli::parse_from(["feedscope", "--serve"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Serve(DEFAULT_ADDR.to_string()));
    }

    #[test]
    fn test_startup_config_serve_with_custom_addr() {
        let cli = Cli::parse_from(["feedscope", "--serve", "0.0.0.0:8080"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Serve("0.0.0.0:8080".to_string()));
    }

    #[test]
    fn test_startup_config_with_source_and_seed() {
        let cli = Cli::parse_from(["feedscope", "--source", "demo", "--seed", "7"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.source, SourceKind::Demo);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_startup_config_invalid_source() {
        let cli = Cli::parse_from(["feedscope", "--source", "sqlite"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid source"));
        assert!(err.to_string().contains("sqlite"));
    }

    #[tokio::test]
    async fn test_build_source_demo_uses_generated_data() {
        let config = StartupConfig {
            source: SourceKind::Demo,
            seed: 7,
            ..Default::default()
        };

        let source = config.build_source();
        let users = source.fetch_users().await.expect("Demo source cannot fail");

        assert_eq!(users.users.len(), 10, "Demo roster is the generated one");
    }

    #[tokio::test]
    async fn test_build_source_mock_uses_canned_data() {
        let config = StartupConfig::default();

        let source = config.build_source();
        let users = source.fetch_users().await.expect("Mock source cannot fail");

        assert_eq!(users.users.len(), 16, "Mock roster is the canned one");
    }
}
