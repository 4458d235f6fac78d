//! Configuration loading.
//!
//! Values are layered: built-in defaults, then `jobwatch.toml`, then
//! `JOBWATCH_*` environment variables, then whatever the CLI passed in.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "jobwatch.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address of the orchestrator's RPC endpoint.
    pub rpc_addr: SocketAddr,
    /// Use the in-process simulated backend instead of the RPC one.
    pub simulation: bool,
    pub verbose: bool,
    pub json_logs: bool,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub channel: NotificationChannelType,
    pub slack_webhook: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannelType {
    #[default]
    None,
    Slack,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 7878),
            simulation: false,
            verbose: false,
            json_logs: false,
            notifications: NotificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration using the default config file location.
    pub fn new<A: Serialize>(cli: Option<&A>) -> Result<Self> {
        Self::from_file(Path::new(DEFAULT_CONFIG_FILE), cli)
    }

    /// Load configuration from an explicit config file path.
    pub fn from_file<A: Serialize>(path: &Path, cli: Option<&A>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("JOBWATCH_").split("__"));

        if let Some(cli) = cli {
            figment = figment.merge(Serialized::defaults(cli));
        }

        figment.extract().context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Serialize)]
    struct NoArgs {}

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            AppConfig::from_file(&dir.path().join("missing.toml"), None::<&NoArgs>).unwrap();

        assert_eq!(config.rpc_addr.port(), 7878);
        assert!(!config.simulation);
        assert_eq!(config.notifications.channel, NotificationChannelType::None);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobwatch.toml");
        fs::write(
            &path,
            "rpc_addr = \"127.0.0.1:9000\"\nverbose = true\n\n[notifications]\nchannel = \"slack\"\nslack_webhook = \"https://hooks.example/x\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path, None::<&NoArgs>).unwrap();

        assert_eq!(config.rpc_addr.port(), 9000);
        assert!(config.verbose);
        assert_eq!(config.notifications.channel, NotificationChannelType::Slack);
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("jobwatch.toml", "verbose = false")?;
            jail.set_env("JOBWATCH_VERBOSE", "true");

            let config =
                AppConfig::from_file(Path::new("jobwatch.toml"), None::<&NoArgs>).unwrap();
            assert!(config.verbose);
            Ok(())
        });
    }

    #[test]
    fn cli_overrides_env() {
        #[derive(Serialize)]
        struct Cli {
            simulation: bool,
        }

        figment::Jail::expect_with(|jail| {
            jail.set_env("JOBWATCH_SIMULATION", "false");

            let config = AppConfig::from_file(
                Path::new("absent.toml"),
                Some(&Cli { simulation: true }),
            )
            .unwrap();
            assert!(config.simulation);
            Ok(())
        });
    }
}
