//! CLI command implementations.

pub(crate) mod children;
pub(crate) mod page;

use std::path::PathBuf;

use atlwiki_client::{WikiClient, cloud_base_url};
use atlwiki_config::{CliSettings, Config};
use clap::Args;
use tracing::info;

use crate::error::CliError;

pub(crate) use children::ChildrenArgs;
pub(crate) use page::PageArgs;

/// Site and credential arguments shared by all commands.
#[derive(Args, Debug, Default)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover atlwiki.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Atlassian site subdomain (overrides config).
    #[arg(long, global = true, env = "ATLWIKI_COMPANY")]
    company: Option<String>,

    /// Account username (overrides config).
    #[arg(long, global = true, env = "ATLWIKI_USERNAME")]
    username: Option<String>,

    /// API token (overrides config).
    #[arg(long, global = true, env = "ATLWIKI_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            company: self.company.clone(),
            username: self.username.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Load config and build a client from it.
    pub(crate) fn client(&self) -> Result<WikiClient, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        config.validate()?;
        let atlassian = config.require_atlassian()?;

        let base_url = cloud_base_url(&atlassian.company);
        info!("Using wiki at {} as {}", base_url, atlassian.username);

        Ok(WikiClient::with_timeout(
            &base_url,
            &atlassian.username,
            &atlassian.token,
            config.http.timeout(),
        ))
    }
}
