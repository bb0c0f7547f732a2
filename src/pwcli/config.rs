//! Where settings come from.
//!
//! Every setting resolves through the same three layers: a command-line
//! flag wins, then the matching `PW_*` environment variable, then the
//! `pw.*` key in git config. Only the server is mandatory.

use crate::error::{PwError, Result};
use crate::git;
use std::env;

/// Connection settings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// API root, e.g. `https://patchwork.example.com/api/1.2`.
    pub server: String,
    /// Project link-name used to scope series, patch and bundle listings.
    pub project: Option<String>,
    /// API token; wins over username/password when both are configured.
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Flag values as they came from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server: Option<String>,
    pub project: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Resolve settings from flags, the environment and git config.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::from_lookups(overrides, |name| env::var(name).ok(), git::git_config)
    }

    fn from_lookups(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
        git: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let resolve = |flag: &Option<String>, env_name: &str, git_key: &str| {
            flag.clone()
                .or_else(|| env(env_name))
                .or_else(|| git(git_key))
        };

        let server = resolve(&overrides.server, "PW_SERVER", "pw.server")
            .map(|server| server.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                PwError::Config(
                    "no server configured; set pw.server, PW_SERVER or --server".to_string(),
                )
            })?;

        Ok(Self {
            server,
            project: resolve(&overrides.project, "PW_PROJECT", "pw.project"),
            token: resolve(&overrides.token, "PW_TOKEN", "pw.token"),
            username: resolve(&overrides.username, "PW_USERNAME", "pw.username"),
            password: resolve(&overrides.password, "PW_PASSWORD", "pw.password"),
        })
    }
}
