//! Application context for the Orgkey CLI.
//!
//! Combines CLI arguments with lazily-loaded configuration.

use once_cell::unsync::OnceCell;

use crate::cli::Cli;
use crate::config::{load_config, resolve_config_path, OrgkeyConfig};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<OrgkeyConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&OrgkeyConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path(self.cli.config.as_deref())?;
            load_config(&path)
        })
    }
}
