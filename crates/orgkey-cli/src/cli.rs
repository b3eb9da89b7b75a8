use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use orgkey_core::VERSION;

/// Orgkey - inspect and unwrap encrypted organization keys
#[derive(Parser)]
#[command(name = "orgkey")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "ORGKEY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// JSON file mapping organization ids to encrypted key records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `unwrap` command
#[derive(Args)]
pub struct UnwrapArgs {
    /// JSON file mapping organization ids to encrypted key records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only unwrap this organization
    #[arg(long, value_name = "ID")]
    pub org: Option<String>,

    /// Age identity file holding the user's private key
    #[arg(long, value_name = "PATH")]
    pub identity: Option<PathBuf>,

    /// Provider key file, as PROVIDER_ID=PATH (repeatable)
    #[arg(long = "provider-key", value_name = "ID=PATH")]
    pub provider_keys: Vec<String>,

    /// Print key material instead of fingerprints
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the records in a key file without decrypting them
    Inspect(InspectArgs),

    /// Decrypt organization keys
    Unwrap(UnwrapArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_unwrap_collects_repeated_provider_keys() {
        let cli = Cli::try_parse_from([
            "orgkey",
            "unwrap",
            "keys.json",
            "--provider-key",
            "p1=/tmp/p1.key",
            "--provider-key",
            "p2=/tmp/p2.key",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Unwrap(args)) => {
                assert_eq!(args.provider_keys, vec!["p1=/tmp/p1.key", "p2=/tmp/p2.key"]);
                assert!(!args.reveal);
            }
            _ => panic!("expected unwrap command"),
        }
    }
}
