//! Where key material comes from: config file values overridden by flags.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::UnwrapArgs;
use crate::config::OrgkeyConfig;
use crate::security::parse_provider_key_arg;

/// Resolved key file locations for one `unwrap` run.
#[derive(Debug, Default)]
pub struct KeySources {
    pub identity: Option<PathBuf>,
    pub providers: BTreeMap<String, PathBuf>,
    pub reveal: bool,
}

/// Merge config and flags. A flag wins over the config entry it names.
pub fn resolve_key_sources(config: &OrgkeyConfig, args: &UnwrapArgs) -> anyhow::Result<KeySources> {
    let identity = args
        .identity
        .clone()
        .or_else(|| config.identity.path.as_ref().map(PathBuf::from));

    let mut providers: BTreeMap<String, PathBuf> = config
        .providers
        .iter()
        .map(|(id, path)| (id.clone(), PathBuf::from(path)))
        .collect();
    for value in &args.provider_keys {
        let (id, path) = parse_provider_key_arg(value)?;
        providers.insert(id, path);
    }

    Ok(KeySources {
        identity,
        providers,
        reveal: args.reveal || config.output.reveal,
    })
}
