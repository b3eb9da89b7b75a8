use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use orgkey_core::{AgeCryptoProvider, OrgKeyError, SymmetricKey};

use crate::app::KeySources;

/// Read a provider key file (standard base64 of the key bytes).
pub fn read_provider_key(path: &Path) -> anyhow::Result<SymmetricKey> {
    warn_if_readable_by_others(path);
    let encoded = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
        anyhow::anyhow!("Failed to read provider key {}: {}", path.display(), e)
    })?);
    SymmetricKey::from_base64(&encoded)
        .map_err(|e| anyhow::anyhow!("Invalid provider key {}: {}", path.display(), e))
}

/// Split a `PROVIDER_ID=PATH` argument.
pub fn parse_provider_key_arg(value: &str) -> anyhow::Result<(String, PathBuf)> {
    let (id, path) = value
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected PROVIDER_ID=PATH, got {:?}", value))?;
    let id = id.trim();
    let path = path.trim();
    if id.is_empty() || path.is_empty() {
        return Err(anyhow::anyhow!(
            "Expected PROVIDER_ID=PATH, got {:?}",
            value
        ));
    }
    Ok((id.to_string(), PathBuf::from(path)))
}

/// Build the age collaborator from the resolved key files.
pub fn build_crypto_provider(sources: &KeySources) -> anyhow::Result<AgeCryptoProvider> {
    let mut crypto = AgeCryptoProvider::new();

    if let Some(path) = sources.identity.as_deref() {
        warn_if_readable_by_others(path);
        let identity = AgeCryptoProvider::load_identity_file(path).map_err(|e| match e {
            OrgKeyError::Io { source } => {
                anyhow::anyhow!("Failed to read identity {}: {}", path.display(), source)
            }
            other => anyhow::anyhow!("Invalid identity {}: {}", path.display(), other),
        })?;
        crypto = crypto.with_identity(identity);
    }

    for (provider_id, path) in &sources.providers {
        crypto = crypto.with_provider_key(provider_id.clone(), read_provider_key(path)?);
    }

    tracing::info!(
        identity = crypto.has_identity(),
        providers = sources.providers.len(),
        "loaded key material"
    );
    Ok(crypto)
}

fn warn_if_readable_by_others(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(path) {
            if metadata.permissions().mode() & 0o077 != 0 {
                tracing::warn!(path = %path.display(), "key file is accessible by other users");
            }
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}
