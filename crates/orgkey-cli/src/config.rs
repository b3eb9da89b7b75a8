use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OrgkeyConfig {
    #[serde(default)]
    pub identity: IdentitySection,
    /// Provider id -> provider key file
    #[serde(default)]
    pub providers: BTreeMap<String, String>,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IdentitySection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub reveal: bool,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<OrgkeyConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn parse_config(contents: &str) -> Result<OrgkeyConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load the config at `path`, falling back to defaults when the file does not exist.
pub fn load_config(path: &Path) -> anyhow::Result<OrgkeyConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(OrgkeyConfig::default());
    }
    read_config(path)
}

/// Resolve the config file path: explicit flag or ORGKEY_CONFIG, then XDG default.
pub fn resolve_config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    default_config_path()
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("orgkey"));
        }
    }
    Ok(home_dir()?.join(".config").join("orgkey"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [identity]
            path = "/keys/user.agekey"

            [providers]
            "prov-9" = "/keys/prov-9.key"

            [output]
            reveal = true
            "#,
        )
        .unwrap();

        assert_eq!(config.identity.path.as_deref(), Some("/keys/user.agekey"));
        assert_eq!(config.providers["prov-9"], "/keys/prov-9.key");
        assert!(config.output.reveal);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.identity.path.is_none());
        assert!(config.providers.is_empty());
        assert!(!config.output.reveal);
    }

    #[test]
    fn test_load_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_load_invalid_config_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nreveal = \"yes\"\n").unwrap();

        let err = load_config(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config"));
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let explicit = Path::new("/etc/orgkey.toml");
        assert_eq!(resolve_config_path(Some(explicit)).unwrap(), explicit);
    }
}
