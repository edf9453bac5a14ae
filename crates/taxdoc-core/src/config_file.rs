use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_keys: Option<ApiKeysConfig>,
    pub completion: Option<CompletionConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    pub google_api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub max_upload_mb: Option<u32>,
}

/// Platform config directory path: `<config_dir>/taxdoc/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("taxdoc").join("config.toml"))
}

/// Load config by cascading CWD `.taxdoc.toml` over platform config.
/// CWD values override platform values. Unreadable files are skipped with a
/// warning.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_optional(&p));
    let cwd = load_optional(Path::new(".taxdoc.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_optional(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match load_from_path(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        api_keys: Some(ApiKeysConfig {
            google_api_key: overlay
                .api_keys
                .as_ref()
                .and_then(|a| a.google_api_key.clone())
                .or_else(|| base.api_keys.as_ref().and_then(|a| a.google_api_key.clone())),
        }),
        completion: Some(CompletionConfig {
            model: overlay
                .completion
                .as_ref()
                .and_then(|c| c.model.clone())
                .or_else(|| base.completion.as_ref().and_then(|c| c.model.clone())),
            temperature: overlay
                .completion
                .as_ref()
                .and_then(|c| c.temperature)
                .or_else(|| base.completion.as_ref().and_then(|c| c.temperature)),
            max_output_tokens: overlay
                .completion
                .as_ref()
                .and_then(|c| c.max_output_tokens)
                .or_else(|| base.completion.as_ref().and_then(|c| c.max_output_tokens)),
            base_url: overlay
                .completion
                .as_ref()
                .and_then(|c| c.base_url.clone())
                .or_else(|| base.completion.as_ref().and_then(|c| c.base_url.clone())),
            timeout_secs: overlay
                .completion
                .as_ref()
                .and_then(|c| c.timeout_secs)
                .or_else(|| base.completion.as_ref().and_then(|c| c.timeout_secs)),
        }),
        server: Some(ServerConfig {
            bind: overlay
                .server
                .as_ref()
                .and_then(|s| s.bind.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.bind.clone())),
            max_upload_mb: overlay
                .server
                .as_ref()
                .and_then(|s| s.max_upload_mb)
                .or_else(|| base.server.as_ref().and_then(|s| s.max_upload_mb)),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_parses() {
        let toml_str = "[completion]\nmodel = \"gemini-2.5-pro\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let completion = parsed.completion.unwrap();
        assert_eq!(completion.model.as_deref(), Some("gemini-2.5-pro"));
        assert!(completion.temperature.is_none());
        assert!(parsed.api_keys.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            completion: Some(CompletionConfig {
                model: Some("base-model".to_string()),
                max_output_tokens: Some(1024),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            completion: Some(CompletionConfig {
                model: Some("overlay-model".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).completion.unwrap();
        assert_eq!(merged.model.as_deref(), Some("overlay-model"));
        assert_eq!(merged.max_output_tokens, Some(1024));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            server: Some(ServerConfig {
                bind: Some("0.0.0.0:8080".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.server.unwrap().bind.as_deref(), Some("0.0.0.0:8080"));
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nbind = 1").unwrap();
        assert!(matches!(
            load_from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn load_from_path_reads_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api_keys]\ngoogle_api_key = \"FILEKEY\"\n").unwrap();
        let parsed = load_from_path(&path).unwrap();
        assert_eq!(
            parsed.api_keys.unwrap().google_api_key.as_deref(),
            Some("FILEKEY")
        );
    }
}
