use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "granary-config.json";

/// Default connection parameters persisted between invocations. All fields
/// are optional; the keys are explicit so the record is order-independent
/// on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub ipc_socket: Option<PathBuf>,
    pub rpc_host: Option<String>,
    pub rpc_port: Option<u16>,
    pub rpc_endpoint: Option<String>,
}

/// A partial update: only the fields that are present overwrite the stored
/// ones.
pub type ConfigPatch = StoredConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "configuration file {} is not found. Did you run `granary-ctl config`?",
        path.display()
    )]
    NotFound { path: PathBuf },

    #[error("configuration file {} is malformed", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access configuration file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoredConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_owned(),
            source,
        })
    }

    pub fn store_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self).map_err(|source| {
            ConfigError::Malformed {
                path: path.to_owned(),
                source,
            }
        })?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })
    }

    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(ipc_socket) = patch.ipc_socket {
            self.ipc_socket = Some(ipc_socket);
        }
        if let Some(rpc_host) = patch.rpc_host {
            self.rpc_host = Some(rpc_host);
        }
        if let Some(rpc_port) = patch.rpc_port {
            self.rpc_port = Some(rpc_port);
        }
        if let Some(rpc_endpoint) = patch.rpc_endpoint {
            self.rpc_endpoint = Some(rpc_endpoint);
        }
    }
}

pub fn load_configuration() -> Result<StoredConfig, ConfigError> {
    StoredConfig::load_from(&config_file_path())
}

/// Patches the existing configuration file in place. The file must already
/// exist and be well-formed; fields missing from the patch keep their
/// stored values.
pub fn update_configuration(patch: ConfigPatch) -> Result<(), ConfigError> {
    let path = config_file_path();
    let mut config = StoredConfig::load_from(&path)?;
    config.apply(patch);
    config.store_to(&path)
}

fn config_file_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|path| path.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| Path::new("/").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config_file(config: &StoredConfig) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        config.store_to(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        dir
    }

    #[test]
    fn partial_update_keeps_unpatched_fields() {
        let dir = seeded_config_file(&StoredConfig {
            ipc_socket: Some("/var/run/granary.sock".into()),
            rpc_host: Some("127.0.0.1".to_owned()),
            rpc_port: Some(9600),
            rpc_endpoint: None,
        });
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = StoredConfig::load_from(&path).unwrap();
        config.apply(ConfigPatch {
            rpc_port: Some(9700),
            rpc_endpoint: Some("127.0.0.1:9700".to_owned()),
            ..ConfigPatch::default()
        });
        config.store_to(&path).unwrap();

        let reloaded = StoredConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.ipc_socket, Some("/var/run/granary.sock".into()));
        assert_eq!(reloaded.rpc_host, Some("127.0.0.1".to_owned()));
        assert_eq!(reloaded.rpc_port, Some(9700));
        assert_eq!(reloaded.rpc_endpoint, Some("127.0.0.1:9700".to_owned()));
    }

    #[test]
    fn empty_patch_is_a_round_trip() {
        let original = StoredConfig {
            rpc_endpoint: Some("granary.internal:9600".to_owned()),
            ..StoredConfig::default()
        };
        let dir = seeded_config_file(&original);
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = StoredConfig::load_from(&path).unwrap();
        config.apply(ConfigPatch::default());
        config.store_to(&path).unwrap();

        assert_eq!(StoredConfig::load_from(&path).unwrap(), original);
    }

    #[test]
    fn missing_file_is_distinguished_from_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        match StoredConfig::load_from(&path) {
            Err(ConfigError::NotFound { .. }) => (),
            other => panic!("expected NotFound, got {:?}", other),
        }

        std::fs::write(&path, "rpc_port:not-a-number").unwrap();
        match StoredConfig::load_from(&path) {
            Err(ConfigError::Malformed { .. }) => (),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_port_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"rpc_port": "9600"}"#).unwrap();

        assert!(matches!(
            StoredConfig::load_from(&path),
            Err(ConfigError::Malformed { .. })
        ));
    }
}
