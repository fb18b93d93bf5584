use std::path::PathBuf;

use git2::{Config, Repository};

use crate::error::CoreError;
use crate::manifest::DEFAULT_MANIFEST_PATH;

pub const DEFAULT_TRACER: &str = "strace";
pub const DEFAULT_DOCKER_BASE: &str = "debian:stable-slim";

/// Settings from the `[enclos]` git config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosConfig {
    pub manifest: PathBuf,
    pub tracer: String,
    pub docker_base: String,
}

impl Default for EnclosConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST_PATH),
            tracer: DEFAULT_TRACER.to_string(),
            docker_base: DEFAULT_DOCKER_BASE.to_string(),
        }
    }
}

impl EnclosConfig {
    /// Read config from a git config's `[enclos]` section. Unset keys keep
    /// their defaults.
    pub fn load(config: &Config) -> Result<Self, CoreError> {
        let defaults = Self::default();
        let tracer = config
            .get_string("enclos.tracer")
            .unwrap_or(defaults.tracer);
        if tracer.trim().is_empty() {
            return Err(CoreError::Config("enclos.tracer must not be empty".into()));
        }

        Ok(Self {
            manifest: config
                .get_path("enclos.manifest")
                .unwrap_or(defaults.manifest),
            tracer,
            docker_base: config
                .get_string("enclos.dockerBase")
                .unwrap_or(defaults.docker_base),
        })
    }

    /// Write config to a git config's `[enclos]` section.
    pub fn save(&self, config: &mut Config) -> Result<(), CoreError> {
        let manifest = self
            .manifest
            .to_str()
            .ok_or_else(|| CoreError::Config("manifest path is not valid UTF-8".into()))?;
        config.set_str("enclos.manifest", manifest)?;
        config.set_str("enclos.tracer", &self.tracer)?;
        config.set_str("enclos.dockerBase", &self.docker_base)?;
        Ok(())
    }

    /// Resolve config for the current directory: the enclosing repository's
    /// config when there is one, otherwise the user's global config. Falls
    /// back to defaults when no git config can be opened at all.
    pub fn discover() -> Result<Self, CoreError> {
        let config = match Repository::discover(".") {
            Ok(repo) => repo.config(),
            Err(e) => {
                tracing::debug!("No repository config ({e}), using default git config");
                Config::open_default()
            }
        };

        match config {
            Ok(config) => Self::load(&config),
            Err(e) => {
                tracing::debug!("No git config available ({e}), using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_config(tmp: &TempDir) -> Config {
        let path = tmp.path().join("config");
        std::fs::write(&path, "").unwrap();
        Config::open(&path).unwrap()
    }

    #[test]
    fn test_defaults_when_section_missing() {
        let tmp = TempDir::new().unwrap();
        let config = open_config(&tmp);
        let loaded = EnclosConfig::load(&config).unwrap();
        assert_eq!(loaded, EnclosConfig::default());
        assert_eq!(loaded.manifest, PathBuf::from("enclave.lock"));
        assert_eq!(loaded.tracer, "strace");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut config = open_config(&tmp);
        let settings = EnclosConfig {
            manifest: PathBuf::from("deploy/enclave.lock"),
            tracer: "/usr/local/bin/strace".into(),
            docker_base: "alpine:3.20".into(),
        };

        settings.save(&mut config).unwrap();

        let reopened = Config::open(&tmp.path().join("config")).unwrap();
        assert_eq!(EnclosConfig::load(&reopened).unwrap(), settings);
    }

    #[test]
    fn test_empty_tracer_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut config = open_config(&tmp);
        config.set_str("enclos.tracer", "  ").unwrap();

        let err = EnclosConfig::load(&config).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
