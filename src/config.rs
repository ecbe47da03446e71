//! Catalog configuration loaded from `mushop-arch.toml`.
//!
//! Every key is optional; a missing file means defaults.
//!
//! # mushop-arch.toml Format
//!
//! ```toml
//! icon_dir = "images/tech/"
//! cloud = "oci"    # or "aws"
//! view = "full"    # or "basic" (OCI only)
//! ```

use crate::catalog::{Architecture, Cloud, Diagram, IconDir, View};
use crate::{log_debug, log_warn};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "mushop-arch.toml";

/// Which catalog to load and how to draw it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Asset directory joined onto every icon.
    pub icon_dir: IconDir,
    pub cloud: Cloud,
    pub view: View,
}

impl CatalogConfig {
    /// Load `mushop-arch.toml` from the current directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_or_default(CONFIG_FILE)
    }

    /// Load a config file, falling back to defaults when it is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            log_debug!("No catalog config at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Ignoring catalog config {:?}: {:#}", path, e);
                Self::default()
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog config {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse catalog config {:?}", path))?;

        log_debug!(
            "Loaded catalog config: icon_dir={}, cloud={}, view={:?}",
            config.icon_dir.as_str(),
            config.cloud,
            config.view
        );
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.view == View::Basic && self.cloud.definition().basic_links.is_none() {
            bail!("{} architecture has no basic view", self.cloud);
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize catalog config")
    }

    /// Load the configured cloud against the configured icon directory.
    pub fn architecture(&self) -> Result<Architecture> {
        Architecture::load_builtin(self.cloud, &self.icon_dir)
    }

    pub fn build_diagram(&self) -> Result<Diagram> {
        Diagram::build(&self.architecture()?, self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.icon_dir.as_str(), "images/tech/");
        assert_eq!(config.cloud, Cloud::Oci);
        assert_eq!(config.view, View::Full);
    }

    #[test]
    fn test_aws_basic_is_rejected() {
        let err = CatalogConfig::from_toml_str("cloud = \"aws\"\nview = \"basic\"").unwrap_err();
        assert_eq!(err.to_string(), "AWS architecture has no basic view");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(CatalogConfig::from_toml_str("colour = \"red\"").is_err());
    }
}
