//! Dummy method configuration.
//!
//! The dummy method fakes a display topology entirely in memory. Its shape
//! is described by a [`DummyConfig`], loadable from YAML:
//!
//! ```yaml
//! sites: 1
//! partitions: 2
//! crtcs: 3
//! real: true
//! fake: false
//! crtc:
//!   red_size: 1024
//!   green_size: 1024
//!   blue_size: 1024
//!   depth: 16
//!   connector_name: eDP-1
//!   connector_type: edp
//!   edid: 00ffffffffffff00...
//! ```
//!
//! Missing keys take their defaults.

use crate::edid::unhex_edid;
use crate::method::{ConnectorType, Decision, SubpixelOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// Result type for dummy configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating a [`DummyConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    NotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// A value is out of range.
    #[error("invalid dummy config: {0}")]
    Invalid(String),
}

/// Shape of the fake display topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyConfig {
    /// Number of sites.
    pub sites: usize,
    /// Partitions per site.
    pub partitions: usize,
    /// CRTCs per partition.
    pub crtcs: usize,
    /// Report the method as real.
    pub real: bool,
    /// Report the method as fake.
    pub fake: bool,
    /// Report the default site as known.
    pub default_site_known: bool,
    /// Allow restoring a whole site.
    pub site_restore: bool,
    /// Allow restoring a partition.
    pub partition_restore: bool,
    /// Allow restoring a single CRTC.
    pub crtc_restore: bool,
    /// Template every CRTC is created from.
    pub crtc: CrtcTemplate,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            sites: 1,
            partitions: 1,
            crtcs: 1,
            real: false,
            fake: true,
            default_site_known: true,
            site_restore: true,
            partition_restore: true,
            crtc_restore: true,
            crtc: CrtcTemplate::default(),
        }
    }
}

/// Properties shared by every dummy CRTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrtcTemplate {
    pub red_size: usize,
    pub green_size: usize,
    pub blue_size: usize,
    /// Ramp depth: 8, 16, 32, 64, or -1/-2 for float/double.
    pub depth: i32,
    pub gamma_support: Decision,
    pub active: bool,
    pub width_mm: usize,
    pub height_mm: usize,
    pub subpixel_order: SubpixelOrder,
    pub connector_name: Option<String>,
    pub connector_type: ConnectorType,
    /// EDID as hexadecimal, either case.
    pub edid: Option<String>,
}

impl Default for CrtcTemplate {
    fn default() -> Self {
        Self {
            red_size: 256,
            green_size: 256,
            blue_size: 256,
            depth: 16,
            gamma_support: Decision::Yes,
            active: true,
            width_mm: 0,
            height_mm: 0,
            subpixel_order: SubpixelOrder::Unknown,
            connector_name: Some("DUMMY-1".to_string()),
            connector_type: ConnectorType::Virtual,
            edid: None,
        }
    }
}

impl DummyConfig {
    /// Loads a config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses and validates a config from YAML.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: DummyConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config describes a usable topology.
    pub fn validate(&self) -> ConfigResult<()> {
        if !matches!(self.crtc.depth, 8 | 16 | 32 | 64 | -1 | -2) {
            return Err(ConfigError::Invalid(format!(
                "unsupported ramp depth {}",
                self.crtc.depth
            )));
        }
        if self.crtc.red_size < 2 || self.crtc.green_size < 2 || self.crtc.blue_size < 2 {
            return Err(ConfigError::Invalid(
                "ramp sizes must be at least 2".into(),
            ));
        }
        self.decoded_edid()?;
        Ok(())
    }

    /// Returns the template EDID as bytes.
    pub fn decoded_edid(&self) -> ConfigResult<Option<Vec<u8>>> {
        self.crtc
            .edid
            .as_deref()
            .map(|hex| {
                unhex_edid(hex).map_err(|_| ConfigError::Invalid("edid is not valid hexadecimal".into()))
            })
            .transpose()
    }
}

static ACTIVE: RwLock<Option<DummyConfig>> = RwLock::new(None);

/// Installs `config` for sites initialised from now on.
///
/// Sites that are already open keep the config they were created with.
pub fn configure(config: DummyConfig) -> ConfigResult<()> {
    config.validate()?;
    debug!(
        sites = config.sites,
        partitions = config.partitions,
        crtcs = config.crtcs,
        "configured dummy method"
    );
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
    Ok(())
}

/// Restores the default config.
pub fn reset() {
    *ACTIVE.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Returns a copy of the active config.
pub fn current() -> DummyConfig {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}
