//! Converter configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};
use crate::ics::FoldMode;
use crate::output::{DEFAULT_PRODID, DEFAULT_SPLIT_PREFIX};
use crate::policy::{DEFAULT_SUMMARY, NormalizePolicy};
use crate::stamp::DEFAULT_UID_DOMAIN;

/// Settings read from ~/.config/vcal2ics/config.toml
///
/// Every key is optional. `VCAL2ICS_*` environment variables override the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// PRODID written in every calendar header
    pub prodid: String,

    /// Domain tag appended to generated UIDs
    pub uid_domain: String,

    /// SUMMARY used for events that have none
    pub default_summary: String,

    pub fold_mode: FoldMode,

    /// Line prefixes to drop in addition to the built-in legacy list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_strip_prefixes: Vec<String>,

    /// File name prefix for `split` output
    pub split_prefix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            prodid: DEFAULT_PRODID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            default_summary: DEFAULT_SUMMARY.to_string(),
            fold_mode: FoldMode::default(),
            extra_strip_prefixes: Vec::new(),
            split_prefix: DEFAULT_SPLIT_PREFIX.to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn config_path() -> ConvertResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConvertError::Config("Could not determine config directory".into()))?
            .join("vcal2ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> ConvertResult<Self> {
        let (path, required) = match explicit {
            Some(p) => (expand_path(p), true),
            None => (Self::config_path()?, false),
        };

        tracing::debug!(path = %path.display(), required, "loading config");

        Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Environment::with_prefix("VCAL2ICS"))
            .build()
            .map_err(|e| ConvertError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConvertError::Config(e.to_string()))
    }

    pub fn policy(&self) -> NormalizePolicy {
        NormalizePolicy {
            default_summary: self.default_summary.clone(),
            fold_mode: self.fold_mode,
            ..NormalizePolicy::default()
        }
        .with_extra_prefixes(self.extra_strip_prefixes.iter().cloned())
    }

    pub fn to_toml(&self) -> ConvertResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConvertError::Config(e.to_string()))
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
