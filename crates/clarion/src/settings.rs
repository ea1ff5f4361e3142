//! Host settings file: which model to run, the license key and the format.
//!
//! ```toml
//! model = "QuailL16"
//! license_key = "my-key"
//!
//! [format]
//! sample_rate = 16000
//! num_channels = 1
//! num_frames = 160
//!
//! [parameters]
//! enhancement_level = 0.8
//! ```
//!
//! `license_key` may be omitted in favour of the `CLARION_LICENSE`
//! environment variable, and `[format]` in favour of the model's optimal
//! configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clarion_core::Config;
use clarion_registry::ModelType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Model, Parameter};

/// Environment variable consulted when the file has no `license_key`.
pub const LICENSE_ENV: &str = "CLARION_LICENSE";

/// Errors from loading settings or building a model from them.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No key in the file or the environment
    #[error("no license key in settings or $CLARION_LICENSE")]
    MissingLicense,

    /// `[parameters]` names something the model does not expose
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// The model refused the settings
    #[error(transparent)]
    Model(#[from] clarion_core::Error),
}

impl SettingsError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

/// Parsed settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Variant to create.
    pub model: ModelType,
    /// License key; falls back to [`LICENSE_ENV`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
    /// Format; falls back to the model's optimal configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Config>,
    /// Enhancement parameter values by string id (`bypass`,
    /// `enhancement_level`, `voice_gain`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, f32>,
}

impl Settings {
    /// Settings for `model` with everything else defaulted.
    pub fn new(model: ModelType) -> Self {
        Self {
            model,
            license_key: None,
            format: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| SettingsError::write_file(path, e))
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The license key from the file, else from [`LICENSE_ENV`].
    pub fn license_key(&self) -> Option<String> {
        self.license_key
            .clone()
            .or_else(|| std::env::var(LICENSE_ENV).ok())
            .filter(|k| !k.is_empty())
    }

    /// Creates and initializes the configured model and applies
    /// `[parameters]`.
    pub fn create_model(&self) -> Result<Model, SettingsError> {
        let key = self.license_key().ok_or(SettingsError::MissingLicense)?;
        let mut model = Model::create(self.model, &key)?;
        let config = self.format.unwrap_or_else(|| model.optimal_config());
        model.initialize_config(&config)?;

        for (name, &value) in &self.parameters {
            let parameter = model
                .find_parameter(name)
                .ok_or_else(|| SettingsError::UnknownParameter(name.clone()))?;
            model.set_parameter(parameter, value)?;
        }
        Ok(model)
    }
}
