mod file;

use std::{collections::BTreeMap, path::PathBuf, str::FromStr};

pub use file::MbgenToml;
use mbgen_core::Dialect;
use serde::{Deserialize, Serialize};

use crate::{Error, GenerationOptions, Result};

/// Root manifest for mbgen.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Options used when no preset is selected
    #[serde(default)]
    pub generator: GenerationOptions,

    /// Staging directory and cleanup cadence
    #[serde(default)]
    pub staging: StagingConfig,

    /// Named schema snapshots
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionProfile>,

    /// Saved generation option sets
    #[serde(default)]
    pub presets: BTreeMap<String, GenerationOptions>,
}

/// `[staging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    pub dir: PathBuf,
    /// Age after which a staged archive is deleted
    pub ttl_secs: u64,
    /// Interval between reaper sweeps
    pub sweep_interval_secs: u64,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("temp"),
            ttl_secs: 300,
            sweep_interval_secs: 300,
        }
    }
}

/// A schema snapshot the generator can read tables from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub dialect: Dialect,
    /// Path to a TOML schema snapshot, relative to the manifest
    pub snapshot: PathBuf,
    /// Identifier used in download keys; defaults to the connection name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "mbgen.toml")
    }
}

impl Manifest {
    /// Parse mbgen.toml content with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| Box::new(Error::Serialize { source }))
    }

    /// Options for a preset, or the `[generator]` defaults when `preset` is `None`.
    pub fn options(&self, preset: Option<&str>) -> Result<&GenerationOptions> {
        match preset {
            None => Ok(&self.generator),
            Some(name) => self.preset(name),
        }
    }

    pub fn preset(&self, name: &str) -> Result<&GenerationOptions> {
        self.presets
            .get(name)
            .ok_or_else(|| Error::unknown_preset(name, self.presets.keys()))
    }

    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Add or replace a preset. Returns the previous value, if any.
    pub fn insert_preset(
        &mut self,
        name: impl Into<String>,
        options: GenerationOptions,
    ) -> Result<Option<GenerationOptions>> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::validation("preset name must not be empty"));
        }
        options.validate()?;
        Ok(self.presets.insert(name, options))
    }

    pub fn remove_preset(&mut self, name: &str) -> Result<GenerationOptions> {
        match self.presets.remove(name) {
            Some(options) => Ok(options),
            None => Err(Error::unknown_preset(name, self.presets.keys())),
        }
    }

    pub fn connection(&self, name: &str) -> Result<&ConnectionProfile> {
        self.connections
            .get(name)
            .ok_or_else(|| Error::unknown_connection(name, self.connections.keys()))
    }

    fn validate(&self) -> Result<()> {
        self.generator.validate()?;
        for (name, options) in &self.presets {
            options
                .validate()
                .map_err(|e| Error::validation(format!("preset '{name}': {e}")))?;
        }
        if self.staging.ttl_secs == 0 {
            return Err(Error::validation("staging.ttl_secs must be greater than 0"));
        }
        if self.staging.sweep_interval_secs == 0 {
            return Err(Error::validation(
                "staging.sweep_interval_secs must be greater than 0",
            ));
        }
        Ok(())
    }
}
