//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/pulmo/diseases.toml` and
//! holds the ambient physiology plus the disease parameter sets for a run:
//!
//! ```toml
//! [physiology]
//! lung_height = 22.0
//!
//! [[disease]]
//! model = "PAH"
//! parameters = { Compromise = 40.0 }
//! ```

use crate::registry::ModelRegistry;
use crate::{Disease, Error, PhysiologicConstants, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Run configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub physiology: PhysiologyConfig,

    #[serde(default, rename = "disease")]
    pub diseases: Vec<DiseaseConfig>,
}

/// Overrides for the whole-tree physiologic constants
///
/// Any field left out keeps the calibration default.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PhysiologyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lung_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_weight: Option<f64>,
}

/// One disease and its parameter values, keyed by short name
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiseaseConfig {
    pub model: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

impl PhysiologyConfig {
    /// Calibration defaults with this file's overrides applied
    ///
    /// Transpulmonary pressure is recomputed as `pal - ppl`.
    pub fn constants(&self) -> PhysiologicConstants {
        let mut c = PhysiologicConstants::default();
        if let Some(v) = self.lung_height {
            c.lung_height = v;
        }
        if let Some(v) = self.flow {
            c.flow = v;
        }
        if let Some(v) = self.lap {
            c.lap = v;
        }
        if let Some(v) = self.pal {
            c.pal = v;
        }
        if let Some(v) = self.ppl {
            c.ppl = v;
        }
        if let Some(v) = self.tolerance {
            c.tolerance = v;
        }
        if let Some(v) = self.patient_height {
            c.patient_height = v;
        }
        if let Some(v) = self.patient_weight {
            c.patient_weight = v;
        }
        c.ptp = c.pal - c.ppl;
        c
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!(
            "Loaded config from {:?} ({} disease(s))",
            path,
            config.diseases.len()
        );
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        Ok(base.join("pulmo").join("diseases.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Bind every configured disease against `registry`
    ///
    /// Parameters not listed keep their declared defaults. Unknown models and
    /// unknown parameter names are errors.
    pub fn resolve(&self, registry: &ModelRegistry) -> Result<Vec<Disease>> {
        self.diseases
            .iter()
            .map(|entry| {
                let model = registry.require(&entry.model)?;
                let mut disease = Disease::new(model);
                for (name, value) in &entry.parameters {
                    disease.set_parameter(name, *value)?;
                }
                tracing::debug!(
                    "Resolved disease '{}' with values {:?}",
                    disease.name(),
                    disease.values()
                );
                Ok(disease)
            })
            .collect()
    }
}
