use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Platform prefix of the composite model identifier.
const MODEL_ID_PLATFORM_PREFIX: &str = "CD";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Framework {
    #[serde(default = "default_framework_name")]
    pub framework_name: String,
    #[serde(default = "default_framework_version")]
    pub framework_version: String,
}

impl Default for Framework {
    fn default() -> Self {
        Self {
            framework_name: default_framework_name(),
            framework_version: default_framework_version(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AutoscaleConditions {
    #[serde(default = "default_autoscale_rps")]
    pub rps: u32,
}

impl Default for AutoscaleConditions {
    fn default() -> Self {
        Self {
            rps: default_autoscale_rps(),
        }
    }
}

/// Runtime serving parameters - the only field set that `update` may change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServingConfiguration {
    #[serde(default = "default_autoscaling")]
    pub autoscaling: bool,

    #[serde(default)]
    pub autoscale_conditions: AutoscaleConditions,

    #[serde(default = "default_min_instance")]
    pub min_instance: u32,

    #[serde(default = "default_max_instance")]
    pub max_instance: u32,

    #[serde(default = "default_machine_type")]
    pub machine_type: String,

    #[serde(default = "default_processor")]
    pub processor: String,

    #[serde(default)]
    pub framework: Framework,

    #[serde(default)]
    pub shadow_config: Map<String, Value>,
}

impl Default for ServingConfiguration {
    fn default() -> Self {
        Self {
            autoscaling: default_autoscaling(),
            autoscale_conditions: AutoscaleConditions::default(),
            min_instance: default_min_instance(),
            max_instance: default_max_instance(),
            machine_type: default_machine_type(),
            processor: default_processor(),
            framework: Framework::default(),
            shadow_config: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct InferenceConfiguration {
    #[serde(default = "default_response_item_limit")]
    pub response_item_limit: i64,
}

impl Default for InferenceConfiguration {
    fn default() -> Self {
        Self {
            response_item_limit: default_response_item_limit(),
        }
    }
}

/// Full model record sent to the metadata service on register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub model_name: String,
    pub variant: String,
    pub owner_team: String,
    pub omd_business_service: String,

    #[serde(default)]
    pub related_features: Map<String, Value>,

    #[serde(default)]
    pub inference_configuration: InferenceConfiguration,

    #[serde(default)]
    pub serving_configuration: ServingConfiguration,

    #[serde(default = "default_serving_regions")]
    pub serving_regions: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: String::from("mlt-batch"),
            variant: String::from("sllim-tg-pkg-3"),
            owner_team: String::from("personalization"),
            omd_business_service: String::from("content-discovery"),
            related_features: Map::new(),
            inference_configuration: InferenceConfiguration::default(),
            serving_configuration: ServingConfiguration::default(),
            serving_regions: default_serving_regions(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_framework_name() -> String {
    String::from("tensorflow")
}
fn default_framework_version() -> String {
    String::from("2.9.2")
}
fn default_autoscale_rps() -> u32 {
    20
}
fn default_autoscaling() -> bool {
    true
}
fn default_min_instance() -> u32 {
    1
}
fn default_max_instance() -> u32 {
    5
}
fn default_machine_type() -> String {
    String::from("ml.c5.xlarge")
}
fn default_processor() -> String {
    String::from("cpu")
}
fn default_response_item_limit() -> i64 {
    -1
}
fn default_serving_regions() -> Vec<String> {
    vec![String::from("us-east-1")]
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ModelConfig {
    /// Load a model record from a JSON file.
    ///
    /// Unlike an app preferences file, an explicitly-passed config path that
    /// is missing or malformed is an error, not a silent fall-back.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ModelConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        info!("Model config loaded from {}", path.display());
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_name.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("model_name cannot be empty"),
            });
        }

        if self.variant.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("variant cannot be empty"),
            });
        }

        if self.owner_team.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("owner_team cannot be empty"),
            });
        }

        let serving = &self.serving_configuration;
        if serving.min_instance == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("min_instance must be at least 1"),
            });
        }

        if serving.max_instance < serving.min_instance {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "max_instance {} is below min_instance {}",
                    serving.max_instance, serving.min_instance
                ),
            });
        }

        Ok(())
    }

    /// Composite identifier the metadata service keys models by:
    /// `CD:{owner_team}:{model_name}:{variant}`.
    pub fn model_id(&self) -> String {
        format!(
            "{MODEL_ID_PLATFORM_PREFIX}:{}:{}:{}",
            self.owner_team, self.model_name, self.variant
        )
    }
}
