use crate::infrastructure::error::InfraError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const ENGINE_JSON: &str = "engine.json";
const SUPPORTED_SCHEMA: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub model: String,
}

/// Engine settings, one JSON file. `minSleepHours` is the single option
/// the pipeline itself recognizes; the rest configures the collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub schema: u64,
    #[serde(rename = "minSleepHours")]
    pub min_sleep_hours: f64,
    pub timezone: String,
    #[serde(rename = "calendarId")]
    pub calendar_id: String,
    pub generator: GeneratorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schema: SUPPORTED_SCHEMA,
            min_sleep_hours: 8.0,
            timezone: "UTC".to_string(),
            calendar_id: "primary".to_string(),
            generator: GeneratorConfig {
                base_url: "http://localhost:11434".to_string(),
                model: "phi3.5".to_string(),
            },
        }
    }
}

pub fn ensure_default_config(config_dir: &Path) -> Result<(), InfraError> {
    let path = config_dir.join(ENGINE_JSON);
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(&EngineConfig::default())?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

pub fn load_config(config_dir: &Path) -> Result<EngineConfig, InfraError> {
    let path = config_dir.join(ENGINE_JSON);
    let raw = fs::read_to_string(&path)?;
    let parsed: EngineConfig = serde_json::from_str(&raw)?;
    if parsed.schema != SUPPORTED_SCHEMA {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            parsed.schema,
            path.display()
        )));
    }
    if parsed.min_sleep_hours < 0.0 || parsed.min_sleep_hours > 24.0 {
        return Err(InfraError::InvalidConfig(format!(
            "minSleepHours must be within 0..=24, got {}",
            parsed.min_sleep_hours
        )));
    }
    Ok(parsed)
}
