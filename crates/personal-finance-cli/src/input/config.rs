use log::debug;
use personal_finance_core::EngineConfig;

use super::file;

/// Load engine settings from a JSON or YAML file, or fall back to defaults.
///
/// `.yaml` / `.yml` files are parsed as YAML; anything else as JSON.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let contents = file::read_to_string(path)?;
    let lower = path.to_ascii_lowercase();
    let config: EngineConfig = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path, e))?
    };
    config.validate()?;
    debug!("loaded engine config from {path}: {config:?}");
    Ok(config)
}
