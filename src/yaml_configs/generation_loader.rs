use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::call_validation::SamplingParameters;
use crate::yaml_configs::generation_compiled_in::COMPILED_IN_GENERATION_YAML;


#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptTemplates {
    pub full_post: String,
    pub outline: String,
    pub section: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HistoryLimits {
    /// Messages sent to the model, the new user turn included.
    pub context_messages: usize,
    /// Messages kept in the store after each exchange.
    pub max_persisted: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    pub topics: Vec<String>,
    pub templates: PromptTemplates,
    pub strict_suffix: String,
    pub sampling: SamplingParameters,
    pub history: HistoryLimits,
    pub system_prompt: String,
}

fn _merge_yaml(base: &mut serde_yaml::Value, overlay: serde_yaml::Value) {
    match (base, overlay) {
        (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(overlay_map)) => {
            for (k, v) in overlay_map {
                match base_map.get_mut(&k) {
                    Some(existing) => _merge_yaml(existing, v),
                    None => { base_map.insert(k, v); }
                }
            }
        }
        (base, overlay) => {
            *base = overlay;
        }
    }
}

fn _validate(config: &GenerationConfig) -> Result<(), String> {
    if config.topics.is_empty() {
        return Err("topics list must not be empty".to_string());
    }
    if config.history.context_messages == 0 {
        return Err("history.context_messages must be at least 1".to_string());
    }
    if config.history.max_persisted == 0 {
        return Err("history.max_persisted must be at least 1".to_string());
    }
    Ok(())
}

pub fn load_and_mix_with_users_config(user_yaml: &str) -> Result<GenerationConfig, String> {
    let mut work_unstructured: serde_yaml::Value = serde_yaml::from_str(COMPILED_IN_GENERATION_YAML)
        .map_err(|e| format!("Error parsing default YAML: {}", e))?;
    if !user_yaml.trim().is_empty() {
        let user_unstructured: serde_yaml::Value = serde_yaml::from_str(user_yaml)
            .map_err(|e| format!("Error parsing generation yaml: {}\n{}", e, user_yaml))?;
        if !user_unstructured.is_null() {
            _merge_yaml(&mut work_unstructured, user_unstructured);
        }
    }
    let mut config: GenerationConfig = serde_yaml::from_value(work_unstructured)
        .map_err(|e| format!("Error reading generation config: {}", e))?;
    _validate(&config)?;
    config.system_prompt = config.system_prompt.replace("%TOPICS%", &config.topics.join(", "));
    Ok(config)
}

pub async fn load_generation_config(user_yaml_path: &str) -> Result<GenerationConfig, String> {
    if user_yaml_path.is_empty() {
        return load_and_mix_with_users_config("");
    }
    let path = Path::new(user_yaml_path);
    let user_yaml = tokio::fs::read_to_string(path).await
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    info!("generation config: merging {}", path.display());
    load_and_mix_with_users_config(&user_yaml)
}
