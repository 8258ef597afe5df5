use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::Deserialize;
use anyhow::{Result, Context};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "conf/config.json";

/// Identifies the remote flow: the Langflow namespace and the flow inside it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlowConfig {
    pub langflow_id: String,
    pub flow_id: String,
}

#[cfg(test)]
impl FlowConfig {
    pub fn new(langflow_id: impl Into<String>, flow_id: impl Into<String>) -> Self {
        Self {
            langflow_id: langflow_id.into(),
            flow_id: flow_id.into(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<FlowConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file {}", path.display()))?;
    let config: FlowConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    info!("Loaded flow config from {} (flow {})", path.display(), config.flow_id);
    Ok(config)
}
