use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use anyhow::{anyhow, Result, Context};
use tracing::{debug, info};
use super::models::{ChatModel, EmbeddingModel, Temperature};

pub const DEFAULT_TWEAKS_PATH: &str = "tweaks/tweaks.json";

pub const MODEL_COMPONENT: &str = "OpenAIModel-cU5Dl";
pub const EMBEDDINGS_COMPONENT: &str = "OpenAIEmbeddings-Rljdq";

/// Per-component parameter overrides sent along with every flow run.
///
/// Keys are component ids from the remote flow; values are free-form maps of
/// parameter name to value. Nothing here is validated beyond being JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tweaks(Map<String, Value>);

impl Tweaks {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open tweaks file {}", path.display()))?;
        let tweaks: Tweaks = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse tweaks file {}", path.display()))?;

        info!("Loaded {} component tweaks from {}", tweaks.0.len(), path.display());
        Ok(tweaks)
    }

    pub fn get(&self, component: &str, key: &str) -> Option<&Value> {
        self.0.get(component)?.get(key)
    }

    /// Writes `key` inside an existing component. The component must already be
    /// present as an object; the key itself is created if absent.
    pub fn set(&mut self, component: &str, key: &str, value: Value) -> Result<()> {
        let params = self
            .0
            .get_mut(component)
            .ok_or_else(|| anyhow!("Tweaks have no component '{}'", component))?
            .as_object_mut()
            .ok_or_else(|| anyhow!("Tweaks component '{}' is not an object", component))?;

        debug!("Tweak {}.{} = {}", component, key, value);
        params.insert(key.to_string(), value);
        Ok(())
    }

    /// Temperature stored in the tweak file, if it is a usable one.
    pub fn temperature(&self) -> Option<Temperature> {
        self.get(MODEL_COMPONENT, "temperature")
            .and_then(Value::as_f64)
            .and_then(|t| Temperature::new(t).ok())
    }
}

/// The session-level choices a user can change between messages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub model: ChatModel,
    pub embedding_model: EmbeddingModel,
    pub temperature: Temperature,
}

impl Settings {
    pub fn apply(&self, tweaks: &mut Tweaks) -> Result<()> {
        tweaks.set(MODEL_COMPONENT, "model_name", Value::from(self.model.as_str()))?;
        tweaks.set(EMBEDDINGS_COMPONENT, "model", Value::from(self.embedding_model.as_str()))?;
        tweaks.set(MODEL_COMPONENT, "temperature", Value::from(self.temperature.value()))?;
        Ok(())
    }
}
