pub mod models;
pub mod overlay;

pub use models::{ChatModel, EmbeddingModel, Temperature};
pub use overlay::{Settings, Tweaks, DEFAULT_TWEAKS_PATH};
