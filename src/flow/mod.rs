pub mod client;
pub mod config;
pub mod response;

pub use client::FlowClient;
pub use config::{load_config, FlowConfig, DEFAULT_CONFIG_PATH};
pub use response::extract_message;

#[cfg(test)]
pub(crate) mod stub;
