use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use anyhow::{Result, Context};
use tracing::{debug, info, warn};
use crate::tweaks::Tweaks;
use super::config::FlowConfig;

pub const BASE_API_URL: &str = "https://api.langflow.astra.datastax.com";
pub const TOKEN_ENV: &str = "ASTRA_DB_VECTOR_TOKEN";

pub const CHAT: &str = "chat";

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    input_value: &'a str,
    output_type: &'a str,
    input_type: &'a str,
    tweaks: &'a Tweaks,
}

/// Posts messages to a Langflow run endpoint.
pub struct FlowClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl FlowClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Builds a client whose bearer token comes from `ASTRA_DB_VECTOR_TOKEN`.
    /// A missing token is not an error; requests just go out unauthenticated.
    pub fn from_env(base_url: impl Into<String>) -> Self {
        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            warn!("{} is not set; requests will be sent without authorization", TOKEN_ENV);
        }
        Self::new(base_url, token)
    }

    pub fn run_url(&self, config: &FlowConfig) -> String {
        format!(
            "{}/lf/{}/api/v1/run/{}",
            self.base_url.trim_end_matches('/'),
            config.langflow_id,
            config.flow_id
        )
    }

    /// Runs the flow once with `message` as its input.
    ///
    /// Returns the response body on 200. Any other status comes back as
    /// `{"error": "Request failed with status code N"}` rather than an `Err`;
    /// only transport failures and an unparseable 200 body are errors.
    pub async fn run_flow(
        &self,
        message: &str,
        tweaks: &Tweaks,
        config: &FlowConfig,
        output_type: &str,
        input_type: &str,
    ) -> Result<Value> {
        let url = self.run_url(config);
        let payload = RunRequest {
            input_value: message,
            output_type,
            input_type,
            tweaks,
        };

        let mut request = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        debug!("POST {}", url);
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Flow run failed with status {}", status);
            return Ok(json!({
                "error": format!("Request failed with status code {}", status.as_u16())
            }));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse flow response as JSON")?;
        info!("Flow run completed");
        Ok(body)
    }

    pub async fn run_chat(&self, message: &str, tweaks: &Tweaks, config: &FlowConfig) -> Result<Value> {
        self.run_flow(message, tweaks, config, CHAT, CHAT).await
    }
}
