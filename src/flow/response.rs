use serde_json::Value;
use tracing::warn;

pub const EXTRACT_FAILURE: &str = "Error: Unable to extract message from the response.";

const MESSAGE_TEXT_PATH: &str = "outputs[0].outputs[0].results.message.data.text";

/// Pulls the reply text out of a run envelope.
///
/// Any break along `outputs[0].outputs[0].results.message.data.text` yields
/// [`EXTRACT_FAILURE`], including the `{"error": ...}` object the client
/// returns for non-200 responses.
pub fn extract_message(response: &Value) -> String {
    match message_text(response) {
        Some(text) => text.to_string(),
        None => {
            if let Some(error) = response.get("error").and_then(Value::as_str) {
                warn!("Flow run returned an error object: {}", error);
            } else {
                warn!("Response envelope has no text at {}", MESSAGE_TEXT_PATH);
            }
            EXTRACT_FAILURE.to_string()
        }
    }
}

// Both `[0]` steps must be arrays; an object keyed "0" is a miss.
fn message_text(response: &Value) -> Option<&str> {
    response
        .get("outputs")?
        .as_array()?
        .first()?
        .get("outputs")?
        .as_array()?
        .first()?
        .get("results")?
        .get("message")?
        .get("data")?
        .get("text")?
        .as_str()
}
