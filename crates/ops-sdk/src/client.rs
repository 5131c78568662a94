// ops-sdk/src/client.rs
// Blocking HTTP requests to the ops daemon
use ops_sdk_common::{Operation, Result, SdkConfig, SdkError};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Longest slice of a failure body copied into an error message
const MAX_ERROR_BODY: usize = 512;

/// Sends one POST per call to `<base-url>/<operation>` with a JSON body.
///
/// Connections are never kept idle, each call opens its own.
#[derive(Debug, Clone)]
pub struct DaemonClient {
    base_url: String,
    agent: ureq::Agent,
}

impl DaemonClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            base_url: config.daemon_base_url(),
            agent: ureq::AgentBuilder::new()
                .max_idle_connections(0)
                .max_idle_connections_per_host(0)
                .build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fire-and-forget: the response body is never inspected.
    ///
    /// Only transport failures and non-success statuses are reported.
    pub fn simple_request<B: Serialize + ?Sized>(&self, operation: Operation, body: &B) -> Result<()> {
        self.send(operation, body)?;
        Ok(())
    }

    /// Send the request and decode the daemon's JSON object answer
    pub fn async_request<B: Serialize + ?Sized>(
        &self,
        operation: Operation,
        body: &B,
    ) -> Result<Map<String, Value>> {
        let response = self.send(operation, body)?;
        let text = response.into_string().map_err(|e| {
            SdkError::transport(format!(
                "Failed to read {} response: {}",
                operation.path(),
                e
            ))
        })?;

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SdkError::invalid_response(format!(
                "{} response is not a JSON object",
                operation.path()
            ))),
            Err(e) => Err(SdkError::invalid_response(format!(
                "Failed to parse {} response: {}",
                operation.path(),
                e
            ))),
        }
    }

    fn send<B: Serialize + ?Sized>(&self, operation: Operation, body: &B) -> Result<ureq::Response> {
        let payload = serde_json::to_string(body).map_err(|e| {
            SdkError::serialize(format!(
                "Failed to serialize {} request: {}",
                operation.path(),
                e
            ))
        })?;
        let url = format!("{}/{}", self.base_url, operation.path());
        debug!(operation = operation.path(), "Sending daemon request");

        match self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&payload)
        {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                debug!(operation = operation.path(), status = code, "Daemon request failed");
                Err(SdkError::status(format!(
                    "{} returned status {}: {}",
                    operation.path(),
                    code,
                    truncate(&body, MAX_ERROR_BODY)
                )))
            }
            Err(ureq::Error::Transport(err)) => {
                debug!(operation = operation.path(), "Daemon unreachable: {}", err);
                Err(SdkError::transport(format!(
                    "{} request to {} failed: {}",
                    operation.path(),
                    url,
                    err
                )))
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
