//! HTTP classifier: sends one dialog window per request to an
//! OpenAI-compatible chat-completions endpoint and parses the JSON
//! mention candidates out of the reply.
//!
//! Calls are blocking and wrapped in bounded retry with linear backoff;
//! fan-out across windows is the engine's concern, not this module's.

use std::time::Duration;

use mention_core::errors::{ExtractError, PipelineResult};
use mention_core::traits::IClassifier;
use mention_core::{ExtractorConfig, Taxonomy};
use serde_json::{json, Value};
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "Ты — аналитик клиентских диалогов. Извлеки из реплик клиента \
упоминания барьеров, идей и сигналов по заданной таксономии. Верни JSON-объект \
{\"mentions\": [...]}, где каждый элемент содержит turn_id, theme, subtheme, \
label_type (barrier|idea|signal), text_quote (дословная цитата клиента) и \
confidence (0..1). Используй только реплики клиента; если упоминаний нет, верни \
пустой список.";

/// Blocking chat-completions classifier with per-call retry.
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    retries: u32,
}

impl HttpClassifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
        retries: u32,
    ) -> PipelineResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::ClassifierCall {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
            retries,
        })
    }

    /// Build from the extractor configuration's timeout and retry budget.
    pub fn from_config(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        config: &ExtractorConfig,
    ) -> PipelineResult<Self> {
        Self::new(
            endpoint,
            api_key,
            model,
            Duration::from_secs(config.classifier_timeout_secs),
            config.classifier_retries,
        )
    }

    fn request_body(&self, client_window: &str, taxonomy: &Taxonomy) -> Value {
        let themes = taxonomy
            .theme_names()
            .into_iter()
            .collect::<Vec<_>>()
            .join(", ");
        json!({
            "model": self.model,
            "temperature": 0.1,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": format!("Таксономия тем: {themes}.\n\nРеплики клиента:\n{client_window}"),
                },
            ],
        })
    }

    fn call_once(&self, body: &Value) -> Result<Vec<Value>, String> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let response = request.send().map_err(|e| format!("transport: {e}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }
        let payload: Value = response
            .json()
            .map_err(|e| format!("response body is not JSON: {e}"))?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("response has no message content")?;
        parse_candidates(content)
    }
}

/// Parse the model's reply: either `{"mentions": [...]}` or a bare array.
fn parse_candidates(content: &str) -> Result<Vec<Value>, String> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| format!("content is not JSON: {e}"))?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("mentions") {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err("`mentions` is not an array".to_string()),
            None => Err("object reply without a `mentions` key".to_string()),
        },
        _ => Err("content is neither an array nor an object".to_string()),
    }
}

impl IClassifier for HttpClassifier {
    fn classify(&self, client_window: &str, taxonomy: &Taxonomy) -> PipelineResult<Vec<Value>> {
        let body = self.request_body(client_window, taxonomy);
        let mut last_error = String::new();
        for attempt in 0..=self.retries {
            if attempt > 0 {
                let pause = Duration::from_secs(attempt as u64);
                warn!(attempt, %last_error, "retrying classifier call");
                std::thread::sleep(pause);
            }
            match self.call_once(&body) {
                Ok(candidates) => {
                    debug!(candidates = candidates.len(), "classifier call succeeded");
                    return Ok(candidates);
                }
                Err(e) => last_error = e,
            }
        }
        Err(ExtractError::ClassifierCall { reason: last_error }.into())
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array_reply_is_accepted() {
        let items = parse_candidates(r#"[{"turn_id": 0}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn wrapped_reply_is_accepted() {
        let items = parse_candidates(r#"{"mentions": [{"turn_id": 0}, {"turn_id": 1}]}"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn empty_mentions_list_is_ok() {
        assert!(parse_candidates(r#"{"mentions": []}"#).unwrap().is_empty());
    }

    #[test]
    fn non_json_reply_is_an_error() {
        assert!(parse_candidates("извините, не могу").is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(parse_candidates(r#"{"mentions": "none"}"#).is_err());
        assert!(parse_candidates("42").is_err());
    }
}
