//! Remote response source for liachat
//!
//! [`HttpSource`] fulfils the [`ResponseSource`] contract by calling the
//! chat backend over HTTP through [`Transport`]. Swapping the simulator for
//! this source is a one-line change at the call site; session and
//! classification logic are untouched.

pub mod transport;

use async_trait::async_trait;
use serde_json::{json, Value};

use liachat_types::{ResponseSource, SourceError};

pub use transport::{Transport, TransportConfig, BASE_URL_ENV, DEFAULT_BASE_URL};

/// [`ResponseSource`] backed by the HTTP chat backend.
pub struct HttpSource {
    transport: Transport,
}

impl HttpSource {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    /// Construct from the environment (`LIA_API_URL`, default localhost).
    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env())
    }

    fn parse_reply(value: &Value) -> Result<String, SourceError> {
        match value.get("response") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Null) | None => Err(SourceError::Malformed(
                "backend sent no reply text".to_string(),
            )),
            Some(other) => Err(SourceError::Malformed(format!(
                "unexpected reply payload: {other}"
            ))),
        }
    }
}

#[async_trait]
impl ResponseSource for HttpSource {
    async fn generate(&self, input: &str) -> Result<String, SourceError> {
        let payload = json!({ "message": input });
        let value = self.transport.send("/api/chat", payload).await?;
        Self::parse_reply(&value)
    }
}
