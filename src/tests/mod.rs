use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::oembed::{Registry, Transmission, Transport, TransportError};

mod transport;

/// Build a registry from an inline descriptor.
pub fn registry(descriptor: Value) -> Arc<Registry> {
    Arc::new(
        Registry::from_slice(descriptor.to_string().as_bytes()).expect("descriptor should load"),
    )
}

pub enum Reply {
    Json(Value),
    Fail,
    /// Never completes
    Hang,
}

/// Scripted transport that records every call it receives.
/// Unscripted requests fail.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<(String, Transmission), Reply>,
    calls: Mutex<Vec<(String, Transmission)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, endpoint: &str, mode: Transmission, reply: Reply) -> Self {
        self.replies.insert((endpoint.to_string(), mode), reply);
        self
    }

    pub fn calls(&self) -> Vec<(String, Transmission)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls().iter().filter(|(e, _)| e == endpoint).count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        mode: Transmission,
    ) -> Result<Value, TransportError> {
        assert!(params.contains(&("format", "json")), "format=json missing: {params:?}");
        self.calls.lock().unwrap().push((endpoint.to_string(), mode));

        match self.replies.get(&(endpoint.to_string(), mode)) {
            Some(Reply::Json(value)) => Ok(value.clone()),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Fail) | None => Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: 503,
            }),
        }
    }
}
