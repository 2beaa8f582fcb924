use crate::error::Result;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

/// Minimal HTTP client the checks talk to the service through.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Tries JSON first and keeps the raw text when that fails.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ProbeResponse {
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.json().and_then(|value| value.get(key))
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

impl HttpProbe {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // No idle connections, so the server can shut down without waiting on us
        let client = Client::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request and reads the whole body. Only transport failures
    /// are errors; any HTTP status is returned as a response.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<ProbeResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ProbeResponse {
            status,
            body: ResponseBody::decode(text),
        })
    }

    pub async fn get(&self, path: &str) -> Result<ProbeResponse> {
        self.request(path, Method::GET, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ProbeResponse> {
        self.request(path, Method::POST, Some(body)).await
    }
}
