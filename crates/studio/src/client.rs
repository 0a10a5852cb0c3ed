//! HTTP client for the drawings API.
//!
//! Every endpoint answers with the `{ success, data?, error? }` envelope;
//! [`HttpDrawingClient`] unwraps it into plain results using [`reqwest`].

use async_trait::async_trait;
use scribble_core::drawing::{CreateDrawing, Drawing};
use scribble_core::types::DrawingId;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::StudioConfig;

/// Fallback message when a failed envelope carries no `error`.
const REQUEST_FAILED: &str = "Request failed";

/// Errors from the drawings API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, timeout, bad JSON, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a failure envelope or a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The envelope's `error`, or the raw body when there was none.
        message: String,
    },

    /// A success envelope arrived without the expected `data`.
    #[error("Response did not include data")]
    MissingData,
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Operations the editor and gallery need from the drawings API.
#[async_trait]
pub trait DrawingApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Drawing>, ClientError>;

    async fn get(&self, id: &DrawingId) -> Result<Drawing, ClientError>;

    async fn create(&self, input: &CreateDrawing) -> Result<Drawing, ClientError>;

    async fn delete(&self, id: &DrawingId) -> Result<(), ClientError>;
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Convert into the payload, treating `success: false` as an API error.
    pub fn into_data(self, status: u16) -> Result<T, ClientError> {
        if !self.success {
            return Err(ClientError::Api {
                status,
                message: self.error.unwrap_or_else(|| REQUEST_FAILED.to_string()),
            });
        }
        self.data.ok_or(ClientError::MissingData)
    }
}

/// [`DrawingApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDrawingClient {
    client: reqwest::Client,
    api_url: String,
}

impl HttpDrawingClient {
    /// Create a client for the configured API with its request timeout.
    pub fn new(config: &StudioConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn drawings_url(&self) -> String {
        format!("{}/api/drawings", self.api_url)
    }

    fn drawing_url(&self, id: &DrawingId) -> String {
        format!("{}/api/drawings/{id}", self.api_url)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Failure bodies are
    /// read as an envelope when possible so the API's message survives.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or(body);

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a successful envelope into its `data`.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        let status = response.status().as_u16();
        response.json::<Envelope<T>>().await?.into_data(status)
    }
}

#[async_trait]
impl DrawingApi for HttpDrawingClient {
    async fn list(&self) -> Result<Vec<Drawing>, ClientError> {
        let response = self.client.get(self.drawings_url()).send().await?;
        let drawings: Vec<Drawing> = Self::parse_response(response).await?;
        tracing::debug!(count = drawings.len(), "Fetched drawings");
        Ok(drawings)
    }

    async fn get(&self, id: &DrawingId) -> Result<Drawing, ClientError> {
        let response = self.client.get(self.drawing_url(id)).send().await?;
        Self::parse_response(response).await
    }

    async fn create(&self, input: &CreateDrawing) -> Result<Drawing, ClientError> {
        let response = self
            .client
            .post(self.drawings_url())
            .json(input)
            .send()
            .await?;
        let drawing: Drawing = Self::parse_response(response).await?;
        tracing::debug!(drawing_id = %drawing.id, "Created drawing");
        Ok(drawing)
    }

    async fn delete(&self, id: &DrawingId) -> Result<(), ClientError> {
        let response = self.client.delete(self.drawing_url(id)).send().await?;
        let response = Self::ensure_success(response).await?;
        let status = response.status().as_u16();
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Api {
                status,
                message: envelope.error.unwrap_or_else(|| REQUEST_FAILED.to_string()),
            });
        }
        tracing::debug!(drawing_id = %id, "Deleted drawing");
        Ok(())
    }
}
