use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::{HISTORY_ENDPOINT, PREDICT_ENDPOINT};
use crate::models::{ApiEnvelope, PredictionRecord};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {endpoint} is not valid JSON: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} reported an error: {message}")]
    Rejected { endpoint: String, message: String },
    #[error("cannot call {endpoint}: base URL `{base_url}` is not an absolute http(s) URL")]
    InvalidBaseUrl { endpoint: String, base_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// JSON client for the SmartCrop application endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is prepended to every endpoint and must be an absolute
    /// `http` or `https` URL such as `http://localhost:5000`. In the browser
    /// pass the page origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<reqwest::Url, ApiError> {
        let invalid = || ApiError::InvalidBaseUrl {
            endpoint: endpoint.to_string(),
            base_url: self.base_url.clone(),
        };
        let url = reqwest::Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|_| invalid())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(invalid()),
        }
    }

    /// Sends a JSON request and decodes the JSON response.
    ///
    /// The body is only sent for non-GET requests. Failures are logged and
    /// returned to the caller.
    pub async fn call<B, R>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        method: Method,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self.send(endpoint, body, method).await;
        if let Err(err) = &result {
            error!(endpoint, error = %err, "API error");
        }
        result
    }

    async fn send<B, R>(&self, endpoint: &str, body: Option<&B>, method: Method) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let network = |source: reqwest::Error| ApiError::Network {
            endpoint: endpoint.to_string(),
            source,
        };

        let mut request = self
            .client
            .request(method.as_reqwest(), self.url(endpoint)?)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            if method != Method::Get {
                request = request.json(body);
            }
        }

        debug!(endpoint, ?method, "sending API request");
        let response = request.send().await.map_err(network)?;
        let text = response.text().await.map_err(network)?;

        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Fetches the signed-in user's recent predictions.
    pub async fn fetch_history(&self) -> Result<Vec<PredictionRecord>, ApiError> {
        let envelope: ApiEnvelope<Vec<PredictionRecord>> =
            self.call::<(), _>(HISTORY_ENDPOINT, None, Method::Get).await?;
        Ok(unwrap_envelope(HISTORY_ENDPOINT, envelope)?.unwrap_or_default())
    }

    /// Posts soil and weather features and returns the predictor's result
    /// object as sent by the server.
    pub async fn predict<F>(&self, features: &F) -> Result<serde_json::Value, ApiError>
    where
        F: Serialize + ?Sized,
    {
        let envelope: ApiEnvelope<serde_json::Value> =
            self.call(PREDICT_ENDPOINT, Some(features), Method::Post).await?;
        Ok(unwrap_envelope(PREDICT_ENDPOINT, envelope)?.unwrap_or_default())
    }
}

fn unwrap_envelope<T>(endpoint: &str, envelope: ApiEnvelope<T>) -> Result<Option<T>, ApiError> {
    if envelope.success {
        return Ok(envelope.data);
    }
    let err = ApiError::Rejected {
        endpoint: endpoint.to_string(),
        message: envelope.error.unwrap_or_else(|| "unknown error".to_string()),
    };
    error!(error = %err, "API error");
    Err(err)
}
