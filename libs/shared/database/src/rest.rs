use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum RestError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::NotFound(_))
    }
}

/// JSON client for the collaborator services. Cheap to clone; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn send<B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<String, RestError>
    where
        B: Serialize + ?Sized,
    {
        debug!("Making {} request to {}", method, url);

        let mut req = self.client.request(method, url)
            .headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                debug!("Resource not found at {}", url);
                return Err(RestError::NotFound(url.to_string()));
            }
            error!("API error ({}) from {}: {}", status, url, text);
            return Err(RestError::Status { status, body: text });
        }

        Ok(text)
    }

    pub async fn request<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T, RestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, url, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, RestError> {
        self.request::<T, ()>(Method::GET, url, None).await
    }

    /// POSTs a JSON body. Collaborators answer with anything from a JSON
    /// document to a bare string, so the body is handed back as text.
    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<String, RestError> {
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<(), RestError> {
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}
