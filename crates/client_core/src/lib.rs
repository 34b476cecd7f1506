use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Branch, Person},
    error::ApiError,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

mod session;

pub use session::{AddError, RosterSession, BRANCHES_FETCH_FAILED, PERSONNEL_FETCH_FAILED};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server_url must be an http:// or https:// url, got '{0}'")]
    InvalidServerUrl(String),
    #[error("server responded {status}: {error}")]
    Api { status: StatusCode, error: ApiError },
    #[error("server responded {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Reads branches and personnel from the roster server's `/api` routes.
#[derive(Clone)]
pub struct DirectoryClient {
    http: Client,
    server_url: Url,
}

impl DirectoryClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let raw = server_url.trim();
        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(ClientError::InvalidServerUrl(raw.to_string()));
        }
        let mut url =
            Url::parse(raw).map_err(|_| ClientError::InvalidServerUrl(raw.to_string()))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Self::with_timeout(url, REQUEST_TIMEOUT)
    }

    fn with_timeout(server_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    pub async fn branches(&self) -> Result<Vec<Branch>, ClientError> {
        self.get_json("api/branches").await
    }

    pub async fn personnel(&self) -> Result<Vec<Person>, ClientError> {
        self.get_json("api/personnel").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self
            .server_url
            .join(path)
            .map_err(|_| ClientError::InvalidServerUrl(self.server_url.to_string()))?;
        debug!(%url, "fetching directory");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match serde_json::from_str::<ApiError>(&body) {
            Ok(error) => ClientError::Api { status, error },
            Err(_) => ClientError::UnexpectedStatus { status, body },
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
