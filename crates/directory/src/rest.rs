use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::domain::{Branch, Person};
use tracing::debug;
use url::Url;

use crate::{config::DirectoryConfig, Directory};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY_CHARS: usize = 500;
const BRANCHES_TABLE: &str = "branches";
const PERSONNEL_TABLE: &str = "personnel";

/// Reads the directory tables from a PostgREST-style endpoint
/// (`{url}/rest/v1/{table}`), authenticating with the anon key.
#[derive(Clone)]
pub struct RestDirectory {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl RestDirectory {
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build directory http client")?;
        Ok(Self {
            http,
            base_url: config.base_url()?,
            api_key: config.directory_key.trim().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .with_context(|| format!("failed to build url for table '{table}'"))
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table)?;
        debug!(%url, "fetching directory rows");

        let response = self
            .http
            .get(url)
            .query(&[("select", "*"), ("order", "name")])
            .query(extra_query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .with_context(|| format!("directory request for '{table}' failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "directory returned {status} for '{table}': {}",
                truncate_body(&body)
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("directory returned malformed '{table}' rows"))
    }
}

#[async_trait]
impl Directory for RestDirectory {
    async fn branches(&self) -> Result<Vec<Branch>> {
        self.fetch_rows(BRANCHES_TABLE, &[]).await
    }

    async fn personnel(&self) -> Result<Vec<Person>> {
        self.fetch_rows(PERSONNEL_TABLE, &[]).await
    }

    async fn health_check(&self) -> Result<()> {
        let _: Vec<Branch> = self
            .fetch_rows(BRANCHES_TABLE, &[("limit", "1")])
            .await
            .context("directory ping failed")?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "rest"
    }
}

fn truncate_body(body: &str) -> String {
    let total = body.chars().count();
    if total <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{head}... (truncated, {total} chars total)")
}

#[cfg(test)]
#[path = "tests/rest_tests.rs"]
mod tests;
