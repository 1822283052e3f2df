//! Transport seam between the provider and the network.
//!
//! The provider only needs "GET this URL, give me the body". Production code
//! uses [`ReqwestExchange`]; tests inject their own [`HttpExchange`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

/// A request that completed but came back with a non-success status.
#[derive(Debug, Error)]
#[error("request failed with status {status}: {body}")]
pub struct StatusError {
    pub status: reqwest::StatusCode,
    pub body: String,
}

/// Executes a single GET request and returns the response body.
#[async_trait]
pub trait HttpExchange: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<String>;
}

/// Default transport backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestExchange {
    http: Client,
}

impl ReqwestExchange {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn get(&self, url: &str) -> Result<String> {
        debug!(url = %url, "executing GET");

        let res = self.http.get(url).send().await.context("Failed to send request")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read response body")?;

        if !status.is_success() {
            return Err(StatusError { status, body: truncate_body(&body) }.into());
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
