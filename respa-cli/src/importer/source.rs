//! Where sheet CSV text comes from

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;

/// A source of CSV text for an importer
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Human-readable location, for log lines
    fn describe(&self) -> String;

    /// Fetch the whole sheet as UTF-8 text
    async fn fetch(&self) -> Result<String>;
}

/// Sheet exported over HTTP(S), e.g. a Google Sheets CSV export URL
pub struct HttpSheetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSheetSource {
    /// Create a source; without a timeout the request waits indefinitely
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(HttpSheetSource {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch sheet from {}", self.url))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("Fetching sheet from {} returned HTTP {}", self.url, status);
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read sheet body from {}", self.url))?;

        String::from_utf8(body.to_vec()).context("Sheet is not valid UTF-8")
    }
}

/// Sheet stored as a local CSV file
pub struct FileSheetSource {
    path: PathBuf,
}

impl FileSheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSheetSource { path: path.into() }
    }
}

#[async_trait]
impl SheetSource for FileSheetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read sheet file: {}", self.path.display()))?;
        String::from_utf8(bytes)
            .with_context(|| format!("Sheet file is not valid UTF-8: {}", self.path.display()))
    }
}

/// Sheet text held in memory
#[cfg(test)]
pub struct StaticSheetSource(pub String);

#[cfg(test)]
#[async_trait]
impl SheetSource for StaticSheetSource {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
