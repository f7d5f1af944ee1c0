use crate::domain::model::{Entry, ImportRequest};
use crate::domain::ports::{ImportSettings, Submitter};
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const IMPORT_PATH: &str = "/api/import";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Posts normalized entries to the backend in one request.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
    csrf_token: String,
}

impl HttpSubmitter {
    pub fn new(
        base_url: &str,
        csrf_token: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(IMPORT_PATH))
            .map_err(|e| ImportError::ConfigError {
                message: format!("invalid backend URL '{}': {}", base_url, e),
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ImportError::ConfigError {
            message: format!("could not build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            endpoint,
            csrf_token: csrf_token.into(),
        })
    }

    pub fn from_settings<C: ImportSettings + ?Sized>(settings: &C) -> Result<Self> {
        Self::new(
            settings.base_url(),
            settings.csrf_token(),
            settings.timeout_seconds().map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, entries: &[Entry]) -> Result<()> {
        tracing::debug!(
            "POST {} with {} entries",
            self.endpoint,
            entries.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, &self.csrf_token)
            .json(&ImportRequest { entries })
            .send()
            .await
            .map_err(|e| ImportError::submission(None, format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Import response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::submission(
                Some(status.as_u16()),
                format!("backend returned HTTP {}: {}", status, body.trim()),
            ));
        }

        Ok(())
    }
}
