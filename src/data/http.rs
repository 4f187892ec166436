use crate::domain::ports::DataStore;
use crate::utils::error::{BudgetError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Read-only store for datasets hosted behind an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: Url,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash makes Url::join treat the base as a directory.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| BudgetError::InvalidConfigValueError {
            field: "data_url".to_string(),
            value: normalized.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BudgetError::InvalidConfigValueError {
                field: "data_url".to_string(),
                value: path.to_string(),
                reason: format!("Invalid dataset path: {}", e),
            })
    }
}

#[async_trait]
impl DataStore for HttpStore {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(path)?;
        tracing::debug!("Fetching dataset from: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        tracing::debug!("Fetched {} bytes for {}", bytes.len(), path);
        Ok(bytes.to_vec())
    }

    async fn write(&self, _path: &str, _data: &[u8]) -> Result<()> {
        Err(BudgetError::UnsupportedOperationError {
            operation: "write to an HTTP data source".to_string(),
        })
    }
}
