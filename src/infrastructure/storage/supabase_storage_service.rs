use super::traits::StorageService;
use crate::domain::media::entity::Bucket;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument};

const CACHE_CONTROL: &str = "max-age=3600";

/// Object storage of the hosted project, one public bucket per media kind.
pub struct SupabaseStorageService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStorageService {
    pub fn new(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn object_endpoint(&self, bucket: Bucket, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, name)
    }
}

#[async_trait]
impl StorageService for SupabaseStorageService {
    #[instrument(skip(self, data), fields(bucket = %bucket, size = data.len()))]
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        data: Bytes,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(self.object_endpoint(bucket, name))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CACHE_CONTROL, CACHE_CONTROL)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .context("storage upload request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("storage upload to {}/{} failed ({}): {}", bucket, name, status, body);
        }

        debug!(object = %name, "Stored object");
        Ok(self.public_url(bucket, name))
    }

    #[instrument(skip(self), fields(bucket = %bucket))]
    async fn delete(&self, bucket: Bucket, name: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .delete(self.object_endpoint(bucket, name))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("storage delete request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("storage delete of {}/{} failed ({}): {}", bucket, name, status, body);
        }
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, name)
    }
}
