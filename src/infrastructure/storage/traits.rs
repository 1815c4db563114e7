use crate::domain::media::{entity::Bucket, value_objects::StoredObject};
use async_trait::async_trait;
use bytes::Bytes;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores a new object (never overwrites) and returns its public URL.
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        data: Bytes,
        content_type: &str,
    ) -> anyhow::Result<String>;
    async fn delete(&self, bucket: Bucket, name: &str) -> anyhow::Result<()>;
    fn public_url(&self, bucket: Bucket, name: &str) -> String;

    /// Maps a public URL produced by this service back to its bucket and key.
    fn locate(&self, url: &str) -> Option<StoredObject> {
        Bucket::ALL.into_iter().find_map(|bucket| {
            let prefix = self.public_url(bucket, "");
            url.strip_prefix(prefix.as_str())
                .filter(|name| !name.is_empty())
                .map(|name| StoredObject {
                    bucket,
                    name: name.to_string(),
                })
        })
    }
}
