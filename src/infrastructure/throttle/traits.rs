use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitThrottle: Send + Sync {
    /// `true` when the caller may proceed; `false` while a previous submit with the same key is cooling down.
    async fn try_acquire(&self, key: &str) -> bool;
}
