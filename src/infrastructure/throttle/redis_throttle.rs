use super::traits::SubmitThrottle;
use async_trait::async_trait;
use redis::Client;
use tracing::warn;

/// Short-lived submit locks used to debounce repeated comment posts.
///
/// Redis failures and a missing client both let the request through.
#[derive(Clone)]
pub struct RedisThrottle {
    client: Option<Client>,
    cooldown_seconds: u64,
}

impl RedisThrottle {
    pub fn new(client: Option<Client>, cooldown_seconds: u64) -> Self {
        Self {
            client,
            cooldown_seconds,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }
}

#[async_trait]
impl SubmitThrottle for RedisThrottle {
    async fn try_acquire(&self, key: &str) -> bool {
        let Some(client) = &self.client else {
            return true;
        };
        if self.cooldown_seconds == 0 {
            return true;
        }

        let mut conn = match client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Redis unavailable, skipping throttle");
                return true;
            }
        };

        let acquired: Result<Option<String>, _> = redis::cmd("SET")
            .arg(format!("throttle:{}", key))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(self.cooldown_seconds)
            .query_async(&mut conn)
            .await;

        match acquired {
            Ok(reply) => reply.is_some(),
            Err(e) => {
                warn!(error = %e, "Throttle check failed, allowing request");
                true
            }
        }
    }
}
