pub mod redis_throttle;
pub mod traits;
