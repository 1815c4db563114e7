use lazy_static::lazy_static;
use regex::Regex;

use super::entity::Bucket;

lazy_static! {
    static ref UNSAFE_NAME_CHARS: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

const MAX_NAME_LEN: usize = 120;

/// Object key inside a bucket: `{unix_millis}_{sanitized original name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName(String);

impl ObjectName {
    pub fn new(uploaded_at_millis: i64, original: &str) -> Self {
        let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
        let cleaned = UNSAFE_NAME_CHARS.replace_all(base.trim(), "_");
        let cleaned = cleaned.trim_matches(|c| c == '_' || c == '.');
        let cleaned = if cleaned.is_empty() { "file" } else { cleaned };
        let cleaned: String = cleaned.chars().take(MAX_NAME_LEN).collect();
        Self(format!("{}_{}", uploaded_at_millis, cleaned))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored object addressed by bucket and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: Bucket,
    pub name: String,
}
