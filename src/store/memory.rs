use async_trait::async_trait;
use redis::RedisResult;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::DocumentStore;

/// In-process document store. Cloning shares the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across every prefix.
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let map = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> RedisResult<()> {
        let mut map = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        map.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: String) -> RedisResult<bool> {
        let mut map = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        if map.contains_key(key) {
            return Ok(false);
        }
        map.insert(key.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> RedisResult<u64> {
        let mut map = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map.remove(key).map_or(0, |_| 1))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> RedisResult<Vec<String>> {
        let map = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
