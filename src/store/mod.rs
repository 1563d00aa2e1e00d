//! Document store abstraction.
//!
//! Every service persists one JSON document per key. The store knows
//! nothing about entity types; it only moves strings in and out by key
//! and answers prefix scans. Two backends exist:
//! - `MemoryStore` - process-local map, used by tests and `--in-memory`
//! - `RedisStore` - shared Redis instance, the deployed configuration

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;
use redis::RedisResult;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the raw document stored under `key`.
    async fn get(&self, key: &str) -> RedisResult<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: String) -> RedisResult<()>;

    /// Store `value` only when `key` is vacant. Returns false if the key
    /// already held a document.
    async fn set_if_absent(&self, key: &str, value: String) -> RedisResult<bool>;

    /// Remove `key`, returning how many documents were deleted (0 or 1).
    async fn delete(&self, key: &str) -> RedisResult<u64>;

    /// All keys starting with `prefix`, in no particular order.
    async fn keys_with_prefix(&self, prefix: &str) -> RedisResult<Vec<String>>;
}
