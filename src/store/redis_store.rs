use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisResult};

use super::DocumentStore;

const MAX_RECONNECT_DELAY_MS: u64 = 2_000;

/// Redis-backed document store. Each document is a plain string value.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect to `url`, accepting either a full `redis://` URL or a bare
    /// `host:port` address.
    pub async fn connect(url: &str) -> RedisResult<Self> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_max_delay(MAX_RECONNECT_DELAY_MS);

        let client = Client::open(normalize_url(url))?;
        let mut connection = client.get_connection_manager_with_config(config).await?;

        let _pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        log::info!("Connected to document store at {url}");

        Ok(Self { connection })
    }
}

fn normalize_url(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("redis://{url}")
    }
}

/// Escape glob metacharacters so a prefix matches literally in KEYS.
fn glob_escape(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('*');
    out
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.connection.clone();
        conn.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> RedisResult<()> {
        let mut conn = self.connection.clone();
        conn.set(key, value).await
    }

    async fn set_if_absent(&self, key: &str, value: String) -> RedisResult<bool> {
        let mut conn = self.connection.clone();
        conn.set_nx(key, value).await
    }

    async fn delete(&self, key: &str) -> RedisResult<u64> {
        let mut conn = self.connection.clone();
        conn.del(key).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> RedisResult<Vec<String>> {
        let mut conn = self.connection.clone();
        conn.keys(glob_escape(prefix)).await
    }
}
