use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::errors::{PlatformError, Result};

pub struct RedisObjectCache {
    connection: MultiplexedConnection,
    key_prefix: String,
}

impl RedisObjectCache {
    /// 建立连接并用 PING 验证服务可用
    pub async fn connect(url: &str, key_prefix: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| PlatformError::cache_connection(format!("Invalid Redis URL: {e}")))?;

        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| PlatformError::cache_connection(format!("Redis connect failed: {e}")))?;

        let response: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|e| PlatformError::cache_connection(format!("Redis ping failed: {e}")))?;
        debug!("Redis connection test successful: {}", response);

        Ok(Self {
            connection,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let redis_key = self.make_key(key);
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<Option<String>> = conn.get(redis_key).await;

        match result {
            Ok(Some(data)) => {
                debug!("Successfully retrieved key: {}", key);
                CacheResult::Found(data)
            }
            Ok(None) => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
            Err(e) => {
                error!("Failed to get key '{}': {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> Result<()> {
        let redis_key = self.make_key(&key);
        let mut conn = self.connection.clone();

        conn.set_ex::<String, String, ()>(redis_key, value, ttl)
            .await
            .map_err(|e| {
                PlatformError::cache_connection(format!("Failed to insert key '{key}': {e}"))
            })?;

        debug!("Successfully inserted key into cache: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    async fn remove(&self, key: &str) {
        let redis_key = self.make_key(key);
        let mut conn = self.connection.clone();

        match conn.del::<String, i32>(redis_key).await {
            Ok(deleted_count) => {
                if deleted_count > 0 {
                    debug!("Successfully removed key from cache: {}", key);
                } else {
                    debug!("Key not found in cache for removal: {}", key);
                }
            }
            Err(e) => {
                error!("Failed to remove key '{}': {}", key, e);
            }
        }
    }
}
