pub mod object_cache;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::CacheConfig;
use crate::errors::Result;
use object_cache::{moka::MokaCacheWrapper, redis::RedisObjectCache};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法确定键是否存在
    ExistsButNoValue,
}

/// 以字符串为值的键值缓存，带逐项过期时间
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    async fn insert_raw(&self, key: String, value: String, ttl: u64) -> Result<()>;

    async fn remove(&self, key: &str);
}

/// 按配置创建缓存后端，Redis 不可用时回退到进程内缓存
pub async fn create_object_cache(config: &CacheConfig) -> Arc<dyn ObjectCache> {
    let cache_type = config.cache_type.as_str();

    if cache_type == "redis" {
        match RedisObjectCache::connect(&config.redis.url, &config.redis.key_prefix).await {
            Ok(cache) => {
                info!("Successfully created redis cache backend");
                return Arc::new(cache);
            }
            Err(e) => {
                warn!("Failed to create redis cache: {}", e);
                warn!("Falling back to memory cache");
            }
        }
    } else if cache_type != "moka" {
        warn!(
            "Cache backend '{}' is not supported, falling back to memory cache",
            cache_type
        );
    }

    Arc::new(MokaCacheWrapper::new(config.memory.max_capacity))
}
