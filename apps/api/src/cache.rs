//! Insight cache: request fingerprint → previously generated insight text.
//!
//! Two backends behind `InsightCache`: an in-process map (default) and Redis.
//! Both honour the configured TTL; a zero TTL means entries never expire.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::zodiac::ZodiacSign;

const REDIS_KEY_PREFIX: &str = "insight:";
/// Keys per DEL when clearing the Redis namespace.
const CLEAR_BATCH_SIZE: usize = 500;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

#[async_trait]
pub trait InsightCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn put(&self, key: &str, insight: &str) -> Result<(), CacheError>;
    async fn clear(&self) -> Result<(), CacheError>;
}

/// SHA-256 hex fingerprint of `name:birth_date:zodiac:language`.
pub fn cache_key(name: &str, birth_date: &str, sign: ZodiacSign, language: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{name}:{birth_date}:{sign}:{language}"));
    format!("{:x}", hasher.finalize())
}

struct CachedInsight {
    insight: String,
    stored_at: Instant,
}

/// Process-lifetime cache. Expired entries are evicted when read.
pub struct InMemoryInsightCache {
    entries: RwLock<HashMap<String, CachedInsight>>,
    ttl: Duration,
}

impl InMemoryInsightCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_expired(&self, entry: &CachedInsight) -> bool {
        !self.ttl.is_zero() && entry.stored_at.elapsed() >= self.ttl
    }
}

#[async_trait]
impl InsightCache for InMemoryInsightCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !self.is_expired(entry) => return Ok(Some(entry.insight.clone())),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: a concurrent put may have refreshed it.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| self.is_expired(e)) {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|e| e.insight.clone()))
    }

    async fn put(&self, key: &str, insight: &str) -> Result<(), CacheError> {
        self.entries.write().await.insert(
            key.to_string(),
            CachedInsight {
                insight: insight.to_string(),
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

fn redis_key(key: &str) -> String {
    format!("{REDIS_KEY_PREFIX}{key}")
}

/// SCAN pattern covering every key written by `RedisInsightCache`.
fn namespace_pattern() -> String {
    format!("{REDIS_KEY_PREFIX}*")
}

/// Redis-backed cache. Keys are namespaced under `insight:`.
pub struct RedisInsightCache {
    client: redis::Client,
    ttl: Duration,
}

impl RedisInsightCache {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl InsightCache for RedisInsightCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(redis_key(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, insight: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(redis_key(key)).arg(insight);
        if !self.ttl.is_zero() {
            cmd.arg("EX").arg(self.ttl.as_secs().max(1));
        }
        cmd.query_async::<_, ()>(&mut conn).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter = conn
                .scan_match::<_, String>(namespace_pattern())
                .await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        for batch in keys.chunks(CLEAR_BATCH_SIZE) {
            conn.del::<_, ()>(batch.to_vec()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_keys_fall_under_the_clear_pattern() {
        let key = redis_key(&cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "en"));
        let pattern = namespace_pattern();
        let prefix = pattern.strip_suffix('*').unwrap();
        assert!(key.starts_with(prefix));
        assert_eq!(prefix, "insight:");
        assert!(!pattern[..pattern.len() - 1].contains('*'));
    }

    #[test]
    fn test_cache_key_is_pure() {
        let a = cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "en");
        let b = cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "en");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cache_key_changes_with_language() {
        let en = cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "en");
        let hi = cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "hi");
        assert_ne!(en, hi);
    }

    #[tokio::test]
    async fn test_put_then_get_returns_exact_text() {
        let cache = InMemoryInsightCache::new(Duration::from_secs(3600));
        let key = cache_key("Ritika", "1995-08-20", ZodiacSign::Leo, "en");

        assert_eq!(cache.get(&key).await.unwrap(), None);

        cache.put(&key, "Dear Ritika, shine on.").await.unwrap();
        assert_eq!(
            cache.get(&key).await.unwrap().as_deref(),
            Some("Dear Ritika, shine on.")
        );
    }

    #[tokio::test]
    async fn test_clear_empties_cache() {
        let cache = InMemoryInsightCache::new(Duration::ZERO);
        cache.put("k1", "one").await.unwrap();
        cache.put("k2", "two").await.unwrap();
        assert_eq!(cache.entries.read().await.len(), 2);

        cache.clear().await.unwrap();
        assert_eq!(cache.entries.read().await.len(), 0);
        assert_eq!(cache.get("k1").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let cache = InMemoryInsightCache::new(Duration::from_secs(60));
        cache.put("k", "text").await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("text"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert_eq!(cache.entries.read().await.len(), 0, "expired entry is evicted on read");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_never_expires() {
        let cache = InMemoryInsightCache::new(Duration::ZERO);
        cache.put("k", "text").await.unwrap();
        tokio::time::advance(Duration::from_secs(86_400)).await;
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("text"));
    }
}
