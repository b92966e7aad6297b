use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ParticipantResponse;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier cache of rendered top-three views
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Entries are only a shortcut for the score lookup: callers must re-check
/// the participant's selection state before trusting one.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Arc<str>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Cached top three of a mentee, `None` on a miss in both tiers
    pub async fn get_top_three(
        &self,
        participant_id: Uuid,
    ) -> Result<Option<Vec<ParticipantResponse>>, CacheError> {
        self.read(&CacheKey::top_three(participant_id)).await
    }

    pub async fn set_top_three(
        &self,
        participant_id: Uuid,
        view: &[ParticipantResponse],
    ) -> Result<(), CacheError> {
        self.write(&CacheKey::top_three(participant_id), &view).await
    }

    /// Drop a mentee's entry from this instance and from Redis. Other
    /// instances keep their L1 copy until it expires.
    pub async fn invalidate_top_three(&self, participant_id: Uuid) -> Result<(), CacheError> {
        let key = CacheKey::top_three(participant_id);
        self.l1_cache.invalidate(&key).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("DEL").arg(&key).query_async::<()>(&mut *conn).await?;
        Ok(())
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        if let Some(json) = self.l1_cache.get(key).await {
            tracing::trace!("L1 hit for {}", key);
            return Ok(Some(serde_json::from_str(&json)?));
        }

        let remote: Option<String> = {
            let mut conn = self.redis.lock().await;
            redis::cmd("GET").arg(key).query_async(&mut *conn).await?
        };

        match remote {
            Some(json) => {
                tracing::trace!("L2 hit for {}", key);
                let value = serde_json::from_str(&json)?;
                self.l1_cache.insert(key.to_string(), Arc::from(json)).await;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;

        {
            let mut conn = self.redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(&json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        self.l1_cache.insert(key.to_string(), Arc::from(json)).await;
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    pub fn top_three(participant_id: Uuid) -> String {
        format!("top3:{}", participant_id)
    }
}
