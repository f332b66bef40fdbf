use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use bb8_redis::redis::AsyncCommands;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use super::SessionData;

const REDIS_KEY_PREFIX: &str = "sso-demo:session:";

/// Server-side session storage, keyed by session id.
#[derive(Clone)]
pub enum SessionStore {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl SessionStore {
    pub fn memory() -> Self {
        SessionStore::Memory(MemoryStore::default())
    }

    pub async fn redis(redis_url: &str) -> Result<Self> {
        let pool = create_redis_pool(redis_url).await?;
        Ok(SessionStore::Redis(RedisStore { pool }))
    }

    pub fn backend(&self) -> &'static str {
        match self {
            SessionStore::Memory(_) => "memory",
            SessionStore::Redis(_) => "redis",
        }
    }

    pub async fn load(&self, session_id: &str) -> Result<Option<SessionData>> {
        match self {
            SessionStore::Memory(store) => Ok(store.load(session_id).await),
            SessionStore::Redis(store) => store.load(session_id).await,
        }
    }

    pub async fn store(&self, session_id: &str, data: &SessionData, ttl_seconds: i64) -> Result<()> {
        match self {
            SessionStore::Memory(store) => store.store(session_id, data, ttl_seconds).await,
            SessionStore::Redis(store) => store.store(session_id, data, ttl_seconds).await,
        }
    }

    pub async fn remove(&self, session_id: &str) -> Result<()> {
        match self {
            SessionStore::Memory(store) => {
                store.remove(session_id).await;
                Ok(())
            }
            SessionStore::Redis(store) => store.remove(session_id).await,
        }
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug, Clone)]
struct MemoryEntry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// Process-local store. Expired entries are dropped lazily on access and
/// swept whenever a session is written.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl MemoryStore {
    async fn load(&self, session_id: &str) -> Option<SessionData> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(session_id) {
                Some(entry) if entry.expires_at > now => return Some(entry.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.entries.write().await.remove(session_id);
        None
    }

    async fn store(&self, session_id: &str, data: &SessionData, ttl_seconds: i64) -> Result<()> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .with_context(|| format!("Session TTL of {} seconds is out of range", ttl_seconds))?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            session_id.to_string(),
            MemoryEntry {
                data: data.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn remove(&self, session_id: &str) {
        self.entries.write().await.remove(session_id);
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

// ============================================================================
// Redis backend
// ============================================================================

#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
}

fn redis_key(session_id: &str) -> String {
    format!("{}{}", REDIS_KEY_PREFIX, session_id)
}

impl RedisStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to get Redis connection")?;

        let value: Option<String> = conn
            .get(redis_key(session_id))
            .await
            .context("Failed to read session from Redis")?;

        match value {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).context("Failed to decode stored session")?,
            )),
            None => Ok(None),
        }
    }

    async fn store(&self, session_id: &str, data: &SessionData, ttl_seconds: i64) -> Result<()> {
        let json = serde_json::to_string(data).context("Failed to encode session")?;
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to get Redis connection")?;

        let _: () = conn
            .set_ex(redis_key(session_id), json, ttl_seconds.max(1) as u64)
            .await
            .context("Failed to write session to Redis")?;
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to get Redis connection")?;

        let _: () = conn
            .del(redis_key(session_id))
            .await
            .context("Failed to delete session from Redis")?;
        Ok(())
    }
}

/// Create a Redis connection pool and check it answers a ping
async fn create_redis_pool(redis_url: &str) -> Result<Pool<RedisConnectionManager>> {
    let manager = RedisConnectionManager::new(redis_url)
        .context("Failed to create Redis connection manager")?;

    let pool = Pool::builder()
        .max_size(20)
        .min_idle(Some(2))
        .connection_timeout(std::time::Duration::from_secs(10))
        .idle_timeout(Some(std::time::Duration::from_secs(300)))
        .build(manager)
        .await
        .context("Failed to create Redis connection pool")?;

    {
        let mut conn = pool
            .get()
            .await
            .context("Failed to get initial Redis connection")?;

        let _: String = conn
            .ping()
            .await
            .context("Redis ping failed during pool initialization")?;
    }

    Ok(pool)
}
