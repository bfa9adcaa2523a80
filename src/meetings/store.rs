// src/meetings/store.rs
//! Key-value backed room membership tracking
//!
//! Rooms live entirely in the key-value store: one hash per room keyed by
//! client id, plus a `title` field for titled meeting rooms that shares the
//! same hash namespace and is filtered out of member enumeration.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::MeetingRoomInfo;

pub const MEETING_ROOM_KEY_PREFIX: &str = "meeting_room:";
pub const ROOM_KEY_PREFIX: &str = "room:";
pub const CLIENT_KEY_PREFIX: &str = "client:";

/// Reserved hash field holding the room title; never a member.
pub const TITLE_FIELD: &str = "title";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis operation failed: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Hash-per-key store abstraction backing the presence tracker
///
/// Keys map to field/value hashes. Writing a field on a missing key creates
/// the key (get-or-create semantics); field deletes and whole-key deletes of
/// missing entries are no-ops.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;
    async fn hash_del(&self, key: &str, field: &str) -> Result<(), StoreError>;
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;
    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;
    async fn delete_key(&self, key: &str) -> Result<(), StoreError>;
    /// Enumerate keys matching a `prefix*` pattern
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;
}

/// Redis-backed store using a multiplexed connection manager
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn hash_del(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.hdel(key, field).await?;
        Ok(())
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.hget(key, field).await?;
        Ok(value)
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.conn.clone();
        let entries: HashMap<String, String> = conn.hgetall(key).await?;
        Ok(entries)
    }

    async fn delete_key(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = redis::cmd("KEYS").arg(pattern).query_async(&mut conn).await?;
        Ok(keys)
    }
}

/// In-memory store used by tests and Redis-less local development
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn hash_del(&self, key: &str, field: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if let Some(hash) = entries.get_mut(key) {
            hash.remove(field);
        }
        Ok(())
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).and_then(|hash| hash.get(field).cloned()))
    }

    async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned().unwrap_or_default())
    }

    async fn delete_key(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
        let entries = self.entries.read().await;
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Room membership tracker over a key-value store
///
/// Membership is a set: duplicate joins and leaves of absent members are
/// no-ops. Rooms are created implicitly on first join. Empty-room cleanup is
/// the caller's responsibility (leave, check members, delete) and is not
/// atomic against a concurrent join.
#[derive(Clone)]
pub struct PresenceStore {
    store: Arc<dyn KvStore>,
}

impl PresenceStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn meeting_room_key(room_id: &str) -> String {
        format!("{}{}", MEETING_ROOM_KEY_PREFIX, room_id)
    }

    fn room_key(room_id: &str) -> String {
        format!("{}{}", ROOM_KEY_PREFIX, room_id)
    }

    fn client_key(client_id: &str) -> String {
        format!("{}{}", CLIENT_KEY_PREFIX, client_id)
    }

    /// Add a client to a meeting room, creating the room if needed
    ///
    /// A non-empty title is written first and overwrites any previous title;
    /// a missing title never erases one that was already set.
    pub async fn join_meeting_room(
        &self,
        room_id: &str,
        title: Option<&str>,
        client_id: &str,
    ) -> Result<(), StoreError> {
        let key = Self::meeting_room_key(room_id);
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.store.hash_set(&key, TITLE_FIELD, title).await?;
        }
        self.store.hash_set(&key, client_id, "").await
    }

    /// Remove a client from a meeting room; no-op when the client is absent
    pub async fn leave_meeting_room(
        &self,
        room_id: &str,
        client_id: &str,
    ) -> Result<(), StoreError> {
        let key = Self::meeting_room_key(room_id);
        self.store.hash_del(&key, client_id).await
    }

    /// All member client ids of a meeting room, excluding the title field
    pub async fn meeting_room_members(&self, room_id: &str) -> Result<Vec<String>, StoreError> {
        let key = Self::meeting_room_key(room_id);
        let entries = self.store.hash_get_all(&key).await?;
        let mut members: Vec<String> = entries
            .into_keys()
            .filter(|field| field != TITLE_FIELD)
            .collect();
        members.sort();
        Ok(members)
    }

    pub async fn meeting_room_title(&self, room_id: &str) -> Result<Option<String>, StoreError> {
        let key = Self::meeting_room_key(room_id);
        self.store.hash_get(&key, TITLE_FIELD).await
    }

    /// Remove a meeting room entirely, regardless of membership
    pub async fn delete_meeting_room(&self, room_id: &str) -> Result<(), StoreError> {
        let key = Self::meeting_room_key(room_id);
        self.store.delete_key(&key).await
    }

    /// Enumerate all meeting rooms with their titles and members
    ///
    /// One key scan plus per-room reads; rooms mutated mid-enumeration may be
    /// inconsistently included. No snapshot isolation.
    pub async fn list_meeting_rooms(&self) -> Result<Vec<MeetingRoomInfo>, StoreError> {
        let pattern = format!("{}*", MEETING_ROOM_KEY_PREFIX);
        let keys = self.store.scan_keys(&pattern).await?;

        let mut rooms = Vec::with_capacity(keys.len());
        for key in keys {
            let room_id = key
                .strip_prefix(MEETING_ROOM_KEY_PREFIX)
                .unwrap_or(&key)
                .to_string();
            let clients = self.meeting_room_members(&room_id).await?;
            let title = self.meeting_room_title(&room_id).await?;
            rooms.push(MeetingRoomInfo {
                room_id,
                title,
                clients,
            });
        }

        Ok(rooms)
    }

    /// Add a client to an untitled ad-hoc room
    pub async fn join_room(&self, room_id: &str, client_id: &str) -> Result<(), StoreError> {
        let key = Self::room_key(room_id);
        self.store.hash_set(&key, client_id, "").await
    }

    /// Remove a client from an ad-hoc room; no-op when absent
    pub async fn leave_room(&self, room_id: &str, client_id: &str) -> Result<(), StoreError> {
        let key = Self::room_key(room_id);
        self.store.hash_del(&key, client_id).await
    }

    pub async fn room_members(&self, room_id: &str) -> Result<Vec<String>, StoreError> {
        let key = Self::room_key(room_id);
        let entries = self.store.hash_get_all(&key).await?;
        let mut members: Vec<String> = entries.into_keys().collect();
        members.sort();
        Ok(members)
    }

    /// Set per-client metadata fields; independent of room membership
    pub async fn set_client_info(
        &self,
        client_id: &str,
        info: &HashMap<String, String>,
    ) -> Result<(), StoreError> {
        let key = Self::client_key(client_id);
        for (field, value) in info {
            self.store.hash_set(&key, field, value).await?;
        }
        Ok(())
    }

    pub async fn get_client_info(
        &self,
        client_id: &str,
    ) -> Result<HashMap<String, String>, StoreError> {
        let key = Self::client_key(client_id);
        self.store.hash_get_all(&key).await
    }

    pub async fn delete_client_info(&self, client_id: &str) -> Result<(), StoreError> {
        let key = Self::client_key(client_id);
        self.store.delete_key(&key).await
    }
}
