use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use stitch_quant::Pattern;
use tokio::sync::RwLock;

/// A pattern kept for later export
#[derive(Debug, Clone)]
pub struct StoredPattern {
    /// Content address of the serialized pattern
    pub id: String,
    pub pattern: Arc<Pattern>,
    /// When this pattern was first stored
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Default)]
struct Entries {
    by_id: HashMap<String, StoredPattern>,
    /// Insertion order, oldest first
    order: VecDeque<String>,
}

/// Bounded in-memory pattern store, evicting the oldest entry when full
pub struct PatternStore {
    entries: RwLock<Entries>,
    capacity: usize,
}

/// First 16 hex characters of the SHA-256 of the pattern's JSON form.
pub fn pattern_id(pattern: &Pattern) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(pattern)?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(&digest[..8]))
}

impl PatternStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    /// Store a pattern. Storing an identical pattern again returns the
    /// existing entry unchanged.
    pub async fn insert(&self, pattern: Pattern) -> Result<StoredPattern, serde_json::Error> {
        let id = pattern_id(&pattern)?;

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.by_id.get(&id) {
            return Ok(existing.clone());
        }

        while entries.order.len() >= self.capacity {
            if let Some(oldest) = entries.order.pop_front() {
                entries.by_id.remove(&oldest);
                tracing::debug!(id = %oldest, "Evicted pattern");
            }
        }

        let stored = StoredPattern {
            id: id.clone(),
            pattern: Arc::new(pattern),
            created_at: chrono::Utc::now(),
        };
        entries.order.push_back(id.clone());
        entries.by_id.insert(id, stored.clone());

        Ok(stored)
    }

    pub async fn get(&self, id: &str) -> Option<StoredPattern> {
        let entries = self.entries.read().await;
        entries.by_id.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
