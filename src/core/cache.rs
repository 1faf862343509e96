use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Process lifetime memo shared between clones.
#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached value, or computes and stores it while holding the
    /// lock. Nothing is stored when `init` yields `None`.
    pub async fn get_or_insert_with<F>(&self, key: K, init: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        let mut cache = self.inner.lock().await;
        if let Some(value) = cache.get(&key) {
            debug!("Cache HIT for key: {:?}", key);
            return Some(value.clone());
        }
        debug!("Cache MISS for key: {:?}", key);
        let value = init()?;
        cache.insert(key, value.clone());
        Some(value)
    }

    /// Snapshot of every cached value.
    pub async fn values(&self) -> Vec<V> {
        self.inner.lock().await.values().cloned().collect()
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
