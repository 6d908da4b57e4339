use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock as ARwLock;


#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    async fn put(&self, key: &str, value: &str) -> Result<(), String>;

    /// Key names in lexicographic order, at most `limit` of them if given.
    async fn list(&self, limit: Option<usize>) -> Result<Vec<String>, String>;
}


/// Lives as long as the process, used when no KV namespace is configured and in tests.
#[derive(Default)]
pub struct MemoryKv {
    data: ARwLock<BTreeMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), String> {
        self.data.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<String>, String> {
        let data = self.data.read().await;
        let keys = data.keys().cloned();
        Ok(match limit {
            Some(n) => keys.take(n).collect(),
            None => keys.collect(),
        })
    }
}
