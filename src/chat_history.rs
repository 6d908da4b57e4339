use tracing::{info, warn, error};

use crate::call_validation::ChatMessage;
use crate::kv_store::KvStore;


/// Store errors and garbage values both count as "no history yet", the request goes on.
pub async fn load_history(kv: &dyn KvStore, session_id: &str) -> Vec<ChatMessage> {
    let raw = match kv.get(session_id).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return vec![],
        Err(e) => {
            error!("Failed to load history for session {:?}: {}", session_id, e);
            return vec![];
        }
    };
    match serde_json::from_str::<Vec<ChatMessage>>(&raw) {
        Ok(history) => {
            info!("session {:?}: loaded {} messages", session_id, history.len());
            history
        }
        Err(e) => {
            warn!("Failed to parse history for session {:?}, starting over: {}", session_id, e);
            vec![]
        }
    }
}

pub fn recent_window(history: &[ChatMessage], n: usize) -> &[ChatMessage] {
    &history[history.len().saturating_sub(n)..]
}

pub fn cap_history(history: &mut Vec<ChatMessage>, max_persisted: usize) {
    if history.len() > max_persisted {
        history.drain(..history.len() - max_persisted);
    }
}

pub async fn save_history(kv: &dyn KvStore, session_id: &str, history: &[ChatMessage]) {
    let serialized = match serde_json::to_string(history) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to serialize history for session {:?}: {}", session_id, e);
            return;
        }
    };
    if let Err(e) = kv.put(session_id, &serialized).await {
        error!("Failed to save history for session {:?}: {}", session_id, e);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::call_validation::ChatRole;
    use crate::kv_store::MemoryKv;

    struct BrokenKv;

    #[async_trait]
    impl KvStore for BrokenKv {
        async fn get(&self, _key: &str) -> Result<Option<String>, String> {
            Err("kv is down".to_string())
        }
        async fn put(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("kv is down".to_string())
        }
        async fn list(&self, _limit: Option<usize>) -> Result<Vec<String>, String> {
            Err("kv is down".to_string())
        }
    }

    fn numbered(n: usize) -> Vec<ChatMessage> {
        (0..n).map(|i| ChatMessage::new(ChatRole::User, format!("m{}", i))).collect()
    }

    #[tokio::test]
    async fn test_load_missing_garbage_and_broken() {
        let kv = MemoryKv::new();
        assert!(load_history(&kv, "s").await.is_empty());
        kv.put("s", "{not json").await.unwrap();
        assert!(load_history(&kv, "s").await.is_empty());
        kv.put("s", r#"{"role":"user"}"#).await.unwrap();
        assert!(load_history(&kv, "s").await.is_empty());
        assert!(load_history(&BrokenKv, "s").await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let kv = MemoryKv::new();
        let history = numbered(3);
        save_history(&kv, "s", &history).await;
        assert_eq!(load_history(&kv, "s").await, history);
        save_history(&BrokenKv, "s", &history).await;
    }

    #[test]
    fn test_recent_window() {
        let history = numbered(8);
        let w = recent_window(&history, 5);
        assert_eq!(w.len(), 5);
        assert_eq!(w[0].content, "m3");
        assert_eq!(w[4].content, "m7");
        assert_eq!(recent_window(&history[..2], 5).len(), 2);
    }

    #[test]
    fn test_cap_history_keeps_latest_in_order() {
        let mut history = numbered(53);
        cap_history(&mut history, 50);
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].content, "m3");
        assert_eq!(history[49].content, "m52");
        let mut short = numbered(4);
        cap_history(&mut short, 50);
        assert_eq!(short.len(), 4);
    }
}
