use crate::domain::ports::RecordSink;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory sink for routed records.
///
/// Uses `Arc<RwLock<Vec<Vec<u8>>>>` so clones share the same buffer: hand one clone
/// to the processor and keep another to inspect what was routed.
#[derive(Default, Clone)]
pub struct InMemoryRecordSink {
    records: Arc<RwLock<Vec<Vec<u8>>>>,
}

impl InMemoryRecordSink {
    /// Creates a new, empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every payload received so far, in arrival order.
    pub async fn records(&self) -> Vec<Vec<u8>> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RecordSink for InMemoryRecordSink {
    async fn send(&self, payload: Vec<u8>) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(payload);
        Ok(())
    }
}

/// Accepts and drops every payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

#[async_trait]
impl RecordSink for DiscardSink {
    async fn send(&self, _payload: Vec<u8>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RecordSinkBox;

    #[tokio::test]
    async fn test_in_memory_sink_keeps_order() {
        let sink = InMemoryRecordSink::new();
        sink.send(b"first".to_vec()).await.unwrap();
        sink.send(b"second".to_vec()).await.unwrap();

        assert_eq!(sink.records().await, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[tokio::test]
    async fn test_clones_share_buffer() {
        let sink = InMemoryRecordSink::new();
        let boxed: RecordSinkBox = Box::new(sink.clone());

        boxed.send(b"{}".to_vec()).await.unwrap();
        boxed.flush().await.unwrap();

        assert_eq!(sink.records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_discard_sink_accepts_everything() {
        let sink: RecordSinkBox = Box::new(DiscardSink);
        sink.send(b"anything".to_vec()).await.unwrap();
        sink.flush().await.unwrap();
    }
}
