use crate::error::Result;
use async_trait::async_trait;

/// Destination for routed record payloads (a success or failure queue).
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn send(&self, payload: Vec<u8>) -> Result<()>;

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

pub type RecordSinkBox = Box<dyn RecordSink>;
