use crate::domain::ports::RecordSink;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{self, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Writes each routed payload as one line of newline-delimited JSON.
///
/// The writer sits behind a `tokio::sync::Mutex`, so concurrent sends never
/// interleave bytes within a line.
pub struct NdjsonSink<W: AsyncWrite + Unpin + Send> {
    writer: Mutex<BufWriter<W>>,
}

impl<W: AsyncWrite + Unpin + Send> NdjsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
        }
    }
}

impl NdjsonSink<File> {
    /// Creates (or truncates) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(File::from_std(file)))
    }
}

impl NdjsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RecordSink for NdjsonSink<W> {
    async fn send(&self, payload: Vec<u8>) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(&payload).await?;
        writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_payloads_written_one_per_line() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = NdjsonSink::create(file.path()).unwrap();

        sink.send(br#"{"a":1}"#.to_vec()).await.unwrap();
        sink.send(br#"{"b":2}"#.to_vec()).await.unwrap();
        sink.flush().await.unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[tokio::test]
    async fn test_create_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = NdjsonSink::create(dir.path().join("missing").join("out.ndjson"));
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_keep_lines_whole() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = Arc::new(NdjsonSink::create(file.path()).unwrap());

        let mut handles = Vec::new();
        for worker in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(tokio::spawn(async move {
                for i in 0..100 {
                    let line = format!(r#"{{"worker":{worker},"seq":{i}}}"#);
                    sink.send(line.into_bytes()).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        sink.flush().await.unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 800);
        for line in content.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["worker"].is_u64());
        }
    }
}
