use crate::application::transformer::{Transformed, transform};
use crate::domain::ports::RecordSinkBox;
use crate::domain::record::Outcome;
use crate::error::{ProcessorError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Counts of records routed to each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl ProcessingSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives the transform for each incoming record and routes the result.
///
/// `TravelProcessor` owns one sink per outcome. The transform is stateless, so a
/// single processor can be shared (e.g. behind an `Arc`) by any number of tasks;
/// only the outcome counters are shared between calls.
pub struct TravelProcessor {
    success: RecordSinkBox,
    failure: RecordSinkBox,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl TravelProcessor {
    /// Creates a new `TravelProcessor`.
    ///
    /// # Arguments
    ///
    /// * `success` - Receives priced trip documents.
    /// * `failure` - Receives the untouched original of every rejected record.
    pub fn new(success: RecordSinkBox, failure: RecordSinkBox) -> Self {
        Self {
            success,
            failure,
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Transforms one record and forwards it to the matching sink.
    ///
    /// A record that fails validation is not an error here: it is routed to the
    /// failure sink and `Outcome::Failure` is returned. Errors only come from the sinks
    /// and are reported as [`ProcessorError::SinkError`] naming the route.
    pub async fn process_record(&self, payload: Vec<u8>) -> Result<Outcome> {
        match transform(payload) {
            Transformed::Success(output) => {
                debug!(bytes = output.len(), "record routed to success");
                self.success
                    .send(output)
                    .await
                    .map_err(|e| ProcessorError::sink(Outcome::Success, e))?;
                self.succeeded.fetch_add(1, Ordering::Relaxed);
                Ok(Outcome::Success)
            }
            Transformed::Failure { original, error } => {
                warn!(%error, "record routed to failure");
                self.failure
                    .send(original)
                    .await
                    .map_err(|e| ProcessorError::sink(Outcome::Failure, e))?;
                self.failed.fetch_add(1, Ordering::Relaxed);
                Ok(Outcome::Failure)
            }
        }
    }

    pub fn summary(&self) -> ProcessingSummary {
        ProcessingSummary {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Flushes both sinks and returns the final counts.
    pub async fn finish(&self) -> Result<ProcessingSummary> {
        self.success
            .flush()
            .await
            .map_err(|e| ProcessorError::sink(Outcome::Success, e))?;
        self.failure
            .flush()
            .await
            .map_err(|e| ProcessorError::sink(Outcome::Failure, e))?;
        Ok(self.summary())
    }
}
