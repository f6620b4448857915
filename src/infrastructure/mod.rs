//! Concrete `RecordSink` implementations.

pub mod in_memory;
pub mod ndjson;
