//! Adapters between external formats and the processor.

pub mod json;
