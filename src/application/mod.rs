//! Application layer containing the record transform and its orchestration.
//!
//! `transformer` holds the pure, stateless transform. `processor` wraps it in a
//! `TravelProcessor` that routes each record to a success or failure sink and
//! can be shared across `tokio` tasks.

pub mod processor;
pub mod transformer;
