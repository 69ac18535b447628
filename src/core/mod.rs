//! Core functionality modules
//!
//! This module contains the business logic organized into logical layers:
//! - `types`: Data model shared across the pipeline
//! - `pipeline`: Resilient acquisition (relay failover, extraction, fallback)
//! - `services`: Source-site orchestration clients

pub mod pipeline;
pub mod services;
pub mod types;
