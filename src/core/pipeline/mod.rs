//! The resilient data-acquisition pipeline.
//!
//! Leaf-first: `fallback` depends on nothing, `extract` turns markup into
//! records, `relay` moves bytes through the proxy chain. The orchestrator in
//! `core::services` wires them together; nothing in here knows about the CLI.

pub mod extract;
pub mod fallback;
pub mod relay;
