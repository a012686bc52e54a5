//! Shared review domain for the PairBench client and server.
//!
//! This crate owns the `/api/review` wire schema and everything both sides
//! need to agree on: the target-language enum (with its starter samples) and
//! the sectioning of a model reply into a proposed refactor and proposed
//! test cases. It is deliberately I/O-free so the client (WASM) and server
//! share one implementation.

pub mod language;
pub mod markdown;
pub mod types;

pub use language::Language;
pub use types::{ReviewReply, ReviewRequest};
