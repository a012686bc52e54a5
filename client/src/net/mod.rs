//! Networking for the review API.
//!
//! `api` handles the REST call; the wire schema itself lives in the shared
//! `review` crate.

pub mod api;
