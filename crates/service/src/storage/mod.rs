//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores used by the settings implementation.

pub mod json_map_store;
