//! Shared domain types for Weft.
//!
//! This crate contains the core domain types used across the Weft workspace:
//! conversation turns, documents and chunks, LLM request/response shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod document;
pub mod error;
pub mod llm;
