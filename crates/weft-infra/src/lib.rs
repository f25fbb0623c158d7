//! Infrastructure implementations for Weft.
//!
//! Everything that talks to the outside world lives here: the Gemini chat
//! and embedding clients, the Tavily search tool, the web page loader and
//! chunker, the in-memory vector store, the Postgres transcript store, and
//! environment-based configuration loading. Each module implements a port
//! defined in `weft-core`.

pub mod config;
pub mod llm;
pub mod loader;
pub mod postgres;
pub mod search;
pub mod vector;
