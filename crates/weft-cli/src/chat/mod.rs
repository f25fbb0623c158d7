//! Interactive chat shell shared by the agent and memory demos.
//!
//! The session semantics (sentinels, empty input, fallback, transcript
//! commits) live in `weft_core::chat::SessionEngine`; this module is the
//! thin IO loop around it: async readline, spinner, styled output, and
//! optional persistence of committed exchanges.

pub mod input;
pub mod runner;
