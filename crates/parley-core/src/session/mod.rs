//! Backend session client.
//!
//! Holds the session identity (credentials, resolved tenant, reasoning
//! mode, default request attributes) and implements every call of the
//! conversation lifecycle against the backend's web API.

mod api;
mod client;
mod config;
mod reasoning;

pub use client::SessionClient;
pub use config::SessionConfig;
pub use reasoning::{ModelSelection, ReasoningMode, REASONING_SUFFIX};
