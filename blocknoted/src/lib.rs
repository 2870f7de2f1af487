//! # Block Note Host Daemon
//!
//! Hosts the block-content service in a single process and replays request
//! scripts against it.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The service never prints; responses are written by
//!   the host, one JSON line per request
//! - **Requests are explicit**: Every script line becomes one envelope
//! - **Deterministic replay is first-class**: For tests and demos
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Provide a network transport
//! - Persist blocks between runs
//! - Authenticate callers

pub mod config;
pub mod request_script;
pub mod runtime;

pub use config::{ConfigError, DaemonConfig};
pub use request_script::{RequestScript, RequestScriptError, ScriptedRequest};
pub use runtime::{DaemonError, DaemonRuntime};
