//! svconf Core - Supervisor configuration rendering
//!
//! This crate provides:
//! - Typed daemon settings and program records
//! - A pure renderer producing `supervisord`-style configuration text
//! - YAML/JSON input documents and builder defaults
//! - Error types with miette diagnostics

pub mod document;
pub mod error;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use document::{DocumentFormat, SupervisorConfig};
pub use error::{Result, SvconfError};
pub use render::{render, PROCESS_NUM_TOKEN, RPC_INTERFACE_FACTORY, SOCKET_PATH};
pub use types::{format_environment, GlobalSettings, ProgramSpec};
