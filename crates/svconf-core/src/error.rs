// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Error type for loading and serializing supervisor configuration documents
#[derive(Error, Debug, Diagnostic)]
pub enum SvconfError {
    /// Input document could not be turned into settings and programs
    #[error("Invalid {format} document: {message}")]
    #[diagnostic(
        code(svconf::invalid_document),
        help("Every program needs name, command, directory, number_of_processes, auto_start, auto_restart, start_retries, stop_signal, log_folder, log_file_max_mb and log_file_backups. The settings block needs log_file, log_file_max_mb, log_file_backups, log_level, pidfile and user")
    )]
    InvalidDocument {
        #[allow(unused)]
        format: String,
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(
        code(svconf::serialization_error),
        help("This is likely a bug. Please report it with the full error details")
    )]
    SerializationError {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Unknown document format name
    #[error("Unsupported document format: {format}")]
    #[diagnostic(
        code(svconf::unsupported_format),
        help("Supported formats: yaml, json")
    )]
    UnsupportedFormat {
        #[allow(unused)]
        format: String,
    },
}

/// Result type alias for svconf operations
pub type Result<T> = std::result::Result<T, SvconfError>;

impl SvconfError {
    /// Create an InvalidDocument error
    pub fn invalid_document(
        format: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::InvalidDocument {
            format: format.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a SerializationError
    pub fn serialization_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source,
        }
    }

    /// Create an UnsupportedFormat error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
