use crate::error::{Result, SvconfError};
use crate::render::render;
use crate::types::{GlobalSettings, ProgramSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Input document describing the daemon settings and the managed programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupervisorConfig {
    pub settings: GlobalSettings,
    /// Programs in rendering order
    #[serde(default)]
    pub programs: Vec<ProgramSpec>,
}

/// Serialization format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension (`.json` is JSON, anything else YAML)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = SvconfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(SvconfError::unsupported_format(s)),
        }
    }
}

impl SupervisorConfig {
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            settings,
            programs: Vec::new(),
        }
    }

    /// Append a program; rendering follows insertion order
    pub fn with_program(mut self, program: ProgramSpec) -> Self {
        self.programs.push(program);
        self
    }

    /// Render the supervisor configuration text
    pub fn render(&self) -> String {
        render(&self.settings, &self.programs)
    }

    /// Parse a document in the given format
    pub fn parse(data: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Yaml => Self::from_yaml(data),
            DocumentFormat::Json => Self::from_json(data),
        }
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(data).map_err(|e| {
            SvconfError::invalid_document("yaml", e.to_string(), Some(Box::new(e)))
        })?;
        debug!("Loaded YAML document with {} program(s)", config.programs.len());
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data).map_err(|e| {
            SvconfError::invalid_document("json", e.to_string(), Some(Box::new(e)))
        })?;
        debug!("Loaded JSON document with {} program(s)", config.programs.len());
        Ok(config)
    }

    /// Serialize the document in the given format
    pub fn to_string_as(&self, format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Yaml => self.to_yaml(),
            DocumentFormat::Json => self.to_json_pretty(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SvconfError::serialization_error(
                format!("Failed to serialize to YAML: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SvconfError::serialization_error(
                format!("Failed to serialize to JSON: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}
