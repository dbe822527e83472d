// crates/shared-kernel/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum YearFilterError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<YearFilterError>,
    },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),
}

impl YearFilterError {
    /// Walks through `Context` wrappers and returns the innermost error.
    pub fn root(&self) -> &YearFilterError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the application error at the root, if that is what failed.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self.root() {
            Self::Application(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the domain error at the root, if that is what failed.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self.root() {
            Self::Domain(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, YearFilterError>;

/// Domain-layer specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Malformed value for field '{field}': '{value}' is not an integer year")]
    MalformedValue { field: String, value: String },

    #[error("Invalid year range: from {from} is greater than to {to}")]
    InvalidRange { from: i64, to: i64 },

    #[error("The {role} field name must not be empty")]
    EmptyFieldName { role: String },

    #[error("Invalid filter expression: {expression} - {details}")]
    InvalidFilterExpression { expression: String, details: String },

    #[error("Range validation failed: {field} must be between {min} and {max}")]
    RangeValidation {
        field: String,
        min: String,
        max: String,
    },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Application-layer errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("No layer selected")]
    MissingSelection,

    #[error("Layer '{layer}' does not have the required fields ({})", .missing.join(", "))]
    MissingFields { layer: String, missing: Vec<String> },

    #[error("Layer '{name}' not found")]
    LayerNotFound { name: String },

    #[error("Field names are fixed for this session")]
    FieldsLocked,

    #[error("Failed to apply filter to layer '{layer}': {reason}")]
    FilterFailed {
        layer: String,
        reason: String,
        #[source]
        source: Option<Box<YearFilterError>>,
    },
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} input: {details}")]
    SerializationError { format: String, details: String },

    #[error("Unsupported file format '{extension}' for '{path}'")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Invalid layer data in '{source_name}': {details}")]
    LayerData { source_name: String, details: String },

    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

/// Presentation-layer errors.
#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("Invalid CLI value: {flag} = {value} - {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("Failed to render output: {0}")]
    RenderFailed(String),
}

pub type PresentationResult<T> = std::result::Result<T, PresentationError>;

impl From<std::io::Error> for InfrastructureError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputError { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

impl From<std::io::Error> for YearFilterError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            format: "JSON".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for YearFilterError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for InfrastructureError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError {
            format: "YAML".to_string(),
            details: err.to_string(),
        }
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for YearFilterError {
    fn from(err: serde_yaml::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

#[cfg(feature = "eval")]
impl From<evalexpr::EvalexprError> for DomainError {
    fn from(err: evalexpr::EvalexprError) -> Self {
        Self::InvalidFilterExpression {
            expression: String::new(),
            details: err.to_string(),
        }
    }
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<YearFilterError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| YearFilterError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| YearFilterError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
