//! Error types for template rendering.
//!
//! This module provides [`RenderError`], the error type for every fallible
//! operation in this crate. Rendering a parsed template never fails; errors
//! come from parsing, serializing data, and locating templates.

use std::fmt;

use stache_parser::ParseError;

use crate::template::RegistryError;

/// Error type for template operations.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error, with the offending tag and its position.
    ParseError(ParseError),

    /// No template registered under the requested name.
    TemplateNotFound(String),

    /// Data could not be serialized into a template context.
    SerializationError(String),

    /// I/O error (e.g., reading a template from disk).
    IoError(std::io::Error),

    /// Template directory loading or name resolution failed.
    RegistryError(RegistryError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ParseError(err) => write!(f, "template error: {}", err),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
            RenderError::RegistryError(err) => write!(f, "registry error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::ParseError(err) => Some(err),
            RenderError::IoError(err) => Some(err),
            RenderError::RegistryError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for RenderError {
    fn from(err: ParseError) -> Self {
        RenderError::ParseError(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<RegistryError> for RenderError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { name } => RenderError::TemplateNotFound(name),
            other => RenderError::RegistryError(other),
        }
    }
}
