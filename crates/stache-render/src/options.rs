//! Render configuration.

use serde::Deserialize;

use crate::error::RenderError;

/// How `{{name}}` values are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escape {
    /// Replace HTML special characters with entities.
    #[default]
    Html,
    /// Emit values verbatim, for plain-text output.
    None,
}

/// Options applied to every render call.
///
/// Options can be built in code or loaded from YAML; omitted fields keep
/// their defaults:
///
/// ```rust
/// use stache_render::{Escape, RenderOptions};
///
/// let options = RenderOptions::from_yaml("escape: none").unwrap();
/// assert_eq!(options.escape, Escape::None);
/// assert_eq!(options.max_partial_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub escape: Escape,
    /// How deeply partials may include other partials before expansion stops.
    pub max_partial_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape: Escape::Html,
            max_partial_depth: 64,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }

    pub fn max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }

    /// Parses options from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.escape, Escape::Html);
        assert_eq!(options.max_partial_depth, 64);
    }

    #[test]
    fn builder_setters() {
        let options = RenderOptions::new()
            .escape(Escape::None)
            .max_partial_depth(3);
        assert_eq!(options.escape, Escape::None);
        assert_eq!(options.max_partial_depth, 3);
    }

    #[test]
    fn yaml_full() {
        let options = RenderOptions::from_yaml("escape: html\nmax_partial_depth: 8\n").unwrap();
        assert_eq!(options, RenderOptions::new().max_partial_depth(8));
    }

    #[test]
    fn yaml_unknown_escape_is_error() {
        let err = RenderOptions::from_yaml("escape: xml").unwrap_err();
        assert!(matches!(err, RenderError::SerializationError(_)));
    }
}
