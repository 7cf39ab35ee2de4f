//! The parsed form of a template.

use std::fmt;

/// A dotted lookup name such as `settings.adsData.issn`.
///
/// The implicit iterator `.` is represented by a path with no segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Splits a tag name into a key path.
    ///
    /// `.` becomes the implicit path; anything else is split on `.`.
    pub fn parse(name: &str) -> Self {
        if name == "." {
            return Self::implicit();
        }
        Self {
            segments: name.split('.').map(str::to_string).collect(),
        }
    }

    /// The implicit iterator, `{{.}}`.
    pub fn implicit() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment, or `None` for the implicit path.
    pub fn head(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Segments after the first.
    pub fn tail(&self) -> &[String] {
        self.segments.get(1..).unwrap_or(&[])
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_implicit() {
            f.write_str(".")
        } else {
            f.write_str(&self.segments.join("."))
        }
    }
}

/// One instruction in a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Static text, emitted verbatim.
    Literal(String),

    /// `{{name}}`: look up, escape, emit.
    Value(KeyPath),

    /// `{{{name}}}` or `{{&name}}`: look up, emit unescaped.
    Raw(KeyPath),

    /// `{{#name}}...{{/name}}`: render the body once per element of a
    /// sequence, or once for any other truthy value.
    Section { path: KeyPath, body: Vec<Directive> },

    /// `{{^name}}...{{/name}}`: render the body only when the value is falsy.
    InvertedSection { path: KeyPath, body: Vec<Directive> },

    /// `{{>name}}`: render another named template in the current context.
    ///
    /// `indent` is the whitespace that preceded a standalone partial tag and
    /// is prefixed to every line of the partial's output.
    Partial { name: String, indent: String },
}

/// A parsed template: an immutable directive tree plus its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    directives: Vec<Directive>,
}

impl Template {
    pub(crate) fn new(source: &str, directives: Vec<Directive>) -> Self {
        Self {
            source: source.to_string(),
            directives,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// The source text this template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the template contains nothing but literal text.
    pub fn is_literal(&self) -> bool {
        self.directives
            .iter()
            .all(|d| matches!(d, Directive::Literal(_)))
    }

    /// Names of all partials referenced anywhere in the tree.
    pub fn partial_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_partials(&self.directives, &mut names);
        names
    }
}

fn collect_partials<'a>(directives: &'a [Directive], names: &mut Vec<&'a str>) {
    for directive in directives {
        match directive {
            Directive::Partial { name, .. } => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Directive::Section { body, .. } | Directive::InvertedSection { body, .. } => {
                collect_partials(body, names);
            }
            _ => {}
        }
    }
}

/// The pair of strings that open and close a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// Options controlling how source is parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Delimiters in effect at the start of the template.
    pub delimiters: Delimiters,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial delimiters.
    pub fn delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_splits_on_dots() {
        let path = KeyPath::parse("settings.adsData.issn");
        assert_eq!(path.head(), Some("settings"));
        assert_eq!(path.tail(), ["adsData".to_string(), "issn".to_string()]);
        assert_eq!(path.to_string(), "settings.adsData.issn");
    }

    #[test]
    fn key_path_implicit() {
        let path = KeyPath::parse(".");
        assert!(path.is_implicit());
        assert_eq!(path.head(), None);
        assert!(path.tail().is_empty());
        assert_eq!(path.to_string(), ".");
    }

    #[test]
    fn single_segment_has_empty_tail() {
        let path = KeyPath::parse("title");
        assert_eq!(path.head(), Some("title"));
        assert!(path.tail().is_empty());
    }

    #[test]
    fn literal_template_detection() {
        let template = Template::new("x", vec![Directive::Literal("x".into())]);
        assert!(template.is_literal());

        let template = Template::new(
            "{{x}}",
            vec![Directive::Value(KeyPath::parse("x"))],
        );
        assert!(!template.is_literal());
    }
}
