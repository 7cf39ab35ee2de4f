//! Mustache template parser.
//!
//! This crate turns Mustache template source into an immutable tree of
//! [`Directive`]s. Rendering lives elsewhere; a parsed [`Template`] can be
//! rendered any number of times without being re-parsed.
//!
//! # Example
//!
//! ```rust
//! use stache_parser::{parse, Directive, KeyPath};
//!
//! let template = parse("{{#settings.isPdf}}<embed src=\"{{settings.src}}\">{{/settings.isPdf}}").unwrap();
//!
//! match &template.directives()[0] {
//!     Directive::Section { path, body } => {
//!         assert_eq!(path, &KeyPath::parse("settings.isPdf"));
//!         assert_eq!(body.len(), 3);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Tag Syntax
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `{{name}}` | Escaped value |
//! | `{{{name}}}`, `{{&name}}` | Raw value |
//! | `{{#name}}...{{/name}}` | Section |
//! | `{{^name}}...{{/name}}` | Inverted section |
//! | `{{>name}}` | Partial |
//! | `{{!text}}` | Comment |
//! | `{{=<% %>=}}` | Change delimiters |
//!
//! Names may be dotted (`settings.adsData.issn`) or the implicit iterator `.`.
//! Whitespace just inside the delimiters is ignored.
//!
//! Section, inverted, close, partial, comment and delimiter tags that sit
//! alone on a line remove that whole line from the output, so block
//! structure can be laid out on separate lines without leaving blank lines
//! behind.

mod error;
mod parser;
mod template;
mod token;

pub use error::{ParseError, Position};
pub use parser::{parse, parse_with};
pub use template::{Delimiters, Directive, KeyPath, ParseOptions, Template};
