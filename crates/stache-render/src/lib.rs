//! # Stache Render - Logic-less HTML Templates
//!
//! `stache-render` renders Mustache templates into HTML strings. Templates
//! are parsed once by `stache-parser` into an immutable directive tree and
//! rendered as many times as needed against JSON-like data.
//!
//! ## Core Concepts
//!
//! - [`Template`]: Parsed, immutable directive tree
//! - [`render`]: Pure render of a template against a [`serde_json::Value`]
//! - [`Renderer`]: Named templates that can include each other as partials
//! - [`TemplateCache`]: Compiled templates shared by source text
//! - [`RenderOptions`]: Escaping mode and partial nesting limit
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use stache_render::render_str;
//!
//! #[derive(Serialize)]
//! struct Ad {
//!     leading: bool,
//!     trailing: bool,
//! }
//!
//! let template = "Advertisement {{#leading}}Start{{/leading}}{{#trailing}}End{{/trailing}}";
//! let output = render_str(template, &Ad { leading: true, trailing: false }).unwrap();
//! assert_eq!(output, "Advertisement Start");
//! ```
//!
//! ## Escaping
//!
//! `{{name}}` escapes `&`, `<`, `>`, `"` and `'`. `{{{name}}}` and
//! `{{&name}}` emit the value as-is; use them only for trusted HTML such as
//! server-supplied embed markup.
//!
//! ```rust
//! use serde_json::json;
//! use stache_render::render_str;
//!
//! let data = json!({"html": "<b>bold</b>"});
//! assert_eq!(render_str("{{html}}", &data).unwrap(), "&lt;b&gt;bold&lt;/b&gt;");
//! assert_eq!(render_str("{{{html}}}", &data).unwrap(), "<b>bold</b>");
//! ```
//!
//! ## Missing Data
//!
//! Missing keys are never errors: a missing value renders as nothing, a
//! missing section is skipped, and a missing inverted section is rendered.
//! Dotted names such as `settings.adsData.issn` resolve to nothing if any
//! step along the way is absent.
//!
//! ## Errors
//!
//! Only parsing can fail. Unbalanced sections, unclosed tags and malformed
//! delimiter changes are reported as [`RenderError::ParseError`] naming the
//! offending tag and its line and column.

pub mod context;
mod error;
mod options;
pub mod prelude;
pub mod template;
mod util;

pub use error::RenderError;
pub use options::{Escape, RenderOptions};
pub use util::escape_html;

pub use template::{
    compile, global_cache, render, render_stack, render_str, render_with, walk_template_dir,
    NoPartials, PartialSource, RegistryError, Renderer, ResolvedTemplate, TemplateCache,
    TemplateFile, TemplateRegistry, TEMPLATE_EXTENSIONS,
};

// Re-export parser types so most callers need only this crate.
pub use stache_parser::{
    parse, parse_with, Delimiters, Directive, KeyPath, ParseError, ParseOptions, Position,
    Template,
};
