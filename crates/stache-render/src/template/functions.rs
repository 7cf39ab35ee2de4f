//! One-shot rendering from template source.

use std::sync::Arc;

use serde::Serialize;
use stache_parser::Template;

use super::cache::global_cache;
use super::walk::render;
use crate::error::RenderError;

/// Compiles template source through the process-wide cache.
///
/// Repeated calls with the same source return the same shared template.
///
/// Entries are never evicted: every distinct source stays cached until
/// [`TemplateCache::clear`](super::TemplateCache::clear) is called on
/// [`global_cache`]. Sources generated at runtime should be parsed with
/// [`stache_parser::parse`] instead.
pub fn compile(source: &str) -> Result<Arc<Template>, RenderError> {
    Ok(global_cache().get_or_compile(source)?)
}

/// Compiles (or reuses) `source` and renders it against `data`.
///
/// Goes through the same unbounded cache as [`compile`].
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use stache_render::render_str;
///
/// #[derive(Serialize)]
/// struct Placeholder { number: u32, title: String }
///
/// let output = render_str(
///     "<span>{{number}}. </span>{{title}}",
///     &Placeholder { number: 3, title: "Results & Discussion".into() },
/// ).unwrap();
/// assert_eq!(output, "<span>3. </span>Results &amp; Discussion");
/// ```
pub fn render_str<T: Serialize + ?Sized>(source: &str, data: &T) -> Result<String, RenderError> {
    let template = compile(source)?;
    let value = serde_json::to_value(data)?;
    Ok(render(&template, &value))
}
