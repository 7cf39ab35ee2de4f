//! Compiled-template cache keyed by source text.
//!
//! Parsing is the only expensive step, and the same source always parses to
//! the same tree, so compiled templates are shared by source identity.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use stache_parser::{parse_with, ParseError, ParseOptions, Template};

static GLOBAL_CACHE: Lazy<TemplateCache> = Lazy::new(TemplateCache::new);

/// The process-wide cache used by [`compile`](super::compile) and
/// [`render_str`](super::render_str).
pub fn global_cache() -> &'static TemplateCache {
    &GLOBAL_CACHE
}

/// A thread-safe map from template source to its parsed form.
///
/// ```rust
/// use std::sync::Arc;
/// use stache_render::TemplateCache;
///
/// let cache = TemplateCache::new();
/// let a = cache.get_or_compile("<b>{{name}}</b>").unwrap();
/// let b = cache.get_or_compile("<b>{{name}}</b>").unwrap();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, Arc<Template>>>,
    options: ParseOptions,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that parses with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            entries: RwLock::default(),
            options,
        }
    }

    /// Returns the compiled template for `source`, parsing it on first use.
    ///
    /// Sources that fail to parse are not cached.
    pub fn get_or_compile(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        if let Some(template) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(Arc::clone(template));
        }

        tracing::debug!(bytes = source.len(), "template cache miss, compiling");
        let template = Arc::new(parse_with(source, &self.options)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            entries.entry(source.to_string()).or_insert(template),
        ))
    }

    /// Whether `source` has already been compiled.
    pub fn contains(&self, source: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached template.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
