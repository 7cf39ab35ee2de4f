//! Named-template renderer.
//!
//! This module provides [`Renderer`], which owns a set of compiled templates
//! addressed by name. Every registered template can be used as a partial by
//! every other one.
//!
//! # File-Based Templates
//!
//! ```rust,ignore
//! use stache_render::Renderer;
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template_dir("./templates")?;
//!
//! // Renders templates/reader/access-placeholder.mustache
//! let output = renderer.render("reader/access-placeholder", &data)?;
//! ```
//!
//! File templates are compiled when the directory is added. Call
//! [`Renderer::refresh`] to re-read and recompile them after they change on
//! disk.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use stache_parser::{parse_with, ParseOptions, Template};

use super::cache::TemplateCache;
use super::registry::{TemplateRegistry, TEMPLATE_EXTENSIONS};
use super::walk::{render_stack, render_with, PartialSource};
use crate::context::ContextStack;
use crate::error::RenderError;
use crate::options::RenderOptions;

/// A renderer with pre-compiled, named templates.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stache_render::Renderer;
///
/// let mut renderer = Renderer::new();
/// renderer.add_template("item", "<li>{{name}}</li>").unwrap();
/// renderer.add_template("list", "<ul>{{#items}}{{>item}}{{/items}}</ul>").unwrap();
///
/// let output = renderer
///     .render("list", &json!({"items": [{"name": "A"}, {"name": "B"}]}))
///     .unwrap();
/// assert_eq!(output, "<ul><li>A</li><li>B</li></ul>");
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    templates: HashMap<String, Arc<Template>>,
    /// File templates reachable only by their full name, e.g. `row.txt`
    /// next to `row.mustache`.
    shadowed: HashMap<String, Arc<Template>>,
    registry: TemplateRegistry,
    options: RenderOptions,
    parse_options: ParseOptions,
    /// Compiled sources passed to [`Renderer::render_str`].
    adhoc: TemplateCache,
}

/// Templates compiled from a registry, not yet installed.
#[derive(Default)]
struct Compiled {
    templates: HashMap<String, Arc<Template>>,
    shadowed: HashMap<String, Arc<Template>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that applies `options` to every render.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Sets the parse options used for templates added afterwards.
    pub fn parse_options(mut self, parse_options: ParseOptions) -> Self {
        self.adhoc = TemplateCache::with_options(parse_options.clone());
        self.parse_options = parse_options;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Registers a named template, compiling it immediately.
    ///
    /// Templates added this way shadow file templates of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ParseError`] if the source is malformed; the
    /// renderer is left unchanged in that case.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        let template = parse_with(source, &self.parse_options)?;
        self.registry.add_inline(name, source);
        self.templates.insert(name.to_string(), Arc::new(template));
        Ok(())
    }

    /// Registers and compiles every template file under `path`.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read, if it provides a name another
    /// directory already provides, or if any template in it is malformed.
    /// The renderer is left unchanged in every case.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RenderError> {
        let mut registry = self.registry.clone();
        registry.add_template_dir(path)?;
        let compiled = self.compile_all(&registry)?;
        self.registry = registry;
        self.install(compiled);
        Ok(())
    }

    /// Re-reads every registered template and recompiles it.
    ///
    /// If any template fails to parse, the previously compiled set is kept.
    pub fn refresh(&mut self) -> Result<(), RenderError> {
        let compiled = self.compile_all(&self.registry)?;
        self.install(compiled);
        Ok(())
    }

    fn compile_all(&self, registry: &TemplateRegistry) -> Result<Compiled, RenderError> {
        let mut compiled = Compiled::default();
        for name in registry.names() {
            let source = registry.get_content(name)?;
            let template = parse_with(&source, &self.parse_options)?;
            compiled.templates.insert(name.to_string(), Arc::new(template));
        }
        for name in registry.shadowed_names() {
            let source = registry.get_content(name)?;
            let template = parse_with(&source, &self.parse_options)?;
            compiled.shadowed.insert(name.to_string(), Arc::new(template));
        }
        Ok(compiled)
    }

    fn install(&mut self, compiled: Compiled) {
        tracing::debug!(
            count = compiled.templates.len(),
            shadowed = compiled.shadowed.len(),
            "compiled templates"
        );
        self.templates = compiled.templates;
        self.shadowed = compiled.shadowed;
    }

    /// Returns the compiled template for `name`, with or without extension.
    ///
    /// A name whose extension lost to a higher priority file in the same
    /// directory returns that exact file.
    pub fn get(&self, name: &str) -> Option<&Template> {
        if let Some(template) = self.templates.get(name) {
            return Some(template.as_ref());
        }
        if let Some(template) = self.shadowed.get(name) {
            return Some(template.as_ref());
        }
        TEMPLATE_EXTENSIONS
            .iter()
            .find_map(|ext| name.strip_suffix(ext))
            .and_then(|base| self.templates.get(base))
            .map(Arc::as_ref)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of all compiled templates, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Renders a registered template against serializable data.
    pub fn render<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        let value = serde_json::to_value(data)?;
        self.render_value(name, &value)
    }

    /// Renders a registered template against a JSON value.
    pub fn render_value(&self, name: &str, data: &Value) -> Result<String, RenderError> {
        let template = self.require(name)?;
        Ok(render_with(template, data, self, &self.options))
    }

    /// Renders a registered template with extra values available beneath the data.
    ///
    /// `context` forms an outer frame: templates can read its keys, but keys
    /// present in `data` take precedence.
    pub fn render_with_context<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
        context: HashMap<String, Value>,
    ) -> Result<String, RenderError> {
        let template = self.require(name)?;
        let base = Value::Object(context.into_iter().collect());
        let value = serde_json::to_value(data)?;

        let mut stack = ContextStack::new(&base);
        stack.push(&value);
        Ok(render_stack(template, &mut stack, self, &self.options))
    }

    /// Renders template source directly, with registered templates available
    /// as partials.
    ///
    /// Compiled sources are kept for the life of the renderer.
    pub fn render_str<T: Serialize + ?Sized>(
        &self,
        source: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        let template = self.adhoc.get_or_compile(source)?;
        let value = serde_json::to_value(data)?;
        Ok(render_with(&template, &value, self, &self.options))
    }

    fn require(&self, name: &str) -> Result<&Template, RenderError> {
        self.get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))
    }
}

impl PartialSource for Renderer {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get(name)
    }
}
