//! The render walk.
//!
//! Rendering is a depth-first walk of a [`Template`]'s directives against a
//! [`ContextStack`]. It never fails: missing keys render nothing, missing
//! partials render nothing, and the template and data are only read.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use stache_parser::{Directive, Template};

use crate::context::{format_value, is_truthy, ContextStack};
use crate::options::{Escape, RenderOptions};
use crate::util::escape_html_into;

/// Supplies templates for `{{>name}}` directives.
pub trait PartialSource {
    /// Returns the template registered under `name`, if any.
    fn get_partial(&self, name: &str) -> Option<&Template>;
}

/// A partial source with nothing in it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPartials;

impl PartialSource for NoPartials {
    fn get_partial(&self, _name: &str) -> Option<&Template> {
        None
    }
}

impl PartialSource for HashMap<String, Template> {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get(name)
    }
}

impl PartialSource for HashMap<String, Arc<Template>> {
    fn get_partial(&self, name: &str) -> Option<&Template> {
        self.get(name).map(Arc::as_ref)
    }
}

/// Renders a template against a data value, with no partials and default
/// options.
///
/// ```rust
/// use serde_json::json;
/// use stache_render::render;
///
/// let template = stache_parser::parse("<div>{{#items}}<li>{{name}}</li>{{/items}}</div>").unwrap();
/// let data = json!({"items": [{"name": "A"}, {"name": "B"}]});
///
/// assert_eq!(render(&template, &data), "<div><li>A</li><li>B</li></div>");
/// ```
pub fn render(template: &Template, data: &Value) -> String {
    render_with(template, data, &NoPartials, &RenderOptions::default())
}

/// Renders a template with partials and explicit options.
pub fn render_with(
    template: &Template,
    data: &Value,
    partials: &dyn PartialSource,
    options: &RenderOptions,
) -> String {
    let mut stack = ContextStack::new(data);
    render_stack(template, &mut stack, partials, options)
}

/// Renders a template against a prepared context stack.
///
/// The stack is returned to its original depth when rendering finishes.
pub fn render_stack(
    template: &Template,
    stack: &mut ContextStack<'_>,
    partials: &dyn PartialSource,
    options: &RenderOptions,
) -> String {
    let mut walker = Walker {
        partials,
        options,
        depth: 0,
        indent: String::new(),
        at_line_start: false,
    };
    let mut out = String::with_capacity(template.source().len());
    walker.walk(template.directives(), stack, &mut out);
    out
}

struct Walker<'p> {
    partials: &'p dyn PartialSource,
    options: &'p RenderOptions,
    /// Current partial nesting level.
    depth: usize,
    /// Indentation of the standalone partials being expanded, outermost first.
    indent: String,
    /// Set after a template newline; the next write starts with `indent`.
    at_line_start: bool,
}

impl Walker<'_> {
    fn walk<'a>(&mut self, directives: &[Directive], stack: &mut ContextStack<'a>, out: &mut String) {
        for directive in directives {
            match directive {
                Directive::Literal(text) => self.literal(text, out),
                Directive::Value(path) => {
                    if let Some(value) = stack.lookup(path) {
                        let text = format_value(value);
                        self.begin_write(&text, out);
                        match self.options.escape {
                            Escape::Html => escape_html_into(out, &text),
                            Escape::None => out.push_str(&text),
                        }
                    }
                }
                Directive::Raw(path) => {
                    if let Some(value) = stack.lookup(path) {
                        let text = format_value(value);
                        self.begin_write(&text, out);
                        out.push_str(&text);
                    }
                }
                Directive::Section { path, body } => match stack.lookup(path) {
                    Some(Value::Array(items)) => {
                        for item in items {
                            stack.push(item);
                            self.walk(body, stack, out);
                            stack.pop();
                        }
                    }
                    Some(value) if is_truthy(value) => {
                        stack.push(value);
                        self.walk(body, stack, out);
                        stack.pop();
                    }
                    _ => {}
                },
                Directive::InvertedSection { path, body } => {
                    if !stack.lookup(path).is_some_and(is_truthy) {
                        self.walk(body, stack, out);
                    }
                }
                Directive::Partial { name, indent } => self.partial(name, indent, stack, out),
            }
        }
    }

    fn partial<'a>(
        &mut self,
        name: &str,
        indent: &str,
        stack: &mut ContextStack<'a>,
        out: &mut String,
    ) {
        let partials = self.partials;
        let Some(template) = partials.get_partial(name) else {
            tracing::trace!(partial = name, "partial not found, rendering nothing");
            return;
        };
        if self.depth >= self.options.max_partial_depth {
            tracing::warn!(
                partial = name,
                depth = self.depth,
                "partial nesting limit reached, skipping"
            );
            return;
        }

        self.depth += 1;
        let outer_len = self.indent.len();
        if !indent.is_empty() {
            // A standalone partial starts on a fresh line.
            self.indent.push_str(indent);
            self.at_line_start = true;
        }
        self.walk(template.directives(), stack, out);
        self.indent.truncate(outer_len);
        self.depth -= 1;
    }

    /// Writes template text, indenting the lines that follow its newlines.
    ///
    /// Only newlines that belong to the template are followed by the
    /// indentation; newlines inside interpolated values are left alone.
    fn literal(&mut self, text: &str, out: &mut String) {
        if self.indent.is_empty() {
            out.push_str(text);
            return;
        }
        for line in text.split_inclusive('\n') {
            self.begin_write(line, out);
            out.push_str(line);
            if line.ends_with('\n') {
                self.at_line_start = true;
            }
        }
    }

    fn begin_write(&mut self, text: &str, out: &mut String) {
        if self.at_line_start && !text.is_empty() {
            out.push_str(&self.indent);
            self.at_line_start = false;
        }
    }
}
