//! Parse-once, render-many template rendering.
//!
//! Template source is parsed by `stache_parser` into an immutable directive
//! tree. Rendering walks that tree against a data context and produces a
//! string; it has no side effects and cannot fail.
//!
//! ## Which Entry Point?
//!
//! | Function | Use When |
//! |----------|----------|
//! | [`render`] | You already hold a parsed [`Template`](stache_parser::Template) |
//! | [`render_with`] | Same, plus partials and [`RenderOptions`](crate::RenderOptions) |
//! | [`render_str`] | One-off rendering from source, compiled through the global cache |
//! | [`Renderer`] | Many named templates that include each other as partials |
//!
//! ## Template Registry
//!
//! For file-based templates, use [`Renderer::add_template_dir`] or the
//! lower-level [`TemplateRegistry`]. Supported extensions: `.mustache`,
//! `.hogan`, `.html`, `.txt` (in priority order).

mod cache;
mod functions;
pub mod registry;
mod renderer;
mod walk;

pub use cache::{global_cache, TemplateCache};
pub use functions::{compile, render_str};
pub use registry::{
    walk_template_dir, RegistryError, ResolvedTemplate, TemplateFile, TemplateRegistry,
    TEMPLATE_EXTENSIONS,
};
pub use renderer::Renderer;
pub use walk::{render, render_stack, render_with, NoPartials, PartialSource};
