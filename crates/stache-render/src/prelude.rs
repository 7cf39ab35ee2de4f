//! Rendering prelude for convenient imports.
//!
//! ```rust
//! use stache_render::prelude::*;
//! use serde_json::json;
//!
//! let mut renderer = Renderer::new();
//! renderer.add_template("title", "<h1>{{title}}</h1>").unwrap();
//! assert_eq!(renderer.render("title", &json!({"title": "A & B"})).unwrap(), "<h1>A &amp; B</h1>");
//! ```

pub use crate::{
    compile, render, render_str, render_with, Escape, RenderError, RenderOptions, Renderer,
    Template,
};
