//! Template registry for file-based and inline templates.
//!
//! This module provides [`TemplateRegistry`], which resolves template names
//! to their source text from two kinds of sources: inline strings and
//! template directories on disk.
//!
//! # Template Resolution
//!
//! 1. Inline templates (added via [`TemplateRegistry::add_inline`]) have highest priority
//! 2. File templates are looked up by their path relative to the directory
//!    they were found in, with `/` separators
//! 3. Names can be given with or without extension: both `"placeholder"` and
//!    `"placeholder.mustache"` resolve
//!
//! # Supported Extensions
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.mustache` |
//! | 2 | `.hogan` |
//! | 3 | `.html` |
//! | 4 (lowest) | `.txt` |
//!
//! # Collision Handling
//!
//! - Same directory, different extensions: the higher priority extension wins
//! - Same name in two different directories: [`RegistryError::Collision`]
//!
//! File contents are read when a template is requested, not when the
//! directory is registered.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".mustache", ".hogan", ".html", ".txt"];

/// A template file discovered during directory walking.
///
/// For a file at `/app/templates/reader/ad.mustache` with root `/app/templates`:
///
/// ```rust,ignore
/// TemplateFile {
///     name: "reader/ad".to_string(),
///     name_with_ext: "reader/ad.mustache".to_string(),
///     absolute_path: PathBuf::from("/app/templates/reader/ad.mustache"),
///     source_dir: PathBuf::from("/app/templates"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Resolution name without extension.
    pub name: String,
    /// Resolution name with extension.
    pub name_with_ext: String,
    pub absolute_path: PathBuf,
    /// The template directory root this file belongs to.
    pub source_dir: PathBuf,
}

impl TemplateFile {
    pub fn new(
        name: impl Into<String>,
        name_with_ext: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            name_with_ext: name_with_ext.into(),
            absolute_path: absolute_path.into(),
            source_dir: source_dir.into(),
        }
    }

    /// Returns the extension priority (lower is higher priority).
    ///
    /// Returns `usize::MAX` if the extension is not recognized.
    pub fn extension_priority(&self) -> usize {
        TEMPLATE_EXTENSIONS
            .iter()
            .position(|ext| self.name_with_ext.ends_with(ext))
            .unwrap_or(usize::MAX)
    }
}

/// Where a resolved template's source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// Source held in memory.
    Inline(String),
    /// Source read from this path on demand.
    File(PathBuf),
}

/// Error type for template registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two template directories contain files that resolve to the same name.
    Collision {
        name: String,
        existing_path: PathBuf,
        existing_dir: PathBuf,
        conflicting_path: PathBuf,
        conflicting_dir: PathBuf,
    },

    /// Template not found in registry.
    NotFound { name: String },

    /// Failed to read a template file or directory.
    ReadError { path: PathBuf, message: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Collision {
                name,
                existing_path,
                existing_dir,
                conflicting_path,
                conflicting_dir,
            } => {
                write!(
                    f,
                    "Template collision detected for \"{}\":\n  \
                     - {} (from {})\n  \
                     - {} (from {})",
                    name,
                    existing_path.display(),
                    existing_dir.display(),
                    conflicting_path.display(),
                    conflicting_dir.display()
                )
            }
            RegistryError::NotFound { name } => {
                write!(f, "Template not found: \"{}\"", name)
            }
            RegistryError::ReadError { path, message } => {
                write!(
                    f,
                    "Failed to read template \"{}\": {}",
                    path.display(),
                    message
                )
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registry for template resolution from inline strings and directories.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = TemplateRegistry::new();
/// registry.add_template_dir("./templates")?;
/// registry.add_inline("ad-indicator", "Advertisement {{#leading}}Start{{/leading}}");
///
/// let content = registry.get_content("access-placeholder")?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct TemplateRegistry {
    inline: HashMap<String, String>,
    /// Name without extension to the winning file.
    files: HashMap<String, TemplateFile>,
    /// Name with extension to name without.
    aliases: HashMap<String, String>,
    dirs: Vec<PathBuf>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inline template. Inline templates shadow files of the same name.
    pub fn add_inline(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.inline.insert(name.into(), content.into());
    }

    /// Walks `path` and registers every template file found in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, or if a template
    /// name is already provided by a different directory.
    pub fn add_template_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RegistryError> {
        let files = walk_template_dir(path.as_ref())?;
        tracing::debug!(
            dir = %path.as_ref().display(),
            count = files.len(),
            "registering template directory"
        );
        self.add_from_files(files)?;
        self.dirs.push(path.as_ref().to_path_buf());
        Ok(())
    }

    /// Registers already-discovered template files.
    ///
    /// Either every file is registered or, on a collision, none is.
    pub fn add_from_files(&mut self, files: Vec<TemplateFile>) -> Result<(), RegistryError> {
        let mut staged = self.files.clone();
        let mut aliases = self.aliases.clone();
        for file in files {
            if let Some(existing) = staged.get(&file.name) {
                if existing.source_dir != file.source_dir {
                    return Err(RegistryError::Collision {
                        name: file.name.clone(),
                        existing_path: existing.absolute_path.clone(),
                        existing_dir: existing.source_dir.clone(),
                        conflicting_path: file.absolute_path.clone(),
                        conflicting_dir: file.source_dir.clone(),
                    });
                }
                if existing.extension_priority() <= file.extension_priority() {
                    aliases.insert(file.name_with_ext.clone(), file.name.clone());
                    continue;
                }
            }
            aliases.insert(file.name_with_ext.clone(), file.name.clone());
            staged.insert(file.name.clone(), file);
        }
        self.files = staged;
        self.aliases = aliases;
        Ok(())
    }

    /// Resolves a name to where its source lives.
    pub fn resolve(&self, name: &str) -> Option<ResolvedTemplate> {
        if let Some(content) = self.inline.get(name) {
            return Some(ResolvedTemplate::Inline(content.clone()));
        }
        let file = self.files.get(name).or_else(|| {
            let base = self.aliases.get(name)?;
            self.files.get(base)
        })?;
        // A name given with a losing extension still resolves to that exact file.
        if file.name_with_ext != name && self.aliases.contains_key(name) {
            let path = file.source_dir.join(name);
            if path.is_file() {
                return Some(ResolvedTemplate::File(path));
            }
        }
        Some(ResolvedTemplate::File(file.absolute_path.clone()))
    }

    /// Returns the source text for a template name.
    pub fn get_content(&self, name: &str) -> Result<String, RegistryError> {
        match self.resolve(name) {
            Some(ResolvedTemplate::Inline(content)) => Ok(content),
            Some(ResolvedTemplate::File(path)) => {
                std::fs::read_to_string(&path).map_err(|e| RegistryError::ReadError {
                    path,
                    message: e.to_string(),
                })
            }
            None => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// All resolvable names without extensions, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .inline
            .keys()
            .chain(self.files.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Names with an extension that lost to a higher priority file, sorted.
    ///
    /// Each of these resolves to its own file rather than to the file
    /// behind its name without extension.
    pub fn shadowed_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(name_with_ext, base)| {
                self.files
                    .get(base.as_str())
                    .is_some_and(|file| &file.name_with_ext != *name_with_ext)
            })
            .map(|(name_with_ext, _)| name_with_ext.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.files.is_empty()
    }

    /// The directories registered so far.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Walks a directory recursively and collects template files.
///
/// Files without a recognized extension are ignored.
pub fn walk_template_dir(root: &Path) -> Result<Vec<TemplateFile>, RegistryError> {
    let root = root.canonicalize().map_err(|e| RegistryError::ReadError {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut files = Vec::new();
    walk_recursive(&root, &root, &mut files)?;
    files.sort_by(|a, b| a.name_with_ext.cmp(&b.name_with_ext));
    Ok(files)
}

fn walk_recursive(
    current: &Path,
    root: &Path,
    files: &mut Vec<TemplateFile>,
) -> Result<(), RegistryError> {
    let read_error = |e: std::io::Error| RegistryError::ReadError {
        path: current.to_path_buf(),
        message: e.to_string(),
    };

    for entry in std::fs::read_dir(current).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            walk_recursive(&path, root, files)?;
        } else if path.is_file() {
            if let Some(file) = template_file(&path, root) {
                files.push(file);
            }
        }
    }
    Ok(())
}

fn template_file(path: &Path, root: &Path) -> Option<TemplateFile> {
    let relative = path.strip_prefix(root).ok()?;
    let name_with_ext = relative
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");
    let extension = TEMPLATE_EXTENSIONS
        .iter()
        .find(|ext| name_with_ext.ends_with(*ext))?;
    let name = name_with_ext.strip_suffix(extension)?.to_string();
    if name.is_empty() {
        return None;
    }
    Some(TemplateFile::new(name, name_with_ext, path, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_file(dir: &Path, relative_path: &str, content: &str) {
        let full_path = dir.join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    mod walking {
        use super::*;

        #[test]
        fn finds_nested_templates() {
            let dir = TempDir::new().unwrap();
            create_file(dir.path(), "placeholder.mustache", "{{title}}");
            create_file(dir.path(), "reader/ad.html", "ad");
            create_file(dir.path(), "notes.md", "ignored");

            let files = walk_template_dir(dir.path()).unwrap();
            let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["placeholder", "reader/ad"]);
        }

        #[test]
        fn missing_directory_is_read_error() {
            let err = walk_template_dir(Path::new("/definitely/not/here")).unwrap_err();
            assert!(matches!(err, RegistryError::ReadError { .. }));
        }

        #[test]
        fn extension_priority_order() {
            let file = TemplateFile::new("a", "a.hogan", "/t/a.hogan", "/t");
            assert_eq!(file.extension_priority(), 1);
            let file = TemplateFile::new("a", "a.jinja", "/t/a.jinja", "/t");
            assert_eq!(file.extension_priority(), usize::MAX);
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn inline_templates() {
            let mut registry = TemplateRegistry::new();
            registry.add_inline("greeting", "Hello {{name}}");
            assert_eq!(registry.get_content("greeting").unwrap(), "Hello {{name}}");
            assert_eq!(registry.names(), ["greeting"]);
        }

        #[test]
        fn not_found() {
            let registry = TemplateRegistry::new();
            assert!(registry.is_empty());
            assert_eq!(
                registry.get_content("nope").unwrap_err(),
                RegistryError::NotFound {
                    name: "nope".into()
                }
            );
        }

        #[test]
        fn with_and_without_extension() {
            let dir = TempDir::new().unwrap();
            create_file(dir.path(), "page.mustache", "page body");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(dir.path()).unwrap();
            assert_eq!(registry.get_content("page").unwrap(), "page body");
            assert_eq!(registry.get_content("page.mustache").unwrap(), "page body");
            assert_eq!(registry.dirs().len(), 1);
        }

        #[test]
        fn higher_priority_extension_wins() {
            let dir = TempDir::new().unwrap();
            create_file(dir.path(), "row.txt", "from txt");
            create_file(dir.path(), "row.mustache", "from mustache");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(dir.path()).unwrap();
            assert_eq!(registry.get_content("row").unwrap(), "from mustache");
            assert_eq!(registry.get_content("row.txt").unwrap(), "from txt");
            assert_eq!(registry.len(), 1);
            assert_eq!(registry.shadowed_names(), ["row.txt"]);
        }

        #[test]
        fn inline_shadows_file() {
            let dir = TempDir::new().unwrap();
            create_file(dir.path(), "row.html", "file");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(dir.path()).unwrap();
            registry.add_inline("row", "inline");
            assert_eq!(registry.get_content("row").unwrap(), "inline");
        }

        #[test]
        fn cross_directory_collision() {
            let first = TempDir::new().unwrap();
            let second = TempDir::new().unwrap();
            create_file(first.path(), "row.mustache", "a");
            create_file(second.path(), "row.html", "b");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(first.path()).unwrap();
            let err = registry.add_template_dir(second.path()).unwrap_err();
            assert!(matches!(err, RegistryError::Collision { ref name, .. } if name == "row"));
            assert!(err.to_string().contains("collision"));
        }

        #[test]
        fn collision_registers_nothing_from_rejected_files() {
            let first = TempDir::new().unwrap();
            let second = TempDir::new().unwrap();
            create_file(first.path(), "row.mustache", "a");
            create_file(second.path(), "aaa.mustache", "rejected");
            create_file(second.path(), "row.html", "b");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(first.path()).unwrap();
            assert!(registry.add_template_dir(second.path()).is_err());
            assert_eq!(registry.names(), ["row"]);
            assert!(registry.resolve("aaa.mustache").is_none());
            assert_eq!(registry.dirs().len(), 1);
        }

        #[test]
        fn content_is_read_on_demand() {
            let dir = TempDir::new().unwrap();
            create_file(dir.path(), "live.mustache", "v1");

            let mut registry = TemplateRegistry::new();
            registry.add_template_dir(dir.path()).unwrap();
            create_file(dir.path(), "live.mustache", "v2");
            assert_eq!(registry.get_content("live").unwrap(), "v2");
        }
    }
}
