//! Builds the directive tree from tokens.

use crate::error::{ParseError, Position};
use crate::template::{Directive, KeyPath, ParseOptions, Template};
use crate::token::{TagKind, Token, Tokenizer};

/// Parses template source with the default `{{`/`}}` delimiters.
///
/// # Example
///
/// ```rust
/// use stache_parser::{parse, Directive};
///
/// let template = parse("<li>{{name}}</li>").unwrap();
/// assert_eq!(template.directives().len(), 3);
/// assert!(matches!(template.directives()[1], Directive::Value(_)));
/// ```
pub fn parse(source: &str) -> Result<Template, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parses template source with explicit options.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Template, ParseError> {
    let mut root: Vec<Directive> = Vec::new();
    let mut stack: Vec<OpenSection<'_>> = Vec::new();

    for token in Tokenizer::new(source, options.delimiters.clone()) {
        match token? {
            Token::Text(text) => push_literal(current(&mut root, &mut stack), text),
            Token::Tag {
                kind,
                name,
                offset,
                indent,
            } => match kind {
                TagKind::Value => {
                    current(&mut root, &mut stack).push(Directive::Value(KeyPath::parse(name)))
                }
                TagKind::Raw => {
                    current(&mut root, &mut stack).push(Directive::Raw(KeyPath::parse(name)))
                }
                TagKind::Section | TagKind::Inverted => stack.push(OpenSection {
                    name,
                    offset,
                    inverted: kind == TagKind::Inverted,
                    body: Vec::new(),
                }),
                TagKind::Close => {
                    let open = stack.pop().ok_or_else(|| ParseError::UnexpectedClose {
                        name: name.to_string(),
                        position: Position::locate(source, offset),
                    })?;
                    if open.name != name {
                        return Err(ParseError::MismatchedClose {
                            expected: open.name.to_string(),
                            found: name.to_string(),
                            position: Position::locate(source, offset),
                        });
                    }
                    let directive = open.finish();
                    current(&mut root, &mut stack).push(directive);
                }
                TagKind::Partial => current(&mut root, &mut stack).push(Directive::Partial {
                    name: name.to_string(),
                    indent: indent.to_string(),
                }),
                TagKind::Comment | TagKind::SetDelimiters => {}
            },
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedSection {
            name: open.name.to_string(),
            position: Position::locate(source, open.offset),
        });
    }

    Ok(Template::new(source, root))
}

/// A section whose close tag has not been seen yet.
struct OpenSection<'a> {
    name: &'a str,
    offset: usize,
    inverted: bool,
    body: Vec<Directive>,
}

impl OpenSection<'_> {
    fn finish(self) -> Directive {
        let path = KeyPath::parse(self.name);
        if self.inverted {
            Directive::InvertedSection {
                path,
                body: self.body,
            }
        } else {
            Directive::Section {
                path,
                body: self.body,
            }
        }
    }
}

/// The directive list new nodes are appended to: the innermost open section,
/// or the root.
fn current<'b>(
    root: &'b mut Vec<Directive>,
    stack: &'b mut [OpenSection<'_>],
) -> &'b mut Vec<Directive> {
    match stack.last_mut() {
        Some(open) => &mut open.body,
        None => root,
    }
}

fn push_literal(directives: &mut Vec<Directive>, text: &str) {
    if let Some(Directive::Literal(last)) = directives.last_mut() {
        last.push_str(text);
    } else {
        directives.push(Directive::Literal(text.to_string()));
    }
}
