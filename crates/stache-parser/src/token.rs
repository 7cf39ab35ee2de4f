//! Tokenizer for Mustache tags.
//!
//! Splits source into text runs and tags. Delimiter changes and standalone
//! line trimming happen here, so the parser only ever sees clean tokens.

use crate::error::{ParseError, Position};
use crate::template::Delimiters;

/// What a tag does, decided by its sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    /// `{{name}}`
    Value,
    /// `{{{name}}}` or `{{&name}}`
    Raw,
    /// `{{#name}}`
    Section,
    /// `{{^name}}`
    Inverted,
    /// `{{/name}}`
    Close,
    /// `{{!comment}}`
    Comment,
    /// `{{>name}}`
    Partial,
    /// `{{=<% %>=}}`
    SetDelimiters,
}

impl TagKind {
    /// Interpolations never stand alone; everything else may.
    fn can_stand_alone(self) -> bool {
        !matches!(self, TagKind::Value | TagKind::Raw)
    }
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text between tags.
    Text(&'a str),
    /// A tag, with its trimmed name and the byte offset of its open delimiter.
    ///
    /// `indent` holds the leading whitespace removed from a standalone line,
    /// empty otherwise.
    Tag {
        kind: TagKind,
        name: &'a str,
        offset: usize,
        indent: &'a str,
    },
}

/// A tag located in the source but not yet placed relative to its line.
struct ScannedTag<'a> {
    kind: TagKind,
    name: &'a str,
    end: usize,
}

pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    delimiters: Delimiters,
    last_tag_end: usize,
    pending: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str, delimiters: Delimiters) -> Self {
        Self {
            input,
            pos: 0,
            delimiters,
            last_tag_end: 0,
            pending: None,
        }
    }

    fn scan_tag(&self, start: usize) -> Result<ScannedTag<'a>, ParseError> {
        let input = self.input;
        let body_start = start + self.delimiters.open.len();
        let rest = &input[body_start..];
        let unclosed = || ParseError::UnclosedTag {
            position: Position::locate(input, start),
        };

        if let Some(inner) = rest.strip_prefix('{') {
            let closer = format!("}}{}", self.delimiters.close);
            let len = inner.find(&closer).ok_or_else(unclosed)?;
            let name = inner[..len].trim();
            if name.is_empty() {
                return Err(ParseError::EmptyTag {
                    position: Position::locate(input, start),
                });
            }
            return Ok(ScannedTag {
                kind: TagKind::Raw,
                name,
                end: body_start + 1 + len + closer.len(),
            });
        }

        let len = rest.find(&self.delimiters.close).ok_or_else(unclosed)?;
        let end = body_start + len + self.delimiters.close.len();
        let content = rest[..len].trim();

        let (kind, name) = match content.chars().next() {
            Some('#') => (TagKind::Section, &content[1..]),
            Some('^') => (TagKind::Inverted, &content[1..]),
            Some('/') => (TagKind::Close, &content[1..]),
            Some('!') => (TagKind::Comment, &content[1..]),
            Some('>') => (TagKind::Partial, &content[1..]),
            Some('&') => (TagKind::Raw, &content[1..]),
            Some('=') => match content[1..].strip_suffix('=') {
                Some(inner) => (TagKind::SetDelimiters, inner),
                None => {
                    return Err(ParseError::InvalidDelimiters {
                        position: Position::locate(input, start),
                    })
                }
            },
            Some(sigil @ ('<' | '$')) => {
                return Err(ParseError::UnsupportedTag {
                    sigil,
                    position: Position::locate(input, start),
                })
            }
            _ => (TagKind::Value, content),
        };
        let name = name.trim();

        if name.is_empty() && kind != TagKind::Comment {
            return Err(ParseError::EmptyTag {
                position: Position::locate(input, start),
            });
        }

        Ok(ScannedTag { kind, name, end })
    }

    /// If the tag spanning `start..end` is alone on its line, returns the
    /// offset where the line begins and the offset just past its newline.
    fn standalone_bounds(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let input = self.input;
        let line_start = input[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        if line_start < self.last_tag_end || line_start < self.pos {
            return None;
        }
        if !input[line_start..start]
            .chars()
            .all(|c| c == ' ' || c == '\t')
        {
            return None;
        }

        let line_end = input[end..]
            .find('\n')
            .map(|i| end + i + 1)
            .unwrap_or(input.len());
        if !input[end..line_end]
            .chars()
            .all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        {
            return None;
        }

        Some((line_start, line_end))
    }

    fn set_delimiters(&mut self, content: &str, offset: usize) -> Result<(), ParseError> {
        let parts: Vec<&str> = content.split_whitespace().collect();
        match parts.as_slice() {
            [open, close] if !open.contains('=') && !close.contains('=') => {
                self.delimiters = Delimiters::new(*open, *close);
                Ok(())
            }
            _ => Err(ParseError::InvalidDelimiters {
                position: Position::locate(self.input, offset),
            }),
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, ParseError> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(token));
        }
        if self.pos >= self.input.len() {
            return Ok(None);
        }

        let remaining = &self.input[self.pos..];
        let Some(found) = remaining.find(&self.delimiters.open) else {
            self.pos = self.input.len();
            return Ok(Some(Token::Text(remaining)));
        };

        let start = self.pos + found;
        let tag = self.scan_tag(start)?;

        let mut text_end = start;
        let mut next_pos = tag.end;
        let mut indent = "";
        if tag.kind.can_stand_alone() {
            if let Some((line_start, line_end)) = self.standalone_bounds(start, tag.end) {
                text_end = line_start;
                next_pos = line_end;
                indent = &self.input[line_start..start];
            }
        }

        let text = &self.input[self.pos..text_end];
        self.last_tag_end = tag.end;
        self.pos = next_pos;

        if tag.kind == TagKind::SetDelimiters {
            self.set_delimiters(tag.name, start)?;
        }

        let token = Token::Tag {
            kind: tag.kind,
            name: tag.name,
            offset: start,
            indent,
        };

        if text.is_empty() {
            Ok(Some(token))
        } else {
            self.pending = Some(token);
            Ok(Some(Token::Text(text)))
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                // Stop after the first error.
                self.pos = self.input.len();
                self.pending = None;
                Some(Err(err))
            }
        }
    }
}
