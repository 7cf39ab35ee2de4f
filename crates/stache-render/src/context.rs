//! Context stack and key lookup.
//!
//! A template is rendered against a stack of JSON values. The data passed to
//! the render call is the bottom frame (above any extra context values);
//! every section that renders its body pushes the value it iterated or
//! tested, so inner names shadow outer ones.
//!
//! # Lookup Rules
//!
//! - `.` resolves to the innermost frame.
//! - For `a.b.c`, `a` is searched innermost-first. Once a frame holding `a`
//!   is found, `b.c` is resolved inside that value only; a miss there is a
//!   miss overall, not a reason to keep searching outer frames.
//! - Objects are indexed by key, arrays by numeric segment (`items.0`).
//!
//! Missing values are `None`, never errors.

use serde_json::Value;
use stache_parser::KeyPath;

/// A stack of borrowed context frames, innermost last.
#[derive(Debug, Clone, Default)]
pub struct ContextStack<'a> {
    frames: Vec<&'a Value>,
}

impl<'a> ContextStack<'a> {
    /// Creates a stack with `root` as its only frame.
    pub fn new(root: &'a Value) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, frame: &'a Value) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<&'a Value> {
        self.frames.pop()
    }

    /// The innermost frame.
    pub fn top(&self) -> Option<&'a Value> {
        self.frames.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolves a key path against the stack.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use stache_parser::KeyPath;
    /// use stache_render::context::ContextStack;
    ///
    /// let outer = json!({"title": "Report", "settings": {"adsData": {"issn": "1234-5678"}}});
    /// let inner = json!({"name": "row"});
    ///
    /// let mut stack = ContextStack::new(&outer);
    /// stack.push(&inner);
    ///
    /// assert_eq!(stack.lookup(&KeyPath::parse("name")), Some(&json!("row")));
    /// assert_eq!(stack.lookup(&KeyPath::parse("title")), Some(&json!("Report")));
    /// assert_eq!(
    ///     stack.lookup(&KeyPath::parse("settings.adsData.issn")),
    ///     Some(&json!("1234-5678"))
    /// );
    /// assert_eq!(stack.lookup(&KeyPath::parse("settings.missing.issn")), None);
    /// ```
    pub fn lookup(&self, path: &KeyPath) -> Option<&'a Value> {
        let Some(head) = path.head() else {
            return self.top();
        };
        let frame = self
            .frames
            .iter()
            .rev()
            .copied()
            .find_map(|frame| resolve_segment(frame, head))?;
        resolve_path(frame, path.tail())
    }
}

/// Walks `segments` down from `value`.
///
/// Returns `None` as soon as a segment is missing or the current value
/// cannot be indexed.
pub fn resolve_path<'v>(value: &'v Value, segments: &[String]) -> Option<&'v Value> {
    match segments.split_first() {
        None => Some(value),
        Some((first, rest)) => resolve_path(resolve_segment(value, first)?, rest),
    }
}

fn resolve_segment<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Whether a value opens a section.
///
/// `null`, `false`, `0`, `""` and `[]` are falsy; everything else, including
/// an empty object, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Formats a value for interpolation.
///
/// Strings are emitted as-is, whole floats drop their fractional part,
/// `null` is empty, arrays join their formatted elements with `,`, and
/// objects fall back to compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod lookup {
        use super::*;

        #[test]
        fn simple_key() {
            let data = json!({"number": 7});
            let stack = ContextStack::new(&data);
            assert_eq!(stack.lookup(&KeyPath::parse("number")), Some(&json!(7)));
        }

        #[test]
        fn missing_key_is_none() {
            let data = json!({"number": 7});
            let stack = ContextStack::new(&data);
            assert_eq!(stack.lookup(&KeyPath::parse("title")), None);
        }

        #[test]
        fn implicit_is_top_frame() {
            let data = json!({"items": ["a"]});
            let item = json!("a");
            let mut stack = ContextStack::new(&data);
            stack.push(&item);
            assert_eq!(stack.lookup(&KeyPath::implicit()), Some(&item));
        }

        #[test]
        fn inner_frame_shadows_outer() {
            let outer = json!({"name": "outer", "only_outer": 1});
            let inner = json!({"name": "inner"});
            let mut stack = ContextStack::new(&outer);
            stack.push(&inner);
            assert_eq!(stack.lookup(&KeyPath::parse("name")), Some(&json!("inner")));
            assert_eq!(stack.lookup(&KeyPath::parse("only_outer")), Some(&json!(1)));

            stack.pop();
            assert_eq!(stack.lookup(&KeyPath::parse("name")), Some(&json!("outer")));
        }

        #[test]
        fn dotted_path_does_not_fall_back_after_head_found() {
            let outer = json!({"a": {"b": "outer"}});
            let inner = json!({"a": {"c": "inner"}});
            let mut stack = ContextStack::new(&outer);
            stack.push(&inner);
            assert_eq!(stack.lookup(&KeyPath::parse("a.b")), None);
            assert_eq!(stack.lookup(&KeyPath::parse("a.c")), Some(&json!("inner")));
        }

        #[test]
        fn missing_intermediate_segment() {
            let data = json!({"settings": {"adsData": null}});
            let stack = ContextStack::new(&data);
            assert_eq!(stack.lookup(&KeyPath::parse("settings.adsData.issn")), None);
            assert_eq!(stack.lookup(&KeyPath::parse("nothing.at.all")), None);
        }

        #[test]
        fn array_index_segment() {
            let data = json!({"users": [{"name": "Alice"}, {"name": "Bob"}]});
            let stack = ContextStack::new(&data);
            assert_eq!(stack.lookup(&KeyPath::parse("users.1.name")), Some(&json!("Bob")));
            assert_eq!(stack.lookup(&KeyPath::parse("users.9.name")), None);
            assert_eq!(stack.lookup(&KeyPath::parse("users.x")), None);
        }

        #[test]
        fn scalar_frame_has_no_keys() {
            let data = json!({"title": "t"});
            let scalar = json!(true);
            let mut stack = ContextStack::new(&data);
            stack.push(&scalar);
            assert_eq!(stack.lookup(&KeyPath::parse("title")), Some(&json!("t")));
        }

        #[test]
        fn empty_stack() {
            let stack = ContextStack::default();
            assert_eq!(stack.depth(), 0);
            assert_eq!(stack.lookup(&KeyPath::parse("x")), None);
            assert_eq!(stack.lookup(&KeyPath::implicit()), None);
        }
    }

    mod truthiness {
        use super::*;

        #[test]
        fn falsy_values() {
            for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([])] {
                assert!(!is_truthy(&value), "{} should be falsy", value);
            }
        }

        #[test]
        fn truthy_values() {
            for value in [json!(true), json!(1), json!(-2.5), json!("0"), json!([0]), json!({})] {
                assert!(is_truthy(&value), "{} should be truthy", value);
            }
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn scalars() {
            assert_eq!(format_value(&json!("text")), "text");
            assert_eq!(format_value(&json!(42)), "42");
            assert_eq!(format_value(&json!(19.99)), "19.99");
            assert_eq!(format_value(&json!(true)), "true");
            assert_eq!(format_value(&json!(null)), "");
        }

        #[test]
        fn whole_floats_drop_fraction() {
            assert_eq!(format_value(&json!(3.0)), "3");
            assert_eq!(format_value(&json!(-1.0)), "-1");
        }

        #[test]
        fn arrays_join_with_commas() {
            assert_eq!(format_value(&json!([1, "b", null, [2, 3]])), "1,b,,2,3");
        }

        #[test]
        fn objects_render_as_json() {
            assert_eq!(format_value(&json!({"a": 1})), "{\"a\":1}");
        }
    }
}
