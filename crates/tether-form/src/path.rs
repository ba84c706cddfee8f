#![forbid(unsafe_code)]

//! Deep-path addressing into untyped JSON values.
//!
//! A [`Path`] is an ordered, non-empty sequence of object-key segments
//! parsed from a delimited string. [`get`] and [`set`] walk a
//! [`serde_json::Value`] along a path; `set` creates missing intermediate
//! objects as it descends. No compile-time knowledge of the value's shape is
//! required or assumed.
//!
//! # Invariants
//!
//! 1. A `Path` never has zero segments and never has an empty segment.
//! 2. After `set(root, p, v)`, `get(root, p)` returns `Some(&v)`.
//! 3. `set` is total: an intermediate segment holding a non-object value is
//!    overwritten with a fresh object and the descent continues.

use std::fmt;

use serde_json::{Map, Value};

/// An ordered sequence of object-key segments addressing a nested location
/// inside a structured value.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parse a delimited string into a path.
    ///
    /// Returns `None` for an empty input or any empty segment between
    /// delimiters (`".a"`, `"a."`, `"a..b"`).
    #[must_use]
    pub fn parse(raw: &str, delimiter: char) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let segments: Vec<String> = raw.split(delimiter).map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self { segments })
    }

    /// Parse a dot-delimited path, the delimiter used by form field names.
    #[must_use]
    pub fn dotted(raw: &str) -> Option<Self> {
        Self::parse(raw, '.')
    }

    /// A single-segment path, as produced from a control identifier.
    ///
    /// The segment is taken verbatim; delimiters inside it are not split.
    /// Returns `None` for an empty segment.
    #[must_use]
    pub fn single(segment: &str) -> Option<Self> {
        if segment.is_empty() {
            return None;
        }
        Some(Self {
            segments: vec![segment.to_owned()],
        })
    }

    /// The path segments, in order. Never empty.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Read the value at `path`.
///
/// Returns `None` when any intermediate is missing or not an object, or the
/// leaf is absent.
#[must_use]
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut cursor = root;
    for segment in path.segments() {
        cursor = cursor.as_object()?.get(segment)?;
    }
    Some(cursor)
}

/// Write `new` at `path`, creating missing intermediate objects.
///
/// An intermediate (or the root) that already holds a non-object value is
/// overwritten with a fresh empty object before the descent continues. This
/// keeps the write total and preserves the write-then-read-back property
/// unconditionally; callers whose data shape puts scalars on the path get
/// the documented overwrite rather than an error.
pub fn set(root: &mut Value, path: &Path, new: Value) {
    let (leaf, parents) = path
        .segments()
        .split_last()
        .expect("Path is never empty");

    let mut cursor = root;
    for segment in parents {
        if !cursor.is_object() {
            *cursor = Value::Object(Map::new());
        }
        cursor = cursor
            .as_object_mut()
            .expect("just ensured object")
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if !cursor.is_object() {
        *cursor = Value::Object(Map::new());
    }
    cursor
        .as_object_mut()
        .expect("just ensured object")
        .insert(leaf.clone(), new);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn parse_splits_on_delimiter() {
        let p = Path::dotted("deep.path.leaf").unwrap();
        assert_eq!(p.segments(), ["deep", "path", "leaf"]);
        assert_eq!(p.depth(), 3);
    }

    #[test]
    fn parse_honors_custom_delimiter() {
        let p = Path::parse("a/b/c", '/').unwrap();
        assert_eq!(p.segments(), ["a", "b", "c"]);
        // A dot is an ordinary character under a different delimiter.
        let q = Path::parse("a.b", '/').unwrap();
        assert_eq!(q.segments(), ["a.b"]);
    }

    #[test]
    fn parse_rejects_empty_input_and_segments() {
        assert_eq!(Path::dotted(""), None);
        assert_eq!(Path::dotted("."), None);
        assert_eq!(Path::dotted(".a"), None);
        assert_eq!(Path::dotted("a."), None);
        assert_eq!(Path::dotted("a..b"), None);
    }

    #[test]
    fn single_takes_segment_verbatim() {
        let p = Path::single("not.split").unwrap();
        assert_eq!(p.segments(), ["not.split"]);
        assert_eq!(Path::single(""), None);
    }

    #[test]
    fn display_joins_with_dots() {
        let p = Path::dotted("a.b.c").unwrap();
        assert_eq!(p.to_string(), "a.b.c");
    }

    #[test]
    fn get_descends_nested_objects() {
        let root = json!({"a": {"b": {"c": 3}}});
        let p = Path::dotted("a.b.c").unwrap();
        assert_eq!(get(&root, &p), Some(&json!(3)));
    }

    #[test]
    fn get_misses_return_none() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(get(&root, &Path::dotted("a.x").unwrap()), None);
        assert_eq!(get(&root, &Path::dotted("a.b.c").unwrap()), None);
        assert_eq!(get(&json!(7), &Path::dotted("a").unwrap()), None);
    }

    #[test]
    fn set_creates_missing_intermediates() {
        let mut root = json!({});
        set(&mut root, &Path::dotted("deep.path").unwrap(), json!("bob"));
        assert_eq!(root, json!({"deep": {"path": "bob"}}));
    }

    #[test]
    fn set_preserves_siblings() {
        let mut root = json!({"keep": 1, "nest": {"keep": 2}});
        set(&mut root, &Path::dotted("nest.new").unwrap(), json!(3));
        assert_eq!(root, json!({"keep": 1, "nest": {"keep": 2, "new": 3}}));
    }

    #[test]
    fn set_overwrites_scalar_intermediate() {
        let mut root = json!({"a": 5});
        set(&mut root, &Path::dotted("a.b").unwrap(), json!("x"));
        assert_eq!(root, json!({"a": {"b": "x"}}));
    }

    #[test]
    fn set_overwrites_scalar_root() {
        let mut root = json!("scalar");
        set(&mut root, &Path::dotted("a").unwrap(), json!(1));
        assert_eq!(root, json!({"a": 1}));
    }

    #[test]
    fn set_replaces_existing_leaf() {
        let mut root = json!({"email": "old"});
        set(&mut root, &Path::dotted("email").unwrap(), json!("new"));
        assert_eq!(root, json!({"email": "new"}));
    }

    fn segment_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,7}"
    }

    fn leaf_strategy() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[ -~]{0,16}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn write_then_read_back(
            segments in prop::collection::vec(segment_strategy(), 1..5),
            leaf in leaf_strategy(),
        ) {
            let raw = segments.join(".");
            let path = Path::dotted(&raw).expect("generated segments are non-empty");
            let mut root = json!({});
            set(&mut root, &path, leaf.clone());
            prop_assert_eq!(get(&root, &path), Some(&leaf));
        }

        #[test]
        fn write_then_read_back_over_existing_data(
            segments in prop::collection::vec(segment_strategy(), 1..5),
            leaf in leaf_strategy(),
        ) {
            let raw = segments.join(".");
            let path = Path::dotted(&raw).expect("generated segments are non-empty");
            // Whatever already sits on the path, the write must win.
            let mut root = json!({"a": 1, "b": {"c": [1, 2]}, "x": "scalar"});
            set(&mut root, &path, leaf.clone());
            prop_assert_eq!(get(&root, &path), Some(&leaf));
        }
    }
}
