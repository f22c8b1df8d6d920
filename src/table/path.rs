//! Path expressions over nested JSON
//!
//! A path expression navigates from a record root to a leaf value using `.`
//! for object-key descent and `[n]` for array indexing, e.g.
//! `children[2].name`. Resolution is total: any structural mismatch (absent
//! key, out-of-range index, wrong container kind, null along the way)
//! degenerates to missing rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static INDEXED_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\[(\d+)\]$").unwrap());

/// One step of a path expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object-key descent: `name`
    Key(String),
    /// Object-key descent into an array element: `name[n]`
    Index(String, usize),
}

/// Tokenize a path expression into typed segments.
///
/// Never fails: a part that does not match the `name[n]` form is kept as a
/// plain key, which simply will not be found during resolution.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    path.split('.')
        .map(|part| {
            if let Some(caps) = INDEXED_SEGMENT.captures(part) {
                if let Ok(index) = caps[2].parse::<usize>() {
                    return PathSegment::Index(caps[1].to_string(), index);
                }
            }
            PathSegment::Key(part.to_string())
        })
        .collect()
}

/// Walk `segments` against a JSON value.
///
/// Returns `None` (the missing marker) as soon as any segment cannot be
/// satisfied. A present key whose value is `null` still resolves to
/// `Some(Value::Null)` - the formatter renders both the same way.
pub fn resolve<'a>(value: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    let mut current = value;

    for segment in segments {
        if current.is_null() {
            return None;
        }
        current = match segment {
            PathSegment::Key(name) => current.as_object()?.get(name)?,
            PathSegment::Index(name, index) => {
                current.as_object()?.get(name)?.as_array()?.get(*index)?
            }
        };
    }

    Some(current)
}

/// Convenience wrapper: tokenize and resolve in one step
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    resolve(value, &parse_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokenize_mixed_segments() {
        assert_eq!(
            parse_path("a.b[1].c"),
            vec![
                PathSegment::Key("a".to_string()),
                PathSegment::Index("b".to_string(), 1),
                PathSegment::Key("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_single_key() {
        assert_eq!(parse_path("documentId"), vec![PathSegment::Key("documentId".to_string())]);
    }

    #[test]
    fn test_nested_lookup() {
        let record = json!({"a": {"b": [{}, {"c": 5}]}});
        assert_eq!(resolve_path(&record, "a.b[1].c"), Some(&json!(5)));
    }

    #[test]
    fn test_index_out_of_range() {
        let record = json!({"a": {"b": [1, 2]}});
        assert_eq!(resolve_path(&record, "a.b[5]"), None);
    }

    #[test]
    fn test_missing_key() {
        let record = json!({"a": {"b": 1}});
        assert_eq!(resolve_path(&record, "a.c"), None);
        assert_eq!(resolve_path(&record, "x.y.z"), None);
    }

    #[test]
    fn test_null_intermediate_is_missing() {
        let record = json!({"contact": null});
        assert_eq!(resolve_path(&record, "contact.email"), None);
    }

    #[test]
    fn test_present_null_leaf() {
        let record = json!({"contact": null});
        assert_eq!(resolve_path(&record, "contact"), Some(&Value::Null));
    }

    #[test]
    fn test_wrong_container_kind() {
        let record = json!({"a": [1, 2, 3], "b": "scalar"});
        // Key descent into an array
        assert_eq!(resolve_path(&record, "a.first"), None);
        // Index descent into a string
        assert_eq!(resolve_path(&record, "b[0]"), None);
        // Key descent below a scalar
        assert_eq!(resolve_path(&record, "b.length"), None);
    }

    #[test]
    fn test_resolve_against_non_object_record() {
        assert_eq!(resolve_path(&json!([1, 2, 3]), "a"), None);
        assert_eq!(resolve_path(&json!(42), "a.b"), None);
    }

    #[test]
    fn test_malformed_segment_becomes_unfound_key() {
        let record = json!({"a": {"b": [1]}});
        // "b[" is not a valid indexed segment and no such literal key exists
        assert_eq!(resolve_path(&record, "a.b["), None);
    }
}
