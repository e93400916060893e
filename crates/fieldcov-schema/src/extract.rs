//! # Field Extraction
//!
//! Collects the set of field names present in a research document.
//!
//! Documents are LLM-authored JSON and come in two shapes, often mixed:
//! flat (`{"name": ..., "architecture": ...}`) and grouped by category
//! (`{"basic_info": {"name": ...}, "technical_features": {...}}`). At the
//! top level, keys that spell a category (per the [`AliasTable`]) are
//! treated as transparent containers: their own name is not a field, and
//! the keys of their object value are collected as if they were top level.
//! Transparency applies one category level deep, plus any further category
//! containers nested directly inside a category container.
//!
//! The walk uses an explicit stack of `(node, category_level)` pairs, so
//! deeply nested input cannot exhaust the call stack. Documents read from
//! disk are still bounded by the JSON parser's 128-level nesting limit (see
//! [`read_document`](crate::read_document)). Malformed structure is never
//! an error; nodes that cannot carry field names are skipped.

use std::collections::BTreeSet;

use serde_json::Value;

use fieldcov_core::{AliasTable, RESERVED_KEYS};

/// Extract field names using the built-in category alias table.
pub fn extract_fields(document: &Value) -> BTreeSet<String> {
    extract_fields_with(document, AliasTable::builtin())
}

/// Extract field names using a caller-supplied alias table.
///
/// Rules, for each object reached by the walk:
///
/// - `_source_file` and `uncertain` are metadata and never fields.
/// - At category level, an alias key is a container. If its value is an
///   object, that object is walked at category level; the key itself is
///   dropped.
/// - Every other key is a field. If its value is an array, the objects in
///   the array are walked below category level.
///
/// Objects inside an array inherit the array's level. Scalars and
/// non-object array elements end the walk.
pub fn extract_fields_with(document: &Value, aliases: &AliasTable) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    let mut stack: Vec<(&Value, bool)> = vec![(document, true)];

    while let Some((node, category_level)) = stack.pop() {
        match node {
            Value::Object(map) => {
                for (key, value) in map {
                    if is_reserved(key) {
                        continue;
                    }
                    if category_level && aliases.is_container(key) {
                        if value.is_object() {
                            stack.push((value, true));
                        }
                        continue;
                    }
                    fields.insert(key.clone());
                    if value.is_array() {
                        stack.push((value, false));
                    }
                }
            }
            Value::Array(items) => {
                stack.extend(
                    items
                        .iter()
                        .filter(|item| item.is_object())
                        .map(|item| (item, category_level)),
                );
            }
            _ => {}
        }
    }

    fields
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flat_document_keys_are_fields() {
        let doc = json!({"name": "GPT-4", "vendor": "OpenAI", "parameters": null});
        assert_eq!(extract_fields(&doc), set(&["name", "vendor", "parameters"]));
    }

    #[test]
    fn category_container_is_transparent() {
        let doc = json!({"basic_info": {"a": 1}, "b": 2});
        assert_eq!(extract_fields(&doc), set(&["a", "b"]));
    }

    #[test]
    fn synonym_and_title_case_containers_are_transparent() {
        let doc = json!({
            "Basic Info": {"name": "x"},
            "technical_characteristics": {"architecture": "moe"},
            "performance": {"mmlu": 86.4},
            "Market Positioning": {"target_users": []}
        });
        assert_eq!(
            extract_fields(&doc),
            set(&["name", "architecture", "mmlu", "target_users"])
        );
    }

    #[test]
    fn reserved_keys_are_skipped() {
        let doc = json!({"a": 1, "uncertain": ["a"], "_source_file": "x.txt"});
        assert_eq!(extract_fields(&doc), set(&["a"]));
    }

    #[test]
    fn reserved_keys_skipped_inside_containers() {
        let doc = json!({"history": {"uncertain": ["v1"], "versions": []}});
        assert_eq!(extract_fields(&doc), set(&["versions"]));
    }

    #[test]
    fn list_of_objects_under_field_contributes_keys() {
        let doc = json!({"items": [{"a": 1}, {"a": 2}, "not-a-dict"]});
        assert_eq!(extract_fields(&doc), set(&["items", "a"]));
    }

    #[test]
    fn container_with_non_object_value_contributes_nothing() {
        let doc = json!({"history": ["v1", "v2"], "basic_info": "n/a", "name": "x"});
        assert_eq!(extract_fields(&doc), set(&["name"]));
    }

    #[test]
    fn alias_below_category_level_is_a_plain_field() {
        let doc = json!({"releases": [{"history": {"x": 1}}]});
        assert_eq!(extract_fields(&doc), set(&["releases", "history"]));
    }

    #[test]
    fn nested_object_value_of_field_is_opaque() {
        let doc = json!({"pricing": {"input": 1, "output": 2}});
        assert_eq!(extract_fields(&doc), set(&["pricing"]));
    }

    #[test]
    fn container_nested_in_container_is_transparent() {
        let doc = json!({"basic_info": {"business_info": {"price": 1}, "name": "x"}});
        assert_eq!(extract_fields(&doc), set(&["price", "name"]));
    }

    #[test]
    fn root_array_of_objects_is_walked_at_category_level() {
        let doc = json!([{"basic_info": {"name": "x"}}, {"vendor": "y"}, 3]);
        assert_eq!(extract_fields(&doc), set(&["name", "vendor"]));
    }

    #[test]
    fn scalar_root_yields_nothing() {
        assert!(extract_fields(&json!("just text")).is_empty());
        assert!(extract_fields(&json!(42)).is_empty());
        assert!(extract_fields(&Value::Null).is_empty());
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let doc = json!({"Name": 1, "name": 2});
        assert_eq!(extract_fields(&doc), set(&["Name", "name"]));
    }

    #[test]
    fn custom_alias_table_replaces_builtin() {
        let aliases = AliasTable::from_groups([("specs", vec!["specs", "Specs"])]);
        let doc = json!({"Specs": {"cpu": "x"}, "basic_info": {"name": "y"}});
        assert_eq!(
            extract_fields_with(&doc, &aliases),
            set(&["cpu", "basic_info"])
        );
    }

    /// Tear a value down without recursing, so very deep test documents
    /// can be dropped.
    fn dismantle(value: Value) {
        let mut pending = vec![value];
        while let Some(node) = pending.pop() {
            match node {
                Value::Array(items) => pending.extend(items),
                Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }

    #[test]
    fn deeply_nested_input_does_not_overflow() {
        let mut doc = json!({"leaf": 1});
        for _ in 0..100_000 {
            let mut wrapper = Map::new();
            wrapper.insert("items".to_string(), Value::Array(vec![doc]));
            doc = Value::Object(wrapper);
        }
        assert_eq!(extract_fields(&doc), set(&["items", "leaf"]));
        dismantle(doc);
    }

    #[test]
    fn extraction_is_idempotent() {
        let doc = json!({
            "basic_info": {"name": "x", "uncertain": ["name"]},
            "benchmarks": [{"suite": "mmlu", "score": 1}],
            "vendor": "y"
        });
        assert_eq!(extract_fields(&doc), extract_fields(&doc));
    }
}
