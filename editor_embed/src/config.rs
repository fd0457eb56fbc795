//! Editor configuration building
//!
//! The host's `init` object is passed through untouched except for the keys
//! the controller owns: `readonly`, `inline`, `plugins`, and `toolbar`.
//! `target` and `setup` travel as typed fields of [`EditorConfig`] instead.
//!
//! [`EditorConfig`]: editor_api::EditorConfig

use crate::props::{EditorProps, StringOrList};
use serde_json::{Map, Value};

/// Splits a delimited plugin string on whitespace and commas
fn split_names(names: &str) -> impl Iterator<Item = &str> {
    names
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|name| !name.is_empty())
}

fn push_unique(out: &mut Vec<String>, name: &str) {
    if !out.iter().any(|existing| existing == name) {
        out.push(name.to_string());
    }
}

/// Normalizes a plugin value from the `init` object
///
/// Accepts a delimited string or an array of strings; anything else
/// contributes nothing.
pub fn normalize_init_plugins(value: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        Some(Value::String(names)) => {
            for name in split_names(names) {
                push_unique(&mut out, name);
            }
        }
        Some(Value::Array(items)) => {
            for name in items.iter().filter_map(Value::as_str) {
                for part in split_names(name) {
                    push_unique(&mut out, part);
                }
            }
        }
        _ => {}
    }
    out
}

/// Merges `init.plugins` with the declared `plugins` prop
///
/// The result keeps first-seen order and contains no duplicates.
pub fn merge_plugins(init: Option<&Value>, declared: Option<&StringOrList>) -> Vec<String> {
    let mut merged = normalize_init_plugins(init);
    match declared {
        Some(StringOrList::Text(names)) => {
            for name in split_names(names) {
                push_unique(&mut merged, name);
            }
        }
        Some(StringOrList::List(items)) => {
            for item in items {
                for name in split_names(item) {
                    push_unique(&mut merged, name);
                }
            }
        }
        None => {}
    }
    merged
}

/// Resolves the toolbar: a non-blank declared toolbar wins over `init.toolbar`
pub fn resolve_toolbar(props: &EditorProps) -> Option<Value> {
    match &props.toolbar {
        Some(toolbar) if !toolbar.is_blank() => Some(toolbar.to_value()),
        _ => props.init_option("toolbar").cloned(),
    }
}

/// Resolves inline mode: the `inline` prop, else a `true` in `init.inline`
pub fn resolve_inline(props: &EditorProps) -> bool {
    props.inline.unwrap_or(false)
        || props
            .init_option("inline")
            .and_then(Value::as_bool)
            .unwrap_or(false)
}

/// Builds the option object handed to the library
pub fn build_options(props: &EditorProps, inline: bool) -> Map<String, Value> {
    let mut options = props.init.clone().unwrap_or_default();
    options.remove("target");
    options.remove("setup");

    match props.disabled {
        Some(disabled) => {
            options.insert("readonly".to_string(), Value::Bool(disabled));
        }
        None => {
            options.remove("readonly");
        }
    }

    options.insert("inline".to_string(), Value::Bool(inline));

    let plugins = merge_plugins(props.init_option("plugins"), props.plugins.as_ref());
    options.insert(
        "plugins".to_string(),
        Value::Array(plugins.into_iter().map(Value::String).collect()),
    );

    match resolve_toolbar(props) {
        Some(toolbar) => {
            options.insert("toolbar".to_string(), toolbar);
        }
        None => {
            options.remove("toolbar");
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn init(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_merge_plugins_dedupes() {
        let merged = merge_plugins(Some(&json!("a b")), Some(&StringOrList::from(vec!["b", "c"])));
        let set: BTreeSet<&str> = merged.iter().map(String::as_str).collect();
        assert_eq!(set, BTreeSet::from(["a", "b", "c"]));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_plugins_commas_and_lists() {
        let merged = merge_plugins(
            Some(&json!(["lists", "link,image"])),
            Some(&StringOrList::from("image, table")),
        );
        assert_eq!(merged, vec!["lists", "link", "image", "table"]);
    }

    #[test]
    fn test_merge_plugins_absent_is_empty() {
        assert!(merge_plugins(None, None).is_empty());
        assert!(merge_plugins(Some(&json!("")), Some(&StringOrList::from(""))).is_empty());
        assert!(merge_plugins(Some(&json!(7)), None).is_empty());
    }

    #[test]
    fn test_toolbar_precedence() {
        let props = EditorProps::new()
            .with_init(init(json!({"toolbar": "undo redo"})))
            .with_toolbar("bold");
        assert_eq!(resolve_toolbar(&props), Some(json!("bold")));

        let props = EditorProps::new()
            .with_init(init(json!({"toolbar": "undo redo"})))
            .with_toolbar("");
        assert_eq!(resolve_toolbar(&props), Some(json!("undo redo")));

        assert_eq!(resolve_toolbar(&EditorProps::new()), None);
    }

    #[test]
    fn test_inline_sources() {
        assert!(!resolve_inline(&EditorProps::new()));
        assert!(resolve_inline(&EditorProps::new().with_inline(true)));
        assert!(resolve_inline(
            &EditorProps::new()
                .with_inline(false)
                .with_init(init(json!({"inline": true})))
        ));
        assert!(!resolve_inline(
            &EditorProps::new().with_init(init(json!({"inline": "yes"})))
        ));
    }

    #[test]
    fn test_build_options_overrides() {
        let props = EditorProps::new()
            .with_init(init(json!({
                "height": 300,
                "readonly": true,
                "inline": false,
                "plugins": "lists",
                "target": "#elsewhere"
            })))
            .with_plugins("link")
            .with_disabled(false);

        let options = build_options(&props, true);

        assert_eq!(options["height"], json!(300));
        assert_eq!(options["readonly"], json!(false));
        assert_eq!(options["inline"], json!(true));
        assert_eq!(options["plugins"], json!(["lists", "link"]));
        assert!(!options.contains_key("target"));
        assert!(!options.contains_key("toolbar"));
    }

    #[test]
    fn test_undeclared_disabled_clears_readonly() {
        let props = EditorProps::new().with_init(init(json!({"readonly": true})));
        let options = build_options(&props, false);
        assert!(!options.contains_key("readonly"));
        assert_eq!(options["plugins"], json!([]));
    }
}
