//! `{{ $json.path }}` expressions in parameter values.
//!
//! A string that is exactly one expression resolves to the referenced value
//! with its JSON type intact. Expressions embedded in longer strings are
//! rendered as text.

use crate::error::NodeError;
use serde_json::Value;

const ITEM_ROOT: &str = "$json";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let flush = |current: &mut String, segments: &mut Vec<PathSegment>| {
        let raw = current.trim().trim_matches('"').trim_matches('\'').trim();
        if !raw.is_empty() {
            segments.push(match raw.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Key(raw.to_string()),
            });
        }
        current.clear();
    };
    for ch in path.chars() {
        match ch {
            '.' if !in_brackets => flush(&mut current, &mut segments),
            '[' => {
                flush(&mut current, &mut segments);
                in_brackets = true;
            }
            ']' => {
                flush(&mut current, &mut segments);
                in_brackets = false;
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut segments);
    segments
}

/// Look up a dotted / bracketed path. Missing paths resolve to `Null`.
pub fn get_path_value(target: &Value, path: &str) -> Value {
    let mut current = target;
    for segment in parse_path(path) {
        let next = match &segment {
            PathSegment::Key(key) => current.get(key.as_str()),
            PathSegment::Index(index) => current.as_array().and_then(|arr| arr.get(*index)),
        };
        match next {
            Some(value) => current = value,
            None => return Value::Null,
        }
    }
    current.clone()
}

fn resolve_expression(expression: &str, item: &Value) -> Result<Value, NodeError> {
    let expression = expression.trim();
    let path = expression.strip_prefix(ITEM_ROOT).ok_or_else(|| {
        NodeError::Expression(format!(
            "unsupported expression '{}': only {} references are allowed",
            expression, ITEM_ROOT
        ))
    })?;
    Ok(get_path_value(item, path))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Resolve every expression in `template` against the item's JSON.
pub fn resolve_template_string(template: &str, item: &Value) -> Result<Value, NodeError> {
    let trimmed = template.trim();
    if let Some(inner) = trimmed.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) {
        if !inner.contains("{{") {
            return resolve_expression(inner, item);
        }
    }

    let mut out = String::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let (prefix, tail) = rest.split_at(start);
        out.push_str(prefix);
        match tail.find("}}") {
            Some(end) => {
                let value = resolve_expression(&tail[2..end], item)?;
                out.push_str(&stringify(&value));
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Ok(Value::String(out))
}

/// Resolve expressions in strings, recursing into arrays and objects.
pub fn resolve_templates(value: &Value, item: &Value) -> Result<Value, NodeError> {
    match value {
        Value::String(text) if text.contains("{{") => resolve_template_string(text, item),
        Value::Array(items) => items
            .iter()
            .map(|entry| resolve_templates(entry, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in map {
                out.insert(key.clone(), resolve_templates(entry, item)?);
            }
            Ok(Value::Object(out))
        }
        _ => Ok(value.clone()),
    }
}
