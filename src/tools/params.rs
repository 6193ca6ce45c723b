use serde_json::Value;

use super::registry::Params;

/// Returns `params[key]` unchanged unless it is absent or falsy (`null`,
/// `false`, `0`, `""`), in which case `default` is used. Never fails.
pub(crate) fn passthrough(params: &Params, key: &str, default: &str) -> Value {
    match params.get(key) {
        Some(value) if is_truthy(value) => value.clone(),
        _ => Value::String(default.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a value the way it reads when interpolated into text, so
/// `"csv"` gives `csv`, `5` gives `5` and `["a", "b"]` gives `a,b`.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
