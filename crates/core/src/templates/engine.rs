use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use thiserror::Error;

use crate::paths::slugify;

#[derive(Debug, Error)]
pub enum TemplateRenderError {
    #[error("invalid regex for template placeholder: {0}")]
    Regex(String),

    #[error("missing value for placeholder '{0}'")]
    MissingVariable(String),

    #[error("template data must be a map of fields, got {0}")]
    InvalidData(&'static str),

    #[error("failed to serialize template data: {0}")]
    Serialize(String),
}

pub type RenderContext = HashMap<String, String>;

fn placeholder_regex() -> Result<Regex, TemplateRenderError> {
    // Captures everything between {{ and }} that looks like a valid expression
    Regex::new(r"\{\{([^{}]+)\}\}").map_err(|e| TemplateRenderError::Regex(e.to_string()))
}

/// Flatten structured template data into a render context.
///
/// Top-level object keys become variables; nested objects are joined with
/// `.` (`{"period": {"start": ..}}` -> `period.start`). Arrays render as
/// comma-separated values and `null` as an empty string.
pub fn context_from_value(data: &Value) -> Result<RenderContext, TemplateRenderError> {
    let map = match data {
        Value::Object(map) => map,
        Value::Null => return Ok(RenderContext::new()),
        Value::Array(_) => return Err(TemplateRenderError::InvalidData("an array")),
        Value::String(_) => return Err(TemplateRenderError::InvalidData("a string")),
        Value::Number(_) => return Err(TemplateRenderError::InvalidData("a number")),
        Value::Bool(_) => return Err(TemplateRenderError::InvalidData("a boolean")),
    };

    let mut ctx = RenderContext::new();
    for (key, value) in map {
        flatten_into(&mut ctx, key, value);
    }
    Ok(ctx)
}

fn flatten_into(ctx: &mut RenderContext, key: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(ctx, &format!("{key}.{k}"), v);
            }
        }
        other => {
            ctx.insert(key.to_string(), scalar_to_string(other));
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            items.iter().map(scalar_to_string).collect::<Vec<_>>().join(", ")
        }
        other => other.to_string(),
    }
}

/// Render a string template with variable substitution.
///
/// Supports:
/// - Simple variables: `{{var_name}}`
/// - Filters: `{{var_name | filter}}` (slugify, lower, upper, trim)
///
/// Unknown placeholders are left in place.
pub fn render_string(
    template: &str,
    ctx: &RenderContext,
) -> Result<String, TemplateRenderError> {
    let re = placeholder_regex()?;
    let result = re.replace_all(template, |caps: &regex::Captures<'_>| {
        resolve(caps[1].trim(), ctx).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(result.into_owned())
}

/// Like [`render_string`] but every placeholder must resolve.
pub fn render_strict(
    template: &str,
    ctx: &RenderContext,
) -> Result<String, TemplateRenderError> {
    let re = placeholder_regex()?;
    if let Some(missing) = re
        .captures_iter(template)
        .map(|caps| caps[1].trim().to_string())
        .find(|expr| resolve(expr, ctx).is_none())
    {
        return Err(TemplateRenderError::MissingVariable(missing));
    }
    render_string(template, ctx)
}

fn resolve(expr: &str, ctx: &RenderContext) -> Option<String> {
    if let Some((var_name, filter)) = parse_filter_expr(expr) {
        return ctx.get(var_name).map(|value| apply_filter(value, filter));
    }
    ctx.get(expr).cloned()
}

/// Parse a filter expression like "var_name | filter_name".
fn parse_filter_expr(expr: &str) -> Option<(&str, &str)> {
    let (var_name, filter) = expr.split_once('|')?;
    let var_name = var_name.trim();
    let filter = filter.trim();
    if var_name.is_empty() || filter.is_empty() {
        return None;
    }
    Some((var_name, filter))
}

fn apply_filter(value: &str, filter: &str) -> String {
    match filter {
        "slugify" => slugify(value),
        "lowercase" | "lower" => value.to_lowercase(),
        "uppercase" | "upper" => value.to_uppercase(),
        "trim" => value.trim().to_string(),
        _ => value.to_string(), // Unknown filter, return unchanged
    }
}
