//! Serializes the active animation back into a standalone HTML document.
//!
//! The document embeds the module's web source with its linkage stripped,
//! boots it on a full-viewport canvas and replays the current parameter
//! values through `instance.updateConfig`.
use std::fmt::Write as _;

use crate::animation::ModuleDescriptor;
use crate::error::GalleryResult;
use crate::schema::{ParamKind, ParamValue, Schema};
use crate::theme::Theme;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{title}}</title>
    <style>
        html, body { margin: 0; height: 100%; overflow: hidden; background: {{background}}; }
        canvas { display: block; width: 100vw; height: 100vh; }
    </style>
</head>
<body>
    <canvas id="hero-canvas"></canvas>
    <script>
{{source}}

const canvas = document.getElementById('hero-canvas');
canvas.width = window.innerWidth;
canvas.height = window.innerHeight;

const instance = init(canvas, {{is_dark}});
{{overrides}}
window.addEventListener('resize', () => {
    canvas.width = window.innerWidth;
    canvas.height = window.innerHeight;
    instance.resize(canvas.width, canvas.height);
});

window.addEventListener('mousemove', (event) => {
    const rect = canvas.getBoundingClientRect();
    instance.mousemove(event.clientX - rect.left, event.clientY - rect.top);
});
    </script>
</body>
</html>
"#;

/// Everything the export modal shows
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub module_id: &'static str,
    pub title: String,
    /// The runnable page
    pub html: String,
    /// The live parameter schema in its external JSON form
    pub schema_json: String,
}

/// Builds the export for `descriptor` with the values currently in `schema`
pub fn export_document(
    descriptor: &ModuleDescriptor,
    schema: &Schema,
    theme: Theme,
) -> GalleryResult<ExportDocument> {
    let source = strip_linkage(descriptor.source);
    let title = html_escape(descriptor.name);
    let overrides = config_overrides(schema);
    let is_dark = if theme.is_dark() { "true" } else { "false" };

    let html = fill_template(TEMPLATE, |slot| match slot {
        "title" => Some(title.as_str()),
        "background" => Some(theme.background_css()),
        "source" => Some(source.as_str()),
        "is_dark" => Some(is_dark),
        "overrides" => Some(overrides.as_str()),
        _ => None,
    });

    log::info!(
        "Exported '{}' with {} parameter overrides",
        descriptor.id,
        overrides.lines().count()
    );

    Ok(ExportDocument {
        module_id: descriptor.id,
        title: descriptor.name.to_owned(),
        html,
        schema_json: schema.to_json()?,
    })
}

/// Replaces every `{{name}}` in `template` in one left-to-right pass.
///
/// Inserted text is never scanned again, so placeholders inside it survive
/// verbatim. Unknown names are left as they are.
pub fn fill_template<'a>(template: &str, slot: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => match slot(&after[..end]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            },
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Removes module linkage so the source runs as a classic script
pub fn strip_linkage(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("import ") || trimmed.starts_with("import{") {
            continue;
        }
        match trimmed.strip_prefix("export ") {
            Some(declaration) => {
                out.push_str(&line[..line.len() - trimmed.len()]);
                out.push_str(declaration);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

/// One `instance.updateConfig` call per stored parameter, in schema order
fn config_overrides(schema: &Schema) -> String {
    let mut out = String::new();
    for (key, param) in schema.iter() {
        if param.kind == ParamKind::Button {
            continue;
        }
        let _ = writeln!(
            out,
            "instance.updateConfig({}, {});",
            js_string(key),
            js_value(&param.value)
        );
    }
    out
}

/// Renders a value as a JavaScript literal
pub fn js_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(n) if n.is_finite() => n.to_string(),
        ParamValue::Number(_) => "0".to_owned(),
        ParamValue::Text(text) => js_string(text),
        ParamValue::Flag(flag) => flag.to_string(),
    }
}

/// A single-quoted JavaScript string literal, safe inside a `<script>` element
pub fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '<' => out.push_str("\\x3C"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
