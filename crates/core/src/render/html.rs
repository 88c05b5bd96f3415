//! HTML serialization of view trees.

use super::view::{Element, ViewNode};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link", "path"];

pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn to_html(node: &ViewNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &ViewNode, out: &mut String) {
    match node {
        ViewNode::Text { text } => out.push_str(&escape_text(text)),
        ViewNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(element.tag);

    if !element.classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_attr(&element.classes.join(" ")));
        out.push('"');
    }

    if !element.styles.is_empty() {
        let css = element
            .styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(" style=\"");
        out.push_str(&escape_attr(&css));
        out.push('"');
    }

    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }

    if VOID_ELEMENTS.contains(&element.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

/// Stylesheet shipped with every page: animation keyframes plus the few
/// rules the class vocabulary cannot express on its own.
const BASE_CSS: &str = r#"
.phone-frame { border: 8px solid #1f2937; border-radius: 40px; overflow: hidden; position: relative; }
.progress-track { background: #e5e7eb; border-radius: 9999px; overflow: hidden; }
.progress-fill { background: var(--progress-bar-color, #4299e1); height: 100%; }
@keyframes fade-in { from { opacity: 0 } to { opacity: 1 } }
@keyframes slide-up { from { transform: translateY(20px); opacity: 0 } to { transform: none; opacity: 1 } }
@keyframes slide-from-right { from { transform: translateX(40px); opacity: 0 } to { transform: none; opacity: 1 } }
@keyframes scale-in { from { transform: scale(0.95); opacity: 0 } to { transform: none; opacity: 1 } }
.animate-fade-in { animation: fade-in 0.5s ease-out both }
.animate-slide-up { animation: slide-up 0.5s ease-out both }
.animate-slide-from-right { animation: slide-from-right 0.5s ease-out both }
.animate-scale-in { animation: scale-in 0.5s ease-out both }
"#;

/// Wrap `body` markup in a complete document.
pub fn page(title: &str, body: &str) -> String {
    page_with_script(title, body, None)
}

/// Like [`page`], with an inline script appended to the body.
pub fn page_with_script(title: &str, body: &str, script: Option<&str>) -> String {
    let script = script
        .map(|s| format!("<script>{s}</script>"))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>{title}</title>\n\
         <script src=\"https://cdn.tailwindcss.com\"></script>\n\
         <style>{BASE_CSS}</style>\n\
         </head>\n<body>\n{body}\n{script}\n</body>\n</html>\n",
        title = escape_text(title),
    )
}
