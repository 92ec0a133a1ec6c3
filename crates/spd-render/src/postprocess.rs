//! Whitespace normalization of rendered SVG.
//!
//! Both passes parse the document with `roxmltree` and serialize it again, so a malformed
//! document (e.g. a hand-edited one) is reported instead of passed through.

use std::fmt::Write as _;

use crate::svg::escape_xml;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Drops whitespace-only text between elements, comments and processing instructions.
pub fn minify(svg: &str) -> Result<String> {
    if svg.trim().is_empty() {
        return Ok(String::new());
    }
    let doc = roxmltree::Document::parse(svg)?;
    let mut out = String::with_capacity(svg.len());
    write_compact(&mut out, doc.root_element());
    Ok(out)
}

/// One element per line, indented by two spaces per level. Elements holding text stay on a
/// single line so text content is never altered.
pub fn pretty_print(svg: &str) -> Result<String> {
    if svg.trim().is_empty() {
        return Ok(String::new());
    }
    let doc = roxmltree::Document::parse(svg)?;
    let mut out = String::with_capacity(svg.len() * 2);
    write_indented(&mut out, doc.root_element(), 0);
    Ok(out)
}

fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

fn write_start_tag(out: &mut String, node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name());
    let _ = write!(out, "<{name}");

    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        match ns.name() {
            Some(prefix) => {
                let _ = write!(out, r#" xmlns:{prefix}="{}""#, escape_xml(ns.uri()));
            }
            None => {
                let _ = write!(out, r#" xmlns="{}""#, escape_xml(ns.uri()));
            }
        }
    }

    for attr in node.attributes() {
        let key = qualified_name(node, attr.namespace(), attr.name());
        let _ = write!(out, r#" {key}="{}""#, escape_xml(attr.value()));
    }
    name
}

fn is_blank_text(node: &roxmltree::Node<'_, '_>) -> bool {
    node.is_text() && node.text().is_none_or(|t| t.trim().is_empty())
}

fn write_compact(out: &mut String, node: roxmltree::Node<'_, '_>) {
    let name = write_start_tag(out, node);
    let has_text = node
        .children()
        .any(|c| c.is_text() && !is_blank_text(&c));
    let children: Vec<_> = node
        .children()
        .filter(|c| c.is_element() || (c.is_text() && (has_text || !is_blank_text(c))))
        .collect();
    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in children {
        if child.is_element() {
            write_compact(out, child);
        } else if let Some(text) = child.text() {
            out.push_str(&escape_xml(text));
        }
    }
    let _ = write!(out, "</{name}>");
}

fn write_indented(out: &mut String, node: roxmltree::Node<'_, '_>, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);

    let has_text = node
        .children()
        .any(|c| c.is_text() && !is_blank_text(&c));
    if has_text {
        write_compact(out, node);
        out.push('\n');
        return;
    }

    let name = write_start_tag(out, node);
    let elements: Vec<_> = node.children().filter(|c| c.is_element()).collect();
    if elements.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for child in elements {
        write_indented(out, child, depth + 1);
    }
    let _ = writeln!(out, "{indent}</{name}>");
}
