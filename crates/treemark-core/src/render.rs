//! Markdown rendering
//!
//! Each call returns its own fragment and callers concatenate, so no output
//! buffer is shared between nodes.

use crate::classify::{classify, NodeKind};
use crate::node::{DocTree, Node, TreePayload};
use crate::options::RenderOptions;

/// Render a complete document: title heading, body and trailing separator.
///
/// An absent or empty title falls back to `options.untitled`.
pub fn render_document(
    title: Option<&str>,
    payload: &TreePayload,
    options: &RenderOptions,
) -> String {
    let title = title
        .filter(|t| !t.is_empty())
        .unwrap_or(&options.untitled);
    let body = render_tree(&payload.decode(), options);

    format!("# {}\n\n{}{}", title, body, options.separator)
}

/// Render every top-level node of a tree in order
pub fn render_tree(tree: &DocTree, options: &RenderOptions) -> String {
    tree.nodes
        .iter()
        .map(|node| render_node(node, 0, options))
        .collect()
}

/// Render a node's own content followed by all of its descendants
pub fn render_node(node: &Node, depth: usize, options: &RenderOptions) -> String {
    let own = render_own(node, depth, options);
    let children = node
        .children
        .iter()
        .map(|child| render_node(child, depth + 1, options));

    std::iter::once(own).chain(children).collect()
}

fn render_own(node: &Node, depth: usize, options: &RenderOptions) -> String {
    let text = &node.text;

    match classify(node, depth, options.level_pattern) {
        NodeKind::Heading(level) => {
            format!("{} {}\n\n", "#".repeat(level as usize), text)
        }
        NodeKind::ListItem { indent } => {
            format!("{}- {}\n", options.indent_unit.repeat(indent), text)
        }
        NodeKind::Paragraph => format!("{}\n\n", text),
        NodeKind::Empty => String::new(),
    }
}
