//! Node classification
//!
//! Maps a node's class tag and depth to the Markdown construct it becomes.
//! Checks run in a fixed priority order and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::node::Node;
use crate::options::LevelPattern;

/// Depth beyond which any node renders as an indented list item
pub const MAX_PLAIN_DEPTH: usize = 6;

/// Levels above this one are rendered as list items indented by `level - 5`
const LIST_BASE_LEVEL: usize = 5;

static LEVEL_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"level-(\d+)").expect("valid level regex"));

static LEVEL_LEGACY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"level-(\\d+)").expect("valid legacy level regex"));

/// The Markdown construct a node's own content becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// ATX heading of the given level (2-4)
    Heading(u8),
    /// Bullet item preceded by `indent` indentation units
    ListItem { indent: usize },
    /// Plain paragraph
    Paragraph,
    /// Nothing is emitted for the node itself
    Empty,
}

/// Extract the number of the first `level-N` token in a class tag
pub fn level_number(class: &str, pattern: LevelPattern) -> Option<u32> {
    let regex = match pattern {
        LevelPattern::Digits => &LEVEL_DIGITS,
        LevelPattern::Legacy => &LEVEL_LEGACY,
    };
    regex.captures(class)?.get(1)?.as_str().parse().ok()
}

/// Classify a node at the given depth (top-level nodes are depth 0)
///
/// A blank node (no class, no text, no children) is always `Empty`, at any
/// depth.
pub fn classify(node: &Node, depth: usize, pattern: LevelPattern) -> NodeKind {
    if node.is_blank() {
        return NodeKind::Empty;
    }

    let class = node.class.as_str();

    if class.contains("level-2") {
        return NodeKind::Heading(2);
    }
    if class.contains("level-3") {
        return NodeKind::Heading(3);
    }
    if class.contains("level-4") {
        return NodeKind::Heading(4);
    }
    if class.contains("level-5") {
        return NodeKind::ListItem { indent: 0 };
    }
    if class.contains("level-6") {
        return NodeKind::ListItem { indent: 1 };
    }

    let level = if class.contains("level-") {
        level_number(class, pattern)
    } else {
        None
    };
    let deep_level = level.is_some_and(|n| n as usize > MAX_PLAIN_DEPTH);

    if depth > MAX_PLAIN_DEPTH || deep_level {
        let indent = match level {
            Some(n) => (n as usize).saturating_sub(LIST_BASE_LEVEL).max(1),
            None => 0,
        };
        return NodeKind::ListItem { indent };
    }

    if !node.text.is_empty() {
        NodeKind::Paragraph
    } else {
        NodeKind::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(class: &str, text: &str, depth: usize) -> NodeKind {
        classify(&Node::new(class, text), depth, LevelPattern::Digits)
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(kind("level-2", "x", 0), NodeKind::Heading(2));
        assert_eq!(kind("para level-3", "x", 0), NodeKind::Heading(3));
        assert_eq!(kind("level-4", "x", 0), NodeKind::Heading(4));
    }

    #[test]
    fn test_heading_priority() {
        assert_eq!(kind("level-4 level-2", "x", 0), NodeKind::Heading(2));
        assert_eq!(kind("level-4 level-3", "x", 0), NodeKind::Heading(3));
        // substring match: level-20 contains level-2
        assert_eq!(kind("level-20", "x", 0), NodeKind::Heading(2));
    }

    #[test]
    fn test_heading_wins_over_depth() {
        assert_eq!(kind("level-3", "x", 9), NodeKind::Heading(3));
    }

    #[test]
    fn test_list_levels() {
        assert_eq!(kind("level-5", "x", 0), NodeKind::ListItem { indent: 0 });
        assert_eq!(kind("level-6", "x", 0), NodeKind::ListItem { indent: 1 });
    }

    #[test]
    fn test_deep_levels() {
        assert_eq!(kind("level-7", "x", 0), NodeKind::ListItem { indent: 2 });
        assert_eq!(kind("level-9", "x", 0), NodeKind::ListItem { indent: 4 });
        assert_eq!(kind("level-12", "x", 0), NodeKind::ListItem { indent: 7 });
    }

    #[test]
    fn test_deep_depth_without_level() {
        assert_eq!(kind("", "x", 7), NodeKind::ListItem { indent: 0 });
        assert_eq!(kind("level-1", "x", 7), NodeKind::ListItem { indent: 1 });
        assert_eq!(kind("", "x", 6), NodeKind::Paragraph);
    }

    #[test]
    fn test_blank_node_is_empty_at_any_depth() {
        assert_eq!(kind("", "", 0), NodeKind::Empty);
        assert_eq!(kind("", "", 7), NodeKind::Empty);
        assert_eq!(kind("", "", 40), NodeKind::Empty);
    }

    #[test]
    fn test_textless_node_with_children_below_depth_six() {
        let node = Node::default().with_child(Node::new("", "x"));
        assert_eq!(
            classify(&node, 7, LevelPattern::Digits),
            NodeKind::ListItem { indent: 0 }
        );
    }

    #[test]
    fn test_paragraph_and_empty() {
        assert_eq!(kind("", "text", 0), NodeKind::Paragraph);
        assert_eq!(kind("level-1", "text", 0), NodeKind::Paragraph);
        assert_eq!(kind("", "", 0), NodeKind::Empty);
        assert_eq!(kind("level-x", "", 3), NodeKind::Empty);
    }

    #[test]
    fn test_level_number() {
        assert_eq!(level_number("a level-9 b", LevelPattern::Digits), Some(9));
        assert_eq!(level_number("level-", LevelPattern::Digits), None);
        assert_eq!(level_number("level-99999999999", LevelPattern::Digits), None);
        assert_eq!(level_number("level-9", LevelPattern::Legacy), None);
        assert_eq!(level_number(r"level-\dd", LevelPattern::Legacy), None);
    }

    #[test]
    fn test_legacy_pattern_never_indents() {
        let node = Node::new("level-9", "x");
        assert_eq!(classify(&node, 0, LevelPattern::Legacy), NodeKind::Paragraph);
        assert_eq!(
            classify(&node, 7, LevelPattern::Legacy),
            NodeKind::ListItem { indent: 0 }
        );
    }
}
