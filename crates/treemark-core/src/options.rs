//! Configuration options for Markdown rendering

/// How the number is extracted from a `level-N` class token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPattern {
    /// Match `level-` followed by decimal digits
    #[default]
    Digits,
    /// Match `level-` followed by a literal backslash and `d` characters.
    /// The number never parses, so deep nesting is only detected by depth
    /// and is never indented.
    Legacy,
}

/// Options for Markdown rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Leading whitespace added per indentation level of a list item
    pub indent_unit: String,

    /// Title used when a topic has none
    pub untitled: String,

    /// Text appended after the document body
    pub separator: String,

    /// Level number extraction
    pub level_pattern: LevelPattern,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_unit: "\t".to_string(),
            untitled: "Untitled".to_string(),
            separator: "\n---\n".to_string(),
            level_pattern: LevelPattern::Digits,
        }
    }
}
