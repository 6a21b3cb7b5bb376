//! treemark-core - Document tree model and Markdown rendering
//!
//! This crate turns a topic's document tree into a Markdown page. Every node
//! carries a class tag, its own text and ordered children; the `level-N`
//! token inside the class tag decides whether the node becomes a heading,
//! a list item or a paragraph.
//!
//! # Architecture
//!
//! ```text
//! JSON text ──decode──▶ ┌──────────┐
//!                       │          │
//!                       │ DocTree  │ ──classify/render──▶ Markdown String
//! JSON value ──────────▶│          │
//!                       └──────────┘
//! ```
//!
//! Rendering is total: malformed payloads, missing fields and unparsable
//! level numbers degrade to less output, never to an error.
//!
//! # Example
//!
//! ```rust
//! use treemark_core::{render_document, RenderOptions, TreePayload};
//!
//! let payload = TreePayload::Raw(
//!     r#"[{"DOMnodeClass": "level-2", "DOMinnerText": "Heading",
//!          "DOMchildArray": [{"DOMnodeClass": "level-5", "DOMinnerText": "Point"}]}]"#
//!         .to_string(),
//! );
//!
//! let markdown = render_document(Some("Demo"), &payload, &RenderOptions::default());
//! assert_eq!(markdown, "# Demo\n\n## Heading\n\n- Point\n\n---\n");
//! ```

mod classify;
mod node;
mod options;
mod render;

pub use classify::{classify, level_number, NodeKind};
pub use node::{DocTree, Node, TreePayload};
pub use options::{LevelPattern, RenderOptions};
pub use render::{render_document, render_node, render_tree};
