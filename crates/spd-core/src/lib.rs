#![forbid(unsafe_code)]

//! SPD (Simple PAD Description) parser + node model (headless).
//!
//! SPD is a tab-indented, line-oriented notation for structured program diagrams (PAD). The
//! parser turns it into a [`Node`] tree that renderers walk read-only.
//!
//! ```
//! use spd_core::{Node, parse};
//!
//! let root = parse(":terminal start\nwork\n:terminal end")?.expect("non-empty source");
//! let Node::NodeList { children } = root else {
//!     unreachable!("the root is always a node list");
//! };
//! assert_eq!(children[1], Node::process("work"));
//! # Ok::<(), spd_core::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod parser;

pub use error::{Error, Result};
pub use model::{Node, NodeKind, SwitchCases};
pub use parser::{CONTINUATION_MARKER, is_comment_line, parse, parse_with_recovery};

#[cfg(test)]
mod tests;
