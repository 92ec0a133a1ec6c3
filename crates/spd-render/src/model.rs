use serde::Serialize;
use spd_core::{Node, NodeKind};

/// Kind tag of a laid-out fragment. `Unknown` marks node kinds this renderer does not draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentKind {
    Node(NodeKind),
    Unknown,
}

impl FragmentKind {
    pub fn of(node: &Node) -> Self {
        Self::Node(node.kind())
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Node(NodeKind::Terminal)
    }
}

/// A rendered subtree in its own coordinate space, with its top-left corner at the origin.
///
/// Parents place fragments by wrapping `svg` in a translated group, so a fragment never needs to
/// know where it ends up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub svg: String,
    pub width: f64,
    pub height: f64,
    pub kind: FragmentKind,
}

impl Fragment {
    pub fn empty(kind: FragmentKind) -> Self {
        Self {
            svg: String::new(),
            width: 0.0,
            height: 0.0,
            kind,
        }
    }
}
