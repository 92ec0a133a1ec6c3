//! The node tree produced by the parser and consumed by renderers.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered `case label -> body` mapping of a switch. Declaration order is the render order.
pub type SwitchCases = IndexMap<String, Option<Node>>;

/// One flow-chart primitive.
///
/// Single-statement contexts collapse to the statement itself; a [`Node::NodeList`] only exists
/// when two or more siblings share a context (and at the root, which is never collapsed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum Node {
    Process {
        text: String,
        child: Option<Box<Node>>,
    },
    Terminal {
        text: String,
    },
    Comment {
        text: String,
    },
    Call {
        text: String,
        child: Option<Box<Node>>,
    },
    /// `is_while == true` is a pre-test loop, `false` a post-test loop.
    Loop {
        text: String,
        is_while: bool,
        child: Option<Box<Node>>,
    },
    If {
        text: String,
        true_branch: Option<Box<Node>>,
        false_branch: Option<Box<Node>>,
    },
    Switch {
        text: String,
        cases: SwitchCases,
    },
    NodeList {
        children: Vec<Node>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Process,
    Terminal,
    Comment,
    Call,
    Loop,
    If,
    Switch,
    NodeList,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::Terminal => "terminal",
            Self::Comment => "comment",
            Self::Call => "call",
            Self::Loop => "loop",
            Self::If => "if",
            Self::Switch => "switch",
            Self::NodeList => "nodeList",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn process(text: impl Into<String>) -> Self {
        Self::Process {
            text: text.into(),
            child: None,
        }
    }

    pub fn terminal(text: impl Into<String>) -> Self {
        Self::Terminal { text: text.into() }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    pub fn call(text: impl Into<String>) -> Self {
        Self::Call {
            text: text.into(),
            child: None,
        }
    }

    pub fn while_loop(text: impl Into<String>) -> Self {
        Self::Loop {
            text: text.into(),
            is_while: true,
            child: None,
        }
    }

    pub fn do_while_loop(text: impl Into<String>) -> Self {
        Self::Loop {
            text: text.into(),
            is_while: false,
            child: None,
        }
    }

    pub fn if_else(
        text: impl Into<String>,
        true_branch: Option<Node>,
        false_branch: Option<Node>,
    ) -> Self {
        Self::If {
            text: text.into(),
            true_branch: true_branch.map(Box::new),
            false_branch: false_branch.map(Box::new),
        }
    }

    pub fn switch<L: Into<String>>(
        text: impl Into<String>,
        cases: impl IntoIterator<Item = (L, Option<Node>)>,
    ) -> Self {
        Self::Switch {
            text: text.into(),
            cases: cases.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn list(children: impl IntoIterator<Item = Node>) -> Self {
        Self::NodeList {
            children: children.into_iter().collect(),
        }
    }

    /// Sets the single child of a `Process`, `Call` or `Loop`. Other kinds are returned unchanged.
    pub fn with_child(mut self, node: Node) -> Self {
        if let Self::Process { child, .. } | Self::Call { child, .. } | Self::Loop { child, .. } =
            &mut self
        {
            *child = Some(Box::new(node));
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Process { .. } => NodeKind::Process,
            Self::Terminal { .. } => NodeKind::Terminal,
            Self::Comment { .. } => NodeKind::Comment,
            Self::Call { .. } => NodeKind::Call,
            Self::Loop { .. } => NodeKind::Loop,
            Self::If { .. } => NodeKind::If,
            Self::Switch { .. } => NodeKind::Switch,
            Self::NodeList { .. } => NodeKind::NodeList,
        }
    }

    /// Label text; `None` for a node list.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Process { text, .. }
            | Self::Terminal { text }
            | Self::Comment { text }
            | Self::Call { text, .. }
            | Self::Loop { text, .. }
            | Self::If { text, .. }
            | Self::Switch { text, .. } => Some(text),
            Self::NodeList { .. } => None,
        }
    }
}
