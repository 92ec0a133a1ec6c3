
use crate::Node;

/// Unwraps the root node list produced by a successful parse.
fn root_children(source: &str) -> Vec<Node> {
    match crate::parse(source).expect("parse ok") {
        Some(Node::NodeList { children }) => children,
        other => panic!("expected a root node list, got {other:?}"),
    }
}
