//! Bottom-up layout: every node is rendered into a [`Fragment`] after its children, and parents
//! position children by translation.

mod boxes;
mod branch;
mod list;

use spd_core::Node;

use crate::model::{Fragment, FragmentKind};
use crate::text::{TextMeasurer, TextMetrics, TextStyle};
use crate::RenderOptions;

use boxes::{Bars, BorderStyle};

pub(crate) struct LayoutCtx<'a> {
    pub options: &'a RenderOptions,
    measurer: &'a dyn TextMeasurer,
    style: TextStyle,
}

impl<'a> LayoutCtx<'a> {
    pub fn new(options: &'a RenderOptions, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            options,
            measurer,
            style: TextStyle {
                font_family: Some(options.font_family.clone()),
                font_size: options.font_size,
                line_height: options.line_height,
            },
        }
    }

    pub fn measure(&self, text: &str) -> TextMetrics {
        self.measurer.measure(text, &self.style)
    }

    /// Text extents plus branch padding on all sides.
    pub fn measure_branch_label(&self, text: &str) -> (f64, f64) {
        let m = self.measure(text);
        let p = &self.options.branch_padding;
        (m.width + p.horizontal(), m.height + p.vertical())
    }
}

pub(crate) fn render_node(ctx: &LayoutCtx<'_>, node: &Node) -> Fragment {
    let kind = FragmentKind::of(node);
    match node {
        Node::Process { text, child } => boxes::render_box(
            ctx,
            kind,
            text,
            child.as_deref(),
            BorderStyle::Box,
            Bars::NONE,
        ),
        Node::Terminal { text } => {
            boxes::render_box(ctx, kind, text, None, BorderStyle::Pill, Bars::NONE)
        }
        Node::Comment { text } => boxes::render_box(
            ctx,
            kind,
            &format!("({text})"),
            None,
            BorderStyle::None,
            Bars::NONE,
        ),
        Node::Call { text, child } => boxes::render_box(
            ctx,
            kind,
            text,
            child.as_deref(),
            BorderStyle::Box,
            Bars::BOTH,
        ),
        Node::Loop {
            text,
            is_while,
            child,
        } => boxes::render_box(
            ctx,
            kind,
            text,
            child.as_deref(),
            BorderStyle::Box,
            Bars {
                left: *is_while,
                right: !*is_while,
            },
        ),
        Node::If {
            text,
            true_branch,
            false_branch,
        } => branch::render_branches(
            ctx,
            kind,
            text,
            vec![
                ("", true_branch.as_deref()),
                ("", false_branch.as_deref()),
            ],
        ),
        Node::Switch { text, cases } => branch::render_branches(
            ctx,
            kind,
            text,
            cases
                .iter()
                .map(|(label, body)| (label.as_str(), body.as_ref()))
                .collect(),
        ),
        Node::NodeList { children } => list::render_list(ctx, children),
        other => {
            tracing::warn!(
                kind = %other.kind(),
                text = other.text().unwrap_or_default(),
                "node kind has no layout; drawing nothing"
            );
            Fragment::empty(FragmentKind::Unknown)
        }
    }
}
