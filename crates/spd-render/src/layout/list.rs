use spd_core::{Node, NodeKind};

use super::{LayoutCtx, render_node};
use crate::model::{Fragment, FragmentKind};
use crate::options::ListLayout;
use crate::svg::{self, round1};

/// Stacks children vertically with `node_list_spacing` between them and draws a vertical
/// connector between each consecutive pair.
///
/// Connectors attach to a terminal at its vertical midpoint and to any other node at its top edge.
pub(super) fn render_list(ctx: &LayoutCtx<'_>, children: &[Node]) -> Fragment {
    let kind = FragmentKind::Node(NodeKind::NodeList);
    if children.is_empty() {
        return Fragment::empty(kind);
    }

    let opts = ctx.options;
    let spacing = opts.node_list_spacing;
    let fragments: Vec<Fragment> = children.iter().map(|c| render_node(ctx, c)).collect();

    let mut total_height = 0.0;
    let mut max_width: f64 = 0.0;
    for f in &fragments {
        total_height = round1(total_height + f.height);
        max_width = round1(max_width.max(f.width));
    }

    let offsets = match opts.list_layout {
        ListLayout::Original => TerminalOffsets::default(),
        ListLayout::TerminalOffset => TerminalOffsets::compute(&fragments),
    };
    let terminal_offset = opts.list_layout == ListLayout::TerminalOffset;

    let last = fragments.len() - 1;
    let mut out = String::new();
    let mut current_y = 0.0;
    for (idx, fragment) in fragments.iter().enumerate() {
        let x = if idx == 0 {
            offsets.top
        } else if idx == last {
            offsets.bottom
        } else {
            offsets.line_x
        };
        svg::push_translated(&mut out, x, current_y, &fragment.svg);

        if idx < last {
            let next = &fragments[idx + 1];
            let start_y = if !fragment.kind.is_terminal() {
                round1(current_y)
            } else if terminal_offset && idx == 0 {
                // A leading terminal sits beside the line, which starts at its bottom edge.
                round1(current_y + fragment.height)
            } else {
                round1(current_y + fragment.height / 2.0)
            };
            let below = current_y + fragment.height + spacing;
            let end_y = if !next.kind.is_terminal() {
                round1(below + next.height)
            } else if terminal_offset && idx + 1 == last {
                round1(below)
            } else {
                round1(below + next.height / 2.0)
            };
            svg::push_line(&mut out, opts, offsets.line_x, start_y, offsets.line_x, end_y);
            total_height = round1(total_height + spacing);
        }
        current_y = round1(current_y + fragment.height + spacing);
    }

    Fragment {
        svg: out,
        width: round1(max_width + offsets.line_x),
        height: total_height,
        kind,
    }
}

/// Horizontal placement for [`ListLayout::TerminalOffset`]. All zero for the original layout.
#[derive(Debug, Default, Clone, Copy)]
struct TerminalOffsets {
    /// X of the connector line and of every middle child.
    line_x: f64,
    top: f64,
    bottom: f64,
}

impl TerminalOffsets {
    fn compute(fragments: &[Fragment]) -> Self {
        let mut out = Self::default();
        let (Some(first), Some(last)) = (fragments.first(), fragments.last()) else {
            return out;
        };
        if first.kind.is_terminal() {
            out.line_x = round1(first.width / 2.0);
        }
        if last.kind.is_terminal() {
            let bottom_center = round1(last.width / 2.0);
            if bottom_center > out.line_x {
                out.top = round1(bottom_center - out.line_x);
                out.line_x = bottom_center;
            } else {
                out.bottom = round1(out.line_x - bottom_center);
            }
        }
        out
    }
}
