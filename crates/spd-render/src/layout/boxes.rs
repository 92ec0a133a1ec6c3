use spd_core::Node;

use super::{LayoutCtx, render_node};
use crate::model::{Fragment, FragmentKind};
use crate::svg::{self, round1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BorderStyle {
    Box,
    /// Fully rounded ends; the horizontal room for the caps equals the box height.
    Pill,
    None,
}

/// Inner vertical bars, inset by `double_line_width` from the box edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bars {
    pub left: bool,
    pub right: bool,
}

impl Bars {
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };
}

/// Lays out a labelled box with an optional child to its right, joined by a horizontal connector
/// at the box's top edge.
pub(super) fn render_box(
    ctx: &LayoutCtx<'_>,
    kind: FragmentKind,
    text: &str,
    child: Option<&Node>,
    border: BorderStyle,
    bars: Bars,
) -> Fragment {
    let opts = ctx.options;
    let metrics = ctx.measure(text);

    let mut width = metrics.width;
    let mut height = metrics.height;
    let mut text_x = opts.box_padding.left;
    let mut text_y = 0.0;

    let mut out = String::new();
    match border {
        BorderStyle::Box => {
            width += opts.box_padding.horizontal();
            height += opts.box_padding.vertical();
            text_y += opts.box_padding.top;
            svg::push_box_rect(&mut out, opts, width, height, None);
        }
        BorderStyle::Pill => {
            height += opts.box_padding.vertical();
            text_y += opts.box_padding.top;
            let radius = height / 2.0;
            width += height;
            text_x = radius;
            svg::push_box_rect(&mut out, opts, width, height, Some(radius));
        }
        BorderStyle::None => {
            width += opts.box_padding.horizontal();
        }
    }

    if bars.left {
        let x = opts.double_line_width;
        svg::push_line(&mut out, opts, x, 0.0, x, height);
    }
    if bars.right {
        let x = width - opts.double_line_width;
        svg::push_line(&mut out, opts, x, 0.0, x, height);
    }

    svg::push_text(&mut out, opts, text, text_x, text_y);

    let mut total_width = width;
    let mut total_height = height;
    if let Some(child) = child {
        let fragment = render_node(ctx, child);
        let offset = opts.child_offset_width;
        svg::push_translated(&mut out, width + offset, 0.0, &fragment.svg);
        svg::push_line(&mut out, opts, width, 0.0, width + offset, 0.0);
        total_width += fragment.width + offset;
        total_height = total_height.max(fragment.height);
    }

    Fragment {
        svg: out,
        width: round1(total_width),
        height: round1(total_height),
        kind,
    }
}
