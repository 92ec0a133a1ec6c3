use spd_core::Node;

use super::{LayoutCtx, render_node};
use crate::model::{Fragment, FragmentKind};
use crate::svg::{self, round1};

/// Lays out a decision: a condition box with a notched right edge, one anchor per branch down
/// that edge, and each branch body to the right of its anchor.
///
/// `:if` passes its true and false bodies with empty labels; `:switch` passes its cases in
/// declaration order. Fewer than two branches are padded with empty ones.
pub(super) fn render_branches(
    ctx: &LayoutCtx<'_>,
    kind: FragmentKind,
    text: &str,
    mut branches: Vec<(&str, Option<&Node>)>,
) -> Fragment {
    while branches.len() < 2 {
        branches.push(("", None));
    }
    let opts = ctx.options;
    let count = branches.len();
    let last = count - 1;

    let (cond_w, cond_h) = ctx.measure_branch_label(text);
    let min_height = cond_h;

    let mut label_w: f64 = 0.0;
    let mut subview_w: f64 = 0.0;
    let mut height = 0.0;
    let mut last_dy: f64 = 0.0;
    let mut last_ldy: f64 = 0.0;
    let mut anchors = Vec::with_capacity(count);
    let mut laid_out = Vec::with_capacity(count);

    for (idx, (label, body)) in branches.iter().enumerate() {
        let (lw, lh) = ctx.measure_branch_label(label);
        let fragment = body.map(|node| render_node(ctx, node));
        let (sub_w, mut sub_h) = fragment
            .as_ref()
            .map_or((0.0, 0.0), |f| (f.width, f.height));
        if idx != last {
            sub_h += opts.node_list_spacing;
        }
        label_w = label_w.max(lw);
        subview_w = subview_w.max(sub_w);

        // Room the label needs above and below its anchor.
        let (label_up, label_down) = if idx == 0 {
            (0.0, lh)
        } else if idx == last {
            (lh, 0.0)
        } else {
            let half = round1(lh / 2.0);
            (half, half)
        };

        if last_dy < label_up {
            last_dy = label_up;
        }
        let min_ldy = round1(if last_ldy > label_up {
            last_ldy * 2.0
        } else {
            label_up * 2.0
        });
        last_ldy = label_down;
        if min_ldy > last_dy {
            last_dy = min_ldy;
        }

        height = round1(height + last_dy);
        anchors.push(height);

        last_dy = label_down.max(sub_h);
        if last_dy < min_height && idx != last {
            last_dy = min_height;
        }
        laid_out.push((*label, (lw, lh), fragment));
    }
    height = round1(height + last_dy);

    let notch = opts.case_notch_width;
    let box_right = round1(cond_w + label_w + notch);
    let child_x = round1(box_right + opts.child_offset_width);

    let mut out = String::new();
    let mut points = vec![(0.0, 0.0)];
    let mut last_y = 0.0;
    let mut has_child = false;
    for (idx, (_, _, fragment)) in laid_out.iter().enumerate() {
        let y = round1(anchors[idx]);
        if let Some(fragment) = fragment {
            svg::push_translated(&mut out, child_x, y, &fragment.svg);
            svg::push_line(&mut out, opts, box_right, y, child_x, y);
            has_child = true;
        }
        if idx > 0 {
            points.push((round1(box_right - notch), round1((last_y + y) / 2.0)));
        }
        points.push((box_right, y));
        last_y = y;
    }
    points.push((0.0, round1(last_y)));

    svg::push_polygon(&mut out, opts, &points);

    let pad = &opts.branch_padding;
    for (idx, (label, (lw, lh), _)) in laid_out.iter().enumerate() {
        let mut y = round1(anchors[idx]);
        if idx == last {
            y = round1(y - lh);
        } else if idx > 0 {
            y = round1(y - lh / 2.0);
        }
        let x = round1(cond_w + label_w - lw);
        svg::push_text(&mut out, opts, label, x + pad.left, y + pad.top);
    }

    let cond_y = round1(last_y / 2.0 - cond_h / 2.0);
    svg::push_text(&mut out, opts, text, pad.left, cond_y + pad.top);

    let connector = if has_child {
        opts.child_offset_width
    } else {
        0.0
    };
    let width = round1(box_right + subview_w + connector);
    Fragment {
        svg: out,
        width,
        height,
        kind,
    }
}
