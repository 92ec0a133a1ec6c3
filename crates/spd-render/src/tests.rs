use super::*;
use spd_core::Node;

fn layout(node: &Node) -> Fragment {
    Renderer::default().layout(node)
}

fn layout_with(node: &Node, options: RenderOptions) -> Fragment {
    Renderer::new(options).layout(node)
}

#[test]
fn empty_program_renders_nothing() {
    assert_eq!(render(None, &RenderOptions::default()), "");
}

#[test]
fn single_process_geometry() {
    let f = layout(&Node::process("A"));
    assert_eq!((f.width, f.height), (27.0, 36.8));
    assert!(f.svg.starts_with(
        r##"<rect x="0" y="0" width="27.0" height="36.8" stroke="#000000" stroke-width="1" fill="#ffffff"/>"##
    ));
    assert!(f.svg.contains(r#"<text x="10.0" y="24.0" dy="0.0""#));
}

#[test]
fn document_adds_margins_and_background() {
    let svg = render(Some(&Node::list([Node::process("A")])), &RenderOptions::default());
    assert!(svg.starts_with(
        r#"<svg width="67.0" height="76.8" viewBox="0 0 67.0 76.8" xmlns="http://www.w3.org/2000/svg"><rect x="0" y="0" width="67.0" height="76.8" fill="none"/><g transform="translate(20.0, 20.0)">"#
    ));
    assert!(svg.ends_with("</g></svg>"));

    let opts = RenderOptions {
        base_background_color: Some("#eeeeee".to_string()),
        ..Default::default()
    };
    let svg = render(Some(&Node::process("A")), &opts);
    assert!(svg.contains(r##"height="76.8" fill="#eeeeee"/>"##));
}

#[test]
fn terminal_is_a_pill() {
    let f = layout(&Node::terminal("A"));
    // Text width plus one box height for the two caps.
    assert_eq!(f.width, 43.8);
    assert!(f.svg.contains(r#"rx="18.4" ry="18.4""#));
    assert!(f.svg.contains(r#"<text x="18.4" y="24.0""#));
}

#[test]
fn call_has_both_bars() {
    let f = layout(&Node::call("A"));
    assert_eq!(f.svg.matches("<rect").count(), 1);
    assert_eq!(f.svg.matches("<line").count(), 2);
    assert!(f.svg.contains(r#"<line x1="5.0" y1="0.0" x2="5.0" y2="36.8""#));
    assert!(f.svg.contains(r#"<line x1="22.0" y1="0.0" x2="22.0" y2="36.8""#));
}

#[test]
fn loop_bar_side_depends_on_test_position() {
    let pre = layout(&Node::while_loop("A"));
    assert!(pre.svg.contains(r#"<line x1="5.0""#));
    assert_eq!(pre.svg.matches("<line").count(), 1);

    let post = layout(&Node::do_while_loop("A"));
    assert!(post.svg.contains(r#"<line x1="22.0""#));
    assert_eq!(post.svg.matches("<line").count(), 1);
}

#[test]
fn comment_has_no_outline() {
    let f = layout(&Node::comment("note"));
    assert!(!f.svg.contains("<rect"));
    assert!(f.svg.contains(">(note)</text>"));
    assert!(f.svg.contains(r#"<text x="10.0" y="14.0""#));
    assert_eq!(f.width, 62.0);
}

#[test]
fn child_sits_to_the_right_with_connector() {
    let f = layout(&Node::process("A").with_child(Node::process("B")));
    assert_eq!(f.width, 74.0);
    assert!(f.svg.contains(r#"<g transform="translate(47.0, 0.0)">"#));
    assert!(f.svg.contains(r#"<line x1="27.0" y1="0.0" x2="47.0" y2="0.0""#));
}

#[test]
fn empty_if_is_a_notched_box() {
    let f = layout(&Node::if_else("c", None, None));
    assert_eq!((f.width, f.height), (47.0, 53.6));
    assert!(f.svg.contains(
        r#"<polygon points="0.0,0.0 47.0,0.0 27.0,26.8 47.0,53.6 0.0,53.6""#
    ));
    assert!(!f.svg.contains("<g "));
}

#[test]
fn if_branches_hang_off_anchors() {
    let node = Node::if_else("c", Some(Node::process("T")), Some(Node::process("F")));
    let f = layout(&node);
    assert!(f.svg.contains(r#"<g transform="translate(67.0, 0.0)">"#));
    assert!(f.svg.contains(r#"<line x1="47.0" y1="0.0" x2="67.0" y2="0.0""#));
    // Box edge, connector and branch body.
    assert_eq!(f.width, 47.0 + 20.0 + 27.0);
    assert_eq!(f.svg.matches("<g ").count(), 2);
}

#[test]
fn switch_has_one_anchor_per_case() {
    let node = Node::switch(
        "x",
        [
            ("a", Some(Node::process("A"))),
            ("b", None),
            ("c", Some(Node::process("C"))),
        ],
    );
    let f = layout(&node);
    let points = f
        .svg
        .split(r#"points=""#)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    // Start, three anchors, two notches, end.
    assert_eq!(points.split(' ').count(), 7);
    assert_eq!(f.svg.matches("<g ").count(), 2);
    for label in [">a</text>", ">b</text>", ">c</text>", ">x</text>"] {
        assert!(f.svg.contains(label), "missing {label}");
    }
}

#[test]
fn switch_ymap_clears_tall_middle_labels() {
    // Two-line condition, a three-line middle label without a body, and bodies of different
    // heights on the outer cases.
    let node = Node::switch(
        "which\nkey",
        [
            ("a", Some(Node::process("one"))),
            ("tall\nlabel\nhere", None),
            ("z", Some(Node::process("four\nfive\nsix"))),
        ],
    );
    let f = layout(&node);
    // Last anchor plus the last body, which gets no trailing spacing.
    assert_eq!((f.width, f.height), (178.0, 191.2));

    // Second anchor: twice the middle label's half height (30.2). Third anchor: twice the middle
    // label's lower half, past the condition-height minimum (43.6) the empty middle case gets.
    assert!(f.svg.contains(
        r#"<polygon points="0.0,0.0 110.0,0.0 90.0,30.2 110.0,60.4 90.0,90.6 110.0,120.8 0.0,120.8""#
    ));
    assert!(f.svg.contains(r#"<g transform="translate(130.0, 0.0)">"#));
    assert!(f.svg.contains(r#"<g transform="translate(130.0, 120.8)">"#));
    assert!(f.svg.contains(r#"<line x1="110.0" y1="120.8" x2="130.0" y2="120.8""#));
    assert_eq!(f.svg.matches("<g ").count(), 2);

    // Labels are right-aligned against the notch. The first hangs below its anchor, the middle
    // one is centered on it and the last sits above it.
    assert!(f.svg.contains(r##"<text x="78.0" y="19.0" dy="0.0" font-family="sans-serif" font-size="14" fill="#000000">a</text>"##));
    assert!(f.svg.contains(r##"<text x="50.0" y="49.2" dy="0.0" font-family="sans-serif" font-size="14" fill="#000000">tall</text>"##));
    assert!(f.svg.contains(r##"<text x="50.0" y="49.2" dy="33.6" font-family="sans-serif" font-size="14" fill="#000000">here</text>"##));
    assert!(f.svg.contains(r##"<text x="78.0" y="113.0" dy="0.0" font-family="sans-serif" font-size="14" fill="#000000">z</text>"##));

    // The condition is centered on the last anchor, not on the full height.
    assert!(f.svg.contains(r##"<text x="5.0" y="57.6" dy="0.0" font-family="sans-serif" font-size="14" fill="#000000">which</text>"##));
    assert!(f.svg.contains(r##"<text x="5.0" y="57.6" dy="16.8" font-family="sans-serif" font-size="14" fill="#000000">key</text>"##));
}

#[test]
fn switch_non_last_bodies_keep_list_spacing() {
    let node = Node::switch(
        "k",
        [
            ("a", Some(Node::list([Node::process("A"), Node::process("B")]))),
            ("b", Some(Node::process("C"))),
        ],
    );
    let f = layout(&node);
    // 83.6 tall body plus 10 spacing before the second anchor.
    assert!(f.svg.contains(r#"<g transform="translate(74.0, 93.6)">"#));
    assert_eq!(f.height, 130.4);
}

#[test]
fn rounding_follows_the_stored_binary_value() {
    let opts = RenderOptions {
        font_size: 15.5,
        line_height: 1.35,
        ..Default::default()
    };
    let f = layout_with(&Node::if_else("a", None, None), opts);
    // 47.75 is an exact tie and goes up. The notch sits at 61.9 / 2, which is stored just below
    // 30.95 and goes down.
    assert!(f.svg.contains(
        r#"<polygon points="0.0,0.0 47.8,0.0 27.8,30.9 47.8,61.9 0.0,61.9""#
    ));
    assert_eq!((f.width, f.height), (47.8, 61.9));
    assert!(f.svg.contains(r#"font-size="15.5""#));
}

#[test]
fn switch_without_cases_still_draws_two_anchors() {
    let f = layout(&Node::switch::<&str>("x", []));
    assert!(f.svg.contains("<polygon"));
    assert_eq!(f.width, 47.0);
}

#[test]
fn list_stacks_and_connects_tops() {
    let f = layout(&Node::list([Node::process("A"), Node::process("B")]));
    assert_eq!((f.width, f.height), (27.0, 83.6));
    assert!(f.svg.contains(r#"<g transform="translate(0.0, 46.8)">"#));
    assert!(f.svg.contains(r#"<line x1="0.0" y1="0.0" x2="0.0" y2="83.6""#));
}

#[test]
fn list_connects_terminals_at_their_middle() {
    let f = layout(&Node::list([Node::terminal("A"), Node::terminal("B")]));
    assert!(f.svg.contains(r#"<line x1="0.0" y1="18.4" x2="0.0" y2="65.2""#));
}

#[test]
fn terminal_offset_centers_terminals_on_the_line() {
    let nodes = Node::list([
        Node::terminal("A"),
        Node::process("B"),
        Node::terminal("C"),
    ]);
    let original = layout(&nodes);
    assert_eq!(original.width, 43.8);

    let opts = RenderOptions {
        list_layout: ListLayout::TerminalOffset,
        ..Default::default()
    };
    let offset = layout_with(&nodes, opts);
    assert_eq!(offset.width, 65.7);
    assert_eq!(offset.height, original.height);
    assert!(offset.svg.contains(r#"<g transform="translate(21.9, 46.8)">"#));
    // Starts under the first terminal and stops at the top of the last one.
    assert!(offset.svg.contains(r#"<line x1="21.9" y1="36.8" x2="21.9" y2="83.6""#));
    assert!(offset.svg.contains(r#"<line x1="21.9" y1="46.8" x2="21.9" y2="93.6""#));
}

#[test]
fn terminal_offset_is_a_no_op_without_terminals() {
    let nodes = Node::list([Node::process("A"), Node::call("B"), Node::process("C")]);
    let opts = RenderOptions {
        list_layout: ListLayout::TerminalOffset,
        ..Default::default()
    };
    assert_eq!(layout(&nodes), layout_with(&nodes, opts));
}

#[test]
fn empty_list_has_no_extent() {
    let f = layout(&Node::list([]));
    assert_eq!((f.width, f.height), (0.0, 0.0));
    assert!(f.svg.is_empty());
}

#[test]
fn text_is_escaped() {
    let f = layout(&Node::process("a<b & \"c\""));
    assert!(f.svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
}

#[test]
fn unfilled_shapes_without_background() {
    let opts = RenderOptions {
        background_color: None,
        ..Default::default()
    };
    let f = layout_with(&Node::process("A"), opts);
    assert!(f.svg.contains(r#"fill="none"/>"#));
}

#[test]
fn output_is_deterministic() {
    let node = Node::list([
        Node::terminal("start"),
        Node::if_else("ok?", Some(Node::call("go")), None),
        Node::terminal("end"),
    ]);
    let a = render(Some(&node), &RenderOptions::default());
    let b = render(Some(&node), &RenderOptions::default());
    assert_eq!(a, b);
}

#[test]
fn custom_measurer_is_used() {
    struct Fixed;
    impl crate::text::TextMeasurer for Fixed {
        fn measure(&self, _: &str, _: &crate::text::TextStyle) -> crate::text::TextMetrics {
            crate::text::TextMetrics {
                width: 100.0,
                height: 10.0,
                line_count: 1,
            }
        }
    }
    let renderer = Renderer::default().with_text_measurer(Arc::new(Fixed));
    let f = renderer.layout(&Node::process("A"));
    assert_eq!((f.width, f.height), (120.0, 30.0));
}
