//! SVG string primitives shared by the layout routines.

use std::fmt::Write as _;

use crate::RenderOptions;

/// Rounds to one decimal place the way JS `toFixed(1)` does and parses the result back.
/// Never returns `-0.0`.
pub fn round1(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    to_fixed1(v).parse().unwrap_or(0.0)
}

/// Geometry attribute form: always exactly one decimal.
pub fn fmt1(v: f64) -> String {
    if !v.is_finite() {
        return "0.0".to_string();
    }
    to_fixed1(v)
}

/// `toFixed(1)` rounds the exact binary value, so `30.95` (stored just below the tie) goes down.
/// Exact ties only occur at odd multiples of 0.25 and go away from zero.
fn to_fixed1(v: f64) -> String {
    let mag = v.abs();
    let quarters = mag * 4.0;
    let digits = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        format!("{:.1}", (mag * 10.0).ceil() / 10.0)
    } else {
        format!("{mag:.1}")
    };
    let is_zero = digits.bytes().all(|b| matches!(b, b'0' | b'.'));
    if v.is_sign_negative() && !is_zero {
        format!("-{digits}")
    } else {
        digits
    }
}

/// JS `Number#toString` form, used for option values echoed into attributes.
pub fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v == 0.0 { 0.0 } else { v };
    ryu_js::Buffer::new().format_finite(v).to_string()
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn fill(color: Option<&str>) -> String {
    escape_xml(color.unwrap_or("none"))
}

fn stroke_attrs(out: &mut String, opts: &RenderOptions) {
    let _ = write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        escape_xml(&opts.stroke_color),
        fmt(opts.stroke_width)
    );
}

pub fn push_line(out: &mut String, opts: &RenderOptions, x1: f64, y1: f64, x2: f64, y2: f64) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
        fmt1(x1),
        fmt1(y1),
        fmt1(x2),
        fmt1(y2)
    );
    stroke_attrs(out, opts);
    out.push_str("/>");
}

/// A node outline anchored at the local origin. `radius` adds `rx`/`ry`.
pub fn push_box_rect(out: &mut String, opts: &RenderOptions, w: f64, h: f64, radius: Option<f64>) {
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}""#,
        fmt1(w),
        fmt1(h)
    );
    if let Some(r) = radius {
        let r = fmt1(r);
        let _ = write!(out, r#" rx="{r}" ry="{r}""#);
    }
    stroke_attrs(out, opts);
    let _ = write!(
        out,
        r#" fill="{}"/>"#,
        fill(opts.background_color.as_deref())
    );
}

pub fn push_polygon(out: &mut String, opts: &RenderOptions, points: &[(f64, f64)]) {
    out.push_str(r#"<polygon points=""#);
    for (idx, (x, y)) in points.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", fmt1(*x), fmt1(*y));
    }
    out.push('"');
    stroke_attrs(out, opts);
    let _ = write!(
        out,
        r#" fill="{}"/>"#,
        fill(opts.background_color.as_deref())
    );
}

/// One `<text>` per line. `y` is the top of the first line box; the baseline sits one font size
/// below it and later lines are shifted with `dy`.
pub fn push_text(out: &mut String, opts: &RenderOptions, text: &str, x: f64, y: f64) {
    let font_family = escape_xml(&opts.font_family);
    let text_color = escape_xml(&opts.text_color);
    for (idx, line) in text.split('\n').enumerate() {
        let dy = idx as f64 * opts.font_size * opts.line_height;
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" dy="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
            fmt1(x),
            fmt1(y + opts.font_size),
            fmt1(dy),
            font_family,
            fmt(opts.font_size),
            text_color,
            escape_xml(line)
        );
    }
}

pub fn push_translated(out: &mut String, x: f64, y: f64, inner: &str) {
    let _ = write!(
        out,
        r#"<g transform="translate({}, {})">{}</g>"#,
        fmt1(x),
        fmt1(y),
        inner
    );
}

/// Wraps a laid-out diagram in the document element and a full-canvas background rectangle.
pub fn document(opts: &RenderOptions, width: f64, height: f64, body: &str) -> String {
    let w = fmt1(width);
    let h = fmt1(height);
    let mut out = String::with_capacity(body.len() + 256);
    let _ = write!(
        out,
        r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        fill(opts.base_background_color.as_deref())
    );
    push_translated(&mut out, opts.margin.left, opts.margin.top, body);
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_ties_go_away_from_zero() {
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(2.75), 2.8);
        assert_eq!(round1(16.8), 16.8);
        assert_eq!(round1(-0.04), 0.0);
        assert!(round1(-0.04).is_sign_positive());
    }

    #[test]
    fn round1_uses_the_stored_binary_value() {
        // Both are stored just below x.x5.
        assert_eq!(round1(30.95), 30.9);
        assert_eq!(round1(61.9 / 2.0), 30.9);
        assert_eq!(round1(1.15), 1.1);
        // 1.35 is stored just above, 1.45 just below.
        assert_eq!(round1(1.35), 1.4);
        assert_eq!(round1(1.45), 1.4);
        assert_eq!(round1(0.1 + 0.2), 0.3);
    }

    #[test]
    fn fmt1_always_has_one_decimal() {
        assert_eq!(fmt1(27.0), "27.0");
        assert_eq!(fmt1(0.1 + 0.2), "0.3");
        assert_eq!(fmt1(30.95), "30.9");
        assert_eq!(fmt1(-1.25), "-1.3");
        assert_eq!(fmt1(-0.01), "0.0");
        assert_eq!(fmt1(f64::NAN), "0.0");
    }

    #[test]
    fn fmt_matches_js_number_strings() {
        assert_eq!(fmt(14.0), "14");
        assert_eq!(fmt(1.5), "1.5");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1e-7), "1e-7");
        assert_eq!(fmt(1e21), "1e+21");
        assert_eq!(fmt(123456.0), "123456");
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_xml(r#"a<b & "c">'"#), "a&lt;b &amp; &quot;c&quot;&gt;&#39;");
    }

    #[test]
    fn multi_line_text_uses_dy() {
        let mut out = String::new();
        push_text(&mut out, &RenderOptions::default(), "a\nb", 10.0, 0.0);
        assert_eq!(out.matches("<text").count(), 2);
        assert!(out.contains(r#"x="10.0" y="14.0" dy="0.0""#));
        assert!(out.contains(r#"dy="16.8""#));
    }
}
