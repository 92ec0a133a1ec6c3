//! Rendering parameters.
//!
//! [`RenderOptions`] is the fully resolved set; [`RenderOverrides`] is the partial form read from
//! JSON config files and command-line flags, applied with [`RenderOptions::merged`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Per-side lengths, in CSS order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Spacing {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// How a node list places its children horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListLayout {
    /// Every child at x = 0, connectors on the left edge.
    #[default]
    #[serde(rename = "original")]
    Original,
    /// A leading or trailing terminal is centered on the connector line.
    #[serde(
        rename = "TerminalOffset",
        alias = "terminalOffset",
        alias = "terminal-offset",
        alias = "terminal_offset"
    )]
    TerminalOffset,
}

impl ListLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::TerminalOffset => "TerminalOffset",
        }
    }
}

impl fmt::Display for ListLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list layout {0:?} (expected `original` or `TerminalOffset`)")]
pub struct ParseListLayoutError(pub String);

impl FromStr for ListLayout {
    type Err = ParseListLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "original" => Ok(Self::Original),
            "terminaloffset" => Ok(Self::TerminalOffset),
            _ => Err(ParseListLayoutError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub font_size: f64,
    pub font_family: String,
    /// Space around the whole diagram.
    pub margin: Spacing,
    pub box_padding: Spacing,
    /// Padding around `:if`/`:switch` condition text and branch labels.
    pub branch_padding: Spacing,
    pub stroke_width: f64,
    pub stroke_color: String,
    /// Fill of node shapes; `None` renders them unfilled.
    pub background_color: Option<String>,
    /// Fill of the full-canvas background rectangle; `None` leaves it transparent.
    pub base_background_color: Option<String>,
    pub text_color: String,
    pub line_height: f64,
    /// Inset of the vertical bars drawn on call and loop boxes.
    pub double_line_width: f64,
    pub case_notch_width: f64,
    pub node_list_spacing: f64,
    pub child_offset_width: f64,
    pub list_layout: ListLayout,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "sans-serif".to_string(),
            margin: Spacing::uniform(20.0),
            box_padding: Spacing::uniform(10.0),
            branch_padding: Spacing::uniform(5.0),
            stroke_width: 1.0,
            stroke_color: "#000000".to_string(),
            background_color: Some("#ffffff".to_string()),
            base_background_color: None,
            text_color: "#000000".to_string(),
            line_height: 1.2,
            double_line_width: 5.0,
            case_notch_width: 20.0,
            node_list_spacing: 10.0,
            child_offset_width: 20.0,
            list_layout: ListLayout::Original,
        }
    }
}

/// A sparse set of option values. Unset fields keep the value of the options they are merged into.
///
/// The two background colors distinguish "not given" from an explicit JSON `null`, which clears
/// the fill.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderOverrides {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub margin: Option<Spacing>,
    pub box_padding: Option<Spacing>,
    pub branch_padding: Option<Spacing>,
    pub stroke_width: Option<f64>,
    pub stroke_color: Option<String>,
    #[serde(deserialize_with = "explicit_null")]
    pub background_color: Option<Option<String>>,
    #[serde(deserialize_with = "explicit_null")]
    pub base_background_color: Option<Option<String>>,
    pub text_color: Option<String>,
    pub line_height: Option<f64>,
    pub double_line_width: Option<f64>,
    pub case_notch_width: Option<f64>,
    pub node_list_spacing: Option<f64>,
    pub child_offset_width: Option<f64>,
    pub list_layout: Option<ListLayout>,
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl RenderOverrides {
    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn or(self, other: RenderOverrides) -> RenderOverrides {
        RenderOverrides {
            font_size: other.font_size.or(self.font_size),
            font_family: other.font_family.or(self.font_family),
            margin: other.margin.or(self.margin),
            box_padding: other.box_padding.or(self.box_padding),
            branch_padding: other.branch_padding.or(self.branch_padding),
            stroke_width: other.stroke_width.or(self.stroke_width),
            stroke_color: other.stroke_color.or(self.stroke_color),
            background_color: other.background_color.or(self.background_color),
            base_background_color: other.base_background_color.or(self.base_background_color),
            text_color: other.text_color.or(self.text_color),
            line_height: other.line_height.or(self.line_height),
            double_line_width: other.double_line_width.or(self.double_line_width),
            case_notch_width: other.case_notch_width.or(self.case_notch_width),
            node_list_spacing: other.node_list_spacing.or(self.node_list_spacing),
            child_offset_width: other.child_offset_width.or(self.child_offset_width),
            list_layout: other.list_layout.or(self.list_layout),
        }
    }
}

impl RenderOptions {
    pub fn merged(&self, overrides: &RenderOverrides) -> RenderOptions {
        let o = overrides.clone();
        RenderOptions {
            font_size: o.font_size.unwrap_or(self.font_size),
            font_family: o.font_family.unwrap_or_else(|| self.font_family.clone()),
            margin: o.margin.unwrap_or(self.margin),
            box_padding: o.box_padding.unwrap_or(self.box_padding),
            branch_padding: o.branch_padding.unwrap_or(self.branch_padding),
            stroke_width: o.stroke_width.unwrap_or(self.stroke_width),
            stroke_color: o.stroke_color.unwrap_or_else(|| self.stroke_color.clone()),
            background_color: o
                .background_color
                .unwrap_or_else(|| self.background_color.clone()),
            base_background_color: o
                .base_background_color
                .unwrap_or_else(|| self.base_background_color.clone()),
            text_color: o.text_color.unwrap_or_else(|| self.text_color.clone()),
            line_height: o.line_height.unwrap_or(self.line_height),
            double_line_width: o.double_line_width.unwrap_or(self.double_line_width),
            case_notch_width: o.case_notch_width.unwrap_or(self.case_notch_width),
            node_list_spacing: o.node_list_spacing.unwrap_or(self.node_list_spacing),
            child_offset_width: o.child_offset_width.unwrap_or(self.child_offset_width),
            list_layout: o.list_layout.unwrap_or(self.list_layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_layout_parses_loosely() {
        assert_eq!("original".parse(), Ok(ListLayout::Original));
        assert_eq!("TerminalOffset".parse(), Ok(ListLayout::TerminalOffset));
        assert_eq!("terminal-offset".parse(), Ok(ListLayout::TerminalOffset));
        assert_eq!(" TERMINAL_OFFSET ".parse(), Ok(ListLayout::TerminalOffset));
        assert!("diagonal".parse::<ListLayout>().is_err());
    }

    #[test]
    fn overrides_only_touch_given_fields() {
        let overrides: RenderOverrides =
            serde_json::from_str(r##"{"fontSize": 20, "strokeColor": "#ff0000"}"##).unwrap();
        let merged = RenderOptions::default().merged(&overrides);
        assert_eq!(merged.font_size, 20.0);
        assert_eq!(merged.stroke_color, "#ff0000");
        assert_eq!(merged.font_family, "sans-serif");
        assert_eq!(merged.background_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn explicit_null_clears_background() {
        let overrides: RenderOverrides =
            serde_json::from_str(r#"{"backgroundColor": null}"#).unwrap();
        assert_eq!(overrides.background_color, Some(None));
        let merged = RenderOptions::default().merged(&overrides);
        assert_eq!(merged.background_color, None);

        let absent: RenderOverrides = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.background_color, None);
    }

    #[test]
    fn later_overrides_win() {
        let config: RenderOverrides =
            serde_json::from_str(r#"{"fontSize": 20, "lineHeight": 1.5}"#).unwrap();
        let flags = RenderOverrides {
            font_size: Some(12.0),
            ..Default::default()
        };
        let merged = RenderOptions::default().merged(&config.or(flags));
        assert_eq!(merged.font_size, 12.0);
        assert_eq!(merged.line_height, 1.5);
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        assert!(serde_json::from_str::<RenderOverrides>(r#"{"fontsize": 20}"#).is_err());
    }

    #[test]
    fn list_layout_from_json() {
        let overrides: RenderOverrides =
            serde_json::from_str(r#"{"listLayout": "TerminalOffset"}"#).unwrap();
        assert_eq!(overrides.list_layout, Some(ListLayout::TerminalOffset));
    }
}
