#![forbid(unsafe_code)]

//! Headless layout and SVG rendering for SPD node trees.
//!
//! ```
//! let tree = spd_core::parse("start\n:call work\nend").unwrap();
//! let svg = spd_render::render(tree.as_ref(), &spd_render::RenderOptions::default());
//! assert!(svg.starts_with("<svg "));
//! ```

mod layout;
pub mod model;
pub mod options;
pub mod postprocess;
pub mod svg;
pub mod text;

use std::sync::Arc;

use spd_core::Node;

pub use crate::model::{Fragment, FragmentKind};
pub use crate::options::{ListLayout, RenderOptions, RenderOverrides, Spacing};
use crate::text::{EastAsianWidthTextMeasurer, TextMeasurer};

/// Renders node trees with a fixed set of options and a text measurer.
#[derive(Clone)]
pub struct Renderer {
    pub options: RenderOptions,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            text_measurer: Arc::new(EastAsianWidthTextMeasurer),
        }
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }

    /// Lays out `node` without the document wrapper.
    pub fn layout(&self, node: &Node) -> Fragment {
        let ctx = layout::LayoutCtx::new(&self.options, self.text_measurer.as_ref());
        layout::render_node(&ctx, node)
    }

    /// Renders a complete SVG document. `None` (an empty program) yields an empty string.
    pub fn render(&self, node: Option<&Node>) -> String {
        let Some(node) = node else {
            return String::new();
        };
        let fragment = self.layout(node);
        let opts = &self.options;
        let width = fragment.width + opts.margin.horizontal();
        let height = fragment.height + opts.margin.vertical();
        tracing::debug!(
            kind = ?fragment.kind,
            width,
            height,
            "rendered diagram"
        );
        svg::document(opts, width, height, &fragment.svg)
    }
}

/// Renders with the default text measurer.
pub fn render(node: Option<&Node>, options: &RenderOptions) -> String {
    Renderer::new(options.clone()).render(node)
}

#[cfg(test)]
mod tests;
