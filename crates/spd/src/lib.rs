#![forbid(unsafe_code)]

//! `spd` parses SPD, a tab-indented notation for structured program diagrams, and renders the
//! result to SVG without a browser.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`spd::render`)

pub use spd_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use spd_render::postprocess;
    pub use spd_render::text::{EastAsianWidthTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
    pub use spd_render::{
        Fragment, FragmentKind, ListLayout, RenderOptions, RenderOverrides, Renderer, Spacing,
    };

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] spd_core::Error),
        #[error(transparent)]
        Postprocess(#[from] spd_render::postprocess::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses `source` and renders it without post-processing. An empty program yields an empty
    /// string.
    pub fn render_svg_raw(source: &str, renderer: &Renderer) -> Result<String> {
        let tree = spd_core::parse(source)?;
        Ok(renderer.render(tree.as_ref()))
    }

    /// Parses and renders `source` as a minified SVG document.
    pub fn render_svg(source: &str, options: &RenderOptions) -> Result<String> {
        let svg = render_svg_raw(source, &Renderer::new(options.clone()))?;
        Ok(postprocess::minify(&svg)?)
    }

    /// Like [`render_svg`], with one element per line.
    pub fn render_svg_pretty(source: &str, options: &RenderOptions) -> Result<String> {
        let svg = render_svg_raw(source, &Renderer::new(options.clone()))?;
        Ok(postprocess::pretty_print(&svg)?)
    }

}
