//! View renderers.

mod html;

pub use html::HtmlRenderer;
