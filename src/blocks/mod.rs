//! Block dispatcher for article dynamic zones.
//!
//! Each block carries a discriminator (`shared.rich-text`, `shared.quote`,
//! ...). [`BLOCKS`] maps discriminators to renderers; blocks that cannot be
//! rendered are skipped and reported, never fatal to the page.

mod media;
mod quote;
mod registry;
mod rich_text;
mod slider;
mod traits;

use maud::Markup;

use crate::cms::ContentBlock;

pub use registry::{BlockDiagnostic, BlockOutput, BlockRegistry};
pub use traits::{BlockError, BlockRenderer};

/// Global block renderer registry.
pub static BLOCKS: std::sync::LazyLock<BlockRegistry> = std::sync::LazyLock::new(|| {
    let mut registry = BlockRegistry::new();
    registry.register(Box::new(rich_text::RichTextRenderer::new()));
    registry.register(Box::new(media::MediaRenderer::new()));
    registry.register(Box::new(quote::QuoteRenderer::new()));
    registry.register(Box::new(slider::SliderRenderer::new()));
    registry
});

/// Render blocks with the global registry, keeping input order.
#[must_use]
pub fn render_blocks(blocks: &[ContentBlock]) -> Vec<Markup> {
    BLOCKS.render_blocks(blocks)
}
