use maud::{Markup, Render};

use super::traits::{BlockError, BlockRenderer};
use crate::cms::ContentBlock;
use crate::components::Figure;

/// `shared.media`: a single uploaded file with an optional caption.
pub struct MediaRenderer;

impl MediaRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BlockRenderer for MediaRenderer {
    fn component(&self) -> &'static str {
        "shared.media"
    }

    fn render(&self, block: &ContentBlock) -> Result<Markup, BlockError> {
        let image = block.image("file").ok_or_else(|| self.missing("file"))?;
        Ok(Figure::new(image)
            .caption(block.text("caption"))
            .with_class("block block-media")
            .render())
    }
}
