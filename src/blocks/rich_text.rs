use maud::{html, Markup, PreEscaped};

use super::traits::{BlockError, BlockRenderer};
use crate::cms::ContentBlock;

/// `shared.rich-text`: an HTML fragment authored in the backend editor.
pub struct RichTextRenderer;

impl RichTextRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BlockRenderer for RichTextRenderer {
    fn component(&self) -> &'static str {
        "shared.rich-text"
    }

    fn render(&self, block: &ContentBlock) -> Result<Markup, BlockError> {
        // Older content types stored the fragment under `body`.
        let content = block
            .text("content")
            .or_else(|| block.text("body"))
            .ok_or_else(|| self.missing("content"))?;

        Ok(html! {
            div class="block block-rich-text prose" {
                (PreEscaped(content))
            }
        })
    }
}
