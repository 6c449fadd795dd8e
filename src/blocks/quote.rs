use maud::{html, Markup};

use super::traits::{BlockError, BlockRenderer};
use crate::cms::ContentBlock;

/// `shared.quote`: quotation text with optional attribution.
pub struct QuoteRenderer;

impl QuoteRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BlockRenderer for QuoteRenderer {
    fn component(&self) -> &'static str {
        "shared.quote"
    }

    fn render(&self, block: &ContentBlock) -> Result<Markup, BlockError> {
        let quote = block.text("quote").ok_or_else(|| self.missing("quote"))?;
        let author = block.text("author");

        Ok(html! {
            blockquote class="block block-quote" {
                p { (quote) }
                @if let Some(author) = author {
                    footer { cite { (author) } }
                }
            }
        })
    }
}
