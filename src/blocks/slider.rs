use maud::{Markup, Render};

use super::traits::{BlockError, BlockRenderer};
use crate::cms::ContentBlock;
use crate::components::Carousel;

/// `shared.slider`: a gallery of uploaded images.
pub struct SliderRenderer;

impl SliderRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BlockRenderer for SliderRenderer {
    fn component(&self) -> &'static str {
        "shared.slider"
    }

    fn render(&self, block: &ContentBlock) -> Result<Markup, BlockError> {
        let images = block.images("files");
        if images.is_empty() {
            return Err(self.missing("files"));
        }

        let id = block
            .fields
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .map_or_else(|| "slider".to_string(), |id| format!("slider-{id}"));

        Ok(Carousel::new(&id, images).render())
    }
}
