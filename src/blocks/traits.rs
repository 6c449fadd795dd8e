use maud::Markup;
use thiserror::Error;

use crate::cms::ContentBlock;

/// Why a block produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Neither `__component` nor `type` carried a value.
    #[error("block has no discriminator")]
    MissingDiscriminator,

    /// No renderer is registered for the discriminator.
    #[error("no renderer for block type '{0}'")]
    UnknownDiscriminator(String),

    /// The renderer's required field is absent or empty.
    #[error("{component} block is missing required field '{field}'")]
    MissingField {
        component: &'static str,
        field: &'static str,
    },
}

/// Renders one kind of dynamic-zone block.
pub trait BlockRenderer: Send + Sync {
    /// Discriminator this renderer is registered under, e.g. `shared.quote`.
    fn component(&self) -> &'static str;

    /// Render the block.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::MissingField`] when the block lacks the data
    /// this renderer needs; the block is then left out of the page.
    fn render(&self, block: &ContentBlock) -> Result<Markup, BlockError>;

    /// Shorthand for the missing-field error of this renderer.
    fn missing(&self, field: &'static str) -> BlockError {
        BlockError::MissingField {
            component: self.component(),
            field,
        }
    }
}
