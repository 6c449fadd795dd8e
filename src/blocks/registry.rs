use maud::Markup;
use tracing::warn;

use super::traits::{BlockError, BlockRenderer};
use crate::cms::ContentBlock;

/// A block that was left out of the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDiagnostic {
    /// Position of the block in the input sequence.
    pub index: usize,
    pub component: Option<String>,
    pub error: BlockError,
}

/// Result of dispatching a block sequence.
#[derive(Debug, Clone, Default)]
pub struct BlockOutput {
    /// Rendered fragments in input order.
    pub fragments: Vec<Markup>,
    pub diagnostics: Vec<BlockDiagnostic>,
}

/// Registry of block renderers keyed by discriminator.
pub struct BlockRegistry {
    renderers: Vec<Box<dyn BlockRenderer>>,
}

impl BlockRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Register a renderer, replacing any existing one for the same discriminator.
    pub fn register(&mut self, renderer: Box<dyn BlockRenderer>) {
        self.renderers
            .retain(|existing| existing.component() != renderer.component());
        self.renderers.push(renderer);
    }

    /// Find the renderer for a discriminator.
    #[must_use]
    pub fn find_renderer(&self, component: &str) -> Option<&dyn BlockRenderer> {
        self.renderers
            .iter()
            .find(|r| r.component() == component)
            .map(AsRef::as_ref)
    }

    /// Render one block.
    ///
    /// # Errors
    ///
    /// Returns the reason the block cannot be rendered.
    pub fn render_block(&self, block: &ContentBlock) -> Result<Markup, BlockError> {
        let component = block
            .component
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(BlockError::MissingDiscriminator)?;
        let renderer = self
            .find_renderer(component)
            .ok_or_else(|| BlockError::UnknownDiscriminator(component.to_string()))?;
        renderer.render(block)
    }

    /// Render a block sequence, skipping blocks that cannot be rendered.
    ///
    /// The output never has more fragments than there are blocks, and
    /// fragments keep the relative order of their blocks.
    #[must_use]
    pub fn dispatch(&self, blocks: &[ContentBlock]) -> BlockOutput {
        let mut output = BlockOutput::default();
        for (index, block) in blocks.iter().enumerate() {
            match self.render_block(block) {
                Ok(fragment) => output.fragments.push(fragment),
                Err(error) => {
                    warn!(
                        index,
                        component = block.component.as_deref().unwrap_or("<none>"),
                        error = %error,
                        "Skipping content block"
                    );
                    output.diagnostics.push(BlockDiagnostic {
                        index,
                        component: block.component.clone(),
                        error,
                    });
                }
            }
        }
        output
    }

    /// Rendered fragments only.
    #[must_use]
    pub fn render_blocks(&self, blocks: &[ContentBlock]) -> Vec<Markup> {
        self.dispatch(blocks).fragments
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
