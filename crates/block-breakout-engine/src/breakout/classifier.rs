use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Block;

/// How the engine treats Enter inside a block of a given type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    /// Not configured: the host's native Enter handling applies
    Default,
    /// Enter always appends an empty breakout block after the current one
    SingleBreakout,
    /// Enter continues the structure; Enter on an empty block exits it
    DoubleBreakout,
}

/// Breakout policy as supplied by the embedding editor.
///
/// Both sets default to empty, so an unconfigured engine never interferes
/// with the host. [`BreakoutConfig::editorial`] is an opt-in preset for the
/// common rich-text block types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    /// Block types that break out on every Enter press
    pub breakout_blocks: BTreeSet<String>,
    /// Block types that continue on Enter and break out on Enter in an empty block
    pub double_breakout_blocks: BTreeSet<String>,
    /// Type given to every block produced by a breakout
    pub breakout_block_type: String,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            breakout_blocks: BTreeSet::new(),
            double_breakout_blocks: BTreeSet::new(),
            breakout_block_type: Block::UNSTYLED.to_string(),
        }
    }
}

impl BreakoutConfig {
    pub fn new<S, D>(breakout_blocks: S, double_breakout_blocks: D) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            breakout_blocks: breakout_blocks.into_iter().map(Into::into).collect(),
            double_breakout_blocks: double_breakout_blocks.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Headings break out immediately; quotes, list items and code blocks
    /// continue until Enter is pressed on an empty line.
    pub fn editorial() -> Self {
        Self::new(
            [
                "header-one",
                "header-two",
                "header-three",
                "header-four",
                "header-five",
                "header-six",
            ],
            [
                "blockquote",
                "unordered-list-item",
                "ordered-list-item",
                "code-block",
            ],
        )
    }

    pub fn with_breakout_block_type(self, block_type: impl Into<String>) -> Self {
        Self {
            breakout_block_type: block_type.into(),
            ..self
        }
    }
}

/// Non-fatal problems found while building a [`Classifier`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    #[error(
        "The block `{block_type}` was redundantly specified in `breakoutBlocks` as well as `doubleBreakoutBlocks`. This is probably an error."
    )]
    RedundantBlock { block_type: String },
}

/// Immutable lookup from block type to [`BlockCategory`].
///
/// Built once per editor session. A type listed in both sets is reported as a
/// [`ConfigWarning`], logged at error level, and resolved to
/// [`BlockCategory::SingleBreakout`].
#[derive(Debug, Clone)]
pub struct Classifier {
    breakout_blocks: BTreeSet<String>,
    double_breakout_blocks: BTreeSet<String>,
    breakout_block_type: String,
    warnings: Vec<ConfigWarning>,
}

impl Classifier {
    pub fn new(config: BreakoutConfig) -> Self {
        let BreakoutConfig {
            breakout_blocks,
            mut double_breakout_blocks,
            breakout_block_type,
        } = config;

        let mut warnings = Vec::new();
        for block_type in breakout_blocks.intersection(&double_breakout_blocks) {
            let warning = ConfigWarning::RedundantBlock {
                block_type: block_type.clone(),
            };
            log::error!("{warning}");
            warnings.push(warning);
        }
        double_breakout_blocks.retain(|block_type| !breakout_blocks.contains(block_type));

        Self {
            breakout_blocks,
            double_breakout_blocks,
            breakout_block_type,
            warnings,
        }
    }

    pub fn classify(&self, block_type: &str) -> BlockCategory {
        if self.breakout_blocks.contains(block_type) {
            BlockCategory::SingleBreakout
        } else if self.double_breakout_blocks.contains(block_type) {
            BlockCategory::DoubleBreakout
        } else {
            BlockCategory::Default
        }
    }

    /// Type of the block emitted by a breakout
    pub fn breakout_block_type(&self) -> &str {
        &self.breakout_block_type
    }

    /// Warnings raised while resolving the configuration, one per offending type
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(BreakoutConfig::default())
    }
}
