use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a block, unique within a single document.
///
/// Keys are minted by the host (or by a [`crate::KeyGenerator`] on the host's
/// behalf) and are never interpreted by the engine beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One structural unit of a document: a paragraph, heading, quote, list item...
///
/// Blocks are immutable values. Every "change" produces a new `Block`; the
/// builder-style `with_*` methods consume `self` and hand back the updated value.
///
/// ```rust
/// # use block_breakout_engine::Block;
/// let heading = Block::new("1", "header-one", "Title");
/// assert_eq!(heading.block_type(), "header-one");
/// assert_eq!(heading.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    key: BlockKey,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    depth: usize,
}

impl Block {
    /// The plain paragraph type emitted when breaking out of a structure
    pub const UNSTYLED: &'static str = "unstyled";

    pub fn new(
        key: impl Into<BlockKey>,
        block_type: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            block_type: block_type.into(),
            text: text.into(),
            depth: 0,
        }
    }

    /// An empty block at depth 0, the shape every breakout produces
    pub fn empty(key: impl Into<BlockKey>, block_type: impl Into<String>) -> Self {
        Self::new(key, block_type, String::new())
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    pub fn with_type(self, block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            ..self
        }
    }

    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Length in characters (caret offsets count characters, not bytes)
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte index of a character offset, or `None` if the offset is past the end
    pub fn byte_index(&self, offset: usize) -> Option<usize> {
        if offset == self.len() {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(offset).map(|(index, _)| index)
    }
}
