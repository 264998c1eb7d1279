use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockKey};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("A document must contain at least one block")]
    Empty,
    #[error("Duplicate block key: {0}")]
    DuplicateKey(BlockKey),
}

/// Immutable snapshot of a block-structured document.
///
/// A `Document` is an ordered list of [`Block`]s (reading order) whose keys are
/// unique. The host owns the live document; the engine only ever sees a
/// snapshot handed in for one key-press and hands a fresh snapshot back.
///
/// All transforms take `&self` and return a new `Document`, leaving the
/// original untouched:
///
/// ```rust
/// # use block_breakout_engine::{Block, Document};
/// let doc = Document::from_blocks(vec![Block::new("1", "header-one", "Title")]).unwrap();
/// let next = doc
///     .with_block_inserted_after(0, Block::empty("2", Block::UNSTYLED))
///     .unwrap();
///
/// assert_eq!(doc.len(), 1);
/// assert_eq!(next.len(), 2);
/// ```
///
/// Equality is structural, so tests can compare whole documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Build a document, checking the key invariants
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, DocumentError> {
        if blocks.is_empty() {
            return Err(DocumentError::Empty);
        }

        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(block.key()) {
                return Err(DocumentError::DuplicateKey(block.key().clone()));
            }
        }

        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false for a validated document; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Index of the block with `key`, scanning in reading order
    pub fn position_of(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|block| block.key() == key)
    }

    pub fn block(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|block| block.key() == key)
    }

    pub fn block_at(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn contains_key(&self, key: &BlockKey) -> bool {
        self.block(key).is_some()
    }

    /// New document with `block` placed right after the block at `index`
    pub fn with_block_inserted_after(
        &self,
        index: usize,
        block: Block,
    ) -> Result<Self, DocumentError> {
        self.rebuild(|blocks| blocks.insert((index + 1).min(blocks.len()), block))
    }

    /// New document with the block at `index` swapped for `block`
    pub fn with_block_replaced(&self, index: usize, block: Block) -> Result<Self, DocumentError> {
        self.rebuild(|blocks| {
            if let Some(slot) = blocks.get_mut(index) {
                *slot = block;
            }
        })
    }

    /// New document without the block at `index`.
    ///
    /// Removing the last remaining block is rejected with [`DocumentError::Empty`].
    pub fn without_block(&self, index: usize) -> Result<Self, DocumentError> {
        self.rebuild(|blocks| {
            if index < blocks.len() {
                blocks.remove(index);
            }
        })
    }

    /// Split the block at `index` at a character `offset`.
    ///
    /// The original block keeps the text before the offset; a new block with
    /// `new_key` and `new_type` (and the original depth) receives the rest and
    /// is placed directly after it. Returns `Ok(None)` when the index or
    /// offset does not address a point in the document.
    pub fn with_block_split(
        &self,
        index: usize,
        offset: usize,
        new_key: BlockKey,
        new_type: &str,
    ) -> Result<Option<Self>, DocumentError> {
        let Some(block) = self.block_at(index) else {
            return Ok(None);
        };
        let Some(split_at) = block.byte_index(offset) else {
            return Ok(None);
        };

        let (head, tail) = block.text().split_at(split_at);
        let continuation = Block::new(new_key, new_type, tail).with_depth(block.depth());
        let truncated = block.clone().with_text(head);

        self.rebuild(|blocks| {
            blocks[index] = truncated;
            blocks.insert(index + 1, continuation);
        })
        .map(Some)
    }

    fn rebuild(&self, edit: impl FnOnce(&mut Vec<Block>)) -> Result<Self, DocumentError> {
        let mut blocks = self.blocks.clone();
        edit(&mut blocks);
        Self::from_blocks(blocks)
    }
}

impl TryFrom<Vec<Block>> for Document {
    type Error = DocumentError;

    fn try_from(blocks: Vec<Block>) -> Result<Self, Self::Error> {
        Self::from_blocks(blocks)
    }
}

impl From<Document> for Vec<Block> {
    fn from(document: Document) -> Self {
        document.blocks
    }
}
