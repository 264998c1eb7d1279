use std::fmt;

use crate::breakout::{BlockCategory, Classifier, KeyGenerator};
use crate::models::{Block, BlockKey, Document, DocumentError, Selection};

/// Fresh keys that collide with an existing block are redrawn at most this often
const MAX_KEY_ATTEMPTS: usize = 8;

/// A computed edit: the next document plus where the caret ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub document: Document,
    pub selection: Selection,
}

/// Why the engine left Enter to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abstention {
    /// Anchor and focus differ; ranged Enter is the host's business
    SelectionNotCollapsed,
    /// The caret names a block key the document does not contain
    BlockNotFound,
    /// The caret offset lies past the end of its block's text
    OffsetOutOfRange,
    /// The caret's block type carries no breakout policy
    DefaultBlock,
    /// The key generator kept returning keys already in use
    KeyExhausted,
    /// The computed document failed validation
    EditRejected,
}

impl fmt::Display for Abstention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Abstention::SelectionNotCollapsed => "selection is not collapsed",
            Abstention::BlockNotFound => "caret block is not in the document",
            Abstention::OffsetOutOfRange => "caret offset is past the end of the block",
            Abstention::DefaultBlock => "block type has no breakout policy",
            Abstention::KeyExhausted => "no fresh block key available",
            Abstention::EditRejected => "computed document was rejected",
        };
        f.write_str(reason)
    }
}

/// Outcome of one Enter press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Handled(Edit),
    NotHandled(Abstention),
}

impl Decision {
    pub fn is_handled(&self) -> bool {
        matches!(self, Decision::Handled(_))
    }

    pub fn edit(&self) -> Option<&Edit> {
        match self {
            Decision::Handled(edit) => Some(edit),
            Decision::NotHandled(_) => None,
        }
    }

    pub fn into_edit(self) -> Option<Edit> {
        match self {
            Decision::Handled(edit) => Some(edit),
            Decision::NotHandled(_) => None,
        }
    }
}

/// Decide what Enter does at `selection` in `document`.
///
/// Pure with respect to its inputs: the only thing consulted besides the
/// arguments is `keys`, for fresh block keys. Double-breakout needs no memory
/// of earlier presses because "already pressed once" shows up in the document
/// itself as an empty block of the structured type under the caret.
///
/// | category         | caret block | result                                             |
/// |------------------|-------------|----------------------------------------------------|
/// | `Default`        | any         | not handled                                        |
/// | `SingleBreakout` | any         | empty breakout block appended after it, caret there |
/// | `DoubleBreakout` | non-empty   | split at caret, continuation keeps the type         |
/// | `DoubleBreakout` | empty       | replaced by an empty breakout block                 |
pub fn decide_return<K>(
    classifier: &Classifier,
    document: &Document,
    selection: &Selection,
    keys: &K,
) -> Decision
where
    K: KeyGenerator + ?Sized,
{
    match try_decide(classifier, document, selection, keys) {
        Ok(edit) => {
            log::debug!(
                "Enter handled: {} -> {} blocks, caret in {}",
                document.len(),
                edit.document.len(),
                edit.selection.focus.block_key
            );
            Decision::Handled(edit)
        }
        Err(abstention) => {
            log::debug!("Enter left to host: {abstention}");
            Decision::NotHandled(abstention)
        }
    }
}

fn try_decide<K>(
    classifier: &Classifier,
    document: &Document,
    selection: &Selection,
    keys: &K,
) -> Result<Edit, Abstention>
where
    K: KeyGenerator + ?Sized,
{
    let caret = selection
        .caret_position()
        .ok_or(Abstention::SelectionNotCollapsed)?;
    let index = document
        .position_of(&caret.block_key)
        .ok_or(Abstention::BlockNotFound)?;
    let block = document.block_at(index).ok_or(Abstention::BlockNotFound)?;
    if caret.offset > block.len() {
        return Err(Abstention::OffsetOutOfRange);
    }

    let breakout_type = classifier.breakout_block_type();
    match classifier.classify(block.block_type()) {
        BlockCategory::Default => Err(Abstention::DefaultBlock),
        BlockCategory::SingleBreakout => {
            let key = fresh_key(document, keys)?;
            let next = document
                .with_block_inserted_after(index, Block::empty(key.clone(), breakout_type))
                .map_err(rejected)?;
            Ok(caret_at_start(next, key))
        }
        BlockCategory::DoubleBreakout if block.is_empty() => {
            let key = fresh_key(document, keys)?;
            let next = document
                .with_block_replaced(index, Block::empty(key.clone(), breakout_type))
                .map_err(rejected)?;
            Ok(caret_at_start(next, key))
        }
        BlockCategory::DoubleBreakout => {
            let key = fresh_key(document, keys)?;
            let next = document
                .with_block_split(index, caret.offset, key.clone(), block.block_type())
                .map_err(rejected)?
                .ok_or(Abstention::OffsetOutOfRange)?;
            Ok(caret_at_start(next, key))
        }
    }
}

fn caret_at_start(document: Document, key: BlockKey) -> Edit {
    Edit {
        document,
        selection: Selection::caret_at(key, 0),
    }
}

fn fresh_key<K>(document: &Document, keys: &K) -> Result<BlockKey, Abstention>
where
    K: KeyGenerator + ?Sized,
{
    for _ in 0..MAX_KEY_ATTEMPTS {
        let key = keys.next_key();
        if !document.contains_key(&key) {
            return Ok(key);
        }
        log::debug!("Generated key {key} already in use, drawing another");
    }
    log::warn!("Key generator returned {MAX_KEY_ATTEMPTS} keys already in the document");
    Err(Abstention::KeyExhausted)
}

fn rejected(error: DocumentError) -> Abstention {
    log::warn!("Breakout edit rejected: {error}");
    Abstention::EditRejected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakout::{BreakoutConfig, SequentialKeys};
    use crate::models::Position;
    use pretty_assertions::assert_eq;

    fn classifier() -> Classifier {
        Classifier::new(BreakoutConfig::new(["header-one"], ["list-item"]))
    }

    fn single(block: Block) -> Document {
        Document::from_blocks(vec![block]).unwrap()
    }

    #[test]
    fn test_default_block_is_not_handled() {
        let document = single(Block::new("1", "unstyled", "x"));
        let decision = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("1", 0),
            &SequentialKeys::new("n"),
        );
        assert_eq!(decision, Decision::NotHandled(Abstention::DefaultBlock));
    }

    #[test]
    fn test_ranged_selection_is_not_handled() {
        let document = single(Block::new("1", "header-one", "Title"));
        let selection = Selection::new(Position::new("1", 0), Position::new("1", 5));
        let decision = decide_return(&classifier(), &document, &selection, &SequentialKeys::new("n"));
        assert_eq!(
            decision,
            Decision::NotHandled(Abstention::SelectionNotCollapsed)
        );
    }

    #[test]
    fn test_missing_block_is_not_handled() {
        let document = single(Block::new("1", "header-one", "Title"));
        let decision = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("ghost", 0),
            &SequentialKeys::new("n"),
        );
        assert_eq!(decision, Decision::NotHandled(Abstention::BlockNotFound));
    }

    #[test]
    fn test_offset_past_end_is_not_handled() {
        let document = single(Block::new("1", "header-one", "Title"));
        let decision = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("1", 6),
            &SequentialKeys::new("n"),
        );
        assert_eq!(decision, Decision::NotHandled(Abstention::OffsetOutOfRange));
    }

    #[test]
    fn test_single_breakout_keeps_block_whole() {
        let document = single(Block::new("1", "header-one", "Title"));
        let edit = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("1", 2),
            &SequentialKeys::new("n"),
        )
        .into_edit()
        .unwrap();

        assert_eq!(
            edit.document.blocks(),
            &[
                Block::new("1", "header-one", "Title"),
                Block::empty("n0", "unstyled"),
            ]
        );
        assert_eq!(edit.selection, Selection::caret_at("n0", 0));
    }

    #[test]
    fn test_breakout_block_resets_depth() {
        let document = single(Block::new("1", "header-one", "Title").with_depth(2));
        let edit = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("1", 5),
            &SequentialKeys::new("n"),
        )
        .into_edit()
        .unwrap();

        assert_eq!(edit.document.block_at(1).unwrap().depth(), 0);
    }

    #[test]
    fn test_double_breakout_on_empty_block_replaces_it() {
        let document = Document::from_blocks(vec![
            Block::new("1", "list-item", "a"),
            Block::empty("2", "list-item").with_depth(1),
        ])
        .unwrap();
        let edit = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("2", 0),
            &SequentialKeys::new("n"),
        )
        .into_edit()
        .unwrap();

        assert_eq!(
            edit.document.blocks(),
            &[Block::new("1", "list-item", "a"), Block::empty("n0", "unstyled")]
        );
        assert_eq!(edit.selection, Selection::caret_at("n0", 0));
    }

    #[test]
    fn test_double_breakout_mid_text_splits() {
        let document = single(Block::new("1", "list-item", "abcd"));
        let edit = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("1", 1),
            &SequentialKeys::new("n"),
        )
        .into_edit()
        .unwrap();

        assert_eq!(
            edit.document.blocks(),
            &[
                Block::new("1", "list-item", "a"),
                Block::new("n0", "list-item", "bcd"),
            ]
        );
    }

    #[test]
    fn test_colliding_keys_are_redrawn() {
        let document = Document::from_blocks(vec![
            Block::new("n0", "header-one", "Title"),
            Block::new("n1", "unstyled", ""),
        ])
        .unwrap();
        let edit = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("n0", 5),
            &SequentialKeys::new("n"),
        )
        .into_edit()
        .unwrap();

        assert_eq!(edit.selection, Selection::caret_at("n2", 0));
        assert_eq!(edit.document.position_of(&"n2".into()), Some(1));
    }

    #[test]
    fn test_exhausted_key_generator_abstains() {
        let document = single(Block::new("same", "header-one", "Title"));
        let stuck = || BlockKey::from("same");
        let decision = decide_return(
            &classifier(),
            &document,
            &Selection::caret_at("same", 5),
            &stuck,
        );
        assert_eq!(decision, Decision::NotHandled(Abstention::KeyExhausted));
    }

    #[test]
    fn test_rejected_edit_is_reported_as_such() {
        assert_eq!(rejected(DocumentError::Empty), Abstention::EditRejected);
        assert_eq!(
            rejected(DocumentError::DuplicateKey("1".into())),
            Abstention::EditRejected
        );
        assert_eq!(
            Abstention::EditRejected.to_string(),
            "computed document was rejected"
        );
    }
}
