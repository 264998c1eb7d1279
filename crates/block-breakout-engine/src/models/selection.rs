use crate::models::BlockKey;

/// A point in the document: a block plus a character offset into its text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub block_key: BlockKey,
    pub offset: usize,
}

impl Position {
    pub fn new(block_key: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            block_key: block_key.into(),
            offset,
        }
    }
}

/// Host selection, described by where it started (`anchor`) and where the
/// caret currently is (`focus`).
///
/// Only a collapsed selection (anchor == focus) is ever acted on by the
/// breakout engine. Ranged selections fall through to the host's own Enter
/// handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection: a plain caret at `position`
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
        }
    }

    /// Shorthand for a caret in `block_key` at `offset`
    pub fn caret_at(block_key: impl Into<BlockKey>, offset: usize) -> Self {
        Self::caret(Position::new(block_key, offset))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The caret position, if this selection is collapsed
    pub fn caret_position(&self) -> Option<&Position> {
        self.is_collapsed().then_some(&self.focus)
    }
}
