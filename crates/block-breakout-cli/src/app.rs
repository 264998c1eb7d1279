use anyhow::Result;
use block_breakout_engine::{
    Block, BlockCategory, BreakoutEngine, Document, DocumentError, HostBindings, KeyGenerator,
    Position, ReturnHandling, Selection, UuidKeys,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Block types reachable with Tab, in cycling order
pub const BLOCK_TYPES: &[&str] = &[
    Block::UNSTYLED,
    "header-one",
    "header-two",
    "blockquote",
    "unordered-list-item",
    "ordered-list-item",
    "code-block",
];

/// TOML layout of a saved document: a `[[blocks]]` array of tables
#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile {
    blocks: Document,
}

pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    let file: DocumentFile = toml::from_str(&content)?;
    Ok(file.blocks)
}

pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    let file = DocumentFile {
        blocks: document.clone(),
    };
    std::fs::write(path, toml::to_string_pretty(&file)?)?;
    Ok(())
}

pub fn demo_document() -> Result<Document, DocumentError> {
    let blocks = vec![
        Block::new("title", "header-one", "Block breakout"),
        Block::new(
            "intro",
            Block::UNSTYLED,
            "Press Enter in the heading or at the end of the list.",
        ),
        Block::new("item", "unordered-list-item", "First item"),
    ];
    Document::from_blocks(blocks)
}

/// Editor state for the terminal host: one document and a collapsed caret
pub struct App {
    pub document: Document,
    pub caret: Position,
    pub status: String,
    engine: Rc<BreakoutEngine>,
    document_path: Option<PathBuf>,
}

impl App {
    pub fn new(document: Document, engine: BreakoutEngine, document_path: Option<PathBuf>) -> Self {
        let first = &document.blocks()[0];
        let caret = Position::new(first.key().clone(), first.len());
        Self {
            document,
            caret,
            status: String::new(),
            engine: Rc::new(engine),
            document_path,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.document.position_of(&self.caret.block_key)
    }

    pub fn current_block(&self) -> Option<&Block> {
        self.document.block(&self.caret.block_key)
    }

    pub fn current_category(&self) -> Option<BlockCategory> {
        self.current_block()
            .map(|block| self.engine.classifier().classify(block.block_type()))
    }

    /// Enter: let the engine try first, fall back to a plain split
    pub fn press_enter(&mut self) {
        let engine = Rc::clone(&self.engine);
        match engine.handle_return(self) {
            ReturnHandling::Handled => {
                self.status = "Enter handled by breakout engine".to_string();
            }
            ReturnHandling::NotHandled => {
                self.split_block();
                self.status = "Enter left to editor".to_string();
            }
        }
    }

    /// Native Enter: split at the caret, the new block keeps the current type
    pub fn split_block(&mut self) {
        let Some(index) = self.current_index() else {
            return;
        };
        let block_type = self.document.blocks()[index].block_type().to_string();
        let key = UuidKeys.next_key();

        match self
            .document
            .with_block_split(index, self.caret.offset, key.clone(), &block_type)
        {
            Ok(Some(document)) => self.commit(Ok(document), Position::new(key, 0)),
            Ok(None) => {}
            Err(error) => self.commit(Err(error), self.caret.clone()),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let Some((index, block)) = self.current() else {
            return;
        };
        let Some(at) = block.byte_index(self.caret.offset) else {
            return;
        };

        let mut text = block.text().to_string();
        text.insert(at, c);
        let updated = block.clone().with_text(text);
        let caret = Position::new(self.caret.block_key.clone(), self.caret.offset + 1);
        self.commit(self.document.with_block_replaced(index, updated), caret);
    }

    /// Delete before the caret; at the start of a block, merge it into the previous one
    pub fn backspace(&mut self) {
        let Some((index, block)) = self.current() else {
            return;
        };

        if self.caret.offset > 0 {
            let (Some(start), Some(end)) = (
                block.byte_index(self.caret.offset - 1),
                block.byte_index(self.caret.offset),
            ) else {
                return;
            };
            let mut text = block.text().to_string();
            text.replace_range(start..end, "");
            let updated = block.clone().with_text(text);
            let caret = Position::new(self.caret.block_key.clone(), self.caret.offset - 1);
            self.commit(self.document.with_block_replaced(index, updated), caret);
        } else if index > 0 {
            let previous = self.document.blocks()[index - 1].clone();
            let caret = Position::new(previous.key().clone(), previous.len());
            let merged = format!("{}{}", previous.text(), block.text());
            let result = self
                .document
                .with_block_replaced(index - 1, previous.with_text(merged))
                .and_then(|document| document.without_block(index));
            self.commit(result, caret);
        }
    }

    pub fn move_left(&mut self) {
        if self.caret.offset > 0 {
            self.caret.offset -= 1;
        } else if let Some(index) = self.current_index()
            && index > 0
        {
            let previous = &self.document.blocks()[index - 1];
            self.caret = Position::new(previous.key().clone(), previous.len());
        }
    }

    pub fn move_right(&mut self) {
        let Some((index, block)) = self.current() else {
            return;
        };
        if self.caret.offset < block.len() {
            self.caret.offset += 1;
        } else if let Some(next) = self.document.block_at(index + 1) {
            self.caret = Position::new(next.key().clone(), 0);
        }
    }

    pub fn move_up(&mut self) {
        if let Some(index) = self.current_index()
            && index > 0
        {
            self.move_to_block(index - 1);
        }
    }

    pub fn move_down(&mut self) {
        if let Some(index) = self.current_index() {
            self.move_to_block(index + 1);
        }
    }

    /// Tab: rotate the current block through [`BLOCK_TYPES`]
    pub fn cycle_block_type(&mut self) {
        let Some((index, block)) = self.current() else {
            return;
        };
        let next_type = BLOCK_TYPES
            .iter()
            .position(|t| *t == block.block_type())
            .map_or(BLOCK_TYPES[0], |i| BLOCK_TYPES[(i + 1) % BLOCK_TYPES.len()]);

        let updated = block.clone().with_type(next_type);
        let caret = self.caret.clone();
        self.commit(self.document.with_block_replaced(index, updated), caret);
        self.status = format!("Block type: {next_type}");
    }

    pub fn save(&mut self) {
        let Some(path) = self.document_path.clone() else {
            self.status = "No document path given; nothing saved".to_string();
            return;
        };
        self.status = match save_document(&path, &self.document) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => format!("Error saving {}: {e}", path.display()),
        };
    }

    fn move_to_block(&mut self, index: usize) {
        if let Some(block) = self.document.block_at(index) {
            let offset = self.caret.offset.min(block.len());
            self.caret = Position::new(block.key().clone(), offset);
        }
    }

    fn current(&self) -> Option<(usize, Block)> {
        let index = self.current_index()?;
        Some((index, self.document.blocks()[index].clone()))
    }

    fn commit(&mut self, result: Result<Document, DocumentError>, caret: Position) {
        match result {
            Ok(document) => {
                self.document = document;
                self.caret = caret;
            }
            Err(e) => self.status = format!("Edit rejected: {e}"),
        }
    }
}

impl HostBindings for App {
    fn document_and_selection(&self) -> (Document, Selection) {
        (self.document.clone(), Selection::caret(self.caret.clone()))
    }

    fn apply_document(&mut self, document: Document, selection: Selection) {
        self.document = document;
        self.caret = selection.focus;
    }
}
