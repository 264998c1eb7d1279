pub mod block;
pub mod document;
pub mod selection;

pub use block::{Block, BlockKey};
pub use document::{Document, DocumentError};
pub use selection::{Position, Selection};
