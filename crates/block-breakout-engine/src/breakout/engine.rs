use std::fmt;

use crate::breakout::{BreakoutConfig, Classifier, Decision, KeyGenerator, UuidKeys, decide_return};
use crate::models::{Document, Selection};

/// The two operations a host editor exposes to the engine.
///
/// The host owns the live document, its undo history and rendering. The engine
/// reads one snapshot, and only calls back with `apply_document` when it has
/// actually handled the key-press.
pub trait HostBindings {
    /// Current document and selection
    fn document_and_selection(&self) -> (Document, Selection);

    /// Commit a computed document and move the caret
    fn apply_document(&mut self, document: Document, selection: Selection);
}

/// Answer returned to the host's key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnHandling {
    /// The engine committed an edit; the host must not run its own Enter logic
    Handled,
    /// The host should perform its native Enter behaviour
    NotHandled,
}

impl fmt::Display for ReturnHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnHandling::Handled => f.write_str("handled"),
            ReturnHandling::NotHandled => f.write_str("not-handled"),
        }
    }
}

/// Enter-key breakout engine, built once per editor session.
///
/// ```rust
/// # use block_breakout_engine::*;
/// struct Host {
///     document: Document,
///     selection: Selection,
/// }
///
/// impl HostBindings for Host {
///     fn document_and_selection(&self) -> (Document, Selection) {
///         (self.document.clone(), self.selection.clone())
///     }
///
///     fn apply_document(&mut self, document: Document, selection: Selection) {
///         self.document = document;
///         self.selection = selection;
///     }
/// }
///
/// let engine = BreakoutEngine::new(BreakoutConfig::new(["header-one"], Vec::<String>::new()));
/// let mut host = Host {
///     document: Document::from_blocks(vec![Block::new("1", "header-one", "test")]).unwrap(),
///     selection: Selection::caret_at("1", 4),
/// };
///
/// assert_eq!(engine.handle_return(&mut host), ReturnHandling::Handled);
/// assert_eq!(host.document.len(), 2);
/// assert_eq!(host.document.blocks()[1].block_type(), Block::UNSTYLED);
/// ```
#[derive(Debug)]
pub struct BreakoutEngine<K = UuidKeys> {
    classifier: Classifier,
    keys: K,
}

impl BreakoutEngine<UuidKeys> {
    /// Build an engine that mints random UUID keys for new blocks
    pub fn new(config: BreakoutConfig) -> Self {
        Self::with_keys(config, UuidKeys)
    }
}

impl Default for BreakoutEngine<UuidKeys> {
    fn default() -> Self {
        Self::new(BreakoutConfig::default())
    }
}

impl<K: KeyGenerator> BreakoutEngine<K> {
    pub fn with_keys(config: BreakoutConfig, keys: K) -> Self {
        Self {
            classifier: Classifier::new(config),
            keys,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Compute the outcome of Enter without touching any host
    pub fn decide(&self, document: &Document, selection: &Selection) -> Decision {
        decide_return(&self.classifier, document, selection, &self.keys)
    }

    /// Handle Enter against a live host.
    ///
    /// On [`ReturnHandling::NotHandled`] the host is left exactly as it was.
    pub fn handle_return<H>(&self, host: &mut H) -> ReturnHandling
    where
        H: HostBindings + ?Sized,
    {
        let (document, selection) = host.document_and_selection();
        match self.decide(&document, &selection) {
            Decision::Handled(edit) => {
                host.apply_document(edit.document, edit.selection);
                ReturnHandling::Handled
            }
            Decision::NotHandled(_) => ReturnHandling::NotHandled,
        }
    }
}
