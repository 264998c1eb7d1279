use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::BlockKey;

/// Source of fresh block keys for blocks created by a breakout.
///
/// Takes `&self` so one generator can be shared between editor instances.
/// Implemented for any `Fn() -> BlockKey`, which makes stubbing trivial:
///
/// ```rust
/// # use block_breakout_engine::{BlockKey, KeyGenerator};
/// let fixed = || BlockKey::from("new");
/// assert_eq!(fixed.next_key(), BlockKey::from("new"));
/// ```
pub trait KeyGenerator {
    fn next_key(&self) -> BlockKey;
}

impl<F> KeyGenerator for F
where
    F: Fn() -> BlockKey,
{
    fn next_key(&self) -> BlockKey {
        self()
    }
}

/// Random v4 UUID keys (the default)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn next_key(&self) -> BlockKey {
        BlockKey::new(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic keys: `prefix0`, `prefix1`, ...
#[derive(Debug)]
pub struct SequentialKeys {
    prefix: String,
    next: AtomicU64,
}

impl SequentialKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 0)
    }

    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(start),
        }
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&self) -> BlockKey {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        BlockKey::new(format!("{}{n}", self.prefix))
    }
}
