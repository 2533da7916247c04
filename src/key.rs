//! Primary key generation.
//!
//! Keys come from the mapper's own generator, not from the database. The
//! default generator is process-local: it restarts from its seed whenever the
//! mapper is recreated and is never reconciled with keys already stored.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use crate::error::{OrmError, Result};

/// Source of primary keys for new rows.
pub trait KeyGenerator: Send + Sync {
    /// Advance and return the next key. Called exactly once per write.
    ///
    /// Fails once no unused key is left; a key is never handed out twice.
    fn next_key(&self) -> Result<i64>;
}

/// Monotonic in-memory counter, increment-then-use.
#[derive(Debug, Default)]
pub struct AtomicKeyGenerator {
    last: AtomicI64,
}

impl AtomicKeyGenerator {
    /// Counter at 0; the first key handed out is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter at `last`; the first key handed out is `last + 1`.
    pub fn starting_at(last: i64) -> Self {
        Self {
            last: AtomicI64::new(last),
        }
    }

    /// The most recently issued key, or the seed if none was issued.
    pub fn current(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

impl KeyGenerator for AtomicKeyGenerator {
    fn next_key(&self) -> Result<i64> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| OrmError::Configuration("key space exhausted".to_string()))
    }
}

/// Replays a fixed list of keys, then fails.
#[derive(Debug)]
pub struct SequenceKeyGenerator {
    keys: Vec<i64>,
    position: AtomicUsize,
}

impl SequenceKeyGenerator {
    pub fn new(keys: impl Into<Vec<i64>>) -> Self {
        Self {
            keys: keys.into(),
            position: AtomicUsize::new(0),
        }
    }

    /// Number of keys handed out so far.
    pub fn issued(&self) -> usize {
        self.position.load(Ordering::SeqCst)
    }
}

impl KeyGenerator for SequenceKeyGenerator {
    fn next_key(&self) -> Result<i64> {
        let i = self.position.fetch_add(1, Ordering::SeqCst);
        self.keys.get(i).copied().ok_or_else(|| {
            OrmError::Configuration(format!(
                "key sequence exhausted after {} keys",
                self.keys.len()
            ))
        })
    }
}

impl<K: KeyGenerator + ?Sized> KeyGenerator for std::sync::Arc<K> {
    fn next_key(&self) -> Result<i64> {
        (**self).next_key()
    }
}
