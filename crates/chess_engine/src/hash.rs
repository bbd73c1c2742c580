//! Normalized position keys and the transposition table
//!
//! The table is a bounded LRU cache from [`PositionKey`] to [`TtEntry`],
//! shared across every search session in the process through an `Arc`.
//! Entries carry a [`Bound`] tag so a score produced by a cutoff is only
//! reused when it still decides the current window.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::Score;

/// Position identity for caching: piece placement, side to move, castling
/// rights and en-passant target. Halfmove/fullmove counters are dropped, so
/// positions differing only in those counters share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey(String);

impl PositionKey {
    /// Keep the first four FEN fields
    pub fn from_fen(fen: &str) -> Self {
        let fields: Vec<&str> = fen.split_whitespace().take(4).collect();
        Self(fields.join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a stored score relates to the true value of the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Searched inside the window: the score is the value
    Exact,
    /// Failed high: the value is at least the score
    Lower,
    /// Failed low: the value is at most the score
    Upper,
}

impl Bound {
    /// Classify a node's best score against the window it was searched with
    pub fn classify(best: Score, alpha: Score, beta: Score) -> Self {
        if best <= alpha {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TtEntry {
    pub depth: u32,
    pub score: Score,
    pub bound: Bound,
}

impl TtEntry {
    /// The stored score, if it can stand in for a search of `depth` plies
    /// inside `(alpha, beta)`.
    ///
    /// Shallower entries are stale. Bounds are only usable when they prove
    /// the value lies outside the window on the side they bound.
    pub fn usable_score(&self, depth: u32, alpha: Score, beta: Score) -> Option<Score> {
        if self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Bounded, process-wide transposition table
///
/// Results cached by one game stay visible to every other game using the
/// same table; partition by creating separate tables.
pub struct TranspositionTable {
    entries: Mutex<LruCache<PositionKey, TtEntry>>,
}

impl TranspositionTable {
    /// # Errors
    ///
    /// Returns [`ChessEngineError::Config`] for a zero capacity.
    pub fn new(capacity: usize) -> ChessEngineResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| ChessEngineError::config("transposition table capacity must be > 0"))?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn shared(capacity: usize) -> ChessEngineResult<Arc<Self>> {
        Self::new(capacity).map(Arc::new)
    }

    /// Look up a position, refreshing its recency
    pub fn probe(&self, key: &PositionKey) -> Option<TtEntry> {
        self.entries.lock().get(key).copied()
    }

    /// Store unconditionally, replacing any previous entry for the key
    pub fn store(&self, key: PositionKey, entry: TtEntry) {
        self.entries.lock().put(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
