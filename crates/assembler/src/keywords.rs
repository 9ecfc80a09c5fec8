//! Fixed keyword lookup keyed by identifier length and boundary bytes.
//!
//! Each keyword lives in one of 256 slots chosen by
//! `(len << 4) ^ first_byte ^ last_byte`. The stored spelling is compared
//! on lookup, so an identifier that merely shares a slot is not a keyword.
//! Each slot holds one spelling: a set whose words share a slot, such as
//! `let` and `fn`, is rejected with [`KeywordCollision`].

use thiserror::Error;

/// Two keywords hash to the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("keyword '{word}' collides with '{existing}' in slot {slot}")]
pub struct KeywordCollision {
    /// The spelling being inserted.
    pub word: &'static str,
    /// The spelling already in the slot.
    pub existing: &'static str,
    /// The shared slot index.
    pub slot: u8,
}

/// A keyword table mapping spellings to keyword values of type `K`.
#[derive(Debug, Clone)]
pub struct KeywordTable<K> {
    slots: [Option<(&'static str, K)>; 256],
}

/// Slot index for an identifier.
pub fn slot_of(word: &[u8]) -> u8 {
    match (word.first(), word.last()) {
        (Some(&first), Some(&last)) => (word.len() as u8).wrapping_shl(4) ^ first ^ last,
        _ => 0,
    }
}

impl<K: Copy> KeywordTable<K> {
    /// An empty table.
    pub fn new() -> Self {
        Self { slots: [None; 256] }
    }

    /// Build a table from `(spelling, keyword)` pairs.
    pub fn from_entries(entries: &[(&'static str, K)]) -> Result<Self, KeywordCollision> {
        let mut table = Self::new();
        for &(word, keyword) in entries {
            table.insert(word, keyword)?;
        }
        Ok(table)
    }

    /// Add a keyword. Fails if its slot is taken by a different spelling.
    pub fn insert(&mut self, word: &'static str, keyword: K) -> Result<(), KeywordCollision> {
        let slot = slot_of(word.as_bytes());
        match self.slots[slot as usize] {
            Some((existing, _)) if existing != word => Err(KeywordCollision {
                word,
                existing,
                slot,
            }),
            _ => {
                self.slots[slot as usize] = Some((word, keyword));
                Ok(())
            }
        }
    }

    /// Look up an identifier.
    pub fn lookup(&self, word: &str) -> Option<K> {
        match self.slots[slot_of(word.as_bytes()) as usize] {
            Some((spelling, keyword)) if spelling == word => Some(keyword),
            _ => None,
        }
    }

    /// Number of keywords in the table.
    /// Number of stored keywords.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True if no keyword has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Copy> Default for KeywordTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
