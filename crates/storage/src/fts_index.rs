//! Posting-list access for the full-text index.
//!
//! Posting lists are the raw input to `fts`'s set-algebraic primitives
//! (4.G): parallel arrays `cids`/`wids-or-eids`/`scores`, sorted ascending
//! by context id within each list. This trait is the seam between that
//! algorithm layer and an on-disk (or in-memory) inverted index.

use crate::{Id, StorageResult};

/// One posting-list read result: parallel vectors aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    /// Context ids, sorted ascending.
    pub cids: Vec<Id>,
    /// Word or entity id carried by each posting, if the list tracks one.
    pub payload: Vec<Id>,
    /// Term-frequency / occurrence score for each posting.
    pub scores: Vec<u32>,
}

impl PostingList {
    /// Number of postings in this list.
    pub fn len(&self) -> usize {
        self.cids.len()
    }

    /// Whether this list has no postings.
    pub fn is_empty(&self) -> bool {
        self.cids.is_empty()
    }
}

/// An inclusive-exclusive range of word ids, used by "filter by range".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    /// First word id included in the range.
    pub first: Id,
    /// Last word id included in the range (inclusive).
    pub last: Id,
}

/// Read-only access to the inverted text index's posting lists.
pub trait FtsIndex: Send + Sync {
    /// Read the posting list for a single word id.
    fn word_postings(&self, word_id: Id) -> StorageResult<PostingList>;

    /// Read the posting list for a single entity id.
    fn entity_postings(&self, entity_id: Id) -> StorageResult<PostingList>;
}

/// In-memory `FtsIndex` for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFtsIndex {
    words: rustc_hash::FxHashMap<Id, PostingList>,
    entities: rustc_hash::FxHashMap<Id, PostingList>,
}

impl InMemoryFtsIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the posting list for a word id.
    pub fn set_word_postings(&mut self, word_id: Id, postings: PostingList) {
        self.words.insert(word_id, postings);
    }

    /// Insert (or replace) the posting list for an entity id.
    pub fn set_entity_postings(&mut self, entity_id: Id, postings: PostingList) {
        self.entities.insert(entity_id, postings);
    }
}

impl FtsIndex for InMemoryFtsIndex {
    fn word_postings(&self, word_id: Id) -> StorageResult<PostingList> {
        Ok(self.words.get(&word_id).cloned().unwrap_or_default())
    }

    fn entity_postings(&self, entity_id: Id) -> StorageResult<PostingList> {
        Ok(self.entities.get(&entity_id).cloned().unwrap_or_default())
    }
}
