//! # RecordTable
//!
//! The chaining hash table. Buckets hold short insertion-ordered chains
//! (`SmallVec`, one inline record) of owned key/value buffer pairs.
//!
//! ## Sizing
//!
//! A fresh table is `Uninitialized`: it knows its target bucket count but
//! owns no buckets. The first `add` sizes it lazily by calling
//! [`RecordTable::resize`] with the current target, which is also why
//! `resize` treats "requested size equals current size, buckets already
//! allocated" as a guaranteed no-op. Every later resize rehashes all
//! entries into a fresh bucket vector in bucket-then-chain order and the
//! old vector is dropped.
//!
//! Lookups on an unsized table are ordinary not-found results.

use eyre::{bail, Result};
use smallvec::SmallVec;
use tracing::trace;

use crate::buffer::ByteBuf;
use crate::config::DEFAULT_BUCKET_COUNT;
use crate::pool::{AllocError, MemoryPool};

use super::hash::positional_hash;

/// What `add` does when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Overwrite the existing record's value in place.
    #[default]
    Upsert,
    /// Always append a new record; the key is still counted once. This is
    /// the legacy behavior, kept for exact compatibility.
    Append,
}

#[derive(Debug)]
struct TableEntry {
    key: ByteBuf,
    value: ByteBuf,
}

type Chain = SmallVec<[TableEntry; 1]>;

/// Chaining hash table of byte-buffer keys and values.
#[derive(Debug)]
pub struct RecordTable {
    buckets: Vec<Chain>,
    bucket_count: usize,
    entry_count: usize,
    policy: DuplicatePolicy,
    pool: Option<MemoryPool>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    /// Empty table backed by the system allocator, sized lazily to
    /// [`DEFAULT_BUCKET_COUNT`] on first insert.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            bucket_count: DEFAULT_BUCKET_COUNT,
            entry_count: 0,
            policy: DuplicatePolicy::default(),
            pool: None,
        }
    }

    /// Empty table whose stored keys and values recycle through `pool`.
    pub fn new_in(pool: &MemoryPool) -> Self {
        Self {
            pool: Some(pool.clone()),
            ..Self::new()
        }
    }

    /// Selects the duplicate-key policy. Builder-style, consumes `self`.
    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Deep-copies `src` into a buffer attached to the table's pool.
    fn adopt(&self, src: &ByteBuf) -> Result<ByteBuf> {
        let mut owned = match &self.pool {
            Some(pool) => ByteBuf::new_in(pool),
            None => ByteBuf::new(),
        };
        owned.copy_from(src)?;
        Ok(owned)
    }

    fn bucket_index(&self, key: &[u8]) -> usize {
        if self.bucket_count == 0 {
            return 0;
        }
        (positional_hash(key) % self.bucket_count as u64) as usize
    }

    fn ensure_sized(&mut self) -> Result<()> {
        if self.buckets.len() < self.bucket_count {
            self.resize(self.bucket_count)?;
        }
        Ok(())
    }

    /// Inserts or updates a record.
    ///
    /// Sizes the table on first use. Under [`DuplicatePolicy::Upsert`] an
    /// existing key's value is overwritten in place; under
    /// [`DuplicatePolicy::Append`] a new record is always appended to the
    /// chain. Either way the entry count grows only when the key was not
    /// already in the bucket. Fails only on allocation failure.
    pub fn add(&mut self, key: &ByteBuf, value: &ByteBuf) -> Result<()> {
        self.ensure_sized()?;

        let idx = self.bucket_index(key.as_bytes());
        let existing = self.buckets[idx].iter().position(|e| e.key == *key);

        match (self.policy, existing) {
            (DuplicatePolicy::Upsert, Some(pos)) => {
                self.buckets[idx][pos].value.copy_from(value)?;
            }
            (_, found) => {
                let entry = TableEntry {
                    key: self.adopt(key)?,
                    value: self.adopt(value)?,
                };
                self.buckets[idx].push(entry);
                if found.is_none() {
                    self.entry_count += 1;
                }
            }
        }
        Ok(())
    }

    /// Value of the first record whose key is byte-equal, or absent.
    pub fn get(&self, key: &ByteBuf) -> Option<&ByteBuf> {
        if self.buckets.is_empty() {
            return None;
        }
        let idx = self.bucket_index(key.as_bytes());
        self.buckets
            .get(idx)?
            .iter()
            .find(|e| e.key == *key)
            .map(|e| &e.value)
    }

    /// Mutable access to the first matching record's value.
    pub fn get_mut(&mut self, key: &ByteBuf) -> Option<&mut ByteBuf> {
        if self.buckets.is_empty() {
            return None;
        }
        let idx = self.bucket_index(key.as_bytes());
        self.buckets
            .get_mut(idx)?
            .iter_mut()
            .find(|e| e.key == *key)
            .map(|e| &mut e.value)
    }

    /// Erases the first matching record, returning its value. Later
    /// duplicates of the key (legacy append mode) stay behind, and the key
    /// stays counted until its last record is gone.
    pub fn remove(&mut self, key: &ByteBuf) -> Option<ByteBuf> {
        if self.buckets.is_empty() {
            return None;
        }
        let idx = self.bucket_index(key.as_bytes());
        let chain = self.buckets.get_mut(idx)?;
        let pos = chain.iter().position(|e| e.key == *key)?;
        let entry = chain.remove(pos);

        if !chain.iter().any(|e| e.key == *key) {
            self.entry_count = self.entry_count.saturating_sub(1);
        }
        Some(entry.value)
    }

    /// Rebuilds the table with `bucket_count` buckets, rehashing every
    /// record across in bucket-then-chain order.
    ///
    /// Requesting the current size on an already-sized table is a no-op,
    /// which makes the lazy initial sizing re-entrant-safe. Zero buckets is
    /// invalid.
    pub fn resize(&mut self, bucket_count: usize) -> Result<()> {
        if bucket_count == 0 {
            bail!("attempt to resize record table to zero buckets");
        }
        if bucket_count == self.bucket_count && self.buckets.len() == bucket_count {
            return Ok(());
        }

        let mut fresh: Vec<Chain> = Vec::new();
        if fresh.try_reserve_exact(bucket_count).is_err() {
            bail!(AllocError {
                requested: bucket_count * std::mem::size_of::<Chain>(),
            });
        }
        fresh.resize_with(bucket_count, Chain::new);

        let old = std::mem::replace(&mut self.buckets, fresh);
        self.bucket_count = bucket_count;

        for chain in old {
            for entry in chain {
                let idx = self.bucket_index(entry.key.as_bytes());
                self.buckets[idx].push(entry);
            }
        }

        trace!(buckets = bucket_count, entries = self.entry_count, "table resized");
        Ok(())
    }

    /// Number of distinct keys stored.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Target bucket count (meaningful even before the lazy first sizing).
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    /// Whether the bucket vector has been allocated yet.
    pub fn is_sized(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// All records in bucket-then-chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&ByteBuf, &ByteBuf)> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|e| (&e.key, &e.value)))
    }
}
