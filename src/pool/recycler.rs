//! # Recycling Block Pool
//!
//! Implementation of [`MemoryPool`]. Blocks are plain `Vec<u8>` values whose
//! capacity is the tracked quantity; a retained block keeps whatever
//! capacity the releasing caller's vector reported, not what was originally
//! requested.
//!
//! ## Slot List
//!
//! Retained blocks live in a `Vec<Option<Vec<u8>>>`. A `None` entry is a
//! tombstone: it marks a slot whose block was handed back out and is the
//! first candidate for the next release. The slot list never shrinks; it
//! grows in [`POOL_SLOT_INCREMENT`] steps so a busy pool settles into a
//! stable tracking footprint.
//!
//! ## Allocation Failure
//!
//! Fresh allocations go through `Vec::try_reserve_exact`, so exhaustion
//! surfaces as an [`AllocError`] instead of aborting the process. Callers
//! treat it as non-fatal and propagate it.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::config::POOL_SLOT_INCREMENT;

/// Allocation failure from the pool or the underlying allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Number of bytes the caller asked for.
    pub requested: usize,
}

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unable to allocate {} bytes", self.requested)
    }
}

impl std::error::Error for AllocError {}

/// Point-in-time pool counters, mainly for tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Retained blocks currently parked in the pool.
    pub live_blocks: usize,
    /// Sum of the retained blocks' capacities.
    pub retained_bytes: usize,
    /// Total slots in the tracking list, including tombstones.
    pub slots: usize,
}

#[derive(Debug, Default)]
struct PoolInner {
    slots: Mutex<Vec<Option<Vec<u8>>>>,
}

/// A free-list of previously released byte blocks.
///
/// Cloning produces another handle to the same pool.
#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    inner: Arc<PoolInner>,
}

fn fresh_block(bytes: usize) -> Result<Vec<u8>, AllocError> {
    let mut block = Vec::new();
    block
        .try_reserve_exact(bytes)
        .map_err(|_| AllocError { requested: bytes })?;
    Ok(block)
}

impl MemoryPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a block with capacity of at least `bytes`.
    ///
    /// First-fit over the retained blocks; the winner's slot becomes a
    /// tombstone and the returned vector reports the block's real capacity,
    /// which may exceed the request. A miss allocates exactly `bytes`.
    pub fn acquire(&self, bytes: usize) -> Result<Vec<u8>, AllocError> {
        let mut slots = self.inner.slots.lock();
        for slot in slots.iter_mut() {
            let fits = matches!(slot, Some(block) if block.capacity() >= bytes);
            if fits {
                let block = slot.take().unwrap_or_default();
                trace!(requested = bytes, capacity = block.capacity(), "pool hit");
                return Ok(block);
            }
        }
        drop(slots);
        fresh_block(bytes)
    }

    /// Like [`acquire`](Self::acquire) but a pooled hit must match `bytes`
    /// exactly; a miss still falls back to a fresh exact allocation.
    ///
    /// Used for fixed-size record blocks where handing out an oversized
    /// block would strand its surplus capacity.
    pub fn acquire_exact(&self, bytes: usize) -> Result<Vec<u8>, AllocError> {
        let mut slots = self.inner.slots.lock();
        for slot in slots.iter_mut() {
            let fits = matches!(slot, Some(block) if block.capacity() == bytes);
            if fits {
                let block = slot.take().unwrap_or_default();
                trace!(capacity = bytes, "pool exact hit");
                return Ok(block);
            }
        }
        drop(slots);
        fresh_block(bytes)
    }

    /// Returns a block to the pool.
    ///
    /// The block is cleared and parked in the first tombstone slot; when
    /// none is free the tracking list grows by [`POOL_SLOT_INCREMENT`].
    /// Zero-capacity blocks carry nothing worth retaining and are dropped.
    pub fn release(&self, mut block: Vec<u8>) {
        if block.capacity() == 0 {
            return;
        }
        block.clear();

        let mut slots = self.inner.slots.lock();
        for slot in slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(block);
                return;
            }
        }
        if slots.len() == slots.capacity() {
            slots.reserve(POOL_SLOT_INCREMENT);
        }
        slots.push(Some(block));
    }

    /// Number of blocks currently retained.
    pub fn live_blocks(&self) -> usize {
        self.inner
            .slots
            .lock()
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Sum of the retained blocks' capacities.
    pub fn retained_bytes(&self) -> usize {
        self.inner
            .slots
            .lock()
            .iter()
            .flatten()
            .map(|block| block.capacity())
            .sum()
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        let slots = self.inner.slots.lock();
        PoolStats {
            live_blocks: slots.iter().filter(|slot| slot.is_some()).count(),
            retained_bytes: slots.iter().flatten().map(|b| b.capacity()).sum(),
            slots: slots.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pool_is_empty() {
        let pool = MemoryPool::new();
        assert_eq!(pool.live_blocks(), 0);
        assert_eq!(pool.retained_bytes(), 0);
    }

    #[test]
    fn acquire_miss_allocates_requested_capacity() {
        let pool = MemoryPool::new();
        let block = pool.acquire(64).unwrap();
        assert!(block.capacity() >= 64);
        assert!(block.is_empty());
    }

    #[test]
    fn release_then_acquire_reuses_block() {
        let pool = MemoryPool::new();
        let mut block = pool.acquire(100).unwrap();
        block.extend_from_slice(b"scratch");
        let cap = block.capacity();

        pool.release(block);
        assert_eq!(pool.live_blocks(), 1);

        // Smaller request still gets the retained block, reporting its
        // real capacity, and the pool does not grow for it.
        let reused = pool.acquire(40).unwrap();
        assert_eq!(reused.capacity(), cap);
        assert!(reused.is_empty());
        assert_eq!(pool.live_blocks(), 0);
    }

    #[test]
    fn acquire_first_fit_skips_small_blocks() {
        let pool = MemoryPool::new();
        pool.release(Vec::with_capacity(8));
        pool.release(Vec::with_capacity(128));

        let block = pool.acquire(64).unwrap();
        assert_eq!(block.capacity(), 128);
        assert_eq!(pool.live_blocks(), 1);
    }

    #[test]
    fn acquire_exact_ignores_larger_blocks() {
        let pool = MemoryPool::new();
        pool.release(Vec::with_capacity(128));

        let block = pool.acquire_exact(64).unwrap();
        assert_eq!(block.capacity(), 64);
        // The 128-byte block stays parked.
        assert_eq!(pool.live_blocks(), 1);
    }

    #[test]
    fn release_reuses_tombstone_slot() {
        let pool = MemoryPool::new();
        pool.release(Vec::with_capacity(16));
        pool.release(Vec::with_capacity(32));
        let _ = pool.acquire_exact(16).unwrap();
        assert_eq!(pool.stats().slots, 2);

        pool.release(Vec::with_capacity(8));
        // The freed slot was reused rather than appended.
        assert_eq!(pool.stats().slots, 2);
        assert_eq!(pool.live_blocks(), 2);
    }

    #[test]
    fn zero_capacity_release_is_discarded() {
        let pool = MemoryPool::new();
        pool.release(Vec::new());
        assert_eq!(pool.live_blocks(), 0);
        assert_eq!(pool.stats().slots, 0);
    }

    #[test]
    fn clones_share_retained_blocks() {
        let a = MemoryPool::new();
        let b = a.clone();
        a.release(Vec::with_capacity(64));
        assert_eq!(b.live_blocks(), 1);
    }
}
