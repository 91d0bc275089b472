//! # Memory Recycling
//!
//! This module provides [`MemoryPool`], a free-list of previously released
//! byte blocks that is consulted before the system allocator. Every growing
//! structure in the crate ([`crate::buffer::ByteBuf`], and through it the
//! record table) can be constructed against a pool so that its backing
//! blocks are recycled instead of freed.
//!
//! ## Design
//!
//! The pool trades allocator calls for scan cost and peak memory:
//!
//! - `acquire(n)` is a first-fit scan over retained blocks; a hit hands the
//!   block out (its capacity may exceed `n`) and leaves a tombstone slot.
//! - `acquire_exact(n)` only reuses a block whose capacity matches exactly,
//!   which keeps fixed-size record allocations from pinning oversized blocks.
//! - `release(block)` parks a block in the first tombstone slot, growing the
//!   tracking list by a fixed increment when none is free.
//!
//! There is no coalescing, no compaction, and no upper bound on retained
//! memory. Dropping the last handle frees everything.
//!
//! ## Sharing
//!
//! `MemoryPool` is a cheap cloneable handle (`Arc` + `parking_lot::Mutex`),
//! so one pool can back any number of buffers and tables. Blocks travel as
//! owned `Vec<u8>` values, which makes double-release unrepresentable.

mod recycler;

pub use recycler::{AllocError, MemoryPool, PoolStats};
