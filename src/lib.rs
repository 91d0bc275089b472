//! # bytepool - Pooled Byte Buffers and a Chaining Record Table
//!
//! bytepool is a small in-process data layer built around one storage
//! discipline: every growing structure borrows its blocks from a recycling
//! pool instead of hammering the system allocator.
//!
//! Three services, leaves first:
//!
//! - [`pool::MemoryPool`]: a free-list of previously released byte blocks.
//!   First-fit reuse, exact-fit reuse for record-sized requests, fresh
//!   allocation as the fallback. No coalescing, no cap on retained memory.
//! - [`buffer::ByteBuf`]: a growable, optionally null-terminated byte
//!   sequence whose growth and release go through an attached pool. Carries
//!   the text toolkit (split, sanitize, downcase, suffix trim, left shift)
//!   the front ends are built on. [`buffer::BufArray`] is the owned,
//!   index-addressed sequence of buffers.
//! - [`table::RecordTable`]: a chaining hash table of buffer keys and
//!   values, hashed with a positional weighted accumulator preserved for
//!   behavioral compatibility.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bytepool::{ByteBuf, MemoryPool, RecordTable};
//!
//! let pool = MemoryPool::new();
//! let mut table = RecordTable::new_in(&pool);
//!
//! let key = ByteBuf::from_slice_in(&pool, b"foo")?;
//! let value = ByteBuf::from_slice_in(&pool, b"bar")?;
//! table.add(&key, &value)?;
//!
//! assert_eq!(table.get(&key).map(|v| v.as_bytes()), Some(&b"bar"[..]));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------+
//! |     wordsearch CLI  /  LineReader         |
//! +-------------------------------------------+
//! |     RecordTable (buckets of chains)       |
//! +-------------------------------------------+
//! |     ByteBuf / BufArray (owned buffers)    |
//! +-------------------------------------------+
//! |     MemoryPool (recycled blocks)          |
//! +-------------------------------------------+
//! |     system allocator (try_reserve)        |
//! +-------------------------------------------+
//! ```
//!
//! ## Ownership Model
//!
//! Blocks travel as owned `Vec<u8>` values: a buffer owns its block, hands
//! it back to the pool on drop, and the only duplication primitive is a
//! deep copy. Nothing in the crate aliases a backing block.
//!
//! ## Error Model
//!
//! Every operation that may grow memory returns `eyre::Result` and fails
//! only on allocation failure ([`pool::AllocError`]), which is non-fatal
//! and left to the caller. Invalid arguments (shift past length, zero
//! bucket count) fail with descriptive errors; lookups that find nothing
//! return `None`.
//!
//! ## Module Overview
//!
//! - [`pool`]: block recycling and allocation failure reporting
//! - [`buffer`]: byte buffers, buffer sequences, text transforms
//! - [`table`]: the chaining hash table and its positional hash
//! - [`reader`]: block-buffered line reading for the front ends
//! - [`config`]: centralized constants

pub mod buffer;
pub mod config;
pub mod pool;
pub mod reader;
pub mod table;

pub use buffer::{BufArray, ByteBuf};
pub use pool::{AllocError, MemoryPool, PoolStats};
pub use reader::LineReader;
pub use table::{DuplicatePolicy, RecordTable};
