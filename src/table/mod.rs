//! # Record Table
//!
//! A chaining hash table over [`crate::buffer::ByteBuf`] keys and values.
//!
//! ## Layout
//!
//! The table is a vector of buckets; each bucket is a short chain of owned
//! `{key, value}` records in insertion order. Key and value bytes are
//! deep-copied into pool-attached buffers on insert, so the table owns
//! everything it stores and returns every block to its pool on drop.
//!
//! ## Hashing
//!
//! Bucketing uses the positional weighted accumulator in [`hash`], a weak
//! and collision-prone function kept bit-for-bit for behavioral compatibility
//! with the data this layer was built to serve. See [`hash::positional_hash`]
//! before considering it for anything else.
//!
//! ## Duplicate Keys
//!
//! [`DuplicatePolicy`] selects between the sane default (`Upsert`) and the
//! legacy behavior (`Append`: every add appends a record while the key is
//! counted once).

pub mod hash;
mod record_table;

pub use record_table::{DuplicatePolicy, RecordTable};
