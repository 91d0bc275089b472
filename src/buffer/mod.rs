//! # Growable Byte Buffers
//!
//! [`ByteBuf`] is the crate's workhorse: a growable, optionally
//! null-terminated byte sequence whose capacity growth and release go
//! through an attached [`crate::pool::MemoryPool`] when one was injected at
//! construction, and straight to the allocator otherwise.
//!
//! [`BufArray`] is an ordered sequence of owned `ByteBuf` values with
//! index-addressed, bounds-checked access. Token lists from
//! [`ByteBuf::split`] come back as one.
//!
//! ## Ownership
//!
//! Buffers own their backing block outright. The only way to duplicate one
//! is a deep copy ([`ByteBuf::try_clone`] / [`ByteBuf::copy_from`]); the
//! block returns to its pool exactly once, on drop. There is no descriptor
//! aliasing anywhere in this crate.
//!
//! ## Termination
//!
//! A terminated buffer keeps a trailing zero byte at `len - 1` across
//! arbitrary pushes: [`ByteBuf::push_byte`] writes into the terminator slot
//! and then re-appends the terminator. [`ByteBuf::make_string`] is the only
//! operation that sets the flag, and it is idempotent.

mod buf_array;
mod byte_buf;

pub use buf_array::BufArray;
pub use byte_buf::ByteBuf;
