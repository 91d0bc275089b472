//! # ByteBuf
//!
//! A growable byte sequence with explicit, fallible growth and optional
//! null termination.
//!
//! ## Growth Discipline
//!
//! [`ByteBuf::reserve`] is the single growth path. With a pool attached it
//! acquires a replacement block from the pool, copies the live bytes across,
//! and hands the old block back; without one it grows through
//! `try_reserve_exact` so allocator exhaustion surfaces as an error instead
//! of an abort. Capacity never shrinks on its own.
//!
//! ## Termination Contract
//!
//! `terminated` means: while the buffer is non-empty, the byte at `len - 1`
//! is zero. Pushes preserve the contract by overwriting the terminator slot
//! and re-appending it. Text transforms that can strip the terminator
//! (`sanitize_text`, `trim_suffix`) re-terminate in place; the bytes they
//! drop guarantee the slot fits without growing.

use std::cmp::Ordering;

use eyre::{bail, Result};
use tracing::warn;

use crate::pool::{AllocError, MemoryPool};

use super::BufArray;

/// Growable, optionally null-terminated byte sequence.
///
/// Created empty with zero capacity. Attach a pool at construction with
/// [`ByteBuf::new_in`]; the pool binding is fixed for the buffer's lifetime
/// and is inherited by buffers it spawns (clones, split tokens).
#[derive(Debug, Default)]
pub struct ByteBuf {
    data: Vec<u8>,
    terminated: bool,
    pool: Option<MemoryPool>,
}

impl ByteBuf {
    /// Creates an empty buffer backed by the system allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer whose growth and release go through `pool`.
    pub fn new_in(pool: &MemoryPool) -> Self {
        Self {
            data: Vec::new(),
            terminated: false,
            pool: Some(pool.clone()),
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buf = Self::new();
        buf.append_slice(bytes)?;
        Ok(buf)
    }

    /// Creates a pool-attached buffer holding a copy of `bytes`.
    pub fn from_slice_in(pool: &MemoryPool, bytes: &[u8]) -> Result<Self> {
        let mut buf = Self::new_in(pool);
        buf.append_slice(bytes)?;
        Ok(buf)
    }

    /// Empty buffer sharing this buffer's pool attachment.
    fn spawn(&self) -> Self {
        Self {
            data: Vec::new(),
            terminated: false,
            pool: self.pool.clone(),
        }
    }

    /// Ensures capacity for at least `bytes`.
    ///
    /// No-op when the buffer is already large enough. Otherwise a new block
    /// is acquired (pool first, allocator fallback), the live bytes are
    /// copied in, and the old block is released. Existing contents and
    /// length are never altered, so calling this twice with the same or a
    /// smaller request changes nothing.
    pub fn reserve(&mut self, bytes: usize) -> Result<()> {
        if self.data.capacity() >= bytes {
            return Ok(());
        }

        match &self.pool {
            Some(pool) => {
                let mut block = pool.acquire(bytes)?;
                block.extend_from_slice(&self.data);
                let old = std::mem::replace(&mut self.data, block);
                pool.release(old);
            }
            None => {
                let additional = bytes - self.data.len();
                if self.data.try_reserve_exact(additional).is_err() {
                    warn!(requested = bytes, "buffer reserve failed");
                    bail!(AllocError { requested: bytes });
                }
            }
        }
        Ok(())
    }

    /// Appends one byte, keeping the termination contract intact.
    ///
    /// On a terminated buffer the byte lands in the terminator slot and the
    /// terminator is re-appended, so the trailing zero survives.
    pub fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.reserve(self.data.len() + 1)?;

        if self.terminated {
            match self.data.last().copied() {
                Some(0) => {
                    let last = self.data.len() - 1;
                    self.data[last] = byte;
                }
                _ => self.data.push(byte),
            }
            return self.push_null();
        }

        self.data.push(byte);
        Ok(())
    }

    /// Appends a single zero byte.
    pub fn push_null(&mut self) -> Result<()> {
        self.reserve(self.data.len() + 1)?;
        self.data.push(0);
        Ok(())
    }

    /// Appends `src` byte by byte, keeping termination intact throughout.
    pub fn push_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.reserve(self.data.len() + src.len())?;
        for &byte in src {
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Raw append of `src`, indifferent to termination state.
    pub fn append_slice(&mut self, src: &[u8]) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        self.reserve(self.data.len() + src.len())?;
        self.data.extend_from_slice(src);
        Ok(())
    }

    /// Raw append of another buffer's contents.
    pub fn append(&mut self, src: &ByteBuf) -> Result<()> {
        self.append_slice(&src.data)
    }

    /// Idempotently ensures the trailing terminator and marks the buffer
    /// terminated. This is the only operation that sets the flag.
    pub fn make_string(&mut self) -> Result<()> {
        if self.terminated && self.data.last() == Some(&0) {
            return Ok(());
        }
        self.push_null()?;
        self.terminated = true;
        Ok(())
    }

    /// Replaces the contents with `text` as a terminated string.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.reserve(text.len() + 1)?;
        self.data.clear();
        self.data.extend_from_slice(text.as_bytes());
        self.terminated = false;
        self.make_string()
    }

    /// Deep copy of `src` into this buffer. The two buffers share nothing
    /// afterwards.
    pub fn copy_from(&mut self, src: &ByteBuf) -> Result<()> {
        if src.is_empty() {
            self.data.clear();
            self.terminated = src.terminated;
            return Ok(());
        }
        self.reserve(src.data.len())?;
        self.data.clear();
        self.data.extend_from_slice(&src.data);
        self.terminated = src.terminated;
        Ok(())
    }

    /// Independent copy with its own backing block and the same pool
    /// attachment.
    pub fn try_clone(&self) -> Result<ByteBuf> {
        let mut out = self.spawn();
        out.copy_from(self)?;
        Ok(out)
    }

    /// Drops the first `offset` bytes, moving the remainder to the front.
    ///
    /// `offset == len` empties the buffer; anything larger fails.
    pub fn left_shift(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            bail!(
                "shift offset {} exceeds buffer length {}",
                offset,
                self.data.len()
            );
        }
        self.data.drain(..offset);
        Ok(())
    }

    /// Strips `suffix` from the tail if present. On a terminated buffer the
    /// suffix sits just before the terminator, which is restored in place.
    pub fn trim_suffix(&mut self, suffix: &[u8]) {
        if suffix.is_empty() || self.is_empty() || self.data.len() < suffix.len() {
            return;
        }

        if self.terminated {
            let len = self.data.len();
            if len < suffix.len() + 1 {
                return;
            }
            let start = len - suffix.len() - 1;
            if &self.data[start..len - 1] == suffix {
                self.data.truncate(start);
                // re-terminate; truncation freed at least one slot
                self.data.push(0);
            }
        } else if self.data.ends_with(suffix) {
            let keep = self.data.len() - suffix.len();
            self.data.truncate(keep);
        }
    }

    /// In-place ASCII downcase. Non-alphabetic bytes, including the
    /// terminator, are untouched.
    pub fn make_ascii_lowercase(&mut self) {
        self.data.make_ascii_lowercase();
    }

    /// Reduces the contents to ASCII alphanumerics and single spaces.
    ///
    /// A space is dropped when the preceding source byte was also a space,
    /// so runs collapse to their first space. Everything else non-text is
    /// removed outright. Re-terminates if the buffer was terminated.
    pub fn sanitize_text(&mut self) {
        if self.data.is_empty() {
            return;
        }

        let mut write = 0;
        for read in 0..self.data.len() {
            let byte = self.data[read];
            if !byte.is_ascii_alphanumeric() && byte != b' ' {
                continue;
            }
            if byte == b' ' && read > 0 && self.data[read - 1] == b' ' {
                continue;
            }
            self.data[write] = byte;
            write += 1;
        }
        self.data.truncate(write);

        if self.terminated {
            // the terminator was swept out with the other non-text bytes
            self.data.push(0);
        }
    }

    /// Splits on `delim` into a [`BufArray`] of tokens.
    ///
    /// A run of delimiter bytes with no content in between never emits an
    /// empty token; a delimiter immediately before end-of-input flushes at
    /// most one trailing token. Tokens inherit this buffer's pool and, when
    /// the source is terminated, are terminated themselves. An empty source
    /// yields an empty array.
    pub fn split(&self, delim: u8) -> Result<BufArray> {
        let mut out = BufArray::new();
        if self.is_empty() {
            return Ok(out);
        }

        let mut token = self.spawn();
        for &byte in self.text() {
            if byte == delim {
                if !token.is_empty() {
                    if self.terminated {
                        token.make_string()?;
                    }
                    out.push(std::mem::replace(&mut token, self.spawn()));
                }
            } else {
                token.push_byte(byte)?;
            }
        }
        if !token.is_empty() {
            if self.terminated {
                token.make_string()?;
            }
            out.push(token);
        }
        Ok(out)
    }

    /// Orders by length first, bytewise only on equal lengths.
    ///
    /// Deliberately not lexicographic and deliberately not an `Ord` impl:
    /// this is the ordering the table layer's consumers historically relied
    /// on, kept under its own name.
    pub fn len_first_cmp(&self, other: &ByteBuf) -> Ordering {
        self.data
            .len()
            .cmp(&other.data.len())
            .then_with(|| self.data.cmp(&other.data))
    }

    /// Logical length in bytes, terminator included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Usable capacity: the raw block capacity minus the terminator slot on
    /// a terminated buffer.
    pub fn capacity(&self) -> usize {
        if self.data.capacity() == 0 {
            return 0;
        }
        self.data.capacity() - usize::from(self.terminated)
    }

    /// Bytes of slack between length and capacity.
    pub fn free_space(&self) -> usize {
        self.data.capacity() - self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Full contents, terminator included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view of the full contents. Length cannot change through it.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Contents without the trailing terminator.
    pub fn text(&self) -> &[u8] {
        match self.data.split_last() {
            Some((&0, rest)) if self.terminated => rest,
            _ => &self.data,
        }
    }

    /// Contents without the terminator, checked as UTF-8.
    pub fn text_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(self.text())?)
    }

    /// Offset of the first occurrence of `byte` within the contents.
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.data.iter().position(|&b| b == byte)
    }

    /// True when the text portion is entirely ASCII.
    pub fn is_ascii(&self) -> bool {
        self.text().is_ascii()
    }

    /// Drops the contents, keeping capacity and termination flag.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the backing block to the pool (or allocator) and resets the
    /// buffer to its empty, unterminated state. Drop does the same.
    pub fn release(&mut self) {
        let block = std::mem::take(&mut self.data);
        if let Some(pool) = &self.pool {
            pool.release(block);
        }
        self.terminated = false;
    }

    pub fn pool(&self) -> Option<&MemoryPool> {
        self.pool.as_ref()
    }
}

impl Drop for ByteBuf {
    fn drop(&mut self) {
        if self.data.capacity() == 0 {
            return;
        }
        if let Some(pool) = &self.pool {
            pool.release(std::mem::take(&mut self.data));
        }
    }
}

/// Byte equality over the full contents, terminator included. Pool
/// attachment is not part of a buffer's identity.
impl PartialEq for ByteBuf {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for ByteBuf {}

impl PartialEq<[u8]> for ByteBuf {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}
