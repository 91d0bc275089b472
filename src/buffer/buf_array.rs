//! # BufArray
//!
//! An ordered sequence of owned [`ByteBuf`] values.
//!
//! Access is index-based and bounds-checked; out-of-range indices come back
//! as `None` rather than a fault. Removal shifts the following elements
//! left by one slot and hands the removed buffer back to the caller, whose
//! drop returns its block to the pool.

use eyre::Result;

use super::ByteBuf;

/// Ordered, index-addressed sequence of byte buffers.
#[derive(Debug, Default)]
pub struct BufArray {
    items: Vec<ByteBuf>,
}

impl BufArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a buffer, taking ownership.
    pub fn push(&mut self, buf: ByteBuf) {
        self.items.push(buf);
    }

    /// Appends an independent deep copy of `buf`.
    pub fn push_clone(&mut self, buf: &ByteBuf) -> Result<()> {
        self.items.push(buf.try_clone()?);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&ByteBuf> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ByteBuf> {
        self.items.get_mut(index)
    }

    /// Removes and returns the element at `index`, shifting the rest left.
    /// Out of range is an absent result, not an error.
    pub fn remove(&mut self, index: usize) -> Option<ByteBuf> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ByteBuf> {
        self.items.iter()
    }

    /// Drops every element; their blocks return to their pools.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a BufArray {
    type Item = &'a ByteBuf;
    type IntoIter = std::slice::Iter<'a, ByteBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
