//! # bytepool Configuration Constants
//!
//! All numeric configuration values live here so interdependent values stay
//! co-located.
//!
//! ## Dependency Notes
//!
//! ```text
//! POOL_SLOT_INCREMENT (10)
//!       Slot-list growth step for MemoryPool. Larger = fewer reallocations
//!       of the tracking list, more idle Option slots.
//!
//! DEFAULT_BUCKET_COUNT (10)
//!       Initial RecordTable size used by the lazy first-sizing in add().
//!       Any resize() replaces it; it only controls the untouched table.
//!
//! FALLBACK_BLOCK_SIZE (4096)
//!       LineReader read granularity when the filesystem block size cannot
//!       be probed. Must be > 0 or refill never makes progress.
//! ```

/// Growth step for the pool's block-tracking slot list.
pub const POOL_SLOT_INCREMENT: usize = 10;

/// Bucket count a [`crate::table::RecordTable`] sizes itself to on first use.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Read granularity for [`crate::reader::LineReader`] when the filesystem
/// does not report a block size.
pub const FALLBACK_BLOCK_SIZE: usize = 4096;

const _: () = assert!(POOL_SLOT_INCREMENT > 0);
const _: () = assert!(DEFAULT_BUCKET_COUNT > 0);
const _: () = assert!(FALLBACK_BLOCK_SIZE > 0);
