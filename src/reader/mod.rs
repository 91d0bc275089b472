//! # Line-Oriented File Reading
//!
//! [`LineReader`] feeds raw file bytes into the buffer layer one block at a
//! time. It exists to serve dictionary loading and document scanning: each
//! call to [`LineReader::read_line`] yields one delimiter-terminated line
//! (delimiter included) into a caller-supplied [`crate::buffer::ByteBuf`].
//!
//! The refill path is where the buffer layer earns its keep: consumed bytes
//! are shifted out of the front of the standing buffer and the next block
//! is appended, so a line that straddles block boundaries is assembled
//! without reallocating per line.

mod line_reader;

pub use line_reader::LineReader;
