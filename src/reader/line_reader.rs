//! # LineReader
//!
//! Block-buffered file reader. Reads one filesystem block at a time into a
//! standing [`ByteBuf`]; [`read_byte`](LineReader::read_byte) consumes from
//! the buffer and triggers a refill at the end. The read granularity is the
//! file's reported block size, falling back to
//! [`FALLBACK_BLOCK_SIZE`](crate::config::FALLBACK_BLOCK_SIZE).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use eyre::{Result, WrapErr};
use tracing::warn;

use crate::buffer::ByteBuf;
use crate::config::FALLBACK_BLOCK_SIZE;
use crate::pool::MemoryPool;

/// Block-buffered, delimiter-aware file reader.
#[derive(Debug)]
pub struct LineReader {
    file: File,
    buf: ByteBuf,
    scratch: Vec<u8>,
    offset: usize,
    eof: bool,
    block_size: usize,
}

#[cfg(unix)]
fn probe_block_size(file: &File) -> usize {
    use std::os::unix::fs::MetadataExt;
    match file.metadata() {
        Ok(meta) if meta.blksize() > 0 => meta.blksize() as usize,
        _ => FALLBACK_BLOCK_SIZE,
    }
}

#[cfg(not(unix))]
fn probe_block_size(_file: &File) -> usize {
    FALLBACK_BLOCK_SIZE
}

impl LineReader {
    /// Opens `path` for reading, buffering through the system allocator.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_inner(path.as_ref(), ByteBuf::new())
    }

    /// Opens `path` for reading with a pool-attached standing buffer.
    pub fn open_in(pool: &MemoryPool, path: impl AsRef<Path>) -> Result<Self> {
        Self::open_inner(path.as_ref(), ByteBuf::new_in(pool))
    }

    fn open_inner(path: &Path, buf: ByteBuf) -> Result<Self> {
        let file = File::open(path)
            .wrap_err_with(|| format!("unable to open {} for reading", path.display()))?;
        let block_size = probe_block_size(&file);
        Ok(Self {
            file,
            buf,
            scratch: Vec::new(),
            offset: 0,
            eof: false,
            block_size,
        })
    }

    /// True once the underlying file has been read to its end.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Shifts consumed bytes out of the standing buffer and appends one
    /// fresh block. Returns `false` at end of file.
    fn refill(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }

        self.scratch.resize(self.block_size, 0);
        let read = self
            .file
            .read(&mut self.scratch)
            .wrap_err("read from file failed")?;
        if read == 0 {
            self.eof = true;
            return Ok(false);
        }

        self.buf.left_shift(self.offset)?;
        self.offset = 0;
        self.buf.append_slice(&self.scratch[..read])?;
        Ok(true)
    }

    /// Next byte of the file, or absent at end of file.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        while self.offset >= self.buf.len() {
            if !self.refill()? {
                return Ok(None);
            }
        }
        let byte = self.buf.as_bytes()[self.offset];
        self.offset += 1;
        Ok(Some(byte))
    }

    /// Reads one line into `line`, clearing it first.
    ///
    /// The delimiter byte is included in the line. Returns `false` only at
    /// end of file with nothing read; a final line without a trailing
    /// delimiter is still delivered.
    pub fn read_line(&mut self, line: &mut ByteBuf, delim: u8) -> Result<bool> {
        line.clear();
        loop {
            match self.read_byte()? {
                None => return Ok(!line.is_empty()),
                Some(byte) => {
                    if let Err(err) = line.push_byte(byte) {
                        warn!("unable to push byte onto line buffer");
                        return Err(err);
                    }
                    if byte == delim {
                        return Ok(true);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_lines_with_delimiter_included() {
        let file = temp_file(b"one\ntwo\nthree\n");
        let mut reader = LineReader::open(file.path()).unwrap();
        let mut line = ByteBuf::new();

        assert!(reader.read_line(&mut line, b'\n').unwrap());
        assert_eq!(line.as_bytes(), b"one\n");
        assert!(reader.read_line(&mut line, b'\n').unwrap());
        assert_eq!(line.as_bytes(), b"two\n");
        assert!(reader.read_line(&mut line, b'\n').unwrap());
        assert_eq!(line.as_bytes(), b"three\n");
        assert!(!reader.read_line(&mut line, b'\n').unwrap());
        assert!(reader.eof());
    }

    #[test]
    fn final_line_without_delimiter_is_delivered() {
        let file = temp_file(b"alpha\nomega");
        let mut reader = LineReader::open(file.path()).unwrap();
        let mut line = ByteBuf::new();

        assert!(reader.read_line(&mut line, b'\n').unwrap());
        assert_eq!(line.as_bytes(), b"alpha\n");
        assert!(reader.read_line(&mut line, b'\n').unwrap());
        assert_eq!(line.as_bytes(), b"omega");
        assert!(!reader.read_line(&mut line, b'\n').unwrap());
    }

    #[test]
    fn empty_file_yields_nothing() {
        let file = temp_file(b"");
        let mut reader = LineReader::open(file.path()).unwrap();
        let mut line = ByteBuf::new();
        assert!(!reader.read_line(&mut line, b'\n').unwrap());
        assert!(reader.eof());
    }

    #[test]
    fn missing_file_fails_to_open() {
        assert!(LineReader::open("/no/such/file/anywhere").is_err());
    }

    #[test]
    fn pooled_reader_recycles_line_blocks() {
        let pool = MemoryPool::new();
        let file = temp_file(b"data\n");
        let mut reader = LineReader::open_in(&pool, file.path()).unwrap();
        {
            let mut line = ByteBuf::new_in(&pool);
            assert!(reader.read_line(&mut line, b'\n').unwrap());
        }
        assert!(pool.live_blocks() >= 1);
    }
}
