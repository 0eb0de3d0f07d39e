//! Buffered stream copy
//!
//! Moves bytes from a readable stream to a writable one using a
//! caller-sized transfer buffer. Neither stream is closed here; stream
//! lifetime belongs to the caller's scope.

use std::io::{Read, Write};

use crate::task::CancelToken;

/// Transfer buffer size used when the caller does not specify one (1 kB).
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// How a cancellable copy ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The source reached end-of-stream; the value is the bytes copied.
    Completed(u64),
    /// The cancel token was set between chunks; the value is the bytes
    /// copied before the copy stopped.
    Cancelled(u64),
}

/// Copies `reader` to `writer` until end-of-stream.
///
/// Reads up to `buffer_size` bytes at a time and writes exactly what was
/// read. Returns the total number of bytes copied.
///
/// # Arguments
/// * `reader` - the stream to read from
/// * `writer` - the stream to write to
/// * `buffer_size` - size of the transfer buffer; must be positive
///
/// # Panics
/// Panics if `buffer_size` is zero. A zero-sized buffer is a programmer
/// error and is rejected at the call site rather than looping forever.
///
/// # Example
/// ```
/// use updraft_core::transfer::copy_stream;
///
/// let mut source: &[u8] = b"hello world";
/// let mut sink = Vec::new();
/// let copied = copy_stream(&mut source, &mut sink, 4).unwrap();
/// assert_eq!(copied, 11);
/// assert_eq!(sink, b"hello world");
/// ```
pub fn copy_stream<R, W>(reader: &mut R, writer: &mut W, buffer_size: usize) -> std::io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    match copy_stream_cancellable(reader, writer, buffer_size, &CancelToken::new())? {
        CopyOutcome::Completed(copied) => Ok(copied),
        // A fresh token is never cancelled.
        CopyOutcome::Cancelled(copied) => Ok(copied),
    }
}

/// Copies `reader` to `writer` with the default transfer buffer.
pub fn copy_stream_with_default<R, W>(reader: &mut R, writer: &mut W) -> std::io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    copy_stream(reader, writer, DEFAULT_BUFFER_SIZE)
}

/// Copies `reader` to `writer`, checking `token` between chunks.
///
/// Chunk boundaries are the cooperative-cancellation checkpoints of a
/// transfer: an in-flight read is never interrupted, but no further chunk
/// is read once the token is set.
///
/// # Panics
/// Panics if `buffer_size` is zero.
pub fn copy_stream_cancellable<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
    token: &CancelToken,
) -> std::io::Result<CopyOutcome>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    assert!(buffer_size > 0, "transfer buffer size must be positive");

    let mut buffer = vec![0u8; buffer_size];
    let mut copied = 0u64;
    loop {
        if token.is_cancelled() {
            return Ok(CopyOutcome::Cancelled(copied));
        }
        let length = reader.read(&mut buffer)?;
        if length == 0 {
            return Ok(CopyOutcome::Completed(copied));
        }
        writer.write_all(&buffer[..length])?;
        copied += length as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_smaller_than_buffer() {
        let mut source = Cursor::new(b"abc".to_vec());
        let mut sink = Vec::new();

        let copied = copy_stream(&mut source, &mut sink, DEFAULT_BUFFER_SIZE).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(sink, b"abc");
    }

    #[test]
    fn test_copy_spans_multiple_chunks() {
        let data: Vec<u8> = (0..=255).cycle().take(4000).collect();
        let mut source = Cursor::new(data.clone());
        let mut sink = Vec::new();

        let copied = copy_stream(&mut source, &mut sink, 7).unwrap();
        assert_eq!(copied, 4000);
        assert_eq!(sink, data);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut source = Cursor::new(Vec::new());
        let mut sink = Vec::new();

        assert_eq!(copy_stream_with_default(&mut source, &mut sink).unwrap(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    #[should_panic(expected = "buffer size must be positive")]
    fn test_zero_buffer_size_panics() {
        let mut source = Cursor::new(b"data".to_vec());
        let mut sink = Vec::new();
        let _ = copy_stream(&mut source, &mut sink, 0);
    }

    #[test]
    fn test_cancelled_token_stops_before_first_chunk() {
        let mut source = Cursor::new(b"data".to_vec());
        let mut sink = Vec::new();

        let token = CancelToken::new();
        token.cancel();

        let outcome = copy_stream_cancellable(&mut source, &mut sink, 2, &token).unwrap();
        assert_eq!(outcome, CopyOutcome::Cancelled(0));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_read_fault_propagates() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "broken",
                ))
            }
        }

        let mut sink = Vec::new();
        let result = copy_stream(&mut FailingReader, &mut sink, 8);
        assert!(result.is_err());
    }
}
