//! Buffer-to-parser data feed.
//!
//! The engine never touches a host buffer directly; it pulls text through
//! the [`TextSource`] trait in bounded chunks. Offsets at this boundary are
//! 0-based *character* positions, independent of the host's text encoding
//! width. Any 1-based host convention is translated in the host adapter,
//! never here.
//!
//! Reads are exact or failed: a source that returns fewer characters than
//! requested trips [`EngineError::ShortRead`], because grammar engines
//! assume exact lengths for position bookkeeping. Callers must never
//! silently accept a truncated chunk.

use tracing::trace;

use crate::base::EngineError;

/// Characters pulled per [`TextSource::read`] call.
///
/// Bounds peak memory on very large buffers and gives a cooperative host a
/// natural interleave point between chunks. Correctness never depends on
/// this value: re-chunking produces identical trees.
pub const CHUNK_SIZE: usize = 4096;

/// Abstracts "get buffer length" and "get substring" over the host's live
/// buffer.
///
/// `read` must return exactly `count` characters or fail; it is assumed to
/// be a fast in-memory operation supplied by the host.
pub trait TextSource {
    /// Buffer length in characters.
    fn len(&self) -> usize;

    /// Characters in `[offset, offset + count)`.
    fn read(&self, offset: usize, count: usize) -> Result<String, EngineError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`TextSource`] over a string. The reference implementation,
/// and the buffer stand-in used throughout the test suites.
#[derive(Debug, Clone, Default)]
pub struct StringSource {
    text: String,
}

impl StringSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace `[start, old_end)` (char offsets) with `replacement`,
    /// mirroring a host buffer mutation.
    pub fn splice(&mut self, start: usize, old_end: usize, replacement: &str) {
        let start_b = char_to_byte(&self.text, start).unwrap_or(self.text.len());
        let end_b = char_to_byte(&self.text, old_end).unwrap_or(self.text.len());
        self.text.replace_range(start_b..end_b, replacement);
    }
}

impl TextSource for StringSource {
    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn read(&self, offset: usize, count: usize) -> Result<String, EngineError> {
        let chunk: String = self.text.chars().skip(offset).take(count).collect();
        let got = chunk.chars().count();
        if got != count {
            return Err(EngineError::ShortRead {
                offset,
                requested: count,
                got,
            });
        }
        Ok(chunk)
    }
}

/// Pull an entire source into one snapshot, `CHUNK_SIZE` characters at a
/// time, verifying every chunk's exact length.
pub fn read_to_string(source: &dyn TextSource) -> Result<String, EngineError> {
    read_to_string_chunked(source, CHUNK_SIZE)
}

/// [`read_to_string`] with an explicit chunk size. Exposed so the
/// chunk-size-invariance property can be exercised directly.
pub fn read_to_string_chunked(
    source: &dyn TextSource,
    chunk_size: usize,
) -> Result<String, EngineError> {
    debug_assert!(chunk_size > 0);
    let total = source.len();
    let mut text = String::new();
    let mut offset = 0;
    while offset < total {
        let count = chunk_size.min(total - offset);
        let chunk = source.read(offset, count)?;
        let got = chunk.chars().count();
        if got != count {
            return Err(EngineError::ShortRead {
                offset,
                requested: count,
                got,
            });
        }
        text.push_str(&chunk);
        offset += count;
    }
    trace!(chars = total, chunks = total.div_ceil(chunk_size.max(1)), "buffer snapshot read");
    Ok(text)
}

/// Map a character offset into `text` to a byte offset.
///
/// Returns `None` when `offset` is past the end of `text`; `offset ==
/// char_count` maps to `text.len()`.
pub fn char_to_byte(text: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return Some(0);
    }
    let mut chars = 0;
    for (byte, _) in text.char_indices() {
        if chars == offset {
            return Some(byte);
        }
        chars += 1;
    }
    if chars == offset { Some(text.len()) } else { None }
}
