use crate::buffer::PeekBuffer;
use crate::error::InputError;
use crate::source::Source;
use std::fmt::{Debug, Formatter};
use std::io;
use tracing::trace;

// Discard scratch for skips that reach past the peek buffer.
const SKIP_SCRATCH_LEN: usize = 4096;

/// A buffered input that layers a peek cursor over a [Source], so callers
/// can look ahead without consuming. Bytes delivered by the peek family stay
/// available to later reads at the same absolute offset; the read cursor only
/// moves through the read/skip family.
///
/// Exact-length operations come in two flavors: the plain ones treat any end
/// of input as an error, the `_or_eof` ones tolerate a clean end of input
/// (zero bytes transferred) exactly once, reporting it as `Ok(false)`. An end
/// of input that lands after partial progress is always an error, since the
/// caller asked for an exact amount and got a truncated remainder.
///
/// Single-threaded and blocking throughout; there is no internal
/// synchronization and no timeout beyond what the source itself applies.
pub struct ProbeInput<S: Source> {
    source: S,
    position: u64,
    buffer: PeekBuffer,
    reported_eof: bool,
}

impl<S: Source> ProbeInput<S> {
    pub fn new(source: S) -> Self {
        Self::with_position(source, 0)
    }

    /// Wraps a source whose first byte sits at `position` in the overall
    /// stream, e.g. when resuming mid-file.
    pub fn with_position(source: S, position: u64) -> Self {
        Self {
            source,
            position,
            buffer: PeekBuffer::default(),
            reported_eof: false,
        }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn peek_position(&self) -> u64 {
        self.position + self.buffer.peeked() as u64
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Reads up to `target.len()` bytes: already-peeked bytes are drained
    /// first without source I/O, then at most one source pull covers the
    /// remainder. Partial reads are normal; `Ok(None)` means the next unread
    /// byte is the end of input.
    pub fn read(&mut self, target: &mut [u8]) -> Result<Option<usize>, InputError> {
        if target.is_empty() {
            return Ok(Some(0));
        }
        let mut bytes_read = self.buffer.drain_into(target);
        self.position += bytes_read as u64;
        if bytes_read < target.len() {
            match Self::pull(&mut self.source, &mut target[bytes_read..])? {
                Some(n) => {
                    self.position += n as u64;
                    bytes_read += n;
                }
                None if bytes_read == 0 => return Ok(None),
                None => {}
            }
        }
        Ok(Some(bytes_read))
    }

    pub fn read_fully(&mut self, target: &mut [u8]) -> Result<(), InputError> {
        self.read_fully_internal(target, false).map(|_| ())
    }

    /// Like [read_fully](Self::read_fully), but a clean end of input before
    /// the first byte returns `Ok(false)` instead of failing.
    pub fn read_fully_or_eof(&mut self, target: &mut [u8]) -> Result<bool, InputError> {
        self.read_fully_internal(target, true)
    }

    /// Discards up to `length` bytes, consuming already-peeked bytes without
    /// source I/O. Same partial and end-of-input semantics as
    /// [read](Self::read).
    pub fn skip(&mut self, length: usize) -> Result<Option<usize>, InputError> {
        if length == 0 {
            return Ok(Some(0));
        }
        let mut bytes_skipped = self.buffer.drain(length);
        self.position += bytes_skipped as u64;
        if bytes_skipped < length {
            let mut scratch = [0u8; SKIP_SCRATCH_LEN];
            let step = (length - bytes_skipped).min(SKIP_SCRATCH_LEN);
            match Self::pull(&mut self.source, &mut scratch[..step])? {
                Some(n) => {
                    self.position += n as u64;
                    bytes_skipped += n;
                }
                None if bytes_skipped == 0 => return Ok(None),
                None => {}
            }
        }
        Ok(Some(bytes_skipped))
    }

    pub fn skip_fully(&mut self, length: usize) -> Result<(), InputError> {
        self.skip_fully_internal(length, false).map(|_| ())
    }

    pub fn skip_fully_or_eof(&mut self, length: usize) -> Result<bool, InputError> {
        self.skip_fully_internal(length, true)
    }

    /// Reads up to `target.len()` bytes at the peek cursor without moving
    /// the read position. Newly fetched bytes are retained, so a later read
    /// observes them again.
    pub fn peek(&mut self, target: &mut [u8]) -> Result<Option<usize>, InputError> {
        if target.is_empty() {
            return Ok(Some(0));
        }
        let mut bytes_peeked = self.buffer.unpeeked().min(target.len());
        if bytes_peeked < target.len() {
            self.buffer.ensure_space(target.len());
            match Self::pull(&mut self.source, self.buffer.fetch_slice(target.len()))? {
                Some(n) => {
                    self.buffer.mark_filled(n);
                    bytes_peeked += n;
                }
                None if bytes_peeked == 0 => return Ok(None),
                None => {}
            }
        }
        target[..bytes_peeked].copy_from_slice(self.buffer.unpeeked_slice(bytes_peeked));
        self.buffer.advance_peek(bytes_peeked);
        Ok(Some(bytes_peeked))
    }

    pub fn peek_fully(&mut self, target: &mut [u8]) -> Result<(), InputError> {
        self.peek_fully_internal(target, false).map(|_| ())
    }

    pub fn peek_fully_or_eof(&mut self, target: &mut [u8]) -> Result<bool, InputError> {
        self.peek_fully_internal(target, true)
    }

    /// Advances the peek cursor by exactly `length` bytes, buffering them
    /// without copying anything out.
    pub fn advance_peek_position(&mut self, length: usize) -> Result<(), InputError> {
        self.advance_peek_internal(length, false).map(|_| ())
    }

    pub fn advance_peek_position_or_eof(&mut self, length: usize) -> Result<bool, InputError> {
        self.advance_peek_internal(length, true)
    }

    /// Moves the peek cursor back to the read position. Buffered bytes are
    /// kept and will be served again by both peeks and reads.
    pub fn reset_peek_position(&mut self) {
        self.buffer.reset_peek();
    }

    fn read_fully_internal(
        &mut self,
        target: &mut [u8],
        allow_eof: bool,
    ) -> Result<bool, InputError> {
        let mut bytes_read = self.buffer.drain_into(target);
        while bytes_read < target.len() {
            match Self::pull(&mut self.source, &mut target[bytes_read..])? {
                Some(n) => bytes_read += n,
                None => return self.clean_eof(bytes_read, allow_eof),
            }
        }
        self.position += bytes_read as u64;
        Ok(true)
    }

    fn skip_fully_internal(&mut self, length: usize, allow_eof: bool) -> Result<bool, InputError> {
        let mut bytes_skipped = self.buffer.drain(length);
        let mut scratch = [0u8; SKIP_SCRATCH_LEN];
        while bytes_skipped < length {
            let step = (length - bytes_skipped).min(SKIP_SCRATCH_LEN);
            match Self::pull(&mut self.source, &mut scratch[..step])? {
                Some(n) => bytes_skipped += n,
                None => return self.clean_eof(bytes_skipped, allow_eof),
            }
        }
        self.position += bytes_skipped as u64;
        Ok(true)
    }

    fn peek_fully_internal(
        &mut self,
        target: &mut [u8],
        allow_eof: bool,
    ) -> Result<bool, InputError> {
        if !self.advance_peek_internal(target.len(), allow_eof)? {
            return Ok(false);
        }
        target.copy_from_slice(self.buffer.peeked_slice(target.len()));
        Ok(true)
    }

    fn advance_peek_internal(&mut self, length: usize, allow_eof: bool) -> Result<bool, InputError> {
        self.buffer.ensure_space(length);
        let mut bytes_peeked = self.buffer.unpeeked();
        while bytes_peeked < length {
            match Self::pull(&mut self.source, self.buffer.fetch_slice(length))? {
                Some(n) => {
                    self.buffer.mark_filled(n);
                    bytes_peeked += n;
                }
                None => return self.clean_eof(bytes_peeked, allow_eof),
            }
        }
        self.buffer.advance_peek(length);
        Ok(true)
    }

    // A clean end of input is reported at most once; exact-length calls that
    // run into it again, or that already made partial progress, fail.
    fn clean_eof(&mut self, progress: usize, allow_eof: bool) -> Result<bool, InputError> {
        if progress == 0 && allow_eof && !self.reported_eof {
            self.reported_eof = true;
            return Ok(false);
        }
        Err(InputError::UnexpectedEof {
            position: self.position,
        })
    }

    fn pull(source: &mut S, target: &mut [u8]) -> Result<Option<usize>, InputError> {
        let outcome = source.read_into(target)?;
        if let Some(n) = outcome {
            debug_assert!(n > 0 && n <= target.len());
        }
        trace!(requested = target.len(), read = ?outcome, "source pull");
        Ok(outcome)
    }
}

impl<S: Source> Debug for ProbeInput<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeInput")
            .field("position", &self.position)
            .field("peek_position", &self.peek_position())
            .field("buffered", &self.buffer.buffered())
            .finish()
    }
}

impl<S: Source> io::Read for ProbeInput<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match ProbeInput::read(self, buf) {
            Ok(Some(n)) => Ok(n),
            Ok(None) => Ok(0),
            Err(InputError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::UnexpectedEof, e)),
        }
    }
}
