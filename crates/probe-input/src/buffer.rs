// Scratch arena growth granularity.
const MIN_FREE_AFTER_RESIZE: usize = 64 * 1024;
const MAX_FREE: usize = 512 * 1024;

/// Contiguous byte arena holding bytes fetched ahead of the committed read
/// position. `len` is the high-water mark of valid bytes; `peek_offset` is
/// how far into them the peek cursor has advanced.
#[derive(Debug, Default)]
pub(crate) struct PeekBuffer {
    data: Vec<u8>,
    len: usize,
    peek_offset: usize,
}

impl PeekBuffer {
    pub(crate) fn buffered(&self) -> usize {
        self.len
    }

    pub(crate) fn peeked(&self) -> usize {
        self.peek_offset
    }

    pub(crate) fn unpeeked(&self) -> usize {
        self.len - self.peek_offset
    }

    pub(crate) fn reset_peek(&mut self) {
        self.peek_offset = 0;
    }

    pub(crate) fn advance_peek(&mut self, n: usize) {
        debug_assert!(self.peek_offset + n <= self.len);
        self.peek_offset += n;
    }

    /// Grows the arena so that `length` bytes fit past the peek cursor.
    pub(crate) fn ensure_space(&mut self, length: usize) {
        let required = self.peek_offset + length;
        if required <= self.data.len() {
            return;
        }
        let grown = (self.data.len() * 2)
            .clamp(required + MIN_FREE_AFTER_RESIZE, required + MAX_FREE);
        self.data.resize(grown, 0);
    }

    /// The writable region between the high-water mark and `length` bytes
    /// past the peek cursor. Call `ensure_space(length)` first.
    pub(crate) fn fetch_slice(&mut self, length: usize) -> &mut [u8] {
        let end = self.peek_offset + length;
        &mut self.data[self.len..end]
    }

    pub(crate) fn mark_filled(&mut self, n: usize) {
        self.len += n;
        debug_assert!(self.len <= self.data.len());
    }

    /// The `length` bytes just consumed by the peek cursor.
    pub(crate) fn peeked_slice(&self, length: usize) -> &[u8] {
        &self.data[self.peek_offset - length..self.peek_offset]
    }

    /// Up to `length` buffered bytes not yet consumed by the peek cursor.
    pub(crate) fn unpeeked_slice(&self, length: usize) -> &[u8] {
        &self.data[self.peek_offset..self.peek_offset + length]
    }

    /// Copies buffered bytes from the front into `target` and drops them.
    pub(crate) fn drain_into(&mut self, target: &mut [u8]) -> usize {
        let n = self.len.min(target.len());
        if n == 0 {
            return 0;
        }
        target[..n].copy_from_slice(&self.data[..n]);
        self.consume(n);
        n
    }

    /// Drops up to `length` buffered bytes from the front.
    pub(crate) fn drain(&mut self, length: usize) -> usize {
        let n = self.len.min(length);
        if n > 0 {
            self.consume(n);
        }
        n
    }

    fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len);
        self.data.copy_within(n..self.len, 0);
        self.len -= n;
        self.peek_offset = self.peek_offset.saturating_sub(n);
        if self.data.len() > self.len + MAX_FREE {
            self.data.truncate(self.len + MIN_FREE_AFTER_RESIZE);
            self.data.shrink_to_fit();
        }
    }
}
