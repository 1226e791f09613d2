use bytes::{Buf, Bytes};
use std::io::Read;

/// A blocking byte provider with a distinct end-of-input signal.
///
/// `read_into` writes at most `target.len()` bytes at the front of `target`
/// and returns `Ok(Some(n))` with `1 <= n <= target.len()` when `target` is
/// non-empty, or `Ok(Some(0))` for an empty `target`. `Ok(None)` means the
/// source is exhausted and no byte will ever be available again. Errors are
/// plain I/O errors and are never retried by callers.
///
/// Sources are owned by whoever constructs them and are never closed by the
/// input wrapper.
pub trait Source {
    fn read_into(&mut self, target: &mut [u8]) -> std::io::Result<Option<usize>>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read_into(&mut self, target: &mut [u8]) -> std::io::Result<Option<usize>> {
        (**self).read_into(target)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn read_into(&mut self, target: &mut [u8]) -> std::io::Result<Option<usize>> {
        (**self).read_into(target)
    }
}

/// Adapts any [std::io::Read] into a [Source]. A zero-byte read on a
/// non-empty buffer is mapped to the end-of-input signal.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn read_into(&mut self, target: &mut [u8]) -> std::io::Result<Option<usize>> {
        if target.is_empty() {
            return Ok(Some(0));
        }
        match self.inner.read(target)? {
            0 => Ok(None),
            n => Ok(Some(n)),
        }
    }
}

/// An in-memory [Source] over [Bytes].
#[derive(Debug, Clone)]
pub struct BytesSource {
    data: Bytes,
}

impl BytesSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    pub fn remaining(&self) -> usize {
        self.data.remaining()
    }
}

impl Source for BytesSource {
    fn read_into(&mut self, target: &mut [u8]) -> std::io::Result<Option<usize>> {
        if target.is_empty() {
            return Ok(Some(0));
        }
        if !self.data.has_remaining() {
            return Ok(None);
        }
        let n = target.len().min(self.data.remaining());
        self.data.copy_to_slice(&mut target[..n]);
        Ok(Some(n))
    }
}
