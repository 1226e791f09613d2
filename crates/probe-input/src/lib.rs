mod buffer;
mod error;
mod input;
mod source;

#[cfg(test)]
mod tests;

pub use crate::error::InputError;
pub use crate::input::ProbeInput;
pub use crate::source::{BytesSource, ReaderSource, Source};
