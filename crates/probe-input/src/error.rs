#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unexpected end of input at position {position}")]
    UnexpectedEof { position: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
