use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("digest length {length} exceeds buffer of {available} bytes")]
    LengthOutOfBounds { length: usize, available: usize },
}
