use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryErrorKind {
    Io,
    Serialization,
    Versioning,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryError {
    pub kind: MemoryErrorKind,
    pub message: String,
}

impl MemoryError {
    pub fn new(kind: MemoryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for MemoryError {}

pub fn io_error(message: impl Into<String>) -> MemoryError {
    MemoryError::new(MemoryErrorKind::Io, message)
}

pub fn serialization_error(message: impl Into<String>) -> MemoryError {
    MemoryError::new(MemoryErrorKind::Serialization, message)
}

pub fn version_error(message: impl Into<String>) -> MemoryError {
    MemoryError::new(MemoryErrorKind::Versioning, message)
}

pub fn internal_error(message: impl Into<String>) -> MemoryError {
    MemoryError::new(MemoryErrorKind::Internal, message)
}
