use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerceptionErrorKind {
    EmptyInput,
    Generation,
    Parse,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerceptionError {
    pub kind: PerceptionErrorKind,
    pub message: String,
}

impl PerceptionError {
    pub fn new(kind: PerceptionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PerceptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PerceptionError {}

pub fn empty_input(message: impl Into<String>) -> PerceptionError {
    PerceptionError::new(PerceptionErrorKind::EmptyInput, message)
}

pub fn generation_failure(message: impl Into<String>) -> PerceptionError {
    PerceptionError::new(PerceptionErrorKind::Generation, message)
}

pub fn parse_failure(message: impl Into<String>) -> PerceptionError {
    PerceptionError::new(PerceptionErrorKind::Parse, message)
}

pub fn internal_error(message: impl Into<String>) -> PerceptionError {
    PerceptionError::new(PerceptionErrorKind::Internal, message)
}
