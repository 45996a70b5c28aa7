use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextGenErrorKind {
    NotAvailable,
    Timeout,
    JsonNotFound,
    JsonDecode,
    InvalidRequest,
    Internal,
}

/// Typed generation failure. `raw` keeps the unparsed reply for the JSON
/// extraction kinds so callers can log what the backend actually said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGenError {
    pub kind: TextGenErrorKind,
    pub message: String,
    pub raw: Option<String>,
}

impl TextGenError {
    pub fn new(kind: TextGenErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

impl fmt::Display for TextGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TextGenError {}

pub fn not_available(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::NotAvailable, message)
}

pub fn generation_timeout(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::Timeout, message)
}

pub fn json_not_found(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::JsonNotFound, message)
}

pub fn json_decode(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::JsonDecode, message)
}

pub fn invalid_request(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::InvalidRequest, message)
}

pub fn internal_error(message: impl Into<String>) -> TextGenError {
    TextGenError::new(TextGenErrorKind::Internal, message)
}
