//! Feed errors

/// Errors raised by producers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("Unknown news category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
