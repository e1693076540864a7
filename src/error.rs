//! Ready-made step error for callers without an error type of their own.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl Error {
    /// Builds an error from a message.
    ///
    /// ```rust
    /// use qflow::Error;
    ///
    /// assert_eq!(Error::msg("die").to_string(), "die");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }
}
