//! Error handling for window effects.
//!
//! Native call failures, invalid handles and failed commit steps all surface
//! as [`Error`]. Personalization reads are the exception: they are best effort
//! and never return an error to the caller (see [`crate::theme`]).

use crate::fluent::Step;
use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A Windows API error with its error code.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    /// A null or destroyed window handle was passed to a native call.
    #[error("Invalid window handle: {context}")]
    InvalidHandle {
        /// Description of where the handle was rejected.
        context: &'static str,
    },

    /// One step of an effect commit failed. Steps before it were applied,
    /// steps after it were not attempted.
    #[error("{step} failed: {source}")]
    Step {
        /// The step that failed.
        step: Step,
        /// The underlying failure.
        source: Box<Error>,
    },

    /// Text could not be parsed as a color.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A stored value had a type this crate does not decode.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// A custom error with a message.
    #[error("{0}")]
    Custom(String),
}

/// A specialized `Result` type for window effect operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new invalid handle error with the given context.
    pub fn invalid_handle(context: &'static str) -> Self {
        Error::InvalidHandle { context }
    }

    /// Wraps an error with the commit step it came from.
    pub fn step(step: Step, source: Error) -> Self {
        Error::Step {
            step,
            source: Box::new(source),
        }
    }

    /// Creates a new invalid color error.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Error::InvalidColor(msg.into())
    }

    /// Creates a new unsupported value error.
    pub fn unsupported_value(msg: impl Into<String>) -> Self {
        Error::UnsupportedValue(msg.into())
    }

    /// Creates a custom error with the given message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Error::Custom(msg.into())
    }

    /// Returns the failed commit step, if this error came from one.
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            Error::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Returns the Windows error code if this is (or wraps) a Windows error.
    #[cfg(windows)]
    pub fn win32_error_code(&self) -> Option<u32> {
        match self {
            Error::Windows(e) => Some(e.code().0 as u32),
            Error::Step { source, .. } => source.win32_error_code(),
            _ => None,
        }
    }
}

/// Extension trait for converting Windows `Result` types.
#[cfg(windows)]
pub trait ResultExt<T> {
    /// Converts a Windows result to our Result type.
    fn to_result(self) -> Result<T>;
}

#[cfg(windows)]
impl<T> ResultExt<T> for windows::core::Result<T> {
    fn to_result(self) -> Result<T> {
        self.map_err(Error::from)
    }
}

/// Gets the last Windows error as our Error type.
#[cfg(windows)]
pub fn last_error() -> Error {
    Error::Windows(windows::core::Error::from_win32())
}

/// Checks if the last error indicates success and returns Ok(()), otherwise returns the error.
#[cfg(windows)]
pub fn check_last_error() -> Result<()> {
    let err = windows::core::Error::from_win32();
    if err.code().is_ok() {
        Ok(())
    } else {
        Err(Error::Windows(err))
    }
}
