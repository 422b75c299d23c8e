//! Centralized error handling for kernelview

use std::io;
use thiserror::Error;

/// Error raised by a probe helper before it is collapsed to a fallback string
#[derive(Error, Debug)]
pub enum KernelviewError {
    /// I/O errors (file reading, spawning a command)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The fact is not available on this host
    #[error("Detection error: {0}")]
    Detection(String),

    /// An external command ran but exited unsuccessfully
    #[error("Command '{program}' failed with exit code: {code:?}")]
    Command { program: String, code: Option<i32> },
}

impl KernelviewError {
    pub fn detection<S: Into<String>>(msg: S) -> Self {
        KernelviewError::Detection(msg.into())
    }

    pub fn parse<S: Into<String>>(msg: S) -> Self {
        KernelviewError::Parse(msg.into())
    }
}

/// Type alias for Results in kernelview
pub type Result<T> = std::result::Result<T, KernelviewError>;
