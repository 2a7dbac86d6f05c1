//! Errors produced while identifying the local operating system and
//! architecture.

use thiserror::Error;

/// The result type for use in system detection.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The running operating system is not one we know how to identify.
    #[error("Unsupported operating system: {_0}")]
    UnsupportedOperatingSystem(String),

    /// The os-release file could not be read. The fields are the path and the
    /// underlying IO error message.
    ///
    /// We keep the message rather than the [`std::io::Error`] itself so that
    /// this type stays [`Clone`] and comparable.
    #[error("Could not read {_0}: {_1}")]
    OsReleaseUnreadable(String, String),

    /// The os-release file is missing a field that we need.
    #[error("The os-release file does not define {_0}")]
    MissingOsReleaseField(String),

    /// Querying the macOS product version failed.
    #[error("Could not determine the macOS version: {_0}")]
    MacosVersionUnavailable(String),
}
