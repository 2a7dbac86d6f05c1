//! Errors to do with parsing release tags.

use thiserror::Error;

/// The result type for use when working with release tags.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The tag does not follow the
    /// `v<version>[-<suffix>]-<timestamp>-<sha1>[-<os>-<arch>]` naming
    /// convention. The second field describes what went wrong.
    #[error("Cannot parse release tag `{_0}`: {_1}")]
    InvalidTag(String, String),
}
