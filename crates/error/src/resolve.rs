//! Errors produced while resolving a request to a pre-built LLVM package.

use thiserror::Error;

/// The result type for use in the resolver.
pub type Result<T> = std::result::Result<T, Error>;

/// This error type is for use when mapping a target and an LLVM major version
/// to a package.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Emitted when no package in the table matches the requested combination
    /// of OS, architecture and LLVM major version.
    ///
    /// The fields are those of the request that could not be satisfied.
    #[error(
        "Could not find a pre-built LLVM package for major LLVM version {major_llvm_version}, \
         OS/version {short_os_name_and_version}, architecture {architecture}"
    )]
    UnsupportedTarget {
        short_os_name_and_version: String,
        architecture:              String,
        major_llvm_version:        u32,
    },
}
