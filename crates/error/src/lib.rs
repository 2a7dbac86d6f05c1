//! Error handling types and utilities for the LLVM installer.
//!
//! # Error Conventions
//!
//! As we are providing a library that build systems may want to call from
//! _code_ as well as from the CLI driver, we keep our errors strongly typed at
//! all times. While libraries like
//! [anyhow](https://docs.rs/anyhow/latest/anyhow/) are well-suited for
//! application code, they make it more difficult than is necessary to handle
//! specific errors in library code. Each concern gets its own module with its
//! own `Error` and `Result`, and all of them convert into the root [`Error`].

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod resolve;
pub mod system;
pub mod tag;

use thiserror::Error;

/// The result type to be used at the boundaries of the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The root of the error hierarchy for the installer.
///
/// Any function that combines several concerns (for example, detecting the
/// local system and then resolving a package for it) should return this error
/// type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] resolve::Error),

    #[error(transparent)]
    System(#[from] system::Error),

    #[error(transparent)]
    Tag(#[from] tag::Error),
}
