//! This library finds the download URL of a pre-built
//! [LLVM](https://llvm.org) toolchain package that matches a given operating
//! system, OS version, CPU architecture and LLVM major version. It exists so
//! that build systems can fetch a compiler toolchain instead of building LLVM
//! from source.
//!
//! It only _computes_ URLs. Downloading, verifying and unpacking the packages
//! is left to the caller.
//!
//! # Process Overview
//!
//! 1. The packages we know about are described by their GitHub release tags,
//!    which are compiled into the library (see [`tag::releases`]) and parsed
//!    once on first use into a [`PackageCollection`].
//! 2. A [`Resolver`] is created for a short OS name and version (such as
//!    `ubuntu22.04`) and an architecture (such as `x86_64`). These usually
//!    come from the [`system`] module, but callers are free to pass their own.
//! 3. Asking the resolver for an LLVM major version selects the newest
//!    matching release tag, taking the OS aliases in [`os`] into account, and
//!    formats it into a URL using a [`UrlLayout`].
//!
//! ```
//! use llvm_installer::Resolver;
//!
//! let url = Resolver::new("almalinux8", "x86_64").get_llvm_url(14).unwrap();
//! assert!(url.ends_with(".tar.gz"));
//! assert!(url.contains("/v14."));
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod collection;
pub mod constant;
pub mod layout;
pub mod os;
pub mod resolver;
pub mod system;
pub mod tag;
pub mod target;

pub use collection::PackageCollection;
pub use layout::UrlLayout;
pub use resolver::{resolve, Resolver};
pub use system::{LocalSystem, SystemInfo};
pub use tag::ReleaseTag;
pub use target::SupportedTarget;
