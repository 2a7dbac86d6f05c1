//! A summary view of the packages available for each target.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
};

use itertools::Itertools;

/// A combination of OS and architecture for which at least one pre-built
/// package exists, along with the LLVM major versions that are available for
/// it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SupportedTarget {
    pub short_os_name_and_version: String,
    pub architecture:              String,
    pub major_versions:            BTreeSet<u32>,
}

impl SupportedTarget {
    /// Checks whether a package for `major_llvm_version` exists for this
    /// target.
    #[must_use]
    pub fn supports(&self, major_llvm_version: u32) -> bool {
        self.major_versions.contains(&major_llvm_version)
    }
}

impl Display for SupportedTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.short_os_name_and_version,
            self.architecture,
            self.major_versions.iter().join(", ")
        )
    }
}
