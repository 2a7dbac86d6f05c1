//! Resolution of a target and an LLVM major version to a package URL.

use llvm_installer_errors::{
    resolve::{Error, Result},
    system,
};
use tracing::{debug, warn};

use crate::{
    collection::PackageCollection,
    layout::UrlLayout,
    system::SystemInfo,
    tag::ReleaseTag,
};

/// Finds the pre-built LLVM package for a single target.
///
/// A resolver is bound to a short OS name and version (e.g. `ubuntu22.04`) and
/// an architecture (e.g. `aarch64`), and can then be asked for the package of
/// any LLVM major version. Resolution is a pure lookup in the
/// [`PackageCollection`], so repeated calls always give the same answer.
///
/// # Selection
///
/// Of the packages whose major version and architecture match exactly and
/// whose OS is compatible with ours (see [`crate::os`]), the one with the
/// greatest [`ReleaseTag::version_tuple`] is selected. If several share that
/// tuple, the first of them in table order wins.
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    short_os_name_and_version: String,
    architecture:              String,
    layout:                    UrlLayout,
    packages:                  &'a PackageCollection,
}

impl Resolver<'static> {
    /// Constructs a resolver for the provided target that uses the built-in
    /// package table and the default [`UrlLayout`].
    #[must_use]
    pub fn new(
        short_os_name_and_version: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            short_os_name_and_version: short_os_name_and_version.into(),
            architecture:              architecture.into(),
            layout:                    UrlLayout::default(),
            packages:                  PackageCollection::builtin(),
        }
    }

    /// Constructs a resolver for the system described by `system`.
    ///
    /// # Errors
    ///
    /// - [`system::Error`] if the OS or the architecture cannot be determined.
    pub fn for_system(system: &impl SystemInfo) -> system::Result<Self> {
        Ok(Self::new(
            system.short_os_name_and_version()?,
            system.architecture()?,
        ))
    }
}

impl<'a> Resolver<'a> {
    /// Specifies the layout used to turn the selected tag into a URL.
    ///
    /// # API Style
    ///
    /// Please note that this consumes `self` and is hence designed to have calls
    /// chained in the "fluent" API style.
    #[must_use]
    pub fn with_layout(mut self, layout: UrlLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Specifies the table of packages to select from.
    ///
    /// # API Style
    ///
    /// Please note that this consumes `self` and is hence designed to have calls
    /// chained in the "fluent" API style.
    #[must_use]
    pub fn with_packages<'b>(self, packages: &'b PackageCollection) -> Resolver<'b> {
        Resolver {
            short_os_name_and_version: self.short_os_name_and_version,
            architecture:              self.architecture,
            layout:                    self.layout,
            packages,
        }
    }

    /// Gets the short OS name and version this resolver selects packages for.
    #[must_use]
    pub fn short_os_name_and_version(&self) -> &str {
        &self.short_os_name_and_version
    }

    /// Gets the architecture this resolver selects packages for.
    #[must_use]
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// Gets the layout used to turn the selected tag into a URL.
    #[must_use]
    pub fn layout(&self) -> &UrlLayout {
        &self.layout
    }

    /// Selects the release tag of the package for `major_llvm_version`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedTarget`] if there is no package for
    ///   `major_llvm_version` on this resolver's target.
    pub fn get_release_tag(&self, major_llvm_version: u32) -> Result<&'a ReleaseTag> {
        let packages = self.packages;
        let selected = packages
            .filter(
                major_llvm_version,
                &self.short_os_name_and_version,
                &self.architecture,
            )
            .reduce(|best, candidate| {
                // Strictly greater, so that the earlier of two equal candidates is kept.
                if candidate.version_tuple() > best.version_tuple() {
                    candidate
                } else {
                    best
                }
            });

        match selected {
            Some(tag) => {
                debug!(
                    tag = %tag.tag,
                    os = %self.short_os_name_and_version,
                    arch = %self.architecture,
                    "Selected LLVM {major_llvm_version} package"
                );
                Ok(tag)
            }
            None => {
                let err = Error::UnsupportedTarget {
                    short_os_name_and_version: self.short_os_name_and_version.clone(),
                    architecture:              self.architecture.clone(),
                    major_llvm_version,
                };
                warn!(
                    "{err}. Available packages:\n{}",
                    packages.one_per_line(4)
                );
                Err(err)
            }
        }
    }

    /// Gets the download URL of the package for `major_llvm_version`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedTarget`] if there is no package for
    ///   `major_llvm_version` on this resolver's target.
    pub fn get_llvm_url(&self, major_llvm_version: u32) -> Result<String> {
        let tag = self.get_release_tag(major_llvm_version)?;
        Ok(self.layout.url_for_tag(&tag.tag))
    }
}

/// Gets the download URL of the built-in package for `major_llvm_version` on
/// the target given by `short_os_name_and_version` and `architecture`, using
/// the default [`UrlLayout`].
///
/// # Errors
///
/// - [`Error::UnsupportedTarget`] if there is no such package.
pub fn resolve(
    short_os_name_and_version: &str,
    architecture: &str,
    major_llvm_version: u32,
) -> Result<String> {
    Resolver::new(short_os_name_and_version, architecture).get_llvm_url(major_llvm_version)
}
