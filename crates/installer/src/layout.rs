//! The naming convention that turns a release tag into a download URL.

use crate::constant::{
    DEFAULT_GITHUB_RELEASE_URL_PREFIX,
    DEFAULT_PACKAGE_NAME_PREFIX,
    DEFAULT_PACKAGE_NAME_SUFFIX,
};

/// Describes where the package for a release tag is published.
///
/// The URL for a tag is
/// `<release_url_prefix>/<tag>/<package_name_prefix><tag><package_name_suffix>`.
/// Downstream tools build local file paths from the same convention, so the
/// defaults must stay stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlLayout {
    /// The URL under which each release is a directory, without a trailing
    /// slash.
    release_url_prefix: String,

    /// Placed before the tag in the package file name.
    package_name_prefix: String,

    /// Placed after the tag in the package file name.
    package_name_suffix: String,
}

impl UrlLayout {
    /// Constructs a new layout. A single trailing `/` on `release_url_prefix`
    /// is dropped.
    #[must_use]
    pub fn new(
        release_url_prefix: impl Into<String>,
        package_name_prefix: impl Into<String>,
        package_name_suffix: impl Into<String>,
    ) -> Self {
        let mut release_url_prefix = release_url_prefix.into();
        if release_url_prefix.ends_with('/') {
            release_url_prefix.pop();
        }

        Self {
            release_url_prefix,
            package_name_prefix: package_name_prefix.into(),
            package_name_suffix: package_name_suffix.into(),
        }
    }

    #[must_use]
    pub fn release_url_prefix(&self) -> &str {
        &self.release_url_prefix
    }

    #[must_use]
    pub fn package_name_prefix(&self) -> &str {
        &self.package_name_prefix
    }

    #[must_use]
    pub fn package_name_suffix(&self) -> &str {
        &self.package_name_suffix
    }

    /// Gets the file name of the package published under `tag`.
    #[must_use]
    pub fn package_file_name(&self, tag: &str) -> String {
        format!(
            "{}{tag}{}",
            self.package_name_prefix, self.package_name_suffix
        )
    }

    /// Gets the download URL of the package published under `tag`.
    ///
    /// ```
    /// use llvm_installer::UrlLayout;
    ///
    /// let layout = UrlLayout::new("https://example.com/releases/", "llvm-", ".tar.xz");
    /// assert_eq!(
    ///     layout.url_for_tag("v1.2.3"),
    ///     "https://example.com/releases/v1.2.3/llvm-v1.2.3.tar.xz"
    /// );
    /// ```
    #[must_use]
    pub fn url_for_tag(&self, tag: &str) -> String {
        format!(
            "{}/{tag}/{}",
            self.release_url_prefix,
            self.package_file_name(tag)
        )
    }
}

impl Default for UrlLayout {
    /// The layout of the packages published by the build-clang project.
    fn default() -> Self {
        Self::new(
            DEFAULT_GITHUB_RELEASE_URL_PREFIX,
            DEFAULT_PACKAGE_NAME_PREFIX,
            DEFAULT_PACKAGE_NAME_SUFFIX,
        )
    }
}
