//! Release tags are the names of the GitHub releases under which the pre-built
//! LLVM packages are published. A tag encodes everything we need to know about
//! the package it names:
//!
//! ```text
//! v14.0.6-yb-1-1662604533-ba3d6a9e-almalinux8-x86_64
//! ^^^^^^^ ^^^^ ^^^^^^^^^^ ^^^^^^^^ ^^^^^^^^^^ ^^^^^^
//! version  |   timestamp  sha1     OS/version arch
//!          suffix (optional)
//! ```
//!
//! Tags created before the OS and architecture components were introduced end
//! after the sha1 prefix. All of those builds were made for CentOS 7 on
//! `x86_64`, and we treat them as such.

pub mod releases;

use std::fmt::{Display, Formatter};

use chumsky::Parser;
use llvm_installer_errors::tag::{Error, Result};

use crate::{
    constant::{
        DEFAULT_ARCHITECTURE_FOR_OLD_BUILDS,
        DEFAULT_SHORT_OS_NAME_AND_VERSION_FOR_OLD_BUILDS,
    },
    os::is_compatible_os,
};

/// The components by which two builds of the same target are ordered, from
/// most to least significant: the major, minor and patch versions, the number
/// following `yb-` in the suffix (or zero), and the build timestamp.
pub type VersionTuple = (u32, u32, u32, u32, u64);

/// A parsed release tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseTag {
    /// The tag exactly as it was given to us.
    pub tag: String,

    /// The dotted LLVM version without the leading `v`, e.g. `14.0.6`.
    pub version: String,

    /// The optional suffix between the version and the timestamp, e.g. `yb-1`.
    pub version_suffix: Option<String>,

    /// The time at which the package was built, in seconds since the epoch.
    pub timestamp: u64,

    /// The prefix of the build-clang commit that produced the package.
    pub sha1_prefix: String,

    /// The short OS name and version the package was built for.
    pub short_os_name_and_version: String,

    /// The CPU architecture the package was built for.
    pub architecture: String,

    pub major_version: u32,
    pub minor_version: u32,
    pub patch_version: u32,

    /// The number following `yb-` in [`Self::version_suffix`], if any.
    pub yb_suffix_version: Option<u32>,

    /// Whether the tag predates the OS and architecture components, in which
    /// case those fields hold the defaults for old builds.
    pub is_old_tag_without_os_and_arch: bool,
}

impl ReleaseTag {
    /// Parses the provided `tag`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTag`] if `tag` does not follow the release tag naming
    ///   convention.
    pub fn parse(tag: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidTag(tag.to_string(), reason.to_string());

        let parts: Vec<&str> = tag.split(parsing::ELEMENT_SEPARATOR).collect();
        let Some((version_part, rest)) = parts.split_first() else {
            return Err(invalid("the tag is empty"));
        };
        let (major_version, minor_version, patch_version) = parsing::version()
            .parse(*version_part)
            .map_err(|_| invalid("expected a version of the form v<major>.<minor>.<patch>"))?;

        // The OS and architecture are only present if _both_ of the final elements
        // look the part, otherwise we are looking at an old tag.
        let (rest, os_and_arch) = match rest {
            [init @ .., os, arch]
                if parsing::short_os_name_and_version().parse(*os).is_ok()
                    && parsing::architecture().parse(*arch).is_ok() =>
            {
                (init, Some(((*os).to_string(), (*arch).to_string())))
            }
            _ => (rest, None),
        };

        let [suffix @ .., timestamp, sha1_prefix] = rest else {
            return Err(invalid("expected a timestamp followed by a sha1 prefix"));
        };
        let timestamp = parsing::timestamp()
            .parse(*timestamp)
            .map_err(|_| invalid("the timestamp is not a number"))?;
        let sha1_prefix = parsing::sha1_prefix()
            .parse(*sha1_prefix)
            .map_err(|_| invalid("the sha1 prefix is not lowercase hexadecimal"))?;

        if suffix.iter().any(|s| parsing::suffix_element().parse(*s).is_err()) {
            return Err(invalid("the version suffix may only contain [a-z0-9-]"));
        }
        let version_suffix = (!suffix.is_empty()).then(|| suffix.join("-"));
        let yb_suffix_version = match version_suffix.as_deref().and_then(|s| s.strip_prefix("yb-")) {
            Some(number) => Some(
                number
                    .parse::<u32>()
                    .map_err(|_| invalid("the number after `yb-` is not an integer"))?,
            ),
            None => None,
        };

        let is_old_tag_without_os_and_arch = os_and_arch.is_none();
        let (short_os_name_and_version, architecture) = os_and_arch.unwrap_or_else(|| {
            (
                DEFAULT_SHORT_OS_NAME_AND_VERSION_FOR_OLD_BUILDS.to_string(),
                DEFAULT_ARCHITECTURE_FOR_OLD_BUILDS.to_string(),
            )
        });

        Ok(Self {
            tag: tag.to_string(),
            version: version_part[1..].to_string(),
            version_suffix,
            timestamp,
            sha1_prefix,
            short_os_name_and_version,
            architecture,
            major_version,
            minor_version,
            patch_version,
            yb_suffix_version,
            is_old_tag_without_os_and_arch,
        })
    }

    /// Gets the tuple by which builds of the same target are ranked, where a
    /// greater tuple is a newer build.
    #[must_use]
    pub fn version_tuple(&self) -> VersionTuple {
        (
            self.major_version,
            self.minor_version,
            self.patch_version,
            self.yb_suffix_version.unwrap_or(0),
            self.timestamp,
        )
    }

    /// Gets the key by which tags are ordered for display, grouping them by
    /// major version and then by target.
    #[must_use]
    pub fn sort_key(&self) -> (u32, &str, &str, u64, &str, &str, &str) {
        (
            self.major_version,
            &self.short_os_name_and_version,
            &self.architecture,
            self.timestamp,
            &self.sha1_prefix,
            &self.tag,
            self.version_suffix.as_deref().unwrap_or(""),
        )
    }

    /// Checks whether this tag names a package for `major_llvm_version` that
    /// runs on `short_os_name_and_version` and `architecture`.
    #[must_use]
    pub fn matches(
        &self,
        major_llvm_version: u32,
        short_os_name_and_version: &str,
        architecture: &str,
    ) -> bool {
        self.major_version == major_llvm_version
            && is_compatible_os(&self.short_os_name_and_version, short_os_name_and_version)
            && self.architecture == architecture
    }
}

impl Display for ReleaseTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (LLVM {}, {}, {})",
            self.tag, self.version, self.short_os_name_and_version, self.architecture
        )
    }
}

/// Parsers for the individual `-`-separated elements of a release tag.
pub mod parsing {
    use chumsky::{
        error::Simple,
        prelude::{end, filter, just},
        text::int,
        Parser,
    };

    use crate::constant::{KNOWN_ARCHITECTURES, KNOWN_OS_NAMES};

    /// The separator between the elements of a tag.
    pub const ELEMENT_SEPARATOR: char = '-';

    /// Simply to avoid typing out the whole parser type parameter specification
    /// every single time given it only varies in one parameter.
    pub trait TagParser<T>: Parser<char, T, Error = Simple<char>> {}

    impl<T, U> TagParser<T> for U where U: Parser<char, T, Error = Simple<char>> {}

    /// Parses a non-negative decimal integer that fits in a `u32`.
    #[must_use]
    pub fn number() -> impl TagParser<u32> {
        int(10).try_map(|num: String, span| {
            num.parse::<u32>()
                .map_err(|_| Simple::custom(span, format!("Could not parse {num} as a number")))
        })
    }

    /// Parses the version element, e.g. `v14.0.6`, into its major, minor and
    /// patch components.
    #[must_use]
    pub fn version() -> impl TagParser<(u32, u32, u32)> {
        just('v')
            .ignore_then(number())
            .then_ignore(just('.'))
            .then(number())
            .then_ignore(just('.'))
            .then(number())
            .then_ignore(end())
            .map(|((major, minor), patch)| (major, minor, patch))
    }

    /// Parses the build timestamp element.
    #[must_use]
    pub fn timestamp() -> impl TagParser<u64> {
        int(10)
            .try_map(|num: String, span| {
                num.parse::<u64>().map_err(|_| {
                    Simple::custom(span, format!("Could not parse {num} as a timestamp"))
                })
            })
            .then_ignore(end())
    }

    /// Parses the lowercase hexadecimal commit prefix element.
    #[must_use]
    pub fn sha1_prefix() -> impl TagParser<String> {
        filter(|c: &char| c.is_ascii_digit() || ('a'..='f').contains(c))
            .repeated()
            .at_least(1)
            .collect::<String>()
            .then_ignore(end())
    }

    /// Parses one element of the optional version suffix.
    #[must_use]
    pub fn suffix_element() -> impl TagParser<String> {
        filter(|c: &char| c.is_ascii_lowercase() || c.is_ascii_digit())
            .repeated()
            .at_least(1)
            .collect::<String>()
            .then_ignore(end())
    }

    /// Parses the short OS name and version element, e.g. `ubuntu22.04`.
    ///
    /// The name must be one of [`KNOWN_OS_NAMES`].
    #[must_use]
    pub fn short_os_name_and_version() -> impl TagParser<String> {
        filter(char::is_ascii_lowercase)
            .repeated()
            .at_least(1)
            .collect::<String>()
            .try_map(|name: String, span| {
                if KNOWN_OS_NAMES.contains(&name.as_str()) {
                    Ok(name)
                } else {
                    Err(Simple::custom(span, format!("{name} is not a known OS name")))
                }
            })
            .then(
                filter(|c: &char| c.is_ascii_digit() || *c == '.')
                    .repeated()
                    .collect::<String>(),
            )
            .then_ignore(end())
            .map(|(name, version)| name + &version)
    }

    /// Parses the architecture element, which must be one of
    /// [`KNOWN_ARCHITECTURES`].
    #[must_use]
    pub fn architecture() -> impl TagParser<String> {
        filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
            .repeated()
            .at_least(1)
            .collect::<String>()
            .try_map(|arch: String, span| {
                if KNOWN_ARCHITECTURES.contains(&arch.as_str()) {
                    Ok(arch)
                } else {
                    Err(Simple::custom(span, format!("{arch} is not a known architecture")))
                }
            })
            .then_ignore(end())
    }
}
