//! The table of known packages.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::LazyLock,
};

use itertools::Itertools;
use llvm_installer_errors::tag::Result;

use crate::{
    tag::{releases::RELEASE_TAGS, ReleaseTag},
    target::SupportedTarget,
};

/// The packages compiled into the library, parsed on first use.
static BUILTIN: LazyLock<PackageCollection> = LazyLock::new(|| {
    PackageCollection::from_tags(RELEASE_TAGS)
        .expect("The built-in release tag table contains a tag that does not parse.")
});

/// An ordered, immutable collection of release tags.
///
/// The order of the tags is significant, as it breaks ties when selecting
/// between equally-ranked packages for a target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageCollection {
    release_tags: Vec<ReleaseTag>,
}

impl PackageCollection {
    /// Constructs a new collection from already-parsed `release_tags`.
    #[must_use]
    pub fn new(release_tags: Vec<ReleaseTag>) -> Self {
        Self { release_tags }
    }

    /// Parses each of `tags`, keeping their order.
    ///
    /// # Errors
    ///
    /// - [`llvm_installer_errors::tag::Error::InvalidTag`] for the first tag
    ///   that cannot be parsed.
    pub fn from_tags<S: AsRef<str>>(tags: impl IntoIterator<Item = S>) -> Result<Self> {
        let release_tags = tags
            .into_iter()
            .map(|tag| ReleaseTag::parse(tag.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(release_tags))
    }

    /// Parses a list of release tags given one per line, keeping their order.
    /// Surrounding whitespace is ignored, as are blank lines and lines starting
    /// with `#`.
    ///
    /// # Errors
    ///
    /// - [`llvm_installer_errors::tag::Error::InvalidTag`] for the first tag
    ///   that cannot be parsed.
    pub fn from_tag_list(contents: &str) -> Result<Self> {
        Self::from_tags(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Gets the collection of packages that are compiled into the library.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Gets the tags in the collection, in table order.
    #[must_use]
    pub fn release_tags(&self) -> &[ReleaseTag] {
        &self.release_tags
    }

    /// Gets the number of tags in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.release_tags.len()
    }

    /// Checks whether the collection contains no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.release_tags.is_empty()
    }

    /// Gets the tags, in table order, for packages of `major_llvm_version`
    /// that can be used on `short_os_name_and_version` and `architecture`.
    pub fn filter<'a, 'b>(
        &'a self,
        major_llvm_version: u32,
        short_os_name_and_version: &'b str,
        architecture: &'b str,
    ) -> impl Iterator<Item = &'a ReleaseTag> + 'b
    where
        'a: 'b,
    {
        self.release_tags.iter().filter(move |tag| {
            tag.matches(major_llvm_version, short_os_name_and_version, architecture)
        })
    }

    /// Summarizes the collection as the set of targets it has packages for.
    ///
    /// The targets are ordered by OS and then by architecture. Aliases are not
    /// expanded, so each target appears under the name its packages were built
    /// for.
    #[must_use]
    pub fn supported_targets(&self) -> Vec<SupportedTarget> {
        let mut targets: BTreeMap<(&str, &str), BTreeSet<u32>> = BTreeMap::new();
        for tag in &self.release_tags {
            targets
                .entry((
                    tag.short_os_name_and_version.as_str(),
                    tag.architecture.as_str(),
                ))
                .or_default()
                .insert(tag.major_version);
        }

        targets
            .into_iter()
            .map(|((os, arch), major_versions)| SupportedTarget {
                short_os_name_and_version: os.to_string(),
                architecture:              arch.to_string(),
                major_versions,
            })
            .collect()
    }

    /// Renders the collection with one tag per line, each indented by `indent`
    /// spaces, ordered by [`ReleaseTag::sort_key`].
    #[must_use]
    pub fn one_per_line(&self, indent: usize) -> String {
        let indent_str = " ".repeat(indent);
        self.release_tags
            .iter()
            .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
            .map(|tag| format!("{indent_str}{tag}"))
            .join("\n")
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use itertools::Itertools;

    use crate::{
        collection::PackageCollection,
        constant::DEFAULT_LLVM_MAJOR_VERSION,
        tag::releases::RELEASE_TAGS,
    };

    #[test]
    fn builtin_table_parses() {
        let packages = PackageCollection::builtin();

        assert_eq!(packages.len(), RELEASE_TAGS.len());
        assert!(!packages.is_empty());
    }

    #[test]
    fn builtin_table_has_no_duplicates() {
        let packages = PackageCollection::builtin();

        let tags: HashSet<_> = packages.release_tags().iter().map(|t| &t.tag).collect();
        assert_eq!(tags.len(), packages.len());

        let builds: HashSet<_> = packages
            .release_tags()
            .iter()
            .map(|t| {
                (
                    &t.short_os_name_and_version,
                    &t.architecture,
                    t.version_tuple(),
                )
            })
            .collect();
        assert_eq!(builds.len(), packages.len());
    }

    #[test]
    fn every_builtin_target_has_the_default_version() {
        for target in PackageCollection::builtin().supported_targets() {
            assert!(
                target.supports(DEFAULT_LLVM_MAJOR_VERSION),
                "{target} lacks LLVM {DEFAULT_LLVM_MAJOR_VERSION}"
            );
        }
    }

    #[test]
    fn tag_lists_skip_blanks_and_comments() -> anyhow::Result<()> {
        let contents = [
            "# Published releases",
            "v13.0.0-yb-1-1639976983-4b60e646-centos7-x86_64",
            "",
            "  v12.0.1-1628032574-7c3f4f0b  ",
        ]
        .join("\n");
        let packages = PackageCollection::from_tag_list(&contents)?;

        let tags = packages.release_tags().iter().map(|t| t.tag.as_str()).collect_vec();
        assert_eq!(
            tags,
            vec![
                "v13.0.0-yb-1-1639976983-4b60e646-centos7-x86_64",
                "v12.0.1-1628032574-7c3f4f0b",
            ]
        );
        assert!(PackageCollection::from_tag_list("\n# nothing yet\n")?.is_empty());
        assert!(PackageCollection::from_tag_list("v14.0.6\n").is_err());

        Ok(())
    }

    #[test]
    fn from_tags_reports_the_bad_tag() {
        let result = PackageCollection::from_tags(["v14.0.6-1662604533-ba3d6a9e", "nonsense"]);

        let err = result.expect_err("A malformed tag was accepted");
        assert!(err.to_string().contains("nonsense"));
    }

    #[test]
    fn filter_keeps_table_order() -> anyhow::Result<()> {
        let packages = PackageCollection::from_tags([
            "v14.0.6-yb-2-1662604600-ba3d6a9e-almalinux8-x86_64",
            "v14.0.6-yb-1-1662604533-ba3d6a9e-almalinux8-x86_64",
            "v14.0.6-yb-1-1662604581-ba3d6a9e-almalinux8-aarch64",
            "v13.0.0-yb-1-1639977219-4b60e646-almalinux8-x86_64",
        ])?;

        let selected = packages
            .filter(14, "centos8", "x86_64")
            .map(|t| t.yb_suffix_version)
            .collect_vec();
        assert_eq!(selected, vec![Some(2), Some(1)]);

        Ok(())
    }

    #[test]
    fn supported_targets_group_major_versions() -> anyhow::Result<()> {
        let packages = PackageCollection::from_tags([
            "v12.0.1-1628032574-7c3f4f0b",
            "v13.0.0-yb-1-1639976983-4b60e646-centos7-x86_64",
            "v13.0.0-yb-1-1639977302-4b60e646-amzn2-aarch64",
        ])?;

        let targets = packages
            .supported_targets()
            .iter()
            .map(ToString::to_string)
            .collect_vec();
        assert_eq!(targets, vec!["amzn2 aarch64: 13", "centos7 x86_64: 12, 13"]);

        Ok(())
    }

    #[test]
    fn one_per_line_sorts_and_indents() -> anyhow::Result<()> {
        let packages = PackageCollection::from_tags([
            "v13.0.0-yb-1-1639976983-4b60e646-centos7-x86_64",
            "v12.0.1-1628032574-7c3f4f0b",
        ])?;

        let rendered = packages.one_per_line(2);
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  v12.0.1-1628032574-7c3f4f0b"));
        assert!(lines[1].starts_with("  v13.0.0-yb-1"));

        Ok(())
    }
}
