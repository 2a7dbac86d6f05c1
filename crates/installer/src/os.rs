//! Rules for deciding whether a package built for one OS can be used on
//! another.
//!
//! Distributions that are rebuilds of the same Red Hat Enterprise Linux major
//! release are binary compatible, so a package built on one of them runs on
//! all of them. Such distributions are listed together in an alias group. No
//! other compatibility is assumed: two short OS names and versions that are
//! not equal and do not share a group are incompatible.

/// An alias group, given as the group's name and its members.
type AliasGroup<'a> = (&'a str, &'a [&'a str]);

/// The groups of mutually compatible short OS names and versions.
pub const ALIAS_GROUPS: [AliasGroup<'static>; 3] = [
    ("el7", &["centos7", "rhel7", "manylinux2014"]),
    ("el8", &["almalinux8", "centos8", "rhel8", "rocky8"]),
    ("el9", &["almalinux9", "rhel9", "rocky9"]),
];

/// Gets the name of the alias group that `short_os_name_and_version` belongs
/// to, if any.
#[must_use]
pub fn alias_group(short_os_name_and_version: &str) -> Option<&'static str> {
    ALIAS_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&short_os_name_and_version))
        .map(|(name, _)| *name)
}

/// Checks whether a package built for `package_os` can be used on `target_os`.
///
/// ```
/// use llvm_installer::os::is_compatible_os;
///
/// assert!(is_compatible_os("almalinux8", "centos8"));
/// assert!(!is_compatible_os("centos7", "amzn2"));
/// ```
#[must_use]
pub fn is_compatible_os(package_os: &str, target_os: &str) -> bool {
    if package_os == target_os {
        return true;
    }

    matches!(
        (alias_group(package_os), alias_group(target_os)),
        (Some(package_group), Some(target_group)) if package_group == target_group
    )
}
