//! Useful constants for use within the installer.

/// The LLVM major version used when the caller does not ask for one.
pub const DEFAULT_LLVM_MAJOR_VERSION: u32 = 14;

/// The location under which each release's assets are published.
///
/// The release tag is appended to this as a path segment.
pub const DEFAULT_GITHUB_RELEASE_URL_PREFIX: &str =
    "https://github.com/yugabyte/build-clang/releases/download";

/// The text placed before the release tag in a package file name.
pub const DEFAULT_PACKAGE_NAME_PREFIX: &str = "yb-llvm-";

/// The text placed after the release tag in a package file name.
pub const DEFAULT_PACKAGE_NAME_SUFFIX: &str = ".tar.gz";

/// The OS that all builds whose tags predate the OS component were made for.
pub const DEFAULT_SHORT_OS_NAME_AND_VERSION_FOR_OLD_BUILDS: &str = "centos7";

/// The architecture that all builds whose tags predate the architecture
/// component were made for.
pub const DEFAULT_ARCHITECTURE_FOR_OLD_BUILDS: &str = "x86_64";

/// The architectures that may appear as the final component of a release tag.
pub const KNOWN_ARCHITECTURES: [&str; 3] = ["x86_64", "aarch64", "arm64"];

/// The OS family names that may begin the OS component of a release tag.
pub const KNOWN_OS_NAMES: [&str; 11] = [
    "almalinux",
    "amzn",
    "centos",
    "debian",
    "fedora",
    "macos",
    "manylinux",
    "opensuse",
    "rhel",
    "rocky",
    "ubuntu",
];
