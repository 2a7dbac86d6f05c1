//! Identification of the machine we are running on.
//!
//! The resolver itself knows nothing about the local machine. It is handed a
//! short OS name and version and an architecture, which usually come from an
//! implementation of [`SystemInfo`] such as [`LocalSystem`].

use std::{
    collections::HashMap,
    fs,
    process::{Command, Output},
};

use llvm_installer_errors::system::{Error, Result};

/// The file that describes the running Linux distribution.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Distribution IDs whose packages are identified by the major version alone.
const MAJOR_VERSION_ONLY_IDS: [&str; 4] = ["almalinux", "centos", "rhel", "rocky"];

/// A source of facts about a machine, as needed to select a package for it.
pub trait SystemInfo {
    /// Gets the short OS name and version, e.g. `ubuntu22.04` or `almalinux8`.
    ///
    /// # Errors
    ///
    /// - [`Error`] if the OS cannot be identified.
    fn short_os_name_and_version(&self) -> Result<String>;

    /// Gets the CPU architecture, e.g. `x86_64`, `aarch64` or `arm64`.
    ///
    /// # Errors
    ///
    /// - [`Error`] if the architecture cannot be identified.
    fn architecture(&self) -> Result<String>;
}

/// The machine this process is running on.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSystem;

impl SystemInfo for LocalSystem {
    fn short_os_name_and_version(&self) -> Result<String> {
        match std::env::consts::OS {
            "linux" => {
                let contents = fs::read_to_string(OS_RELEASE_PATH).map_err(|e| {
                    Error::OsReleaseUnreadable(OS_RELEASE_PATH.to_string(), e.to_string())
                })?;
                short_os_name_and_version_from_os_release(&contents)
            }
            "macos" => {
                let output = Command::new("sw_vers")
                    .arg("-productVersion")
                    .output()
                    .map_err(|e| Error::MacosVersionUnavailable(e.to_string()))?;
                macos_short_name_from_sw_vers(&output)
            }
            other => Err(Error::UnsupportedOperatingSystem(other.to_string())),
        }
    }

    fn architecture(&self) -> Result<String> {
        Ok(normalize_architecture(std::env::consts::OS, std::env::consts::ARCH))
    }
}

/// Parses the `KEY=value` lines of an os-release file, removing any quotes
/// around the values. Blank lines and comments are skipped.
#[must_use]
pub fn parse_os_release(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Derives the short OS name and version from the contents of an os-release
/// file.
///
/// # Errors
///
/// - [`Error::MissingOsReleaseField`] if `ID` or `VERSION_ID` is not defined.
pub fn short_os_name_and_version_from_os_release(contents: &str) -> Result<String> {
    let fields = parse_os_release(contents);
    let field = |name: &str| {
        fields
            .get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::MissingOsReleaseField(name.to_string()))
    };

    Ok(short_os_name_and_version(field("ID")?, field("VERSION_ID")?))
}

/// Combines a distribution `id` and `version_id` into a short OS name and
/// version. Red Hat rebuilds keep only the major version, so `8.6` on
/// AlmaLinux gives `almalinux8`, while Ubuntu keeps the full `22.04`.
#[must_use]
pub fn short_os_name_and_version(id: &str, version_id: &str) -> String {
    let id = id.to_ascii_lowercase();
    let version = if MAJOR_VERSION_ONLY_IDS.contains(&id.as_str()) {
        version_id.split('.').next().unwrap_or(version_id)
    } else {
        version_id
    };

    format!("{id}{version}")
}

/// Derives the short OS name and version from a macOS product version such
/// as `13.4.1`. Big Sur (11) and later are identified by their major version,
/// earlier releases by major and minor.
///
/// # Errors
///
/// - [`Error::MacosVersionUnavailable`] if `product_version` does not start
///   with a number.
pub fn macos_short_name_and_version(product_version: &str) -> Result<String> {
    let mut components = product_version.split('.');
    let major = components
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .ok_or_else(|| {
            Error::MacosVersionUnavailable(format!(
                "unrecognized product version `{product_version}`"
            ))
        })?;

    if major >= 11 {
        Ok(format!("macos{major}"))
    } else {
        let minor = components.next().unwrap_or("0");
        Ok(format!("macos{major}.{minor}"))
    }
}

/// Derives the short OS name and version from the result of running
/// `sw_vers -productVersion`.
///
/// # Errors
///
/// - [`Error::MacosVersionUnavailable`] if `sw_vers` failed or printed an
///   unrecognized product version.
pub fn macos_short_name_from_sw_vers(output: &Output) -> Result<String> {
    if !output.status.success() {
        return Err(Error::MacosVersionUnavailable(format!(
            "sw_vers exited with {}",
            output.status
        )));
    }

    macos_short_name_and_version(String::from_utf8_lossy(&output.stdout).trim())
}

/// Gets the architecture name used in package tags for the Rust `arch` of a
/// machine running `os`. Apple calls 64-bit ARM `arm64`.
#[must_use]
pub fn normalize_architecture(os: &str, arch: &str) -> String {
    match (os, arch) {
        ("macos", "aarch64") => "arm64".to_string(),
        _ => arch.to_string(),
    }
}
