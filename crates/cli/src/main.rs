//! This is the CLI driver for finding pre-built LLVM packages. For more detail,
//! please see the documentation for the [`llvm_installer`] crate.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

use std::{borrow::Cow, fs, io::Write, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{ArgAction, Parser};
use llvm_installer::{
    constant::{
        DEFAULT_GITHUB_RELEASE_URL_PREFIX,
        DEFAULT_LLVM_MAJOR_VERSION,
        DEFAULT_PACKAGE_NAME_PREFIX,
        DEFAULT_PACKAGE_NAME_SUFFIX,
    },
    LocalSystem,
    PackageCollection,
    Resolver,
    SystemInfo,
    UrlLayout,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Prints the download URL of the pre-built LLVM package for this machine.
#[derive(Debug, Parser)]
#[command(name = "llvm-installer", version, about)]
struct Cli {
    /// The LLVM major version of interest.
    #[arg(
        long = "llvm-version",
        visible_alias = "llvm-major-version",
        value_name = "N",
        default_value_t = DEFAULT_LLVM_MAJOR_VERSION,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    llvm_version: u32,

    /// The short OS name and version to select a package for, e.g.
    /// `ubuntu22.04`. Detected from the local machine by default.
    #[arg(long, value_name = "TOKEN")]
    os: Option<String>,

    /// The architecture to select a package for, e.g. `aarch64`. Detected from
    /// the local machine by default.
    #[arg(long, value_name = "TOKEN")]
    arch: Option<String>,

    /// The URL under which each release is published.
    #[arg(long, env = "LLVM_INSTALLER_URL_PREFIX", default_value = DEFAULT_GITHUB_RELEASE_URL_PREFIX)]
    url_prefix: String,

    /// Placed before the release tag in the package file name.
    #[arg(long, env = "LLVM_INSTALLER_PACKAGE_NAME_PREFIX", default_value = DEFAULT_PACKAGE_NAME_PREFIX)]
    package_name_prefix: String,

    /// Placed after the release tag in the package file name.
    #[arg(long, env = "LLVM_INSTALLER_PACKAGE_NAME_SUFFIX", default_value = DEFAULT_PACKAGE_NAME_SUFFIX)]
    package_name_suffix: String,

    /// A file listing the published release tags, one per line, to use in
    /// place of the built-in table. Blank lines and lines starting with `#`
    /// are ignored.
    #[arg(long, env = "LLVM_INSTALLER_RELEASE_TAGS", value_name = "FILE")]
    release_tags: Option<PathBuf>,

    /// Print the release tag of the selected package instead of its URL.
    #[arg(long)]
    print_tag: bool,

    /// Print every supported OS and architecture with their LLVM major
    /// versions, then exit.
    #[arg(long, conflicts_with = "print_tag")]
    list_targets: bool,

    /// Log more detail to standard error. May be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli, &LocalSystem, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Sends logs to standard error, so that standard output only ever carries
/// the result. `RUST_LOG` takes precedence over `verbosity`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Executes the request described by `cli`, using `system` for anything not
/// given on the command line, and writes the single line of output to `out`.
fn run(cli: &Cli, system: &impl SystemInfo, out: &mut impl Write) -> anyhow::Result<()> {
    let packages = load_packages(cli)?;

    if cli.list_targets {
        for target in packages.supported_targets() {
            writeln!(out, "{target}")?;
        }
        return Ok(());
    }

    let line = resolve(cli, system, &packages)?;
    writeln!(out, "{line}")?;

    Ok(())
}

/// Gets the packages to select from: those listed in the `--release-tags`
/// file if one was given, and the built-in table otherwise.
fn load_packages(cli: &Cli) -> anyhow::Result<Cow<'static, PackageCollection>> {
    let Some(path) = &cli.release_tags else {
        return Ok(Cow::Borrowed(PackageCollection::builtin()));
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Could not read release tags from {}", path.display()))?;
    let packages = PackageCollection::from_tag_list(&contents)
        .with_context(|| format!("Invalid release tag list in {}", path.display()))?;
    debug!(path = %path.display(), count = packages.len(), "Loaded release tags");

    Ok(Cow::Owned(packages))
}

/// Resolves the package for the request described by `cli`, producing either
/// its URL or its release tag.
fn resolve(
    cli: &Cli,
    system: &impl SystemInfo,
    packages: &PackageCollection,
) -> llvm_installer_errors::Result<String> {
    let os = match &cli.os {
        Some(os) => os.clone(),
        None => system.short_os_name_and_version()?,
    };
    let arch = match &cli.arch {
        Some(arch) => arch.clone(),
        None => system.architecture()?,
    };
    debug!(%os, %arch, llvm_version = cli.llvm_version, "Resolving LLVM package");

    let resolver = Resolver::new(os, arch)
        .with_packages(packages)
        .with_layout(UrlLayout::new(
            &cli.url_prefix,
            &cli.package_name_prefix,
            &cli.package_name_suffix,
        ));

    if cli.print_tag {
        Ok(resolver.get_release_tag(cli.llvm_version)?.tag.clone())
    } else {
        Ok(resolver.get_llvm_url(cli.llvm_version)?)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use clap::Parser;
    use llvm_installer::{PackageCollection, SystemInfo};
    use llvm_installer_errors::system::{Error, Result};

    use crate::{run, Cli};

    /// Stands in for the local machine.
    struct StubSystem<'a> {
        os:   &'a str,
        arch: &'a str,
    }

    impl SystemInfo for StubSystem<'_> {
        fn short_os_name_and_version(&self) -> Result<String> {
            Ok(self.os.to_string())
        }

        fn architecture(&self) -> Result<String> {
            Ok(self.arch.to_string())
        }
    }

    /// A machine that cannot be identified.
    struct UnknownSystem;

    impl SystemInfo for UnknownSystem {
        fn short_os_name_and_version(&self) -> Result<String> {
            Err(Error::UnsupportedOperatingSystem("plan9".to_string()))
        }

        fn architecture(&self) -> Result<String> {
            Ok("x86_64".to_string())
        }
    }

    const ALMALINUX: StubSystem<'static> = StubSystem {
        os:   "almalinux8",
        arch: "x86_64",
    };

    fn run_with(args: &[&str], system: &impl SystemInfo) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("llvm-installer").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(&cli, system, &mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn prints_one_url_with_no_arguments() -> anyhow::Result<()> {
        let output = run_with(&[], &ALMALINUX)?;

        assert_eq!(output.lines().count(), 1);
        assert!(output.ends_with(".tar.gz\n"));
        assert!(output.starts_with("https://github.com/yugabyte/build-clang/releases/download/v14."));
        assert!(output.contains("almalinux8-x86_64"));

        Ok(())
    }

    #[test]
    fn unsupported_os_override_fails_with_a_diagnostic() {
        let err = run_with(&["--os", "solaris11"], &ALMALINUX)
            .expect_err("An unsupported OS resolved");
        let message = format!("{err:#}");

        assert!(message.contains("solaris11"), "{message}");
        assert!(message.contains("x86_64"), "{message}");
        assert!(message.contains("14"), "{message}");
    }

    #[test]
    fn prints_a_url_for_every_supported_target_with_no_arguments() -> anyhow::Result<()> {
        for target in PackageCollection::builtin().supported_targets() {
            let system = StubSystem {
                os:   &target.short_os_name_and_version,
                arch: &target.architecture,
            };
            let output = run_with(&[], &system)?;

            assert_eq!(output.lines().count(), 1, "{target}");
            assert!(output.ends_with(".tar.gz\n"), "{target}: {output}");
        }

        Ok(())
    }

    #[test]
    fn overrides_take_precedence_over_detection() -> anyhow::Result<()> {
        let output = run_with(
            &["--os", "amzn2", "--arch", "aarch64", "--llvm-version", "13"],
            &ALMALINUX,
        )?;

        assert!(output.contains("/v13.0.0-yb-1-"), "{output}");
        assert!(output.trim_end().ends_with("amzn2-aarch64.tar.gz"), "{output}");

        Ok(())
    }

    #[test]
    fn overrides_skip_detection_entirely() -> anyhow::Result<()> {
        let output = run_with(&["--os", "almalinux8", "--arch", "aarch64"], &UnknownSystem)?;
        assert!(output.contains("almalinux8-aarch64"));

        Ok(())
    }

    #[test]
    fn detection_failures_are_reported() {
        let err = run_with(&[], &UnknownSystem).expect_err("Detection failure was ignored");

        assert!(err.to_string().contains("plan9"));
    }

    #[test]
    fn accepts_the_major_version_alias() -> anyhow::Result<()> {
        let output = run_with(&["--llvm-major-version", "13"], &ALMALINUX)?;
        assert!(output.contains("/v13."));

        Ok(())
    }

    #[test]
    fn rejects_invalid_major_versions() {
        assert!(run_with(&["--llvm-version", "0"], &ALMALINUX).is_err());
        assert!(run_with(&["--llvm-version", "-3"], &ALMALINUX).is_err());
        assert!(run_with(&["--llvm-version", "twelve"], &ALMALINUX).is_err());
    }

    #[test]
    fn prints_the_tag_on_request() -> anyhow::Result<()> {
        let output = run_with(&["--print-tag", "--llvm-version", "12"], &ALMALINUX)?;
        assert_eq!(output, "v12.0.1-yb-2-1639976983-4b60e646-almalinux8-x86_64\n");

        Ok(())
    }

    #[test]
    fn honors_layout_overrides() -> anyhow::Result<()> {
        let output = run_with(
            &[
                "--print-tag",
                "--llvm-version",
                "14",
                "--os",
                "amzn2",
                "--arch",
                "aarch64",
            ],
            &ALMALINUX,
        )?;
        let tag = output.trim_end();

        let output = run_with(
            &[
                "--llvm-version",
                "14",
                "--os",
                "amzn2",
                "--arch",
                "aarch64",
                "--url-prefix",
                "https://mirror.example.com/",
                "--package-name-prefix",
                "llvm-",
                "--package-name-suffix",
                ".tar.xz",
            ],
            &ALMALINUX,
        )?;
        assert_eq!(
            output,
            format!("https://mirror.example.com/{tag}/llvm-{tag}.tar.xz\n")
        );

        Ok(())
    }

    #[test]
    fn lists_supported_targets() -> anyhow::Result<()> {
        let output = run_with(&["--list-targets"], &UnknownSystem)?;

        assert!(output.lines().any(|l| l == "almalinux8 x86_64: 12, 13, 14"));
        assert!(output.lines().any(|l| l == "amzn2 aarch64: 12, 13, 14"));

        Ok(())
    }

    #[test]
    fn uses_a_release_tag_file_in_place_of_the_builtin_table() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "# Published releases")?;
        writeln!(file, "v18.1.8-yb-1-1720000000-0123abcd-almalinux8-x86_64")?;
        writeln!(file)?;
        writeln!(file, "v18.1.8-yb-1-1720000100-0123abcd-ubuntu24.04-aarch64")?;
        let path = file.path().to_str().expect("Temporary path is not UTF-8");

        let output = run_with(&["--release-tags", path, "--llvm-version", "18"], &ALMALINUX)?;
        assert_eq!(
            output,
            "https://github.com/yugabyte/build-clang/releases/download/\
             v18.1.8-yb-1-1720000000-0123abcd-almalinux8-x86_64/\
             yb-llvm-v18.1.8-yb-1-1720000000-0123abcd-almalinux8-x86_64.tar.gz\n"
        );

        let output = run_with(&["--release-tags", path, "--list-targets"], &UnknownSystem)?;
        assert_eq!(output, "almalinux8 x86_64: 18\nubuntu24.04 aarch64: 18\n");

        // The built-in packages are not consulted.
        assert!(run_with(&["--release-tags", path, "--llvm-version", "14"], &ALMALINUX).is_err());

        Ok(())
    }

    #[test]
    fn bad_release_tag_files_are_reported() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "not-a-release")?;
        let path = file.path().to_str().expect("Temporary path is not UTF-8");

        let err = run_with(&["--release-tags", path], &ALMALINUX)
            .expect_err("An invalid tag list was accepted");
        assert!(format!("{err:#}").contains("not-a-release"), "{err:#}");

        let err = run_with(&["--release-tags", "/nonexistent/release-tags.txt"], &ALMALINUX)
            .expect_err("A missing tag list was accepted");
        assert!(err.to_string().contains("/nonexistent/release-tags.txt"), "{err}");

        Ok(())
    }
}
