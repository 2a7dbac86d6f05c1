//! The release tags of the pre-built LLVM packages compiled into the
//! installer, in the order in which they were published.
//!
//! The order matters: when two tags for the same target rank equally, the one
//! listed first is selected. New releases should be appended to the end.
//!
//! This table covers LLVM 12, 13 and 14 on `centos7`/`x86_64`,
//! `almalinux8`/`x86_64`, `almalinux8`/`aarch64` and `amzn2`/`aarch64`. A
//! current list of the published releases can be given to the CLI with
//! `--release-tags`, or parsed with
//! [`crate::PackageCollection::from_tag_list`].

pub const RELEASE_TAGS: &[&str] = &[
    // Built before the OS and architecture were recorded in the tag.
    "v12.0.1-1628032574-7c3f4f0b",
    // LLVM 12
    "v12.0.1-yb-1-1633099975-130bd22e-centos7-x86_64",
    "v12.0.1-yb-1-1633143152-130bd22e-almalinux8-x86_64",
    "v12.0.1-yb-2-1639976983-4b60e646-almalinux8-x86_64",
    "v12.0.1-yb-2-1639977001-4b60e646-almalinux8-aarch64",
    "v12.0.1-yb-2-1639977047-4b60e646-amzn2-aarch64",
    // LLVM 13
    "v13.0.0-yb-1-1639976983-4b60e646-centos7-x86_64",
    "v13.0.0-yb-1-1639977219-4b60e646-almalinux8-x86_64",
    "v13.0.0-yb-1-1639977263-4b60e646-almalinux8-aarch64",
    "v13.0.0-yb-1-1639977302-4b60e646-amzn2-aarch64",
    // LLVM 14
    "v14.0.6-yb-1-1662604498-ba3d6a9e-centos7-x86_64",
    "v14.0.6-yb-1-1662604533-ba3d6a9e-almalinux8-x86_64",
    "v14.0.6-yb-1-1662604581-ba3d6a9e-almalinux8-aarch64",
    "v14.0.6-yb-1-1662604619-ba3d6a9e-amzn2-aarch64",
];
