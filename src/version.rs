//! Version and build information.
//!
//! `build.rs` stamps the git commit, build date and compiler version into the
//! binary through `SNOWBALL_CHECK_*` environment variables. Any of them may be
//! missing, e.g. when building from a source tarball without git.
//!
//! Reports carry the short form so a result can be traced to the harness
//! build that produced it.

use std::fmt;

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub arch: &'static str,
    pub rustc_version: Option<&'static str>,
}

impl BuildInfo {
    /// `0.1.0` or `0.1.0+abc1234`
    pub fn short(&self) -> String {
        match self.commit {
            Some(commit) => format!("{}+{}", self.version, commit),
            None => self.version.to_string(),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "snowball-check {}", self.short())?;
        write!(f, "  arch:  {}", self.arch)?;
        if let Some(date) = self.build_date {
            write!(f, "\n  built: {}", date)?;
        }
        if let Some(rustc) = self.rustc_version {
            write!(f, "\n  rustc: {}", rustc)?;
        }
        Ok(())
    }
}

pub fn get_build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("SNOWBALL_CHECK_GIT_HASH"),
        build_date: option_env!("SNOWBALL_CHECK_BUILD_DATE"),
        arch: std::env::consts::ARCH,
        rustc_version: option_env!("SNOWBALL_CHECK_RUSTC_VERSION"),
    }
}
