//! Build identity of the `eth-clients` binary.
//!
//! Generated artifacts are only reproducible for a given build, so the CLI
//! logs [`BuildInfo`] before producing anything.

use std::{fmt, sync::OnceLock};

/// Package version and the git commit it was built from, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: Option<&'static str>,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("VERGEN_GIT_SHA_SHORT"),
        }
    }
}

impl fmt::Display for BuildInfo {
    /// `<name>/v<version>-<short sha>`, `unknown` standing in for a missing sha.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/v{}-{}", self.name, self.version, self.commit.unwrap_or("unknown"))
    }
}

static VERSION: OnceLock<String> = OnceLock::new();

/// Rendered [`BuildInfo::current`], for clap's `--version`.
pub fn version_string() -> &'static str {
    VERSION.get_or_init(|| BuildInfo::current().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_names_the_crate() {
        let version = version_string();
        assert!(version.starts_with("eth-clients/v"));
        assert!(version.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn missing_commit_renders_unknown() {
        let build = BuildInfo { name: "eth-clients", version: "1.2.3", commit: None };
        assert_eq!(build.to_string(), "eth-clients/v1.2.3-unknown");

        let build = BuildInfo { commit: Some("abc1234"), ..build };
        assert_eq!(build.to_string(), "eth-clients/v1.2.3-abc1234");
    }
}
