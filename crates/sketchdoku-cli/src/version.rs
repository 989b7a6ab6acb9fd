//! Build metadata reported by the command line.

/// Returns `pkg_version (git_sha)`, with `-dirty` appended to the hash for a
/// modified working tree and `unknown` when git metadata is unavailable.
#[must_use]
pub fn build_version() -> String {
    describe(
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA"),
        option_env!("VERGEN_GIT_DIRTY") == Some("true"),
    )
}

fn describe(version: &str, sha: Option<&str>, dirty: bool) -> String {
    let sha = sha.unwrap_or("unknown");
    let suffix = if dirty { "-dirty" } else { "" };
    format!("{version} ({sha}{suffix})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe("0.1.0", Some("abc123"), false), "0.1.0 (abc123)");
        assert_eq!(describe("0.1.0", Some("abc123"), true), "0.1.0 (abc123-dirty)");
        assert_eq!(describe("0.1.0", None, false), "0.1.0 (unknown)");
        assert!(build_version().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
