//! Version string shown by `--version`: `<version>-<commit>-<release|dev>`.

use std::sync::LazyLock;

/// Placeholder vergen emits when git information is unavailable.
const IDEMPOTENT: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Short SHA of the commit the binary was built from.
pub const GIT_SHA: &str = env!("VERGEN_GIT_SHA");
/// `git describe --tags` of that commit.
pub const GIT_DESCRIBE: &str = env!("VERGEN_GIT_DESCRIBE");

/// Full version, e.g. `0.1.0-7e610940-dev`.
pub fn version() -> &'static str {
    static VERSION: LazyLock<String> =
        LazyLock::new(|| format_version(env!("CARGO_PKG_VERSION"), GIT_SHA, GIT_DESCRIBE));
    &VERSION
}

fn format_version(pkg_version: &str, sha: &str, describe: &str) -> String {
    let commit = if known(sha) { sha } else { "unknown" };
    let meta = if is_tagged(sha, describe) { "release" } else { "dev" };
    format!("{pkg_version}-{commit}-{meta}")
}

fn known(value: &str) -> bool {
    !value.is_empty() && value != IDEMPOTENT
}

/// `git describe --tags` prints the bare tag only when the commit itself is
/// tagged, otherwise it appends `-<distance>-g<sha>`.
fn is_tagged(sha: &str, describe: &str) -> bool {
    known(describe) && describe != sha && !has_distance_suffix(describe)
}

fn has_distance_suffix(describe: &str) -> bool {
    let mut parts = describe.rsplitn(3, '-');
    let (Some(hash), Some(distance), Some(_tag)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let hash_ok = hash
        .strip_prefix('g')
        .is_some_and(|h| !h.is_empty() && h.chars().all(|c| c.is_ascii_hexdigit()));
    hash_ok && !distance.is_empty() && distance.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_version_has_three_parts() {
        let version = version();
        let parts: Vec<&str> = version.split('-').collect();
        assert_eq!(parts.len(), 3, "{version}");
        assert_eq!(parts[0], env!("CARGO_PKG_VERSION"));
        assert!(!parts[1].is_empty());
        assert!(matches!(parts[2], "release" | "dev"), "{version}");
    }

    #[test]
    fn tagged_commit_is_release() {
        assert_eq!(format_version("0.1.0", "7e610940", "v0.1.0"), "0.1.0-7e610940-release");
    }

    #[test]
    fn commits_after_a_tag_are_dev() {
        assert_eq!(
            format_version("0.1.0", "e156a2fc", "v0.1.0-1-ge156a2fc"),
            "0.1.0-e156a2fc-dev"
        );
        // Tags may contain dashes themselves.
        assert!(is_tagged("abc123", "v1.0.0-rc1"));
        assert!(!is_tagged("abc123", "v1.0.0-rc1-4-gabc123"));
    }

    #[test]
    fn missing_git_information_is_unknown_dev() {
        assert_eq!(format_version("0.1.0", IDEMPOTENT, IDEMPOTENT), "0.1.0-unknown-dev");
        assert_eq!(format_version("0.1.0", "", ""), "0.1.0-unknown-dev");
        assert_eq!(format_version("0.1.0", "7e610940", "7e610940"), "0.1.0-7e610940-dev");
    }
}
