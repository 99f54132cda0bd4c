//! Commit and date stamped in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `"<version> <commit> (<date>)"`, as printed in tool banners.
pub fn version_line() -> String {
    format!("{} {} ({})", env!("CARGO_PKG_VERSION"), BUILD_COMMIT, BUILD_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_date() {
        assert!(version_line().contains(BUILD_DATE));
        assert!(version_line().starts_with(env!("CARGO_PKG_VERSION")));
    }
}
