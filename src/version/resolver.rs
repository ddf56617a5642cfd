//! Latest-tag reconciliation
//!
//! The registry's dist-tag "latest" is treated as a ceiling: a candidate that
//! is newer than what the maintainers tagged as latest is pulled back to the
//! tagged version.

use semver::Version;

/// Decide the final upgrade target from the raw candidate and the "latest" tag.
///
/// Prerelease pins ignore the tag entirely. An unparseable tag is ignored.
pub fn reconcile_with_latest(
    raw_candidate: &str,
    latest_tag: Option<&str>,
    is_prerelease: bool,
) -> String {
    if is_prerelease {
        return raw_candidate.to_string();
    }

    let Some(latest) = latest_tag else {
        return raw_candidate.to_string();
    };

    match (Version::parse(latest), Version::parse(raw_candidate)) {
        (Ok(tagged), Ok(candidate)) if tagged < candidate => latest.to_string(),
        _ => raw_candidate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    // latest older than candidate acts as a ceiling
    #[case("1.2.5", Some("1.2.4"), false, "1.2.4")]
    // latest newer than candidate (out of range) keeps the candidate
    #[case("1.0.1", Some("2.0.0"), false, "1.0.1")]
    #[case("1.0.1", Some("1.0.1"), false, "1.0.1")]
    #[case("1.0.1", None, false, "1.0.1")]
    #[case("1.0.1", Some("not-a-version"), false, "1.0.1")]
    // prerelease pins never consult the tag
    #[case("1.0.0-beta.2", Some("0.9.0"), true, "1.0.0-beta.2")]
    fn reconcile_with_latest_returns_expected(
        #[case] raw: &str,
        #[case] latest: Option<&str>,
        #[case] is_prerelease: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(reconcile_with_latest(raw, latest, is_prerelease), expected);
    }
}
