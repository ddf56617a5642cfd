//! Upgrade candidate selection

use semver::Version;

use crate::version::error::VerifyError;
use crate::version::range::DeclaredRange;

/// Select the highest published version satisfying `range`.
///
/// When the declared range is itself a prerelease, only prerelease versions
/// are considered, so a prerelease pin is never moved to a stable release.
/// Fails with [`VerifyError::NoApplicableVersion`] when nothing matches.
pub fn select_candidate(
    name: &str,
    raw_range: &str,
    range: &DeclaredRange,
    published: &[String],
) -> Result<String, VerifyError> {
    let prerelease_only = range.is_prerelease();

    let mut matches: Vec<(&String, Version)> = published
        .iter()
        .filter_map(|v| Version::parse(v).ok().map(|parsed| (v, parsed)))
        .filter(|(_, parsed)| !prerelease_only || !parsed.pre.is_empty())
        .filter(|(_, parsed)| range.satisfies(parsed))
        .collect();

    matches.sort_by(|(_, a), (_, b)| b.cmp(a));

    matches
        .into_iter()
        .next()
        .map(|(original, _)| original.clone())
        .ok_or_else(|| VerifyError::NoApplicableVersion {
            name: name.to_string(),
            range: raw_range.to_string(),
        })
}
