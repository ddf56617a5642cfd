use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// A leading `v` or `=` is accepted, as npm does for published versions.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let version = version
        .strip_prefix('=')
        .or_else(|| version.strip_prefix('v'))
        .unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Number of numeric components written in a (possibly partial) version
pub fn precision(version: &str) -> usize {
    let core = version
        .trim()
        .split(['-', '+'])
        .next()
        .unwrap_or_default();
    core.split('.').count()
}

/// True when the version carries a prerelease or build suffix
pub fn has_suffix(version: &Version) -> bool {
    !version.pre.is_empty() || !version.build.is_empty()
}

/// True when the version is a prerelease (`1.0.0-alpha.0`)
pub fn is_prerelease(version: &str) -> bool {
    Version::parse(version)
        .map(|v| !v.pre.is_empty())
        .unwrap_or(false)
}
