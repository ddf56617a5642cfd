//! npm version ranges
//!
//! Supports npm semver range specifications:
//! - `1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1.2`, `1`, `*` - wildcards
//! - `1.0.0 - 2.0.0` - hyphen ranges
//! - `>=1.0.0 <2.0.0` and `^1.0.0 || ^2.0.0` - AND / OR compounds
//!
//! A declared range without a leading `^`, `~`, `>` or `<` is a locked
//! dependency and is never resolved against the registry.
//!
//! A prerelease version only satisfies a comparator set when one of its
//! comparators names a prerelease on the same `major.minor.patch`.

use semver::Version;

use crate::version::semver::{has_suffix, parse_version, precision};

/// Leading characters that mark a declared range as something other than a pin
const RANGE_OPERATOR_CHARS: [char; 4] = ['^', '~', '>', '<'];

/// A dependency's declared range, as written in package.json
#[derive(Debug)]
pub enum DeclaredRange {
    /// No leading range operator: `1.2.3`, `=1.2.3`, `1.2`, `1.x`, `*`
    Locked(VersionSpec),
    /// A semver range resolvable against the registry
    Range(VersionSpec),
    /// Tags, git/file/url specifiers and other non-semver values
    Unsupported(String),
}

impl DeclaredRange {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let Some(spec) = VersionSpec::parse(trimmed) else {
            return DeclaredRange::Unsupported(raw.to_string());
        };

        if trimmed.starts_with(RANGE_OPERATOR_CHARS) {
            DeclaredRange::Range(spec)
        } else {
            DeclaredRange::Locked(spec)
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, DeclaredRange::Locked(_))
    }

    /// Whether the range's own version carries a prerelease or build suffix
    pub fn is_prerelease(&self) -> bool {
        match self {
            DeclaredRange::Locked(spec) | DeclaredRange::Range(spec) => {
                spec.base_version().is_some_and(|v| has_suffix(&v))
            }
            DeclaredRange::Unsupported(_) => false,
        }
    }

    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            DeclaredRange::Locked(spec) | DeclaredRange::Range(spec) => spec.satisfies(version),
            DeclaredRange::Unsupported(_) => false,
        }
    }
}

/// Top-level version specification parser
/// Handles compound ranges (AND, OR) as well as simple ranges
#[derive(Debug)]
pub enum VersionSpec {
    /// Single range (^1.0.0, >=1.0.0, etc.)
    Single(VersionRange),
    /// AND of ranges (>=1.0.0 <2.0.0) - space-separated, all must satisfy
    And(Vec<VersionSpec>),
    /// OR of specs (^1.0.0 || ^2.0.0) - any must satisfy
    Or(Vec<VersionSpec>),
}

impl VersionSpec {
    /// Parse a version specification string
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        // npm reads an empty range as "any version"
        if spec.is_empty() {
            return Some(VersionSpec::Single(VersionRange::Any));
        }

        // First, check for OR (||) - lowest precedence
        if spec.contains("||") {
            let specs: Option<Vec<VersionSpec>> = spec
                .split("||")
                .map(|s| s.trim())
                .map(Self::parse_and_or_single)
                .collect();
            return specs.map(VersionSpec::Or);
        }

        Self::parse_and_or_single(spec)
    }

    /// Parse a spec that may be AND (space-separated) or a single range
    fn parse_and_or_single(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        if VersionRange::parse_hyphen(spec).is_some() {
            return VersionRange::parse(spec).map(VersionSpec::Single);
        }

        let mut parts = comparators(spec)?;
        if parts.len() > 1 {
            let ranges: Option<Vec<VersionSpec>> = parts
                .iter()
                .map(|p| VersionRange::parse(p).map(VersionSpec::Single))
                .collect();
            ranges.map(VersionSpec::And)
        } else {
            VersionRange::parse(&parts.pop()?).map(VersionSpec::Single)
        }
    }

    /// Check if a version satisfies this spec
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Or(specs) => specs.iter().any(|s| s.satisfies(version)),
            _ => {
                self.satisfies_bounds(version)
                    && (version.pre.is_empty() || self.allows_prerelease_of(version))
            }
        }
    }

    fn satisfies_bounds(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.satisfies(version),
            VersionSpec::And(specs) => specs.iter().all(|s| s.satisfies_bounds(version)),
            VersionSpec::Or(specs) => specs.iter().any(|s| s.satisfies(version)),
        }
    }

    fn allows_prerelease_of(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.allows_prerelease_of(version),
            VersionSpec::And(specs) | VersionSpec::Or(specs) => {
                specs.iter().any(|s| s.allows_prerelease_of(version))
            }
        }
    }

    /// Get the base version from this spec (for comparison purposes)
    pub fn base_version(&self) -> Option<Version> {
        match self {
            VersionSpec::Single(range) => range.base_version(),
            // For compound ranges, use the first range's base version
            VersionSpec::And(specs) | VersionSpec::Or(specs) => {
                specs.first().and_then(|s| s.base_version())
            }
        }
    }
}

/// Split a comparator set on whitespace, rejoining operators written apart
/// from their version (`>= 1.2.0` is `>=1.2.0`)
fn comparators(spec: &str) -> Option<Vec<String>> {
    let is_operator = |token: &str| token.chars().all(|c| "<>=^~".contains(c));

    let mut parts = Vec::new();
    let mut pending: Option<&str> = None;
    for token in spec.split_whitespace() {
        match pending.take() {
            Some(operator) => parts.push(format!("{operator}{token}")),
            None if is_operator(token) => pending = Some(token),
            None => parts.push(token.to_string()),
        }
    }

    // A trailing operator has nothing to apply to
    match pending {
        Some(_) => None,
        None => Some(parts),
    }
}

/// Represents a parsed npm version range
#[derive(Debug)]
pub enum VersionRange {
    /// Exact version match
    Exact(Version),
    /// Caret range: ^1.2.3 means >=1.2.3 <2.0.0 (or special cases for 0.x)
    Caret(Version),
    /// Tilde range: ~1.2.3 means >=1.2.3 <1.3.0
    Tilde(Version),
    /// Greater than or equal
    Gte(Version),
    /// Greater than
    Gt(Version),
    /// Less than or equal
    Lte(Version),
    /// Less than
    Lt(Version),
    /// Any version: * matches all versions
    Any,
    /// Wildcard major: 1.x means >=1.0.0 <2.0.0
    WildcardMajor(u64),
    /// Wildcard minor: 1.2.x means >=1.2.0 <1.3.0
    WildcardMinor(u64, u64),
    /// Hyphen range: 1.0.0 - 2.0.0 means >=1.0.0 <=2.0.0
    Hyphen { from: Version, to: Version },
}

impl VersionRange {
    /// Parse a version specification string into a VersionRange
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if let Some(range) = Self::parse_hyphen(spec) {
            return Some(range);
        }

        if let Some(rest) = spec.strip_prefix(">=") {
            parse_version(rest).map(VersionRange::Gte)
        } else if let Some(rest) = spec.strip_prefix('>') {
            parse_version(rest).map(VersionRange::Gt)
        } else if let Some(rest) = spec.strip_prefix("<=") {
            parse_version(rest).map(VersionRange::Lte)
        } else if let Some(rest) = spec.strip_prefix('<') {
            parse_version(rest).map(VersionRange::Lt)
        } else if let Some(rest) = spec.strip_prefix('^') {
            Self::parse_caret(rest.trim())
        } else if let Some(rest) = spec.strip_prefix('~') {
            Self::parse_tilde(rest.trim_start_matches('>').trim())
        } else if let Some(rest) = spec.strip_prefix('=') {
            parse_version(rest).map(VersionRange::Exact)
        } else if spec == "*" || spec.eq_ignore_ascii_case("x") {
            Some(VersionRange::Any)
        } else if let Some(range) = Self::parse_wildcard(spec) {
            Some(range)
        } else {
            Self::parse_partial(spec)
        }
    }

    /// `^0` is `<1.0.0` and `^0.0` is `<0.1.0`; other partials pad with zeros
    fn parse_caret(rest: &str) -> Option<Self> {
        // `^1.2.x` is `^1.2.0`, `^0.x` is `<1.0.0`, `^0.0.x` is `<0.1.0`
        match Self::parse_wildcard(rest) {
            Some(VersionRange::WildcardMajor(0)) => return Some(VersionRange::WildcardMajor(0)),
            Some(VersionRange::WildcardMajor(major)) => {
                return Some(VersionRange::Caret(Version::new(major, 0, 0)));
            }
            Some(VersionRange::WildcardMinor(0, 0)) => {
                return Some(VersionRange::WildcardMinor(0, 0));
            }
            Some(VersionRange::WildcardMinor(major, minor)) => {
                return Some(VersionRange::Caret(Version::new(major, minor, 0)));
            }
            _ => {}
        }
        let version = parse_version(rest)?;
        Some(match (precision(rest), version.major, version.minor) {
            (1, 0, _) => VersionRange::WildcardMajor(0),
            (2, 0, 0) => VersionRange::WildcardMinor(0, 0),
            _ => VersionRange::Caret(version),
        })
    }

    /// `~1` is `>=1.0.0 <2.0.0`
    fn parse_tilde(rest: &str) -> Option<Self> {
        if let Some(range) = Self::parse_wildcard(rest) {
            return Some(range);
        }
        let version = parse_version(rest)?;
        if precision(rest) == 1 {
            return Some(VersionRange::WildcardMajor(version.major));
        }
        Some(VersionRange::Tilde(version))
    }

    /// Bare partial versions are X-ranges: `1` is `1.x`, `1.2` is `1.2.x`
    fn parse_partial(spec: &str) -> Option<Self> {
        let version = parse_version(spec)?;
        Some(match precision(spec) {
            1 => VersionRange::WildcardMajor(version.major),
            2 => VersionRange::WildcardMinor(version.major, version.minor),
            _ => VersionRange::Exact(version),
        })
    }

    /// Parse hyphen range like "1.0.0 - 2.0.0"
    fn parse_hyphen(spec: &str) -> Option<Self> {
        let parts: Vec<&str> = spec.split(" - ").collect();
        if parts.len() != 2 {
            return None;
        }

        let from = parse_version(parts[0].trim())?;
        let to = parse_version(parts[1].trim())?;

        Some(VersionRange::Hyphen { from, to })
    }

    /// Parse wildcard patterns like "1.x", "1.2.x" or "1.2.*"
    fn parse_wildcard(spec: &str) -> Option<Self> {
        let is_wildcard = |s: &str| s == "*" || s.eq_ignore_ascii_case("x");
        let parts: Vec<&str> = spec.split('.').collect();

        match parts.as_slice() {
            [major, x] | [major, x, _] if is_wildcard(x) => {
                major.parse::<u64>().ok().map(VersionRange::WildcardMajor)
            }
            [major, minor, x] if is_wildcard(x) => {
                let major = major.parse::<u64>().ok()?;
                let minor = minor.parse::<u64>().ok()?;
                Some(VersionRange::WildcardMinor(major, minor))
            }
            _ => None,
        }
    }

    /// Check if a version satisfies this range's bounds
    fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionRange::Exact(v) => version == v,
            VersionRange::Caret(v) => {
                if version < v {
                    return false;
                }
                // ^1.2.3 -> >=1.2.3 <2.0.0
                // ^0.2.3 -> >=0.2.3 <0.3.0
                // ^0.0.3 -> >=0.0.3 <0.0.4
                if v.major == 0 {
                    if v.minor == 0 {
                        version.major == 0 && version.minor == 0 && version.patch == v.patch
                    } else {
                        version.major == 0 && version.minor == v.minor
                    }
                } else {
                    version.major == v.major
                }
            }
            VersionRange::Tilde(v) => {
                version >= v && version.major == v.major && version.minor == v.minor
            }
            VersionRange::Gte(v) => version >= v,
            VersionRange::Gt(v) => version > v,
            VersionRange::Lte(v) => version <= v,
            VersionRange::Lt(v) => version < v,
            VersionRange::Any => true,
            VersionRange::WildcardMajor(major) => version.major == *major,
            VersionRange::WildcardMinor(major, minor) => {
                version.major == *major && version.minor == *minor
            }
            VersionRange::Hyphen { from, to } => version >= from && version <= to,
        }
    }

    /// Whether this comparator names a prerelease on the same tuple as `version`
    fn allows_prerelease_of(&self, version: &Version) -> bool {
        let same_tuple = |v: &Version| {
            !v.pre.is_empty()
                && v.major == version.major
                && v.minor == version.minor
                && v.patch == version.patch
        };
        match self {
            VersionRange::Exact(v)
            | VersionRange::Caret(v)
            | VersionRange::Tilde(v)
            | VersionRange::Gte(v)
            | VersionRange::Gt(v)
            | VersionRange::Lte(v)
            | VersionRange::Lt(v) => same_tuple(v),
            VersionRange::Hyphen { from, to } => same_tuple(from) || same_tuple(to),
            VersionRange::Any | VersionRange::WildcardMajor(_) | VersionRange::WildcardMinor(..) => {
                false
            }
        }
    }

    /// Get the base version from this range
    /// Returns None for Any (*) since any version is acceptable
    fn base_version(&self) -> Option<Version> {
        match self {
            VersionRange::Exact(v)
            | VersionRange::Caret(v)
            | VersionRange::Tilde(v)
            | VersionRange::Gte(v)
            | VersionRange::Gt(v)
            | VersionRange::Lte(v)
            | VersionRange::Lt(v) => Some(v.clone()),
            VersionRange::Any => None,
            VersionRange::WildcardMajor(major) => Some(Version::new(*major, 0, 0)),
            VersionRange::WildcardMinor(major, minor) => Some(Version::new(*major, *minor, 0)),
            VersionRange::Hyphen { from, .. } => Some(from.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn satisfies(spec: &str, version: &str) -> bool {
        DeclaredRange::parse(spec).satisfies(&Version::parse(version).unwrap())
    }

    #[rstest]
    #[case("1.0.0", true)]
    #[case("=1.0.0", true)]
    #[case("v1.0.0", true)]
    #[case("1.0.0-alpha.0", true)]
    #[case("1.x", true)]
    #[case("1.2", true)]
    #[case("*", true)]
    #[case("", true)]
    #[case("1.0.0 - 2.0.0", true)]
    #[case("^1.0.0", false)]
    #[case("~1.0.0", false)]
    #[case(">=1.0.0", false)]
    #[case(">= 1.0.0", false)]
    #[case("<2.0.0", false)]
    fn parse_detects_locked_versions(#[case] spec: &str, #[case] locked: bool) {
        assert_eq!(DeclaredRange::parse(spec).is_locked(), locked);
    }

    #[rstest]
    #[case("latest")]
    #[case("next")]
    #[case("file:../local-pkg")]
    #[case("git+https://github.com/user/repo.git")]
    #[case("npm:lodash@^4.0.0")]
    #[case("workspace:*")]
    #[case(">=")]
    fn parse_marks_non_semver_specs_unsupported(#[case] spec: &str) {
        assert!(matches!(
            DeclaredRange::parse(spec),
            DeclaredRange::Unsupported(_)
        ));
    }

    #[rstest]
    #[case("^1.2.3", "1.2.3", true)]
    #[case("^1.2.3", "1.9.9", true)]
    #[case("^1.2.3", "1.2.2", false)]
    #[case("^1.2.3", "2.0.0", false)]
    #[case("^0.2.3", "0.2.9", true)]
    #[case("^0.2.3", "0.3.0", false)]
    #[case("^0.0.3", "0.0.3", true)]
    #[case("^0.0.3", "0.0.4", false)]
    #[case("^0", "0.9.0", true)]
    #[case("^0", "1.0.0", false)]
    #[case("^1.2", "1.9.0", true)]
    #[case("^1.x", "1.4.0", true)]
    #[case("^1.2.x", "1.5.0", true)]
    #[case("^1.2.x", "1.1.9", false)]
    #[case("^1.2.x", "2.0.0", false)]
    #[case("^0.1.x", "0.1.7", true)]
    #[case("^0.1.x", "0.2.0", false)]
    #[case("^0.x", "0.9.0", true)]
    #[case("^0.0.x", "0.0.9", true)]
    #[case("^0.0.x", "0.1.0", false)]
    fn caret_ranges(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("~1.2.3", "1.2.9", true)]
    #[case("~1.2.3", "1.3.0", false)]
    #[case("~1.2.3", "1.2.2", false)]
    #[case("~1.2", "1.2.0", true)]
    #[case("~1", "1.9.0", true)]
    #[case("~1", "2.0.0", false)]
    fn tilde_ranges(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case(">=1.0.0", "2.0.0", true)]
    #[case(">=1.0.0", "0.9.9", false)]
    #[case(">1.0.0", "1.0.0", false)]
    #[case("<=1.0.0", "1.0.0", true)]
    #[case("<1.0.0", "1.0.0", false)]
    #[case("*", "99.0.0", true)]
    #[case("", "3.1.4", true)]
    #[case("1.x", "1.9.9", true)]
    #[case("1.x", "2.0.0", false)]
    #[case("1.2.x", "1.2.9", true)]
    #[case("1.2.*", "1.3.0", false)]
    #[case("1", "1.5.0", true)]
    #[case("0.14", "0.14.3", true)]
    #[case("0.14", "0.15.0", false)]
    fn comparison_and_wildcard_ranges(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case(">=1.0.0 <2.0.0", "1.5.0", true)]
    #[case(">=1.0.0 <2.0.0", "2.0.0", false)]
    #[case("^1.0.0 || ^2.0.0", "2.5.0", true)]
    #[case("^1.0.0 || ^2.0.0", "3.0.0", false)]
    #[case("1.0.0 - 2.0.0", "2.0.0", true)]
    #[case("1.0.0 - 2.0.0", "2.0.1", false)]
    #[case(">= 1.2.0", "1.2.0", true)]
    #[case(">= 1.2.0", "1.1.9", false)]
    #[case(">= 1.2.0 < 2.0.0", "1.9.0", true)]
    #[case(">= 1.2.0 < 2.0.0", "2.0.0", false)]
    #[case("^ 1.2.0 || ~ 2.1.0", "2.1.5", true)]
    fn compound_ranges(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    // Prereleases are excluded unless a comparator names the same tuple
    #[case("^1.0.0", "1.1.0-beta.1", false)]
    #[case(">=1.0.0", "2.0.0-rc.1", false)]
    #[case("*", "1.0.0-alpha.1", false)]
    #[case("^1.0.0-alpha.0", "1.0.0-alpha.3", true)]
    #[case("^1.0.0-alpha.0", "1.0.0-beta.0", true)]
    #[case("^1.0.0-alpha.0", "1.0.0", true)]
    #[case("^1.0.0-alpha.0", "1.2.0", true)]
    #[case("^1.0.0-alpha.0", "1.1.0-alpha.0", false)]
    #[case("^1.0.0-beta.2", "1.0.0-beta.1", false)]
    #[case("^1.0.0-beta.2 || ^2.0.0", "1.0.0-beta.3", true)]
    fn prerelease_versions(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(satisfies(spec, version), expected);
    }

    #[rstest]
    #[case("^1.0.0-alpha.0", true)]
    #[case("~2.1.0-rc.1", true)]
    #[case("^1.0.0+build.1", true)]
    #[case("1.0.0-beta.0", true)]
    #[case("^1.0.0", false)]
    #[case("*", false)]
    #[case("latest", false)]
    fn is_prerelease_checks_the_declared_version(#[case] spec: &str, #[case] expected: bool) {
        assert_eq!(DeclaredRange::parse(spec).is_prerelease(), expected);
    }
}
