//! Semantic version comparison with an explicit incomparability verdict
//!
//! Chart repositories publish version strings that are usually, but not
//! always, valid semver. Comparison therefore yields a four-way verdict
//! instead of an ordering or an error: two strings either order under
//! semver precedence, or they are [`Comparison::Incomparable`] and the
//! caller decides what the conservative interpretation is.

use std::cmp::Ordering;

use semver::Version;

/// Verdict of comparing two version strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Both parse and denote the same version.
    Equal,
    /// Both parse; the first precedes the second.
    Less,
    /// Both parse; the first succeeds the second.
    Greater,
    /// At least one operand is not a parseable semantic version.
    ///
    /// Kept distinct from `Equal`: two unparseable strings must never be
    /// reported as matching.
    Incomparable,
}

/// Compare two version strings under semantic-versioning precedence.
///
/// MAJOR, MINOR and PATCH compare numerically; pre-release tags sort
/// before the release they qualify. Returns
/// [`Comparison::Incomparable`] when either operand fails to parse;
/// never panics.
pub fn compare(a: &str, b: &str) -> Comparison {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => match a.cmp(&b) {
            Ordering::Less => Comparison::Less,
            Ordering::Equal => Comparison::Equal,
            Ordering::Greater => Comparison::Greater,
        },
        _ => Comparison::Incomparable,
    }
}

/// Parse a version string, tolerating surrounding whitespace and a single
/// leading `v`/`V` (charts are commonly published with tag-style versions
/// like `v1.2.3`).
fn parse(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}
