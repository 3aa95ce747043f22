//! Go release version comparison
//!
//! Go versions are not semver: `1.21` and `1.21.0` name the same release,
//! and prereleases are spelled `1.23rc1` or `1.22beta2`. Versions are
//! normalized to semver before comparing, with a numeric fallback for
//! anything that still does not parse.

use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::sync::LazyLock;

// 1, 1.21, 1.21.3, 1.23rc1, 1.22beta2
static GO_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:([a-z]+)(\d*))?$").unwrap()
});

/// Convert a Go version string into a semver version, if possible
pub fn to_semver(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix("go")
        .or_else(|| trimmed.strip_prefix('v'))
        .unwrap_or(trimmed);

    let caps = GO_VERSION_RE.captures(trimmed)?;
    let part = |i: usize| caps.get(i).map_or("0", |m| m.as_str());

    let mut normalized = format!("{}.{}.{}", part(1), part(2), part(3));
    if let Some(tag) = caps.get(4) {
        normalized.push('-');
        normalized.push_str(tag.as_str());
        if let Some(n) = caps.get(5).filter(|m| !m.as_str().is_empty()) {
            normalized.push_str(n.as_str());
        }
    }

    Version::parse(&normalized).ok()
}

/// Compare two Go version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (to_semver(a), to_semver(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        _ => compare_numeric(a, b),
    }
}

/// Check if `latest` is a newer release than `current`
pub fn is_newer(latest: &str, current: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    let parse_parts = |s: &str| -> Vec<u64> {
        let s = s.trim_start_matches("go").trim_start_matches('v');
        s.split(['.', '-']).filter_map(|p| p.parse().ok()).collect()
    };

    let parts_a = parse_parts(a);
    let parts_b = parse_parts(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        match pa.cmp(pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    parts_a.len().cmp(&parts_b.len())
}
