//! Schema version comparison.
//!
//! Versions are dot-separated numeric components ("2.3.1", "4.2"). Components
//! compare numerically, and missing trailing components count as zero, so
//! "4.2" equals "4.2.0" and "2.3.10" sorts after "2.3.9".

use std::cmp::Ordering;

/// Compare two version strings component by component.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = components(a);
    let right = components(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// True if `a` sorts strictly before `b`.
pub fn is_older(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Less
}

/// Check that a version string is non-empty and made of numeric components.
pub fn is_valid(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// Numeric value of each component. Trailing non-digits (e.g. "1rc") are ignored.
fn components(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}
