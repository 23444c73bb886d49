//! Run and bundle identity types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a bundle within one learning run.
///
/// Bundles are numbered in the order they are produced (oldest first), so the
/// id doubles as the position used by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(pub usize);

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BundleId {
    fn from(index: usize) -> Self {
        BundleId(index)
    }
}

/// Run ID for correlating logs and outputs of one invocation.
///
/// Format: `tt-YYYYMMDD-HHMMSS-XXXX`
/// Example: `tt-20260115-143022-a7xq`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new run ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let suffix = generate_base32_suffix();
        RunId(format!(
            "tt-{}-{}-{}",
            now.format("%Y%m%d"),
            now.format("%H%M%S"),
            suffix
        ))
    }

    /// Parse an existing run ID string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 23 {
            return None;
        }
        let bytes = s.as_bytes();
        if bytes.first() != Some(&b't')
            || bytes.get(1) != Some(&b't')
            || bytes.get(2) != Some(&b'-')
            || bytes.get(11) != Some(&b'-')
            || bytes.get(18) != Some(&b'-')
        {
            return None;
        }
        let date = &s[3..11];
        let time = &s[12..18];
        let suffix = &s[19..23];
        if !date.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !time.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !suffix.chars().all(|c| matches!(c, 'a'..='z' | '2'..='7')) {
            return None;
        }
        Some(RunId(s.to_string()))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn generate_base32_suffix() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    let mut value = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32);
    value &= 0x000F_FFFF;
    let alphabet = b"abcdefghijklmnopqrstuvwxyz234567";
    let mut out = String::with_capacity(4);
    for shift in [15_u32, 10, 5, 0] {
        let idx = ((value >> shift) & 0x1F) as usize;
        out.push(alphabet[idx] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_format() {
        let rid = RunId::new();
        assert!(rid.0.starts_with("tt-"));
        assert_eq!(rid.0.len(), 23);
    }

    #[test]
    fn test_run_id_roundtrips_through_parse() {
        let rid = RunId::new();
        assert_eq!(RunId::parse(&rid.0), Some(rid));
    }

    #[test]
    fn test_run_id_parse_rejects_garbage() {
        assert!(RunId::parse("xx-20260115-143022-a7xq").is_none());
        assert!(RunId::parse("tt-2026011x-143022-a7xq").is_none());
        assert!(RunId::parse("tt-20260115-143022-A7XQ").is_none());
        assert!(RunId::parse("tt-short").is_none());
    }

    #[test]
    fn test_bundle_id_display_and_order() {
        assert_eq!(BundleId(7).to_string(), "7");
        assert!(BundleId(1) < BundleId(2));
        assert_eq!(BundleId::from(3), BundleId(3));
    }
}
