#![allow(dead_code)]

use chrono::{DateTime, Utc};
use tempfile::TempDir;
use verdant::garden::tracker::Garden;

/// Open a fresh garden in a throwaway directory.
///
/// Keep the returned `TempDir` alive for as long as the garden is in use.
pub fn test_garden() -> (TempDir, Garden) {
    let dir = TempDir::new().unwrap();
    let garden = Garden::open(dir.path()).unwrap();
    (dir, garden)
}

/// Parse an RFC 3339 timestamp.
pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

/// A tiny stand-in for an encoded photo (base64 of `"photo"`).
pub fn photo_b64() -> String {
    "cGhvdG8=".to_string()
}
